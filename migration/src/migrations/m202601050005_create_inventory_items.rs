use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601050005_create_inventory_items"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("inventory_items"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("section_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("item_code")).string().not_null().unique_key())
                    .col(ColumnDef::new(Alias::new("name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("category")).string().not_null())
                    .col(ColumnDef::new(Alias::new("quantity")).double().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("unit")).string().not_null())
                    .col(ColumnDef::new(Alias::new("unit_cost")).double().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("reorder_level")).double().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("critical_level")).double().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("inventory_items"), Alias::new("section_id"))
                            .to(Alias::new("sections"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("inventory_items")).to_owned())
            .await
    }
}
