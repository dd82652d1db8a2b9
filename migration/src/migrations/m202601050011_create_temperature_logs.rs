use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601050011_create_temperature_logs"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("temperature_logs"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("section_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("location")).string().not_null())
                    .col(ColumnDef::new(Alias::new("temperature_c")).double().not_null())
                    .col(ColumnDef::new(Alias::new("humidity_pct")).double())
                    .col(ColumnDef::new(Alias::new("recorded_by")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("recorded_at")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("temperature_logs"), Alias::new("section_id"))
                            .to(Alias::new("sections"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("temperature_logs"), Alias::new("recorded_by"))
                            .to(Alias::new("users"), Alias::new("id")),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("temperature_logs")).to_owned())
            .await
    }
}
