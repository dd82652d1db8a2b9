use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601050009_create_processing_logs"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("processing_logs"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("section_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("batch_code")).string().not_null())
                    .col(ColumnDef::new(Alias::new("product")).string().not_null())
                    .col(ColumnDef::new(Alias::new("input_quantity")).double().not_null())
                    .col(ColumnDef::new(Alias::new("output_quantity")).double())
                    .col(ColumnDef::new(Alias::new("yield_pct")).double())
                    .col(ColumnDef::new(Alias::new("started_at")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("ended_at")).timestamp())
                    .col(ColumnDef::new(Alias::new("duration_minutes")).integer())
                    .col(ColumnDef::new(Alias::new("operator_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("supervisor_id")).integer())
                    .col(ColumnDef::new(Alias::new("notes")).text())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("processing_logs"), Alias::new("section_id"))
                            .to(Alias::new("sections"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("processing_logs"), Alias::new("operator_id"))
                            .to(Alias::new("users"), Alias::new("id")),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("processing_logs")).to_owned())
            .await
    }
}
