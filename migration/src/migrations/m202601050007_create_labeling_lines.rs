use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601050007_create_labeling_lines"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("labeling_lines"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("section_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("code")).string().not_null().unique_key())
                    .col(ColumnDef::new(Alias::new("name")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .enumeration(
                                Alias::new("labeling_line_status"),
                                vec![
                                    Alias::new("running"),
                                    Alias::new("idle"),
                                    Alias::new("maintenance"),
                                    Alias::new("offline"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("label_type")).string().not_null())
                    .col(ColumnDef::new(Alias::new("speed_per_minute")).double().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("labels_applied_today")).integer().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("last_maintenance_at")).timestamp())
                    .col(ColumnDef::new(Alias::new("next_maintenance_at")).timestamp())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("labeling_lines"), Alias::new("section_id"))
                            .to(Alias::new("sections"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("labeling_lines")).to_owned())
            .await
    }
}
