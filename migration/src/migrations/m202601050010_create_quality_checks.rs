use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601050010_create_quality_checks"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("quality_checks"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("section_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("batch_code")).string().not_null())
                    .col(ColumnDef::new(Alias::new("checked_at")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("sample_size")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("defect_count")).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .enumeration(
                                Alias::new("quality_check_status"),
                                vec![
                                    Alias::new("passed"),
                                    Alias::new("rework"),
                                    Alias::new("rejected"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("grade"))
                            .enumeration(
                                Alias::new("quality_grade"),
                                vec![Alias::new("a"), Alias::new("b"), Alias::new("c")],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("inspector_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("notes")).text())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("quality_checks"), Alias::new("section_id"))
                            .to(Alias::new("sections"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("quality_checks"), Alias::new("inspector_id"))
                            .to(Alias::new("users"), Alias::new("id")),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("quality_checks")).to_owned())
            .await
    }
}
