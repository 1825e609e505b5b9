use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 seed_runs 表（已完成的批量导入记录）
        manager
            .create_table(
                Table::create()
                    .table(SeedRuns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SeedRuns::Name)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SeedRuns::AppliedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SeedRuns::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SeedRuns {
    Table,
    Name,
    AppliedAt,
}
