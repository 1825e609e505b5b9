//! IP 段表迁移
//!
//! ip_blocks 存储互不重叠的 [ip_from, ip_to] 区间及其地理位置，
//! ip_from 上的索引用于 floor 查询（最大的 ip_from <= target）。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 ip_blocks 表
        manager
            .create_table(
                Table::create()
                    .table(IpBlocks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IpBlocks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(IpBlocks::IpFrom).big_integer().not_null())
                    .col(ColumnDef::new(IpBlocks::IpTo).big_integer().not_null())
                    .col(ColumnDef::new(IpBlocks::CountryCode).string_len(8).not_null())
                    .col(ColumnDef::new(IpBlocks::Region).text().not_null())
                    .col(ColumnDef::new(IpBlocks::City).text().not_null())
                    .to_owned(),
            )
            .await?;

        // floor 查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ip_blocks_from")
                    .table(IpBlocks::Table)
                    .col(IpBlocks::IpFrom)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_ip_blocks_from").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(IpBlocks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum IpBlocks {
    Table,
    Id,
    IpFrom,
    IpTo,
    CountryCode,
    Region,
    City,
}
