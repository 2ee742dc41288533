use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Video::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Video::Id)
                            .unsigned()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Video::Title).string().not_null())
                    .col(ColumnDef::new(Video::VideoUrl).string().not_null())
                    .col(ColumnDef::new(Video::ThumbnailUrl).string().not_null())
                    .col(ColumnDef::new(Video::Amount).string().not_null())
                    .col(ColumnDef::new(Video::Views).string().not_null())
                    .col(
                        ColumnDef::new(Video::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Video::UpdatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;
        // 列表按创建时间倒序返回
        manager
            .create_index(
                Index::create()
                    .table(Video::Table)
                    .name("idx_video_created_at")
                    .col(Video::CreatedAt)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Video::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Video {
    Table,
    Id,
    Title,
    VideoUrl,
    ThumbnailUrl,
    Amount,
    Views,
    CreatedAt,
    UpdatedAt,
}
