use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Store links (spotify, apple_music, ...) per release
        manager
            .create_table(
                Table::create()
                    .table("release_external_urls")
                    .if_not_exists()
                    .col(
                        ColumnDef::new("id")
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new("release_id").string().not_null())
                    .col(ColumnDef::new("platform").string().not_null())
                    .col(ColumnDef::new("url").string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_release_external_urls_release_id")
                            .from("release_external_urls", "release_id")
                            .to("releases", "id")
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_release_external_urls_release_platform")
                    .table("release_external_urls")
                    .col("release_id")
                    .col("platform")
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Social profile stats shown on the artist page
        manager
            .create_table(
                Table::create()
                    .table("artist_platform_summaries")
                    .if_not_exists()
                    .col(
                        ColumnDef::new("id")
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new("artist_id").string().not_null())
                    .col(ColumnDef::new("platform").string().not_null())
                    .col(ColumnDef::new("profile_url").string())
                    .col(ColumnDef::new("follower_count").big_integer())
                    .col(
                        ColumnDef::new("updated_at")
                            .integer()
                            .not_null()
                            .default(Expr::cust("(strftime('%s', 'now'))")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artist_platform_summaries_artist_id")
                            .from("artist_platform_summaries", "artist_id")
                            .to("artists", "id")
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table("artist_platform_summaries").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table("release_external_urls").to_owned())
            .await?;

        Ok(())
    }
}
