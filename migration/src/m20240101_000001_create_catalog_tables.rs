use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Artists are keyed by their public catalog id
        manager
            .create_table(
                Table::create()
                    .table("artists")
                    .if_not_exists()
                    .col(ColumnDef::new("id").string().not_null().primary_key())
                    .col(ColumnDef::new("user_id").string().unique_key())
                    .col(
                        ColumnDef::new("profile")
                            .json()
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(
                        ColumnDef::new("created_at")
                            .integer()
                            .not_null()
                            .default(Expr::cust("(strftime('%s', 'now'))")),
                    )
                    .col(
                        ColumnDef::new("updated_at")
                            .integer()
                            .not_null()
                            .default(Expr::cust("(strftime('%s', 'now'))")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table("releases")
                    .if_not_exists()
                    .col(ColumnDef::new("id").string().not_null().primary_key())
                    .col(ColumnDef::new("artist_id").string().not_null())
                    .col(ColumnDef::new("title").string())
                    .col(ColumnDef::new("upc").string())
                    .col(ColumnDef::new("release_date").timestamp_with_time_zone())
                    .col(ColumnDef::new("delivery_date").timestamp_with_time_zone())
                    .col(ColumnDef::new("takedown_date").timestamp_with_time_zone())
                    .col(ColumnDef::new("cover_art_id").string())
                    .col(
                        ColumnDef::new("track_order")
                            .json()
                            .not_null()
                            .default(Expr::cust("'[]'")),
                    )
                    .col(
                        ColumnDef::new("created_at")
                            .integer()
                            .not_null()
                            .default(Expr::cust("(strftime('%s', 'now'))")),
                    )
                    .col(
                        ColumnDef::new("updated_at")
                            .integer()
                            .not_null()
                            .default(Expr::cust("(strftime('%s', 'now'))")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_releases_artist_id")
                            .from("releases", "artist_id")
                            .to("artists", "id")
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_releases_artist_id")
                    .table("releases")
                    .col("artist_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table("tracks")
                    .if_not_exists()
                    .col(ColumnDef::new("id").string().not_null().primary_key())
                    .col(ColumnDef::new("release_id").string().not_null())
                    .col(ColumnDef::new("title").string().not_null())
                    .col(ColumnDef::new("track_number").integer())
                    .col(ColumnDef::new("duration").integer())
                    .col(ColumnDef::new("isrc").string())
                    .col(
                        ColumnDef::new("created_at")
                            .integer()
                            .not_null()
                            .default(Expr::cust("(strftime('%s', 'now'))")),
                    )
                    .col(
                        ColumnDef::new("updated_at")
                            .integer()
                            .not_null()
                            .default(Expr::cust("(strftime('%s', 'now'))")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tracks_release_id")
                            .from("tracks", "release_id")
                            .to("releases", "id")
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tracks_release_id")
                    .table("tracks")
                    .col("release_id")
                    .to_owned(),
            )
            .await?;

        // Cover art has no track; audio files belong to exactly one track
        manager
            .create_table(
                Table::create()
                    .table("assets")
                    .if_not_exists()
                    .col(ColumnDef::new("id").string().not_null().primary_key())
                    .col(ColumnDef::new("track_id").string())
                    .col(ColumnDef::new("kind").string().not_null())
                    .col(ColumnDef::new("mime_type").string())
                    .col(
                        ColumnDef::new("created_at")
                            .integer()
                            .not_null()
                            .default(Expr::cust("(strftime('%s', 'now'))")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assets_track_id")
                            .from("assets", "track_id")
                            .to("tracks", "id")
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table("assets").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table("tracks").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table("releases").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table("artists").to_owned())
            .await?;

        Ok(())
    }
}
