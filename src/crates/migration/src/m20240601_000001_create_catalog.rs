use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Album::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Album::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Album::NameCn).string().not_null())
                    .col(ColumnDef::new(Album::NameEn).string().not_null().default(""))
                    .col(ColumnDef::new(Album::ReleaseDate).string().not_null())
                    .col(ColumnDef::new(Album::CoverUrl).string().not_null().default(""))
                    .col(ColumnDef::new(Album::AlbumDetail).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Album::CreationBackground)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Album::Awards).json_binary().not_null())
                    .col(ColumnDef::new(Album::Language).string().not_null())
                    .col(ColumnDef::new(Album::RecordLabel).string().not_null().default(""))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Song::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Song::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Song::AlbumId).string().not_null())
                    .col(ColumnDef::new(Song::TrackNumber).integer().not_null())
                    .col(ColumnDef::new(Song::NameCn).string().not_null())
                    .col(ColumnDef::new(Song::NameEn).string().null())
                    .col(ColumnDef::new(Song::Lyricist).string().not_null().default(""))
                    .col(ColumnDef::new(Song::Composer).string().not_null().default(""))
                    .col(ColumnDef::new(Song::Arranger).string().null())
                    .col(ColumnDef::new(Song::Duration).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_song_album_id")
                    .table(Song::Table)
                    .col(Song::AlbumId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Single::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Single::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Single::NameCn).string().not_null())
                    .col(ColumnDef::new(Single::ReleaseDate).string().not_null())
                    .col(ColumnDef::new(Single::Description).text().null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Single::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Song::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Album::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Album {
    Table,
    Id,
    NameCn,
    NameEn,
    ReleaseDate,
    CoverUrl,
    AlbumDetail,
    CreationBackground,
    Awards,
    Language,
    RecordLabel,
}

#[derive(DeriveIden)]
enum Song {
    Table,
    Id,
    AlbumId,
    TrackNumber,
    NameCn,
    NameEn,
    Lyricist,
    Composer,
    Arranger,
    Duration,
}

#[derive(DeriveIden)]
enum Single {
    Table,
    Id,
    NameCn,
    ReleaseDate,
    Description,
}
