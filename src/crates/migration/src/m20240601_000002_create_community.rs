use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Nickname).string().not_null())
                    .col(ColumnDef::new(Users::Avatar).string_len(512).null())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).date_time().not_null())
                    .col(ColumnDef::new(Users::Version).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 评分：同一用户对同一资源只有一条
        manager
            .create_table(
                Table::create()
                    .table(Rating::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rating::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rating::ResourceType).string().not_null())
                    .col(ColumnDef::new(Rating::ResourceId).string().not_null())
                    .col(ColumnDef::new(Rating::Username).string().not_null())
                    .col(ColumnDef::new(Rating::Score).double().not_null())
                    .col(ColumnDef::new(Rating::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Rating::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("rating_resource_user_unique")
                    .table(Rating::Table)
                    .col(Rating::ResourceType)
                    .col(Rating::ResourceId)
                    .col(Rating::Username)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comment::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comment::ResourceType).string().not_null())
                    .col(ColumnDef::new(Comment::ResourceId).string().not_null())
                    .col(ColumnDef::new(Comment::Username).string().not_null())
                    .col(ColumnDef::new(Comment::Content).text().not_null())
                    .col(ColumnDef::new(Comment::ParentId).big_integer().null())
                    .col(ColumnDef::new(Comment::ReplyToCommentId).big_integer().null())
                    .col(ColumnDef::new(Comment::ReplyToUsername).string().null())
                    .col(
                        ColumnDef::new(Comment::LikeCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Comment::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comment_resource")
                    .table(Comment::Table)
                    .col(Comment::ResourceType)
                    .col(Comment::ResourceId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comment_parent_id")
                    .table(Comment::Table)
                    .col(Comment::ParentId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CommentLike::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommentLike::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CommentLike::CommentId).big_integer().not_null())
                    .col(ColumnDef::new(CommentLike::Username).string().not_null())
                    .col(ColumnDef::new(CommentLike::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("comment_like_comment_user_unique")
                    .table(CommentLike::Table)
                    .col(CommentLike::CommentId)
                    .col(CommentLike::Username)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notification::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notification::Receiver).string().not_null())
                    .col(ColumnDef::new(Notification::Sender).string().not_null())
                    .col(ColumnDef::new(Notification::CommentId).big_integer().not_null())
                    .col(ColumnDef::new(Notification::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Notification::Read)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Notification::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notification_receiver_read")
                    .table(Notification::Table)
                    .col(Notification::Receiver)
                    .col(Notification::Read)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notification_comment_id")
                    .table(Notification::Table)
                    .col(Notification::CommentId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommentLike::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Comment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rating::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Nickname,
    Avatar,
    Password,
    CreatedAt,
    UpdatedAt,
    Version,
}

#[derive(DeriveIden)]
enum Rating {
    Table,
    Id,
    ResourceType,
    ResourceId,
    Username,
    Score,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Comment {
    Table,
    Id,
    ResourceType,
    ResourceId,
    Username,
    Content,
    ParentId,
    ReplyToCommentId,
    ReplyToUsername,
    LikeCount,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CommentLike {
    Table,
    Id,
    CommentId,
    Username,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Notification {
    Table,
    Id,
    Receiver,
    Sender,
    CommentId,
    Kind,
    Read,
    CreatedAt,
}
