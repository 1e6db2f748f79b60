use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Picture).string().null())
                    .col(ColumnDef::new(Users::Role).string().not_null().default("user"))
                    .col(ColumnDef::new(Users::CreatorApproved).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::PayoutFrequency).string().not_null().default("monthly"))
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create sessions table
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sessions::TokenHash).string().not_null().primary_key())
                    .col(ColumnDef::new(Sessions::UserId).string().not_null())
                    .col(ColumnDef::new(Sessions::ExpiresAt).big_integer().not_null())
                    .col(ColumnDef::new(Sessions::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sessions_user_id")
                            .from(Sessions::Table, Sessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sessions_user_id")
                    .table(Sessions::Table)
                    .col(Sessions::UserId)
                    .to_owned(),
            )
            .await?;

        // Create packs table
        manager
            .create_table(
                Table::create()
                    .table(Packs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Packs::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Packs::Title).string().not_null())
                    .col(ColumnDef::new(Packs::Description).string().not_null())
                    .col(ColumnDef::new(Packs::Category).string().not_null())
                    .col(ColumnDef::new(Packs::Tags).string().not_null().default("[]"))
                    .col(ColumnDef::new(Packs::PriceCents).big_integer().not_null())
                    .col(ColumnDef::new(Packs::IsFree).boolean().not_null().default(false))
                    .col(ColumnDef::new(Packs::IsFeatured).boolean().not_null().default(false))
                    .col(ColumnDef::new(Packs::IsSyncReady).boolean().not_null().default(false))
                    .col(ColumnDef::new(Packs::SyncType).string().null())
                    .col(ColumnDef::new(Packs::Bpm).integer().null())
                    .col(ColumnDef::new(Packs::MusicalKey).string().null())
                    .col(ColumnDef::new(Packs::CreatorId).string().not_null())
                    .col(ColumnDef::new(Packs::CreatorName).string().not_null())
                    .col(ColumnDef::new(Packs::FileRef).string().not_null())
                    .col(ColumnDef::new(Packs::FileKind).string().not_null().default("audio"))
                    .col(ColumnDef::new(Packs::FileSize).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Packs::DownloadCount).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Packs::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_packs_creator_id")
                    .table(Packs::Table)
                    .col(Packs::CreatorId)
                    .to_owned(),
            )
            .await?;

        // Create purchases table
        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Purchases::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Purchases::UserId).string().not_null())
                    .col(ColumnDef::new(Purchases::PackId).string().not_null())
                    .col(ColumnDef::new(Purchases::AmountCents).big_integer().not_null())
                    .col(ColumnDef::new(Purchases::CheckoutSessionId).string().not_null().unique_key())
                    .col(ColumnDef::new(Purchases::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_purchases_user_pack")
                    .table(Purchases::Table)
                    .col(Purchases::UserId)
                    .col(Purchases::PackId)
                    .to_owned(),
            )
            .await?;

        // Create subscriptions table
        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subscriptions::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Subscriptions::UserId).string().not_null())
                    .col(ColumnDef::new(Subscriptions::CheckoutSessionId).string().not_null().unique_key())
                    .col(ColumnDef::new(Subscriptions::Status).string().not_null())
                    .col(ColumnDef::new(Subscriptions::ExpiresAt).big_integer().null())
                    .col(ColumnDef::new(Subscriptions::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subscriptions_user_id")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::UserId)
                    .to_owned(),
            )
            .await?;

        // Create invitations table
        manager
            .create_table(
                Table::create()
                    .table(Invitations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Invitations::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Invitations::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Invitations::InvitedBy).string().not_null())
                    .col(ColumnDef::new(Invitations::Status).string().not_null().default("pending"))
                    .col(ColumnDef::new(Invitations::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create downloads table
        manager
            .create_table(
                Table::create()
                    .table(Downloads::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Downloads::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Downloads::UserId).string().not_null())
                    .col(ColumnDef::new(Downloads::PackId).string().not_null())
                    .col(ColumnDef::new(Downloads::DownloadedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_downloads_pack_id")
                    .table(Downloads::Table)
                    .col(Downloads::PackId)
                    .to_owned(),
            )
            .await?;

        // Create favorites table
        manager
            .create_table(
                Table::create()
                    .table(Favorites::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Favorites::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Favorites::UserId).string().not_null())
                    .col(ColumnDef::new(Favorites::PackId).string().not_null())
                    .col(ColumnDef::new(Favorites::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favorites_user_pack")
                    .table(Favorites::Table)
                    .col(Favorites::UserId)
                    .col(Favorites::PackId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create collections table
        manager
            .create_table(
                Table::create()
                    .table(Collections::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Collections::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Collections::UserId).string().not_null())
                    .col(ColumnDef::new(Collections::Name).string().not_null())
                    .col(ColumnDef::new(Collections::Description).string().not_null().default(""))
                    .col(ColumnDef::new(Collections::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_collections_user_id")
                    .table(Collections::Table)
                    .col(Collections::UserId)
                    .to_owned(),
            )
            .await?;

        // Create collection_packs table
        manager
            .create_table(
                Table::create()
                    .table(CollectionPacks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CollectionPacks::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(CollectionPacks::CollectionId).string().not_null())
                    .col(ColumnDef::new(CollectionPacks::PackId).string().not_null())
                    .col(ColumnDef::new(CollectionPacks::AddedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collection_packs_collection_id")
                            .from(CollectionPacks::Table, CollectionPacks::CollectionId)
                            .to(Collections::Table, Collections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_collection_packs_collection_pack")
                    .table(CollectionPacks::Table)
                    .col(CollectionPacks::CollectionId)
                    .col(CollectionPacks::PackId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create checkout_sessions table
        manager
            .create_table(
                Table::create()
                    .table(CheckoutSessions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CheckoutSessions::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(CheckoutSessions::SessionId).string().not_null().unique_key())
                    .col(ColumnDef::new(CheckoutSessions::UserId).string().not_null())
                    .col(ColumnDef::new(CheckoutSessions::AmountCents).big_integer().not_null())
                    .col(ColumnDef::new(CheckoutSessions::Currency).string().not_null())
                    .col(ColumnDef::new(CheckoutSessions::PaymentStatus).string().not_null())
                    .col(ColumnDef::new(CheckoutSessions::Kind).string().not_null())
                    .col(ColumnDef::new(CheckoutSessions::PackId).string().null())
                    .col(ColumnDef::new(CheckoutSessions::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CheckoutSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CollectionPacks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Collections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Favorites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Downloads::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Invitations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Purchases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Packs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
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
    Email,
    Name,
    Picture,
    Role,
    CreatorApproved,
    PayoutFrequency,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    TokenHash,
    UserId,
    ExpiresAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Packs {
    Table,
    Id,
    Title,
    Description,
    Category,
    Tags,
    PriceCents,
    IsFree,
    IsFeatured,
    IsSyncReady,
    SyncType,
    Bpm,
    MusicalKey,
    CreatorId,
    CreatorName,
    FileRef,
    FileKind,
    FileSize,
    DownloadCount,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Purchases {
    Table,
    Id,
    UserId,
    PackId,
    AmountCents,
    CheckoutSessionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    Id,
    UserId,
    CheckoutSessionId,
    Status,
    ExpiresAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Invitations {
    Table,
    Id,
    Email,
    InvitedBy,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Downloads {
    Table,
    Id,
    UserId,
    PackId,
    DownloadedAt,
}

#[derive(DeriveIden)]
enum Favorites {
    Table,
    Id,
    UserId,
    PackId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Collections {
    Table,
    Id,
    UserId,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CollectionPacks {
    Table,
    Id,
    CollectionId,
    PackId,
    AddedAt,
}

#[derive(DeriveIden)]
enum CheckoutSessions {
    Table,
    Id,
    SessionId,
    UserId,
    AmountCents,
    Currency,
    PaymentStatus,
    Kind,
    PackId,
    CreatedAt,
}
