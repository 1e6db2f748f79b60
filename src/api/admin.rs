use std::sync::Arc;

use poem_openapi::param::Path;
use poem_openapi::payload::Json;
use poem_openapi::{OpenApi, Tags};

use crate::api::creator::{parse_tags, store_upload};
use crate::api::{authenticate, require, SessionAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::revenue;
use crate::stores::{CheckoutKind, NewPack};
use crate::types::dto::admin::{InvitationResponse, InviteCreatorRequest, StatsResponse};
use crate::types::dto::auth::UserResponse;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::packs::{
    AdminUploadPackRequest, MarkFeaturedRequest, MarkFreeRequest, MarkSyncReadyRequest,
    PackResponse, UpdateMetadataRequest,
};
use crate::types::internal::Capability;

/// Admin API endpoints
pub struct AdminApi {
    app: Arc<AppData>,
}

impl AdminApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Platform administration
    Admin,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// List creators awaiting approval
    #[oai(path = "/creators", method = "get", tag = "AdminTags::Admin")]
    async fn list_pending_creators(
        &self,
        auth: SessionAuth,
    ) -> Result<Json<Vec<UserResponse>>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::ManagePlatform)?;

        let creators = self
            .app
            .user_store
            .list_pending_creators()
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(creators.into_iter().map(UserResponse::from).collect()))
    }

    /// Approve a pending creator
    ///
    /// Idempotent; approving an already-approved creator changes nothing.
    #[oai(
        path = "/creators/:creator_id/approve",
        method = "post",
        tag = "AdminTags::Admin"
    )]
    async fn approve_creator(
        &self,
        auth: SessionAuth,
        creator_id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::ManagePlatform)?;

        let role = self
            .app
            .account_service
            .approve_creator(&creator_id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse::new(format!(
            "Creator role is now {}",
            role
        ))))
    }

    /// Upload a pack on behalf of a creator
    #[oai(path = "/packs", method = "post", tag = "AdminTags::Admin")]
    async fn upload_pack(
        &self,
        auth: SessionAuth,
        body: AdminUploadPackRequest,
    ) -> Result<Json<PackResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::ManagePlatform)?;

        let creator = self
            .app
            .user_store
            .find_by_email(&body.creator_email.to_lowercase())
            .await
            .map_err(ApiError::from_internal_error)?
            .ok_or_else(|| ApiError::not_found("No user with that email"))?;

        if body.price_cents < 0 {
            return Err(ApiError::validation("Price cannot be negative"));
        }
        let is_free = body.is_free.unwrap_or(false) || body.price_cents == 0;

        let (file_ref, file_kind, file_size) = store_upload(&self.app, body.file).await?;

        let pack = self
            .app
            .pack_store
            .insert(NewPack {
                title: body.title,
                description: body.description,
                category: body.category,
                tags: parse_tags(body.tags),
                price_cents: body.price_cents,
                is_free,
                is_featured: body.is_featured.unwrap_or(false),
                is_sync_ready: body.is_sync_ready.unwrap_or(false),
                sync_type: body.sync_type,
                bpm: body.bpm,
                musical_key: body.musical_key,
                creator_id: creator.id.clone(),
                creator_name: creator.name.clone(),
                file_ref,
                file_kind,
                file_size,
            })
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(pack.into()))
    }

    /// Toggle a pack's free flag
    #[oai(
        path = "/packs/:pack_id/mark-free",
        method = "post",
        tag = "AdminTags::Admin"
    )]
    async fn mark_free(
        &self,
        auth: SessionAuth,
        pack_id: Path<String>,
        body: Json<MarkFreeRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::ManagePlatform)?;

        self.app
            .pack_store
            .set_free(&pack_id.0, body.0.is_free)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse::new("Pack updated")))
    }

    /// Toggle a pack's featured flag
    #[oai(
        path = "/packs/:pack_id/mark-featured",
        method = "post",
        tag = "AdminTags::Admin"
    )]
    async fn mark_featured(
        &self,
        auth: SessionAuth,
        pack_id: Path<String>,
        body: Json<MarkFeaturedRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::ManagePlatform)?;

        self.app
            .pack_store
            .set_featured(&pack_id.0, body.0.is_featured)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse::new("Pack updated")))
    }

    /// Toggle a pack's sync-licensing readiness
    #[oai(
        path = "/packs/:pack_id/mark-sync-ready",
        method = "post",
        tag = "AdminTags::Admin"
    )]
    async fn mark_sync_ready(
        &self,
        auth: SessionAuth,
        pack_id: Path<String>,
        body: Json<MarkSyncReadyRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::ManagePlatform)?;

        self.app
            .pack_store
            .set_sync_ready(&pack_id.0, body.0.is_sync_ready, body.0.sync_type.clone())
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse::new("Pack updated")))
    }

    /// Update a pack's musical metadata
    #[oai(
        path = "/packs/:pack_id/update-metadata",
        method = "post",
        tag = "AdminTags::Admin"
    )]
    async fn update_metadata(
        &self,
        auth: SessionAuth,
        pack_id: Path<String>,
        body: Json<UpdateMetadataRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::ManagePlatform)?;

        self.app
            .pack_store
            .update_metadata(&pack_id.0, body.0.bpm, body.0.musical_key.clone())
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse::new("Pack updated")))
    }

    /// Platform statistics
    #[oai(path = "/stats", method = "get", tag = "AdminTags::Admin")]
    async fn stats(&self, auth: SessionAuth) -> Result<Json<StatsResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::ManagePlatform)?;

        let total_users = self
            .app
            .user_store
            .count_users()
            .await
            .map_err(ApiError::from_internal_error)?;
        let total_creators = self
            .app
            .user_store
            .count_approved_creators()
            .await
            .map_err(ApiError::from_internal_error)?;
        let total_packs = self
            .app
            .pack_store
            .count()
            .await
            .map_err(ApiError::from_internal_error)?;
        let total_subscriptions = self
            .app
            .subscription_store
            .count_active()
            .await
            .map_err(ApiError::from_internal_error)?;

        let purchases = self
            .app
            .purchase_store
            .list_all()
            .await
            .map_err(ApiError::from_internal_error)?;
        let total_revenue_cents: i64 = purchases.iter().map(|p| p.amount_cents).sum();

        let subscription_checkouts = self
            .app
            .checkout_store
            .list_paid_by_kind(CheckoutKind::Subscription)
            .await
            .map_err(ApiError::from_internal_error)?;
        let subscription_revenue_cents: i64 =
            subscription_checkouts.iter().map(|c| c.amount_cents).sum();

        let split = revenue::split(total_revenue_cents, self.app.settings.platform_fee_percent);

        Ok(Json(StatsResponse {
            total_users,
            total_creators,
            total_packs,
            total_purchases: purchases.len() as u64,
            total_subscriptions,
            total_revenue_cents,
            subscription_revenue_cents,
            platform_earnings_cents: split.platform_cents,
            creator_earnings_cents: split.creator_cents,
        }))
    }

    /// List all users
    #[oai(path = "/users", method = "get", tag = "AdminTags::Admin")]
    async fn list_users(&self, auth: SessionAuth) -> Result<Json<Vec<UserResponse>>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::ManagePlatform)?;

        let users = self
            .app
            .user_store
            .list_all()
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(users.into_iter().map(UserResponse::from).collect()))
    }

    /// Invite a creator by email
    ///
    /// The invitee skips the application queue and registers directly as an
    /// approved creator. A second invitation for the same email is a 409.
    #[oai(path = "/invitations", method = "post", tag = "AdminTags::Admin")]
    async fn invite_creator(
        &self,
        auth: SessionAuth,
        body: Json<InviteCreatorRequest>,
    ) -> Result<Json<InvitationResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::ManagePlatform)?;

        let email = body.0.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::validation("A valid email address is required"));
        }

        let invitation = self
            .app
            .invitation_store
            .invite(&email, current.id())
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(invitation.into()))
    }

    /// List all invitations
    #[oai(path = "/invitations", method = "get", tag = "AdminTags::Admin")]
    async fn list_invitations(
        &self,
        auth: SessionAuth,
    ) -> Result<Json<Vec<InvitationResponse>>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::ManagePlatform)?;

        let invitations = self
            .app
            .invitation_store
            .list_all()
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(
            invitations.into_iter().map(InvitationResponse::from).collect(),
        ))
    }
}
