use std::sync::Arc;

use poem_openapi::payload::Json;
use poem_openapi::types::multipart::Upload;
use poem_openapi::{OpenApi, Tags};
use uuid::Uuid;

use crate::api::{authenticate, require, SessionAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::revenue;
use crate::stores::NewPack;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::creator::{EarningsResponse, PayoutSettingsRequest};
use crate::types::dto::packs::{PackResponse, UploadPackRequest};
use crate::types::internal::Capability;

/// Creator API endpoints
pub struct CreatorApi {
    app: Arc<AppData>,
}

impl CreatorApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

/// API tags for creator endpoints
#[derive(Tags)]
enum CreatorTags {
    /// Creator account and catalog management
    Creators,
}

/// Persist an uploaded pack file and return its storage key, kind and size.
///
/// ZIP uploads are multi-sample archives; everything else is treated as a
/// single audio file.
pub(crate) async fn store_upload(
    app: &AppData,
    file: Upload,
) -> Result<(String, String, i64), ApiError> {
    let file_name = file.file_name().unwrap_or("upload").to_string();
    let file_kind = if file_name.to_lowercase().ends_with(".zip") {
        "archive"
    } else {
        "audio"
    };

    let bytes = file
        .into_vec()
        .await
        .map_err(|_| ApiError::validation("Could not read uploaded file"))?;
    if bytes.is_empty() {
        return Err(ApiError::validation("Uploaded file is empty"));
    }

    let extension = if file_kind == "archive" { "zip" } else { "mp3" };
    let key = format!("packs/{}.{}", Uuid::new_v4().simple(), extension);
    let size = bytes.len() as i64;

    app.blob_store
        .put(&key, bytes)
        .await
        .map_err(ApiError::from_internal_error)?;

    Ok((key, file_kind.to_string(), size))
}

/// Split a comma-separated tags field into trimmed, non-empty tags.
pub(crate) fn parse_tags(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

#[OpenApi(prefix_path = "/creator")]
impl CreatorApi {
    /// Apply to become a creator
    ///
    /// Idempotent; applying again while pending or approved changes nothing.
    #[oai(path = "/apply", method = "post", tag = "CreatorTags::Creators")]
    async fn apply(&self, auth: SessionAuth) -> Result<Json<MessageResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;

        let role = self
            .app
            .account_service
            .apply_for_creator(&current.user)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse::new(format!(
            "Creator application status: {}",
            role
        ))))
    }

    /// Upload a new sample pack
    #[oai(path = "/packs", method = "post", tag = "CreatorTags::Creators")]
    async fn upload_pack(
        &self,
        auth: SessionAuth,
        body: UploadPackRequest,
    ) -> Result<Json<PackResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::UploadPacks)?;

        if body.price_cents < 0 {
            return Err(ApiError::validation("Price cannot be negative"));
        }
        let is_free = body.price_cents == 0;

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
                creator_id: current.id().to_string(),
                creator_name: current.user.name.clone(),
                file_ref,
                file_kind,
                file_size,
            })
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(pack.into()))
    }

    /// List the current creator's packs
    #[oai(path = "/packs", method = "get", tag = "CreatorTags::Creators")]
    async fn list_packs(&self, auth: SessionAuth) -> Result<Json<Vec<PackResponse>>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::UploadPacks)?;

        let packs = self
            .app
            .pack_store
            .list_by_creator(current.id())
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(packs.into_iter().map(PackResponse::from).collect()))
    }

    /// Earnings summary for the current creator
    #[oai(path = "/earnings", method = "get", tag = "CreatorTags::Creators")]
    async fn earnings(&self, auth: SessionAuth) -> Result<Json<EarningsResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::UploadPacks)?;

        let packs = self
            .app
            .pack_store
            .list_by_creator(current.id())
            .await
            .map_err(ApiError::from_internal_error)?;
        let pack_ids: Vec<String> = packs.iter().map(|p| p.id.clone()).collect();

        let purchases = self
            .app
            .purchase_store
            .list_for_packs(&pack_ids)
            .await
            .map_err(ApiError::from_internal_error)?;
        let total_downloads = self
            .app
            .download_store
            .count_for_packs(&pack_ids)
            .await
            .map_err(ApiError::from_internal_error)?;

        let total_revenue_cents: i64 = purchases.iter().map(|p| p.amount_cents).sum();
        let split = revenue::split(total_revenue_cents, self.app.settings.platform_fee_percent);

        Ok(Json(EarningsResponse {
            total_packs: packs.len() as u64,
            total_purchases: purchases.len() as u64,
            total_downloads,
            total_revenue_cents,
            creator_earnings_cents: split.creator_cents,
            platform_fee_cents: split.platform_cents,
        }))
    }

    /// Set the payout frequency for the current creator
    #[oai(
        path = "/payout-settings",
        method = "post",
        tag = "CreatorTags::Creators"
    )]
    async fn payout_settings(
        &self,
        auth: SessionAuth,
        body: Json<PayoutSettingsRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        require(&current, Capability::UploadPacks)?;

        let frequency = body.0.frequency.to_lowercase();
        if frequency != "weekly" && frequency != "monthly" {
            return Err(ApiError::validation(
                "Payout frequency must be weekly or monthly",
            ));
        }

        self.app
            .user_store
            .set_payout_frequency(current.id(), &frequency)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse::new(format!(
            "Payout frequency set to {}",
            frequency
        ))))
    }
}
