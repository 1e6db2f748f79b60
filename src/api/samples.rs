use std::sync::Arc;

use poem_openapi::param::{Header, Path, Query};
use poem_openapi::payload::{Attachment, AttachmentType, Binary, Json};
use poem_openapi::{OpenApi, Tags};

use crate::api::authenticate_optional;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::access;
use crate::stores::PackFilter;
use crate::types::dto::packs::PackResponse;
use crate::types::internal::CurrentUser;

/// Catalog and download API endpoints
pub struct SamplesApi {
    app: Arc<AppData>,
}

impl SamplesApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

/// API tags for catalog endpoints
#[derive(Tags)]
enum SampleTags {
    /// Sample pack catalog
    Samples,
}

#[OpenApi(prefix_path = "/samples")]
impl SamplesApi {
    /// List sample packs with filters
    #[oai(path = "/", method = "get", tag = "SampleTags::Samples")]
    #[allow(clippy::too_many_arguments)]
    async fn list_samples(
        &self,
        category: Query<Option<String>>,
        search: Query<Option<String>>,
        creator_id: Query<Option<String>>,
        free_only: Query<Option<bool>>,
        featured_only: Query<Option<bool>>,
        sync_ready_only: Query<Option<bool>>,
        sync_type: Query<Option<String>>,
        skip: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<PackResponse>>, ApiError> {
        let filter = PackFilter {
            category: category.0,
            creator_id: creator_id.0,
            free_only: free_only.0.unwrap_or(false),
            featured_only: featured_only.0.unwrap_or(false),
            sync_ready_only: sync_ready_only.0.unwrap_or(false),
            sync_type: sync_type.0,
            search: search.0,
            skip: skip.0.unwrap_or(0),
            limit: limit.0.unwrap_or(50),
        };

        let packs = self
            .app
            .pack_store
            .list(filter)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(packs.into_iter().map(PackResponse::from).collect()))
    }

    /// Get a single sample pack
    #[oai(path = "/:pack_id", method = "get", tag = "SampleTags::Samples")]
    async fn get_sample(&self, pack_id: Path<String>) -> Result<Json<PackResponse>, ApiError> {
        let pack = self
            .app
            .pack_store
            .get(&pack_id.0)
            .await
            .map_err(ApiError::from_internal_error)?;
        Ok(Json(pack.into()))
    }

    /// Stream the audio file for preview playback
    ///
    /// Previews are open to everyone; only full downloads are gated.
    #[oai(path = "/:pack_id/audio", method = "get", tag = "SampleTags::Samples")]
    async fn get_sample_audio(&self, pack_id: Path<String>) -> Result<Binary<Vec<u8>>, ApiError> {
        let pack = self
            .app
            .pack_store
            .get(&pack_id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        let bytes = self
            .app
            .blob_store
            .get(&pack.file_ref)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Binary(bytes))
    }

    /// Download a sample pack
    ///
    /// Allowed for free packs, admins, active subscribers, and prior
    /// purchasers, in that order of evaluation. Login for free packs is a
    /// platform policy flag, separate from the eligibility rules.
    #[oai(path = "/:pack_id/download", method = "get", tag = "SampleTags::Samples")]
    async fn download_sample(
        &self,
        #[oai(name = "Authorization")] authorization: Header<Option<String>>,
        pack_id: Path<String>,
    ) -> Result<Attachment<Vec<u8>>, ApiError> {
        let pack = self
            .app
            .pack_store
            .get(&pack_id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        let user: Option<CurrentUser> =
            authenticate_optional(&self.app, authorization.0.as_deref()).await?;

        let login_required =
            !pack.is_free || self.app.settings.require_login_for_free_downloads;
        if user.is_none() && login_required {
            return Err(ApiError::unauthorized());
        }

        let (role, subscription_active, has_purchase) = match &user {
            Some(current) => {
                let subscription_active = self
                    .app
                    .subscription_store
                    .is_active(current.id())
                    .await
                    .map_err(ApiError::from_internal_error)?;
                let has_purchase = self
                    .app
                    .purchase_store
                    .exists_for(current.id(), &pack.id)
                    .await
                    .map_err(ApiError::from_internal_error)?;
                (current.role, subscription_active, has_purchase)
            }
            None => (crate::types::internal::Role::User, false, false),
        };

        if !access::can_download(role, subscription_active, pack.is_free, has_purchase) {
            return Err(ApiError::forbidden("You don't have access to this pack"));
        }

        if let Some(current) = &user {
            self.app
                .download_store
                .record(current.id(), &pack.id)
                .await
                .map_err(ApiError::from_internal_error)?;
        }
        self.app
            .pack_store
            .increment_download_count(&pack.id)
            .await
            .map_err(ApiError::from_internal_error)?;

        let bytes = self
            .app
            .blob_store
            .get(&pack.file_ref)
            .await
            .map_err(ApiError::from_internal_error)?;

        let filename = if pack.file_kind == "archive" {
            format!("{}.zip", pack.title)
        } else {
            format!("{}.mp3", pack.title)
        };

        Ok(Attachment::new(bytes)
            .attachment_type(AttachmentType::Attachment)
            .filename(filename))
    }
}
