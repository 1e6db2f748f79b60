use std::sync::Arc;

use poem_openapi::param::Path;
use poem_openapi::payload::Json;
use poem_openapi::{OpenApi, Tags};

use crate::api::{authenticate, SessionAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::types::db::collection;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::library::{CollectionResponse, CreateCollectionRequest};
use crate::types::dto::packs::PackResponse;

/// Favorites and collections API endpoints
pub struct LibraryApi {
    app: Arc<AppData>,
}

impl LibraryApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }

    async fn collection_response(
        &self,
        collection: collection::Model,
    ) -> Result<CollectionResponse, ApiError> {
        let pack_ids = self
            .app
            .collection_store
            .list_pack_ids(&collection.id)
            .await
            .map_err(ApiError::from_internal_error)?;
        Ok(CollectionResponse {
            collection_id: collection.id,
            name: collection.name,
            description: collection.description,
            pack_ids,
            created_at: collection.created_at,
        })
    }
}

/// API tags for library endpoints
#[derive(Tags)]
enum LibraryTags {
    /// Favorited packs
    Favorites,
    /// User-curated pack collections
    Collections,
}

#[OpenApi]
impl LibraryApi {
    /// Favorite a pack
    ///
    /// Idempotent; favoriting an already-favorited pack changes nothing.
    #[oai(
        path = "/favorites/:pack_id",
        method = "post",
        tag = "LibraryTags::Favorites"
    )]
    async fn add_favorite(
        &self,
        auth: SessionAuth,
        pack_id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;

        // 404 for unknown packs before touching the favorite row
        let pack = self
            .app
            .pack_store
            .get(&pack_id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        let inserted = self
            .app
            .favorite_store
            .add(current.id(), &pack.id)
            .await
            .map_err(ApiError::from_internal_error)?;

        let message = if inserted {
            "Added to favorites"
        } else {
            "Already favorited"
        };
        Ok(Json(MessageResponse::new(message)))
    }

    /// Unfavorite a pack
    #[oai(
        path = "/favorites/:pack_id",
        method = "delete",
        tag = "LibraryTags::Favorites"
    )]
    async fn remove_favorite(
        &self,
        auth: SessionAuth,
        pack_id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;

        self.app
            .favorite_store
            .remove(current.id(), &pack_id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse::new("Removed from favorites")))
    }

    /// List the current user's favorite packs
    #[oai(path = "/favorites", method = "get", tag = "LibraryTags::Favorites")]
    async fn list_favorites(
        &self,
        auth: SessionAuth,
    ) -> Result<Json<Vec<PackResponse>>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;

        let pack_ids = self
            .app
            .favorite_store
            .list_pack_ids(current.id())
            .await
            .map_err(ApiError::from_internal_error)?;
        let packs = self
            .app
            .pack_store
            .find_by_ids(&pack_ids)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(packs.into_iter().map(PackResponse::from).collect()))
    }

    /// Create a collection
    #[oai(path = "/collections", method = "post", tag = "LibraryTags::Collections")]
    async fn create_collection(
        &self,
        auth: SessionAuth,
        body: Json<CreateCollectionRequest>,
    ) -> Result<Json<CollectionResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;

        let name = body.0.name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::validation("Collection name is required"));
        }

        let collection = self
            .app
            .collection_store
            .create(
                current.id(),
                &name,
                body.0.description.as_deref().unwrap_or(""),
            )
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(self.collection_response(collection).await?))
    }

    /// List the current user's collections
    #[oai(path = "/collections", method = "get", tag = "LibraryTags::Collections")]
    async fn list_collections(
        &self,
        auth: SessionAuth,
    ) -> Result<Json<Vec<CollectionResponse>>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;

        let collections = self
            .app
            .collection_store
            .list_for_user(current.id())
            .await
            .map_err(ApiError::from_internal_error)?;

        let mut responses = Vec::with_capacity(collections.len());
        for collection in collections {
            responses.push(self.collection_response(collection).await?);
        }
        Ok(Json(responses))
    }

    /// Add a pack to a collection
    ///
    /// 404 for collections the caller does not own. Idempotent on the
    /// (collection, pack) pair.
    #[oai(
        path = "/collections/:collection_id/packs/:pack_id",
        method = "post",
        tag = "LibraryTags::Collections"
    )]
    async fn add_to_collection(
        &self,
        auth: SessionAuth,
        collection_id: Path<String>,
        pack_id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;

        let collection = self
            .app
            .collection_store
            .find_owned(&collection_id.0, current.id())
            .await
            .map_err(ApiError::from_internal_error)?
            .ok_or_else(|| ApiError::not_found("Collection not found"))?;

        let pack = self
            .app
            .pack_store
            .get(&pack_id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        self.app
            .collection_store
            .add_pack(&collection.id, &pack.id)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse::new("Added to collection")))
    }

    /// Remove a pack from a collection
    #[oai(
        path = "/collections/:collection_id/packs/:pack_id",
        method = "delete",
        tag = "LibraryTags::Collections"
    )]
    async fn remove_from_collection(
        &self,
        auth: SessionAuth,
        collection_id: Path<String>,
        pack_id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;

        let collection = self
            .app
            .collection_store
            .find_owned(&collection_id.0, current.id())
            .await
            .map_err(ApiError::from_internal_error)?
            .ok_or_else(|| ApiError::not_found("Collection not found"))?;

        self.app
            .collection_store
            .remove_pack(&collection.id, &pack_id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse::new("Removed from collection")))
    }
}
