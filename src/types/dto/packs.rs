use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object};
use serde::{Deserialize, Serialize};

use crate::types::db::pack;

/// Public view of a sample pack
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PackResponse {
    /// Pack ID
    pub pack_id: String,

    /// Pack title
    pub title: String,

    /// Description
    pub description: String,

    /// Category: Drums, Bass, Synths, FX, Vocals, Loops
    pub category: String,

    /// Free-form tags
    pub tags: Vec<String>,

    /// Stored price in integer cents
    pub price_cents: i64,

    /// Price actually charged; always 0 for free packs
    pub effective_price_cents: i64,

    pub is_free: bool,
    pub is_featured: bool,
    pub is_sync_ready: bool,

    /// Sync licensing category (Sports, Film, Cinematic, Broadcast)
    pub sync_type: Option<String>,

    /// Tempo in beats per minute
    pub bpm: Option<i32>,

    /// Musical key
    pub musical_key: Option<String>,

    pub creator_id: String,
    pub creator_name: String,

    /// Uploaded file size in bytes
    pub file_size: i64,

    pub download_count: i64,
    pub created_at: i64,
}

impl From<pack::Model> for PackResponse {
    fn from(p: pack::Model) -> Self {
        let tags: Vec<String> = serde_json::from_str(&p.tags).unwrap_or_default();
        let effective_price_cents = p.effective_price_cents();
        Self {
            pack_id: p.id,
            title: p.title,
            description: p.description,
            category: p.category,
            tags,
            price_cents: p.price_cents,
            effective_price_cents,
            is_free: p.is_free,
            is_featured: p.is_featured,
            is_sync_ready: p.is_sync_ready,
            sync_type: p.sync_type,
            bpm: p.bpm,
            musical_key: p.musical_key,
            creator_id: p.creator_id,
            creator_name: p.creator_name,
            file_size: p.file_size,
            download_count: p.download_count,
            created_at: p.created_at,
        }
    }
}

/// Multipart body for creator pack upload
#[derive(Multipart, Debug)]
pub struct UploadPackRequest {
    pub title: String,
    pub description: String,
    pub category: String,

    /// Comma-separated tags
    pub tags: Option<String>,

    /// Price in integer cents; 0 marks the pack free
    pub price_cents: i64,

    pub bpm: Option<i32>,
    pub musical_key: Option<String>,
    pub is_featured: Option<bool>,
    pub is_sync_ready: Option<bool>,
    pub sync_type: Option<String>,

    /// Audio file or ZIP archive
    pub file: Upload,
}

/// Multipart body for admin pack upload on behalf of a creator
#[derive(Multipart, Debug)]
pub struct AdminUploadPackRequest {
    /// Email of the creator the pack is attributed to
    pub creator_email: String,

    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Option<String>,
    pub price_cents: i64,
    pub is_free: Option<bool>,
    pub bpm: Option<i32>,
    pub musical_key: Option<String>,
    pub is_featured: Option<bool>,
    pub is_sync_ready: Option<bool>,
    pub sync_type: Option<String>,
    pub file: Upload,
}

/// Flag update bodies for admin pack management
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MarkFreeRequest {
    pub is_free: bool,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MarkFeaturedRequest {
    pub is_featured: bool,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MarkSyncReadyRequest {
    pub is_sync_ready: bool,
    pub sync_type: Option<String>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateMetadataRequest {
    pub bpm: Option<i32>,
    pub musical_key: Option<String>,
}
