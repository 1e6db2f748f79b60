use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for collection creation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateCollectionRequest {
    /// Collection name
    pub name: String,

    /// Optional description
    pub description: Option<String>,
}

/// Public view of a user collection
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CollectionResponse {
    pub collection_id: String,
    pub name: String,
    pub description: String,

    /// Member packs in insertion order
    pub pack_ids: Vec<String>,

    pub created_at: i64,
}
