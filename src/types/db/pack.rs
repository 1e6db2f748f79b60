use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "packs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,

    // JSON array of strings
    pub tags: String,

    pub price_cents: i64,
    pub is_free: bool,
    pub is_featured: bool,
    pub is_sync_ready: bool,
    pub sync_type: Option<String>,
    pub bpm: Option<i32>,
    pub musical_key: Option<String>,

    pub creator_id: String,
    pub creator_name: String,

    // Opaque blob store key; "audio" or "archive"
    pub file_ref: String,
    pub file_kind: String,
    pub file_size: i64,

    pub download_count: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// A free pack costs nothing regardless of its stored price.
    pub fn effective_price_cents(&self) -> i64 {
        if self.is_free {
            0
        } else {
            self.price_cents
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(price_cents: i64, is_free: bool) -> Model {
        Model {
            id: "pack_1".to_string(),
            title: "Test".to_string(),
            description: "".to_string(),
            category: "Drums".to_string(),
            tags: "[]".to_string(),
            price_cents,
            is_free,
            is_featured: false,
            is_sync_ready: false,
            sync_type: None,
            bpm: None,
            musical_key: None,
            creator_id: "u1".to_string(),
            creator_name: "Creator".to_string(),
            file_ref: "audio/pack_1.mp3".to_string(),
            file_kind: "audio".to_string(),
            file_size: 0,
            download_count: 0,
            created_at: 0,
        }
    }

    #[test]
    fn free_pack_has_zero_effective_price_even_with_stored_price() {
        assert_eq!(pack(999, true).effective_price_cents(), 0);
    }

    #[test]
    fn paid_pack_keeps_stored_price() {
        assert_eq!(pack(999, false).effective_price_cents(), 999);
    }
}
