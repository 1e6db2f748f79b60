use sha2::{Digest, Sha256};

/// Hash a session token for storage. Only digests are persisted, so a
/// leaked sessions table cannot be replayed as bearer tokens.
pub fn sha256_hex(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable_and_hex_encoded() {
        let digest = sha256_hex("token");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, sha256_hex("token"));
        assert_ne!(digest, sha256_hex("other"));
    }
}
