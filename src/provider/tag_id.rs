//! Synthetic tag identifiers.
//!
//! Tags carry no exported id column, so consumers get a number computed from
//! the tag name: the digest of its UTF-8 bytes read as an unsigned big-endian
//! integer, truncated to the low 64 bits. Equal names always give equal ids.
//! Distinct names may collide.

use thiserror::Error;

/// Id reported when the digest cannot be computed.
pub const INVALID_TAG_ID: i64 = -1;

#[derive(Debug, Error)]
#[error("digest algorithm {algorithm} unavailable: {reason}")]
pub struct DigestError {
    pub algorithm: String,
    pub reason: String,
}

/// One-way hash used to derive tag ids.
pub trait NameDigest: Send + Sync {
    fn algorithm(&self) -> &str;

    fn digest(&self, bytes: &[u8]) -> Result<Vec<u8>, DigestError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Digest;

impl NameDigest for Md5Digest {
    fn algorithm(&self) -> &str {
        "MD5"
    }

    fn digest(&self, bytes: &[u8]) -> Result<Vec<u8>, DigestError> {
        Ok(md5::compute(bytes).0.to_vec())
    }
}

/// Low 64 bits of `digest` read as an unsigned big-endian integer.
pub fn digest_to_i64(digest: &[u8]) -> i64 {
    let start = digest.len().saturating_sub(8);
    digest[start..].iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)) as i64
}

pub fn synthetic_tag_id(digest: &dyn NameDigest, name: &str) -> i64 {
    match digest.digest(name.as_bytes()) {
        Ok(bytes) => digest_to_i64(&bytes),
        Err(e) => {
            tracing::error!(error = %e, tag = name, "failed to derive tag id");
            INVALID_TAG_ID
        }
    }
}

/// MD5-derived id for `name`.
pub fn tag_name_to_long(name: &str) -> i64 {
    synthetic_tag_id(&Md5Digest, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unavailable;

    impl NameDigest for Unavailable {
        fn algorithm(&self) -> &str {
            "SHA-0"
        }

        fn digest(&self, _bytes: &[u8]) -> Result<Vec<u8>, DigestError> {
            Err(DigestError {
                algorithm: self.algorithm().to_string(),
                reason: "not installed".to_string(),
            })
        }
    }

    #[test]
    fn known_md5_values() {
        assert_eq!(tag_name_to_long("home"), 3323224629456577025);
        assert_eq!(tag_name_to_long("work"), -5561041997434806603);
        assert_eq!(tag_name_to_long(""), -1621285313438006658);
    }

    #[test]
    fn non_ascii_names_hash_their_utf8_bytes() {
        assert_eq!(tag_name_to_long("ça va"), 266583712181153013);
    }

    #[test]
    fn deterministic() {
        assert_eq!(tag_name_to_long("urgent"), tag_name_to_long("urgent"));
        assert_ne!(tag_name_to_long("urgent"), tag_name_to_long("Urgent"));
    }

    #[test]
    fn short_digests_are_zero_extended() {
        assert_eq!(digest_to_i64(&[]), 0);
        assert_eq!(digest_to_i64(&[0x01, 0x02]), 0x0102);
        assert_eq!(digest_to_i64(&[0xff; 8]), -1);
        assert_eq!(digest_to_i64(&[0xaa, 0, 0, 0, 0, 0, 0, 0, 0x80]), 0x80);
    }

    #[test]
    fn failing_digest_yields_sentinel() {
        assert_eq!(synthetic_tag_id(&Unavailable, "home"), INVALID_TAG_ID);
    }
}
