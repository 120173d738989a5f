//! Checksum calculation for import deduplication.

use sha2::{Digest, Sha256};

use crate::models::ProductionRecord;

/// Calculate SHA-256 checksum of content.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Fingerprint a batch of records by hashing its JSON encoding.
///
/// Two batches with the same records in the same order share a checksum.
pub fn batch_checksum(records: &[ProductionRecord]) -> Result<String, serde_json::Error> {
    let content = serde_json::to_string(records)?;
    Ok(calculate_checksum(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Discipline;
    use chrono::NaiveDate;

    fn record(setter: &str) -> ProductionRecord {
        ProductionRecord::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            setter,
            "G1",
            Discipline::Routes,
        )
    }

    #[test]
    fn test_checksum_consistency() {
        let content = r#"{"test": "data"}"#;
        let checksum1 = calculate_checksum(content);
        let checksum2 = calculate_checksum(content);
        assert_eq!(checksum1, checksum2);
        assert_eq!(checksum1.len(), 64);
    }

    #[test]
    fn test_batch_checksum_tracks_content() {
        let a = batch_checksum(&[record("Alice")]).unwrap();
        let b = batch_checksum(&[record("Alice")]).unwrap();
        let c = batch_checksum(&[record("Bob")]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
