//! UUID v7 utilities for time-ordered identifiers.
//!
//! Referral request ids are UUIDv7, which embed a millisecond-precision
//! timestamp in the first 48 bits. Creation order therefore matches
//! lexicographic id order, which keeps `list()` output stable without a
//! separate sort key.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// Generate a new UUIDv7 identifier.
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

/// Check whether a UUID is version 7.
pub fn is_v7(uuid: &Uuid) -> bool {
    uuid.get_version_num() == 7
}

/// Extract the embedded timestamp from a UUIDv7.
///
/// Returns `None` if the UUID is not version 7.
pub fn extract_timestamp(uuid: &Uuid) -> Option<DateTime<Utc>> {
    if !is_v7(uuid) {
        return None;
    }
    let bytes = uuid.as_bytes();
    let millis = ((bytes[0] as u64) << 40)
        | ((bytes[1] as u64) << 32)
        | ((bytes[2] as u64) << 24)
        | ((bytes[3] as u64) << 16)
        | ((bytes[4] as u64) << 8)
        | (bytes[5] as u64);
    Utc.timestamp_millis_opt(millis as i64).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_v7_is_version_7() {
        let id = new_v7();
        assert!(is_v7(&id));
    }

    #[test]
    fn test_v4_is_not_v7() {
        let id = Uuid::new_v4();
        assert!(!is_v7(&id));
        assert!(extract_timestamp(&id).is_none());
    }

    #[test]
    fn test_extract_timestamp_close_to_now() {
        let before = Utc::now();
        let id = new_v7();
        let after = Utc::now();

        let ts = extract_timestamp(&id).expect("should be v7");
        // Millisecond truncation means ts can be up to 1ms before `before`.
        assert!(ts >= before - chrono::Duration::milliseconds(1));
        assert!(ts <= after);
    }

    #[test]
    fn test_v7_ids_are_time_ordered() {
        let a = new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = new_v7();
        assert!(a < b);
    }
}
