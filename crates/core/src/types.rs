/// Primary keys are prefixed text identifiers (`proj_…`, `ver_…`).
pub type DbId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Build a prefixed identifier from a fresh UUID v7.
///
/// v7 ids embed the creation time, so lexical order follows insertion order.
pub fn new_id(prefix: &str) -> DbId {
    format!("{prefix}_{}", uuid::Uuid::now_v7().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_has_prefix_and_hex_body() {
        let id = new_id("proj");
        let body = id.strip_prefix("proj_").expect("missing prefix");
        assert_eq!(body.len(), 32);
        assert!(body.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(new_id("ver"), new_id("ver"));
    }
}
