//! Identifier parsing for references carried in request bodies

use uuid::Uuid;

use super::ValidationError;

/// Parse a referenced record id (e.g. `investor_id`) from a body field.
pub fn record_ref(field: &'static str, raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ValidationError::InvalidFormat {
        field,
        reason: "must be a UUID",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(record_ref("fund_id", &id.to_string()).unwrap(), id);
    }

    #[test]
    fn rejects_garbage() {
        let err = record_ref("investor_id", "not-a-uuid").unwrap_err();
        assert_eq!(err.field(), "investor_id");
    }
}
