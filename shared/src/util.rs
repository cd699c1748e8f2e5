use serde::{Deserialize, Deserializer};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current UTC time as an RFC 3339 string, the format the backend stamps
/// `created_at` / `updated_at` with.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

/// Fresh client-side field id.
///
/// Ids only need to be unique within one template; a v4 UUID also survives
/// two fields being added in the same millisecond.
pub fn new_field_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Deserialize a nullable string, reading `null` as the empty string.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a value that may arrive as a JSON string or number into a
/// `String`. Legacy inventory records mix both for the same key.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Str(s)) => Some(s),
        Some(Raw::Int(n)) => Some(n.to_string()),
        Some(Raw::Float(n)) => Some(n.to_string()),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "null_as_empty")]
        text: String,
        #[serde(default, deserialize_with = "string_or_number")]
        kind: Option<String>,
    }

    #[test]
    fn test_null_as_empty() {
        let p: Probe = serde_json::from_str(r#"{"text": null}"#).unwrap();
        assert_eq!(p.text, "");
        let p: Probe = serde_json::from_str(r#"{"text": "x"}"#).unwrap();
        assert_eq!(p.text, "x");
        let p: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(p.text, "");
    }

    #[test]
    fn test_string_or_number() {
        let p: Probe = serde_json::from_str(r#"{"kind": 2}"#).unwrap();
        assert_eq!(p.kind.as_deref(), Some("2"));
        let p: Probe = serde_json::from_str(r#"{"kind": "3"}"#).unwrap();
        assert_eq!(p.kind.as_deref(), Some("3"));
        let p: Probe = serde_json::from_str(r#"{"kind": null}"#).unwrap();
        assert_eq!(p.kind, None);
    }

    #[test]
    fn test_new_field_id_unique() {
        assert_ne!(new_field_id(), new_field_id());
    }
}
