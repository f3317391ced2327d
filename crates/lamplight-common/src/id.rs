use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a tool call the provider did not label itself.
pub fn new_call_id() -> String {
    format!("call_{}", uuid::Uuid::new_v4().simple())
}

/// Short identifier attached to every log line of one chat session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        let uuid = uuid::Uuid::new_v4();
        let bytes = uuid.as_bytes();
        Self(format!(
            "{:02x}{:02x}{:02x}{:02x}",
            bytes[0], bytes[1], bytes[2], bytes[3]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_id_has_prefix_and_uuid_body() {
        let id = new_call_id();
        let body = id.strip_prefix("call_").expect("missing prefix");
        let parsed = uuid::Uuid::parse_str(body).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn call_ids_are_unique() {
        assert_ne!(new_call_id(), new_call_id());
    }

    #[test]
    fn session_id_is_short_hex() {
        let sid = SessionId::new();
        assert_eq!(sid.as_str().len(), 8);
        assert!(sid.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn session_id_display_matches_as_str() {
        let sid = SessionId::default();
        assert_eq!(sid.to_string(), sid.as_str());
    }

    #[test]
    fn session_id_round_trips_through_json() {
        let sid = SessionId::new();
        let json = serde_json::to_string(&sid).unwrap();
        let back: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(sid, back);
    }
}
