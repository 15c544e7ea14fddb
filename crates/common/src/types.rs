use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of an authenticated caller.
///
/// Wraps the UUID handed out by the single-sign-on service so that caller
/// ids cannot be confused with item ids, which are also UUIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a user id from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses the textual id returned by the identity service.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw.trim()).map(Self)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UserId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<UserId> for Uuid {
    fn from(id: UserId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_parse_accepts_hyphenated_uuid() {
        let uuid = Uuid::new_v4();
        let id = UserId::parse(&uuid.to_string()).unwrap();
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn user_id_parse_rejects_garbage() {
        assert!(UserId::parse("user-id").is_err());
        assert!(UserId::parse("").is_err());
    }

    #[test]
    fn user_id_serializes_as_plain_string() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&UserId::from(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }
}
