use serde::{Deserialize, Serialize};

/// A user entry as returned by the remote roster endpoint.
///
/// Identity is carried by `id` alone; every display attribute may be absent
/// from the JSON payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Same identity: ids are equal, other attributes ignored.
    pub fn same_identity(&self, other: &User) -> bool {
        self.id == other.id
    }

    /// Content equality: identity plus null-safe comparison of every display
    /// attribute. `None` equals `None`; `None` never equals `Some(_)`.
    pub fn content_eq(&self, other: &User) -> bool {
        self == other
    }

    /// Name to show in a list row, falling back to the username.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.username.as_deref().unwrap_or("Unknown User"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::User;

    fn user(name: Option<&str>, username: Option<&str>) -> User {
        User {
            id: 1,
            name: name.map(ToOwned::to_owned),
            username: username.map(ToOwned::to_owned),
            email: None,
        }
    }

    #[test]
    fn display_name_prefers_name_then_username() {
        assert_eq!(user(Some("Ada"), Some("ada42")).display_name(), "Ada");
        assert_eq!(user(Some(""), Some("ada42")).display_name(), "ada42");
        assert_eq!(user(None, Some("ada42")).display_name(), "ada42");
        assert_eq!(user(None, None).display_name(), "Unknown User");
    }

    #[test]
    fn identity_ignores_display_attributes() {
        let a = user(Some("Ada"), None);
        let b = user(Some("Grace"), Some("grace"));
        assert!(a.same_identity(&b));
        assert!(!a.content_eq(&b));
    }

    #[test]
    fn missing_json_fields_decode_as_none() {
        let decoded: User = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(decoded.id, 7);
        assert_eq!(decoded.name, None);
        assert_eq!(decoded.username, None);
        assert_eq!(decoded.email, None);
    }
}
