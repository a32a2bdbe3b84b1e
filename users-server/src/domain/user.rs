use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A user document as stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: None,
            name,
            email,
            password_hash,
        }
    }
}

/// Public projection of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: user.name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn new_user_has_no_id_until_inserted() {
        let user = User::new("Ana".into(), "ana@x.com".into(), "hash".into());
        let doc = bson::to_document(&user).unwrap();
        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("password").unwrap(), "hash");
    }

    #[test]
    fn summary_drops_password() {
        let id = ObjectId::new();
        let user = User {
            id: Some(id),
            name: "Ana".into(),
            email: "ana@x.com".into(),
            password_hash: "hash".into(),
        };
        let summary = UserSummary::from(user);
        assert_eq!(summary.id, id.to_hex());

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "ana@x.com");
    }
}
