use serde::{Deserialize, Serialize};

/// A user entry in the users file.
///
/// `password_hash` holds an argon2 PHC string. The plaintext password is never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub team: String,
}

/// Who is logged in: the username and the team whose records they may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub team: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            team: user.team.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_never_carries_the_hash() {
        let user: User = serde_json::from_str(
            r#"{"username": "alice", "password_hash": "$argon2id$v=19$...", "team": "teamA"}"#,
        )
        .unwrap();
        let json = serde_json::to_string(&Identity::from(&user)).unwrap();
        assert_eq!(json, r#"{"username":"alice","team":"teamA"}"#);
    }
}
