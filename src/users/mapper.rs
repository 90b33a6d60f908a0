//! Pure translation between stored users and their external representation.

use super::dto::{UserRequest, UserView};
use super::repo_types::{NewUser, User};

pub fn to_view(user: &User) -> UserView {
    UserView {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
    }
}

/// Builds the unsaved entity. The hash is computed by the caller; a plaintext
/// password is never copied across.
pub fn from_request(req: &UserRequest, password_hash: String) -> NewUser {
    NewUser {
        username: req.username.clone(),
        email: req.email.clone(),
        password_hash,
    }
}

/// Overwrites the mutable profile fields of `user` with the request's values.
pub fn apply_request(user: &mut User, req: &UserRequest) {
    user.username = req.username.clone();
    user.email = req.email.clone();
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn stored() -> User {
        User {
            id: 7,
            username: "alice".into(),
            email: "alice@x.com".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn view_never_carries_the_hash() {
        let view = to_view(&stored());
        assert_eq!(
            view,
            UserView {
                id: 7,
                username: "alice".into(),
                email: "alice@x.com".into(),
            }
        );

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn stored_user_serialization_skips_hash() {
        let json = serde_json::to_string(&stored()).unwrap();
        assert!(json.contains("alice@x.com"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn new_user_takes_the_given_hash_not_the_plaintext() {
        let req = UserRequest {
            username: "bob".into(),
            email: "bob@x.com".into(),
            password: Some("secret123".into()),
        };
        let new_user = from_request(&req, "hashed".into());
        assert_eq!(new_user.username, "bob");
        assert_eq!(new_user.email, "bob@x.com");
        assert_eq!(new_user.password_hash, "hashed");
    }

    #[test]
    fn apply_request_overwrites_even_empty_fields() {
        let mut user = stored();
        let original_hash = user.password_hash.clone();
        apply_request(&mut user, &UserRequest::default());
        assert_eq!(user.username, "");
        assert_eq!(user.email, "");
        assert_eq!(user.id, 7);
        assert_eq!(user.password_hash, original_hash);
    }

    #[test]
    fn request_ignores_client_supplied_id() {
        let req: UserRequest = serde_json::from_str(
            r#"{"id": 99, "username": "carol", "email": "carol@x.com", "password": "longenough"}"#,
        )
        .unwrap();
        assert_eq!(req.username, "carol");
        assert_eq!(req.password.as_deref(), Some("longenough"));
    }
}
