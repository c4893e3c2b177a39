use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT payload. `exp`/`iat` are unix seconds.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
    pub kind: TokenKind,
}

/// Body of both `/auth/register` and `/auth/login`.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_kind_is_lowercase_on_the_wire() {
        assert_eq!(serde_json::to_value(TokenKind::Refresh).unwrap(), json!("refresh"));
        let kind: TokenKind = serde_json::from_value(json!("access")).unwrap();
        assert_eq!(kind, TokenKind::Access);
    }

    #[test]
    fn auth_response_shape() {
        let id = Uuid::new_v4();
        let body = serde_json::to_value(AuthResponse {
            access_token: "a".into(),
            refresh_token: "r".into(),
            token_type: "Bearer",
            user: PublicUser {
                id,
                email: "jane@example.com".into(),
            },
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "access_token": "a",
                "refresh_token": "r",
                "token_type": "Bearer",
                "user": { "id": id, "email": "jane@example.com" }
            })
        );
    }
}
