use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::entities::users;

/// Session token payload: identity plus role, as asserted at login time.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    pub username: String,
    pub role: String,
    pub exp: usize,
}

pub fn create_jwt(user: &users::Model, secret: &str, ttl_days: i64) -> Result<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::days(ttl_days))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        username: user.username.clone(),
        role: user.role.clone(),
        exp: expiration as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;

    Ok(token)
}

pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::users::ROLE_ADMIN;

    fn sample_user() -> users::Model {
        users::Model {
            id: "user_123".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "irrelevant".to_string(),
            role: ROLE_ADMIN.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_jwt_cycle() {
        let secret = "test_secret";
        let token = create_jwt(&sample_user(), secret, 30).unwrap();
        let claims = validate_jwt(&token, secret).unwrap();
        assert_eq!(claims.sub, "user_123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, ROLE_ADMIN);
    }

    #[test]
    fn test_jwt_wrong_secret_rejected() {
        let token = create_jwt(&sample_user(), "secret_a", 30).unwrap();
        assert!(validate_jwt(&token, "secret_b").is_err());
    }
}
