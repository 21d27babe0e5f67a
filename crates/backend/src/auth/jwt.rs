//! JWT token creation and validation.

use chrono::{DateTime, Utc};
use jobspring_types::TokenRequest;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use super::types::{AuthConfig, Claims};

/// Registered claims the issuer always sets itself.
const RESERVED_CLAIMS: [&str; 3] = ["iat", "exp", "nbf"];

/// Create a new JWT token for an identity payload.
pub fn create_token(
    config: &AuthConfig,
    identity: TokenRequest,
) -> Result<String, jsonwebtoken::errors::Error> {
    create_token_at(config, identity, Utc::now())
}

/// Create a token as if issued at `issued_at`.
pub fn create_token_at(
    config: &AuthConfig,
    identity: TokenRequest,
    issued_at: DateTime<Utc>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = issued_at + config.token_duration;

    let mut extra = identity.extra;
    for key in RESERVED_CLAIMS {
        extra.remove(key);
    }

    let claims = Claims {
        uid: identity.uid,
        email: identity.email,
        iat: issued_at.timestamp(),
        exp: exp.timestamp(),
        extra,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// Validate a JWT token and return claims.
///
/// Checks the HS256 signature and `exp`. A client-supplied `aud` is an
/// ordinary claim here, not an audience restriction.
pub fn validate_token(
    config: &AuthConfig,
    token: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.validate_aud = false;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn test_config() -> AuthConfig {
        AuthConfig::new("test-secret-key-for-testing-only", true)
    }

    fn identity() -> TokenRequest {
        serde_json::from_value(json!({
            "uid": "firebase-uid-1",
            "email": "test@example.com",
            "displayName": "Test User",
            "roles": ["seeker"],
        }))
        .unwrap()
    }

    #[test]
    fn test_create_and_validate_token() {
        let config = test_config();
        let token = create_token(&config, identity()).expect("should create token");

        let claims = validate_token(&config, &token).expect("should validate token");
        assert_eq!(claims.uid, "firebase-uid-1");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.extra, identity().extra);
        assert_eq!(claims.exp - claims.iat, 2 * 60 * 60);
    }

    #[test]
    fn test_reserved_claims_are_overwritten() {
        let config = test_config();
        let mut payload = identity();
        payload.extra.insert("exp".to_string(), json!(4_102_444_800_i64));
        payload.extra.insert("iat".to_string(), json!(0));

        let token = create_token(&config, payload).expect("should create token");
        let claims = validate_token(&config, &token).expect("should validate token");

        assert!(claims.exp <= (Utc::now() + Duration::hours(2)).timestamp());
        assert!(!claims.extra.contains_key("exp"));
        assert!(!claims.extra.contains_key("iat"));
    }

    #[test]
    fn test_audience_claim_is_carried() {
        let config = test_config();
        let mut payload = identity();
        payload.extra.insert("aud".to_string(), json!("web"));

        let token = create_token(&config, payload.clone()).expect("should create token");
        let claims = validate_token(&config, &token).expect("should validate token");

        assert_eq!(claims.extra.get("aud"), Some(&json!("web")));
        assert_eq!(claims.extra, payload.extra);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let config = test_config();
        let result = validate_token(&config, "invalid-token");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = test_config();
        let token = create_token(&config, identity()).expect("should create token");

        let mut wrong_config = config;
        wrong_config.jwt_secret = "wrong-secret".to_string();

        let result = validate_token(&wrong_config, &token);
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_config();
        let issued_at = Utc::now() - Duration::hours(3);
        let token = create_token_at(&config, identity(), issued_at).expect("should create token");

        let err = validate_token(&config, &token).unwrap_err();
        assert!(matches!(
            err.kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ));
    }

    #[test]
    fn test_token_just_inside_lifetime_accepted() {
        let config = test_config();
        let issued_at = Utc::now() - Duration::minutes(119);
        let token = create_token_at(&config, identity(), issued_at).expect("should create token");

        assert!(validate_token(&config, &token).is_ok());
    }
}
