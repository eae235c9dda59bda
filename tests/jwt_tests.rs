use accounts_backend::config::JwtConfig;
use accounts_backend::model::user::UserRole;
use accounts_backend::util::jwt::*;

// Helper function to create JWT utils for testing
fn create_test_jwt_utils() -> SessionTokenUtilsImpl {
    SessionTokenUtilsImpl::new(JwtConfig::default())
}

#[test]
fn test_jwt_utils_creation() {
    let jwt_utils = create_test_jwt_utils();
    assert!(!jwt_utils.jwt_config.jwt_secret.is_empty());
    assert!(jwt_utils.jwt_config.session_token_expiration > 0);
}

#[test]
fn test_generate_session_token_success() {
    let jwt_utils = create_test_jwt_utils();

    let result = jwt_utils.generate_session_token(42, "user@example.com", UserRole::User);
    assert!(result.is_ok());

    let token = result.unwrap();
    assert!(!token.is_empty());
    // JWT tokens are three dot-separated segments
    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn test_validate_session_token_roundtrip() {
    let jwt_utils = create_test_jwt_utils();
    let token = jwt_utils
        .generate_session_token(7, "admin@example.com", UserRole::Admin)
        .unwrap();

    let claims = jwt_utils.validate_session_token(&token).unwrap();
    assert_eq!(claims.sub, "7");
    assert_eq!(claims.user_id().unwrap(), 7);
    assert_eq!(claims.email, "admin@example.com");
    assert_eq!(claims.role, UserRole::Admin);
    assert!(!claims.jti.is_empty());
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_validate_session_token_wrong_secret() {
    let jwt_utils = create_test_jwt_utils();
    let token = jwt_utils
        .generate_session_token(1, "user@example.com", UserRole::User)
        .unwrap();

    let other_utils = SessionTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "a_completely_different_secret_key_with_enough_length".to_string(),
        session_token_expiration: 1440,
    });

    let result = other_utils.validate_session_token(&token);
    assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
}

#[test]
fn test_validate_session_token_expired() {
    // Issue a token that expired well beyond the decoder's leeway
    let jwt_utils = SessionTokenUtilsImpl::new(JwtConfig {
        session_token_expiration: -10,
        ..JwtConfig::default()
    });
    let token = jwt_utils
        .generate_session_token(1, "user@example.com", UserRole::User)
        .unwrap();

    let result = jwt_utils.validate_session_token(&token);
    assert!(matches!(result, Err(JwtError::TokenExpired)));
}

#[test]
fn test_validate_session_token_tampered() {
    let jwt_utils = create_test_jwt_utils();
    let token = jwt_utils
        .generate_session_token(1, "user@example.com", UserRole::User)
        .unwrap();

    let mut tampered = token.clone();
    tampered.truncate(token.len() - 4);
    tampered.push_str("AAAA");

    let result = jwt_utils.validate_session_token(&tampered);
    assert!(result.is_err());
}

#[test]
fn test_validate_session_token_garbage() {
    let jwt_utils = create_test_jwt_utils();

    let result = jwt_utils.validate_session_token("definitely.not.ajwt");
    assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
}

#[test]
fn test_claims_user_id_non_numeric() {
    let claims = Claims {
        sub: "not-a-number".to_string(),
        email: "user@example.com".to_string(),
        role: UserRole::User,
        iat: 0,
        exp: 0,
        jti: "jti".to_string(),
    };

    assert!(matches!(claims.user_id(), Err(JwtError::InvalidToken)));
}
