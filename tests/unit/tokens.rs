use lab_portal::config::AuthConfig;
use lab_portal::db::enums::UserRole;
use lab_portal::db::models::auth::AuthUser;
use lab_portal::middleware::auth::{REFRESH_TOKEN_TYPE, TokenService};
use uuid::Uuid;

fn tokens(access_ttl: u64) -> TokenService {
    TokenService::new(AuthConfig {
        jwt_secret: "integration-unit-secret-42".to_string(),
        access_token_expires_in: access_ttl,
        refresh_token_expires_in: 86400,
        cookie_name: "auth_token".to_string(),
        cookie_secure: true,
        bcrypt_cost: 4,
    })
}

fn member() -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        email: "grace@lab.org".to_string(),
        name: "Grace".to_string(),
        role: UserRole::Member,
        token_id: None,
        token_expires_at: None,
    }
}

#[test]
fn access_claims_carry_identity() {
    let service = tokens(900);
    let user = member();
    let claims = service
        .verify_token(&service.generate_access_token(&user).unwrap())
        .unwrap();

    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.role, UserRole::Member);
    assert_eq!(claims.exp - claims.iat, 900);
    assert!(Uuid::parse_str(&claims.jti).is_ok());
}

#[test]
fn every_token_gets_a_fresh_id() {
    let service = tokens(900);
    let user = member();
    let a = service.verify_token(&service.generate_access_token(&user).unwrap()).unwrap();
    let b = service.verify_token(&service.generate_access_token(&user).unwrap()).unwrap();
    assert_ne!(a.jti, b.jti);
}

#[test]
fn refresh_tokens_are_typed() {
    let service = tokens(900);
    let user_id = Uuid::new_v4();
    let claims = service
        .verify_refresh_token(&service.generate_refresh_token(user_id).unwrap())
        .unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.typ, REFRESH_TOKEN_TYPE);
}

#[test]
fn garbage_tokens_are_rejected() {
    let service = tokens(900);
    assert!(service.verify_token("not.a.jwt").is_err());
    assert!(service.verify_refresh_token("").is_err());
}

#[test]
fn secure_cookie_flag_follows_config() {
    let cookie = tokens(900).auth_cookie("value".to_string());
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
}
