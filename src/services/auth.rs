use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::Config;
use crate::errors::ApiError;
use crate::models::auth::{AdminUser, Claims, LoginResponse};

pub struct AuthService;

impl AuthService {
    /// Verifies the configured admin credentials and issues a bearer
    /// token. Email and password failures are indistinguishable on the
    /// wire.
    pub fn login(config: &Config, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let email_ok = email.trim().eq_ignore_ascii_case(&config.admin_email);
        let password_ok = bcrypt::verify(password, &config.admin_password_hash).unwrap_or(false);
        if !email_ok || !password_ok {
            return Err(ApiError::Unauthorized("Invalid email or password".into()));
        }

        let token = issue_token(
            &config.jwt_secret,
            &config.admin_email,
            config.jwt_expiry_seconds,
        )?;
        Ok(LoginResponse {
            token,
            expires_in: config.jwt_expiry_seconds,
        })
    }
}

pub fn issue_token(secret: &str, email: &str, expiry_seconds: u64) -> Result<String, ApiError> {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: email.to_string(),
        role: "admin".into(),
        iat: now,
        exp: now + expiry_seconds as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))
}

pub fn decode_token(token: &str, secret: &str) -> Result<AdminUser, anyhow::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(token, &key, &validation)?;
    if data.claims.role != "admin" {
        anyhow::bail!("Not an admin token");
    }
    Ok(AdminUser {
        email: data.claims.sub,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            host: "127.0.0.1".into(),
            port: 0,
            state_path: "state.json".into(),
            jwt_secret: "test-secret".into(),
            jwt_expiry_seconds: 3600,
            admin_email: "warden@hostel.edu".into(),
            admin_password_hash: bcrypt::hash("mess2025", bcrypt::DEFAULT_COST).unwrap(),
            app_base_url: "http://localhost".into(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let token = issue_token("test-secret", "warden@hostel.edu", 3600).unwrap();
        let user = decode_token(&token, "test-secret").unwrap();
        assert_eq!(user.email, "warden@hostel.edu");
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = issue_token("test-secret", "warden@hostel.edu", 3600).unwrap();
        assert!(decode_token(&token, "other-secret").is_err());
        let mut forged = token.clone();
        forged.push('x');
        assert!(decode_token(&forged, "test-secret").is_err());
    }

    #[test]
    fn test_login_checks_both_fields() {
        let config = test_config();
        assert!(AuthService::login(&config, "warden@hostel.edu", "mess2025").is_ok());
        // case-insensitive email, trimmed
        assert!(AuthService::login(&config, " Warden@Hostel.EDU ", "mess2025").is_ok());
        assert!(AuthService::login(&config, "warden@hostel.edu", "wrong").is_err());
        assert!(AuthService::login(&config, "someone@else.edu", "mess2025").is_err());
    }
}
