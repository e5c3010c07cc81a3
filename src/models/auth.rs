use serde::{Deserialize, Serialize};

/// Claims embedded in the admin JWT access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // admin email
    pub role: String, // always "admin"
    pub exp: usize,
    pub iat: usize,
}

/// Extracted from a validated admin JWT — available via Axum extractors
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub email: String,
}

/// Opaque per-device student identity from the `x-user-id` header. Votes
/// are keyed on it; it is never authenticated.
#[derive(Debug, Clone)]
pub struct StudentIdentity(pub String);

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
}
