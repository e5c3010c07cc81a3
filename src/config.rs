use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub state_path: String,
    pub jwt_secret: String,
    pub jwt_expiry_seconds: u64,
    pub admin_email: String,
    pub admin_password_hash: String,
    pub app_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()?,
            state_path: env::var("STATE_PATH").unwrap_or_else(|_| "data/state.json".into()),
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiry_seconds: env::var("JWT_EXPIRY_SECONDS")
                .unwrap_or_else(|_| "28800".into())
                .parse()?,
            admin_email: required("ADMIN_EMAIL")?,
            // bcrypt hash of the admin password; generate with any bcrypt tool
            admin_password_hash: required("ADMIN_PASSWORD_HASH")?,
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost".into()),
        })
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("Missing required env var: {}", key))
}
