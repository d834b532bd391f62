use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Signing up with this address yields the admin role.
    pub admin_email: String,
    pub upload_dir: PathBuf,
    /// When set, a failed batch upload deletes what it already persisted
    /// instead of reporting partial success.
    pub upload_rollback: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_days: std::env::var("JWT_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(30),
        };
        let admin_email = std::env::var("ADMIN_EMAIL")?.trim().to_lowercase();
        let upload_dir = std::env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| "uploads".into())
            .into();
        let upload_rollback = std::env::var("UPLOAD_ROLLBACK")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Ok(Self {
            database_url,
            jwt,
            admin_email,
            upload_dir,
            upload_rollback,
        })
    }

    /// `email` must already be trimmed and lowercased.
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_email == email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(admin_email: &str) -> AppConfig {
        AppConfig {
            database_url: "postgres://localhost/test".into(),
            jwt: JwtConfig {
                secret: "test-secret".into(),
                ttl_days: 30,
            },
            admin_email: admin_email.into(),
            upload_dir: "uploads".into(),
            upload_rollback: false,
        }
    }

    #[test]
    fn admin_email_comparison_is_exact() {
        let config = make_config("boss@example.com");
        assert!(config.is_admin_email("boss@example.com"));
        assert!(!config.is_admin_email("someone@example.com"));
        assert!(!config.is_admin_email("boss@example.com "));
    }
}
