//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for overrides in tests.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub admin_pin: String,
    pub phone_hash_salt: String,
    pub jwt_secret: String,
    pub admin_session_minutes: u64,
    pub checkin_base_url: String,
    pub attendance_retention_days: i64,
    pub upload_root: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "qr-checkin".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "data/checkin.db".into()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .expect("PORT must be a number"),
            admin_pin: env::var("ADMIN_PIN").unwrap_or_else(|_| "1234".into()),
            phone_hash_salt: env::var("PHONE_HASH_SALT")
                .unwrap_or_else(|_| "change-me-salt".into()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-secret".into()),
            admin_session_minutes: env::var("ADMIN_SESSION_MINUTES")
                .unwrap_or_else(|_| "60".into())
                .parse()
                .expect("ADMIN_SESSION_MINUTES must be a number"),
            checkin_base_url: env::var("CHECKIN_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
            attendance_retention_days: env::var("ATTENDANCE_RETENTION_DAYS")
                .unwrap_or_else(|_| "0".into())
                .parse()
                .expect("ATTENDANCE_RETENTION_DAYS must be a number"),
            upload_root: env::var("UPLOAD_ROOT").unwrap_or_else(|_| "data/uploads".into()),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().unwrap();
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_admin_pin(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.admin_pin = value.into());
    }

    pub fn set_phone_hash_salt(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.phone_hash_salt = value.into());
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_admin_session_minutes(value: u64) {
        AppConfig::set_field(|cfg| cfg.admin_session_minutes = value);
    }

    pub fn set_checkin_base_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.checkin_base_url = value.into());
    }

    pub fn set_attendance_retention_days(value: i64) {
        AppConfig::set_field(|cfg| cfg.attendance_retention_days = value);
    }

    pub fn set_upload_root(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.upload_root = value.into());
    }
}
