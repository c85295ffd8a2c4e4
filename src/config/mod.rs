//! Configuration module for the studio backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default upload size limit (5 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Minutes a session may stay unused before it is dropped.
const DEFAULT_SESSION_IDLE_MINUTES: i64 = 60;
const MAX_SESSION_IDLE_MINUTES: i64 = 60 * 24 * 365;

/// Credentials used to seed the first super admin on an empty database.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory where uploaded images are written
    pub upload_dir: PathBuf,
    /// Externally reachable base URL, used to build public image URLs
    pub public_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Largest accepted image upload in bytes
    pub max_upload_bytes: usize,
    /// Minutes of inactivity after which a session expires
    pub session_idle_minutes: i64,
    /// Seed account created when no admin users exist
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("STUDIO_DB_PATH")
            .unwrap_or_else(|_| "./data/studio.sqlite".to_string())
            .into();

        let upload_dir = env::var("STUDIO_UPLOAD_DIR")
            .unwrap_or_else(|_| "./data/uploads".to_string())
            .into();

        let public_url = env::var("STUDIO_PUBLIC_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr = env::var("STUDIO_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid STUDIO_BIND_ADDR format");

        let log_level = env::var("STUDIO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let max_upload_bytes = env::var("STUDIO_MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let session_idle_minutes = env::var("STUDIO_SESSION_IDLE_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|minutes: &i64| (1..=MAX_SESSION_IDLE_MINUTES).contains(minutes))
            .unwrap_or(DEFAULT_SESSION_IDLE_MINUTES);

        let bootstrap_admin = match (
            env::var("STUDIO_BOOTSTRAP_USERNAME"),
            env::var("STUDIO_BOOTSTRAP_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
                Some(BootstrapAdmin { username, password })
            }
            _ => None,
        };

        Self {
            db_path,
            upload_dir,
            public_url,
            bind_addr,
            log_level,
            max_upload_bytes,
            session_idle_minutes,
            bootstrap_admin,
        }
    }
}
