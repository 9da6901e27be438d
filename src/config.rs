// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;
use url::Url;

use crate::error::AppError;

/// Spreadsheet API deployment the quiz writes to when nothing else is configured.
pub const DEFAULT_SHEETS_API_BASE_URL: &str = "https://api.apico.dev/v1";
pub const DEFAULT_SHEETS_INTEGRATION_ID: &str = "cJ0YRb";
pub const DEFAULT_SPREADSHEET_ID: &str = "1g2GsB6Rro-myXSsEqPHBDpco598OBhzrznIMUiQJ_jg";
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Remote spreadsheet API.
    Sheets,
    /// In-process rows, lost on restart.
    Memory,
}

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub base_url: Url,
    pub integration_id: String,
    pub spreadsheet_id: String,
    pub sheet_name: String,
    /// Numeric tab id, used by row deletion.
    pub sheet_id: i64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreKind,
    pub sheets: SheetsConfig,
    /// Bearer token for the admin row routes. Admin routes are closed when unset.
    pub admin_token: Option<String>,
    pub assets_dir: String,
    pub assets_url: String,
    pub bind_addr: SocketAddr,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let store = match env::var("ROW_STORE").as_deref() {
            Ok("memory") => StoreKind::Memory,
            Ok("sheets") | Err(_) => StoreKind::Sheets,
            Ok(other) => {
                return Err(AppError::InternalServerError(format!(
                    "ROW_STORE must be 'sheets' or 'memory', got '{}'",
                    other
                )));
            }
        };

        let base_url = var_or("SHEETS_API_BASE_URL", DEFAULT_SHEETS_API_BASE_URL);
        let base_url = Url::parse(&base_url).map_err(|e| {
            AppError::InternalServerError(format!("Invalid SHEETS_API_BASE_URL: {}", e))
        })?;

        let sheet_id = var_or("SHEET_ID", "0")
            .parse::<i64>()
            .map_err(|e| AppError::InternalServerError(format!("Invalid SHEET_ID: {}", e)))?;

        let bind_addr = var_or("BIND_ADDR", "0.0.0.0:3000")
            .parse::<SocketAddr>()
            .map_err(|e| AppError::InternalServerError(format!("Invalid BIND_ADDR: {}", e)))?;

        Ok(Self {
            store,
            sheets: SheetsConfig {
                base_url,
                integration_id: var_or("SHEETS_INTEGRATION_ID", DEFAULT_SHEETS_INTEGRATION_ID),
                spreadsheet_id: var_or("SPREADSHEET_ID", DEFAULT_SPREADSHEET_ID),
                sheet_name: var_or("SHEET_NAME", DEFAULT_SHEET_NAME),
                sheet_id,
            },
            admin_token: env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
            assets_dir: var_or("ASSETS_DIR", "assets"),
            assets_url: var_or("ASSETS_URL", "/assets"),
            bind_addr,
            rust_log: var_or("RUST_LOG", "info"),
        })
    }

    /// Configuration for tests: in-memory store, no admin token.
    pub fn for_tests() -> Self {
        Self {
            store: StoreKind::Memory,
            sheets: SheetsConfig {
                base_url: Url::parse(DEFAULT_SHEETS_API_BASE_URL).expect("default base URL is valid"),
                integration_id: DEFAULT_SHEETS_INTEGRATION_ID.to_string(),
                spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
                sheet_name: DEFAULT_SHEET_NAME.to_string(),
                sheet_id: 0,
            },
            admin_token: None,
            assets_dir: "assets".to_string(),
            assets_url: "/assets".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            rust_log: "error".to_string(),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
