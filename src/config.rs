use std::env;
use std::net::SocketAddr;

use reqwest::Url;

use crate::error::AppError;

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub backend_base_url: Url,
    /// Forwarded to the backend so it can geocode course locations.
    pub map_api_key: Option<String>,
    pub addr: SocketAddr,
}

impl ConsoleConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let non_blank = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend = non_blank("BACKEND_BASE_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_base_url = Url::parse(&backend)
            .map_err(|e| AppError::BadRequest(format!("BACKEND_BASE_URL is invalid ({}): {}", backend, e)))?;

        let addr = non_blank("CONSOLE_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse()
            .map_err(|e| AppError::BadRequest(format!("CONSOLE_ADDR is invalid ({}): {}", addr, e)))?;

        Ok(Self {
            backend_base_url,
            map_api_key: non_blank("MAP_API_KEY"),
            addr,
        })
    }
}
