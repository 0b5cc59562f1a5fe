use std::env;
use reqwest::Url;
use crate::error::AppError;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: Url,
}

impl AppConfig {
    /// Read `.env` if present, then the process environment
    pub fn load() -> anyhow::Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e.into());
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let raw = lookup("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let api_base_url = Url::parse(raw.trim()).map_err(|e| AppError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        if api_base_url.cannot_be_a_base() {
            return Err(AppError::InvalidBaseUrl {
                url: raw,
                reason: "not a base URL".into(),
            }.into());
        }

        Ok(Self { api_base_url })
    }
}
