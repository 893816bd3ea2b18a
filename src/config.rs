use crate::catalog::PER_PAGE;
use anyhow::{Context, Result};
use log::{debug, info};

pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";
pub const DEFAULT_PROXY_URL: &str = "https://unsplash.com/napi";

const ACCESS_KEY_VARS: [&str; 2] = ["UNSPLASH_ACCESS_KEY", "VITE_UNSPLASH_ACCESS_KEY"];
const QUOTES: &[char] = &['\'', '"'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub access_key: Option<String>,
    pub api_base_url: String,
    pub proxy_base_url: String,
    pub per_page: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            access_key: None,
            api_base_url: DEFAULT_API_URL.to_string(),
            proxy_base_url: DEFAULT_PROXY_URL.to_string(),
            per_page: PER_PAGE,
        }
    }
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Config> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("loaded {}", path.display());
        }

        Config::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key = ACCESS_KEY_VARS
            .iter()
            .find_map(|name| lookup(*name).and_then(|raw| sanitize_access_key(&raw)));

        let api_base_url = base_url(lookup("UNSPLASH_API_URL"), DEFAULT_API_URL);
        let proxy_base_url = base_url(lookup("UNSPLASH_PROXY_URL"), DEFAULT_PROXY_URL);

        let per_page = match lookup("UNSPLASH_PER_PAGE") {
            Some(raw) => {
                let per_page: u32 = raw
                    .trim()
                    .parse()
                    .context("UNSPLASH_PER_PAGE is not valid")?;
                if per_page == 0 {
                    return Err(anyhow::anyhow!("UNSPLASH_PER_PAGE must be positive"));
                }
                per_page
            }
            None => PER_PAGE,
        };

        info!(
            "config: api={} proxy={} per_page={} access_key={}",
            api_base_url,
            proxy_base_url,
            per_page,
            if access_key.is_some() { "set" } else { "unset" }
        );

        Ok(Config {
            access_key,
            api_base_url,
            proxy_base_url,
            per_page,
        })
    }
}

/// Drops one leading and one trailing quote character, then trims.
pub fn sanitize_access_key(raw: &str) -> Option<String> {
    let key = raw.strip_prefix(QUOTES).unwrap_or(raw);
    let key = key.strip_suffix(QUOTES).unwrap_or(key);
    let key = key.trim();

    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

fn base_url(value: Option<String>, default: &str) -> String {
    let url = value
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| default.to_string());

    url.trim_end_matches('/').to_string()
}
