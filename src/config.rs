use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// `None` means no database is configured and users live in memory.
    pub db: Option<DbConfig>,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let db = match get("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => Some(DbConfig {
                url,
                max_connections: parse_var(&get, "DB_MAX_CONNECTIONS", 10u32)?,
            }),
            None => None,
        };
        let host = get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var(&get, "APP_PORT", 8080u16)?;
        Ok(Self { db, host, port })
    }
}

/// Parses `key` when set; a value that does not parse is an error, not the default.
fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        Some(v) => v
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("invalid {} {:?}: {}", key, v, e)),
        None => Ok(default),
    }
}
