use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_body_size: usize,
    pub allowed_origins: Vec<String>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_or("DATABASE_URL", "sqlite://opsdeck.db?mode=rwc");

        let host: IpAddr = env_or("OPSDECK_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid OPSDECK_HOST: {e}"))?;

        let port: u16 = env_or("OPSDECK_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid OPSDECK_PORT: {e}"))?;

        let connect_timeout_secs: u64 = env_or("OPSDECK_CONNECT_TIMEOUT_SECS", "10")
            .parse()
            .map_err(|e| format!("Invalid OPSDECK_CONNECT_TIMEOUT_SECS: {e}"))?;

        let request_timeout_secs: u64 = env_or("OPSDECK_REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid OPSDECK_REQUEST_TIMEOUT_SECS: {e}"))?;

        let max_body_size: usize = env_or("OPSDECK_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid OPSDECK_MAX_BODY_SIZE: {e}"))?;

        let allowed_origins: Vec<String> = env_or("OPSDECK_ALLOWED_ORIGINS", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_string())
            .collect();

        let log_level = env_or("OPSDECK_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            host,
            port,
            connect_timeout_secs,
            request_timeout_secs,
            max_body_size,
            allowed_origins,
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
