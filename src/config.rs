use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub login_url: String,
    pub redirect_url: String,
    pub session_data_url: String,
    pub timeout_secs: u64,
    pub session_ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub cors_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = match std::env::var("APP_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("APP_PORT is not a port: {raw}"))?,
            Err(_) => 8080,
        };
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let max_connections = env_parse("DB_MAX_CONNECTIONS", 10);
        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".into()),
        );
        let auth = AuthConfig {
            login_url: std::env::var("AUTH_LOGIN_URL")
                .unwrap_or_else(|_| "https://auth.emergentagent.com/".into()),
            redirect_url: std::env::var("AUTH_REDIRECT_URL")
                .unwrap_or_else(|_| "http://localhost:3000/profile".into()),
            session_data_url: std::env::var("AUTH_SESSION_DATA_URL").unwrap_or_else(|_| {
                "https://demobackend.emergentagent.com/auth/v1/env/oauth/session-data".into()
            }),
            timeout_secs: env_parse("AUTH_TIMEOUT_SECS", 10),
            session_ttl_days: env_parse("SESSION_TTL_DAYS", 7),
        };
        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            cors_origins,
            auth,
        })
    }
}

impl AppConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Splits a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_trims_and_skips_blanks() {
        let origins = parse_origins(" http://a.test , ,http://b.test,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = AppConfig {
            host: "127.0.0.1".into(),
            port: 9000,
            database_url: String::new(),
            max_connections: 1,
            cors_origins: Vec::new(),
            auth: AuthConfig {
                login_url: String::new(),
                redirect_url: String::new(),
                session_data_url: String::new(),
                timeout_secs: 1,
                session_ttl_days: 7,
            },
        };
        let addr: std::net::SocketAddr = config.bind_addr().parse().unwrap();
        assert_eq!(addr.port(), 9000);
    }

    #[test]
    fn parse_origins_keeps_wildcard() {
        assert_eq!(parse_origins("*"), vec!["*"]);
    }
}
