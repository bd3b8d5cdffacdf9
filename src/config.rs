use std::env;
use std::time::Duration;
use anyhow::{bail, Context, Result};

pub const DEFAULT_TRAVEL_PRICES_URL: &str =
    "https://cosmos-odyssey.azurewebsites.net/api/v1.0/TravelPrices";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub travel_prices_url: String,
    pub service_port: u16,
    pub service_host: String,
    pub cors_allowed_origin: String,
    pub max_pricelists: u32,
    pub retry_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/pricelists.db".to_string());

        let travel_prices_url = env::var("TRAVEL_PRICES_URL")
            .unwrap_or_else(|_| DEFAULT_TRAVEL_PRICES_URL.to_string());

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let cors_allowed_origin = env::var("CORS_ALLOWED_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:8085".to_string());

        let max_pricelists = env::var("MAX_PRICELISTS")
            .unwrap_or_else(|_| "15".to_string())
            .parse::<u32>()
            .context("MAX_PRICELISTS must be a positive integer")?;
        if max_pricelists == 0 {
            bail!("MAX_PRICELISTS must be at least 1");
        }

        let retry_delay_secs = env::var("RETRY_DELAY_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .context("RETRY_DELAY_SECS must be a number of seconds")?;

        Ok(Config {
            database_url,
            travel_prices_url,
            service_port,
            service_host,
            cors_allowed_origin,
            max_pricelists,
            retry_delay: Duration::from_secs(retry_delay_secs),
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Travel prices source: {}", self.travel_prices_url);
        tracing::info!("  Price lists kept: {}", self.max_pricelists);
        tracing::info!("  Refresh retry delay: {:?}", self.retry_delay);
        tracing::info!("  CORS origin: {}", self.cors_allowed_origin);
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Environment variables are process-global; tests touching them take this lock.
    pub(crate) static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env_vars() {
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("TRAVEL_PRICES_URL");
            env::remove_var("SERVICE_PORT");
            env::remove_var("SERVICE_HOST");
            env::remove_var("CORS_ALLOWED_ORIGIN");
            env::remove_var("MAX_PRICELISTS");
            env::remove_var("RETRY_DELAY_SECS");
        }
    }

    /// Config pointing at the given database, for tests that never read the environment.
    pub(crate) fn test_config(database_url: &str) -> Config {
        Config {
            database_url: database_url.to_string(),
            travel_prices_url: "http://127.0.0.1:1/TravelPrices".to_string(),
            service_port: 8080,
            service_host: "127.0.0.1".to_string(),
            cors_allowed_origin: "http://localhost:8085".to_string(),
            max_pricelists: 15,
            retry_delay: Duration::from_secs(60),
        }
    }

    #[test]
    fn test_config_with_all_vars() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("DATABASE_URL", "sqlite://./tmp/test.db");
            env::set_var("TRAVEL_PRICES_URL", "http://localhost:9000/prices");
            env::set_var("SERVICE_PORT", "3000");
            env::set_var("SERVICE_HOST", "127.0.0.1");
            env::set_var("CORS_ALLOWED_ORIGIN", "http://example.test");
            env::set_var("MAX_PRICELISTS", "3");
            env::set_var("RETRY_DELAY_SECS", "5");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "sqlite://./tmp/test.db");
        assert_eq!(config.travel_prices_url, "http://localhost:9000/prices");
        assert_eq!(config.service_port, 3000);
        assert_eq!(config.service_host, "127.0.0.1");
        assert_eq!(config.cors_allowed_origin, "http://example.test");
        assert_eq!(config.max_pricelists, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(5));
        clear_env_vars();
    }

    #[test]
    fn test_config_with_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "sqlite://./data/pricelists.db");
        assert_eq!(config.travel_prices_url, DEFAULT_TRAVEL_PRICES_URL);
        assert_eq!(config.service_port, 8080);
        assert_eq!(config.service_host, "0.0.0.0");
        assert_eq!(config.cors_allowed_origin, "http://localhost:8085");
        assert_eq!(config.max_pricelists, 15);
        assert_eq!(config.retry_delay, Duration::from_secs(60));
    }

    #[test]
    fn test_invalid_port() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("SERVICE_PORT", "not-a-number");
        }

        let result = Config::from_env();
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.to_string().contains("SERVICE_PORT"));
        clear_env_vars();
    }

    #[test]
    fn test_port_out_of_range() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("SERVICE_PORT", "99999");
        }

        let result = Config::from_env();
        assert!(result.is_err());
        clear_env_vars();
    }

    #[test]
    fn test_zero_max_pricelists_rejected() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("MAX_PRICELISTS", "0");
        }

        let error = Config::from_env().unwrap_err();
        assert!(error.to_string().contains("MAX_PRICELISTS"));
        clear_env_vars();
    }
}
