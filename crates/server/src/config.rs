use database::{ConfigError, DatabaseConfig, config::parse_or};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_RESULTS_PER_PAGE: u64 = 100;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub max_results_per_page: u64,
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Loads `BIND_ADDR`, `MAX_RESULTS_PER_PAGE` and the database settings
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_results_per_page =
            parse_or("MAX_RESULTS_PER_PAGE", DEFAULT_MAX_RESULTS_PER_PAGE)?;
        if max_results_per_page == 0 {
            return Err(ConfigError::Invalid {
                key: "MAX_RESULTS_PER_PAGE",
                value: max_results_per_page.to_string(),
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            bind_addr: parse_or("BIND_ADDR", DEFAULT_BIND_ADDR.to_string())?,
            max_results_per_page,
            database: DatabaseConfig::from_env()?,
        })
    }
}
