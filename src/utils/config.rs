use std::env;
use std::path::PathBuf;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
    pub log_level: String,
    pub environment: String,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_path: None,
            log_level: "info".to_string(),
            environment: "development".to_string(),
            currency_symbol: "₽".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Config::default();
        let config = Config {
            catalog_path: env::var("CATALOG_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: env::var("APP_ENV").unwrap_or(defaults.environment),
            currency_symbol: env::var("CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(anyhow::anyhow!(
                "LOG_LEVEL must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            ));
        }

        if let Some(path) = &self.catalog_path {
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                return Err(anyhow::anyhow!(
                    "CATALOG_PATH must point to a .json file, got '{}'",
                    path.display()
                ));
            }
        }

        if self.currency_symbol.trim().is_empty() {
            return Err(anyhow::anyhow!("CURRENCY_SYMBOL must not be empty"));
        }

        Ok(())
    }
}
