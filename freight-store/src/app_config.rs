use serde::Deserialize;
use std::env;
use std::fmt;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub service: ServiceConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub name: String,
    pub version: String,
    pub environment: Environment,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Base URL used when building hypermedia links.
    pub public_url: String,
    pub shutdown_timeout_seconds: u64,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Sandbox,
    Staging,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Environment::Local => "local",
            Environment::Sandbox => "sandbox",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        write!(f, "{s}")
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Self::defaults()?
            // Every file is optional; the defaults above are enough to run locally
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `FREIGHT__SERVER__PORT=9090` sets `server.port`
            .add_source(config::Environment::with_prefix("FREIGHT").separator("__"));

        Self::finish(builder.build()?)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("service.name", "shipment-service")?
            .set_default("service.version", "dev")?
            .set_default("service.environment", "local")?
            .set_default("server.port", 8080)?
            .set_default("server.public_url", "http://localhost:8080")?
            .set_default("server.shutdown_timeout_seconds", 20)?
            .set_default("server.request_timeout_ms", 5000)
    }

    fn finish(settings: config::Config) -> Result<Self, config::ConfigError> {
        let mut cfg: Config = settings.try_deserialize()?;
        cfg.service.version = cfg.service.version.to_lowercase();
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::finish(Config::defaults().unwrap().build().unwrap()).unwrap();

        assert_eq!(cfg.service.name, "shipment-service");
        assert_eq!(cfg.service.environment, Environment::Local);
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.public_url, "http://localhost:8080");
        assert_eq!(cfg.server.shutdown_timeout_seconds, 20);
        assert_eq!(cfg.server.request_timeout_ms, 5000);
    }

    #[test]
    fn test_overrides() {
        let settings = Config::defaults()
            .unwrap()
            .set_override("server.port", 9090)
            .unwrap()
            .set_override("service.environment", "staging")
            .unwrap()
            .set_override("service.version", "V1.2.0")
            .unwrap()
            .build()
            .unwrap();

        let cfg = Config::finish(settings).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.service.environment, Environment::Staging);
        assert_eq!(cfg.service.version, "v1.2.0");
        assert_eq!(cfg.service.environment.to_string(), "staging");
    }
}
