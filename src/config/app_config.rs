use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Token signing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Path of the PKCS#1 PEM private key
    pub private_key_file: PathBuf,
    /// Path of the PKCS#1 PEM public key
    pub public_key_file: PathBuf,
    /// RSA signing algorithm name (RS256, RS384 or RS512)
    pub algorithm: String,
    /// Access token lifetime in minutes
    pub access_token_expire_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            private_key_file: PathBuf::from("certs/private.pem"),
            public_key_file: PathBuf::from("certs/public.pem"),
            algorithm: "RS256".to_string(),
            access_token_expire_minutes: 60,
        }
    }
}

impl AuthConfig {
    /// Configured token lifetime as a duration
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.access_token_expire_minutes)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.algorithm, "RS256");
        assert_eq!(config.auth.access_token_expire_minutes, 60);
        assert_eq!(
            config.auth.private_key_file,
            PathBuf::from("certs/private.pem")
        );
    }

    #[test]
    fn test_token_ttl() {
        let auth = AuthConfig {
            access_token_expire_minutes: 15,
            ..AuthConfig::default()
        };

        assert_eq!(auth.token_ttl(), chrono::Duration::minutes(15));
    }
}
