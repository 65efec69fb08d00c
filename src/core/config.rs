use serde::Deserialize;

use crate::models::departments::Department;
use crate::models::users::User;

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub server: DmsServerConfig,
    pub telemetry: TelemetryConfig,
    pub uploads: UploadConfig,
    pub notifications: NotificationConfig,
    pub directory: DirectoryConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self, config::ConfigError> {
        let base_path = std::env::current_dir()
            .map_err(|e| config::ConfigError::Message(format!("Failed to find the current dir: {}", e)))?;
        let config_dir = base_path.join("src/core/configurations");

        let app_environment: Environment = std::env::var("EDARAT_DMS_APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(config::ConfigError::Message)?;

        Self::load(&config_dir, app_environment)
    }

    pub fn load(
        config_dir: &std::path::Path,
        app_environment: Environment,
    ) -> Result<Self, config::ConfigError> {
        let configurations = config::Config::builder()
            .add_source(
                config::File::from(config_dir.join(app_environment.as_str())).required(true),
            )
            // e.g. EDARAT_DMS_SERVER__PORT=9000
            .add_source(
                config::Environment::with_prefix("EDARAT_DMS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        configurations.try_deserialize()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct DmsServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetryConfig {
    pub log_dir: String,
    pub level: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct UploadConfig {
    pub max_file_size_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 100 * 1024 * 1024,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct NotificationConfig {
    pub fallback_approver_email: String,
}

/// Users and departments the service starts with.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub departments: Vec<Department>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not supported environment. Use either `local` or `production` ",
                other
            )),
        }
    }
}
