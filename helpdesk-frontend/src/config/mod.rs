use serde::Deserialize;
use validator::Validate;

/// Longest accepted inactivity window: one year.
pub const MAX_EXPIRY_HOURS: i64 = 8760;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_static_dir() -> String {
    "helpdesk-frontend/static".to_string()
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct SessionSettings {
    /// Sessions expire after this many hours without a request.
    #[serde(default = "default_expiry_hours")]
    #[validate(range(min = 1, max = 8760))]
    pub expiry_hours: i64,
    /// Only send the session cookie over HTTPS.
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_expiry_hours() -> i64 {
    24
}

impl SessionSettings {
    /// Inactivity window, held within `1..=MAX_EXPIRY_HOURS` hours.
    pub fn expiry(&self) -> time::Duration {
        time::Duration::hours(self.expiry_hours.clamp(1, MAX_EXPIRY_HOURS))
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            expiry_hours: default_expiry_hours(),
            secure_cookie: false,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP/gRPC collector; span export is off when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("cannot read current dir: {e}")))?;

    // Allow running from the workspace root or from the crate directory
    let configuration_directory = if base_path.ends_with("helpdesk-frontend") {
        base_path.join("config")
    } else {
        base_path.join("helpdesk-frontend").join("config")
    };

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings = settings.try_deserialize::<Settings>()?;
    settings.session.validate().map_err(|e| {
        config::ConfigError::Message(format!("invalid session settings: {e}"))
    })?;

    Ok(settings)
}
