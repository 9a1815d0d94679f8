use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

/// Cat and dog probabilities at most this far apart are reported as a tie.
pub const DEFAULT_TIE_BAND: f64 = 0.05;

/// The larger probability must reach this value to be trusted.
pub const DEFAULT_CONFIDENCE_FLOOR: f64 = 0.65;

pub const DEFAULT_SETTINGS_PATH: &str = "appsettings.json";
pub const SETTINGS_PATH_VAR: &str = "CATDOG_SETTINGS";

pub const ENV_ENDPOINT: &str = "CUSTOMVISION_ENDPOINT";
pub const ENV_PREDICTION_KEY: &str = "CUSTOMVISION_PREDICTION_KEY";
pub const ENV_PROJECT_ID: &str = "CUSTOMVISION_PROJECT_ID";
pub const ENV_PUBLISHED_MODEL_NAME: &str = "CUSTOMVISION_PUBLISHED_MODEL_NAME";

const KEY_ENDPOINT: &str = "CustomVision:Endpoint";
const KEY_PREDICTION_KEY: &str = "CustomVision:PredictionKey";
const KEY_PROJECT_ID: &str = "CustomVision:ProjectId";
const KEY_PUBLISHED_MODEL_NAME: &str = "CustomVision:PublishedModelName";
const KEY_TIE_BAND: &str = "Interpretation:TieBand";
const KEY_CONFIDENCE_FLOOR: &str = "Interpretation:ConfidenceFloor";
const KEY_CONNECT_TIMEOUT: &str = "Http:ConnectTimeoutSecs";
const KEY_RECEIVE_TIMEOUT: &str = "Http:ReceiveTimeoutSecs";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RECEIVE_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub tie_band: f64,
    pub confidence_floor: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            tie_band: DEFAULT_TIE_BAND,
            confidence_floor: DEFAULT_CONFIDENCE_FLOOR,
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct PredictionServiceConfig {
    pub endpoint: String,
    pub prediction_key: String,
    pub project_id: Uuid,
    pub published_model_name: String,
    pub connect_timeout: Duration,
    pub receive_timeout: Duration,
}

impl fmt::Debug for PredictionServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictionServiceConfig")
            .field("endpoint", &self.endpoint)
            .field("prediction_key", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("published_model_name", &self.published_model_name)
            .field("connect_timeout", &self.connect_timeout)
            .field("receive_timeout", &self.receive_timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub prediction_service: PredictionServiceConfig,
    pub thresholds: Thresholds,
    pub logger_timezone: chrono::FixedOffset,
    pub logger_enabled: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    SettingsRead {
        path: PathBuf,
        source: std::io::Error,
    },
    SettingsParse(serde_json::Error),
    Missing(&'static str),
    InvalidEndpoint(String),
    InvalidProjectId {
        value: String,
        source: uuid::Error,
    },
    InvalidThreshold {
        key: &'static str,
        value: f64,
    },
    InvalidTimeout(&'static str),
    InvalidUtcOffset(i32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SettingsRead { path, source } => {
                write!(f, "Could not read settings file {}: {source}", path.display())
            }
            Self::SettingsParse(err) => write!(f, "Malformed settings file: {err}"),
            Self::Missing(key) => write!(f, "Missing configuration value: {key}"),
            Self::InvalidEndpoint(value) => {
                write!(f, "{KEY_ENDPOINT} must be an http(s) URL, got '{value}'")
            }
            Self::InvalidProjectId { value, source } => {
                write!(f, "{KEY_PROJECT_ID} '{value}' is not a valid UUID: {source}")
            }
            Self::InvalidThreshold { key, value } => {
                write!(f, "{key} must be between 0 and 1, got {value}")
            }
            Self::InvalidTimeout(key) => write!(f, "{key} must be at least 1 second"),
            Self::InvalidUtcOffset(minutes) => {
                write!(f, "Logging:UtcOffsetMinutes {minutes} is out of range")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SettingsRead { source, .. } => Some(source),
            Self::SettingsParse(err) => Some(err),
            Self::InvalidProjectId { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::SettingsParse(err)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SettingsFile {
    #[serde(default)]
    custom_vision: CustomVisionSection,
    #[serde(default)]
    interpretation: InterpretationSection,
    #[serde(default)]
    http: HttpSection,
    #[serde(default)]
    logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CustomVisionSection {
    endpoint: Option<String>,
    prediction_key: Option<String>,
    project_id: Option<String>,
    published_model_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InterpretationSection {
    tie_band: Option<f64>,
    confidence_floor: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HttpSection {
    connect_timeout_secs: Option<u64>,
    receive_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LoggingSection {
    enabled: Option<bool>,
    utc_offset_minutes: Option<i32>,
}

impl Config {
    /// Reads the settings file and the process environment once, validating
    /// everything up front so a bad value never reaches the menu loop.
    pub fn load() -> Result<Self, ConfigError> {
        let (path, required) = match std::env::var_os(SETTINGS_PATH_VAR) {
            Some(path) => (PathBuf::from(path), true),
            None => (PathBuf::from(DEFAULT_SETTINGS_PATH), false),
        };
        let json = read_settings_file(&path, required)?;
        let env = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
        Self::from_sources(json.as_deref(), env)
    }

    /// Environment values win over the settings file.
    pub fn from_sources<I>(json: Option<&str>, env: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut settings: SettingsFile = match json {
            Some(text) if !text.trim().is_empty() => serde_json::from_str(text)?,
            _ => SettingsFile::default(),
        };

        let env: HashMap<String, String> = env.into_iter().collect();
        let section = &mut settings.custom_vision;
        overlay(&mut section.endpoint, &env, ENV_ENDPOINT);
        overlay(&mut section.prediction_key, &env, ENV_PREDICTION_KEY);
        overlay(&mut section.project_id, &env, ENV_PROJECT_ID);
        overlay(
            &mut section.published_model_name,
            &env,
            ENV_PUBLISHED_MODEL_NAME,
        );

        let endpoint = required(section.endpoint.take(), KEY_ENDPOINT)?;
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }
        let endpoint = endpoint.trim_end_matches('/').to_string();

        let project_id = required(section.project_id.take(), KEY_PROJECT_ID)?;
        let project_id =
            Uuid::parse_str(&project_id).map_err(|source| ConfigError::InvalidProjectId {
                value: project_id.clone(),
                source,
            })?;

        let prediction_service = PredictionServiceConfig {
            endpoint,
            prediction_key: required(section.prediction_key.take(), KEY_PREDICTION_KEY)?,
            project_id,
            published_model_name: required(
                section.published_model_name.take(),
                KEY_PUBLISHED_MODEL_NAME,
            )?,
            connect_timeout: timeout(
                settings.http.connect_timeout_secs,
                DEFAULT_CONNECT_TIMEOUT_SECS,
                KEY_CONNECT_TIMEOUT,
            )?,
            receive_timeout: timeout(
                settings.http.receive_timeout_secs,
                DEFAULT_RECEIVE_TIMEOUT_SECS,
                KEY_RECEIVE_TIMEOUT,
            )?,
        };

        let thresholds = Thresholds {
            tie_band: probability(
                settings.interpretation.tie_band,
                DEFAULT_TIE_BAND,
                KEY_TIE_BAND,
            )?,
            confidence_floor: probability(
                settings.interpretation.confidence_floor,
                DEFAULT_CONFIDENCE_FLOOR,
                KEY_CONFIDENCE_FLOOR,
            )?,
        };

        let offset_minutes = settings.logging.utc_offset_minutes.unwrap_or(0);
        let logger_timezone = offset_minutes
            .checked_mul(60)
            .and_then(chrono::FixedOffset::east_opt)
            .ok_or(ConfigError::InvalidUtcOffset(offset_minutes))?;

        Ok(Self {
            prediction_service,
            thresholds,
            logger_timezone,
            logger_enabled: settings.logging.enabled.unwrap_or(true),
        })
    }
}

fn read_settings_file(path: &Path, required: bool) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => Ok(None),
        Err(source) => Err(ConfigError::SettingsRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn overlay(slot: &mut Option<String>, env: &HashMap<String, String>, var: &str) {
    if let Some(value) = env.get(var).filter(|v| !v.trim().is_empty()) {
        *slot = Some(value.clone());
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, ConfigError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn probability(value: Option<f64>, default: f64, key: &'static str) -> Result<f64, ConfigError> {
    let value = value.unwrap_or(default);
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidThreshold { key, value })
    }
}

fn timeout(secs: Option<u64>, default: u64, key: &'static str) -> Result<Duration, ConfigError> {
    match secs.unwrap_or(default) {
        0 => Err(ConfigError::InvalidTimeout(key)),
        secs => Ok(Duration::from_secs(secs)),
    }
}
