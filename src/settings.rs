use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use chrono::NaiveDate;

use config::{Config, Environment, File};

use secrecy::{ExposeSecret, Secret};

use serde::Deserialize;
use serde_aux::prelude::*;

use url::Url;

use crate::domain::CityNames;
use crate::repo::{FileStorage, MemoryStorage, MonitorStorage, RemoteStorage};
use crate::telemetry::LogFormat;

/// Environment variable holding the email provider API key
const EMAIL_API_KEY_VAR: &str = "RESEND_API_KEY";

/// Runtime environment, either `Dev` for local development, or `Prod` for release
#[derive(Debug)]
pub enum Runtime {
    Dev,
    Prod,
}

impl Runtime {
    pub fn as_str(&self) -> &str {
        match self {
            Runtime::Dev => "dev",
            Runtime::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Runtime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => anyhow::bail!("{} is not a valid runtime environment", other),
        }
    }
}

/// Application settings wrapper
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub store: StoreSettings,
    pub email: EmailSettings,
    pub notifier: NotifierSettings,
    pub quote: QuoteSettings,
    #[serde(default)]
    pub log: LogSettings,
    #[serde(default)]
    cities: HashMap<String, String>,
}

impl Settings {
    /// Load application settings from the settings directory
    pub fn load() -> anyhow::Result<Self> {
        let path = env::current_dir()?.join("settings");
        // Get the current environment based on the `APP_ENV` environment variable, default to `Dev`
        let runtime: Runtime = env::var("APP_ENV")
            .unwrap_or_else(|_| "dev".into())
            .try_into()?;

        Self::load_from(runtime, &path)
    }

    /// Load application settings from a specified path and runtime
    pub fn load_from(runtime: Runtime, base_path: &Path) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(File::from(base_path.join("base")).required(true))
            .add_source(File::from(base_path.join(runtime.as_str())).required(true))
            // Takes the form `APP_<settings category>__<setting name>`
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            )
            // The provider key alone decides between real and simulated sending
            .set_override_option("email.api_auth_token", env::var(EMAIL_API_KEY_VAR).ok())?
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")
    }

    /// Default city names, extended by the configured table
    pub fn city_names(&self) -> CityNames {
        CityNames::default().with_overrides(self.cities.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    /// Front-end assets, not served when unset
    #[serde(default)]
    static_dir: Option<PathBuf>,
}

impl ApplicationSettings {
    /// The application address to bind to
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }

    pub fn static_dir(&self) -> Option<&Path> {
        self.static_dir.as_deref()
    }
}

/// Log output, `RUST_LOG` still overrides the level
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

/// Monitor collection backend
#[derive(Debug, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreSettings {
    File {
        path: PathBuf,
    },
    Remote {
        base_url: String,
        key: String,
        auth_token: Secret<String>,
        #[serde(deserialize_with = "deserialize_number_from_string")]
        timeout_milliseconds: u64,
    },
    Memory,
}

impl StoreSettings {
    /// Build the configured storage backend
    pub fn storage(&self) -> anyhow::Result<Arc<dyn MonitorStorage>> {
        let storage: Arc<dyn MonitorStorage> = match self {
            Self::File { path } => Arc::new(FileStorage::new(path)),
            Self::Remote {
                base_url,
                key,
                auth_token,
                timeout_milliseconds,
            } => {
                let base_url = Url::parse(base_url).context("Failed to parse store base URL")?;
                let timeout = Duration::from_millis(*timeout_milliseconds);
                Arc::new(RemoteStorage::new(
                    base_url,
                    key,
                    auth_token.clone(),
                    timeout,
                )?)
            }
            Self::Memory => Arc::new(MemoryStorage::default()),
        };
        Ok(storage)
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailSettings {
    sender: String,
    api_base_url: String,
    #[serde(default)]
    api_auth_token: Option<Secret<String>>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    api_timeout_milliseconds: u64,
}

impl EmailSettings {
    /// The address (optionally with a display name) emails are sent from
    pub fn sender(&self) -> &str {
        &self.sender
    }
    /// The email REST API timeout duration
    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_milliseconds)
    }
    /// The base URL for the email REST service
    pub fn api_base_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.api_base_url).context("Failed to parse email base URL")
    }
    /// The provider API key; sending is simulated without one
    pub fn api_auth_token(&self) -> Option<Secret<String>> {
        self.api_auth_token
            .clone()
            .filter(|token| !token.expose_secret().trim().is_empty())
    }
}

/// A named external flight search page linked from every email
#[derive(Debug, Clone, Deserialize)]
pub struct SearchLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotifierSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    send_delay_milliseconds: u64,
    /// How far ahead the search deep link departs
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub search_lead_days: i64,
    pub site_url: String,
    #[serde(default)]
    pub search_links: Vec<SearchLink>,
}

impl NotifierSettings {
    /// Pause between consecutive real sends
    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_milliseconds)
    }
}

/// A fixed-markup alternative offer
#[derive(Debug, Clone, Deserialize)]
pub struct AlternativeSettings {
    pub airline: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub markup: u32,
}

/// Parameters of the mock price lookup
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub base_price_min: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub base_price_max: u32,
    pub base_currency: String,
    pub converted_currency: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub exchange_rate: f64,
    pub airlines: Vec<String>,
    pub depart_date: NaiveDate,
    pub return_date: NaiveDate,
    #[serde(default)]
    pub alternatives: Vec<AlternativeSettings>,
}
