use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdminConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub transitions: TransitionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Firestore,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
    pub project_id: Option<String>,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    /// Overrides the public endpoint, e.g. for a local emulator
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            project_id: None,
            api_key: None,
            access_token: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> String {
    "data/local_storage.json".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct TransitionSettings {
    #[serde(default = "default_fade_out_ms")]
    pub fade_out_ms: u64,
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    #[serde(default = "default_offset_px")]
    pub offset_px: u32,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            fade_out_ms: default_fade_out_ms(),
            settle_ms: default_settle_ms(),
            offset_px: default_offset_px(),
        }
    }
}

fn default_fade_out_ms() -> u64 {
    300
}

fn default_settle_ms() -> u64 {
    50
}

fn default_offset_px() -> u32 {
    20
}

/// Admin login secrets, read from `ADMIN_USERNAME` / `ADMIN_PASSWORD`
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CredentialsConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub fn load_admin_config() -> anyhow::Result<AdminConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/admin").required(false))
        .add_source(config::Environment::with_prefix("GROSITY").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_credentials() -> anyhow::Result<CredentialsConfig> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix("ADMIN"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
