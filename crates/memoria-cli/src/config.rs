use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use memoria_core::models::viewer::{Viewer, ViewerRole};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoriaConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub api_base_url: String,
    /// Signed-in user. `None` browses as an anonymous visitor.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: ViewerRole,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub auth_token: Option<String>,
    /// Added in v1.
    pub request_timeout_secs: u64,
    pub created_at: jiff::Timestamp,
}

impl MemoriaConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_base_url: api_base_url.into(),
            user_id: None,
            role: ViewerRole::default(),
            auth_token: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            created_at: jiff::Timestamp::now(),
        }
    }

    /// The configured user id, if it names anyone. A blank id is anonymous.
    pub fn signed_in_user(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    pub fn viewer(&self) -> Viewer {
        match self.signed_in_user() {
            Some(id) => Viewer::signed_in(id, self.role),
            None => Viewer::anonymous(),
        }
    }
}

/// Redacted view of the config, safe to print.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigInfo {
    pub api_base_url: String,
    pub user_id: Option<String>,
    pub role: ViewerRole,
    pub token_hint: Option<String>,
    pub request_timeout_secs: u64,
    pub created_at: String,
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("memoria"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Directory holding transcripts for one named local session.
pub fn session_dir(session: &str) -> eyre::Result<PathBuf> {
    memoria_core::storage_keys::validate_scope(session)
        .map_err(|e| eyre::eyre!("invalid session name: {e}"))?;
    let base =
        dirs::data_local_dir().ok_or_else(|| eyre::eyre!("no local data directory found"))?;
    Ok(base.join("memoria").join("sessions").join(session))
}

/// Load the config if one has been written.
pub fn load_config() -> eyre::Result<Option<MemoriaConfig>> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(None);
    }
    load_from(&path).map(Some)
}

pub fn load_from(path: &Path) -> eyre::Result<MemoriaConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: MemoriaConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update memoria."
        ));
    }

    // v0 -> v1: request timeout becomes configurable
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("request_timeout_secs")
            .or_insert(serde_json::Value::Number(DEFAULT_TIMEOUT_SECS.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 -> v1 (added request_timeout_secs)");
    }

    Ok(json)
}

pub fn save_config(config: &MemoriaConfig) -> eyre::Result<PathBuf> {
    let path = config_path()?;
    save_to(&path, config)?;
    Ok(path)
}

pub fn save_to(path: &Path, config: &MemoriaConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path has no parent: {}", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // The file can hold a bearer token.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn config_info(config: &MemoriaConfig) -> ConfigInfo {
    ConfigInfo {
        api_base_url: config.api_base_url.clone(),
        user_id: config.user_id.clone(),
        role: config.role,
        token_hint: config.auth_token.as_deref().map(redact_token),
        request_timeout_secs: config.request_timeout_secs,
        created_at: config.created_at.to_string(),
    }
}

fn redact_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}
