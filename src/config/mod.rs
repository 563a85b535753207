use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod check;

pub const DEFAULT_ZONES: [&str; 6] = ["NORTE", "OESTE", "CENTRO OESTE", "CENTRO SUL", "SUL", "LESTE"];
pub const DEFAULT_TRACKED_COMPANIES: [&str; 2] = ["INNOVATIVE", "NAVEGAM"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
    #[serde(default = "default_zones")]
    pub zones: Vec<String>,
    #[serde(default = "default_tracked_companies")]
    pub tracked_companies: Vec<String>,
    #[serde(default = "default_purge_ttl")]
    pub purge_code_ttl_secs: i64,
    #[serde(default = "default_recent_limit")]
    pub recent_exits_limit: usize,
    #[serde(default = "default_history_days")]
    pub history_default_days: i64,
    #[serde(default = "default_productivity_days")]
    pub productivity_default_days: i64,
    #[serde(default = "default_watch_interval")]
    pub watch_interval_ms: u64,
}

// A fresh install starts in dark mode.
fn default_dark_mode() -> bool {
    true
}
fn default_zones() -> Vec<String> {
    DEFAULT_ZONES.iter().map(|z| z.to_string()).collect()
}
fn default_tracked_companies() -> Vec<String> {
    DEFAULT_TRACKED_COMPANIES.iter().map(|c| c.to_string()).collect()
}
fn default_purge_ttl() -> i64 {
    30
}
fn default_recent_limit() -> usize {
    10
}
fn default_history_days() -> i64 {
    30
}
fn default_productivity_days() -> i64 {
    7
}
fn default_watch_interval() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            dark_mode: default_dark_mode(),
            zones: default_zones(),
            tracked_companies: default_tracked_companies(),
            purge_code_ttl_secs: default_purge_ttl(),
            recent_exits_limit: default_recent_limit(),
            history_default_days: default_history_days(),
            productivity_default_days: default_productivity_days(),
            watch_interval_ms: default_watch_interval(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rdispatch")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rdispatch")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rdispatch.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rdispatch.sqlite")
    }

    /// The cached login lives next to the database it was opened against,
    /// so two terminals on two databases never share a session.
    pub fn session_file(&self) -> PathBuf {
        let mut name = Path::new(&self.database)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "rdispatch.sqlite".to_string());
        name.push_str(".session.json");
        Path::new(&self.database).with_file_name(name)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("não foi possível ler {}: {e}", path.display())))?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    /// Zone names accepted by the exit form, normalised to upper case.
    pub fn normalize_zone(&self, input: &str) -> AppResult<String> {
        let wanted = input.trim().to_uppercase();
        self.zones
            .iter()
            .find(|z| z.trim().to_uppercase() == wanted)
            .map(|z| z.trim().to_uppercase())
            .ok_or_else(|| AppError::InvalidZone(input.to_string()))
    }

    /// Relative `--db` names live in the config directory.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let p = Path::new(name);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Initialize configuration and database files.
    ///
    /// Returns the database path that was configured.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => Self::resolve_db_path(&name),
            None => Self::database_file(),
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config = Self::with_database(db_path.clone());

        // Test runs never touch the user's config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Arquivo de configuração: {:?}", Self::config_file());
        }

        Ok(config.database)
    }
}
