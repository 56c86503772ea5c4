use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_media_root")]
    pub media_root: String,
    #[serde(default = "default_year")]
    pub default_year: String,
    #[serde(default = "default_month")]
    pub default_month: String,
}

fn default_media_root() -> String {
    Config::config_dir()
        .join("media")
        .to_string_lossy()
        .to_string()
}
fn default_year() -> String {
    "2024".to_string()
}
fn default_month() -> String {
    "01".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            media_root: default_media_root(),
            default_year: default_year(),
            default_month: default_month(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("driverlog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".driverlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("driverlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("driverlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Point the config at another database. Media files follow the database
    /// so that each database keeps its own uploads.
    pub fn with_database(mut self, db: &str) -> Self {
        self.database = db.to_string();
        self.media_root = Self::media_root_for(Path::new(db))
            .to_string_lossy()
            .to_string();
        self
    }

    fn media_root_for(db: &Path) -> PathBuf {
        let stem = db
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "driverlog".to_string());
        db.parent()
            .unwrap_or_else(|| Path::new("."))
            .join(format!("{stem}_media"))
    }

    /// File holding the token of the current login session, next to the database.
    pub fn session_file(&self) -> PathBuf {
        PathBuf::from(format!("{}.session", self.database))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        // same resolution as the global --db flag
        let db_path = match custom_name {
            Some(name) => PathBuf::from(name),
            None => Self::database_file(),
        };

        let config = Config::default().with_database(&db_path.to_string_lossy());

        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(&config.media_root)?;

        Ok(config)
    }
}
