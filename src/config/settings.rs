use crate::client::DEFAULT_BASE_URL;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PetFriendsError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_BASE_URL: &str = "PETFRIENDS_BASE_URL";
pub const ENV_EMAIL: &str = "PETFRIENDS_EMAIL";
pub const ENV_PASSWORD: &str = "PETFRIENDS_PASSWORD";
pub const ENV_INVALID_EMAIL: &str = "PETFRIENDS_INVALID_EMAIL";
pub const ENV_INVALID_PASSWORD: &str = "PETFRIENDS_INVALID_PASSWORD";
pub const ENV_PHOTOS_DIR: &str = "PETFRIENDS_PHOTOS_DIR";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_INVALID_EMAIL: &str = "not_registered_user@mail.com";
const DEFAULT_INVALID_PASSWORD: &str = "wrong_password";
const DEFAULT_PHOTOS_DIR: &str = "images";

/// 測試套件的設定：服務位址、帳號與照片目錄
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub service: ServiceConfig,
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub photos: PhotosConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub valid_email: String,
    pub valid_password: String,
    #[serde(default = "default_invalid_email")]
    pub invalid_email: String,
    #[serde(default = "default_invalid_password")]
    pub invalid_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotosConfig {
    #[serde(default = "default_photos_dir")]
    pub directory: PathBuf,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            directory: default_photos_dir(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_invalid_email() -> String {
    DEFAULT_INVALID_EMAIL.to_string()
}

fn default_invalid_password() -> String {
    DEFAULT_INVALID_PASSWORD.to_string()
}

fn default_photos_dir() -> PathBuf {
    PathBuf::from(DEFAULT_PHOTOS_DIR)
}

impl Settings {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PetFriendsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 沒有設定檔時，完全由環境變數組成
    pub fn from_env() -> Result<Self> {
        let required = |name: &str, field: &str| {
            std::env::var(name).map_err(|_| PetFriendsError::MissingConfigError {
                field: format!("{} ({})", field, name),
            })
        };

        Ok(Self {
            service: ServiceConfig {
                base_url: std::env::var(ENV_BASE_URL).unwrap_or_else(|_| default_base_url()),
                timeout_seconds: None,
            },
            credentials: CredentialsConfig {
                valid_email: required(ENV_EMAIL, "credentials.valid_email")?,
                valid_password: required(ENV_PASSWORD, "credentials.valid_password")?,
                invalid_email: std::env::var(ENV_INVALID_EMAIL)
                    .unwrap_or_else(|_| default_invalid_email()),
                invalid_password: std::env::var(ENV_INVALID_PASSWORD)
                    .unwrap_or_else(|_| default_invalid_password()),
            },
            photos: PhotosConfig {
                directory: std::env::var(ENV_PHOTOS_DIR)
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_photos_dir()),
            },
        })
    }

    /// 替換環境變數 (例如 ${PETFRIENDS_PASSWORD})，找不到的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PetFriendsError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.service.base_url = base_url;
        }
        self
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("service.base_url", &self.service.base_url)?;

        if let Some(timeout) = self.service.timeout_seconds {
            validation::validate_positive_number("service.timeout_seconds", timeout, 1)?;
        }

        let credentials = [
            ("credentials.valid_email", &self.credentials.valid_email),
            ("credentials.valid_password", &self.credentials.valid_password),
            ("credentials.invalid_email", &self.credentials.invalid_email),
            ("credentials.invalid_password", &self.credentials.invalid_password),
        ];
        for (field, value) in credentials {
            validation::validate_substituted(field, value)?;
            validation::validate_non_empty_string(field, value)?;
        }

        let directory = self.photos.directory.to_string_lossy();
        validation::validate_path("photos.directory", &directory)?;

        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.service.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.service.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn valid_email(&self) -> &str {
        &self.credentials.valid_email
    }

    fn valid_password(&self) -> &str {
        &self.credentials.valid_password
    }

    fn invalid_email(&self) -> &str {
        &self.credentials.invalid_email
    }

    fn invalid_password(&self) -> &str {
        &self.credentials.invalid_password
    }

    fn photos_dir(&self) -> &Path {
        &self.photos.directory
    }
}
