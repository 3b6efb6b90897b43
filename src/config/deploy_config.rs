use crate::core::client::DEFAULT_API_URL;
use crate::core::lint::default_lint_commands;
use crate::core::ConfigProvider;
use crate::utils::error::{ComponentError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "dc-component.toml";
pub const DEFAULT_ARCHIVE_NAME: &str = "custom_component.zip";

pub const API_URL_ENV: &str = "API_URL";
pub const API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub package: PackageConfig,
    #[serde(default)]
    pub lint: LintConfig,
    #[serde(default)]
    pub booster: BoosterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_lint_commands")]
    pub commands: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoosterConfig {
    #[serde(default)]
    pub rules: Vec<BoostRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostRule {
    pub pattern: String,
    pub boost: f64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_root() -> String {
    ".".to_string()
}

fn default_output() -> String {
    DEFAULT_ARCHIVE_NAME.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            timeout_seconds: None,
        }
    }
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            output: default_output(),
            exclude: Vec::new(),
        }
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            commands: default_lint_commands(),
        }
    }
}

impl DeployConfig {
    /// 載入配置：指定檔案 > 目前目錄的 dc-component.toml > 預設值，最後套用環境變數
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => {
                tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(ComponentError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ComponentError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_KEY})，未設定的保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(API_KEY_ENV).ok(),
        );
    }

    /// 空字串不覆蓋；未解析的 ${VAR} 視為未設定
    pub fn apply_overrides(&mut self, api_url: Option<String>, api_key: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.platform.api_url = url;
        }
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.platform.api_key = Some(key);
        }
        if self
            .platform
            .api_key
            .as_deref()
            .is_some_and(|k| k.trim().is_empty() || k.contains("${"))
        {
            self.platform.api_key = None;
        }
    }

    pub fn root(&self) -> PathBuf {
        PathBuf::from(&self.package.root)
    }

    pub fn output(&self) -> PathBuf {
        PathBuf::from(&self.package.output)
    }

    pub fn boost_rules(&self) -> impl Iterator<Item = (&str, f64)> {
        self.booster
            .rules
            .iter()
            .map(|rule| (rule.pattern.as_str(), rule.boost))
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("platform.api_url", &self.platform.api_url)?;
        validation::validate_path("package.root", &self.package.root)?;
        validation::validate_path("package.output", &self.package.output)?;

        if let Some(timeout) = self.platform.timeout_seconds {
            validation::validate_positive_number("platform.timeout_seconds", timeout, 1)?;
        }

        for (index, command) in self.lint.commands.iter().enumerate() {
            match command.first() {
                Some(program) => {
                    validation::validate_non_empty_string(&format!("lint.commands[{}]", index), program)?
                }
                None => {
                    return Err(ComponentError::InvalidConfigValueError {
                        field: format!("lint.commands[{}]", index),
                        value: "[]".to_string(),
                        reason: "Lint command cannot be empty".to_string(),
                    })
                }
            }
        }

        for rule in &self.booster.rules {
            validation::validate_non_empty_string("booster.rules.pattern", &rule.pattern)?;
            validation::validate_boost_factor(
                &format!("booster.rules[{}]", rule.pattern),
                rule.boost,
            )?;
        }

        Ok(())
    }
}

impl ConfigProvider for DeployConfig {
    fn api_url(&self) -> &str {
        &self.platform.api_url
    }

    fn api_key(&self) -> Option<&str> {
        self.platform.api_key.as_deref()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.platform.timeout_seconds
    }
}

impl Validate for DeployConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
