//! Configuration module for hooksmith.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file (`.claude/hooksmith.toml`)
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `HOOKSMITH_` and use double
//! underscores to separate nested levels:
//! - `HOOKSMITH_INDEXING__MAX_FILE_SIZE=50000` sets `indexing.max_file_size`
//! - `HOOKSMITH_VALIDATION__TIMEOUT_SECS=10` sets `validation.timeout_secs`
//! - `HOOKSMITH_LOGGING__DEFAULT=debug` sets `logging.default`
//!
//! The project root itself comes from `CLAUDE_PROJECT_DIR`, which the host sets
//! for every hook invocation.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Directory under the project root holding all hook state.
pub const STATE_DIR: &str = ".claude";

/// Configuration file name inside [`STATE_DIR`].
pub const CONFIG_FILE: &str = "hooksmith.toml";

/// Environment variable the host uses to announce the project root.
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Indexing configuration
    #[serde(default)]
    pub indexing: IndexingConfig,

    /// Context injection configuration
    #[serde(default)]
    pub context: ContextConfig,

    /// Post-edit validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IndexingConfig {
    /// Directory names pruned from the walk wherever they appear
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,

    /// Files larger than this many bytes get default metadata only
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// File names always classified as critical configuration
    #[serde(default = "default_config_files")]
    pub config_files: Vec<String>,

    /// Also apply .gitignore rules while walking
    #[serde(default = "default_false")]
    pub respect_gitignore: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ContextConfig {
    /// Prompt patterns (case-insensitive regex) that trigger the readup injection
    #[serde(default = "default_readup_patterns")]
    pub readup_patterns: Vec<String>,

    /// Maximum number of critical files listed at session start
    #[serde(default = "default_max_critical_files")]
    pub max_critical_files: usize,

    /// Maximum number of pending todos listed in any summary
    #[serde(default = "default_max_pending_todos")]
    pub max_pending_todos: usize,

    /// Maximum number of README characters injected on readup
    #[serde(default = "default_readme_chars")]
    pub readme_chars: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ValidationConfig {
    /// Interpreter used for the Python compile-only check
    #[serde(default = "default_python")]
    pub python: String,

    /// Timeout for the syntax-check subprocess
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extensions (without dot) that are never validated
    #[serde(default = "default_skip_extensions")]
    pub skip_extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level for all targets
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target level overrides
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_false() -> bool {
    false
}
fn default_max_file_size() -> u64 {
    100_000
}
fn default_max_critical_files() -> usize {
    10
}
fn default_max_pending_todos() -> usize {
    5
}
fn default_readme_chars() -> usize {
    2000
}
fn default_python() -> String {
    "python3".to_string()
}
fn default_timeout_secs() -> u64 {
    5
}
fn default_log_level() -> String {
    "warn".to_string()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_excluded_dirs() -> Vec<String> {
    strings(&[
        ".git",
        "node_modules",
        "__pycache__",
        ".pytest_cache",
        "dist",
        "build",
        "target",
        ".next",
        ".venv",
        "env",
    ])
}

fn default_config_files() -> Vec<String> {
    strings(&[
        "package.json",
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "Cargo.toml",
        "Cargo.lock",
        "pyproject.toml",
        "poetry.lock",
        "requirements.txt",
        "go.mod",
        "docker-compose.yml",
        "docker-compose.yaml",
        ".env.example",
    ])
}

fn default_readup_patterns() -> Vec<String> {
    strings(&[
        r"/readup",
        r"understand.*project",
        r"explain.*codebase",
        r"what.*files.*here",
        r"project.*structure",
        r"how.*organized",
        r"architecture",
    ])
}

fn default_skip_extensions() -> Vec<String> {
    strings(&["md", "txt", "json", "yml", "yaml", "toml"])
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            indexing: IndexingConfig::default(),
            context: ContextConfig::default(),
            validation: ValidationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: default_excluded_dirs(),
            max_file_size: default_max_file_size(),
            config_files: default_config_files(),
            respect_gitignore: false,
        }
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            readup_patterns: default_readup_patterns(),
            max_critical_files: default_max_critical_files(),
            max_pending_todos: default_max_pending_todos(),
            readme_chars: default_readme_chars(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            timeout_secs: default_timeout_secs(),
            skip_extensions: default_skip_extensions(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration for a project from all sources.
    ///
    /// Layers, lowest precedence first: defaults, `<root>/.claude/hooksmith.toml`,
    /// `HOOKSMITH_*` environment variables.
    pub fn load(project_root: &Path) -> Result<Self, Box<figment::Error>> {
        Self::load_from(Self::config_path(project_root))
    }

    /// Load configuration from a specific file (missing files are skipped).
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nested levels, single underscores stay
            .merge(Env::prefixed("HOOKSMITH_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Path of the configuration file for a project.
    pub fn config_path(project_root: &Path) -> PathBuf {
        project_root.join(STATE_DIR).join(CONFIG_FILE)
    }

    /// Resolve the project root: `CLAUDE_PROJECT_DIR` or the current directory.
    pub fn project_root() -> PathBuf {
        std::env::var_os(PROJECT_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file for a project.
    pub fn init_config_file(
        project_root: &Path,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = Self::config_path(project_root);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }
}
