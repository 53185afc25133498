// File: src/config.rs
// Purpose: Configuration parsing from rssr.toml plus environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub dev: DevConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,
}

/// Runtime mode; decides how much failure detail reaches the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    pub fn is_development(self) -> bool {
        self == Mode::Development
    }
}

impl std::str::FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => anyhow::bail!("unknown mode `{}`", other),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Base used to turn request targets into absolute URLs
    #[serde(default = "default_app_url")]
    pub app_url: String,

    #[serde(default)]
    pub mode: Mode,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Directory containing route modules on disk (default: "src/routes")
    #[serde(default = "default_routes_dir")]
    pub routes_dir: String,

    /// Prefix stripped from registered module paths (default: "routes")
    #[serde(default = "default_routes_root")]
    pub routes_root: String,

    /// File extensions recognised as route modules
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Development configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevConfig {
    #[serde(default = "default_true")]
    pub hot_reload: bool,

    #[serde(default = "default_watch_paths")]
    pub watch_paths: Vec<String>,
}

// Default values
fn default_name() -> String {
    "rssr-app".to_string()
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_app_url() -> String {
    "http://localhost".to_string()
}

fn default_routes_dir() -> String {
    "src/routes".to_string()
}

fn default_routes_root() -> String {
    "routes".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["rs".to_string()]
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_watch_paths() -> Vec<String> {
    vec!["src".to_string(), "static".to_string()]
}

fn default_true() -> bool {
    true
}

// Default implementations
impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            app_url: default_app_url(),
            mode: Mode::default(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            routes_dir: default_routes_dir(),
            routes_root: default_routes_root(),
            extensions: default_extensions(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
        }
    }
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            hot_reload: true,
            watch_paths: default_watch_paths(),
        }
    }
}

impl Config {
    /// Load configuration from rssr.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./rssr.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("rssr.toml")
    }

    /// Apply `PORT`, `HOST`, `APP_URL`, `APP_ENV` and `HOT_RELOAD` overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("PORT is not a valid port: {port}"))?;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(app_url) = lookup("APP_URL") {
            self.server.app_url = app_url;
        }
        if let Some(mode) = lookup("APP_ENV") {
            self.server.mode = mode.parse()?;
        }
        if let Some(hot_reload) = lookup("HOT_RELOAD") {
            self.dev.hot_reload = hot_reload.parse().unwrap_or(self.dev.hot_reload);
        }
        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.server.mode.is_development()
    }
}
