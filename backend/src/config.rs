use crate::game::TerminalMovePolicy;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "CONNECT_FOUR_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "connect_four.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Validation(String),
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    // Start a new game when a move arrives after a win or a draw, instead of
    // rejecting the move
    pub auto_reset_on_terminal_move: bool,
    pub log_dir: PathBuf,
    pub log_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            auto_reset_on_terminal_move: true,
            log_dir: PathBuf::from("./logs"),
            log_file: "server.log".to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads the file named by `CONNECT_FOUR_CONFIG`, or `connect_four.toml`
    /// in the working directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_or_default(&path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    // Logging is not set up yet when the config is read, so warnings go to stderr
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!(
                "Warning: config file '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Validation("port must be > 0".into()));
        }
        if self.log_file.trim().is_empty() {
            return Err(ConfigError::Validation("log_file must not be empty".into()));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    pub fn terminal_move_policy(&self) -> TerminalMovePolicy {
        if self.auto_reset_on_terminal_move {
            TerminalMovePolicy::AutoReset
        } else {
            TerminalMovePolicy::Reject
        }
    }
}
