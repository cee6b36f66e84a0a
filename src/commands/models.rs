use crate::utils::config::{DEFAULT_HOST, DEFAULT_PORT};
use std::path::PathBuf;

/// Arguments for the serve command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ServeArgs {
    /// Stats artifact to load
    pub stats_file: PathBuf,

    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            stats_file: PathBuf::from("profile.json"),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServeArgs {
    /// `host:port` string handed to the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
