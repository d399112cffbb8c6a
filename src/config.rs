//! Configuration for mcpickle
//!
//! Centralized configuration with sensible defaults.

use crate::error::{McError, Result};
use crate::ring::{self, HashKind};

/// Main configuration for a mcpickle client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Cluster Configuration
    // -------------------------------------------------------------------------
    /// Cache nodes as `host:port` strings.
    ///
    /// The text is hashed as written; names are never resolved before
    /// placement on the ring.
    pub servers: Vec<String>,

    // -------------------------------------------------------------------------
    // Ring Configuration
    // -------------------------------------------------------------------------
    /// Ring points generated for each server (uniform, non-weighted)
    pub points_per_server: usize,

    /// Hash function used for both ring points and keys
    pub hash: HashKind,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP connect timeout (milliseconds, 0 = OS default)
    pub connect_timeout_ms: u64,

    /// Connection read timeout (milliseconds, 0 = none)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = none)
    pub write_timeout_ms: u64,

    /// Expiration sent with every set (seconds, 0 = never)
    pub exptime: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            servers: vec!["127.0.0.1:11211".to_string()],
            points_per_server: ring::DEFAULT_POINTS_PER_SERVER,
            hash: HashKind::Jenkins,
            connect_timeout_ms: 1000,
            read_timeout_ms: 1000,
            write_timeout_ms: 1000,
            exptime: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the configuration can build a ring
    pub fn validate(&self) -> Result<()> {
        if self.servers.is_empty() {
            return Err(McError::Config("at least one server is required".to_string()));
        }
        if self.points_per_server == 0 {
            return Err(McError::Config(
                "points_per_server must be greater than zero".to_string(),
            ));
        }
        for server in &self.servers {
            ring::validate_node_addr(server)
                .map_err(|e| McError::Config(e.to_string()))?;
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Replace the server list
    pub fn servers<I, S>(mut self, servers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.servers = servers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the number of ring points per server
    pub fn points_per_server(mut self, points: usize) -> Self {
        self.config.points_per_server = points;
        self
    }

    /// Set the ring hash function
    pub fn hash(mut self, hash: HashKind) -> Self {
        self.config.hash = hash;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the expiration used for sets (in seconds)
    pub fn exptime(mut self, seconds: u32) -> Self {
        self.config.exptime = seconds;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
