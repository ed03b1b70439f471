//! Pool configuration
//!
//! ## Configuration (Environment Variables)
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `STACKPOOL_CAPACITY` | `0` | Stack nodes reserved up front |
//! | `STACKPOOL_POLICY` | `growable` | `growable` or `fixed` |
//! | `STACKPOOL_STRICT_POP` | `false` | Popping an empty stack is an error |
//!
//! ## Configuration (TOML)
//!
//! ```toml
//! capacity = 1024
//! policy = "fixed"
//! strict_pop = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// What happens when every reserved slot is in use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityPolicy {
    /// Grow the arena on demand (default)
    #[default]
    Growable,
    /// Never exceed `capacity`; push fails with `PoolExhausted`
    Fixed,
}

impl CapacityPolicy {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "growable" | "grow" => Some(CapacityPolicy::Growable),
            "fixed" => Some(CapacityPolicy::Fixed),
            _ => None,
        }
    }
}

/// Configuration for a [`StackPool`](crate::StackPool)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Stack nodes reserved when the pool is initialized
    pub capacity: usize,

    /// Whether the arena may grow past `capacity`
    pub policy: CapacityPolicy,

    /// Reject `pop` on the sentinel instead of treating it as a no-op
    pub strict_pop: bool,
}

impl PoolConfig {
    /// Create a default configuration (growable, nothing reserved, permissive pop)
    pub fn new() -> Self {
        PoolConfig::default()
    }

    /// Set the number of nodes reserved up front
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the capacity policy
    pub fn with_policy(mut self, policy: CapacityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fixed pool of exactly `capacity` nodes
    pub fn fixed(capacity: usize) -> Self {
        PoolConfig::new()
            .with_capacity(capacity)
            .with_policy(CapacityPolicy::Fixed)
    }

    /// Enable or disable strict pop
    pub fn with_strict_pop(mut self, strict: bool) -> Self {
        self.strict_pop = strict;
        self
    }

    /// Largest number of slots the arena may hold, if bounded
    pub fn slot_limit(&self) -> Option<usize> {
        match self.policy {
            CapacityPolicy::Growable => None,
            CapacityPolicy::Fixed => Some(self.capacity),
        }
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse pool config: {}", e))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&content)
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparseable variables keep their defaults.
    pub fn from_env() -> Self {
        let capacity = std::env::var("STACKPOOL_CAPACITY")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0);

        let policy = std::env::var("STACKPOOL_POLICY")
            .ok()
            .and_then(|s| CapacityPolicy::parse(&s))
            .unwrap_or_default();

        let strict_pop = std::env::var("STACKPOOL_STRICT_POP")
            .ok()
            .map(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            capacity,
            policy,
            strict_pop,
        }
    }
}
