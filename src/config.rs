//! Trim configuration resolved from CLI arguments with environment fallback.

use std::collections::HashMap;

/// Environment variable snapshot for configuration resolution
#[derive(Debug, Clone, Default)]
pub struct EnvironmentSnapshot {
    /// Map of environment variable names to values
    pub vars: HashMap<String, String>,
}

impl EnvironmentSnapshot {
    /// Capture the `CACHETRIM_*` variables from the current environment.
    pub fn from_current_env() -> Self {
        let mut vars = HashMap::new();
        for (key, value) in std::env::vars() {
            if key.starts_with("CACHETRIM_") {
                vars.insert(key, value);
            }
        }
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|s| s.as_str())
    }

    pub fn is_true(&self, key: &str) -> bool {
        self.get(key).unwrap_or("").to_lowercase() == "true"
    }

    pub fn parse<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key)?.parse().ok()
    }
}

/// Resolved trim settings. CLI values win over environment values.
#[derive(Debug, Clone)]
pub struct TrimConfig {
    /// Byte budget the cache is trimmed down to
    pub max_size_bytes: u64,
    /// Extra bytes to free beyond the budget
    pub headroom_bytes: u64,
    /// Delete evicted files instead of only logging them
    pub delete_files: bool,
}

impl TrimConfig {
    pub const DEFAULT_MAX_SIZE: u64 = 4 * 1024 * 1024 * 1024; // 4 GiB

    pub fn resolve(
        env: &EnvironmentSnapshot,
        max_size: Option<u64>,
        headroom: Option<u64>,
        delete: bool,
    ) -> Self {
        Self {
            max_size_bytes: max_size
                .or_else(|| env.parse("CACHETRIM_MAX_SIZE"))
                .unwrap_or(Self::DEFAULT_MAX_SIZE),
            headroom_bytes: headroom
                .or_else(|| env.parse("CACHETRIM_HEADROOM"))
                .unwrap_or(0),
            delete_files: delete || env.is_true("CACHETRIM_DELETE"),
        }
    }
}
