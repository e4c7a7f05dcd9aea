use std::env;

use thiserror::Error;

/// Environment variable overriding [`KernelConfig::block_size`].
pub const ENV_BLOCK_SIZE: &str = "TM_BLOCK_SIZE";
/// Environment variable overriding [`KernelConfig::parallel`].
pub const ENV_PARALLEL: &str = "TM_PARALLEL";
/// Environment variable overriding [`KernelConfig::parallel_min_rows`].
pub const ENV_PARALLEL_MIN_ROWS: &str = "TM_PARALLEL_MIN_ROWS";
/// Environment variable overriding [`KernelConfig::threads`].
pub const ENV_THREADS: &str = "TM_THREADS";

/// Default tile edge. Three 64x64 f64 tiles take 96 KiB, which sits in L2 on
/// current desktop parts.
pub const DEFAULT_BLOCK_SIZE: usize = 64;

/// Below this many output rows the parallel kernel runs serially.
pub const DEFAULT_PARALLEL_MIN_ROWS: usize = 128;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{var}: expected {expected}, got {value:?}")]
    InvalidValue {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("block size must be > 0")]
    ZeroBlockSize,
    #[error("thread count must be > 0")]
    ZeroThreads,
}

/// Tuning knobs for the CPU multiplication kernels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelConfig {
    /// Edge length of the square tiles the row, column and shared dimensions
    /// are cut into.
    pub block_size: usize,
    /// Distribute output row-blocks over worker threads.
    pub parallel: bool,
    /// Minimum number of output rows before the parallel path is taken.
    pub parallel_min_rows: usize,
    /// Size of a dedicated worker pool. `None` uses rayon's global pool.
    pub threads: Option<usize>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            parallel: cfg!(feature = "parallel"),
            parallel_min_rows: DEFAULT_PARALLEL_MIN_ROWS,
            threads: None,
        }
    }
}

impl KernelConfig {
    /// A configuration that never spawns worker threads.
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_parallel_min_rows(mut self, rows: usize) -> Self {
        self.parallel_min_rows = rows;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Start from the defaults and apply any `TM_*` environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`KernelConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup(ENV_BLOCK_SIZE) {
            config.block_size = parse_usize(ENV_BLOCK_SIZE, &v)?;
        }
        if let Some(v) = lookup(ENV_PARALLEL) {
            config.parallel = parse_bool(ENV_PARALLEL, &v)?;
        }
        if let Some(v) = lookup(ENV_PARALLEL_MIN_ROWS) {
            config.parallel_min_rows = parse_usize(ENV_PARALLEL_MIN_ROWS, &v)?;
        }
        if let Some(v) = lookup(ENV_THREADS) {
            config.threads = Some(parse_usize(ENV_THREADS, &v)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the kernels cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        Ok(())
    }
}

fn parse_usize(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            var,
            expected: "a non-negative integer",
            value: value.to_string(),
        })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            expected: "a boolean (0/1/true/false)",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let c = KernelConfig::default();
        assert_eq!(c.block_size, DEFAULT_BLOCK_SIZE);
        assert_eq!(c.parallel_min_rows, DEFAULT_PARALLEL_MIN_ROWS);
        assert_eq!(c.threads, None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_no_overrides() {
        let c = KernelConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(c, KernelConfig::default());
    }

    #[test]
    fn test_overrides() {
        let c = KernelConfig::from_lookup(lookup_from(&[
            (ENV_BLOCK_SIZE, "32"),
            (ENV_PARALLEL, "false"),
            (ENV_PARALLEL_MIN_ROWS, " 16 "),
            (ENV_THREADS, "4"),
        ]))
        .unwrap();
        assert_eq!(c.block_size, 32);
        assert!(!c.parallel);
        assert_eq!(c.parallel_min_rows, 16);
        assert_eq!(c.threads, Some(4));
    }

    #[test]
    fn test_invalid_number() {
        let err = KernelConfig::from_lookup(lookup_from(&[(ENV_BLOCK_SIZE, "big")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { var: ENV_BLOCK_SIZE, .. }
        ));
    }

    #[test]
    fn test_invalid_bool() {
        assert!(KernelConfig::from_lookup(lookup_from(&[(ENV_PARALLEL, "maybe")])).is_err());
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let err = KernelConfig::from_lookup(lookup_from(&[(ENV_BLOCK_SIZE, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroBlockSize);
        assert_eq!(
            KernelConfig::default().with_threads(Some(0)).validate(),
            Err(ConfigError::ZeroThreads)
        );
    }

    #[test]
    fn test_serial() {
        assert!(!KernelConfig::serial().parallel);
    }
}
