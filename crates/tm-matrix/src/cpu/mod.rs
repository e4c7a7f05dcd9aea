pub mod matmul;
#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(feature = "parallel")]
use std::sync::Arc;

use crate::backend::{check_operands, MatmulBackend};
use crate::config::{ConfigError, KernelConfig};
use crate::error::Result;
use crate::shape::Shape;
use crate::storage::CpuStorage;

/// Textbook triple loop. Kept as the correctness reference and as the
/// baseline the blocked kernel is measured against.
#[derive(Debug, Clone, Default)]
pub struct NaiveBackend;

impl NaiveBackend {
    pub fn new() -> Self {
        NaiveBackend
    }
}

impl MatmulBackend for NaiveBackend {
    fn name(&self) -> &str {
        "naive"
    }

    fn matmul(&self, a: &[f64], b: &[f64], m: usize, k: usize, n: usize) -> Result<Vec<f64>> {
        check_operands(a, b, m, k, n)?;
        let mut c = CpuStorage::zeros(Shape::new(m, n))?.into_vec();
        matmul::matmul_naive(a, b, &mut c, m, k, n);
        Ok(c)
    }
}

/// Cache-blocked CPU kernel.
///
/// Runs the tiled loop nest from [`matmul::matmul_blocked`] and, when the
/// `parallel` feature is on and the output is tall enough, spreads output
/// row-blocks over a rayon pool.
#[derive(Debug, Clone)]
pub struct CpuBackend {
    config: KernelConfig,
    #[cfg(feature = "parallel")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl CpuBackend {
    /// Backend with the default configuration.
    pub fn new() -> Self {
        CpuBackend {
            config: KernelConfig::default(),
            #[cfg(feature = "parallel")]
            pool: None,
        }
    }

    /// Backend that never leaves the calling thread.
    pub fn serial() -> Self {
        CpuBackend {
            config: KernelConfig::serial(),
            #[cfg(feature = "parallel")]
            pool: None,
        }
    }

    /// Backend with an explicit configuration.
    ///
    /// If `config.threads` is set, a dedicated pool of that size is built
    /// once here and reused by every call. Should the pool fail to start,
    /// the backend logs a warning and uses the global pool instead.
    ///
    /// # Errors
    /// Returns the validation error for a zero block size or thread count.
    pub fn with_config(config: KernelConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        #[cfg(feature = "parallel")]
        let pool = match config.threads {
            Some(threads) if config.parallel => match rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("tm-worker-{i}"))
                .build()
            {
                Ok(pool) => Some(Arc::new(pool)),
                Err(e) => {
                    log::warn!("failed to build {threads}-thread pool, using global pool: {e}");
                    None
                }
            },
            _ => None,
        };

        Ok(CpuBackend {
            config,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    fn use_parallel(&self, m: usize) -> bool {
        cfg!(feature = "parallel")
            && self.config.parallel
            && m >= self.config.parallel_min_rows
            && m > self.config.block_size
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(&self, a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
        let bs = self.config.block_size;
        match &self.pool {
            Some(pool) => pool.install(|| parallel::matmul_blocked_parallel(a, b, c, m, k, n, bs)),
            None => parallel::matmul_blocked_parallel(a, b, c, m, k, n, bs),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel(&self, a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
        matmul::matmul_blocked(a, b, c, m, k, n, self.config.block_size);
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MatmulBackend for CpuBackend {
    fn name(&self) -> &str {
        "blocked"
    }

    fn matmul(&self, a: &[f64], b: &[f64], m: usize, k: usize, n: usize) -> Result<Vec<f64>> {
        check_operands(a, b, m, k, n)?;
        let mut c = CpuStorage::zeros(Shape::new(m, n))?.into_vec();

        let parallel = self.use_parallel(m);
        log::debug!(
            "{}: [{}x{}] @ [{}x{}], block {}, parallel {}",
            self.name(),
            m,
            k,
            k,
            n,
            self.config.block_size,
            parallel
        );

        if parallel {
            self.run_parallel(a, b, &mut c, m, k, n);
        } else {
            matmul::matmul_blocked(a, b, &mut c, m, k, n, self.config.block_size);
        }
        Ok(c)
    }
}
