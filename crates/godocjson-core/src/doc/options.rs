//! Configuration for the flattening pass

/// Default threshold for parallel conversion (declarations per list)
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 512;

/// Options controlling how a package is flattened
///
/// Output never depends on these settings, only the work schedule does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Declaration lists longer than this are converted in parallel
    pub parallel_threshold: usize,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl FlattenOptions {
    /// Create the default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parallelization threshold
    ///
    /// Set to 0 to always parallelize, or `usize::MAX` to never do so.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Options that keep everything on the calling thread
    #[must_use]
    pub fn sequential() -> Self {
        Self::new().with_parallel_threshold(usize::MAX)
    }

    /// Check if a list of `len` declarations should be converted in parallel
    #[must_use]
    pub fn should_parallelize(&self, len: usize) -> bool {
        len > self.parallel_threshold
    }
}
