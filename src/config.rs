use crate::distance::Metric;

/// How the initial centroid positions are chosen from the input points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitPolicy {
    /// Centroid `i` starts at `points[i]`. Deterministic and reproducible,
    /// but sensitive to input order and can place coinciding centroids when
    /// the leading points repeat.
    FirstK,

    /// Centroids start at `k` rows sampled uniformly without replacement,
    /// driven by the configured seed. Reduces the systematic bias of
    /// `FirstK`; still fully reproducible for a fixed seed.
    #[default]
    RandomDistinct,
}

/// Configuration for a clustering run.
///
/// Everything here is resolved before the run starts; there is no dynamic
/// reconfiguration mid-run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of clusters. Must satisfy `1 <= k <= number of points`.
    pub k: usize,

    /// Distance metric used for assignment and empty-cluster repair.
    pub metric: Metric,

    /// Iteration cap. `step()` past the cap is a flagged no-op; `run()`
    /// stops here if convergence never happens.
    pub max_iterations: usize,

    /// Centroid initialization policy.
    pub init: InitPolicy,

    /// Random seed for `InitPolicy::RandomDistinct`.
    pub seed: u64,

    /// Convergence tolerance. `None` (the default) means exact
    /// componentwise float equality against the previous iteration's
    /// centroids. `Some(eps)` is an explicit opt-in that treats centroids
    /// moved by at most `eps` per component as unmoved.
    pub tol: Option<f64>,

    /// Print per-iteration progress to stderr.
    pub verbose: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            k: 3,
            metric: Metric::Euclidean,
            max_iterations: 3,
            init: InitPolicy::default(),
            seed: 0,
            tol: None,
            verbose: false,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the distance metric
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the centroid initialization policy
    pub fn with_init(mut self, init: InitPolicy) -> Self {
        self.init = init;
        self
    }

    /// Set the random seed used by `InitPolicy::RandomDistinct`
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Opt in to epsilon-tolerant convergence
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = Some(tol);
        self
    }

    /// Set verbose mode
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
