use crate::algorithm::{
    assign_points, centroids_converged, init_centroids, repair_empty_clusters, update_centroids,
};
use crate::config::EngineConfig;
use crate::distance::Metric;
use crate::error::EngineError;
use ndarray::{Array2, ArrayView2};

/// Snapshot of engine state after one iteration, handed to callers and
/// visualizers. Owns its data, so the engine cannot be mutated through it.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Point row indices per centroid index. Disjoint; their union covers
    /// every point.
    pub clusters: Vec<Vec<usize>>,

    /// Centroid positions, shape `(k, dim)`, in stable index order.
    pub centroids: Array2<f64>,

    /// Number of iterations completed so far.
    pub iteration: usize,

    /// True iff no centroid moved during the last completed iteration.
    pub converged: bool,

    /// True iff this call arrived after the iteration cap was already
    /// reached, making it a no-op.
    pub cap_reached: bool,
}

/// Consumer of per-iteration clustering output.
///
/// Rendering, per-cluster color assignment (one stable color per centroid
/// index), and playback timing all live behind this seam; the engine only
/// hands over centroid positions and memberships after each step. Cluster
/// membership and per-cluster counts may change between calls, including
/// transient single-member clusters.
pub trait Visualizer {
    fn on_step(&mut self, result: &StepResult);
}

/// Step-wise k-means clustering over a fixed point set.
///
/// The engine owns the points, centroids, and cluster assignment, and runs
/// one full iteration per [`step`](ClusterEngine::step) call: snapshot →
/// assign → repair empty clusters → update centroids → check convergence.
/// It is single-threaded and deterministic given its inputs; independent
/// engines (for example a Euclidean and a Manhattan run over the same data)
/// share no state and may be driven side by side.
///
/// # Example
///
/// ```
/// use kmeans_engine::{ClusterEngine, EngineConfig, InitPolicy};
/// use ndarray::array;
///
/// let points = array![[1.0, 1.0], [1.0, 6.0], [2.0, 1.0]];
/// let config = EngineConfig::new(2).with_init(InitPolicy::FirstK);
///
/// let mut engine = ClusterEngine::new(points, config).unwrap();
/// let result = engine.step().unwrap();
///
/// assert_eq!(result.clusters, vec![vec![0, 2], vec![1]]);
/// assert_eq!(result.centroids, array![[1.5, 1.0], [1.0, 6.0]]);
/// ```
pub struct ClusterEngine {
    points: Array2<f64>,
    centroids: Array2<f64>,
    clusters: Vec<Vec<usize>>,
    iteration: usize,
    converged: bool,
    config: EngineConfig,
}

impl ClusterEngine {
    /// Create an engine over `points` (shape `(n, dim)`), initializing
    /// centroids per the configured policy.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if `k` is 0 or larger
    /// than `n`, if the point set is empty or zero-dimensional, or if the
    /// iteration cap is 0.
    pub fn new(points: Array2<f64>, config: EngineConfig) -> Result<Self, EngineError> {
        let n = points.nrows();

        if points.ncols() == 0 {
            return Err(EngineError::InvalidConfiguration(
                "points must have at least one dimension".to_string(),
            ));
        }
        if config.k == 0 {
            return Err(EngineError::InvalidConfiguration(
                "k must be greater than 0".to_string(),
            ));
        }
        if n < config.k {
            return Err(EngineError::InvalidConfiguration(format!(
                "number of points ({}) is less than k ({})",
                n, config.k
            )));
        }
        if config.max_iterations == 0 {
            return Err(EngineError::InvalidConfiguration(
                "max_iterations must be greater than 0".to_string(),
            ));
        }

        let centroids = init_centroids(&points.view(), config.k, config.init, config.seed);

        Ok(Self {
            points,
            centroids,
            clusters: Vec::new(),
            iteration: 0,
            converged: false,
            config,
        })
    }

    /// Run one full iteration and return the resulting state.
    ///
    /// Calls past the iteration cap do not touch engine state; they return
    /// the last state with `cap_reached = true` and `converged = false`, so
    /// callers may poll freely. The engine never auto-stops: stopping once
    /// `converged` is true or the cap is hit is the caller's job (or use
    /// [`run`](ClusterEngine::run)).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DegenerateClusteringState`] if an empty
    /// cluster cannot be repaired. This cannot happen when `n >= k`.
    pub fn step(&mut self) -> Result<StepResult, EngineError> {
        if self.iteration >= self.config.max_iterations {
            let mut result = self.snapshot(true);
            result.converged = false;
            return Ok(result);
        }

        let previous = self.centroids.clone();

        self.clusters = assign_points(&self.points.view(), &self.centroids.view(), self.config.metric);
        repair_empty_clusters(
            &self.points.view(),
            &self.centroids.view(),
            &mut self.clusters,
            self.config.metric,
        )?;
        update_centroids(&self.points.view(), &self.clusters, &mut self.centroids);

        self.converged = centroids_converged(&previous, &self.centroids, self.config.tol);
        self.iteration += 1;

        if self.config.verbose {
            eprintln!(
                "iteration {}/{}: converged = {}",
                self.iteration, self.config.max_iterations, self.converged
            );
        }

        Ok(self.snapshot(false))
    }

    /// Step until convergence or the iteration cap, returning the last
    /// result. Equivalent to driving [`step`](ClusterEngine::step)
    /// externally, for callers that do not need per-iteration output.
    pub fn run(&mut self) -> Result<StepResult, EngineError> {
        let mut last = self.step()?;
        while !self.converged && self.iteration < self.config.max_iterations {
            last = self.step()?;
        }
        Ok(last)
    }

    /// Like [`run`](ClusterEngine::run), but hands every per-iteration
    /// result to `visualizer` as it is produced.
    pub fn run_with<V: Visualizer>(
        &mut self,
        visualizer: &mut V,
    ) -> Result<StepResult, EngineError> {
        let mut last = self.step()?;
        visualizer.on_step(&last);
        while !self.converged && self.iteration < self.config.max_iterations {
            last = self.step()?;
            visualizer.on_step(&last);
        }
        Ok(last)
    }

    /// The point set, shape `(n, dim)`.
    pub fn points(&self) -> ArrayView2<f64> {
        self.points.view()
    }

    /// Current centroid positions, shape `(k, dim)`.
    pub fn centroids(&self) -> ArrayView2<f64> {
        self.centroids.view()
    }

    /// Current cluster memberships by centroid index. Empty before the
    /// first step.
    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    /// Number of iterations completed.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Whether the last completed iteration left every centroid unmoved.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Point dimensionality.
    pub fn dim(&self) -> usize {
        self.points.ncols()
    }

    /// The active distance metric.
    pub fn metric(&self) -> Metric {
        self.config.metric
    }

    /// The configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn snapshot(&self, cap_reached: bool) -> StepResult {
        StepResult {
            clusters: self.clusters.clone(),
            centroids: self.centroids.clone(),
            iteration: self.iteration,
            converged: self.converged,
            cap_reached,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InitPolicy;
    use ndarray::array;

    fn engine(points: Array2<f64>, k: usize) -> ClusterEngine {
        let config = EngineConfig::new(k).with_init(InitPolicy::FirstK);
        ClusterEngine::new(points, config).unwrap()
    }

    #[test]
    fn test_rejects_k_zero() {
        let points = array![[1.0, 1.0], [2.0, 2.0]];
        let result = ClusterEngine::new(points, EngineConfig::new(0));
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_k_above_point_count() {
        let points = array![[1.0, 1.0], [2.0, 2.0]];
        let result = ClusterEngine::new(points, EngineConfig::new(3));
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_empty_points() {
        let points = Array2::<f64>::zeros((0, 2));
        let result = ClusterEngine::new(points, EngineConfig::new(1));
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let points = Array2::<f64>::zeros((3, 0));
        let result = ClusterEngine::new(points, EngineConfig::new(1));
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_zero_iteration_cap() {
        let points = array![[1.0, 1.0], [2.0, 2.0]];
        let result = ClusterEngine::new(points, EngineConfig::new(1).with_max_iterations(0));
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_first_step_scenario() {
        let points = array![[1.0, 1.0], [1.0, 6.0], [2.0, 1.0]];
        let mut engine = engine(points, 2);

        assert_eq!(engine.centroids(), array![[1.0, 1.0], [1.0, 6.0]]);

        let result = engine.step().unwrap();

        // (2,1) is at distance 1 from centroid 0 and ~5.1 from centroid 1.
        assert_eq!(result.clusters, vec![vec![0, 2], vec![1]]);
        assert_eq!(result.centroids, array![[1.5, 1.0], [1.0, 6.0]]);
        assert_eq!(result.iteration, 1);
        assert!(!result.converged);
        assert!(!result.cap_reached);
    }

    #[test]
    fn test_second_step_converges() {
        let points = array![[1.0, 1.0], [1.0, 6.0], [2.0, 1.0]];
        let mut engine = engine(points, 2);

        engine.step().unwrap();
        let result = engine.step().unwrap();

        // Same assignment, same means: a fixed point.
        assert!(result.converged);
        assert_eq!(result.centroids, array![[1.5, 1.0], [1.0, 6.0]]);
    }

    #[test]
    fn test_step_past_cap_is_flagged_noop() {
        let points = array![[1.0, 1.0], [1.0, 6.0], [2.0, 1.0]];
        let config = EngineConfig::new(2)
            .with_init(InitPolicy::FirstK)
            .with_max_iterations(1);
        let mut engine = ClusterEngine::new(points, config).unwrap();

        let first = engine.step().unwrap();
        let second = engine.step().unwrap();

        assert!(second.cap_reached);
        assert!(!second.converged);
        assert_eq!(second.iteration, first.iteration);
        assert_eq!(second.centroids, first.centroids);
        assert_eq!(second.clusters, first.clusters);
    }

    #[test]
    fn test_empty_cluster_repair_via_duplicate_points() {
        // Duplicate leading points make both initial centroids coincide,
        // so assignment leaves cluster 1 empty.
        let points = array![[0.0, 0.0], [0.0, 0.0], [0.0, 1.0]];
        let mut engine = engine(points, 2);

        let result = engine.step().unwrap();

        for members in &result.clusters {
            assert!(!members.is_empty());
        }
        assert_eq!(result.clusters, vec![vec![1, 2], vec![0]]);
        assert_eq!(result.centroids, array![[0.0, 0.5], [0.0, 0.0]]);
        for &value in result.centroids.iter() {
            assert!(value.is_finite());
        }
    }

    #[test]
    fn test_metric_changes_assignment() {
        // (3,4) vs centroids (0,0) and (9,4): Euclidean 5 < 6, Manhattan 7 > 6.
        let points = array![[0.0, 0.0], [9.0, 4.0], [3.0, 4.0]];

        let mut euclidean = ClusterEngine::new(
            points.clone(),
            EngineConfig::new(2).with_init(InitPolicy::FirstK),
        )
        .unwrap();
        let mut manhattan = ClusterEngine::new(
            points,
            EngineConfig::new(2)
                .with_init(InitPolicy::FirstK)
                .with_metric(Metric::Manhattan),
        )
        .unwrap();

        let e = euclidean.step().unwrap();
        let m = manhattan.step().unwrap();

        assert_eq!(e.clusters, vec![vec![0, 2], vec![1]]);
        assert_eq!(m.clusters, vec![vec![0], vec![1, 2]]);
    }

    #[test]
    fn test_run_stops_at_convergence() {
        let points = array![[1.0, 1.0], [1.0, 6.0], [2.0, 1.0]];
        let config = EngineConfig::new(2)
            .with_init(InitPolicy::FirstK)
            .with_max_iterations(50);
        let mut engine = ClusterEngine::new(points, config).unwrap();

        let result = engine.run().unwrap();

        assert!(result.converged);
        assert!(result.iteration < 50);
        assert_eq!(result.centroids, array![[1.5, 1.0], [1.0, 6.0]]);
    }

    #[test]
    fn test_run_with_reports_every_step() {
        struct Recorder {
            iterations: Vec<usize>,
        }
        impl Visualizer for Recorder {
            fn on_step(&mut self, result: &StepResult) {
                self.iterations.push(result.iteration);
            }
        }

        let points = array![[1.0, 1.0], [1.0, 6.0], [2.0, 1.0]];
        let config = EngineConfig::new(2)
            .with_init(InitPolicy::FirstK)
            .with_max_iterations(50);
        let mut engine = ClusterEngine::new(points, config).unwrap();

        let mut recorder = Recorder { iterations: Vec::new() };
        let result = engine.run_with(&mut recorder).unwrap();

        let expected: Vec<usize> = (1..=result.iteration).collect();
        assert_eq!(recorder.iterations, expected);
    }
}
