//! # kmeans-engine
//!
//! A step-wise k-means clustering engine over a fixed N-D point set.
//!
//! ## Features
//!
//! - **Step-wise control surface**: drive the algorithm one iteration at a
//!   time with `step()`, or to completion with `run()`
//! - **Pluggable distance metric**: Euclidean or Manhattan, chosen per
//!   engine instance
//! - **Two initialization policies**: first-k points (deterministic,
//!   order-sensitive) or seeded random distinct points
//! - **Empty-cluster repair**: empty clusters are refilled from the nearest
//!   eligible donor before any mean is computed, so a centroid can never
//!   collapse to NaN
//! - **Visualizer seam**: an external collaborator receives centroid
//!   positions and cluster memberships after each step; rendering and
//!   playback timing stay entirely outside the engine
//!
//! ## Example
//!
//! ```rust
//! use kmeans_engine::{ClusterEngine, EngineConfig, InitPolicy, Metric};
//! use ndarray::array;
//!
//! let points = array![
//!     [1.0, 1.0],
//!     [1.0, 6.0],
//!     [2.0, 1.0],
//!     [8.0, 9.0],
//!     [9.0, 9.0],
//! ];
//!
//! let config = EngineConfig::new(2)
//!     .with_metric(Metric::Euclidean)
//!     .with_init(InitPolicy::RandomDistinct)
//!     .with_seed(42)
//!     .with_max_iterations(10);
//!
//! let mut engine = ClusterEngine::new(points, config).unwrap();
//! let result = engine.run().unwrap();
//!
//! assert_eq!(result.centroids.nrows(), 2);
//! let assigned: usize = result.clusters.iter().map(|c| c.len()).sum();
//! assert_eq!(assigned, 5);
//! ```
//!
//! ## Stepping manually
//!
//! The engine never auto-stops: it is the caller's job to stop stepping once
//! `converged` is true or the iteration cap is reached. A `step()` past the
//! cap is reported as a flagged no-op, not an error, so polling is cheap.
//!
//! ```rust
//! use kmeans_engine::{ClusterEngine, EngineConfig, InitPolicy};
//! use ndarray::array;
//!
//! let points = array![[1.0, 1.0], [1.0, 6.0], [2.0, 1.0]];
//! let config = EngineConfig::new(2).with_init(InitPolicy::FirstK);
//! let mut engine = ClusterEngine::new(points, config).unwrap();
//!
//! loop {
//!     let result = engine.step().unwrap();
//!     if result.converged || result.cap_reached {
//!         break;
//!     }
//! }
//! assert!(engine.converged());
//! ```

mod algorithm;
mod config;
mod distance;
mod engine;
mod error;

pub use config::{EngineConfig, InitPolicy};
pub use distance::Metric;
pub use engine::{ClusterEngine, StepResult, Visualizer};
pub use error::EngineError;
