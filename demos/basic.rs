//! Basic example driving the clustering engine step by step
//!
//! Run with: cargo run --example basic

use kmeans_engine::{ClusterEngine, EngineConfig, InitPolicy, Metric, StepResult, Visualizer};
use ndarray::{array, Array2};

/// Terminal "renderer": prints centroid positions and cluster membership
/// after every iteration. Each centroid index keeps the same label for the
/// whole run, the way a graphical visualizer would keep a stable color.
struct TerminalVisualizer;

impl Visualizer for TerminalVisualizer {
    fn on_step(&mut self, result: &StepResult) {
        println!("--- iteration {} ---", result.iteration);
        for (cluster_idx, members) in result.clusters.iter().enumerate() {
            let centroid = result.centroids.row(cluster_idx);
            println!(
                "  cluster {} at ({:.2}, {:.2}): {} points {:?}",
                cluster_idx,
                centroid[0],
                centroid[1],
                members.len(),
                members
            );
        }
        if result.converged {
            println!("  converged");
        }
    }
}

fn dataset() -> Array2<f64> {
    array![
        [1.0, 1.0],
        [1.0, 6.0],
        [2.0, 1.0],
        [3.0, 9.0],
        [3.0, 10.0],
        [4.0, 6.0],
        [5.0, 6.0],
        [7.0, 2.0],
        [8.0, 1.0],
        [8.0, 9.0],
        [9.0, 1.0],
        [9.0, 9.0],
        [9.0, 10.0],
        [10.0, 3.0],
        [10.0, 5.0]
    ]
}

fn main() {
    println!("=== kmeans-engine example ===\n");

    // Two independent engines over the same data, one per metric.
    for metric in [Metric::Euclidean, Metric::Manhattan] {
        println!("{:?} run:", metric);

        let config = EngineConfig::new(3)
            .with_metric(metric)
            .with_init(InitPolicy::FirstK)
            .with_max_iterations(10);

        let mut engine = ClusterEngine::new(dataset(), config).expect("valid configuration");
        let result = engine
            .run_with(&mut TerminalVisualizer)
            .expect("clustering failed");

        println!(
            "finished after {} iterations (converged: {})\n",
            result.iteration, result.converged
        );
    }
}
