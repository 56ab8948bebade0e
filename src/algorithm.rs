use crate::config::InitPolicy;
use crate::distance::Metric;
use crate::error::EngineError;
use ndarray::{Array1, Array2, ArrayView2};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Pick initial centroid positions from the point set.
///
/// `FirstK` copies the first k rows in order; `RandomDistinct` samples k
/// distinct row indices with a seeded RNG. Either way a centroid starts on
/// top of an actual point.
pub fn init_centroids(
    points: &ArrayView2<f64>,
    k: usize,
    policy: InitPolicy,
    seed: u64,
) -> Array2<f64> {
    let dim = points.ncols();
    let mut centroids = Array2::zeros((k, dim));

    match policy {
        InitPolicy::FirstK => {
            for i in 0..k {
                centroids.row_mut(i).assign(&points.row(i));
            }
        }
        InitPolicy::RandomDistinct => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let indices: Vec<usize> = (0..points.nrows()).collect();
            let selected: Vec<usize> = indices.choose_multiple(&mut rng, k).cloned().collect();

            for (centroid_idx, &point_idx) in selected.iter().enumerate() {
                centroids.row_mut(centroid_idx).assign(&points.row(point_idx));
            }
        }
    }

    centroids
}

/// Assign every point to its nearest centroid, rebuilding the clusters
/// from scratch.
///
/// Ties go to the lowest centroid index: the scan uses strictly-less
/// comparison in index order, so the first equidistant centroid wins.
/// A cluster may come out empty; callers repair that before computing
/// means.
pub fn assign_points(
    points: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
    metric: Metric,
) -> Vec<Vec<usize>> {
    let k = centroids.nrows();
    let mut clusters: Vec<Vec<usize>> = vec![Vec::new(); k];

    for (point_idx, point) in points.outer_iter().enumerate() {
        let mut closest = 0;
        let mut min_distance = f64::INFINITY;

        for (centroid_idx, centroid) in centroids.outer_iter().enumerate() {
            let distance = metric.distance(&point, &centroid);
            if distance < min_distance {
                min_distance = distance;
                closest = centroid_idx;
            }
        }

        clusters[closest].push(point_idx);
    }

    clusters
}

/// Move the nearest eligible point into each empty cluster.
///
/// Eligible donors are clusters with more than one member, so a donation
/// can never leave another cluster empty in turn. Empty clusters are
/// repaired independently, in index order; each repair searches donors
/// against the empty cluster's current centroid position under the active
/// metric, first-encountered winning distance ties.
pub fn repair_empty_clusters(
    points: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
    clusters: &mut [Vec<usize>],
    metric: Metric,
) -> Result<(), EngineError> {
    for empty_idx in 0..clusters.len() {
        if !clusters[empty_idx].is_empty() {
            continue;
        }

        let target = centroids.row(empty_idx);
        let mut donor: Option<(usize, usize)> = None;
        let mut min_distance = f64::INFINITY;

        for (cluster_idx, members) in clusters.iter().enumerate() {
            if members.len() <= 1 {
                continue;
            }
            for (slot, &point_idx) in members.iter().enumerate() {
                let distance = metric.distance(&points.row(point_idx), &target);
                if distance < min_distance {
                    min_distance = distance;
                    donor = Some((cluster_idx, slot));
                }
            }
        }

        match donor {
            Some((cluster_idx, slot)) => {
                let point_idx = clusters[cluster_idx].remove(slot);
                clusters[empty_idx].push(point_idx);
            }
            None => {
                return Err(EngineError::DegenerateClusteringState(format!(
                    "no donor cluster with more than one member while repairing cluster {}",
                    empty_idx
                )))
            }
        }
    }

    Ok(())
}

/// Replace each centroid with the componentwise mean of its members.
///
/// Clusters must be non-empty when this runs; the engine repairs empty
/// clusters first, so the mean is always over at least one point.
pub fn update_centroids(
    points: &ArrayView2<f64>,
    clusters: &[Vec<usize>],
    centroids: &mut Array2<f64>,
) {
    for (cluster_idx, members) in clusters.iter().enumerate() {
        debug_assert!(!members.is_empty(), "empty cluster reached the mean step");

        let mut mean = Array1::<f64>::zeros(points.ncols());
        for &point_idx in members {
            mean += &points.row(point_idx);
        }
        mean /= members.len() as f64;

        centroids.row_mut(cluster_idx).assign(&mean);
    }
}

/// Compare centroids against their snapshot from the start of the
/// iteration.
///
/// With `tol = None` this is exact componentwise float equality; it keeps
/// iteration counts fully deterministic, at the cost of possibly never
/// converging under floating-point oscillation. `Some(eps)` accepts
/// per-component movement up to `eps`.
pub fn centroids_converged(prev: &Array2<f64>, current: &Array2<f64>, tol: Option<f64>) -> bool {
    match tol {
        None => prev == current,
        Some(eps) => prev
            .iter()
            .zip(current.iter())
            .all(|(&a, &b)| (a - b).abs() <= eps),
    }
}
