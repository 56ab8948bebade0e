use ndarray::ArrayView1;

/// Distance metric used when comparing a point to a centroid.
///
/// Both metrics are pure functions over two same-dimension coordinate
/// vectors. The metric is chosen per engine instance and never mixed
/// mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// Straight-line distance: `sqrt(sum((a_i - b_i)^2))`
    #[default]
    Euclidean,

    /// City-block distance: `sum(|a_i - b_i|)`
    Manhattan,
}

impl Metric {
    /// Compute the distance between two coordinate vectors of the same
    /// dimension.
    #[inline]
    pub fn distance(&self, a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
        match self {
            Metric::Euclidean => a
                .iter()
                .zip(b.iter())
                .map(|(&x, &y)| (x - y) * (x - y))
                .sum::<f64>()
                .sqrt(),
            Metric::Manhattan => a.iter().zip(b.iter()).map(|(&x, &y)| (x - y).abs()).sum(),
        }
    }
}
