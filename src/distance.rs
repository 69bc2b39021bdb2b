/// A distance function over points of equal length.
///
/// Pruning during search relies on the function being symmetric, non-negative
/// and satisfying the triangle inequality. These properties are not checked:
/// a function that breaks them yields unspecified (but memory-safe) results.
pub trait Metric {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<F> Metric for F
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}

/// L2 norm, the default metric of a tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

/// L1 norm.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

/// L-infinity norm.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chebyshev;

impl Metric for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        euclidean(a, b)
    }
}

impl Metric for Manhattan {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }
}

impl Metric for Chebyshev {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b.iter())
            .fold(0.0, |max, (x, y)| f64::max(max, (x - y).abs()))
    }
}

pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        sum += (x - y).powi(2);
    }
    if sum.is_finite() {
        return sum.sqrt();
    }

    // The squares overflowed: rescale by the largest coordinate difference
    let scale = a
        .iter()
        .zip(b.iter())
        .fold(0.0, |max, (x, y)| f64::max(max, (x - y).abs()));
    if !scale.is_finite() {
        return scale;
    }
    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        sum += ((x - y) / scale).powi(2);
    }
    scale * sum.sqrt()
}
