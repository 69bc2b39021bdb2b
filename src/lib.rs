mod distance;
mod error;
mod neartree;
mod node;
mod search;

pub use distance::{euclidean, Chebyshev, Euclidean, Manhattan, Metric};
pub use error::{Error, Result};
pub use neartree::NearTree;
pub use search::Neighbor;
