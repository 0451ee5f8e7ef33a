// Geometry primitives
// Resampling, rasterization, point transforms and vector distances

pub mod distance;
pub mod sampling;
pub mod transform;

pub use distance::{minimum_cosine_distance, squared_euclidean_distance};
pub use sampling::{spatial_sampling, temporal_sampling};
pub use transform::{compute_centroid, rotate, translate};
