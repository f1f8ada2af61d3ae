//! Distance matrices over a finite node set.
//!
//! The colony treats a [`DistanceMatrix`] as an opaque, read-only cost
//! table. This module builds one from planar coordinates (Euclidean) or
//! geographic coordinates (Haversine great-circle distance), and can
//! generate seeded random planar instances.

mod geo;
mod matrix;

pub use geo::{euclidean, haversine, random_points, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;
