//! Real-time label placement for animated maps.
//!
//! Features expose a pivot, a label size and preferred offsets through
//! [`PointFeature`]; an optimizer repositions the labels around their
//! pivots on every frame, within a wall-clock budget, so that they dodge
//! each other and the registered [`Obstacle`]s. Two interchangeable
//! optimizers are provided: simulated annealing and deterministic ray
//! casting.

pub mod geometry;
pub mod optimizers;
pub mod simulation;

mod traits;

pub use traits::{
    FeatureRef, Obstacle, ObstacleRef, PointFeature, PositionsOptimizer, PreferredPosition,
};
