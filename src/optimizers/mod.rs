mod base;

pub mod annealing;
pub mod raycast;

pub use annealing::SimAnnealingOptimizer;
pub use raycast::RayCastOptimizer;
