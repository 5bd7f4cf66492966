use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::geometry::{Point, Rect, Segment, Size};

/// A weighted candidate offset expressing where a feature prefers its
/// label. A weight around 1.0 is normal importance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferredPosition {
    pub weight: f64,
    pub offset: Point,
}

impl PreferredPosition {
    /// Creates a preferred position from its weight and offset.
    pub const fn new(weight: f64, offset: Point) -> PreferredPosition {
        PreferredPosition { weight, offset }
    }
}

/// A point feature carrying a label whose placement the optimizer manages.
///
/// The optimizer never inspects concrete implementers; everything it needs
/// flows through these accessors, and the only mutation it ever performs
/// is `set_label_offset` when a pass commits.
pub trait PointFeature {
    /// Returns the feature's absolute position on the screen.
    fn screen_pivot(&self) -> Point;

    /// Returns the size of the label box.
    fn label_size(&self) -> Size;

    /// Returns the label's current offset relative to the pivot.
    fn label_offset(&self) -> Point;

    /// Moves the label to `offset`, relative to the pivot.
    fn set_label_offset(&mut self, offset: Point);

    /// Returns true if the label must not be moved by a pass.
    fn is_fixed(&self) -> bool;

    /// Returns the feature's preferred offsets. An empty list means the
    /// origin is preferred with default weight.
    fn preferred_positions(&self) -> &[PreferredPosition];

    /// Calculates the label's rectangle at its current offset.
    fn label_rect(&self) -> Rect {
        Rect {
            anchor: self.screen_pivot() + self.label_offset(),
            size: self.label_size(),
        }
    }
}

/// A screen obstacle labels should avoid covering.
#[derive(Debug, Clone)]
pub enum Obstacle {
    Box(Rect),
    Segment(Segment),
}

/// A shared handle to a registered feature. Identity is pointer equality.
pub type FeatureRef = Rc<RefCell<dyn PointFeature>>;

/// A shared handle to a registered obstacle. Identity is pointer equality.
pub type ObstacleRef = Rc<Obstacle>;

/// A label placement strategy over a registry of features and obstacles.
///
/// Hosts register their features and obstacles once, then call `best_fit`
/// every frame between updates. Registration must not be interleaved with
/// a running pass; the whole surface is single-threaded.
pub trait PositionsOptimizer {
    /// Adds `label` to the registry.
    fn register_label(&mut self, label: FeatureRef);

    /// Removes `label` from the registry. Unknown handles are ignored.
    fn unregister_label(&mut self, label: &FeatureRef);

    /// Adds `obstacle` to the registry.
    fn register_obstacle(&mut self, obstacle: ObstacleRef);

    /// Removes `obstacle` from the registry. Unknown handles are ignored.
    fn unregister_obstacle(&mut self, obstacle: &ObstacleRef);

    /// Runs one optimization pass, mutating the offsets of the registered
    /// non-fixed labels.
    ///
    /// The pass blocks for at most `time_budget` of wall-clock time and
    /// always commits a full state before returning.
    fn best_fit(&mut self, time_budget: Duration);
}
