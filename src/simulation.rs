//! Animated feature scenes for driving the optimizers frame by frame.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::Rng;

use crate::geometry::{Point, PointF, Rect, Segment, Size};
use crate::{Obstacle, ObstacleRef, PointFeature, PositionsOptimizer, PreferredPosition};

/// Label size of a simulated feature, in pixels.
const LABEL_SIZE: Size = Size::new(100, 40);

fn default_preferred() -> Vec<PreferredPosition> {
    vec![
        PreferredPosition::new(1.0, Point::new(40, 40)),
        PreferredPosition::new(1.0, Point::new(-40, 40)),
        PreferredPosition::new(0.3, Point::new(40, -40)),
    ]
}

/// A point feature drifting across a wrapping field.
///
/// Position and speed are kept in sub-pixel coordinates; the screen pivot
/// only moves once accumulated motion crosses a pixel boundary. A non-zero
/// spin swings the preferred label boxes around the pivot over time; each
/// box center keeps its distance from the pivot as the ring turns.
pub struct MovingFeature {
    position: PointF,
    speed: PointF,
    field: Size,
    offset: Point,
    size: Size,
    fixed: bool,
    spin: f64,
    angle: f64,
    base_preferred: Vec<PreferredPosition>,
    preferred: Vec<PreferredPosition>,
}

impl MovingFeature {
    pub fn new(position: PointF, speed: PointF, field: Size) -> MovingFeature {
        let base = default_preferred();
        MovingFeature {
            position,
            speed,
            field,
            offset: Point::new(40, 40),
            size: LABEL_SIZE,
            fixed: false,
            spin: 0.0,
            angle: 0.0,
            preferred: base.clone(),
            base_preferred: base,
        }
    }

    /// Swings the preferred label boxes around the pivot at `spin` radians
    /// per second.
    pub fn with_spin(mut self, spin: f64) -> MovingFeature {
        self.spin = spin;
        self
    }

    pub fn with_fixed(mut self, fixed: bool) -> MovingFeature {
        self.fixed = fixed;
        self
    }

    /// Advances the feature by `dt` seconds, wrapping around the field.
    pub fn update(&mut self, dt: f64) {
        self.position = self.position + self.speed * dt;
        self.position.x = self.position.x.rem_euclid(self.field.width as f64);
        self.position.y = self.position.y.rem_euclid(self.field.height as f64);
        if self.spin != 0.0 {
            self.angle += self.spin * dt;
            // the rotation tracks each box center, not its corner anchor
            let center = Point::new(self.size.width / 2, self.size.height / 2);
            for (slot, base) in self.base_preferred.iter().enumerate() {
                self.preferred[slot].offset =
                    PointF::from(base.offset + center).rotated(self.angle).round() - center;
            }
        }
    }
}

impl PointFeature for MovingFeature {
    fn screen_pivot(&self) -> Point {
        self.position.round()
    }

    fn label_size(&self) -> Size {
        self.size
    }

    fn label_offset(&self) -> Point {
        self.offset
    }

    fn set_label_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    fn is_fixed(&self) -> bool {
        self.fixed
    }

    fn preferred_positions(&self) -> &[PreferredPosition] {
        &self.preferred
    }
}

/// Parameters of a randomly generated scene.
pub struct SceneParams {
    pub features: usize,
    pub obstacles: usize,
    pub field: Size,
    pub fixed_fraction: f64,
}

/// A bundle of animated features and static obstacles.
pub struct Scene {
    pub features: Vec<Rc<RefCell<MovingFeature>>>,
    pub obstacles: Vec<ObstacleRef>,
}

impl Scene {
    /// Registers every feature and obstacle with `optimizer`.
    pub fn register_into(&self, optimizer: &mut dyn PositionsOptimizer) {
        for feature in &self.features {
            optimizer.register_label(feature.clone());
        }
        for obstacle in &self.obstacles {
            optimizer.register_obstacle(obstacle.clone());
        }
    }

    /// Advances every feature by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        for feature in &self.features {
            feature.borrow_mut().update(dt);
        }
    }
}

/// Generates a scene of drifting features and static obstacles. The first
/// `fixed_fraction` of the features never move their labels, every fourth
/// feature spins its preferred offsets, and every third obstacle is a
/// segment rather than a box.
pub fn random_scene(params: &SceneParams, rng: &mut StdRng) -> Scene {
    let field = params.field;
    let features = (0..params.features)
        .map(|i| {
            let position = PointF::new(
                rng.gen_range(0.0..field.width as f64),
                rng.gen_range(0.0..field.height as f64),
            );
            let speed = PointF::new(rng.gen_range(-60.0..60.0), rng.gen_range(-60.0..60.0));
            let fixed = (i as f64) < params.fixed_fraction * params.features as f64;
            let spin = if i % 4 == 0 {
                rng.gen_range(0.2..1.2)
            } else {
                0.0
            };
            Rc::new(RefCell::new(
                MovingFeature::new(position, speed, field)
                    .with_spin(spin)
                    .with_fixed(fixed),
            ))
        })
        .collect();

    let obstacles = (0..params.obstacles)
        .map(|i| {
            let anchor = Point::new(
                rng.gen_range(0..field.width),
                rng.gen_range(0..field.height),
            );
            let obstacle = if i % 3 == 2 {
                let delta = Point::new(rng.gen_range(-120..=120), rng.gen_range(-120..=120));
                Obstacle::Segment(Segment::new(anchor, anchor + delta))
            } else {
                let size = Size::new(rng.gen_range(50..200), rng.gen_range(20..40));
                Obstacle::Box(Rect::new(anchor, size))
            };
            Rc::new(obstacle)
        })
        .collect();

    Scene {
        features,
        obstacles,
    }
}
