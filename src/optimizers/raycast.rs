use std::time::{Duration, Instant};

use crate::geometry::{
    point_in_rect, point_segment_sqr_distance, seg_rect_clip, Point, Rect, Segment, Size,
};
use crate::optimizers::base::OptimizerBase;
use crate::{FeatureRef, Obstacle, ObstacleRef, PositionsOptimizer, PreferredPosition};

/// Number of candidate directions fanned out from each label anchor.
const RAY_COUNT: usize = 16;
/// Candidate ray length in pixels.
const RAY_LENGTH: f64 = 150.0;

/// Deterministic label placement by ray casting.
///
/// Each free label fans rays out of its current anchor; the rays are
/// clipped against the Minkowski-expanded rectangles of fixed labels,
/// obstacles and labels placed earlier in the pass, so any point left on
/// a ray is an anchor where the label overlaps none of them. One label is
/// committed per round, chosen by a one-step lookahead that keeps the
/// worst-off remaining label as free as possible.
pub struct RayCastOptimizer {
    base: OptimizerBase,
}

impl RayCastOptimizer {
    pub fn new() -> RayCastOptimizer {
        RayCastOptimizer {
            base: OptimizerBase::new(),
        }
    }
}

fn cast_rays(anchor: Point) -> Vec<Segment> {
    (0..RAY_COUNT)
        .map(|k| {
            let angle = k as f64 * std::f64::consts::TAU / RAY_COUNT as f64;
            let end = Point::new(
                anchor.x + (angle.cos() * RAY_LENGTH).round() as i32,
                anchor.y + (angle.sin() * RAY_LENGTH).round() as i32,
            );
            Segment::new(anchor, end)
        })
        .collect()
}

/// Removes the parts of `rays` covered by `zone`. Rays passing through
/// keep both outside spans, rays fully enclosed are dropped.
fn clip_away(rays: &mut Vec<Segment>, zone: &Rect) {
    let mut kept = Vec::with_capacity(rays.len());
    for ray in rays.drain(..) {
        let hits = seg_rect_clip(&ray, zone);
        match hits.as_slice() {
            [] => {
                if !point_in_rect(ray.start, zone) {
                    kept.push(ray);
                }
            }
            [hit] => {
                if point_in_rect(ray.start, zone) {
                    kept.push(Segment::new(hit.point, ray.end));
                } else {
                    kept.push(Segment::new(ray.start, hit.point));
                }
            }
            [first, second, ..] => {
                kept.push(Segment::new(ray.start, first.point));
                kept.push(Segment::new(second.point, ray.end));
            }
        }
    }
    *rays = kept;
}

/// Total remaining ray length, the freedom measure of a label.
fn ray_room(rays: &[Segment]) -> f64 {
    rays.iter().map(Segment::len).sum()
}

/// The anchor point a label is drawn toward: its pivot shifted by the
/// top-weighted preferred offset, or the pivot itself without preferences.
/// Equal weights keep the earliest entry in the list.
fn preferred_target(pivot: Point, preferred: &[PreferredPosition]) -> Point {
    let mut top = Point::ZERO;
    let mut best = f64::NEG_INFINITY;
    for position in preferred {
        if position.weight > best {
            best = position.weight;
            top = position.offset;
        }
    }
    pivot + top
}

fn nearest_ray_point(rays: &[Segment], target: Point) -> Option<(i64, Point)> {
    rays.iter()
        .map(|ray| point_segment_sqr_distance(target, ray))
        .min_by_key(|(sqr, _)| *sqr)
}

impl PositionsOptimizer for RayCastOptimizer {
    fn register_label(&mut self, label: FeatureRef) {
        self.base.register_label(label);
    }

    fn unregister_label(&mut self, label: &FeatureRef) {
        self.base.unregister_label(label);
    }

    fn register_obstacle(&mut self, obstacle: ObstacleRef) {
        self.base.register_obstacle(obstacle);
    }

    fn unregister_obstacle(&mut self, obstacle: &ObstacleRef) {
        self.base.unregister_obstacle(obstacle);
    }

    fn best_fit(&mut self, time_budget: Duration) {
        let started = Instant::now();
        let mut state = self.base.init_state();
        if state.free.is_empty() {
            return;
        }

        // exclusion sources that hold for the whole pass; segment
        // obstacles are expanded through their bounding box
        let mut blockers: Vec<Rect> = state
            .fixed
            .iter()
            .map(|&idx| self.base.labels()[idx].borrow().label_rect())
            .collect();
        for obstacle in self.base.obstacles() {
            blockers.push(match obstacle.as_ref() {
                Obstacle::Box(rect) => *rect,
                Obstacle::Segment(seg) => seg.bounds(),
            });
        }

        let slot_count = state.free.len();
        let mut pivots = vec![Point::ZERO; slot_count];
        let mut sizes = vec![Size::new(0, 0); slot_count];
        let mut targets = vec![Point::ZERO; slot_count];
        let mut rays: Vec<Vec<Segment>> = vec![Vec::new(); slot_count];
        let mut pending: Vec<usize> = Vec::with_capacity(slot_count);

        for (slot, &idx) in state.free.iter().enumerate() {
            let label = self.base.labels()[idx].borrow();
            pivots[slot] = label.screen_pivot();
            sizes[slot] = label.label_size();
            targets[slot] = preferred_target(pivots[slot], label.preferred_positions());

            let mut slot_rays = cast_rays(pivots[slot] + state.offsets[slot]);
            for blocker in &blockers {
                clip_away(&mut slot_rays, &blocker.expanded_by(sizes[slot]));
                if slot_rays.is_empty() {
                    break;
                }
            }
            // a slot with no surviving rays keeps its prior offset
            if !slot_rays.is_empty() {
                rays[slot] = slot_rays;
                pending.push(slot);
            }
        }

        let mut skipped = slot_count - pending.len();
        let mut placed = 0_usize;

        'rounds: while !pending.is_empty() && started.elapsed() < time_budget {
            let mut choice: Option<(usize, f64)> = None;
            let mut choice_point = Point::ZERO;

            for (k, &slot) in pending.iter().enumerate() {
                if started.elapsed() >= time_budget {
                    break 'rounds;
                }
                let Some((_, point)) = nearest_ray_point(&rays[slot], targets[slot]) else {
                    continue;
                };
                let placed_rect = Rect::new(point, sizes[slot]);

                // worst remaining freedom among the others with `slot`
                // tentatively landed at its best point
                let mut room_left = f64::INFINITY;
                for &other in &pending {
                    if other == slot {
                        continue;
                    }
                    let mut remaining = rays[other].clone();
                    clip_away(&mut remaining, &placed_rect.expanded_by(sizes[other]));
                    room_left = room_left.min(ray_room(&remaining));
                }

                if choice.map_or(true, |(_, best)| room_left > best) {
                    choice = Some((k, room_left));
                    choice_point = point;
                }
            }

            let Some((k, _)) = choice else {
                break;
            };
            let slot = pending[k];
            state.offsets[slot] = choice_point - pivots[slot];
            pending.remove(k);
            placed += 1;

            // carve the committed label out of the remaining ray sets
            let placed_rect = Rect::new(choice_point, sizes[slot]);
            let mut i = 0;
            while i < pending.len() {
                let other = pending[i];
                clip_away(&mut rays[other], &placed_rect.expanded_by(sizes[other]));
                if rays[other].is_empty() {
                    pending.remove(i);
                    skipped += 1;
                } else {
                    i += 1;
                }
            }
        }

        self.base.apply_state(&state);
        log::debug!(
            "ray pass: {placed} placed, {skipped} skipped, {} over budget, {:?} elapsed",
            pending.len(),
            started.elapsed()
        );
    }
}
