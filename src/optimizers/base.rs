use std::rc::Rc;

use crate::geometry::{rect_overlap_area, seg_rect_sqr_overlap_len, sqr_distance, Point, Rect};
use crate::{FeatureRef, Obstacle, ObstacleRef, PreferredPosition};

const DISPLACEMENT_WEIGHT: f64 = 10.0;
const PREFERENCE_WEIGHT: f64 = 5.0;
const LABEL_OVERLAP_WEIGHT: f64 = 4.0;
const OBSTACLE_OVERLAP_WEIGHT: f64 = 1.0;

/// The candidate offsets of one optimization pass.
///
/// `free` maps state slots to registry indices of the labels a pass may
/// move; `offsets` is slot-aligned with it. `fixed` holds the complement.
/// The registry itself is never reordered, so the indices stay valid for
/// the whole pass.
pub(crate) struct SearchState {
    pub(crate) free: Vec<usize>,
    pub(crate) fixed: Vec<usize>,
    pub(crate) offsets: Vec<Point>,
}

/// Registry and scoring shared by the concrete optimizers.
pub(crate) struct OptimizerBase {
    labels: Vec<FeatureRef>,
    obstacles: Vec<ObstacleRef>,
}

impl OptimizerBase {
    pub(crate) fn new() -> OptimizerBase {
        OptimizerBase {
            labels: Vec::new(),
            obstacles: Vec::new(),
        }
    }

    pub(crate) fn labels(&self) -> &[FeatureRef] {
        &self.labels
    }

    pub(crate) fn obstacles(&self) -> &[ObstacleRef] {
        &self.obstacles
    }

    pub(crate) fn register_label(&mut self, label: FeatureRef) {
        self.labels.push(label);
    }

    pub(crate) fn unregister_label(&mut self, label: &FeatureRef) {
        self.labels.retain(|known| !Rc::ptr_eq(known, label));
    }

    pub(crate) fn register_obstacle(&mut self, obstacle: ObstacleRef) {
        self.obstacles.push(obstacle);
    }

    pub(crate) fn unregister_obstacle(&mut self, obstacle: &ObstacleRef) {
        self.obstacles.retain(|known| !Rc::ptr_eq(known, obstacle));
    }

    /// Builds the search state for a pass from the current registry,
    /// splitting free from fixed labels and seeding each free slot with
    /// the label's committed offset.
    pub(crate) fn init_state(&self) -> SearchState {
        let mut free = Vec::new();
        let mut fixed = Vec::new();
        let mut offsets = Vec::new();

        for (idx, label) in self.labels.iter().enumerate() {
            let label = label.borrow();
            if label.is_fixed() {
                fixed.push(idx);
            } else {
                free.push(idx);
                offsets.push(label.label_offset());
            }
        }

        SearchState {
            free,
            fixed,
            offsets,
        }
    }

    /// Commits a finished pass: every free label takes its slot offset.
    /// Called exactly once per pass, after the search loop.
    pub(crate) fn apply_state(&self, state: &SearchState) {
        for (slot, &idx) in state.free.iter().enumerate() {
            self.labels[idx]
                .borrow_mut()
                .set_label_offset(state.offsets[slot]);
        }
    }

    /// Scores the label in `slot` at its state offset shifted by
    /// `offset_delta`. Lower is better.
    ///
    /// Free neighbors are measured at their current state offsets, fixed
    /// labels where they already sit. Box obstacles cost their covered
    /// area, segment obstacles the squared length of the covered span.
    pub(crate) fn calc_metric(&self, state: &SearchState, slot: usize, offset_delta: Point) -> f64 {
        let label = self.labels[state.free[slot]].borrow();
        let candidate = state.offsets[slot] + offset_delta;
        let rect = Rect {
            anchor: label.screen_pivot() + candidate,
            size: label.label_size(),
        };

        let mut metric = DISPLACEMENT_WEIGHT * sqr_distance(candidate, label.label_offset()) as f64;
        metric += PREFERENCE_WEIGHT * preference_cost(candidate, label.preferred_positions());

        for (other_slot, &idx) in state.free.iter().enumerate() {
            if other_slot == slot {
                continue;
            }
            let other = self.labels[idx].borrow();
            let other_rect = Rect {
                anchor: other.screen_pivot() + state.offsets[other_slot],
                size: other.label_size(),
            };
            metric += LABEL_OVERLAP_WEIGHT * rect_overlap_area(&rect, &other_rect) as f64;
        }
        for &idx in &state.fixed {
            let other = self.labels[idx].borrow();
            metric += LABEL_OVERLAP_WEIGHT * rect_overlap_area(&rect, &other.label_rect()) as f64;
        }

        for obstacle in &self.obstacles {
            metric += OBSTACLE_OVERLAP_WEIGHT
                * match obstacle.as_ref() {
                    Obstacle::Box(rect_obstacle) => rect_overlap_area(&rect, rect_obstacle) as f64,
                    Obstacle::Segment(seg) => seg_rect_sqr_overlap_len(seg, &rect) as f64,
                };
        }

        metric
    }

    /// Calculates the baseline metric of every slot at its current state
    /// offset.
    pub(crate) fn init_metrics(&self, state: &SearchState) -> Vec<f64> {
        (0..state.free.len())
            .map(|slot| self.calc_metric(state, slot, Point::ZERO))
            .collect()
    }
}

fn preference_cost(offset: Point, preferred: &[PreferredPosition]) -> f64 {
    if preferred.is_empty() {
        // no stated preference scores against the origin offset
        return offset.sqr_norm() as f64;
    }
    preferred
        .iter()
        .map(|p| p.weight * sqr_distance(offset, p.offset) as f64)
        .fold(f64::INFINITY, f64::min)
}
