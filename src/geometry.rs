use std::ops::{Add, AddAssign, Div, Mul, Sub};

use serde::{ser::SerializeSeq, Serialize};

/// A point or direction vector on the integer screen grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    /// Creates a point from its coordinates.
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    /// Calculates the dot product of `self` and `other`.
    pub const fn dot(&self, other: &Point) -> i64 {
        self.x as i64 * other.x as i64 + self.y as i64 * other.y as i64
    }

    /// Calculates the 2D cross product of `self` and `other` (the z
    /// component of the corresponding 3D cross product).
    pub const fn cross(&self, other: &Point) -> i64 {
        self.x as i64 * other.y as i64 - self.y as i64 * other.x as i64
    }

    /// Calculates the squared euclidean norm.
    pub const fn sqr_norm(&self) -> i64 {
        self.dot(self)
    }

    /// Calculates the euclidean norm.
    pub fn norm(&self) -> f64 {
        (self.sqr_norm() as f64).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: i32) -> Point {
        Point {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Div<i32> for Point {
    type Output = Point;

    #[inline]
    fn div(self, rhs: i32) -> Point {
        Point {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

/// Floating-point companion of [Point] for sub-pixel motion and rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const ZERO: PointF = PointF { x: 0.0, y: 0.0 };

    /// Creates a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> PointF {
        PointF { x, y }
    }

    /// Rotates this point around the origin by `angle` radians,
    /// counterclockwise.
    pub fn rotated(&self, angle: f64) -> PointF {
        let (sin, cos) = angle.sin_cos();
        PointF {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Rounds to the nearest grid point.
    pub fn round(&self) -> Point {
        Point {
            x: self.x.round() as i32,
            y: self.y.round() as i32,
        }
    }
}

impl From<Point> for PointF {
    fn from(p: Point) -> PointF {
        PointF {
            x: p.x as f64,
            y: p.y as f64,
        }
    }
}

impl Add for PointF {
    type Output = PointF;

    #[inline]
    fn add(self, rhs: PointF) -> PointF {
        PointF {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Mul<f64> for PointF {
    type Output = PointF;

    #[inline]
    fn mul(self, rhs: f64) -> PointF {
        PointF {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// A width/height pair. Both components are non-negative wherever a size
/// describes a geometric region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Creates a size from its components.
    pub const fn new(width: i32, height: i32) -> Size {
        Size { width, height }
    }
}

impl From<Size> for Point {
    fn from(size: Size) -> Point {
        Point {
            x: size.width,
            y: size.height,
        }
    }
}

/// A directed line segment between two grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    /// Creates a segment from its endpoints.
    pub const fn new(start: Point, end: Point) -> Segment {
        Segment { start, end }
    }

    /// Calculates the direction vector from start to end.
    pub const fn delta(&self) -> Point {
        Point {
            x: self.end.x - self.start.x,
            y: self.end.y - self.start.y,
        }
    }

    /// Calculates the length of this segment.
    pub fn len(&self) -> f64 {
        self.delta().norm()
    }

    /// Calculates the minimal axis-aligned bounding box of this segment.
    pub fn bounds(&self) -> Rect {
        let anchor = Point {
            x: self.start.x.min(self.end.x),
            y: self.start.y.min(self.end.y),
        };
        Rect {
            anchor,
            size: Size {
                width: (self.start.x - self.end.x).abs(),
                height: (self.start.y - self.end.y).abs(),
            },
        }
    }
}

/// An axis-aligned rectangle: the lower-left `anchor` corner plus a
/// non-negative `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub anchor: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        anchor: Point::ZERO,
        size: Size {
            width: 0,
            height: 0,
        },
    };

    /// Creates a rectangle from its lower-left corner and size.
    pub const fn new(anchor: Point, size: Size) -> Rect {
        Rect { anchor, size }
    }

    /// Returns the upper-right corner.
    pub const fn top_right(&self) -> Point {
        Point {
            x: self.anchor.x + self.size.width,
            y: self.anchor.y + self.size.height,
        }
    }

    /// Calculates this rectangle's area.
    pub const fn area(&self) -> i64 {
        self.size.width as i64 * self.size.height as i64
    }

    /// Returns true if this rectangle has an area of zero.
    pub const fn is_empty(&self) -> bool {
        self.size.width == 0 || self.size.height == 0
    }

    /// Grows this rectangle downward/leftward by `by` and widens it by the
    /// same amount, so that containing a point is equivalent to overlapping
    /// a `by`-sized rectangle anchored at that point.
    pub const fn expanded_by(&self, by: Size) -> Rect {
        Rect {
            anchor: Point {
                x: self.anchor.x - by.width,
                y: self.anchor.y - by.height,
            },
            size: Size {
                width: self.size.width + by.width,
                height: self.size.height + by.height,
            },
        }
    }
}

/// Calculates the squared distance between two points.
pub const fn sqr_distance(a: Point, b: Point) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}

/// Calculates the overlap area of two axis-aligned rectangles.
///
/// Touching edges count as non-overlapping: the result is nonzero only
/// when the interiors intersect.
pub fn rect_overlap_area(a: &Rect, b: &Rect) -> i64 {
    let left = a.anchor.x.max(b.anchor.x);
    let bottom = a.anchor.y.max(b.anchor.y);
    let right = a.top_right().x.min(b.top_right().x);
    let top = a.top_right().y.min(b.top_right().y);

    if right > left && top > bottom {
        (right - left) as i64 * (top - bottom) as i64
    } else {
        0
    }
}

/// Returns true if `p` lies inside `r`, bounds inclusive.
pub const fn point_in_rect(p: Point, r: &Rect) -> bool {
    let tr = r.top_right();
    r.anchor.x <= p.x && p.x <= tr.x && r.anchor.y <= p.y && p.y <= tr.y
}

/// An intersection of two segments: the crossing point plus its parameters
/// on the first (`t`) and second (`u`) segment, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegIntersection {
    pub point: Point,
    pub t: f64,
    pub u: f64,
}

/// Calculates the intersection of two segments, if there is one.
pub fn segments_intersection(a: &Segment, b: &Segment) -> Option<SegIntersection> {
    let r = a.delta();
    let s = b.delta();
    let rxs = r.cross(&s);
    if rxs == 0 {
        // TODO: collinear overlapping segments are reported as not
        // intersecting
        return None;
    }

    let qp = b.start - a.start;
    let t = qp.cross(&s) as f64 / rxs as f64;
    let u = qp.cross(&r) as f64 / rxs as f64;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    let point = Point {
        x: (a.start.x as f64 + r.x as f64 * t).round() as i32,
        y: (a.start.y as f64 + r.y as f64 * t).round() as i32,
    };
    Some(SegIntersection { point, t, u })
}

/// A boundary crossing produced by [seg_rect_clip], positioned at
/// parameter `t` along the original segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPoint {
    pub point: Point,
    pub t: f64,
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(x: f64, y: f64, r: &Rect) -> u8 {
    let tr = r.top_right();
    let mut code = INSIDE;
    if x < r.anchor.x as f64 {
        code |= LEFT;
    } else if x > tr.x as f64 {
        code |= RIGHT;
    }
    if y < r.anchor.y as f64 {
        code |= BOTTOM;
    } else if y > tr.y as f64 {
        code |= TOP;
    }
    code
}

/// Clips `seg` against the four half-planes of `rect`, Cohen-Sutherland
/// style, and returns the boundary crossings in traversal order along the
/// segment.
///
/// At most two crossings are produced, each tagged with its parameter on
/// the original segment, so a pair is always ordered by increasing `t`.
/// A segment entirely inside or entirely outside the rectangle has no
/// crossings.
pub fn seg_rect_clip(seg: &Segment, rect: &Rect) -> Vec<ClipPoint> {
    let x0 = seg.start.x as f64;
    let y0 = seg.start.y as f64;
    let dx = seg.end.x as f64 - x0;
    let dy = seg.end.y as f64 - y0;
    let xmin = rect.anchor.x as f64;
    let ymin = rect.anchor.y as f64;
    let xmax = rect.top_right().x as f64;
    let ymax = rect.top_right().y as f64;

    let (mut ax, mut ay) = (x0, y0);
    let (mut bx, mut by) = (seg.end.x as f64, seg.end.y as f64);
    let (mut ta, mut tb) = (0.0_f64, 1.0_f64);
    let (mut a_clipped, mut b_clipped) = (false, false);
    let mut code_a = outcode(ax, ay, rect);
    let mut code_b = outcode(bx, by, rect);

    // each endpoint needs at most two edge clips; extra rounds only occur
    // when floating-point noise grazes a corner
    for _ in 0..8 {
        if code_a | code_b == INSIDE {
            break;
        }
        if code_a & code_b != INSIDE {
            return Vec::new();
        }

        let code = if code_a != INSIDE { code_a } else { code_b };
        // crossing parameter measured on the original segment, so two
        // crossings stay comparable after repeated clips
        let (t, x, y) = if code & LEFT != 0 {
            let t = (xmin - x0) / dx;
            (t, xmin, y0 + dy * t)
        } else if code & RIGHT != 0 {
            let t = (xmax - x0) / dx;
            (t, xmax, y0 + dy * t)
        } else if code & BOTTOM != 0 {
            let t = (ymin - y0) / dy;
            (t, x0 + dx * t, ymin)
        } else {
            let t = (ymax - y0) / dy;
            (t, x0 + dx * t, ymax)
        };

        if code == code_a {
            (ax, ay, ta, a_clipped) = (x, y, t, true);
            code_a = outcode(ax, ay, rect);
        } else {
            (bx, by, tb, b_clipped) = (x, y, t, true);
            code_b = outcode(bx, by, rect);
        }
    }
    if code_a | code_b != INSIDE {
        // unresolved corner graze, treated as a miss
        return Vec::new();
    }

    let mut hits = Vec::new();
    if a_clipped {
        hits.push(ClipPoint {
            point: Point {
                x: ax.round() as i32,
                y: ay.round() as i32,
            },
            t: ta,
        });
    }
    if b_clipped {
        hits.push(ClipPoint {
            point: Point {
                x: bx.round() as i32,
                y: by.round() as i32,
            },
            t: tb,
        });
    }
    hits
}

/// Calculates the squared distance from `p` to the nearest point of `seg`,
/// returning that nearest point as well.
///
/// The projection of `p` onto the segment's line is clamped to the
/// endpoints. A zero-length segment is treated as its start point.
pub fn point_segment_sqr_distance(p: Point, seg: &Segment) -> (i64, Point) {
    let delta = seg.delta();
    let sqr_len = delta.sqr_norm();
    if sqr_len == 0 {
        return (sqr_distance(p, seg.start), seg.start);
    }

    let t = ((p - seg.start).dot(&delta) as f64 / sqr_len as f64).clamp(0.0, 1.0);
    let nearest = Point {
        x: seg.start.x + (delta.x as f64 * t).round() as i32,
        y: seg.start.y + (delta.y as f64 * t).round() as i32,
    };
    (sqr_distance(p, nearest), nearest)
}

/// Calculates the squared length of the span where `seg` crosses `rect`.
///
/// Zero when they are disjoint or only touch. One boundary crossing
/// measures from the enclosed endpoint to the crossing; two crossings
/// measure between them. A segment fully inside the rectangle has no
/// crossings and scores zero.
pub fn seg_rect_sqr_overlap_len(seg: &Segment, rect: &Rect) -> i64 {
    let hits = seg_rect_clip(seg, rect);
    match hits.as_slice() {
        [] => 0,
        [hit] => {
            let inner = if point_in_rect(seg.start, rect) {
                seg.start
            } else {
                seg.end
            };
            sqr_distance(inner, hit.point)
        }
        [first, second, ..] => sqr_distance(first.point, second.point),
    }
}

impl Serialize for Point {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.x)?;
        seq.serialize_element(&self.y)?;
        seq.end()
    }
}

impl Serialize for Rect {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(4))?;
        seq.serialize_element(&self.anchor.x)?;
        seq.serialize_element(&self.anchor.y)?;
        seq.serialize_element(&self.size.width)?;
        seq.serialize_element(&self.size.height)?;
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(3, -2);
        let b = Point::new(1, 5);
        assert_eq!(a + b, Point::new(4, 3));
        assert_eq!(a - b, Point::new(2, -7));
        assert_eq!(a * 2, Point::new(6, -4));
        assert_eq!(Point::new(6, -4) / 2, a);
        assert_eq!(a.dot(&b), 3 - 10);
        assert_eq!(a.cross(&b), 15 + 2);
        assert_eq!(b.sqr_norm(), 26);

        let mut c = a;
        c += b;
        assert_eq!(c, Point::new(4, 3));
        assert_eq!(Point::from(Size::new(3, 4)), Point::new(3, 4));
    }

    #[test]
    fn rotation_quarter_turn() {
        let p = PointF::new(1.0, 0.0).rotated(std::f64::consts::FRAC_PI_2);
        assert!((p.x - 0.0).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
        assert_eq!(p.round(), Point::new(0, 1));
    }

    #[test]
    fn overlap_area_is_symmetric() {
        let a = rect(0, 0, 10, 10);
        let b = rect(5, 5, 10, 10);
        assert_eq!(rect_overlap_area(&a, &b), 25);
        assert_eq!(rect_overlap_area(&b, &a), 25);
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = rect(0, 0, 10, 10);
        let edge = rect(10, 0, 10, 10);
        let corner = rect(10, 10, 5, 5);
        let apart = rect(30, 0, 10, 10);
        assert_eq!(rect_overlap_area(&a, &edge), 0);
        assert_eq!(rect_overlap_area(&a, &corner), 0);
        assert_eq!(rect_overlap_area(&a, &apart), 0);
    }

    #[test]
    fn contained_rect_overlaps_by_its_own_area() {
        let outer = rect(0, 0, 100, 100);
        let inner = rect(10, 10, 5, 8);
        assert_eq!(rect_overlap_area(&outer, &inner), inner.area());
    }

    #[test]
    fn zero_size_rects_are_empty_and_never_overlap() {
        assert!(Rect::ZERO.is_empty());
        assert_eq!(Rect::ZERO.area(), 0);
        let line = rect(5, 5, 0, 10);
        assert!(line.is_empty());
        assert_eq!(rect_overlap_area(&line, &rect(0, 0, 20, 20)), 0);
    }

    #[test]
    fn point_in_rect_is_inclusive() {
        let r = rect(0, 0, 10, 10);
        assert!(point_in_rect(Point::new(0, 0), &r));
        assert!(point_in_rect(Point::new(10, 10), &r));
        assert!(point_in_rect(Point::new(5, 10), &r));
        assert!(!point_in_rect(Point::new(11, 5), &r));
        assert!(!point_in_rect(Point::new(5, -1), &r));
    }

    #[test]
    fn crossing_segments_intersect() {
        let a = Segment::new(Point::new(0, 0), Point::new(10, 10));
        let b = Segment::new(Point::new(0, 10), Point::new(10, 0));
        let hit = segments_intersection(&a, &b).unwrap();
        assert_eq!(hit.point, Point::new(5, 5));
        assert!((hit.t - 0.5).abs() < 1e-9);
        assert!((hit.u - 0.5).abs() < 1e-9);
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let a = Segment::new(Point::new(0, 0), Point::new(0, 10));
        let shifted = Segment::new(Point::new(1, 0), Point::new(1, 10));
        let collinear = Segment::new(Point::new(0, 5), Point::new(0, 15));
        assert_eq!(segments_intersection(&a, &shifted), None);
        // collinear overlap is the documented blind spot
        assert_eq!(segments_intersection(&a, &collinear), None);
    }

    #[test]
    fn short_segments_miss() {
        let a = Segment::new(Point::new(0, 0), Point::new(10, 0));
        let above = Segment::new(Point::new(5, 10), Point::new(5, 1));
        assert_eq!(segments_intersection(&a, &above), None);
    }

    #[test]
    fn clip_through_reports_both_crossings_in_order() {
        let seg = Segment::new(Point::new(-5, 5), Point::new(15, 5));
        let hits = seg_rect_clip(&seg, &rect(0, 0, 10, 10));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].point, Point::new(0, 5));
        assert_eq!(hits[1].point, Point::new(10, 5));
        assert!(hits[0].t < hits[1].t);
        assert!((hits[0].t - 0.25).abs() < 1e-9);
        assert!((hits[1].t - 0.75).abs() < 1e-9);
    }

    #[test]
    fn clip_respects_traversal_direction() {
        let seg = Segment::new(Point::new(5, 15), Point::new(5, -5));
        let hits = seg_rect_clip(&seg, &rect(0, 0, 10, 10));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].point, Point::new(5, 10));
        assert_eq!(hits[1].point, Point::new(5, 0));
        assert!(hits[0].t < hits[1].t);
    }

    #[test]
    fn clip_with_one_endpoint_inside() {
        let seg = Segment::new(Point::new(5, 5), Point::new(15, 5));
        let hits = seg_rect_clip(&seg, &rect(0, 0, 10, 10));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].point, Point::new(10, 5));
    }

    #[test]
    fn clip_diagonal_through_corner_region() {
        let seg = Segment::new(Point::new(-10, 0), Point::new(10, 20));
        let hits = seg_rect_clip(&seg, &rect(0, 0, 10, 10));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].point, Point::new(0, 10));
        assert_eq!(hits[1].point, Point::new(0, 10));
    }

    #[test]
    fn clip_inside_and_outside_have_no_crossings() {
        let r = rect(0, 0, 10, 10);
        let inside = Segment::new(Point::new(2, 2), Point::new(8, 8));
        let outside = Segment::new(Point::new(20, 20), Point::new(30, 25));
        assert!(seg_rect_clip(&inside, &r).is_empty());
        assert!(seg_rect_clip(&outside, &r).is_empty());
    }

    #[test]
    fn nearest_point_on_segment() {
        let seg = Segment::new(Point::new(1, 1), Point::new(1, -1));
        let (sqr, nearest) = point_segment_sqr_distance(Point::new(0, 0), &seg);
        assert_eq!(sqr, 1);
        assert_eq!(nearest, Point::new(1, 0));
    }

    #[test]
    fn nearest_point_clamps_to_endpoint() {
        let seg = Segment::new(Point::new(0, 0), Point::new(2, 0));
        let (sqr, nearest) = point_segment_sqr_distance(Point::new(5, 0), &seg);
        assert_eq!(sqr, 9);
        assert_eq!(nearest, Point::new(2, 0));
    }

    #[test]
    fn zero_length_segment_is_its_start() {
        let seg = Segment::new(Point::new(3, 4), Point::new(3, 4));
        let (sqr, nearest) = point_segment_sqr_distance(Point::new(0, 0), &seg);
        assert_eq!(sqr, 25);
        assert_eq!(nearest, Point::new(3, 4));
    }

    #[test]
    fn overlap_len_of_pass_through_segment() {
        let seg = Segment::new(Point::new(-5, 5), Point::new(15, 5));
        assert_eq!(seg_rect_sqr_overlap_len(&seg, &rect(0, 0, 10, 10)), 100);
    }

    #[test]
    fn overlap_len_measures_from_enclosed_endpoint() {
        let r = rect(0, 0, 10, 10);
        let from_inside = Segment::new(Point::new(5, 5), Point::new(15, 5));
        let to_inside = Segment::new(Point::new(15, 5), Point::new(5, 5));
        assert_eq!(seg_rect_sqr_overlap_len(&from_inside, &r), 25);
        assert_eq!(seg_rect_sqr_overlap_len(&to_inside, &r), 25);
    }

    #[test]
    fn overlap_len_of_disjoint_and_enclosed_segments() {
        let r = rect(0, 0, 10, 10);
        let disjoint = Segment::new(Point::new(20, 20), Point::new(30, 20));
        let enclosed = Segment::new(Point::new(2, 2), Point::new(8, 2));
        assert_eq!(seg_rect_sqr_overlap_len(&disjoint, &r), 0);
        assert_eq!(seg_rect_sqr_overlap_len(&enclosed, &r), 0);
    }

    #[test]
    fn segment_bounds() {
        let seg = Segment::new(Point::new(5, -2), Point::new(1, 7));
        assert_eq!(seg.bounds(), rect(1, -2, 4, 9));
    }

    #[test]
    fn minkowski_expansion_matches_overlap_test() {
        let neighbor = rect(100, 100, 50, 20);
        let size = Size::new(30, 10);
        let zone = neighbor.expanded_by(size);
        assert_eq!(zone, rect(70, 90, 80, 30));

        // anchor strictly inside the zone <=> rectangles overlap
        for (anchor, overlaps) in [
            (Point::new(80, 95), true),
            (Point::new(70, 95), false),
            (Point::new(150, 95), false),
            (Point::new(149, 95), true),
        ] {
            let candidate = Rect::new(anchor, size);
            assert_eq!(
                rect_overlap_area(&candidate, &neighbor) > 0,
                overlaps,
                "anchor {anchor:?}"
            );
            let strictly_inside = zone.anchor.x < anchor.x
                && anchor.x < zone.top_right().x
                && zone.anchor.y < anchor.y
                && anchor.y < zone.top_right().y;
            assert_eq!(strictly_inside, overlaps, "anchor {anchor:?}");
        }
    }

    #[test]
    fn geometry_serializes_to_flat_arrays() {
        let r = rect(1, 2, 30, 40);
        assert_eq!(serde_json::to_string(&r).unwrap(), "[1,2,30,40]");
        assert_eq!(
            serde_json::to_string(&Point::new(-3, 9)).unwrap(),
            "[-3,9]"
        );
    }
}
