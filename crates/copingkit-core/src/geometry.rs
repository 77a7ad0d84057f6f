//! Geometry primitives for pool outlines and boundary polygons.
//!
//! Coordinates are millimeters in pool-local space with the screen
//! convention (+y points down the canvas). Polygons are ordered vertex lists
//! and are implicitly closed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{CORNER_ANGLE_THRESHOLD_DEG, GEOMETRY_EPSILON};
use crate::error::GeometryError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Moves the point `distance` along the (unit) vector `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64, distance: f64) -> Point {
        Point::new(self.x + dx * distance, self.y + dy * distance)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance_to(&b)
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }
}

/// Bounding box of a point set, `None` when empty.
pub fn bounding_box(points: &[Point]) -> Option<Bounds> {
    let first = points.first()?;
    let mut bounds = Bounds::new(first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        bounds.min_x = bounds.min_x.min(p.x);
        bounds.min_y = bounds.min_y.min(p.y);
        bounds.max_x = bounds.max_x.max(p.x);
        bounds.max_y = bounds.max_y.max(p.y);
    }
    Some(bounds)
}

/// Checks that a polygon has at least 3 finite vertices.
pub fn validate_polygon(points: &[Point]) -> Result<(), GeometryError> {
    if points.len() < 3 {
        return Err(GeometryError::TooFewVertices {
            vertices: points.len(),
        });
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(GeometryError::NonFiniteVertex { index });
    }
    Ok(())
}

/// Drops consecutive duplicate vertices, including a repeated closing vertex.
pub fn normalize_polygon(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if out
            .last()
            .map_or(true, |last| last.distance_to(p) > GEOMETRY_EPSILON)
        {
            out.push(*p);
        }
    }
    while out.len() > 1 {
        let first = out[0];
        match out.last() {
            Some(last) if last.distance_to(&first) <= GEOMETRY_EPSILON => {
                out.pop();
            }
            _ => break,
        }
    }
    out
}

/// Even-odd ray casting. Near-horizontal edges get their denominator
/// nudged to epsilon instead of dividing by zero.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > p.y) != (pj.y > p.y) {
            let mut dy = pj.y - pi.y;
            if dy.abs() < GEOMETRY_EPSILON {
                dy = GEOMETRY_EPSILON;
            }
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / dy + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Sum of edge lengths, closing edge included.
pub fn polygon_perimeter(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| polygon[i].distance_to(&polygon[(i + 1) % n]))
        .sum()
}

/// Shoelace area. Positive when the interior lies to the left of each edge
/// in math orientation, which is clockwise as drawn on a y-down canvas.
pub fn polygon_signed_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = polygon[i];
            let b = polygon[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

pub fn polygon_area(polygon: &[Point]) -> f64 {
    polygon_signed_area(polygon).abs()
}

/// Turning angle at `current` in degrees, `None` for zero-length edges.
pub fn turning_angle_deg(prev: Point, current: Point, next: Point) -> Option<f64> {
    let (ax, ay) = (current.x - prev.x, current.y - prev.y);
    let (bx, by) = (next.x - current.x, next.y - current.y);
    let la = (ax * ax + ay * ay).sqrt();
    let lb = (bx * bx + by * by).sqrt();
    if la < GEOMETRY_EPSILON || lb < GEOMETRY_EPSILON {
        return None;
    }
    let cos = ((ax * bx + ay * by) / (la * lb)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Corner labels in clockwise screen order starting top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CornerLabel {
    Nw,
    Ne,
    Se,
    Sw,
}

impl CornerLabel {
    pub const ALL: [CornerLabel; 4] = [
        CornerLabel::Nw,
        CornerLabel::Ne,
        CornerLabel::Se,
        CornerLabel::Sw,
    ];

    /// Short lowercase tag used in paver ids.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Nw => "nw",
            Self::Ne => "ne",
            Self::Se => "se",
            Self::Sw => "sw",
        }
    }
}

impl fmt::Display for CornerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag().to_uppercase())
    }
}

/// Rotation (degrees) that aligns a corner paver with the waterline.
pub fn corner_rotation(label: CornerLabel) -> f64 {
    match label {
        CornerLabel::Nw => 0.0,
        CornerLabel::Ne => 90.0,
        CornerLabel::Se => 180.0,
        CornerLabel::Sw => 270.0,
    }
}

/// Result of corner detection.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerDetection {
    pub corners: [Point; 4],
    /// Outline indices the corners were taken from.
    pub indices: [usize; 4],
    /// True when the first-4-points approximation was used.
    pub fallback: bool,
}

/// Finds the four coping corners of an outline using the default
/// 45° turning threshold.
pub fn find_corners(outline: &[Point]) -> Result<CornerDetection, GeometryError> {
    find_corners_with_threshold(outline, CORNER_ANGLE_THRESHOLD_DEG)
}

pub fn find_corners_with_threshold(
    outline: &[Point],
    threshold_deg: f64,
) -> Result<CornerDetection, GeometryError> {
    validate_polygon(outline)?;
    let n = outline.len();

    if n == 4 {
        return Ok(CornerDetection {
            corners: [outline[0], outline[1], outline[2], outline[3]],
            indices: [0, 1, 2, 3],
            fallback: false,
        });
    }

    let detected: Vec<usize> = (0..n)
        .filter(|&i| {
            let prev = outline[(i + n - 1) % n];
            let next = outline[(i + 1) % n];
            turning_angle_deg(prev, outline[i], next).is_some_and(|a| a > threshold_deg)
        })
        .collect();

    if let &[a, b, c, d] = detected.as_slice() {
        return Ok(CornerDetection {
            corners: [outline[a], outline[b], outline[c], outline[d]],
            indices: [a, b, c, d],
            fallback: false,
        });
    }

    tracing::debug!(
        "Detected {} corners on a {}-vertex outline, using first 4 points",
        detected.len(),
        n
    );
    let indices = [0, 1 % n, 2 % n, 3 % n];
    Ok(CornerDetection {
        corners: indices.map(|i| outline[i]),
        indices,
        fallback: true,
    })
}

/// Labels four corners by quadrant around their centroid, falling back to
/// index order (NW, NE, SE, SW) when two corners share a quadrant.
pub fn label_corners(corners: &[Point; 4]) -> [CornerLabel; 4] {
    let cx = corners.iter().map(|p| p.x).sum::<f64>() / 4.0;
    let cy = corners.iter().map(|p| p.y).sum::<f64>() / 4.0;

    let labels = corners.map(|p| match (p.x < cx, p.y < cy) {
        (true, true) => CornerLabel::Nw,
        (false, true) => CornerLabel::Ne,
        (false, false) => CornerLabel::Se,
        (true, false) => CornerLabel::Sw,
    });

    let distinct = CornerLabel::ALL
        .iter()
        .all(|label| labels.iter().filter(|l| *l == label).count() == 1);
    if distinct {
        labels
    } else {
        CornerLabel::ALL
    }
}

/// Distance along a ray to the nearest polygon edge, `None` if the ray
/// misses. `direction` need not be normalized.
pub fn ray_polygon_distance(
    origin: Point,
    direction: (f64, f64),
    polygon: &[Point],
) -> Result<Option<f64>, GeometryError> {
    let len = (direction.0 * direction.0 + direction.1 * direction.1).sqrt();
    if len < GEOMETRY_EPSILON {
        return Err(GeometryError::ZeroDirection);
    }
    let (dx, dy) = (direction.0 / len, direction.1 / len);

    let n = polygon.len();
    let mut nearest: Option<f64> = None;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let ex = b.x - a.x;
        let ey = b.y - a.y;

        let denom = dx * ey - dy * ex;
        if denom.abs() < GEOMETRY_EPSILON {
            continue; // Parallel
        }
        let wx = a.x - origin.x;
        let wy = a.y - origin.y;
        let t = (wx * ey - wy * ex) / denom;
        let u = (wx * dy - wy * dx) / denom;

        if t >= 0.0 && (-GEOMETRY_EPSILON..=1.0 + GEOMETRY_EPSILON).contains(&u) {
            nearest = Some(nearest.map_or(t, |best: f64| best.min(t)));
        }
    }
    Ok(nearest)
}

fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// True when segments `a1-a2` and `b1-b2` properly cross. Touching at an
/// endpoint or running collinear does not count.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    ((d1 > GEOMETRY_EPSILON && d2 < -GEOMETRY_EPSILON)
        || (d1 < -GEOMETRY_EPSILON && d2 > GEOMETRY_EPSILON))
        && ((d3 > GEOMETRY_EPSILON && d4 < -GEOMETRY_EPSILON)
            || (d3 < -GEOMETRY_EPSILON && d4 > GEOMETRY_EPSILON))
}

/// True when any edge of polygon `a` properly crosses any edge of `b`.
pub fn polygons_cross(a: &[Point], b: &[Point]) -> bool {
    let (na, nb) = (a.len(), b.len());
    (0..na).any(|i| {
        let (a1, a2) = (a[i], a[(i + 1) % na]);
        (0..nb).any(|j| segments_intersect(a1, a2, b[j], b[(j + 1) % nb]))
    })
}
