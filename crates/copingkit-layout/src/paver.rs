//! Paver records and the logical edges of the coping ring.
//!
//! Pavers are immutable values: every transform returns a new record.

use nalgebra::{Matrix2, Rotation2, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use copingkit_core::{Bounds, LayoutError, PaverSize, Point};

/// One of the four logical sides of the coping ring.
///
/// Compass names are used by the generator; the pool names are aliases
/// (leftSide = north, rightSide = south, shallowEnd = west, deepEnd = east).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Edge {
    North,
    South,
    East,
    West,
    LeftSide,
    RightSide,
    ShallowEnd,
    DeepEnd,
}

impl Edge {
    /// Compass edges in clockwise screen order.
    pub const COMPASS: [Edge; 4] = [Edge::North, Edge::East, Edge::South, Edge::West];

    /// Compass equivalent of this edge.
    pub fn compass(self) -> Edge {
        match self {
            Edge::North | Edge::LeftSide => Edge::North,
            Edge::South | Edge::RightSide => Edge::South,
            Edge::East | Edge::DeepEnd => Edge::East,
            Edge::West | Edge::ShallowEnd => Edge::West,
        }
    }

    /// Sides run along the pool's length; rows on them stack by paver height.
    pub fn is_side(self) -> bool {
        matches!(self.compass(), Edge::North | Edge::South)
    }

    /// Ends close the pool's length; rows on them stack by paver width.
    pub fn is_end(self) -> bool {
        !self.is_side()
    }

    /// Same logical edge, ignoring compass/pool naming.
    pub fn same_edge(self, other: Edge) -> bool {
        self.compass() == other.compass()
    }

    pub fn opposite(self) -> Edge {
        match self {
            Edge::North => Edge::South,
            Edge::South => Edge::North,
            Edge::East => Edge::West,
            Edge::West => Edge::East,
            Edge::LeftSide => Edge::RightSide,
            Edge::RightSide => Edge::LeftSide,
            Edge::ShallowEnd => Edge::DeepEnd,
            Edge::DeepEnd => Edge::ShallowEnd,
        }
    }

    /// Compass edge just before this one in clockwise order; the side that
    /// ends where this one starts.
    pub fn preceding(self) -> Edge {
        match self.compass() {
            Edge::North => Edge::West,
            Edge::East => Edge::North,
            Edge::South => Edge::East,
            _ => Edge::South,
        }
    }

    /// Unit vector pointing away from the pool across this edge (y down).
    pub fn direction_vector(self) -> (f64, f64) {
        match self.compass() {
            Edge::North => (0.0, -1.0),
            Edge::South => (0.0, 1.0),
            Edge::East => (1.0, 0.0),
            _ => (-1.0, 0.0),
        }
    }

    /// Edge whose outward direction best matches the given normal.
    pub fn from_outward_normal(nx: f64, ny: f64) -> Edge {
        if ny.abs() >= nx.abs() {
            if ny < 0.0 {
                Edge::North
            } else {
                Edge::South
            }
        } else if nx > 0.0 {
            Edge::East
        } else {
            Edge::West
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::North => "north",
            Edge::South => "south",
            Edge::East => "east",
            Edge::West => "west",
            Edge::LeftSide => "leftSide",
            Edge::RightSide => "rightSide",
            Edge::ShallowEnd => "shallowEnd",
            Edge::DeepEnd => "deepEnd",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Edge {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "north" | "n" => Ok(Edge::North),
            "south" | "s" => Ok(Edge::South),
            "east" | "e" => Ok(Edge::East),
            "west" | "w" => Ok(Edge::West),
            "leftside" => Ok(Edge::LeftSide),
            "rightside" => Ok(Edge::RightSide),
            "shallowend" => Ok(Edge::ShallowEnd),
            "deepend" => Ok(Edge::DeepEnd),
            _ => Err(LayoutError::UnknownEdge {
                edge: s.to_string(),
            }),
        }
    }
}

/// Which collection of the layout a paver belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaverCategory {
    Corner,
    Full,
    Stripe,
}

/// A single placed paver.
///
/// The footprint is `position + R(rotation) * (a, b)` for `a` in
/// `[0, width]` and `b` in `[0, height]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paver {
    pub id: String,
    pub position: Point,
    pub size: PaverSize,
    /// Rotation angle in degrees
    pub rotation: f64,
    pub category: PaverCategory,
    pub edge: Edge,
    /// 0 = at the waterline
    pub row_index: u32,
    pub column_index: u32,
    pub is_corner: bool,
    #[serde(default)]
    pub extension_direction: Option<Edge>,
    /// Continuous cut row placed against a boundary
    #[serde(default)]
    pub is_partial: bool,
    /// Uncut catalogue size
    pub nominal_size: PaverSize,
    /// Id stem shared by every extension row grown from one waterline paver
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_root: Option<String>,
}

/// Normalizes an angle to `[0, 360)`, snapping values within 1e-9 of a
/// quarter turn onto it.
pub fn normalize_rotation(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    let quarter = (normalized / 90.0).round();
    if (normalized - quarter * 90.0).abs() < 1e-9 {
        (quarter * 90.0) % 360.0
    } else {
        normalized
    }
}

/// Rotation with exact values at quarter turns so axis-aligned layouts stay
/// free of rounding noise.
fn rotation_for(degrees: f64) -> Rotation2<f64> {
    let normalized = normalize_rotation(degrees);
    let quarter = (normalized / 90.0).round();
    let (sin, cos) = if (normalized - quarter * 90.0).abs() < 1e-9 {
        match quarter as i64 % 4 {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        }
    } else {
        normalized.to_radians().sin_cos()
    };
    Rotation2::from_matrix_unchecked(Matrix2::new(cos, -sin, sin, cos))
}

impl Paver {
    /// The four footprint corners in local order (0,0), (w,0), (w,h), (0,h).
    pub fn footprint(&self) -> [Point; 4] {
        let rot = rotation_for(self.rotation);
        let origin = Vector2::new(self.position.x, self.position.y);
        let (w, h) = (self.size.width, self.size.height);
        [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)].map(|(a, b)| {
            let v = origin + rot * Vector2::new(a, b);
            Point::new(v.x, v.y)
        })
    }

    pub fn bounds(&self) -> Bounds {
        let fp = self.footprint();
        let mut b = Bounds::new(fp[0].x, fp[0].y, fp[0].x, fp[0].y);
        for p in &fp[1..] {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        b
    }

    pub fn area_mm2(&self) -> f64 {
        self.size.area_mm2()
    }

    /// Whether the paver lies on `edge`. A corner starts one side and ends
    /// the one before it, so it lies on both.
    pub fn on_edge(&self, edge: Edge) -> bool {
        self.edge.same_edge(edge)
            || (self.is_corner && self.edge.preceding() == edge.compass())
    }

    /// Dimension perpendicular to the paver's edge.
    pub fn depth(&self) -> f64 {
        if self.edge.is_side() {
            self.size.height
        } else {
            self.size.width
        }
    }

    /// Dimension running along the paver's edge.
    pub fn along_edge_length(&self) -> f64 {
        if self.edge.is_side() {
            self.size.width
        } else {
            self.size.height
        }
    }

    /// Min and max of the footprint projected on `(dx, dy)`.
    pub fn extent_along(&self, dx: f64, dy: f64) -> (f64, f64) {
        self.footprint()
            .iter()
            .map(|p| p.x * dx + p.y * dy)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Paver {
        Paver {
            position: Point::new(self.position.x + dx, self.position.y + dy),
            ..self.clone()
        }
    }

    /// True when the local width axis runs closer to `(dx, dy)` than the
    /// local height axis does.
    fn width_faces(&self, dx: f64, dy: f64) -> bool {
        let rot = rotation_for(self.rotation);
        let x_axis = rot * Vector2::new(1.0, 0.0);
        let y_axis = rot * Vector2::new(0.0, 1.0);
        let along = Vector2::new(dx, dy);
        x_axis.dot(&along).abs() > y_axis.dot(&along).abs()
    }

    /// Size of the paver measured along `(dx, dy)`.
    pub fn depth_along(&self, dx: f64, dy: f64) -> f64 {
        let (lo, hi) = self.extent_along(dx, dy);
        hi - lo
    }

    /// Copy with the dimension facing `(dx, dy)` replaced by `depth`. The
    /// footprint keeps its near edge (minimum projection) in place.
    pub fn with_depth_along(&self, dx: f64, dy: f64, depth: f64) -> Paver {
        let size = if self.width_faces(dx, dy) {
            PaverSize::new(depth, self.size.height)
        } else {
            PaverSize::new(self.size.width, depth)
        };
        let (lo, _) = self.extent_along(dx, dy);
        let resized = Paver {
            size,
            ..self.clone()
        };
        let (new_lo, _) = resized.extent_along(dx, dy);
        let shift = lo - new_lo;
        resized.translated(dx * shift, dy * shift)
    }

    pub fn with_id(&self, id: impl Into<String>) -> Paver {
        Paver {
            id: id.into(),
            ..self.clone()
        }
    }

    /// Stripe pavers are cut along the edge from a nominal full paver.
    pub fn is_cut(&self) -> bool {
        self.category == PaverCategory::Stripe || self.is_partial
    }
}
