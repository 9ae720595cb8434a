//! Canvas geometry: points, rectangles and orthogonal segments.

use serde::{Deserialize, Serialize};

/// Relative tolerance under which two coordinates name the same line.
pub const COORD_EPSILON: f64 = 1e-9;

/// True when `a` and `b` differ only by rounding.
pub fn same_coordinate(a: f64, b: f64) -> bool {
    (a - b).abs() <= COORD_EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// A point in canvas coordinates (y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when the two points lie on one horizontal or vertical line.
    pub fn is_aligned_with(&self, other: &Point) -> bool {
        self.x == other.x || self.y == other.y
    }

    pub fn manhattan_distance(&self, other: &Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Left edge pushed outward by `dx`.
    pub fn outer_left(&self, dx: f64) -> f64 {
        self.left() - dx
    }

    pub fn outer_right(&self, dx: f64) -> f64 {
        self.right() + dx
    }

    pub fn outer_top(&self, dy: f64) -> f64 {
        self.top() - dy
    }

    pub fn outer_bottom(&self, dy: f64) -> f64 {
        self.bottom() + dy
    }

    /// Corners of the rectangle grown by `dx` horizontally and `dy`
    /// vertically, in the order top-left, top-right, bottom-right,
    /// bottom-left. Built from the `outer_*` edges, so each value is
    /// bit-identical to an anchor exit computed for the same edge.
    pub fn expanded_corners(&self, dx: f64, dy: f64) -> [Point; 4] {
        let (left, right) = (self.outer_left(dx), self.outer_right(dx));
        let (top, bottom) = (self.outer_top(dy), self.outer_bottom(dy));
        [
            Point::new(left, top),
            Point::new(right, top),
            Point::new(right, bottom),
            Point::new(left, bottom),
        ]
    }

    /// Strict containment: points on the border are outside.
    pub fn contains_strictly(&self, p: Point) -> bool {
        p.x > self.left() && p.x < self.right() && p.y > self.top() && p.y < self.bottom()
    }

    /// True when the segment passes through the open interior of the rectangle.
    /// Segments running along the border do not count.
    pub fn is_crossed_by(&self, segment: &Segment) -> bool {
        let (a, b) = (segment.a, segment.b);
        match segment.orientation() {
            Some(Orientation::Horizontal) => {
                a.y > self.top()
                    && a.y < self.bottom()
                    && a.x.max(b.x) > self.left()
                    && a.x.min(b.x) < self.right()
            }
            Some(Orientation::Vertical) => {
                a.x > self.left()
                    && a.x < self.right()
                    && a.y.max(b.y) > self.top()
                    && a.y.min(b.y) < self.bottom()
            }
            None => self.contains_strictly(a),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn perpendicular(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A straight piece of a path between two consecutive points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// `None` for zero-length or diagonal segments.
    pub fn orientation(&self) -> Option<Orientation> {
        let same_x = self.a.x == self.b.x;
        let same_y = self.a.y == self.b.y;
        match (same_x, same_y) {
            (false, true) => Some(Orientation::Horizontal),
            (true, false) => Some(Orientation::Vertical),
            _ => None,
        }
    }

    /// The coordinate that stays constant along the segment.
    pub fn fixed_coordinate(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.a.y,
            Orientation::Vertical => self.a.x,
        }
    }

    /// The `(min, max)` range the segment covers along its own direction.
    pub fn span(&self, orientation: Orientation) -> (f64, f64) {
        let (p, q) = match orientation {
            Orientation::Horizontal => (self.a.x, self.b.x),
            Orientation::Vertical => (self.a.y, self.b.y),
        };
        (p.min(q), p.max(q))
    }

    pub fn length(&self) -> f64 {
        self.a.manhattan_distance(&self.b)
    }
}

/// An orthogonal polyline from the start annotation to the end annotation.
pub type Path = Vec<Point>;

/// Iterate over the segments of a path.
pub fn segments(path: &[Point]) -> impl Iterator<Item = Segment> + '_ {
    path.windows(2).map(|w| Segment::new(w[0], w[1]))
}

/// Sum of `|dx| + |dy|` over consecutive points.
pub fn manhattan_length(path: &[Point]) -> f64 {
    segments(path).map(|s| s.length()).sum()
}

/// True when every consecutive pair differs in exactly one coordinate.
pub fn is_orthogonal(path: &[Point]) -> bool {
    path.len() >= 2 && segments(path).all(|s| s.orientation().is_some())
}

/// Drop repeated points and points lying in the middle of a straight run.
pub fn simplify(path: &[Point]) -> Path {
    let mut out: Path = Vec::with_capacity(path.len());
    for &p in path {
        if out.last() == Some(&p) {
            continue;
        }
        if out.len() >= 2 {
            let prev = out[out.len() - 2];
            let mid = out[out.len() - 1];
            let collinear = (prev.x == mid.x && mid.x == p.x) || (prev.y == mid.y && mid.y == p.y);
            if collinear && !doubles_back(prev, mid, p) {
                out.pop();
            }
        }
        out.push(p);
    }
    out
}

fn doubles_back(prev: Point, mid: Point, next: Point) -> bool {
    let d1 = (mid.x - prev.x) + (mid.y - prev.y);
    let d2 = (next.x - mid.x) + (next.y - mid.y);
    d1.signum() != d2.signum()
}
