//! Obstacle corner points: the only waypoints a middle path may turn at.

use crate::config::RoutingConfig;
use crate::geometry::{Point, Rect, same_coordinate};

use super::types::AnchorPath;

/// Corridor lines around the two documents of a connection: the grown left
/// and right edges as x values, the grown top and bottom edges as y values.
///
/// Neighbouring documents share corridors, but `a.right() + dx` and
/// `b.left() - dx` need not round to the same float. Values that agree up to
/// rounding collapse onto the first one seen (start document first), and
/// corners and anchor exits are snapped onto these lines so the search can
/// compare coordinates exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct CorridorLines {
    dx: f64,
    dy: f64,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl CorridorLines {
    pub fn new(start_doc: &Rect, end_doc: &Rect, config: &RoutingConfig) -> Self {
        let dx = config.half_column_gap();
        let dy = config.half_row_gap();
        let mut lines = Self {
            dx,
            dy,
            xs: Vec::with_capacity(4),
            ys: Vec::with_capacity(4),
        };
        for doc in [start_doc, end_doc] {
            register(&mut lines.xs, doc.outer_left(dx));
            register(&mut lines.xs, doc.outer_right(dx));
            register(&mut lines.ys, doc.outer_top(dy));
            register(&mut lines.ys, doc.outer_bottom(dy));
        }
        lines
    }

    pub fn snap_x(&self, x: f64) -> f64 {
        snap(&self.xs, x)
    }

    pub fn snap_y(&self, y: f64) -> f64 {
        snap(&self.ys, y)
    }

    /// Move an anchor exit onto its corridor line. Only the outward
    /// coordinate changes, so the anchor stays one axis-aligned segment.
    pub fn snap_exit(&self, anchor: AnchorPath) -> AnchorPath {
        let AnchorPath { start, exit } = anchor;
        let exit = if start.x == exit.x {
            Point::new(exit.x, self.snap_y(exit.y))
        } else {
            Point::new(self.snap_x(exit.x), exit.y)
        };
        AnchorPath { start, exit }
    }

    /// Grown corners of both documents, in the order top-left, top-right,
    /// bottom-right, bottom-left, start document first. Duplicates keep their
    /// first position, and corners that fall inside either document are
    /// dropped.
    pub fn corners(&self, start_doc: &Rect, end_doc: &Rect) -> Vec<Point> {
        let mut corners: Vec<Point> = Vec::with_capacity(8);
        for doc in [start_doc, end_doc] {
            for corner in doc.expanded_corners(self.dx, self.dy) {
                let corner = Point::new(self.snap_x(corner.x), self.snap_y(corner.y));
                if corners.contains(&corner) {
                    continue;
                }
                if start_doc.contains_strictly(corner) || end_doc.contains_strictly(corner) {
                    continue;
                }
                corners.push(corner);
            }
        }
        corners
    }
}

fn register(lines: &mut Vec<f64>, value: f64) {
    if !lines.iter().any(|&line| same_coordinate(line, value)) {
        lines.push(value);
    }
}

fn snap(lines: &[f64], value: f64) -> f64 {
    lines
        .iter()
        .copied()
        .find(|&line| same_coordinate(line, value))
        .unwrap_or(value)
}

/// Corners of both documents grown by half the configured gaps.
///
/// Shorthand for [`CorridorLines::corners`] on the documents' own lines.
pub fn obstacle_corners(start_doc: &Rect, end_doc: &Rect, config: &RoutingConfig) -> Vec<Point> {
    CorridorLines::new(start_doc, end_doc, config).corners(start_doc, end_doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::anchors::calculate_anchor;

    #[test]
    fn test_eight_distinct_corners() {
        let config = RoutingConfig::new(20.0, 10.0).unwrap();
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(300.0, 0.0, 100.0, 100.0);
        let corners = obstacle_corners(&a, &b, &config);
        assert_eq!(
            corners,
            vec![
                Point::new(-10.0, -5.0),
                Point::new(110.0, -5.0),
                Point::new(110.0, 105.0),
                Point::new(-10.0, 105.0),
                Point::new(290.0, -5.0),
                Point::new(410.0, -5.0),
                Point::new(410.0, 105.0),
                Point::new(290.0, 105.0),
            ]
        );
    }

    #[test]
    fn test_shared_corridor_corners_deduplicated() {
        let config = RoutingConfig::new(150.0, 150.0).unwrap();
        let a = Rect::new(0.0, 0.0, 2500.0, 1617.0);
        let b = Rect::new(2650.0, 0.0, 2500.0, 1617.0);
        let corners = obstacle_corners(&a, &b, &config);
        assert_eq!(corners.len(), 6);
        assert_eq!(corners[1], Point::new(2575.0, -75.0));
        assert_eq!(corners[2], Point::new(2575.0, 1692.0));
    }

    #[test]
    fn test_same_document_twice() {
        let config = RoutingConfig::new(20.0, 20.0).unwrap();
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(obstacle_corners(&a, &a, &config).len(), 4);
    }

    #[test]
    fn test_corner_inside_other_document_dropped() {
        let config = RoutingConfig::new(100.0, 100.0).unwrap();
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        // b starts 20 units right of a; its grown left edge lands inside a
        let b = Rect::new(120.0, -200.0, 100.0, 500.0);
        let corners = obstacle_corners(&a, &b, &config);
        assert!(corners
            .iter()
            .all(|c| !a.contains_strictly(*c) && !b.contains_strictly(*c)));
        // a's right-hand corners fall inside b
        assert!(!corners.contains(&Point::new(150.0, -50.0)));
        assert!(!corners.contains(&Point::new(150.0, 150.0)));
    }

    #[test]
    fn test_rounded_shared_corridor_deduplicated() {
        // Side by side; the shared column corridor rounds differently from each side.
        let (w, col) = (223.702385, 254.491343);
        let config = RoutingConfig::new(col, 40.0).unwrap();
        let a = Rect::new(0.0, 0.0, w, 300.0);
        let b = Rect::new(w + col, 0.0, w, 300.0);
        let dx = config.half_column_gap();
        assert_ne!(a.outer_right(dx), b.outer_left(dx));

        let corners = obstacle_corners(&a, &b, &config);
        assert_eq!(corners.len(), 6, "{corners:?}");
        assert_eq!(corners[1], Point::new(a.outer_right(dx), -20.0));
        assert_eq!(corners[2], Point::new(a.outer_right(dx), 320.0));

        let lines = CorridorLines::new(&a, &b, &config);
        assert_eq!(lines.snap_x(b.outer_left(dx)), a.outer_right(dx));
    }

    #[test]
    fn test_exits_land_on_corner_lines() {
        let (w, h, row) = (1864.9498891862338, 200.0, 48.5367611318828);
        let config = RoutingConfig::new(20.0, row).unwrap();
        let a = Rect::new(0.0, 0.0, w, h);
        let b = Rect::new(0.0, h + row, w, h);
        let lines = CorridorLines::new(&a, &b, &config);
        let corners = lines.corners(&a, &b);

        // near the bottom edge of the lower document
        let annotation = Rect::new(285.10579796792416, 423.39676113188284, 10.0, 10.0);
        let exit = lines.snap_exit(calculate_anchor(&annotation, &b, &config)).exit;
        assert!(corners.iter().any(|c| c.y == exit.y), "{exit:?} vs {corners:?}");

        // leaving the upper document downward meets the shared corridor
        let annotation = Rect::new(900.0, 185.0, 10.0, 10.0);
        let anchor = lines.snap_exit(calculate_anchor(&annotation, &a, &config));
        assert_eq!(anchor.start.x, anchor.exit.x);
        assert!(corners.iter().any(|c| c.y == anchor.exit.y));
    }

    #[test]
    fn test_snap_leaves_other_values() {
        let config = RoutingConfig::new(20.0, 10.0).unwrap();
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let lines = CorridorLines::new(&a, &a, &config);
        let near = f64::from_bits(110.0_f64.to_bits() + 1);
        assert_eq!(lines.snap_x(near), 110.0);
        assert_eq!(lines.snap_x(50.0), 50.0);
        assert_eq!(lines.snap_y(-5.0), -5.0);
    }
}
