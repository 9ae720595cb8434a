//! Anchor calculation: where a connector leaves its document.

use crate::config::RoutingConfig;
use crate::geometry::{Point, Rect};

use super::types::AnchorPath;

/// Document side a connector exits through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Left,
    Right,
    Bottom,
}

impl Side {
    /// Tie-break order when two sides are equally close.
    pub const ORDER: [Side; 4] = [Side::Top, Side::Left, Side::Right, Side::Bottom];
}

/// Distance from each annotation edge to the matching document edge, in `Side::ORDER`.
fn edge_distances(annotation: &Rect, document: &Rect) -> [f64; 4] {
    [
        annotation.top() - document.top(),
        annotation.left() - document.left(),
        document.right() - annotation.right(),
        document.bottom() - annotation.bottom(),
    ]
}

/// Pick the document side closest to the annotation. The first minimum in
/// top, left, right, bottom order wins.
pub fn nearest_side(annotation: &Rect, document: &Rect) -> Side {
    let distances = edge_distances(annotation, document);
    let mut best = 0;
    for (i, &d) in distances.iter().enumerate().skip(1) {
        if d < distances[best] {
            best = i;
        }
    }
    Side::ORDER[best]
}

/// Build the two-point path from the annotation out of its document. The exit
/// sits on the document's grown edge, the same line its obstacle corners use.
pub fn calculate_anchor(annotation: &Rect, document: &Rect, config: &RoutingConfig) -> AnchorPath {
    let side = nearest_side(annotation, document);
    let cx = annotation.center_x();
    let cy = annotation.center_y();

    let (start, exit) = match side {
        Side::Top => (
            Point::new(cx, annotation.top()),
            Point::new(cx, document.outer_top(config.half_row_gap())),
        ),
        Side::Left => (
            Point::new(annotation.left(), cy),
            Point::new(document.outer_left(config.half_column_gap()), cy),
        ),
        Side::Right => (
            Point::new(annotation.right(), cy),
            Point::new(document.outer_right(config.half_column_gap()), cy),
        ),
        Side::Bottom => (
            Point::new(cx, annotation.bottom()),
            Point::new(cx, document.outer_bottom(config.half_row_gap())),
        ),
    };

    AnchorPath { start, exit }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 600.0)
    }

    fn config() -> RoutingConfig {
        RoutingConfig::new(100.0, 60.0).unwrap()
    }

    #[test]
    fn test_exit_top() {
        let ann = Rect::new(400.0, 20.0, 40.0, 20.0);
        assert_eq!(nearest_side(&ann, &doc()), Side::Top);
        let anchor = calculate_anchor(&ann, &doc(), &config());
        assert_eq!(anchor.start, Point::new(420.0, 20.0));
        assert_eq!(anchor.exit, Point::new(420.0, -30.0));
    }

    #[test]
    fn test_exit_left() {
        let ann = Rect::new(10.0, 300.0, 40.0, 20.0);
        let anchor = calculate_anchor(&ann, &doc(), &config());
        assert_eq!(anchor.start, Point::new(10.0, 310.0));
        assert_eq!(anchor.exit, Point::new(-50.0, 310.0));
    }

    #[test]
    fn test_exit_right() {
        let ann = Rect::new(950.0, 300.0, 40.0, 20.0);
        let anchor = calculate_anchor(&ann, &doc(), &config());
        assert_eq!(anchor.start, Point::new(990.0, 310.0));
        assert_eq!(anchor.exit, Point::new(1050.0, 310.0));
    }

    #[test]
    fn test_exit_bottom() {
        let ann = Rect::new(500.0, 570.0, 40.0, 20.0);
        let anchor = calculate_anchor(&ann, &doc(), &config());
        assert_eq!(anchor.start, Point::new(520.0, 590.0));
        assert_eq!(anchor.exit, Point::new(520.0, 630.0));
    }

    #[test]
    fn test_tie_break_order() {
        // top == left
        let ann = Rect::new(100.0, 100.0, 50.0, 50.0);
        assert_eq!(nearest_side(&ann, &doc()), Side::Top);
        // left == right, both closer than top and bottom
        let ann = Rect::new(10.0, 200.0, 980.0, 100.0);
        assert_eq!(nearest_side(&ann, &doc()), Side::Left);
        // right == bottom
        let ann = Rect::new(900.0, 500.0, 90.0, 90.0);
        assert_eq!(nearest_side(&ann, &doc()), Side::Right);
        // all equal
        let ann = Rect::new(10.0, 10.0, 980.0, 580.0);
        assert_eq!(nearest_side(&ann, &doc()), Side::Top);
    }

    #[test]
    fn test_exit_outside_document_and_aligned() {
        let cfg = config();
        for ann in [
            Rect::new(400.0, 20.0, 40.0, 20.0),
            Rect::new(10.0, 300.0, 40.0, 20.0),
            Rect::new(950.0, 300.0, 40.0, 20.0),
            Rect::new(500.0, 570.0, 40.0, 20.0),
        ] {
            let anchor = calculate_anchor(&ann, &doc(), &cfg);
            let exit = anchor.exit;
            let d = doc();
            assert!(
                exit.x < d.left() || exit.x > d.right() || exit.y < d.top() || exit.y > d.bottom()
            );
            assert!(anchor.start.is_aligned_with(&exit));
            assert_ne!(anchor.start, exit);
        }
    }

    #[test]
    fn test_deterministic() {
        let ann = Rect::new(123.5, 77.25, 12.0, 9.0);
        let first = calculate_anchor(&ann, &doc(), &config());
        for _ in 0..10 {
            assert_eq!(calculate_anchor(&ann, &doc(), &config()), first);
        }
    }
}
