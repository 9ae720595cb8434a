//! Middle-path search between two anchor exits.
//!
//! The search space is the handful of obstacle corners, so an exhaustive
//! depth-first walk is cheap. Every completed candidate is collected and the
//! best one is picked afterwards.

use crate::geometry::{Path, Point, Rect, Segment, manhattan_length};

/// Lengths closer than this are treated as equal.
const LENGTH_EPSILON: f64 = 1e-9;

/// Inputs for one middle-path search.
pub struct MiddlePathSearch<'a> {
    pub start: Point,
    pub end: Point,
    pub corners: &'a [Point],
    /// Documents the path must not cut through.
    pub obstacles: &'a [Rect],
}

impl MiddlePathSearch<'_> {
    /// Every admissible path from `start` to `end`, in discovery order.
    pub fn candidates(&self) -> Vec<Path> {
        let mut found = Vec::new();
        self.explore(&[self.start], &mut found);
        tracing::trace!(count = found.len(), "middle path candidates");
        found
    }

    /// The shortest candidate; fewer points break ties, then discovery order.
    pub fn shortest(&self) -> Option<Path> {
        select_shortest(self.candidates())
    }

    fn explore(&self, path: &[Point], found: &mut Vec<Path>) {
        let Some(&last) = path.last() else {
            return;
        };

        if last == self.end {
            found.push(path.to_vec());
            return;
        }
        // A blocked straight close falls through to turning at a corner.
        if last.is_aligned_with(&self.end) && self.is_clear(last, self.end) {
            let mut complete = path.to_vec();
            complete.push(self.end);
            found.push(complete);
            return;
        }

        let previous = path.len().checked_sub(2).map(|i| path[i]);
        for &corner in self.corners {
            if path.contains(&corner) || !corner.is_aligned_with(&last) {
                continue;
            }
            if let Some(prev) = previous
                && continues_straight(prev, last, corner)
            {
                continue;
            }
            if !self.is_clear(last, corner) {
                continue;
            }
            let mut next = path.to_vec();
            next.push(corner);
            self.explore(&next, found);
        }
    }

    fn is_clear(&self, a: Point, b: Point) -> bool {
        let segment = Segment::new(a, b);
        !self.obstacles.iter().any(|rect| rect.is_crossed_by(&segment))
    }
}

/// True when `next` keeps moving along the line from `prev` to `last`.
fn continues_straight(prev: Point, last: Point, next: Point) -> bool {
    if prev == last {
        return false;
    }
    (prev.y == last.y && last.y == next.y) || (prev.x == last.x && last.x == next.x)
}

/// Pick the path with the smallest Manhattan length, then the fewest points,
/// then the earliest one.
pub fn select_shortest(candidates: Vec<Path>) -> Option<Path> {
    let mut best: Option<(f64, Path)> = None;
    for path in candidates {
        let length = manhattan_length(&path);
        let better = match &best {
            None => true,
            Some((best_len, best_path)) => {
                length < best_len - LENGTH_EPSILON
                    || ((length - best_len).abs() <= LENGTH_EPSILON
                        && path.len() < best_path.len())
            }
        };
        if better {
            best = Some((length, path));
        }
    }
    best.map(|(_, path)| path)
}
