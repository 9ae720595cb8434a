//! Lane assignment for overlapping connector segments.
//!
//! Connectors sharing a corridor would otherwise be drawn on top of each
//! other. Segments that sit on the same coordinate and overlap are moved onto
//! evenly spaced parallel lanes, first on the x axis, then on the y axis.

use std::collections::HashMap;

use crate::geometry::{Orientation, Path, Segment, same_coordinate};

/// Lane counts for one shared coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaneUsage {
    pub total: usize,
    pub used: usize,
}

/// Lane bookkeeping for a single axis pass, keyed by the shared coordinate.
pub type LaneBook = HashMap<u64, LaneUsage>;

/// An interior segment that may be moved sideways.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    path: usize,
    /// Segment index: points `index` and `index + 1`
    index: usize,
    fixed: f64,
    span: (f64, f64),
}

/// Segments sharing one coordinate, in discovery order.
struct CoordinateGroup {
    fixed: f64,
    members: Vec<Candidate>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Shift {
    path: usize,
    index: usize,
    delta: f64,
}

/// Offset of lane `used` (1-based) out of `total`, spreading lanes evenly
/// inside `[-spread, spread]`.
#[inline]
pub fn lane_offset(usage: LaneUsage, spread: f64) -> f64 {
    -spread + usage.used as f64 * 2.0 * spread / (usage.total + 1) as f64
}

/// Spread overlapping segments of all paths. `x_spread` and `y_spread` are
/// the half-widths of the lane bands on each axis.
pub fn resolve_overlaps(paths: &[Path], x_spread: f64, y_spread: f64) -> Vec<Path> {
    let after_x = resolve_axis(paths, Orientation::Vertical, x_spread);
    resolve_axis(&after_x, Orientation::Horizontal, y_spread)
}

/// One pass over segments of the given orientation. Vertical segments move
/// along x, horizontal ones along y.
pub fn resolve_axis(paths: &[Path], orientation: Orientation, spread: f64) -> Vec<Path> {
    let groups = group_by_coordinate(collect_candidates(paths, orientation));
    let (shifts, book) = assign_lanes(&groups, spread, LaneBook::new());
    tracing::trace!(
        ?orientation,
        shared = book.len(),
        moved = shifts.len(),
        "lane pass"
    );
    apply_shifts(paths, orientation, &shifts)
}

fn collect_candidates(paths: &[Path], orientation: Orientation) -> Vec<Candidate> {
    let mut out = Vec::new();
    for (path_idx, path) in paths.iter().enumerate() {
        let segments: Vec<Segment> = crate::geometry::segments(path).collect();
        if segments.len() < 3 {
            continue;
        }
        // First and last segments stay attached to their documents.
        for index in 1..segments.len() - 1 {
            let seg = segments[index];
            if seg.orientation() != Some(orientation) {
                continue;
            }
            let across = Some(orientation.perpendicular());
            if segments[index - 1].orientation() != across
                || segments[index + 1].orientation() != across
            {
                continue;
            }
            out.push(Candidate {
                path: path_idx,
                index,
                fixed: seg.fixed_coordinate(orientation),
                span: seg.span(orientation),
            });
        }
    }
    out
}

/// Coordinates that differ only by rounding share a group, keyed by the
/// first member's value.
fn group_by_coordinate(candidates: Vec<Candidate>) -> Vec<CoordinateGroup> {
    let mut groups: Vec<CoordinateGroup> = Vec::new();
    for candidate in candidates {
        match groups
            .iter_mut()
            .find(|g| same_coordinate(g.fixed, candidate.fixed))
        {
            Some(group) => group.members.push(candidate),
            None => groups.push(CoordinateGroup {
                fixed: candidate.fixed,
                members: vec![candidate],
            }),
        }
    }
    groups
}

fn spans_overlap(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}

/// Members of the group that overlap another member, in the order the pair
/// scan first reaches them.
fn overlapping_members(group: &CoordinateGroup) -> Vec<Candidate> {
    let members = &group.members;
    let mut order: Vec<usize> = Vec::new();
    for i in 0..members.len() {
        for j in (i + 1)..members.len() {
            if spans_overlap(members[i].span, members[j].span) {
                for k in [i, j] {
                    if !order.contains(&k) {
                        order.push(k);
                    }
                }
            }
        }
    }
    order.into_iter().map(|k| members[k]).collect()
}

fn coordinate_key(fixed: f64) -> u64 {
    // Normalizes -0.0 to 0.0
    (fixed + 0.0).to_bits()
}

fn assign_lanes(groups: &[CoordinateGroup], spread: f64, book: LaneBook) -> (Vec<Shift>, LaneBook) {
    groups
        .iter()
        .fold((Vec::new(), book), |(mut shifts, mut book), group| {
            let participants = overlapping_members(group);
            if participants.is_empty() {
                return (shifts, book);
            }
            let key = coordinate_key(group.fixed);
            book.insert(
                key,
                LaneUsage {
                    total: participants.len(),
                    used: 0,
                },
            );
            for candidate in participants {
                let usage = book.entry(key).or_default();
                usage.used += 1;
                shifts.push(Shift {
                    path: candidate.path,
                    index: candidate.index,
                    delta: lane_offset(*usage, spread),
                });
            }
            (shifts, book)
        })
}

fn apply_shifts(paths: &[Path], orientation: Orientation, shifts: &[Shift]) -> Vec<Path> {
    let mut out: Vec<Path> = paths.to_vec();
    for shift in shifts {
        let path = &mut out[shift.path];
        // Both endpoints move; neighbouring segments read the same vertices.
        for point in &mut path[shift.index..=shift.index + 1] {
            match orientation {
                Orientation::Vertical => point.x += shift.delta,
                Orientation::Horizontal => point.y += shift.delta,
            }
        }
    }
    out
}
