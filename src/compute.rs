/// Pure game-logic functions.
///
/// Nothing here owns state: callers pass in the current geometry and get a
/// verdict back.

use crate::entities::{PairId, PairMark, Rect};

// ── Collision ────────────────────────────────────────────────────────────────

/// True when `entity` overlaps any of `obstacles` on both axes.
pub fn collides<'a>(entity: &Rect, obstacles: impl IntoIterator<Item = &'a Rect>) -> bool {
    obstacles.into_iter().any(|o| entity.intersects(o))
}

// ── Scoring ──────────────────────────────────────────────────────────────────

/// Points earned this tick and the updated "last pair passed" marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crossings {
    pub points: u32,
    pub last_passed: Option<PairId>,
}

/// Count pairs whose trailing edge is now left of `entity_left` and that
/// have not been scored yet.
///
/// Ids grow with spawn order, so anything at or below `last_passed` has
/// already been counted. A pair scores once no matter how many ticks the
/// entity spends past it.
pub fn score_crossings(
    marks: &[PairMark],
    entity_left: f32,
    last_passed: Option<PairId>,
) -> Crossings {
    let mut crossings = Crossings {
        points: 0,
        last_passed,
    };
    for mark in marks {
        let fresh = crossings.last_passed.map_or(true, |last| mark.id > last);
        if fresh && mark.trailing_edge < entity_left {
            crossings.points += 1;
            crossings.last_passed = Some(mark.id);
        }
    }
    crossings
}
