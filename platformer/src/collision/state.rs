//! Per-body collision state.
//!
//! A body keeps two of these: the current one, rebuilt by every `move_by`, and
//! a snapshot of the previous one taken at the start of that same call. Edge
//! events (landing, leaving ground, wall and ceiling contact) come from
//! comparing the two.

use super::types::{ProbeHit, ShapeId, Vec2};
use crate::bitmask_flags::BitmaskFlags;
use crate::constants::MAX_SIDE_HITS;
use crate::events::{ContactEvent, ContactEvents};

/// Up to [`MAX_SIDE_HITS`] hits on one side, at most one per shape.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SideHits {
    hits: [Option<ProbeHit>; MAX_SIDE_HITS],
    len: usize,
}

impl SideHits {
    /// Records a hit. Duplicates of an already recorded shape and hits past
    /// capacity are dropped; returns whether the hit was stored.
    pub fn push(&mut self, hit: ProbeHit) -> bool {
        if self.len >= MAX_SIDE_HITS || self.contains(hit.shape) {
            return false;
        }
        self.hits[self.len] = Some(hit);
        self.len += 1;
        true
    }

    pub fn contains(&self, shape: ShapeId) -> bool {
        self.iter().any(|h| h.shape == shape)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProbeHit> {
        self.hits[..self.len].iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.hits = [None; MAX_SIDE_HITS];
        self.len = 0;
    }
}

/// Ticks since each contact flag was last true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FramesSince {
    pub above: u32,
    pub below: u32,
    pub left: u32,
    pub right: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionState {
    pub above: bool,
    pub below: bool,
    pub left: bool,
    pub right: bool,

    /// Angle of the active slope from up, in degrees. 0 when flat.
    pub slope_angle: f32,
    pub slope_normal: Vec2,
    pub climbing_slope: bool,
    pub descending_slope: bool,
    /// Gap between the body and the start of a steeper slope ahead.
    pub distance_to_slope_start: f32,

    /// -1 or 1.
    pub face_dir: f32,
    /// Resolved displacement of the last move.
    pub velocity: Vec2,

    pub frames_since: FramesSince,
    pub left_hits: SideHits,
    pub right_hits: SideHits,

    /// Set by platform transport; survives [`reset`](Self::reset).
    pub standing_on_platform: bool,
    /// Set while dropping through a pass-through platform; survives resets.
    pub falling_through_platform: bool,
}

impl Default for CollisionState {
    fn default() -> Self {
        Self {
            above: false,
            below: false,
            left: false,
            right: false,
            slope_angle: 0.0,
            slope_normal: Vec2::zeros(),
            climbing_slope: false,
            descending_slope: false,
            distance_to_slope_start: 0.0,
            face_dir: 1.0,
            velocity: Vec2::zeros(),
            frames_since: FramesSince::default(),
            left_hits: SideHits::default(),
            right_hits: SideHits::default(),
            standing_on_platform: false,
            falling_through_platform: false,
        }
    }
}

impl CollisionState {
    /// Clears per-move results and ages the frame counters by one tick.
    pub fn reset(&mut self) {
        self.clear();
        let f = &mut self.frames_since;
        f.above = f.above.saturating_add(1);
        f.below = f.below.saturating_add(1);
        f.left = f.left.saturating_add(1);
        f.right = f.right.saturating_add(1);
    }

    /// Clears per-move results, leaving the frame counters alone.
    pub fn clear(&mut self) {
        self.above = false;
        self.below = false;
        self.left = false;
        self.right = false;
        self.climbing_slope = false;
        self.descending_slope = false;
        self.slope_angle = 0.0;
        self.slope_normal = Vec2::zeros();
        self.distance_to_slope_start = 0.0;
        self.left_hits.clear();
        self.right_hits.clear();
    }

    /// Hits on the side facing `dir_x`.
    pub fn side_hits(&self, dir_x: f32) -> &SideHits {
        if dir_x < 0.0 {
            &self.left_hits
        } else {
            &self.right_hits
        }
    }

    pub fn side_hits_mut(&mut self, dir_x: f32) -> &mut SideHits {
        if dir_x < 0.0 {
            &mut self.left_hits
        } else {
            &mut self.right_hits
        }
    }

    /// Zeroes the counters of true flags and returns the edges against
    /// `previous`.
    pub fn consolidate(&mut self, previous: &CollisionState) -> ContactEvents {
        if self.above {
            self.frames_since.above = 0;
        }
        if self.below {
            self.frames_since.below = 0;
        }
        if self.left {
            self.frames_since.left = 0;
        }
        if self.right {
            self.frames_since.right = 0;
        }

        let mut edges: ContactEvents = BitmaskFlags::default();
        if self.right && !previous.right {
            edges.add(ContactEvent::RightWall);
        }
        if self.left && !previous.left {
            edges.add(ContactEvent::LeftWall);
        }
        if self.above && !previous.above {
            edges.add(ContactEvent::Top);
        }
        if !self.below && previous.below {
            edges.add(ContactEvent::LeaveGround);
        }
        if self.below && !previous.below {
            edges.add(ContactEvent::Landing);
        }
        edges
    }

    /// On the ground now, or lost contact fewer than `grace_frames` ago.
    pub fn is_on_ground(&self, grace_frames: u32) -> bool {
        self.below || self.frames_since.below < grace_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: u32) -> ProbeHit {
        ProbeHit {
            shape: ShapeId(id),
            distance: 1.0,
            normal: Vec2::new(-1.0, 0.0),
            point: Vec2::zeros(),
        }
    }

    #[test]
    fn side_hits_dedup_and_cap() {
        let mut hits = SideHits::default();
        assert!(hits.push(hit(1)));
        assert!(!hits.push(hit(1)));
        assert!(hits.push(hit(2)));
        assert!(hits.push(hit(3)));
        assert!(!hits.push(hit(4)));
        assert_eq!(hits.len(), MAX_SIDE_HITS);
        assert!(!hits.contains(ShapeId(4)));
    }

    #[test]
    fn reset_keeps_platform_flags_and_ages_counters() {
        let mut state = CollisionState {
            below: true,
            standing_on_platform: true,
            falling_through_platform: true,
            ..Default::default()
        };
        state.right_hits.push(hit(7));
        state.reset();

        assert!(!state.below);
        assert!(state.right_hits.is_empty());
        assert!(state.standing_on_platform);
        assert!(state.falling_through_platform);
        assert_eq!(state.frames_since.below, 1);

        state.below = true;
        state.clear();
        assert!(!state.below);
        assert_eq!(state.frames_since.below, 1);
    }

    #[test]
    fn consolidate_reports_edges() {
        let previous = CollisionState {
            below: true,
            ..Default::default()
        };
        let mut current = CollisionState {
            left: true,
            above: true,
            ..Default::default()
        };
        current.frames_since.left = 4;

        let edges = current.consolidate(&previous);
        assert!(edges.has(ContactEvent::LeftWall));
        assert!(edges.has(ContactEvent::Top));
        assert!(edges.has(ContactEvent::LeaveGround));
        assert!(!edges.has(ContactEvent::Landing));
        assert_eq!(current.frames_since.left, 0);

        let mut landed = CollisionState {
            below: true,
            ..Default::default()
        };
        let edges = landed.consolidate(&current);
        assert!(edges.is_exactly(ContactEvent::Landing));
    }

    #[test]
    fn ground_grace_window() {
        let mut state = CollisionState::default();
        state.frames_since.below = 3;
        assert!(state.is_on_ground(4));
        assert!(!state.is_on_ground(3));
        assert!(!state.is_on_ground(0));

        state.below = true;
        assert!(state.is_on_ground(0));
    }
}
