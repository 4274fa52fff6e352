//! Waypoint path following with easing.
//!
//! # Model
//! - The path is a list of world-space waypoints (at least two).
//! - The platform travels segment `from -> (from + 1) % N`, tracking progress
//!   as a fraction in `[0, 1]`.
//! - Position on a segment is `lerp(from, to, ease(percent))` with
//!   `ease(x) = x^a / (x^a + (1 - x)^a)` and `a = ease_amount + 1`.
//!
//! # Bouncing
//! A non-cyclic path bounces by reversing the waypoint list in place whenever
//! the last segment is finished, so the segment index never exceeds `N - 2`.

use super::PlatformSettings;
use crate::collision::types::Vec2;
use crate::constants::{MAX_EASE_AMOUNT, MIN_SEGMENT_LENGTH};
use crate::events::PlatformEvent;
use crate::timer::frames_for;

/// Eases a fraction in `[0, 1]`. An amount of 0 is the identity.
#[inline]
pub fn ease(x: f32, amount: f32) -> f32 {
    let a = amount.clamp(0.0, MAX_EASE_AMOUNT) + 1.0;
    let xa = x.powf(a);
    xa / (xa + (1.0 - x).powf(a))
}

#[derive(Debug, Clone)]
pub struct WaypointPath {
    waypoints: Vec<Vec2>,
    cyclic: bool,
    speed: f32,
    current_speed: f32,
    ease_amount: f32,
    wait_frames: u32,
    wait_remaining: u32,
    from_index: usize,
    percent: f32,
    /// Waypoints left before stopping, when a stop is scheduled.
    stop_after: Option<u32>,
    events: Vec<PlatformEvent>,
}

impl WaypointPath {
    /// Builds a path over world-space waypoints. Callers guarantee `N >= 2`.
    pub fn new(waypoints: Vec<Vec2>, settings: &PlatformSettings, fixed_delta: f32) -> Self {
        Self {
            waypoints,
            cyclic: settings.cyclic,
            speed: settings.speed,
            current_speed: settings.speed,
            ease_amount: settings.ease_amount.clamp(0.0, MAX_EASE_AMOUNT),
            wait_frames: frames_for(settings.wait_time, fixed_delta),
            wait_remaining: 0,
            from_index: 0,
            percent: 0.0,
            stop_after: None,
            events: Vec::new(),
        }
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Index of the waypoint the current segment starts from.
    pub fn current_segment(&self) -> usize {
        self.from_index
    }

    pub fn percent(&self) -> f32 {
        self.percent
    }

    pub fn is_stopped(&self) -> bool {
        self.current_speed == 0.0
    }

    /// Computes this tick's displacement from `position`.
    pub fn advance(&mut self, position: Vec2, delta: f32) -> Vec2 {
        if self.wait_remaining > 0 {
            self.wait_remaining -= 1;
            return Vec2::zeros();
        }

        let n = self.waypoints.len();
        self.from_index %= n;
        let to_index = (self.from_index + 1) % n;
        let from = self.waypoints[self.from_index];
        let to = self.waypoints[to_index];

        let distance = (to - from).norm();
        if distance <= MIN_SEGMENT_LENGTH {
            self.percent = 1.0;
        } else {
            self.percent += delta * self.current_speed / distance;
        }
        self.percent = self.percent.clamp(0.0, 1.0);

        let eased = ease(self.percent, self.ease_amount);
        let next = from.lerp(&to, eased);

        if self.percent >= 1.0 {
            self.percent = 0.0;
            self.from_index = (self.from_index + 1) % n;
            if !self.cyclic && self.from_index >= n - 1 {
                self.from_index = 0;
                self.waypoints.reverse();
            }
            self.events.push(PlatformEvent::ReachedWaypoint(self.from_index));
            log::debug!("platform reached waypoint, next segment {}", self.from_index);
            self.wait_remaining = self.wait_frames;
            self.count_down_stop();
        }

        next - position
    }

    fn count_down_stop(&mut self) {
        let Some(left) = self.stop_after.as_mut() else {
            return;
        };
        *left = left.saturating_sub(1);
        if *left == 0 {
            self.stop_after = None;
            self.stop();
        }
    }

    pub fn stop(&mut self) {
        self.current_speed = 0.0;
        self.events.push(PlatformEvent::Stopped);
    }

    pub fn resume(&mut self) {
        self.current_speed = self.speed;
        self.events.push(PlatformEvent::Resumed);
    }

    /// Stops when the `n`-th next waypoint is reached. 0 stops right away.
    pub fn stop_on(&mut self, waypoints: u32) {
        if waypoints == 0 {
            self.stop_after = None;
            self.stop();
        } else {
            self.stop_after = Some(waypoints);
        }
    }

    /// Travels the path the other way, continuing from the current position.
    pub fn reverse(&mut self) {
        let n = self.waypoints.len() as i64;
        self.waypoints.reverse();
        self.from_index = (n - 2 - self.from_index as i64).rem_euclid(n) as usize;
        self.percent = 1.0 - self.percent;
    }

    pub fn drain_events(&mut self) -> Vec<PlatformEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn settings(cyclic: bool) -> PlatformSettings {
        PlatformSettings {
            cyclic,
            speed: 2.0,
            ..Default::default()
        }
    }

    fn reached(events: &[PlatformEvent]) -> Vec<usize> {
        events
            .iter()
            .filter_map(|e| match e {
                PlatformEvent::ReachedWaypoint(i) => Some(*i),
                _ => None,
            })
            .collect()
    }

    fn run(path: &mut WaypointPath, position: &mut Vec2, ticks: usize) -> Vec<PlatformEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            *position += path.advance(*position, DT);
            assert!((0.0..=1.0).contains(&path.percent()));
            events.extend(path.drain_events());
        }
        events
    }

    #[test]
    fn ease_endpoints_and_midpoint() {
        for amount in [0.0, 1.0, 2.0] {
            assert_eq!(ease(0.0, amount), 0.0);
            assert_eq!(ease(1.0, amount), 1.0);
            assert_relative_eq!(ease(0.5, amount), 0.5);
        }
        assert_relative_eq!(ease(0.25, 0.0), 0.25, epsilon = 1e-6);
        assert!(ease(0.25, 2.0) < 0.25);
    }

    #[test]
    fn cyclic_path_visits_segments_in_order() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        let mut path = WaypointPath::new(points, &settings(true), DT);
        let mut pos = Vec2::zeros();
        let events = run(&mut path, &mut pos, 400);

        let indices = reached(&events);
        assert!(indices.len() >= 6);
        for (k, index) in indices.iter().enumerate() {
            assert_eq!(*index, (k + 1) % 3);
        }
    }

    #[test]
    fn non_cyclic_path_bounces_within_bounds() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)];
        let mut path = WaypointPath::new(points, &settings(false), DT);
        let mut pos = Vec2::zeros();
        let events = run(&mut path, &mut pos, 300);

        let indices = reached(&events);
        assert!(indices.len() >= 4);
        assert_eq!(&indices[..4], &[1, 0, 1, 0]);
        assert!(indices.iter().all(|i| *i <= 1));
        assert!(path.current_segment() <= 1);
    }

    #[test]
    fn wait_time_holds_the_platform() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(0.1, 0.0)];
        let mut s = settings(true);
        s.wait_time = 0.05;
        let mut path = WaypointPath::new(points, &s, DT);
        let mut pos = Vec2::zeros();

        // 0.1 units at 2 u/s takes about 3 ticks.
        let mut ticks = 0;
        while reached(&run(&mut path, &mut pos, 1)).is_empty() {
            ticks += 1;
            assert!(ticks < 10);
        }
        for _ in 0..3 {
            assert_eq!(path.advance(pos, DT), Vec2::zeros());
        }
        assert_ne!(path.advance(pos, DT), Vec2::zeros());
    }

    #[test]
    fn stop_resume_and_stop_on() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        let mut path = WaypointPath::new(points, &settings(true), DT);
        let mut pos = Vec2::zeros();

        path.stop();
        assert!(path.is_stopped());
        assert_eq!(path.advance(pos, DT), Vec2::zeros());
        path.resume();
        assert_eq!(path.drain_events(), vec![PlatformEvent::Stopped, PlatformEvent::Resumed]);

        path.stop_on(1);
        let events = run(&mut path, &mut pos, 40);
        assert_eq!(events, vec![PlatformEvent::ReachedWaypoint(1), PlatformEvent::Stopped]);
        assert!(path.is_stopped());
        assert_relative_eq!(pos.x, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn reverse_keeps_position_continuous() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(4.0, 4.0)];
        let mut path = WaypointPath::new(points, &settings(true), DT);
        let mut pos = Vec2::zeros();
        run(&mut path, &mut pos, 30);
        let before = pos;

        path.reverse();
        assert_eq!(path.current_segment(), 1);
        let step = path.advance(pos, DT);
        // Heading back towards the first waypoint, one tick's worth of travel.
        assert!(step.x < 0.0);
        assert_relative_eq!(step.norm(), 2.0 * DT, epsilon = 1e-3);
        assert_relative_eq!((pos + step - before).norm(), 2.0 * DT, epsilon = 1e-3);
    }

    #[test]
    fn reverse_on_closing_segment_wraps() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        let mut path = WaypointPath::new(points, &settings(true), DT);
        path.from_index = 2;
        path.reverse();
        assert_eq!(path.current_segment(), 2);
    }
}
