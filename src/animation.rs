//! Eased full-turn rotation and frame scheduling

use std::cell::Cell;
use std::rc::Rc;

/// Degrees added by one rotation animation
pub const FULL_TURN: f64 = 360.0;

/// Ease-in-out curve on `[0, 1]`
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// A running full-turn rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSession {
    start_time: f64,
    start_degree: f64,
    target_degree: f64,
    duration: f64,
}

impl AnimationSession {
    pub fn begin(now: f64, start_degree: f64, duration: f64) -> Self {
        Self {
            start_time: now,
            start_degree,
            target_degree: start_degree + FULL_TURN,
            duration,
        }
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn start_degree(&self) -> f64 {
        self.start_degree
    }

    pub fn target_degree(&self) -> f64 {
        self.target_degree
    }

    /// Progress in `[0, 1]`; a non-positive duration is complete immediately
    pub fn ratio(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    /// Degree shown at `ratio`
    pub fn degree_at(&self, ratio: f64) -> f64 {
        let eased = ease_in_out(ratio);
        eased * self.target_degree + (1.0 - eased) * self.start_degree
    }
}

/// Controller mode. `Animating` owns the degree exclusively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Idle,
    Animating(AnimationSession),
}

impl Mode {
    pub fn is_animating(&self) -> bool {
        matches!(self, Mode::Animating(_))
    }
}

/// Host capability that runs the controller's frame callback once, later
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Single-slot frame request flag shared between the controller and the loop
#[derive(Debug, Clone, Default)]
pub struct FrameQueue(Rc<Cell<bool>>);

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the pending request, if any
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) {
        self.0.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(0.25), 0.125);
    }

    #[test]
    fn session_targets_a_full_turn() {
        let session = AnimationSession::begin(0.0, 10.0, 1000.0);
        assert_eq!(session.target_degree(), 370.0);
        assert_eq!(session.degree_at(session.ratio(0.0)), 10.0);
        assert_eq!(session.degree_at(session.ratio(1000.0)), 370.0);
        assert_eq!(session.degree_at(session.ratio(5000.0)), 370.0);
    }

    #[test]
    fn progress_is_strictly_increasing() {
        let session = AnimationSession::begin(100.0, 10.0, 1000.0);
        let mut last = session.degree_at(session.ratio(100.0));
        for step in 1..=100 {
            let degree = session.degree_at(session.ratio(100.0 + step as f64 * 10.0));
            assert!(degree > last, "step {step}: {degree} <= {last}");
            last = degree;
        }
        assert_eq!(last, 370.0);
    }

    #[test]
    fn ratio_is_clamped() {
        let session = AnimationSession::begin(500.0, 0.0, 1000.0);
        assert_eq!(session.ratio(0.0), 0.0);
        assert_eq!(session.ratio(1000.0), 0.5);
        assert_eq!(session.ratio(2000.0), 1.0);
        assert_eq!(AnimationSession::begin(0.0, 0.0, 0.0).ratio(0.0), 1.0);
    }

    #[test]
    fn frame_queue_holds_one_request() {
        let queue = FrameQueue::new();
        let mut handle = queue.clone();
        handle.request_frame();
        handle.request_frame();
        assert!(queue.take());
        assert!(!queue.take());
    }
}
