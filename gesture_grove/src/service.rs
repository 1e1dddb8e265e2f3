//! Frame-rate adapter between a [`LandmarkSource`] thread and the app tick.
//!
//! The source pushes observations as fast as it produces them; the app
//! consumes one per rendered frame.  [`DetectionService::poll`] drains the
//! channel so only the newest observation counts.

use std::sync::mpsc::{Receiver, TryRecvError};

use hand_gesture::HandFrame;

use crate::source::{spawn_landmark_source, DetectionEvent, LandmarkSource};

pub struct DetectionService {
    rx: Option<Receiver<DetectionEvent>>,
    latest: Option<HandFrame>,
    quit_seen: bool,
}

impl DetectionService {
    /// Spawn `source` on its own thread and track it.
    pub fn spawn<S: LandmarkSource>(source: S) -> Self {
        Self::new(spawn_landmark_source(source))
    }

    /// Track an already-connected channel (used by tests to feed events
    /// directly).
    pub fn new(rx: Receiver<DetectionEvent>) -> Self {
        DetectionService {
            rx: Some(rx),
            latest: None,
            quit_seen: false,
        }
    }

    /// Drain everything queued since the last frame and return the current
    /// hand, if any.  A `NoHand` observation clears it; losing the source
    /// thread shuts the service down.
    pub fn poll(&mut self) -> Option<HandFrame> {
        let mut lost = false;
        if let Some(rx) = &self.rx {
            loop {
                match rx.try_recv() {
                    Ok(DetectionEvent::Hand(frame)) => self.latest = Some(frame),
                    Ok(DetectionEvent::NoHand) => self.latest = None,
                    Ok(DetectionEvent::Quit) => self.quit_seen = true,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        lost = true;
                        break;
                    }
                }
            }
        }
        if lost {
            self.shutdown();
        }
        self.latest
    }

    /// True once the source asked the app to exit.
    pub fn quit_requested(&self) -> bool {
        self.quit_seen
    }

    /// True while the source channel is still connected.
    pub fn is_live(&self) -> bool {
        self.rx.is_some()
    }

    pub fn shutdown(&mut self) {
        self.rx = None;
        self.latest = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use hand_gesture::pose;
    use std::sync::mpsc;

    fn hand_at(x: f32) -> DetectionEvent {
        DetectionEvent::Hand(pose::open_palm_at(Vec2::new(x, 0.5), 0.8))
    }

    #[test]
    fn poll_returns_the_newest_hand() {
        let (tx, rx) = mpsc::channel();
        let mut svc = DetectionService::new(rx);
        tx.send(hand_at(0.1)).unwrap();
        tx.send(hand_at(0.2)).unwrap();
        tx.send(hand_at(0.9)).unwrap();
        let frame = svc.poll().unwrap();
        assert!((frame.wrist().x - 0.9).abs() < 1e-6);
    }

    #[test]
    fn no_hand_clears_the_latest_frame() {
        let (tx, rx) = mpsc::channel();
        let mut svc = DetectionService::new(rx);
        tx.send(hand_at(0.5)).unwrap();
        assert!(svc.poll().is_some());
        tx.send(DetectionEvent::NoHand).unwrap();
        assert!(svc.poll().is_none());
    }

    #[test]
    fn hand_persists_across_empty_polls() {
        let (tx, rx) = mpsc::channel();
        let mut svc = DetectionService::new(rx);
        tx.send(hand_at(0.3)).unwrap();
        assert!(svc.poll().is_some());
        // Nothing new arrived; the last observation stands.
        assert!(svc.poll().is_some());
    }

    #[test]
    fn quit_is_latched() {
        let (tx, rx) = mpsc::channel();
        let mut svc = DetectionService::new(rx);
        assert!(!svc.quit_requested());
        tx.send(DetectionEvent::Quit).unwrap();
        svc.poll();
        assert!(svc.quit_requested());
        svc.poll();
        assert!(svc.quit_requested());
    }

    #[test]
    fn disconnect_shuts_the_service_down() {
        let (tx, rx) = mpsc::channel();
        let mut svc = DetectionService::new(rx);
        tx.send(hand_at(0.5)).unwrap();
        drop(tx);
        // Queued events still drain, then the hangup is noticed.
        assert!(svc.poll().is_none());
        assert!(!svc.is_live());
    }

    #[test]
    fn wrist_rides_the_frame() {
        // Guard against the frame type silently changing its origin.
        let frame = pose::open_palm_at(Vec2::new(0.25, 0.75), 1.0);
        assert_eq!(frame.wrist(), Vec3::new(0.25, 0.75, 0.0));
    }
}
