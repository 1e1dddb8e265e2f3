//! Hand-landmark acquisition — real LeapMotion hardware or a mouse-driven
//! simulation.
//!
//! The public interface is [`DetectionEvent`] delivered over a `mpsc`
//! channel.  Consumers don't need to know whether frames came from real
//! hardware or the simulator.

use glam::Vec2;
use hand_gesture::{pose, HandFrame};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

// ════════════════════════════════════════════════════════════════════════════
// DetectionEvent
// ════════════════════════════════════════════════════════════════════════════

/// One tracker observation.
#[derive(Clone, Copy, Debug)]
pub enum DetectionEvent {
    /// A tracked hand, all 21 landmarks in normalized view space
    /// (x and y in 0..1, y growing downward).
    Hand(HandFrame),
    /// The tracker sees no hand this frame.
    NoHand,
    /// The source is shutting down.
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`DetectionEvent`]s over a channel.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<DetectionEvent>);
}

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<DetectionEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource — mouse/keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Hand size used for synthesized frames, in normalized view units.
const SIM_HAND_SCALE: f32 = 0.8;

/// Canonical poses the simulator can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPose {
    Open,
    Fist,
    Pinch,
    Relaxed,
}

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug)]
pub enum SimInput {
    /// Pointer moved; coordinates normalized to 0..1.
    Pointer { x: f32, y: f32 },
    /// Hold a different pose (also brings a hidden hand back).
    Pose(SimPose),
    /// Hide the hand entirely.
    HandOff,
    Quit,
}

/// Landmark source driven by [`SimInput`] events from the visualizer's
/// window.  Each input is answered with exactly one [`DetectionEvent`]: a
/// full synthesized hand at the pointer, or `NoHand` while hidden.
pub struct SimLandmarkSource {
    pub rx: Receiver<SimInput>,
}

impl LandmarkSource for SimLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<DetectionEvent>) {
        let mut pointer = Vec2::new(0.5, 0.5);
        let mut held = SimPose::Open;
        let mut visible = true;

        for input in self.rx {
            let event = match input {
                SimInput::Pointer { x, y } => {
                    pointer = Vec2::new(x, y);
                    if visible {
                        DetectionEvent::Hand(synth_frame(held, pointer))
                    } else {
                        DetectionEvent::NoHand
                    }
                }
                SimInput::Pose(p) => {
                    held = p;
                    visible = true;
                    DetectionEvent::Hand(synth_frame(held, pointer))
                }
                SimInput::HandOff => {
                    visible = false;
                    DetectionEvent::NoHand
                }
                SimInput::Quit => {
                    let _ = tx.send(DetectionEvent::Quit);
                    return;
                }
            };
            if tx.send(event).is_err() {
                return;
            }
        }
    }
}

fn synth_frame(held: SimPose, at: Vec2) -> HandFrame {
    match held {
        SimPose::Open => pose::open_palm_at(at, SIM_HAND_SCALE),
        SimPose::Fist => pose::closed_fist_at(at, SIM_HAND_SCALE),
        SimPose::Pinch => pose::pinch_at(at, SIM_HAND_SCALE),
        SimPose::Relaxed => pose::relaxed_at(at, SIM_HAND_SCALE),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapLandmarkSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Landmark source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
/// Joint positions arrive in millimetres; they are normalized into the same
/// 0..1 view space the simulator uses, with y flipped so it grows downward.
#[cfg(feature = "leap")]
pub struct LeapLandmarkSource;

#[cfg(feature = "leap")]
impl LandmarkSource for LeapLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<DetectionEvent>) {
        use glam::Vec3;
        use hand_gesture::joint;
        use leaprs::*;

        // Tracking volume mapped onto the 0..1 view square (mm).
        const HALF_X: f32 = 220.0;
        const Y_MIN: f32 = 80.0;
        const Y_SPAN: f32 = 320.0;
        const HALF_Z: f32 = 220.0;

        fn norm(x: f32, y: f32, z: f32) -> Vec3 {
            Vec3::new(
                ((x + HALF_X) / (2.0 * HALF_X)).clamp(0.0, 1.0),
                (1.0 - (y - Y_MIN) / Y_SPAN).clamp(0.0, 1.0),
                (z + HALF_Z) / (2.0 * HALF_Z),
            )
        }

        let mut connection = Connection::create(ConnectionConfig::default())
            .expect("Failed to open LeapC connection");
        connection.open().expect("Failed to open LeapMotion device");

        loop {
            let msg = match connection.poll(100) {
                Ok(m) => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands: Vec<_> = frame.hands().collect();
                let Some(hand) = hands.first() else {
                    if tx.send(DetectionEvent::NoHand).is_err() {
                        return;
                    }
                    continue;
                };

                let digits: Vec<_> = hand.digits().collect();
                if digits.len() < 5 {
                    continue;
                }

                let mut landmarks = [Vec3::ZERO; joint::COUNT];

                // Wrist: base of the middle-finger metacarpal.
                let wrist = digits[2].metacarpal().prev_joint();
                landmarks[joint::WRIST] = norm(wrist.x, wrist.y, wrist.z);

                // Thumb: LeapC models it without a metacarpal bone.
                let thumb = [
                    digits[0].proximal().prev_joint(),
                    digits[0].proximal().next_joint(),
                    digits[0].intermediate().next_joint(),
                    digits[0].distal().next_joint(),
                ];
                for (k, b) in thumb.iter().enumerate() {
                    landmarks[joint::THUMB_CMC + k] = norm(b.x, b.y, b.z);
                }

                // Index / middle / ring / pinky: four joints each.
                let finger_slots = [
                    (1, joint::INDEX_MCP),
                    (2, joint::MIDDLE_MCP),
                    (3, joint::RING_MCP),
                    (4, joint::PINKY_MCP),
                ];
                for (digit, mcp) in finger_slots {
                    let bones = [
                        digits[digit].proximal().prev_joint(),
                        digits[digit].proximal().next_joint(),
                        digits[digit].intermediate().next_joint(),
                        digits[digit].distal().next_joint(),
                    ];
                    for (k, b) in bones.iter().enumerate() {
                        landmarks[mcp + k] = norm(b.x, b.y, b.z);
                    }
                }

                if tx.send(DetectionEvent::Hand(HandFrame::new(landmarks))).is_err() {
                    return;
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::{classify, ClassifierConfig, Gesture};

    fn start_sim() -> (Sender<SimInput>, Receiver<DetectionEvent>) {
        let (tx_in, rx_in) = mpsc::channel();
        let rx = spawn_landmark_source(SimLandmarkSource { rx: rx_in });
        (tx_in, rx)
    }

    fn expect_hand(rx: &Receiver<DetectionEvent>) -> HandFrame {
        match rx.recv().unwrap() {
            DetectionEvent::Hand(frame) => frame,
            other => panic!("expected a hand, got {:?}", other),
        }
    }

    #[test]
    fn poses_classify_as_their_gesture() {
        let (tx, rx) = start_sim();
        let cfg = ClassifierConfig::default();
        let cases = [
            (SimPose::Open, Gesture::OpenPalm),
            (SimPose::Fist, Gesture::ClosedFist),
            (SimPose::Pinch, Gesture::Pinch),
            (SimPose::Relaxed, Gesture::None),
        ];
        for (pose, expected) in cases {
            tx.send(SimInput::Pose(pose)).unwrap();
            let frame = expect_hand(&rx);
            assert_eq!(classify(&frame, &cfg).gesture, expected, "{pose:?}");
        }
    }

    #[test]
    fn pointer_moves_the_synthesized_hand() {
        let (tx, rx) = start_sim();
        tx.send(SimInput::Pointer { x: 0.2, y: 0.6 }).unwrap();
        let frame = expect_hand(&rx);
        assert!((frame.wrist().x - 0.2).abs() < 1e-6);
        assert!((frame.wrist().y - 0.6).abs() < 1e-6);
    }

    #[test]
    fn hand_off_reports_no_hand_until_a_pose_returns() {
        let (tx, rx) = start_sim();
        tx.send(SimInput::HandOff).unwrap();
        assert!(matches!(rx.recv().unwrap(), DetectionEvent::NoHand));
        // Pointer moves while hidden stay hidden.
        tx.send(SimInput::Pointer { x: 0.4, y: 0.4 }).unwrap();
        assert!(matches!(rx.recv().unwrap(), DetectionEvent::NoHand));
        // Picking a pose brings the hand back at the last pointer.
        tx.send(SimInput::Pose(SimPose::Open)).unwrap();
        let frame = expect_hand(&rx);
        assert!((frame.wrist().x - 0.4).abs() < 1e-6);
    }

    #[test]
    fn quit_is_forwarded_and_ends_the_thread() {
        let (tx, rx) = start_sim();
        tx.send(SimInput::Quit).unwrap();
        assert!(matches!(rx.recv().unwrap(), DetectionEvent::Quit));
        // The source thread is gone, so the channel reports disconnect.
        assert!(rx.recv().is_err());
    }
}
