//! # hand_gesture
//!
//! Geometric gesture classification over the standard 21-point hand-landmark
//! model.  The classifier is a pure function: one [`HandFrame`] in, one
//! [`GestureResult`] out, no state, no allocation.
//!
//! ## Landmark model
//!
//! Landmarks are indexed 0–20 in the usual anatomical order:
//!
//! | Index | Joint |
//! |---|---|
//! | 0 | wrist |
//! | 1–4 | thumb CMC, MCP, IP, tip |
//! | 5–8 | index MCP, PIP, DIP, tip |
//! | 9–12 | middle MCP, PIP, DIP, tip |
//! | 13–16 | ring MCP, PIP, DIP, tip |
//! | 17–20 | pinky MCP, PIP, DIP, tip |
//!
//! Coordinates are camera-frame normalised: x and y in 0..1, z a relative
//! depth.  All classification thresholds are expressed as ratios of the palm
//! size (wrist → middle-MCP planar distance), so the result does not depend
//! on how far the hand is from the camera.
//!
//! ## Gestures
//!
//! | Gesture | Condition | Anchor |
//! |---|---|---|
//! | `ClosedFist` | all four fingers curled | wrist |
//! | `Pinch` | thumb tip close to index tip | index tip |
//! | `OpenPalm` | at most one finger curled | middle MCP |
//! | `None` | anything else (2–3 curled), or no hand | — |
//!
//! A fist naturally also brings thumb and index together, so the fist check
//! runs before the pinch check.
//!
//! The [`pose`] module builds synthetic frames for the four poses, used by
//! the keyboard/mouse simulation front end and by the test suites.

pub mod classify;
pub mod landmark;
pub mod pose;

pub use classify::{classify, classify_opt, ClassifierConfig, ClassifierError, Gesture, GestureResult};
pub use landmark::{joint, planar_distance, HandFrame};
