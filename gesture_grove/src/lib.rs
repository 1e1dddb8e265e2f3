//! # gesture_grove
//!
//! Hand-gesture controller for living particle scenes.  A camera (or the
//! mouse, in simulation mode) tracks one hand; recognized poses steer a
//! field of particles between a tree, a scatter cloud and a heart, and a
//! pinch grabs photos out of the floating gallery.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Condition | Action |
//! |---|---|---|
//! | Open palm | ≤ 1 finger curled | Scatter the tree into a drifting cloud |
//! | Closed fist | all 4 fingers curled | Call the particles back into the tree |
//! | Pinch | thumb–index tips close | Grab the nearest floating photo (scatter only) |
//! | Hand hover | any tracked hand | Anchor: nearby scattered particles swirl around it |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the mouse is the hand, keys pick the pose.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via LeapC.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Effect |
//! |---|---|
//! | mouse move | Hand position |
//! | `O` | Open-palm pose |
//! | `F` | Closed-fist pose |
//! | `P` | Pinch pose |
//! | `R` | Relaxed pose (no gesture) |
//! | `N` | Hide the hand |
//! | `T` / `S` / `H` / `V` | Scene: tree / scatter / heart / photo view |
//! | `Q` | Quit |

pub mod app;
pub mod service;
pub mod source;
pub mod visualizer;
