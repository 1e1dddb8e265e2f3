//! The gesture classifier — a pure function from one hand's landmarks to a
//! discrete gesture plus an anchor point.
//!
//! Every threshold is a ratio of the palm size, so the classification is
//! invariant to how large the hand appears in the camera frame.

use glam::Vec2;
use thiserror::Error;

use crate::landmark::{joint, planar_distance, HandFrame};

// ════════════════════════════════════════════════════════════════════════════
// Gesture / GestureResult
// ════════════════════════════════════════════════════════════════════════════

/// The discrete gestures the classifier can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// No hand, or an ambiguous pose (2–3 curled fingers).
    None,
    /// At most one finger curled.
    OpenPalm,
    /// All four fingers curled.
    ClosedFist,
    /// Thumb tip and index tip close together.
    Pinch,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::None => "none",
            Gesture::OpenPalm => "open-palm",
            Gesture::ClosedFist => "closed-fist",
            Gesture::Pinch => "pinch",
        }
    }
}

/// One classification outcome.  Produced fresh on every call, never mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureResult {
    pub gesture: Gesture,
    /// Camera-plane anchor for the gesture: wrist for a fist, index tip for
    /// a pinch, middle-MCP for an open palm.  `None` when no gesture.
    pub anchor: Option<Vec2>,
    /// Planar thumb-tip → index-tip distance for a pinch; 1.0 otherwise.
    pub pinch_distance: f32,
}

impl GestureResult {
    /// The neutral result used whenever no hand is available.
    pub fn none() -> Self {
        GestureResult {
            gesture: Gesture::None,
            anchor: None,
            pinch_distance: 1.0,
        }
    }

    pub fn is_pinch(&self) -> bool {
        self.gesture == Gesture::Pinch
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ClassifierConfig
// ════════════════════════════════════════════════════════════════════════════

/// Classification thresholds, all relative to the palm size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifierConfig {
    /// Thumb–index distance below `pinch_ratio * palm` is a pinch candidate.
    pub pinch_ratio: f32,
    /// A fingertip within `curl_ratio * palm` of the wrist counts as curled.
    pub curl_ratio: f32,
    /// Lower clamp on the palm size, so a tiny or occluded hand never
    /// produces a near-zero divisor.
    pub min_palm: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            pinch_ratio: 0.65,
            curl_ratio: 1.35,
            min_palm: 0.01,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier thresholds must be positive (pinch_ratio={pinch_ratio}, curl_ratio={curl_ratio}, min_palm={min_palm})")]
    NonPositiveThreshold {
        pinch_ratio: f32,
        curl_ratio: f32,
        min_palm: f32,
    },
}

impl ClassifierConfig {
    /// Configuration errors are programmer errors — fatal at startup, not
    /// recoverable mid-run.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.pinch_ratio <= 0.0 || self.curl_ratio <= 0.0 || self.min_palm <= 0.0 {
            return Err(ClassifierError::NonPositiveThreshold {
                pinch_ratio: self.pinch_ratio,
                curl_ratio: self.curl_ratio,
                min_palm: self.min_palm,
            });
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// classify
// ════════════════════════════════════════════════════════════════════════════

/// Classify one hand frame.
///
/// Decision order matters: a closed fist naturally also has thumb and index
/// close together, so the fist check must run before the pinch check.  A
/// relaxed hand with 2–3 curled fingers intentionally resolves to
/// [`Gesture::None`] rather than guessing.
pub fn classify(frame: &HandFrame, cfg: &ClassifierConfig) -> GestureResult {
    let wrist = frame.wrist();
    let middle_mcp = frame.middle_mcp();

    let palm = planar_distance(wrist, middle_mcp).max(cfg.min_palm);

    let pinch_distance = planar_distance(frame.thumb_tip(), frame.index_tip());
    let pinch_candidate = pinch_distance < cfg.pinch_ratio * palm;

    let curl_limit = cfg.curl_ratio * palm;
    let curled = joint::FINGERTIPS
        .iter()
        .filter(|&&tip| planar_distance(frame.landmarks[tip], wrist) < curl_limit)
        .count();

    if curled == 4 {
        GestureResult {
            gesture: Gesture::ClosedFist,
            anchor: Some(wrist.truncate()),
            pinch_distance: 1.0,
        }
    } else if pinch_candidate {
        GestureResult {
            gesture: Gesture::Pinch,
            anchor: Some(frame.index_tip().truncate()),
            pinch_distance,
        }
    } else if curled <= 1 {
        GestureResult {
            gesture: Gesture::OpenPalm,
            anchor: Some(middle_mcp.truncate()),
            pinch_distance: 1.0,
        }
    } else {
        GestureResult::none()
    }
}

/// Classify the latest detection, which may be absent.  Absence of a hand is
/// a valid input meaning "no gesture", never an error.
pub fn classify_opt(frame: Option<&HandFrame>, cfg: &ClassifierConfig) -> GestureResult {
    match frame {
        Some(f) => classify(f, cfg),
        None => GestureResult::none(),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose;
    use glam::{Vec2, Vec3};

    fn cfg() -> ClassifierConfig {
        ClassifierConfig::default()
    }

    fn center() -> Vec2 {
        Vec2::new(0.5, 0.6)
    }

    #[test]
    fn open_palm_classifies_with_mcp_anchor() {
        let frame = pose::open_palm_at(center(), 1.0);
        let r = classify(&frame, &cfg());
        assert_eq!(r.gesture, Gesture::OpenPalm);
        assert_eq!(r.anchor, Some(frame.middle_mcp().truncate()));
        assert_eq!(r.pinch_distance, 1.0);
    }

    #[test]
    fn closed_fist_classifies_with_wrist_anchor() {
        let frame = pose::closed_fist_at(center(), 1.0);
        let r = classify(&frame, &cfg());
        assert_eq!(r.gesture, Gesture::ClosedFist);
        assert_eq!(r.anchor, Some(frame.wrist().truncate()));
        assert_eq!(r.pinch_distance, 1.0);
    }

    #[test]
    fn pinch_classifies_with_index_tip_anchor() {
        let frame = pose::pinch_at(center(), 1.0);
        let r = classify(&frame, &cfg());
        assert_eq!(r.gesture, Gesture::Pinch);
        assert_eq!(r.anchor, Some(frame.index_tip().truncate()));
        assert!(r.pinch_distance < 0.65 * frame.palm_span());
    }

    #[test]
    fn relaxed_hand_is_none() {
        // Two curled fingers: too closed for a palm, too open for a fist.
        let r = classify(&pose::relaxed_at(center(), 1.0), &cfg());
        assert_eq!(r.gesture, Gesture::None);
        assert_eq!(r.anchor, None);
        assert_eq!(r.pinch_distance, 1.0);
    }

    #[test]
    fn classification_is_deterministic() {
        let frame = pose::pinch_at(center(), 1.0);
        let a = classify(&frame, &cfg());
        let b = classify(&frame, &cfg());
        assert_eq!(a, b);
    }

    #[test]
    fn gesture_is_scale_invariant() {
        for pose_fn in [
            pose::open_palm_at,
            pose::closed_fist_at,
            pose::pinch_at,
            pose::relaxed_at,
        ] {
            let base = classify(&pose_fn(center(), 1.0), &cfg()).gesture;
            for factor in [0.25, 0.5, 2.0, 4.0] {
                let scaled = pose_fn(center(), 1.0).scaled_about_wrist(factor);
                assert_eq!(
                    classify(&scaled, &cfg()).gesture,
                    base,
                    "gesture changed at scale {factor}"
                );
            }
        }
    }

    #[test]
    fn fist_wins_over_pinch() {
        // The fist pose brings thumb and index well inside the pinch
        // threshold; the fist branch must still win.
        let frame = pose::closed_fist_at(center(), 1.0);
        let pinch = planar_distance(frame.thumb_tip(), frame.index_tip());
        assert!(pinch < 0.65 * frame.palm_span());
        assert_eq!(classify(&frame, &cfg()).gesture, Gesture::ClosedFist);
    }

    #[test]
    fn pinch_with_two_curled_fingers() {
        // Palm 0.1 → pinch threshold 0.065; a 0.02 gap with only two curled
        // fingers must classify as a pinch anchored at the index tip.
        let mut frame = pose::relaxed_at(center(), 1.0);
        let span = frame.palm_span();
        frame = frame.scaled_about_wrist(0.1 / span);
        assert!((frame.palm_span() - 0.1).abs() < 1e-5);

        let tip = frame.landmarks[joint::INDEX_TIP];
        frame.landmarks[joint::THUMB_TIP] = tip + Vec3::new(0.02, 0.0, 0.0);

        let r = classify(&frame, &cfg());
        assert_eq!(r.gesture, Gesture::Pinch);
        assert_eq!(r.anchor, Some(tip.truncate()));
        assert!((r.pinch_distance - 0.02).abs() < 1e-5);
    }

    #[test]
    fn fingertips_near_wrist_beat_any_thumb_position() {
        // Palm 0.1 → curl threshold 0.135; all four tips 0.1 from the wrist
        // is a fist no matter where the thumb sits.
        let mut frame = pose::open_palm_at(center(), 1.0);
        let span = frame.palm_span();
        frame = frame.scaled_about_wrist(0.1 / span);

        let wrist = frame.wrist();
        for (k, &tip) in joint::FINGERTIPS.iter().enumerate() {
            let dir = Vec2::new(0.6 + 0.1 * k as f32, -0.8).normalize();
            frame.landmarks[tip] = wrist + (dir * 0.1).extend(-0.02);
        }
        // Thumb far away: pinch distance large, fist must still win.
        frame.landmarks[joint::THUMB_TIP] = wrist + Vec3::new(-0.3, -0.1, -0.02);

        let r = classify(&frame, &cfg());
        assert_eq!(r.gesture, Gesture::ClosedFist);
        assert_eq!(r.anchor, Some(wrist.truncate()));
    }

    #[test]
    fn absent_hand_is_neutral() {
        let r = classify_opt(None, &cfg());
        assert_eq!(r.gesture, Gesture::None);
        assert_eq!(r.anchor, None);
        assert_eq!(r.pinch_distance, 1.0);
    }

    #[test]
    fn degenerate_hand_never_panics_or_nans() {
        // Every landmark on one point: palm size clamps to min_palm, all
        // distances are zero, and the all-curled branch wins.
        let frame = HandFrame::new([Vec3::new(0.5, 0.5, 0.0); joint::COUNT]);
        let r = classify(&frame, &cfg());
        assert_eq!(r.gesture, Gesture::ClosedFist);
        assert!(r.pinch_distance.is_finite());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(ClassifierConfig::default().validate().is_ok());
    }

    #[test]
    fn non_positive_threshold_rejected() {
        let bad = ClassifierConfig {
            curl_ratio: 0.0,
            ..ClassifierConfig::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ClassifierError::NonPositiveThreshold { .. })
        ));
    }
}
