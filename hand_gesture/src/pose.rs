//! Synthetic hand poses.
//!
//! Each builder lays out a full, anatomically plausible 21-landmark frame for
//! one canonical pose, centred at a camera-plane point and scaled by a factor
//! (1.0 gives a palm span of 0.18 — a hand at a comfortable distance).  The
//! keyboard/mouse simulation source synthesises its frames from these, and
//! the test suites use them as fixtures.

use glam::{Vec2, Vec3};

use crate::landmark::{joint, HandFrame};

// ── shared layout ────────────────────────────────────────────────────────────
// Knuckle fan and thumb base are identical across poses; only the fingertips
// move.  Offsets are relative to the wrist, fingers pointing up (−y).

const THUMB_CMC_OFF: Vec2 = Vec2::new(-0.045, -0.06);

const MCP_OFFSETS: [Vec2; 4] = [
    Vec2::new(-0.06, -0.17),  // index
    Vec2::new(0.0, -0.18),    // middle — palm span is 0.18 at scale 1
    Vec2::new(0.055, -0.17),  // ring
    Vec2::new(0.10, -0.15),   // pinky
];

const EXTENDED_TIPS: [Vec2; 4] = [
    Vec2::new(-0.10, -0.40),
    Vec2::new(0.0, -0.44),
    Vec2::new(0.07, -0.41),
    Vec2::new(0.14, -0.33),
];

const CURLED_TIPS: [Vec2; 4] = [
    Vec2::new(-0.05, -0.15),
    Vec2::new(0.0, -0.16),
    Vec2::new(0.04, -0.15),
    Vec2::new(0.08, -0.13),
];

/// All four fingers extended, thumb out wide.
pub fn open_palm_at(center: Vec2, scale: f32) -> HandFrame {
    build(center, scale, Vec2::new(-0.22, -0.15), EXTENDED_TIPS)
}

/// All four fingertips tucked close to the wrist, thumb wrapped over.
/// Thumb and index end up inside the pinch threshold too — the classifier's
/// fist-before-pinch ordering is what keeps this a fist.
pub fn closed_fist_at(center: Vec2, scale: f32) -> HandFrame {
    build(center, scale, Vec2::new(-0.09, -0.12), CURLED_TIPS)
}

/// Thumb tip touching the index tip, remaining fingers extended.
pub fn pinch_at(center: Vec2, scale: f32) -> HandFrame {
    build(
        center,
        scale,
        Vec2::new(-0.065, -0.29),
        [
            Vec2::new(-0.08, -0.30),
            EXTENDED_TIPS[1],
            EXTENDED_TIPS[2],
            EXTENDED_TIPS[3],
        ],
    )
}

/// A half-closed resting hand: middle and ring curled, index and pinky out.
/// Deliberately ambiguous — classifies as no gesture.
pub fn relaxed_at(center: Vec2, scale: f32) -> HandFrame {
    build(
        center,
        scale,
        Vec2::new(-0.20, -0.18),
        [
            Vec2::new(-0.09, -0.34),
            CURLED_TIPS[1],
            CURLED_TIPS[2],
            Vec2::new(0.12, -0.30),
        ],
    )
}

// ── frame assembly ───────────────────────────────────────────────────────────

fn build(center: Vec2, scale: f32, thumb_tip: Vec2, tips: [Vec2; 4]) -> HandFrame {
    let mut pts = [Vec3::ZERO; joint::COUNT];
    let at = |off: Vec2| center + off * scale;

    pts[joint::WRIST] = center.extend(0.0);
    lay_thumb(&mut pts, at(THUMB_CMC_OFF), at(thumb_tip));
    for (f, (&mcp, &tip)) in MCP_OFFSETS.iter().zip(tips.iter()).enumerate() {
        lay_finger(&mut pts, joint::INDEX_MCP + 4 * f, at(mcp), at(tip));
    }
    HandFrame::new(pts)
}

/// Fill MCP/PIP/DIP/tip for one finger, interpolating the middle joints and
/// giving the chain a slight forward lean in depth.
fn lay_finger(pts: &mut [Vec3; joint::COUNT], mcp_joint: usize, mcp: Vec2, tip: Vec2) {
    pts[mcp_joint] = mcp.extend(-0.015);
    pts[mcp_joint + 1] = mcp.lerp(tip, 0.45).extend(-0.025);
    pts[mcp_joint + 2] = mcp.lerp(tip, 0.75).extend(-0.03);
    pts[mcp_joint + 3] = tip.extend(-0.035);
}

fn lay_thumb(pts: &mut [Vec3; joint::COUNT], cmc: Vec2, tip: Vec2) {
    pts[joint::THUMB_CMC] = cmc.extend(-0.01);
    pts[joint::THUMB_MCP] = cmc.lerp(tip, 0.4).extend(-0.02);
    pts[joint::THUMB_IP] = cmc.lerp(tip, 0.7).extend(-0.025);
    pts[joint::THUMB_TIP] = tip.extend(-0.03);
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const C: Vec2 = Vec2::new(0.5, 0.5);

    #[test]
    fn wrist_sits_at_center() {
        for frame in [
            open_palm_at(C, 1.0),
            closed_fist_at(C, 1.0),
            pinch_at(C, 1.0),
            relaxed_at(C, 1.0),
        ] {
            assert_eq!(frame.wrist().truncate(), C);
        }
    }

    #[test]
    fn palm_span_tracks_scale() {
        let f = open_palm_at(C, 1.0);
        assert!((f.palm_span() - 0.18).abs() < 1e-6);
        let half = open_palm_at(C, 0.5);
        assert!((half.palm_span() - 0.09).abs() < 1e-6);
    }

    #[test]
    fn every_landmark_is_finite() {
        for frame in [
            open_palm_at(C, 1.0),
            closed_fist_at(C, 2.0),
            pinch_at(C, 0.3),
            relaxed_at(C, 1.5),
        ] {
            for lm in frame.landmarks {
                assert!(lm.is_finite());
            }
        }
    }

    #[test]
    fn pinch_pose_gap_is_tiny() {
        let f = pinch_at(C, 1.0);
        let gap = crate::planar_distance(f.thumb_tip(), f.index_tip());
        assert!(gap < 0.02, "gap {gap}");
    }

    #[test]
    fn finger_chain_runs_mcp_to_tip() {
        let f = open_palm_at(C, 1.0);
        // PIP and DIP lie between MCP and tip along y for an extended finger.
        let mcp = f.landmarks[joint::MIDDLE_MCP].y;
        let pip = f.landmarks[joint::MIDDLE_PIP].y;
        let dip = f.landmarks[joint::MIDDLE_DIP].y;
        let tip = f.landmarks[joint::MIDDLE_TIP].y;
        assert!(mcp > pip && pip > dip && dip > tip);
    }
}
