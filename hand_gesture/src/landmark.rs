//! The 21-point hand-landmark data model.

use glam::{Vec2, Vec3};

// ════════════════════════════════════════════════════════════════════════════
// Joint indices
// ════════════════════════════════════════════════════════════════════════════

/// Landmark indices in the standard 21-point hand model.
pub mod joint {
    pub const WRIST: usize = 0;

    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;

    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;

    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;

    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;

    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;

    pub const COUNT: usize = 21;

    /// The four non-thumb fingertips, in index→pinky order.
    pub const FINGERTIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];
}

// ════════════════════════════════════════════════════════════════════════════
// HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// One detected hand: the fixed, ordered set of all 21 landmarks.
///
/// x and y are normalised to the camera frame (0..1); z is relative depth.
/// Frames are immutable snapshots — a source produces a fresh one per
/// detection cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandFrame {
    pub landmarks: [Vec3; joint::COUNT],
}

impl HandFrame {
    pub fn new(landmarks: [Vec3; joint::COUNT]) -> Self {
        HandFrame { landmarks }
    }

    pub fn wrist(&self) -> Vec3 {
        self.landmarks[joint::WRIST]
    }

    pub fn thumb_tip(&self) -> Vec3 {
        self.landmarks[joint::THUMB_TIP]
    }

    pub fn index_tip(&self) -> Vec3 {
        self.landmarks[joint::INDEX_TIP]
    }

    pub fn middle_mcp(&self) -> Vec3 {
        self.landmarks[joint::MIDDLE_MCP]
    }

    /// Planar distance from wrist to middle-MCP — the palm-size reference
    /// every classification threshold is scaled by.
    pub fn palm_span(&self) -> f32 {
        planar_distance(self.wrist(), self.middle_mcp())
    }

    /// Shift every landmark by `delta` in the camera plane.
    pub fn translated(mut self, delta: Vec2) -> Self {
        for lm in &mut self.landmarks {
            lm.x += delta.x;
            lm.y += delta.y;
        }
        self
    }

    /// Scale every landmark about the wrist by `factor` (all three axes).
    /// A positive factor changes apparent hand size without changing the
    /// pose, which is exactly what moving the hand toward or away from the
    /// camera does.
    pub fn scaled_about_wrist(mut self, factor: f32) -> Self {
        let wrist = self.wrist();
        for lm in &mut self.landmarks {
            *lm = wrist + (*lm - wrist) * factor;
        }
        self
    }
}

/// Distance between two landmarks ignoring depth — the camera-plane (x, y)
/// distance used by every classifier threshold.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    a.truncate().distance(b.truncate())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_frame() -> HandFrame {
        let mut pts = [Vec3::ZERO; joint::COUNT];
        for (i, p) in pts.iter_mut().enumerate() {
            *p = Vec3::new(0.4 + i as f32 * 0.01, 0.5, -0.02);
        }
        HandFrame::new(pts)
    }

    #[test]
    fn planar_distance_ignores_depth() {
        let a = Vec3::new(0.1, 0.2, 0.0);
        let b = Vec3::new(0.4, 0.6, 9.0);
        assert!((planar_distance(a, b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn translated_moves_every_landmark() {
        let f = flat_frame().translated(Vec2::new(0.1, -0.2));
        assert!((f.wrist().x - 0.5).abs() < 1e-6);
        assert!((f.wrist().y - 0.3).abs() < 1e-6);
        // Depth untouched
        assert!((f.wrist().z + 0.02).abs() < 1e-6);
    }

    #[test]
    fn scaled_about_wrist_keeps_wrist_fixed() {
        let f = flat_frame();
        let wrist = f.wrist();
        let scaled = f.scaled_about_wrist(3.0);
        assert_eq!(scaled.wrist(), wrist);
    }

    #[test]
    fn scaled_about_wrist_scales_palm_span() {
        let f = flat_frame();
        let span = f.palm_span();
        let scaled = f.scaled_about_wrist(2.0);
        assert!((scaled.palm_span() - span * 2.0).abs() < 1e-6);
    }
}
