//! Floating photo gallery with pinch-to-grab.
//!
//! Photos idle on a ring around the gallery origin, bobbing and tilting
//! gently.  While the scene is SCATTER and the hand pinches, the photo
//! closest to the pinch anchor (within the grab radius) is grabbed: it
//! glides to the anchor, lifts toward the viewer, and zooms up.  The grab
//! is sticky — the photo follows the anchor anywhere until the pinch ends,
//! then drifts home.
//!
//! Photo positions are group-local; add [`Gallery::origin`] to place them
//! in the world.

use glam::Vec3;
use particle_field::{ease_scalar, ease_toward, SceneMode};
use std::f32::consts::TAU;
use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Configuration
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct GalleryConfig {
    /// Photos placed on the idle ring by [`Gallery::new`].
    pub photo_count: usize,
    pub ring_radius: f32,
    /// A pinch grabs the closest photo strictly within this distance.
    pub grab_radius: f32,
    /// Fraction of the remaining gap closed per frame.
    pub blend: f32,
    pub idle_scale: f32,
    pub zoom_scale: f32,
    /// How far a grabbed photo lifts toward the viewer.
    pub viewer_offset: f32,
    pub float_amplitude: f32,
    pub float_rate: f32,
    pub tilt_amplitude: f32,
    pub tilt_rate: f32,
    /// World position of the gallery origin.
    pub group_offset: Vec3,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            photo_count: 8,
            ring_radius: 5.2,
            grab_radius: 1.5,
            blend: 0.1,
            idle_scale: 0.9,
            zoom_scale: 2.4,
            viewer_offset: 1.6,
            float_amplitude: 0.25,
            float_rate: 1.1,
            tilt_amplitude: 0.12,
            tilt_rate: 0.8,
            group_offset: Vec3::new(0.0, 0.0, 0.8),
        }
    }
}

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("gallery needs at least one photo")]
    NoPhotos,
    #[error("grab radius must be positive, got {0}")]
    GrabRadius(f32),
    #[error("blend must lie in (0, 1], got {0}")]
    BlendOutOfRange(f32),
    #[error("scales must be positive: idle {idle}, zoom {zoom}")]
    NonPositiveScale { idle: f32, zoom: f32 },
}

impl GalleryConfig {
    pub fn validate(&self) -> Result<(), GalleryError> {
        if self.photo_count == 0 {
            return Err(GalleryError::NoPhotos);
        }
        if self.grab_radius <= 0.0 {
            return Err(GalleryError::GrabRadius(self.grab_radius));
        }
        if !(self.blend > 0.0 && self.blend <= 1.0) {
            return Err(GalleryError::BlendOutOfRange(self.blend));
        }
        if self.idle_scale <= 0.0 || self.zoom_scale <= 0.0 {
            return Err(GalleryError::NonPositiveScale {
                idle: self.idle_scale,
                zoom: self.zoom_scale,
            });
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Items and frame types
// ════════════════════════════════════════════════════════════════════════════

/// One photo's identity; `home` is group-local.
#[derive(Clone, Debug)]
pub struct PhotoItem {
    pub id: usize,
    pub label: String,
    pub home: Vec3,
    /// Decorrelates the idle float and tilt waves between photos.
    pub phase: f32,
}

/// Per-frame input, mirroring what the gesture layer knows.
#[derive(Clone, Copy, Debug)]
pub struct GalleryFrame {
    pub mode: SceneMode,
    pub time: f32,
    pub pinching: bool,
    /// World-space pinch anchor, present whenever a hand is tracked.
    pub anchor: Option<Vec3>,
}

/// Render-ready state for one photo, group-local.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoInstance {
    pub position: Vec3,
    pub scale: f32,
    /// Roll angle in radians; frozen while the photo is grabbed.
    pub tilt: f32,
}

// ════════════════════════════════════════════════════════════════════════════
// Gallery
// ════════════════════════════════════════════════════════════════════════════

pub struct Gallery {
    cfg: GalleryConfig,
    items: Vec<PhotoItem>,
    instances: Vec<PhotoInstance>,
    grabbed: Option<usize>,
}

impl Gallery {
    /// Build the standard ring layout: evenly spaced angles, heights staggered
    /// by a slow sine so the ring reads as a loose cloud rather than a disc.
    pub fn new(cfg: GalleryConfig) -> Result<Self, GalleryError> {
        cfg.validate()?;
        let n = cfg.photo_count;
        let items = (0..n)
            .map(|i| {
                let angle = i as f32 * TAU / n as f32;
                PhotoItem {
                    id: i,
                    label: format!("photo {:02}", i + 1),
                    home: Vec3::new(
                        angle.cos() * cfg.ring_radius,
                        (i as f32 * 1.9).sin() * 1.8,
                        angle.sin() * cfg.ring_radius,
                    ),
                    phase: i as f32 * 0.7,
                }
            })
            .collect();
        Self::with_items(cfg, items)
    }

    /// Build from a caller-supplied layout.
    pub fn with_items(cfg: GalleryConfig, items: Vec<PhotoItem>) -> Result<Self, GalleryError> {
        cfg.validate()?;
        if items.is_empty() {
            return Err(GalleryError::NoPhotos);
        }
        let instances = items
            .iter()
            .map(|item| PhotoInstance {
                position: item.home,
                scale: cfg.idle_scale,
                tilt: 0.0,
            })
            .collect();
        Ok(Gallery {
            cfg,
            items,
            instances,
            grabbed: None,
        })
    }

    /// Advance one frame: settle the grab state, then ease every photo
    /// toward its target.
    pub fn step(&mut self, frame: &GalleryFrame) {
        // Releasing the pinch drops the photo immediately.
        if !frame.pinching {
            self.grabbed = None;
        }
        if self.grabbed.is_none() && frame.pinching && frame.mode == SceneMode::Scatter {
            if let Some(anchor) = frame.anchor {
                self.grabbed = self.closest_within(anchor - self.cfg.group_offset);
            }
        }

        let cfg = &self.cfg;
        let grabbed = self.grabbed;
        let anchor_local = frame.anchor.map(|a| a - cfg.group_offset);
        for (i, (item, inst)) in self.items.iter().zip(self.instances.iter_mut()).enumerate() {
            if grabbed == Some(i) {
                // Follow the hand, lifted toward the viewer; tilt stays put.
                let target = anchor_local
                    .map(|a| a + Vec3::Z * cfg.viewer_offset)
                    .unwrap_or(inst.position);
                inst.position = ease_toward(inst.position, target, cfg.blend);
                inst.scale = ease_scalar(inst.scale, cfg.zoom_scale, cfg.blend);
            } else {
                let bob = (frame.time * cfg.float_rate + item.phase).sin() * cfg.float_amplitude;
                let target = item.home + Vec3::Y * bob;
                let tilt = (frame.time * cfg.tilt_rate + item.phase).sin() * cfg.tilt_amplitude;
                inst.position = ease_toward(inst.position, target, cfg.blend);
                inst.scale = ease_scalar(inst.scale, cfg.idle_scale, cfg.blend);
                inst.tilt = ease_scalar(inst.tilt, tilt, cfg.blend);
            }
        }
    }

    /// Index of the closest photo strictly inside the grab radius, judged by
    /// smoothed position.
    fn closest_within(&self, anchor_local: Vec3) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, inst) in self.instances.iter().enumerate() {
            let d = inst.position.distance(anchor_local);
            if d < self.cfg.grab_radius && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    pub fn origin(&self) -> Vec3 {
        self.cfg.group_offset
    }

    pub fn items(&self) -> &[PhotoItem] {
        &self.items
    }

    pub fn instances(&self) -> &[PhotoInstance] {
        &self.instances
    }

    /// Index of the photo currently held, if any.
    pub fn grabbed_index(&self) -> Option<usize> {
        self.grabbed
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> GalleryConfig {
        GalleryConfig {
            group_offset: Vec3::ZERO,
            ..GalleryConfig::default()
        }
    }

    fn pair_gallery() -> Gallery {
        // Two photos 1.0 apart on the x axis.
        let items = vec![
            PhotoItem {
                id: 0,
                label: "left".into(),
                home: Vec3::ZERO,
                phase: 0.0,
            },
            PhotoItem {
                id: 1,
                label: "right".into(),
                home: Vec3::X,
                phase: 1.0,
            },
        ];
        Gallery::with_items(cfg(), items).unwrap()
    }

    fn frame(pinching: bool, anchor: Option<Vec3>) -> GalleryFrame {
        GalleryFrame {
            mode: SceneMode::Scatter,
            time: 0.0,
            pinching,
            anchor,
        }
    }

    #[test]
    fn ring_layout_spreads_photos_evenly() {
        let g = Gallery::new(cfg()).unwrap();
        assert_eq!(g.len(), 8);
        for inst in g.instances() {
            let r = (inst.position.x.powi(2) + inst.position.z.powi(2)).sqrt();
            assert!((r - 5.2).abs() < 1e-4);
        }
    }

    #[test]
    fn pinch_grabs_the_closest_photo() {
        let mut g = pair_gallery();
        g.step(&frame(true, Some(Vec3::new(0.3, 0.0, 0.0))));
        assert_eq!(g.grabbed_index(), Some(0));

        let mut g = pair_gallery();
        g.step(&frame(true, Some(Vec3::new(0.7, 0.0, 0.0))));
        assert_eq!(g.grabbed_index(), Some(1));
    }

    #[test]
    fn pinch_outside_the_radius_grabs_nothing() {
        let mut g = pair_gallery();
        g.step(&frame(true, Some(Vec3::new(5.0, 0.0, 0.0))));
        assert_eq!(g.grabbed_index(), None);
    }

    #[test]
    fn grab_only_engages_in_scatter_mode() {
        let mut g = pair_gallery();
        let mut f = frame(true, Some(Vec3::ZERO));
        f.mode = SceneMode::Tree;
        g.step(&f);
        assert_eq!(g.grabbed_index(), None);
    }

    #[test]
    fn grab_sticks_when_the_anchor_leaves_the_radius() {
        let mut g = pair_gallery();
        g.step(&frame(true, Some(Vec3::ZERO)));
        assert_eq!(g.grabbed_index(), Some(0));
        // Drag far away while still pinching: the grab holds and the photo
        // keeps chasing the anchor.
        let far = Vec3::new(9.0, 0.0, 0.0);
        for _ in 0..200 {
            g.step(&frame(true, Some(far)));
        }
        assert_eq!(g.grabbed_index(), Some(0));
        let expected = far + Vec3::Z * g.cfg.viewer_offset;
        assert!(g.instances()[0].position.distance(expected) < 0.05);
    }

    #[test]
    fn releasing_the_pinch_drops_immediately_and_photo_drifts_home() {
        let mut g = pair_gallery();
        for _ in 0..50 {
            g.step(&frame(true, Some(Vec3::new(3.0, 0.0, 0.0))));
        }
        assert_eq!(g.grabbed_index(), Some(1));
        g.step(&frame(false, Some(Vec3::new(3.0, 0.0, 0.0))));
        assert_eq!(g.grabbed_index(), None);
        for _ in 0..300 {
            g.step(&frame(false, None));
        }
        let home = g.items()[1].home;
        // At rest the photo bobs around home; at time 0 the bob wave sits
        // at sin(phase).
        let bob = (1.0f32).sin() * g.cfg.float_amplitude;
        assert!(g.instances()[1].position.distance(home + Vec3::Y * bob) < 0.01);
    }

    #[test]
    fn grabbed_photo_zooms_and_lifts_toward_the_viewer() {
        let mut g = pair_gallery();
        for _ in 0..300 {
            g.step(&frame(true, Some(Vec3::ZERO)));
        }
        let inst = g.instances()[0];
        assert!((inst.scale - g.cfg.zoom_scale).abs() < 0.01);
        assert!((inst.position.z - g.cfg.viewer_offset).abs() < 0.01);
    }

    #[test]
    fn grabbed_tilt_freezes_until_release() {
        let mut g = pair_gallery();
        // Let the idle tilt develop first.
        for i in 0..30 {
            let mut f = frame(false, None);
            f.time = i as f32 / 60.0;
            g.step(&f);
        }
        let tilt_before = g.instances()[0].tilt;
        assert!(tilt_before.abs() > 1e-4);
        for i in 30..90 {
            let mut f = frame(true, Some(Vec3::ZERO));
            f.time = i as f32 / 60.0;
            g.step(&f);
        }
        assert_eq!(g.instances()[0].tilt, tilt_before);
    }

    #[test]
    fn idle_photos_bob_with_time() {
        let mut g = pair_gallery();
        let mut f = frame(false, None);
        for i in 0..240 {
            f.time = i as f32 / 60.0;
            g.step(&f);
        }
        let y0 = g.instances()[0].position.y;
        for i in 240..300 {
            f.time = i as f32 / 60.0;
            g.step(&f);
        }
        assert!((g.instances()[0].position.y - y0).abs() > 1e-3);
    }

    #[test]
    fn easing_closes_a_tenth_per_frame() {
        let mut g = pair_gallery();
        let anchor = Vec3::new(1.2, 0.0, 0.0);
        g.step(&frame(true, Some(anchor)));
        assert_eq!(g.grabbed_index(), Some(1));
        // Photo 1 starts at (1,0,0); the first eased step covers 10% of the
        // gap to the lifted anchor target.
        let target = anchor + Vec3::Z * g.cfg.viewer_offset;
        let expected = Vec3::X + (target - Vec3::X) * 0.1;
        assert!(g.instances()[1].position.distance(expected) < 1e-5);
    }

    #[test]
    fn anchor_is_taken_relative_to_the_group_origin() {
        let mut shifted = cfg();
        shifted.group_offset = Vec3::new(10.0, 0.0, 0.0);
        let items = vec![PhotoItem {
            id: 0,
            label: "only".into(),
            home: Vec3::ZERO,
            phase: 0.0,
        }];
        let mut g = Gallery::with_items(shifted, items).unwrap();
        // World anchor right on the photo's world spot.
        g.step(&frame(true, Some(Vec3::new(10.0, 0.0, 0.0))));
        assert_eq!(g.grabbed_index(), Some(0));
    }

    #[test]
    fn config_validation_rejects_bad_values() {
        let mut c = cfg();
        c.photo_count = 0;
        assert!(matches!(c.validate(), Err(GalleryError::NoPhotos)));

        let mut c = cfg();
        c.grab_radius = 0.0;
        assert!(matches!(c.validate(), Err(GalleryError::GrabRadius(_))));

        let mut c = cfg();
        c.blend = 1.5;
        assert!(matches!(c.validate(), Err(GalleryError::BlendOutOfRange(_))));

        let mut c = cfg();
        c.zoom_scale = -1.0;
        assert!(matches!(
            c.validate(),
            Err(GalleryError::NonPositiveScale { .. })
        ));

        assert!(cfg().validate().is_ok());
    }
}
