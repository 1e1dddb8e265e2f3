//! Per-frame integration: pick each particle's goal for the current scene,
//! ease the smoothed position toward it, and refresh the render instances.

use glam::Vec3;

use crate::field::{Particle, ParticleField, ParticleRole, SceneMode};

// ════════════════════════════════════════════════════════════════════════════
// Tuning constants
// ════════════════════════════════════════════════════════════════════════════

/// Fraction of the remaining distance closed per frame.
pub const POSITION_BLEND: f32 = 0.08;
/// Anchor influence radius for the scatter swirl; particles whose scatter
/// home lies at or beyond this distance are untouched.
pub const SWIRL_RADIUS: f32 = 4.0;

const SWIRL_AMPLITUDE: f32 = 0.35;
const SWAY_AMPLITUDE: f32 = 0.12;
const SWAY_RATE: f32 = 1.6;
const PULSE_RATE: f32 = 5.0;
const PULSE_DEPTH: f32 = 0.5;
const RIBBON_SCALE_BOOST: f32 = 1.2;
const RIBBON_FLOW_RATE: f32 = 0.6;
const BLINK_RATE: f32 = 3.0;
const BLINK_DIM: f32 = 0.4;
const BLINK_STRIDE: usize = 15;

// ════════════════════════════════════════════════════════════════════════════
// Frame types
// ════════════════════════════════════════════════════════════════════════════

/// Everything the integrator needs to know about one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    pub mode: SceneMode,
    /// Monotonic scene time in seconds.
    pub time: f32,
    /// World-space hand anchor, if a hand is tracked this frame.
    pub anchor: Option<Vec3>,
}

/// Render-ready state for one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleInstance {
    pub position: Vec3,
    pub scale: f32,
    pub color: Vec3,
}

// ════════════════════════════════════════════════════════════════════════════
// Easing
// ════════════════════════════════════════════════════════════════════════════

/// Exponential smoothing step: close `blend` of the gap to `target`.
pub fn ease_toward(current: Vec3, target: Vec3, blend: f32) -> Vec3 {
    current + (target - current) * blend
}

/// Scalar form of [`ease_toward`].
pub fn ease_scalar(current: f32, target: f32, blend: f32) -> f32 {
    current + (target - current) * blend
}

// ════════════════════════════════════════════════════════════════════════════
// Integration
// ════════════════════════════════════════════════════════════════════════════

impl ParticleField {
    /// Advance every particle one frame and rebuild the instance buffer.
    pub fn step(&mut self, frame: &FrameInput) {
        let shape = self.cfg.shape;
        for (p, inst) in self.particles.iter_mut().zip(self.instances.iter_mut()) {
            let mut goal = base_target(p, frame.mode, frame.time, &shape);
            goal += swirl_offset(p, frame);
            goal.y += sway(p, frame.time);

            p.pos = ease_toward(p.pos, goal, POSITION_BLEND);
            inst.position = p.pos;
            inst.scale = pulse_scale(p, frame.time);
            inst.color = blink_color(p, frame.time);
        }
    }

    pub fn instances(&self) -> &[ParticleInstance] {
        &self.instances
    }
}

/// Formation target for the current mode.  PHOTO_VIEW keeps the tree
/// standing behind the gallery; the ribbon flows (angular offset advancing
/// with time, height fixed) only while the tree is the active formation.
fn base_target(p: &Particle, mode: SceneMode, time: f32, shape: &crate::shapes::ShapeParams) -> Vec3 {
    match mode {
        SceneMode::Scatter => p.scatter_target,
        SceneMode::Heart => p.heart_target,
        SceneMode::Tree => match p.role {
            ParticleRole::Ribbon { ribbon_frac } => {
                shape.ribbon_point(ribbon_frac, time * RIBBON_FLOW_RATE)
            }
            _ => p.tree_target,
        },
        SceneMode::PhotoView => p.tree_target,
    }
}

/// Hand-driven swirl, active only while scattered: particles whose scatter
/// home lies strictly inside [`SWIRL_RADIUS`] of the anchor orbit it in the
/// screen plane, phased by particle id so neighbours circulate rather than
/// clump.
fn swirl_offset(p: &Particle, frame: &FrameInput) -> Vec3 {
    if frame.mode != SceneMode::Scatter {
        return Vec3::ZERO;
    }
    let Some(anchor) = frame.anchor else {
        return Vec3::ZERO;
    };
    if p.scatter_target.distance(anchor) >= SWIRL_RADIUS {
        return Vec3::ZERO;
    }
    let a = frame.time + p.id as f32;
    Vec3::new(a.cos(), a.sin(), 0.0) * SWIRL_AMPLITUDE
}

/// Gentle vertical bob, phased per particle.
fn sway(p: &Particle, time: f32) -> f32 {
    (time * SWAY_RATE + p.phase).sin() * SWAY_AMPLITUDE
}

/// Size pulse around the base size; ribbon particles render a fifth larger
/// so the spiral stays legible inside the foliage.
fn pulse_scale(p: &Particle, time: f32) -> f32 {
    let boost = if p.role.is_ribbon() {
        RIBBON_SCALE_BOOST
    } else {
        1.0
    };
    p.base_size * boost * (1.0 + PULSE_DEPTH * (PULSE_RATE * time + p.phase).sin())
}

/// Every [`BLINK_STRIDE`]th canopy particle dims to [`BLINK_DIM`] on the
/// negative half of its blink wave.  Trunk and ribbon hold steady.
fn blink_color(p: &Particle, time: f32) -> Vec3 {
    let blinker = matches!(p.role, ParticleRole::Canopy) && p.id % BLINK_STRIDE == 0;
    if blinker && (BLINK_RATE * time + p.phase).sin() < 0.0 {
        p.color * BLINK_DIM
    } else {
        p.color
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldConfig;
    use crate::shapes::ShapeParams;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::PI;

    fn seeded_field(count: usize, seed: u64) -> ParticleField {
        let cfg = FieldConfig {
            count,
            ..FieldConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(seed);
        ParticleField::with_rng(cfg, &mut rng).unwrap()
    }

    fn probe(role: ParticleRole, id: usize) -> Particle {
        Particle {
            id,
            pos: Vec3::ZERO,
            tree_target: Vec3::new(1.0, 2.0, 3.0),
            heart_target: Vec3::new(-1.0, 0.5, 0.0),
            scatter_target: Vec3::ZERO,
            role,
            color: Vec3::ONE,
            base_size: 0.05,
            phase: 0.0,
            speed: 1.0,
        }
    }

    #[test]
    fn easing_closes_the_configured_fraction() {
        assert!((ease_scalar(0.0, 1.0, POSITION_BLEND) - 0.08).abs() < 1e-6);
        let moved = ease_toward(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), POSITION_BLEND);
        assert!((moved.x - 0.8).abs() < 1e-5);
    }

    #[test]
    fn easing_never_overshoots() {
        let mut x = 0.0;
        for _ in 0..200 {
            let next = ease_scalar(x, 1.0, POSITION_BLEND);
            assert!(next > x && next < 1.0);
            x = next;
        }
        assert!(x > 0.99);
    }

    #[test]
    fn step_converges_on_the_tree_formation() {
        let mut field = seeded_field(60, 11);
        let frame = FrameInput {
            mode: SceneMode::Tree,
            time: 0.0,
            anchor: None,
        };
        for _ in 0..400 {
            field.step(&frame);
        }
        let shape = field.config().shape;
        for p in field.particles() {
            let mut goal = base_target(p, SceneMode::Tree, 0.0, &shape);
            goal.y += sway(p, 0.0);
            assert!(p.pos.distance(goal) < 1e-2, "particle {} off goal", p.id);
        }
    }

    #[test]
    fn step_keeps_instances_in_lockstep() {
        let mut field = seeded_field(40, 3);
        let frame = FrameInput {
            mode: SceneMode::Heart,
            time: 1.5,
            anchor: None,
        };
        field.step(&frame);
        assert_eq!(field.instances().len(), field.len());
        for (p, inst) in field.particles().iter().zip(field.instances()) {
            assert_eq!(p.pos, inst.position);
        }
    }

    #[test]
    fn each_mode_selects_its_own_target() {
        let shape = ShapeParams::default();
        let p = probe(ParticleRole::Canopy, 5);
        assert_eq!(base_target(&p, SceneMode::Tree, 2.0, &shape), p.tree_target);
        assert_eq!(base_target(&p, SceneMode::Heart, 2.0, &shape), p.heart_target);
        assert_eq!(
            base_target(&p, SceneMode::Scatter, 2.0, &shape),
            p.scatter_target
        );
    }

    #[test]
    fn photo_view_reuses_the_tree_formation() {
        let shape = ShapeParams::default();
        let p = probe(ParticleRole::Canopy, 5);
        assert_eq!(
            base_target(&p, SceneMode::PhotoView, 7.0, &shape),
            p.tree_target
        );
    }

    #[test]
    fn ribbon_flows_only_in_tree_mode() {
        let shape = ShapeParams::default();
        let p = probe(ParticleRole::Ribbon { ribbon_frac: 0.4 }, 2);
        let at_zero = base_target(&p, SceneMode::Tree, 0.0, &shape);
        let later = base_target(&p, SceneMode::Tree, 1.0, &shape);
        // The flow rotates the ribbon target but never lifts it.
        assert!(at_zero.distance(later) > 1e-3);
        assert_eq!(at_zero.y, later.y);
        // Outside TREE the ribbon freezes at its stored spot.
        assert_eq!(
            base_target(&p, SceneMode::PhotoView, 1.0, &shape),
            base_target(&p, SceneMode::PhotoView, 9.0, &shape)
        );
    }

    #[test]
    fn swirl_requires_scatter_mode_and_anchor() {
        let p = probe(ParticleRole::Canopy, 1);
        let near = Some(Vec3::new(1.0, 0.0, 0.0));
        let swirling = FrameInput {
            mode: SceneMode::Scatter,
            time: 0.3,
            anchor: near,
        };
        assert!(swirl_offset(&p, &swirling).length() > 1e-3);

        let no_anchor = FrameInput {
            anchor: None,
            ..swirling
        };
        assert_eq!(swirl_offset(&p, &no_anchor), Vec3::ZERO);

        let wrong_mode = FrameInput {
            mode: SceneMode::Tree,
            ..swirling
        };
        assert_eq!(swirl_offset(&p, &wrong_mode), Vec3::ZERO);
    }

    #[test]
    fn swirl_cuts_off_hard_at_the_radius() {
        let p = probe(ParticleRole::Canopy, 1);
        let inside = FrameInput {
            mode: SceneMode::Scatter,
            time: 0.0,
            anchor: Some(Vec3::new(SWIRL_RADIUS - 0.01, 0.0, 0.0)),
        };
        assert!(swirl_offset(&p, &inside).length() > 1e-3);

        let on_edge = FrameInput {
            anchor: Some(Vec3::new(SWIRL_RADIUS, 0.0, 0.0)),
            ..inside
        };
        assert_eq!(swirl_offset(&p, &on_edge), Vec3::ZERO);
    }

    #[test]
    fn distant_particles_ignore_the_anchor() {
        let mut anchored = seeded_field(80, 21);
        let mut free = seeded_field(80, 21);
        let anchor = anchored.particles()[40].scatter_target;
        let with_anchor = FrameInput {
            mode: SceneMode::Scatter,
            time: 0.5,
            anchor: Some(anchor),
        };
        let without = FrameInput {
            anchor: None,
            ..with_anchor
        };
        for _ in 0..30 {
            anchored.step(&with_anchor);
            free.step(&without);
        }
        let mut influenced = 0;
        for (a, f) in anchored.particles().iter().zip(free.particles()) {
            if a.scatter_target.distance(anchor) >= SWIRL_RADIUS {
                assert_eq!(a.pos, f.pos, "particle {} should be untouched", a.id);
            } else if a.pos.distance(f.pos) > 1e-4 {
                influenced += 1;
            }
        }
        // The particle the anchor sits on is inside the radius by construction.
        assert!(influenced >= 1);
    }

    #[test]
    fn pulse_rests_on_the_base_size() {
        // phase 0, time 0 puts the pulse wave at its zero crossing.
        let p = probe(ParticleRole::Canopy, 0);
        assert!((pulse_scale(&p, 0.0) - p.base_size).abs() < 1e-6);
    }

    #[test]
    fn ribbon_pulses_a_fifth_larger() {
        let canopy = probe(ParticleRole::Canopy, 0);
        let ribbon = probe(ParticleRole::Ribbon { ribbon_frac: 0.5 }, 0);
        let ratio = pulse_scale(&ribbon, 0.0) / pulse_scale(&canopy, 0.0);
        assert!((ratio - 1.2).abs() < 1e-5);
    }

    #[test]
    fn pulse_scale_stays_positive() {
        let p = probe(ParticleRole::Canopy, 0);
        let mut t = 0.0;
        while t < 10.0 {
            assert!(pulse_scale(&p, t) > 0.0);
            t += 0.05;
        }
    }

    #[test]
    fn blink_dims_every_fifteenth_canopy() {
        let p = probe(ParticleRole::Canopy, 30);
        // 3t = 3π/2 puts the blink wave in its negative half.
        let dim_time = PI / 2.0;
        assert_eq!(blink_color(&p, dim_time), p.color * 0.4);
        // 3t = π/2 puts it in the positive half.
        let lit_time = PI / 6.0;
        assert_eq!(blink_color(&p, lit_time), p.color);
    }

    #[test]
    fn off_stride_canopy_never_blinks() {
        let p = probe(ParticleRole::Canopy, 7);
        assert_eq!(blink_color(&p, PI / 2.0), p.color);
    }

    #[test]
    fn trunk_and_ribbon_never_blink() {
        let trunk = probe(ParticleRole::Trunk, 15);
        let ribbon = probe(ParticleRole::Ribbon { ribbon_frac: 0.0 }, 45);
        assert_eq!(blink_color(&trunk, PI / 2.0), trunk.color);
        assert_eq!(blink_color(&ribbon, PI / 2.0), ribbon.color);
    }
}
