//! Walks the particle field through every formation and motion layer.

use glam::Vec3;
use particle_field::{
    FieldConfig, FrameInput, ParticleField, ParticleRole, SceneMode, SWIRL_RADIUS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME_DT: f32 = 1.0 / 60.0;

fn run_frames(field: &mut ParticleField, mode: SceneMode, time: &mut f32, anchor: Option<Vec3>, frames: usize) {
    for _ in 0..frames {
        *time += FRAME_DT;
        field.step(&FrameInput { mode, time: *time, anchor });
    }
}

fn mean_gap(field: &ParticleField, pick: impl Fn(&particle_field::Particle) -> Vec3) -> f32 {
    let total: f32 = field.particles().iter().map(|p| p.pos.distance(pick(p))).sum();
    total / field.len() as f32
}

fn main() {
    println!("\n=== Particle Field Demo ===\n");

    let mut rng = StdRng::seed_from_u64(2024);
    let cfg = FieldConfig { count: 600, ..FieldConfig::default() };
    let mut field = ParticleField::with_rng(cfg, &mut rng).unwrap();
    let mut time = 0.0f32;

    // ── 1. Construction: roles by index slot ─────────────────────────────
    println!("1. Seeded batch of {}", field.len());
    let ribbon = field.particles().iter().filter(|p| p.role.is_ribbon()).count();
    let trunk = field.particles().iter().filter(|p| p.role.is_trunk()).count();
    println!("   canopy {}  trunk {}  ribbon {}", field.len() - ribbon - trunk, trunk, ribbon);
    for id in [0, ribbon, field.len() - 1] {
        let p = &field.particles()[id];
        println!("   particle {:>3}: {:?} at ({:6.2}, {:6.2}, {:6.2})",
            p.id, p.role, p.pos.x, p.pos.y, p.pos.z);
    }
    println!();

    // ── 2. Particles wake up scattered ───────────────────────────────────
    println!("2. Everyone starts on their scatter home");
    let off_home = field.particles().iter().filter(|p| p.pos != p.scatter_target).count();
    println!("   particles off their scatter target: {}", off_home);
    // Expected: 0
    println!();

    // ── 3. Exponential glide into the tree ───────────────────────────────
    println!("3. Gliding into the tree (8% of the gap per frame)");
    for checkpoint in [0usize, 30, 60, 120, 300] {
        let done: usize = checkpoint.saturating_sub((time / FRAME_DT).round() as usize);
        run_frames(&mut field, SceneMode::Tree, &mut time, None, done);
        println!("   after {:>3} frames: mean gap to tree target {:.3}",
            checkpoint, mean_gap(&field, |p| p.tree_target));
    }
    println!();

    // ── 4. Ribbon flow: angle moves, height holds ────────────────────────
    println!("4. Ribbon flow in TREE mode");
    let rid = ribbon / 2;
    let before = field.particles()[rid].pos;
    run_frames(&mut field, SceneMode::Tree, &mut time, None, 90);
    let after = field.particles()[rid].pos;
    println!("   ribbon particle {} moved {:.3} in the plane, {:.4} vertically",
        rid, (Vec3::new(after.x, 0.0, after.z) - Vec3::new(before.x, 0.0, before.z)).length(),
        (after.y - before.y).abs());
    println!();

    // ── 5. Heart formation ───────────────────────────────────────────────
    println!("5. Re-forming as a heart");
    run_frames(&mut field, SceneMode::Heart, &mut time, None, 300);
    println!("   mean gap to heart target {:.3}", mean_gap(&field, |p| p.heart_target));
    let top = field.particles().iter().map(|p| p.pos.y).fold(f32::NEG_INFINITY, f32::max);
    let bottom = field.particles().iter().map(|p| p.pos.y).fold(f32::INFINITY, f32::min);
    println!("   vertical extent {:.2} … {:.2}", bottom, top);
    println!();

    // ── 6. Scatter with a hand anchor: local swirl only ──────────────────
    println!("6. Scattering, then swirling around an anchor");
    run_frames(&mut field, SceneMode::Scatter, &mut time, None, 300);
    let anchor = field.particles()[100].scatter_target;
    let near = field.particles().iter()
        .filter(|p| p.scatter_target.distance(anchor) < SWIRL_RADIUS)
        .count();
    run_frames(&mut field, SceneMode::Scatter, &mut time, Some(anchor), 60);
    let stirred = field.particles().iter()
        .filter(|p| p.pos.distance(p.scatter_target) > 0.2)
        .count();
    println!("   {} of {} particles sit within {:.0} units of the anchor", near, field.len(), SWIRL_RADIUS);
    println!("   {} particles pulled off their scatter home by the swirl", stirred);
    println!();

    // ── 7. Pulse and blink on the render instances ───────────────────────
    println!("7. Instance pulse and blink over one second");
    let blinker = field.particles().iter()
        .find(|p| matches!(p.role, ParticleRole::Canopy) && p.id % 15 == 0)
        .map(|p| p.id)
        .unwrap();
    for _ in 0..4 {
        run_frames(&mut field, SceneMode::Scatter, &mut time, None, 15);
        let inst = &field.instances()[blinker];
        println!("   t={:5.2}s  particle {:>3}  scale {:.3}  color ({:.2}, {:.2}, {:.2})",
            time, blinker, inst.scale, inst.color.x, inst.color.y, inst.color.z);
    }
    println!("\nDone.");
}
