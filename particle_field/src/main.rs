//! Interactive menu for exploring the particle field: step the integrator,
//! switch formations, place an anchor, and inspect the batch.

use glam::Vec3;
use particle_field::{FieldConfig, FrameInput, ParticleField, ParticleRole, SceneMode};
use std::io::{self, Write};

const FRAME_DT: f32 = 1.0 / 60.0;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            Particle Field Playground                 ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let count: usize = read_line("Particle count (default 1800): ")
        .trim().parse().unwrap_or(1800);
    let cfg = FieldConfig {
        count: count.clamp(1, 200_000),
        ..FieldConfig::default()
    };
    let mut field = match ParticleField::new(cfg) {
        Ok(f) => f,
        Err(e) => {
            println!("  ⚠  {e}");
            return;
        }
    };

    let mut mode = SceneMode::Scatter;
    let mut time = 0.0f32;
    let mut anchor: Option<Vec3> = None;

    loop {
        println!();
        println!("  mode {:10}  time {:7.2}s  anchor {}",
            mode.as_str(),
            time,
            anchor.map_or("none".to_string(), |a| format!("({:.2}, {:.2}, {:.2})", a.x, a.y, a.z)));
        print_menu();
        let choice = read_line("Select (1–6, or q to quit): ");

        if choice.trim().eq_ignore_ascii_case("q") {
            println!("\nGoodbye!\n");
            break;
        }

        match choice.trim() {
            "1" => {
                let frames: usize = read_line("  Frames to step (default 60): ")
                    .trim().parse().unwrap_or(60);
                let frames = frames.clamp(1, 100_000);
                for _ in 0..frames {
                    time += FRAME_DT;
                    field.step(&FrameInput { mode, time, anchor });
                }
                println!("  stepped {} frame(s)", frames);
            }
            "2" => {
                let m = read_line("  Formation (t=tree, s=scatter, h=heart, v=photo-view): ");
                mode = match m.trim() {
                    "t" => SceneMode::Tree,
                    "s" => SceneMode::Scatter,
                    "h" => SceneMode::Heart,
                    "v" => SceneMode::PhotoView,
                    _ => {
                        println!("  ⚠  Please enter t, s, h or v.");
                        continue;
                    }
                };
                println!("  formation → {}", mode.as_str());
            }
            "3" => {
                let raw = read_line("  Anchor x y z (default 0 0 0): ");
                let mut it = raw.split_whitespace().map(|w| w.parse::<f32>().unwrap_or(0.0));
                let a = Vec3::new(
                    it.next().unwrap_or(0.0),
                    it.next().unwrap_or(0.0),
                    it.next().unwrap_or(0.0),
                );
                anchor = Some(a);
                println!("  anchor placed at ({:.2}, {:.2}, {:.2})", a.x, a.y, a.z);
            }
            "4" => {
                anchor = None;
                println!("  anchor cleared");
            }
            "5" => {
                let id: usize = read_line("  Particle id (default 0): ")
                    .trim().parse().unwrap_or(0);
                inspect(&field, id);
            }
            "6" => stats(&field, mode),
            _ => println!("  ⚠  Please enter 1–6 or q."),
        }
    }
}

fn print_menu() {
    println!("  ┌──────────────────────────────────────────────────────┐");
    println!("  │  1. Step the simulation                              │");
    println!("  │  2. Set formation                                    │");
    println!("  │  3. Place anchor                                     │");
    println!("  │  4. Clear anchor                                     │");
    println!("  │  5. Inspect a particle                               │");
    println!("  │  6. Batch statistics                                 │");
    println!("  └──────────────────────────────────────────────────────┘");
}

fn inspect(field: &ParticleField, id: usize) {
    let Some(p) = field.particles().get(id) else {
        println!("  ⚠  No particle {id} (batch holds {}).", field.len());
        return;
    };
    let inst = &field.instances()[id];
    println!();
    println!("  ┌─ particle {} ─", p.id);
    println!("  │  role     : {}", role_name(&p.role));
    println!("  │  position : ({:7.3}, {:7.3}, {:7.3})", p.pos.x, p.pos.y, p.pos.z);
    println!("  │  tree     : ({:7.3}, {:7.3}, {:7.3})", p.tree_target.x, p.tree_target.y, p.tree_target.z);
    println!("  │  heart    : ({:7.3}, {:7.3}, {:7.3})", p.heart_target.x, p.heart_target.y, p.heart_target.z);
    println!("  │  scatter  : ({:7.3}, {:7.3}, {:7.3})", p.scatter_target.x, p.scatter_target.y, p.scatter_target.z);
    println!("  │  size     : base {:.3}, rendered {:.3}", p.base_size, inst.scale);
    println!("  │  color    : ({:.2}, {:.2}, {:.2})", inst.color.x, inst.color.y, inst.color.z);
    println!("  └─");
}

fn stats(field: &ParticleField, mode: SceneMode) {
    let mut canopy = 0usize;
    let mut trunk = 0usize;
    let mut ribbon = 0usize;
    let mut lo = Vec3::splat(f32::INFINITY);
    let mut hi = Vec3::splat(f32::NEG_INFINITY);
    let mut total_gap = 0.0f32;
    for p in field.particles() {
        match p.role {
            ParticleRole::Canopy => canopy += 1,
            ParticleRole::Trunk => trunk += 1,
            ParticleRole::Ribbon { .. } => ribbon += 1,
        }
        lo = lo.min(p.pos);
        hi = hi.max(p.pos);
        let target = match mode {
            SceneMode::Scatter => p.scatter_target,
            SceneMode::Heart => p.heart_target,
            _ => p.tree_target,
        };
        total_gap += p.pos.distance(target);
    }
    println!();
    println!("  ┌─ batch of {} ─", field.len());
    println!("  │  canopy {}  trunk {}  ribbon {}", canopy, trunk, ribbon);
    println!("  │  bounds   : ({:6.2}, {:6.2}, {:6.2}) … ({:6.2}, {:6.2}, {:6.2})",
        lo.x, lo.y, lo.z, hi.x, hi.y, hi.z);
    println!("  │  mean gap to {} target: {:.3}", mode.as_str(), total_gap / field.len() as f32);
    println!("  └─");
}

fn role_name(role: &ParticleRole) -> String {
    match role {
        ParticleRole::Canopy => "canopy".to_string(),
        ParticleRole::Trunk => "trunk".to_string(),
        ParticleRole::Ribbon { ribbon_frac } => format!("ribbon ({:.2} along)", ribbon_frac),
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
