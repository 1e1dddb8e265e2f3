//! Interactive menu for driving the photo gallery by hand: toggle the
//! pinch, move the anchor, and watch photos get grabbed and released.

use glam::Vec3;
use particle_field::SceneMode;
use photo_gallery::{Gallery, GalleryConfig, GalleryFrame};
use std::io::{self, Write};

const FRAME_DT: f32 = 1.0 / 60.0;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              Photo Gallery Playground                ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let count: usize = read_line("Photo count (default 8): ")
        .trim().parse().unwrap_or(8);
    let cfg = GalleryConfig {
        photo_count: count.clamp(1, 64),
        ..GalleryConfig::default()
    };
    let mut gallery = match Gallery::new(cfg) {
        Ok(g) => g,
        Err(e) => {
            println!("  ⚠  {e}");
            return;
        }
    };

    let mut mode = SceneMode::Scatter;
    let mut time = 0.0f32;
    let mut pinching = false;
    let mut anchor: Option<Vec3> = None;

    loop {
        println!();
        println!("  mode {:10}  time {:6.2}s  pinch {}  grabbed {}",
            mode.as_str(),
            time,
            if pinching { "YES" } else { "no " },
            gallery.grabbed_index().map_or("-".to_string(), |id| id.to_string()));
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
                for _ in 0..frames.clamp(1, 100_000) {
                    time += FRAME_DT;
                    gallery.step(&GalleryFrame { mode, time, pinching, anchor });
                }
                println!("  stepped {} frame(s)", frames.clamp(1, 100_000));
            }
            "2" => {
                pinching = !pinching;
                println!("  pinch → {}", if pinching { "on" } else { "off" });
            }
            "3" => {
                let raw = read_line("  Anchor x y z (world, default 0 0 0): ");
                let mut it = raw.split_whitespace().map(|w| w.parse::<f32>().unwrap_or(0.0));
                let a = Vec3::new(
                    it.next().unwrap_or(0.0),
                    it.next().unwrap_or(0.0),
                    it.next().unwrap_or(0.0),
                );
                anchor = Some(a);
                println!("  anchor at ({:.2}, {:.2}, {:.2})", a.x, a.y, a.z);
            }
            "4" => {
                anchor = None;
                println!("  anchor cleared");
            }
            "5" => {
                mode = match mode {
                    SceneMode::Scatter => SceneMode::Tree,
                    _ => SceneMode::Scatter,
                };
                println!("  mode → {}", mode.as_str());
            }
            "6" => show_photos(&gallery),
            _ => println!("  ⚠  Please enter 1–6 or q."),
        }
    }
}

fn print_menu() {
    println!("  ┌──────────────────────────────────────────────────────┐");
    println!("  │  1. Step the gallery                                 │");
    println!("  │  2. Toggle pinch                                     │");
    println!("  │  3. Place anchor                                     │");
    println!("  │  4. Clear anchor                                     │");
    println!("  │  5. Toggle scene mode (scatter/tree)                 │");
    println!("  │  6. Show photos                                      │");
    println!("  └──────────────────────────────────────────────────────┘");
}

fn show_photos(gallery: &Gallery) {
    let origin = gallery.origin();
    println!();
    println!("  ┌─ {} photos (origin ({:.1}, {:.1}, {:.1})) ─",
        gallery.len(), origin.x, origin.y, origin.z);
    for (i, (item, inst)) in gallery.items().iter().zip(gallery.instances()).enumerate() {
        let world = origin + inst.position;
        let mark = if gallery.grabbed_index() == Some(i) { "◆" } else { " " };
        println!("  │ {} {:10}  world ({:6.2}, {:6.2}, {:6.2})  scale {:.2}  tilt {:+.3}",
            mark, item.label, world.x, world.y, world.z, inst.scale, inst.tilt);
    }
    println!("  └─");
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
