//! gesture_grove — interactive entry point.

use gesture_grove::app::{run, GroveConfig};
use particle_field::{FieldConfig, SceneMode};
use photo_gallery::GalleryConfig;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║       Gesture Grove — hand-driven living particle scenes     ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Mouse + keyboard simulation  (use --features leap for hardware)");
    println!();

    let cfg = if std::env::args().any(|a| a == "--quick") {
        println!("  Quick-start: 1800 particles, 8 photos, tree formation\n");
        GroveConfig::default()
    } else {
        configure_interactively()
    };

    println!();
    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_interactively() -> GroveConfig {
    let particles: usize = read_line("  Particle count (default 1800): ")
        .trim().parse().unwrap_or(1800);
    let photos: usize = read_line("  Photo count (default 8): ")
        .trim().parse().unwrap_or(8);

    println!("  Start formation: 1=scatter  2=tree  3=heart");
    let start_mode = match read_line("  Choice (default 2): ").trim() {
        "1" => SceneMode::Scatter,
        "3" => SceneMode::Heart,
        _ => SceneMode::Tree,
    };

    GroveConfig {
        field: FieldConfig {
            count: particles.clamp(1, 200_000),
            ..FieldConfig::default()
        },
        gallery: GalleryConfig {
            photo_count: photos.clamp(1, 64),
            ..GalleryConfig::default()
        },
        start_mode,
        ..GroveConfig::default()
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
