//! Interactive pose lab: build a synthetic pose, inspect the measurements the
//! classifier sees, and watch the decision hold across hand scales.

use glam::Vec2;
use hand_gesture::{classify, joint, planar_distance, pose, ClassifierConfig, HandFrame};
use std::io::{self, Write};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            Hand Gesture Pose Laboratory              ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let cfg = ClassifierConfig::default();

    loop {
        print_menu();
        let choice = read_line("Select a pose (1–4, or q to quit): ");

        if choice.trim().eq_ignore_ascii_case("q") {
            println!("\nGoodbye!\n");
            break;
        }

        let (name, build): (&str, fn(Vec2, f32) -> HandFrame) = match choice.trim() {
            "1" => ("open palm", pose::open_palm_at),
            "2" => ("closed fist", pose::closed_fist_at),
            "3" => ("pinch", pose::pinch_at),
            "4" => ("relaxed", pose::relaxed_at),
            _ => {
                println!("  ⚠  Please enter 1–4 or q.\n");
                continue;
            }
        };

        let scale: f32 = {
            let s: f32 = read_line("  Hand scale (0.1–4.0, default 1.0): ")
                .trim()
                .parse()
                .unwrap_or(1.0);
            s.clamp(0.1, 4.0)
        };

        let frame = build(Vec2::new(0.5, 0.5), scale);
        println!();
        println!("  ┌─ {} (scale {:.2}) ─", name, scale);
        print_measurements(&frame, &cfg);

        let result = classify(&frame, &cfg);
        println!("  │");
        println!("  │  gesture       : {}", result.gesture.as_str());
        match result.anchor {
            Some(a) => println!("  │  anchor        : ({:.3}, {:.3})", a.x, a.y),
            None => println!("  │  anchor        : —"),
        }
        println!("  │  pinch metric  : {:.4}", result.pinch_distance);
        println!("  └─");

        // Scale sweep — the decision must not depend on apparent hand size.
        println!();
        println!("  Scale sweep:");
        for factor in [0.25, 0.5, 1.0, 2.0, 4.0] {
            let swept = build(Vec2::new(0.5, 0.5), scale).scaled_about_wrist(factor);
            let r = classify(&swept, &cfg);
            println!(
                "    ×{:<4}  palm {:.4}  →  {}",
                factor,
                swept.palm_span(),
                r.gesture.as_str()
            );
        }
        println!();
    }
}

fn print_measurements(frame: &HandFrame, cfg: &ClassifierConfig) {
    let palm = frame.palm_span().max(cfg.min_palm);
    let pinch = planar_distance(frame.thumb_tip(), frame.index_tip());

    println!("  │  palm span     : {:.4}", palm);
    println!(
        "  │  pinch gap     : {:.4}  (threshold {:.4})",
        pinch,
        cfg.pinch_ratio * palm
    );

    let curl_limit = cfg.curl_ratio * palm;
    let names = ["index", "middle", "ring", "pinky"];
    for (name, &tip) in names.iter().zip(joint::FINGERTIPS.iter()) {
        let d = planar_distance(frame.landmarks[tip], frame.wrist());
        println!(
            "  │  {:6} tip    : {:.4} from wrist  ({})",
            name,
            d,
            if d < curl_limit { "curled" } else { "extended" }
        );
    }
}

fn print_menu() {
    println!("  ┌──────────────────────────────────────────────────────┐");
    println!("  │  1. Open palm      — all fingers extended            │");
    println!("  │  2. Closed fist    — all fingers curled              │");
    println!("  │  3. Pinch          — thumb touching index tip        │");
    println!("  │  4. Relaxed        — ambiguous half-closed hand      │");
    println!("  └──────────────────────────────────────────────────────┘");
    println!();
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
