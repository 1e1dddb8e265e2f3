//! Demonstrates the classifier on the four canonical poses.

use glam::Vec2;
use hand_gesture::{classify, classify_opt, pose, ClassifierConfig};

fn show(label: &str, result: &hand_gesture::GestureResult) {
    let anchor = match result.anchor {
        Some(a) => format!("({:.3}, {:.3})", a.x, a.y),
        None => "—".to_string(),
    };
    println!(
        "   {:12} →  {:12}  anchor {}  pinch {:.4}",
        label,
        result.gesture.as_str(),
        anchor,
        result.pinch_distance
    );
}

fn main() {
    println!("\n=== Gesture Classifier Demo ===\n");

    let cfg = ClassifierConfig::default();
    let c = Vec2::new(0.5, 0.6);

    // ── 1. The four canonical poses ───────────────────────────────────────
    println!("1. Canonical poses at scale 1.0");
    show("open palm", &classify(&pose::open_palm_at(c, 1.0), &cfg));
    show("closed fist", &classify(&pose::closed_fist_at(c, 1.0), &cfg));
    show("pinch", &classify(&pose::pinch_at(c, 1.0), &cfg));
    show("relaxed", &classify(&pose::relaxed_at(c, 1.0), &cfg));
    println!();

    // ── 2. Absence is a valid input ───────────────────────────────────────
    println!("2. No hand detected");
    show("absent", &classify_opt(None, &cfg));
    println!();

    // ── 3. Scale invariance ───────────────────────────────────────────────
    println!("3. Pinch across apparent hand sizes");
    for factor in [0.25, 0.5, 1.0, 2.0, 4.0] {
        let frame = pose::pinch_at(c, 1.0).scaled_about_wrist(factor);
        let r = classify(&frame, &cfg);
        println!(
            "   ×{:<4}  palm {:.4}  gap {:.4}  →  {}",
            factor,
            frame.palm_span(),
            r.pinch_distance,
            r.gesture.as_str()
        );
    }
    println!();

    // ── 4. Fist beats pinch ───────────────────────────────────────────────
    println!("4. Priority: a fist also satisfies the pinch test");
    let fist = pose::closed_fist_at(c, 1.0);
    let gap = hand_gesture::planar_distance(fist.thumb_tip(), fist.index_tip());
    println!(
        "   thumb–index gap {:.4} is under the pinch threshold {:.4},",
        gap,
        cfg.pinch_ratio * fist.palm_span()
    );
    show("yet", &classify(&fist, &cfg));
    println!();

    // ── 5. Hand drifting across the frame ─────────────────────────────────
    println!("5. Anchor follows the hand across the frame");
    for x in [0.2, 0.5, 0.8] {
        let frame = pose::pinch_at(Vec2::new(x, 0.5), 1.0);
        show("pinch", &classify(&frame, &cfg));
    }
    println!();
}
