//! Scripted grab-and-release session against the default ring gallery.

use glam::Vec3;
use particle_field::SceneMode;
use photo_gallery::{Gallery, GalleryConfig, GalleryFrame};

const FRAME_DT: f32 = 1.0 / 60.0;

fn run(gallery: &mut Gallery, time: &mut f32, pinching: bool, anchor: Option<Vec3>, frames: usize) {
    for _ in 0..frames {
        *time += FRAME_DT;
        gallery.step(&GalleryFrame {
            mode: SceneMode::Scatter,
            time: *time,
            pinching,
            anchor,
        });
    }
}

fn main() {
    println!("\n=== Photo Gallery Demo ===\n");

    let mut gallery = Gallery::new(GalleryConfig::default()).unwrap();
    let mut time = 0.0f32;

    // ── 1. The idle ring ──────────────────────────────────────────────────
    println!("1. Idle ring of {} photos", gallery.len());
    run(&mut gallery, &mut time, false, None, 120);
    for (item, inst) in gallery.items().iter().zip(gallery.instances()).take(4) {
        println!("   {:10}  ({:6.2}, {:6.2}, {:6.2})  tilt {:+.3}",
            item.label, inst.position.x, inst.position.y, inst.position.z, inst.tilt);
    }
    println!("   …");
    println!();

    // ── 2. Pinch near a photo: it gets grabbed ────────────────────────────
    let target = gallery.items()[2].home;
    let origin = gallery.origin();
    let anchor = origin + target + Vec3::new(0.4, 0.2, 0.0);
    println!("2. Pinching near {} (anchor off by 0.45)", gallery.items()[2].label);
    run(&mut gallery, &mut time, true, Some(anchor), 1);
    println!("   grabbed: {:?}", gallery.grabbed_index());
    // Expected: Some(2)
    println!();

    // ── 3. The grab is sticky: drag far across the scene ─────────────────
    println!("3. Dragging the photo well outside the grab radius");
    let far = Vec3::new(-6.0, 2.0, 0.0);
    run(&mut gallery, &mut time, true, Some(far), 240);
    let inst = gallery.instances()[2];
    println!("   still grabbed: {:?}", gallery.grabbed_index());
    println!("   photo now at ({:.2}, {:.2}, {:.2}), scale {:.2}",
        inst.position.x, inst.position.y, inst.position.z, inst.scale);
    // Scale approaches the 2.4 zoom; z carries the viewer lift.
    println!();

    // ── 4. Release: the photo drifts home and shrinks back ───────────────
    println!("4. Releasing the pinch");
    run(&mut gallery, &mut time, false, None, 1);
    println!("   grabbed after one frame: {:?}", gallery.grabbed_index());
    run(&mut gallery, &mut time, false, None, 400);
    let inst = gallery.instances()[2];
    let home = gallery.items()[2].home;
    println!("   settled {:.3} from home, scale {:.2}",
        inst.position.distance(home), inst.scale);
    println!();

    // ── 5. Pinching in the void grabs nothing ─────────────────────────────
    println!("5. Pinching far from every photo");
    run(&mut gallery, &mut time, true, Some(Vec3::new(30.0, 0.0, 0.0)), 30);
    println!("   grabbed: {:?}", gallery.grabbed_index());
    // Expected: None
    println!("\nDone.");
}
