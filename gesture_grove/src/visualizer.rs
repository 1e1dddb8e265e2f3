//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ scene: tree      gesture: pinch          holding photo 03   │
//! │                                                             │
//! │              · · particles, depth-sorted · ·                │
//! │          ┌────┐                                             │
//! │          │photo│   ✛ anchor crosshair                       │
//! │          └────┘                                             │
//! │  status bar                                                 │
//! │  key legend                                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is drawn into one ARGB buffer with a tiny 3×5 bitmap font —
//! no GPU, no text stack.

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use glam::Vec3;
use hand_gesture::Gesture;
use particle_field::{ParticleInstance, SceneMode};
use photo_gallery::Gallery;

use crate::app::UiCommand;
use crate::source::{SimInput, SimPose};

use std::sync::mpsc::Sender;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 1280;
pub const WIN_H: usize = 720;

/// Camera sits on +z looking at the origin.
const CAM_DIST: f32 = 15.0;
const FOCAL: f32 = 560.0;

/// World-unit footprint of a photo card at scale 1.
const PHOTO_W: f32 = 1.5;
const PHOTO_H: f32 = 1.1;

const STATUS_Y: usize = WIN_H - 36;
const BG_COLOR: u32 = 0xFF0B1020;
const TEXT_BG: u32 = 0xFF16213E;
const HUD_COLOR: u32 = 0xFFAACCEE;
const LEGEND_COLOR: u32 = 0xFF7788AA;
const FRAME_COLOR: u32 = 0xFFE8E2D4;
const GRAB_COLOR: u32 = 0xFFFFD700;

/// Soft print tints cycled across the gallery.
const PHOTO_TINTS: [u32; 6] = [
    0xFF9AB8D8, 0xFFD8B89A, 0xFFA8C8A0, 0xFFC8A0B8, 0xFFB8A8D0, 0xFFD0C890,
];

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

/// One depth-sorted draw command; photos and particles interleave freely.
enum DrawItem {
    Dot {
        x: f32,
        y: f32,
        r: usize,
        color: u32,
    },
    Photo {
        idx: usize,
        x: f32,
        y: f32,
        w: usize,
        h: usize,
        tilt: f32,
    },
}

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    sim_tx: Sender<SimInput>,
    last_pointer: Option<(f32, f32)>,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, String> {
        let mut window = Window::new(
            "Gesture Grove — living particle scenes",
            WIN_W,
            WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
            last_pointer: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll window input.  Pose keys and the mouse pointer feed the sim
    /// landmark source; scene keys come back as [`UiCommand`]s.
    pub fn poll_input(&mut self) -> Vec<UiCommand> {
        let mut commands = Vec::new();
        if !self.window.is_open() {
            commands.push(UiCommand::Quit);
            return commands;
        }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        if one_shot(Key::Q) {
            let _ = self.sim_tx.send(SimInput::Quit);
            commands.push(UiCommand::Quit);
            return commands;
        }

        // ── pose keys → sim hand ─────────────────────────────────────────
        if one_shot(Key::O) {
            let _ = self.sim_tx.send(SimInput::Pose(SimPose::Open));
        }
        if one_shot(Key::F) {
            let _ = self.sim_tx.send(SimInput::Pose(SimPose::Fist));
        }
        if one_shot(Key::P) {
            let _ = self.sim_tx.send(SimInput::Pose(SimPose::Pinch));
        }
        if one_shot(Key::R) {
            let _ = self.sim_tx.send(SimInput::Pose(SimPose::Relaxed));
        }
        if one_shot(Key::N) {
            let _ = self.sim_tx.send(SimInput::HandOff);
        }

        // ── scene keys → app commands ────────────────────────────────────
        if one_shot(Key::T) {
            commands.push(UiCommand::SetMode(SceneMode::Tree));
        }
        if one_shot(Key::S) {
            commands.push(UiCommand::SetMode(SceneMode::Scatter));
        }
        if one_shot(Key::H) {
            commands.push(UiCommand::SetMode(SceneMode::Heart));
        }
        if one_shot(Key::V) {
            commands.push(UiCommand::SetMode(SceneMode::PhotoView));
        }

        // ── mouse → sim pointer ──────────────────────────────────────────
        if let Some((px, py)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let nx = px / WIN_W as f32;
            let ny = py / WIN_H as f32;
            let moved = self
                .last_pointer
                .map_or(true, |(lx, ly)| (nx - lx).abs() > 5e-4 || (ny - ly).abs() > 5e-4);
            if moved {
                self.last_pointer = Some((nx, ny));
                let _ = self.sim_tx.send(SimInput::Pointer { x: nx, y: ny });
            }
        }

        commands
    }

    /// Render one frame.
    pub fn render(
        &mut self,
        particles: &[ParticleInstance],
        gallery: &Gallery,
        mode: SceneMode,
        gesture: Gesture,
        anchor: Option<Vec3>,
        status: &str,
    ) {
        self.buf.fill(BG_COLOR);

        // ── collect depth-sorted draw items ──────────────────────────────
        let mut items: Vec<(f32, DrawItem)> = Vec::with_capacity(particles.len() + gallery.len());

        let particle_dim = if mode == SceneMode::PhotoView { 0.35 } else { 1.0 };
        for inst in particles {
            if let Some((sx, sy, depth)) = project(inst.position) {
                let r = ((inst.scale * FOCAL / depth).round() as usize).clamp(1, 12);
                let color = shade(vec_to_argb(inst.color), particle_dim);
                items.push((
                    depth,
                    DrawItem::Dot {
                        x: sx,
                        y: sy,
                        r,
                        color,
                    },
                ));
            }
        }

        let origin = gallery.origin();
        for (idx, inst) in gallery.instances().iter().enumerate() {
            if let Some((sx, sy, depth)) = project(origin + inst.position) {
                let w = (PHOTO_W * inst.scale * FOCAL / depth) as usize;
                let h = (PHOTO_H * inst.scale * FOCAL / depth) as usize;
                items.push((
                    depth,
                    DrawItem::Photo {
                        idx,
                        x: sx,
                        y: sy,
                        w,
                        h,
                        tilt: inst.tilt,
                    },
                ));
            }
        }

        // Painter's order: far to near.
        items.sort_by(|a, b| b.0.total_cmp(&a.0));

        for (_, item) in &items {
            match *item {
                DrawItem::Dot { x, y, r, color } => self.draw_dot(x, y, r, color),
                DrawItem::Photo {
                    idx,
                    x,
                    y,
                    w,
                    h,
                    tilt,
                } => {
                    let grabbed = gallery.grabbed_index() == Some(idx);
                    let label = &gallery.items()[idx].label;
                    self.draw_photo(x, y, w, h, tilt, idx, label, grabbed);
                }
            }
        }

        // ── anchor crosshair ─────────────────────────────────────────────
        if let Some(a) = anchor {
            if let Some((sx, sy, _)) = project(a) {
                self.draw_crosshair(sx, sy, gesture_color(gesture));
            }
        }

        // ── HUD ──────────────────────────────────────────────────────────
        self.draw_label(&format!("scene: {}", mode.as_str()), 10, 8, HUD_COLOR);
        self.draw_label(&format!("gesture: {}", gesture.as_str()), 10, 18, HUD_COLOR);
        if let Some(i) = gallery.grabbed_index() {
            let note = format!("holding {}", gallery.items()[i].label);
            self.draw_label(&note, WIN_W - note.len() * 4 - 10, 8, GRAB_COLOR);
        }

        // ── status bar ───────────────────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, TEXT_BG);
        self.draw_label(status, 10, STATUS_Y + 6, 0xFFEEEEEE);
        self.draw_label(
            "mouse=hand  o=open f=fist p=pinch r=relax n=hand off  t/s/h/v=scene  q=quit",
            10,
            WIN_H - 14,
            LEGEND_COLOR,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── scene elements ───────────────────────────────────────────────────

    fn draw_dot(&mut self, cx: f32, cy: f32, r: usize, color: u32) {
        let (cx, cy) = (cx.round() as isize, cy.round() as isize);
        let r = r as isize;
        for dy in -r..=r {
            let span = r - dy.abs();
            for dx in -span..=span {
                self.set_pixel_i(cx + dx, cy + dy, color);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_photo(
        &mut self,
        cx: f32,
        cy: f32,
        w: usize,
        h: usize,
        tilt: f32,
        idx: usize,
        label: &str,
        grabbed: bool,
    ) {
        let w = w.max(8);
        let h = h.max(6);
        let x0 = cx.round() as isize - (w / 2) as isize;
        let y0 = cy.round() as isize - (h / 2) as isize;

        let frame = if grabbed { GRAB_COLOR } else { FRAME_COLOR };
        let tint = PHOTO_TINTS[idx % PHOTO_TINTS.len()];

        // Tilt is a roll angle; approximate it by shearing rows sideways.
        let shear = tilt * w as f32 * 0.5;
        for row in 0..h {
            let dy = row as f32 / h as f32 - 0.5;
            let shift = (dy * shear).round() as isize;
            let edge = row < 2 || row + 2 >= h;
            for col in 0..w {
                let border = edge || col < 2 || col + 2 >= w;
                let color = if border { frame } else { tint };
                self.set_pixel_i(x0 + shift + col as isize, y0 + row as isize, color);
            }
        }

        let lx = cx.round() as isize - (label.len() * 4 / 2) as isize;
        let ly = y0 + h as isize + 4;
        if lx >= 0 && ly >= 0 {
            let color = if grabbed { GRAB_COLOR } else { LEGEND_COLOR };
            self.draw_label(label, lx as usize, ly as usize, color);
        }
    }

    fn draw_crosshair(&mut self, cx: f32, cy: f32, color: u32) {
        let (cx, cy) = (cx.round() as isize, cy.round() as isize);
        // Four arms with a small open center, so the mark never hides what
        // it points at.
        for d in 3..=9 {
            self.set_pixel_i(cx + d, cy, color);
            self.set_pixel_i(cx - d, cy, color);
            self.set_pixel_i(cx, cy + d, color);
            self.set_pixel_i(cx, cy - d, color);
        }
        self.set_pixel_i(cx, cy, color);
    }

    // ── primitive drawing helpers ────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn set_pixel_i(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < WIN_H {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    /// Minimal bitmap font — 3×5 characters, lowercase-folded.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel_i((cx + col) as isize, (y + row) as isize, color);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > WIN_W {
                break;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Projection
// ────────────────────────────────────────────────────────────────────────────

/// Perspective-project a world point; `None` when it sits behind the camera.
fn project(p: Vec3) -> Option<(f32, f32, f32)> {
    let depth = CAM_DIST - p.z;
    if depth <= 0.5 {
        return None;
    }
    let sx = WIN_W as f32 * 0.5 + p.x * FOCAL / depth;
    let sy = WIN_H as f32 * 0.5 - p.y * FOCAL / depth;
    Some((sx, sy, depth))
}

fn gesture_color(gesture: Gesture) -> u32 {
    match gesture {
        Gesture::OpenPalm => 0xFF88EEBB,
        Gesture::ClosedFist => 0xFFEE8866,
        Gesture::Pinch => GRAB_COLOR,
        Gesture::None => 0xFF8899AA,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c.to_ascii_lowercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b001, 0b001, 0b001, 0b001, 0b001],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b011, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b100, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b001],
        'a' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'b' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'd' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'f' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'g' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'h' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' => [0b011, 0b001, 0b001, 0b101, 0b010],
        'k' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'l' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'n' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'o' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'p' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'q' => [0b010, 0b101, 0b101, 0b011, 0b001],
        'r' => [0b110, 0b101, 0b110, 0b110, 0b101],
        's' => [0b011, 0b100, 0b010, 0b001, 0b110],
        't' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'w' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'x' => [0b101, 0b010, 0b010, 0b010, 0b101],
        'y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b010, 0b101, 0b010, 0b000], // fallback diamond
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Color helpers
// ────────────────────────────────────────────────────────────────────────────

/// Pack a linear 0..1 RGB vector into ARGB.
fn vec_to_argb(c: Vec3) -> u32 {
    let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u32;
    0xFF000000 | (ch(c.x) << 16) | (ch(c.y) << 8) | ch(c.z)
}

/// Scale the RGB channels of an ARGB color toward black.
fn shade(color: u32, f: f32) -> u32 {
    let f = f.clamp(0.0, 1.0);
    let ch = |shift: u32| (((color >> shift) & 0xFF) as f32 * f) as u32;
    0xFF000000 | (ch(16) << 16) | (ch(8) << 8) | ch(0)
}
