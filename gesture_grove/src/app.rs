//! Top-level application state machine.
//!
//! `AppState` owns the [`DetectionService`], the [`ParticleField`] and the
//! [`Gallery`].  Each tick it classifies the newest hand frame, applies the
//! gesture policy (open palm scatters, a closed fist calls the tree back),
//! and advances both scene components.

use std::sync::mpsc;

use glam::{Vec2, Vec3};
use thiserror::Error;

use hand_gesture::{classify_opt, ClassifierConfig, ClassifierError, Gesture, GestureResult};
use particle_field::{FieldConfig, FieldError, FrameInput, ParticleField, SceneMode};
use photo_gallery::{Gallery, GalleryConfig, GalleryError, GalleryFrame};

use crate::service::DetectionService;
use crate::source::SimInput;
use crate::visualizer::Visualizer;

/// Fixed simulation timestep; the window is rate-limited to match.
pub const FRAME_DT: f32 = 1.0 / 60.0;

// ════════════════════════════════════════════════════════════════════════════
// GroveConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct GroveConfig {
    pub field: FieldConfig,
    pub gallery: GalleryConfig,
    pub classifier: ClassifierConfig,
    /// Scene mode on startup.  Particles are created at their scatter
    /// positions, so the tree start makes the batch bloom into the cone
    /// over the first frames.
    pub start_mode: SceneMode,
    /// World units spanned by the normalized 0..1 view square.
    pub world_span: f32,
}

impl Default for GroveConfig {
    fn default() -> Self {
        GroveConfig {
            field: FieldConfig::default(),
            gallery: GalleryConfig::default(),
            classifier: ClassifierConfig::default(),
            start_mode: SceneMode::Tree,
            world_span: 12.0,
        }
    }
}

impl GroveConfig {
    pub fn validate(&self) -> Result<(), GroveError> {
        self.field.validate()?;
        self.gallery.validate()?;
        self.classifier.validate()?;
        if self.world_span <= 0.0 {
            return Err(GroveError::WorldSpan(self.world_span));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum GroveError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Gallery(#[from] GalleryError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error("world span must be positive, got {0}")]
    WorldSpan(f32),
    #[error("window error: {0}")]
    Window(String),
}

// ════════════════════════════════════════════════════════════════════════════
// UiCommand
// ════════════════════════════════════════════════════════════════════════════

/// Direct scene controls from the window, bypassing gesture recognition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiCommand {
    SetMode(SceneMode),
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    // ── inputs ───────────────────────────────────────────────────────────
    service: DetectionService,
    classifier: ClassifierConfig,

    // ── scene ────────────────────────────────────────────────────────────
    field: ParticleField,
    gallery: Gallery,
    mode: SceneMode,
    time: f32,

    // ── last observation ─────────────────────────────────────────────────
    last_result: GestureResult,
    anchor_world: Option<Vec3>,
    world_span: f32,

    // ── status message ───────────────────────────────────────────────────
    pub status: String,
}

impl AppState {
    pub fn new(cfg: GroveConfig, service: DetectionService) -> Result<Self, GroveError> {
        cfg.validate()?;
        let field = ParticleField::new(cfg.field)?;
        let gallery = Gallery::new(cfg.gallery)?;
        Ok(AppState {
            service,
            classifier: cfg.classifier,
            field,
            gallery,
            mode: cfg.start_mode,
            time: 0.0,
            last_result: GestureResult::none(),
            anchor_world: None,
            world_span: cfg.world_span,
            status: "Ready - show a hand".to_string(),
        })
    }

    // ── process one UiCommand ────────────────────────────────────────────

    pub fn handle_command(&mut self, cmd: UiCommand) {
        match cmd {
            UiCommand::SetMode(mode) => self.set_mode(mode, "key"),
            UiCommand::Quit => { /* handled in run loop */ }
        }
    }

    fn set_mode(&mut self, mode: SceneMode, via: &str) {
        if self.mode == mode {
            return;
        }
        tracing::info!(from = self.mode.as_str(), to = mode.as_str(), via, "scene change");
        self.mode = mode;
        self.status = format!("scene: {}", mode.as_str());
    }

    // ── per-frame tick ───────────────────────────────────────────────────

    pub fn tick(&mut self, dt: f32) {
        self.time += dt;

        let hand = self.service.poll();
        let result = classify_opt(hand.as_ref(), &self.classifier);
        self.anchor_world = result.anchor.map(|a| self.anchor_to_world(a));

        // Gesture policy: an open palm scatters, a fist calls the tree back.
        match result.gesture {
            Gesture::OpenPalm => self.set_mode(SceneMode::Scatter, "open-palm"),
            Gesture::ClosedFist => self.set_mode(SceneMode::Tree, "closed-fist"),
            Gesture::Pinch | Gesture::None => {}
        }

        if result.gesture != self.last_result.gesture {
            tracing::debug!(gesture = result.gesture.as_str(), "gesture change");
            self.status = match result.gesture {
                Gesture::OpenPalm => "OPEN PALM - scatter".to_string(),
                Gesture::ClosedFist => "CLOSED FIST - tree re-forms".to_string(),
                Gesture::Pinch => {
                    format!("PINCH ({:.3}) - grab a photo", result.pinch_distance)
                }
                Gesture::None => {
                    if hand.is_some() {
                        "hand tracked, no gesture".to_string()
                    } else {
                        "no hand".to_string()
                    }
                }
            };
        }
        self.last_result = result;

        self.field.step(&FrameInput {
            mode: self.mode,
            time: self.time,
            anchor: self.anchor_world,
        });

        let held_before = self.gallery.grabbed_index();
        self.gallery.step(&GalleryFrame {
            mode: self.mode,
            time: self.time,
            pinching: self.last_result.gesture == Gesture::Pinch,
            anchor: self.anchor_world,
        });
        let held_now = self.gallery.grabbed_index();
        if held_now != held_before {
            match held_now {
                Some(id) => {
                    tracing::debug!(photo = id, "photo grabbed");
                    if let Some(item) = self.gallery.items().get(id) {
                        self.status = format!("holding {}", item.label);
                    }
                }
                None => tracing::debug!("photo released"),
            }
        }
    }

    /// Map a normalized view-space anchor into the scene.  Both axes are
    /// mirrored about the view center: the camera faces the user, so this
    /// makes the on-screen cursor move with the hand instead of against it,
    /// and view-space y (downward) becomes world y (upward).
    fn anchor_to_world(&self, anchor: Vec2) -> Vec3 {
        Vec3::new(
            (0.5 - anchor.x) * self.world_span,
            (0.5 - anchor.y) * self.world_span,
            0.0,
        )
    }

    // ── accessors for the render loop ────────────────────────────────────

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn gesture(&self) -> Gesture {
        self.last_result.gesture
    }

    pub fn anchor(&self) -> Option<Vec3> {
        self.anchor_world
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn quit_requested(&self) -> bool {
        self.service.quit_requested()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It creates the visualizer,
/// the landmark source (simulation by default, hardware with `--features
/// leap`), and drives the event/render loop at ~60 fps.
pub fn run(cfg: GroveConfig) -> Result<(), GroveError> {
    // ── sim input channel ────────────────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();

    #[cfg(not(feature = "leap"))]
    let service = DetectionService::spawn(crate::source::SimLandmarkSource { rx: sim_rx });
    #[cfg(feature = "leap")]
    let service = {
        // Window input still carries scene keys; the hand comes from hardware.
        drop(sim_rx);
        DetectionService::spawn(crate::source::LeapLandmarkSource)
    };

    // ── visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(sim_tx).map_err(GroveError::Window)?;

    // ── app state ────────────────────────────────────────────────────────
    let mut app = AppState::new(cfg, service)?;

    // ── main loop ────────────────────────────────────────────────────────
    while vis.is_open() {
        for cmd in vis.poll_input() {
            if cmd == UiCommand::Quit {
                return Ok(());
            }
            app.handle_command(cmd);
        }

        app.tick(FRAME_DT);
        if app.quit_requested() {
            return Ok(());
        }

        vis.render(
            app.field().instances(),
            app.gallery(),
            app.mode(),
            app.gesture(),
            app.anchor(),
            &app.status,
        );
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
