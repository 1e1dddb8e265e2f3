//! # particle_field
//!
//! The particle side of the grove scene: formation geometry, the fixed
//! particle batch, and the per-frame integrator that walks every particle
//! toward its current formation target.
//!
//! ## Formations
//!
//! | Formation | Shape |
//! |---|---|
//! | tree | solid cone, denser at the base, with a thin trunk column |
//! | ribbon | spiral wrapped just outside the cone, flowing while in tree mode |
//! | heart | classic polar heart curve with per-particle jitter |
//! | scatter | uniform cloud in a bounding cube; also the creation layout |
//!
//! ## Per-frame contract
//!
//! The caller owns the clock and the scene mode.  Once per rendered frame it
//! passes a [`FrameInput`] to [`ParticleField::step`]; the field updates its
//! smoothed positions and derives a fresh batch of [`ParticleInstance`]s
//! (position, uniform scale, color) for the renderer.  Particles are never
//! added, removed, or reindexed after construction — the whole batch is
//! rebuilt if the configuration changes.

pub mod field;
pub mod motion;
pub mod shapes;

pub use field::{FieldConfig, FieldError, Particle, ParticleField, ParticleRole, SceneMode};
pub use motion::{ease_scalar, ease_toward, FrameInput, ParticleInstance, POSITION_BLEND, SWIRL_RADIUS};
pub use shapes::ShapeParams;
