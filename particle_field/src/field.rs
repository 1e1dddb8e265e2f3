//! The particle batch: per-particle identity (role, targets, color, phase)
//! assigned once at construction and never mutated afterwards.

use glam::Vec3;
use rand::rngs::ThreadRng;
use rand::Rng;
use thiserror::Error;

use crate::motion::ParticleInstance;
use crate::shapes::ShapeParams;

// ════════════════════════════════════════════════════════════════════════════
// Scene modes and roles
// ════════════════════════════════════════════════════════════════════════════

/// Which formation the field is currently steering toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneMode {
    Tree,
    Scatter,
    Heart,
    PhotoView,
}

impl SceneMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneMode::Tree => "tree",
            SceneMode::Scatter => "scatter",
            SceneMode::Heart => "heart",
            SceneMode::PhotoView => "photo-view",
        }
    }
}

/// Role a particle plays inside the tree formation.  Roles are assigned by
/// index slot at construction: the leading share of indices becomes the
/// ribbon, the trailing share of the remainder becomes the trunk, and
/// everything in between is canopy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleRole {
    Canopy,
    Trunk,
    /// `ribbon_frac` is the particle's normalized position along the ribbon,
    /// 0 at the base and 1 at the apex.
    Ribbon { ribbon_frac: f32 },
}

impl ParticleRole {
    pub fn is_ribbon(&self) -> bool {
        matches!(self, ParticleRole::Ribbon { .. })
    }

    pub fn is_trunk(&self) -> bool {
        matches!(self, ParticleRole::Trunk)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Particle
// ════════════════════════════════════════════════════════════════════════════

/// One particle's immutable identity plus its smoothed position.  Targets
/// are sampled once so a formation always re-forms with the same layout.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub id: usize,
    /// Smoothed position, advanced each frame by the integrator.
    pub pos: Vec3,
    pub tree_target: Vec3,
    pub heart_target: Vec3,
    pub scatter_target: Vec3,
    pub role: ParticleRole,
    pub color: Vec3,
    pub base_size: f32,
    /// Per-particle phase decorrelating pulse, sway and blink.
    pub phase: f32,
    /// Per-particle rate multiplier, reserved for motion variants.
    pub speed: f32,
}

// ════════════════════════════════════════════════════════════════════════════
// Configuration
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct FieldConfig {
    /// Number of particles in the batch.
    pub count: usize,
    /// Fraction of the batch assigned to the ribbon (leading indices).
    pub ribbon_share: f32,
    /// Fraction of the *remaining* batch assigned to the trunk (trailing
    /// indices).
    pub trunk_share: f32,
    /// Canopy colors, picked uniformly per particle.
    pub palette: Vec<Vec3>,
    pub ribbon_color: Vec3,
    pub trunk_color: Vec3,
    pub size_min: f32,
    pub size_max: f32,
    pub shape: ShapeParams,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            count: 1800,
            ribbon_share: 0.13,
            trunk_share: 0.10,
            palette: vec![
                Vec3::new(0.18, 0.62, 0.28),
                Vec3::new(0.24, 0.72, 0.34),
                Vec3::new(0.32, 0.80, 0.40),
                Vec3::new(0.86, 0.22, 0.26),
                Vec3::new(0.92, 0.78, 0.30),
            ],
            ribbon_color: Vec3::new(1.0, 0.84, 0.35),
            trunk_color: Vec3::new(0.45, 0.30, 0.18),
            size_min: 0.035,
            size_max: 0.08,
            shape: ShapeParams::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("particle count must be at least 1")]
    EmptyBatch,
    #[error("role shares must each lie in [0, 1): ribbon {ribbon}, trunk {trunk}")]
    RoleShare { ribbon: f32, trunk: f32 },
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("size range invalid: min {min} must be positive and not exceed max {max}")]
    SizeRange { min: f32, max: f32 },
    #[error("shape dimension {name} must be positive, got {value}")]
    ShapeDimension { name: &'static str, value: f32 },
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.count == 0 {
            return Err(FieldError::EmptyBatch);
        }
        let bad_share = |s: f32| !(0.0..1.0).contains(&s);
        if bad_share(self.ribbon_share) || bad_share(self.trunk_share) {
            return Err(FieldError::RoleShare {
                ribbon: self.ribbon_share,
                trunk: self.trunk_share,
            });
        }
        if self.palette.is_empty() {
            return Err(FieldError::EmptyPalette);
        }
        if self.size_min <= 0.0 || self.size_min > self.size_max {
            return Err(FieldError::SizeRange {
                min: self.size_min,
                max: self.size_max,
            });
        }
        let dims = [
            ("base_radius", self.shape.base_radius),
            ("half_height", self.shape.half_height),
            ("trunk_radius", self.shape.trunk_radius),
            ("scatter_extent", self.shape.scatter_extent),
        ];
        for (name, value) in dims {
            if value <= 0.0 {
                return Err(FieldError::ShapeDimension { name, value });
            }
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ParticleField
// ════════════════════════════════════════════════════════════════════════════

/// The batch plus its per-frame render output.  `instances` is kept in step
/// with `particles` by [`ParticleField::step`](crate::motion).
pub struct ParticleField {
    pub(crate) cfg: FieldConfig,
    pub(crate) particles: Vec<Particle>,
    pub(crate) instances: Vec<ParticleInstance>,
}

impl ParticleField {
    /// Build a batch with OS randomness.
    pub fn new(cfg: FieldConfig) -> Result<Self, FieldError> {
        let mut rng = ThreadRng::default();
        Self::with_rng(cfg, &mut rng)
    }

    /// Build a batch with a caller-supplied generator, so layouts can be
    /// reproduced exactly.
    pub fn with_rng<R: Rng>(cfg: FieldConfig, rng: &mut R) -> Result<Self, FieldError> {
        cfg.validate()?;

        let count = cfg.count;
        let ribbon_count = ((count as f32) * cfg.ribbon_share).round() as usize;
        let rest = count - ribbon_count;
        let trunk_count = ((rest as f32) * cfg.trunk_share).round() as usize;
        let trunk_start = count - trunk_count;

        let mut particles = Vec::with_capacity(count);
        for id in 0..count {
            let role = if id < ribbon_count {
                let denom = (ribbon_count - 1).max(1) as f32;
                ParticleRole::Ribbon {
                    ribbon_frac: id as f32 / denom,
                }
            } else if id >= trunk_start {
                ParticleRole::Trunk
            } else {
                ParticleRole::Canopy
            };

            let tree_target = match role {
                ParticleRole::Ribbon { ribbon_frac } => cfg.shape.ribbon_point(ribbon_frac, 0.0),
                ParticleRole::Trunk => cfg.shape.sample_trunk(rng),
                ParticleRole::Canopy => cfg.shape.sample_canopy(rng),
            };
            let color = match role {
                ParticleRole::Ribbon { .. } => cfg.ribbon_color,
                ParticleRole::Trunk => cfg.trunk_color,
                ParticleRole::Canopy => cfg.palette[rng.gen_range(0..cfg.palette.len())],
            };

            let scatter_target = cfg.shape.sample_scatter(rng);
            particles.push(Particle {
                id,
                pos: scatter_target,
                tree_target,
                heart_target: cfg.shape.sample_heart(rng),
                scatter_target,
                role,
                color,
                base_size: rng.gen_range(cfg.size_min..=cfg.size_max),
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
                speed: rng.gen_range(0.8..1.2),
            });
        }

        let instances = particles
            .iter()
            .map(|p| ParticleInstance {
                position: p.pos,
                scale: p.base_size,
                color: p.color,
            })
            .collect();

        Ok(ParticleField {
            cfg,
            particles,
            instances,
        })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.cfg
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
