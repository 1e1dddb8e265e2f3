//! Formation geometry: pure samplers mapping a particle slot to a position
//! in each named formation.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

// ════════════════════════════════════════════════════════════════════════════
// ShapeParams
// ════════════════════════════════════════════════════════════════════════════

/// Dimensions of every formation.  All formations share the same vertical
/// span `-half_height..half_height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeParams {
    /// Cone radius at the base (height `-half_height`); shrinks linearly to
    /// exactly 0 at the apex.
    pub base_radius: f32,
    /// Half of the formation height; the cone spans `-h..h`.
    pub half_height: f32,
    /// Radius of the trunk column around x = z = 0.
    pub trunk_radius: f32,
    /// Trunk heights run `-half_height..trunk_top`, keeping the column
    /// visually separate from the foliage above.
    pub trunk_top: f32,
    /// Full turns the ribbon sweeps from base to apex.
    pub ribbon_turns: f32,
    /// Extra radius added outside the cone so the ribbon wraps the foliage.
    pub ribbon_gap: f32,
    /// Scale applied to the unit heart curve (which spans y ∈ [-17, 5]).
    pub heart_scale: f32,
    /// Per-axis jitter applied to heart samples.
    pub heart_jitter: f32,
    /// Half-side of the scatter bounding cube.
    pub scatter_extent: f32,
}

impl Default for ShapeParams {
    fn default() -> Self {
        ShapeParams {
            base_radius: 2.6,
            half_height: 5.0,
            trunk_radius: 0.22,
            trunk_top: -1.2,
            ribbon_turns: 5.0,
            ribbon_gap: 0.35,
            heart_scale: 0.3,
            heart_jitter: 0.25,
            scatter_extent: 7.0,
        }
    }
}

impl ShapeParams {
    /// Admissible cone radius at a world height: `base_radius` at the base,
    /// exactly 0 at the apex, linear in between.
    pub fn cone_radius(&self, height: f32) -> f32 {
        let u = ((height + self.half_height) / (2.0 * self.half_height)).clamp(0.0, 1.0);
        self.base_radius * (1.0 - u)
    }

    /// Sample a canopy position: uniform height, uniform angle, radius
    /// uniform in `[0, cone_radius]` — a solid cone, denser at the base.
    pub fn sample_canopy<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let h = rng.gen_range(-self.half_height..self.half_height);
        let r = rng.gen_range(0.0..=self.cone_radius(h));
        let theta = rng.gen_range(0.0..TAU);
        Vec3::new(r * theta.cos(), h, r * theta.sin())
    }

    /// Sample a trunk position: a thin column near x = z = 0 over the lower
    /// height sub-range.
    pub fn sample_trunk<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let h = rng.gen_range(-self.half_height..self.trunk_top);
        let r = rng.gen_range(0.0..=self.trunk_radius);
        let theta = rng.gen_range(0.0..TAU);
        Vec3::new(r * theta.cos(), h, r * theta.sin())
    }

    /// Ribbon position for a fractional index along the ribbon subset.
    /// `frac` 0..1 maps to height bottom..top and to `ribbon_turns` full
    /// turns of angle; `spin` is the time-dependent angular offset that
    /// makes the ribbon flow.  Height depends only on `frac`, so the flow
    /// rotates the ribbon without lifting it.
    pub fn ribbon_point(&self, frac: f32, spin: f32) -> Vec3 {
        let h = -self.half_height + frac * 2.0 * self.half_height;
        let theta = frac * self.ribbon_turns * TAU + spin;
        let r = self.cone_radius(h) + self.ribbon_gap;
        Vec3::new(r * theta.cos(), h, r * theta.sin())
    }

    /// The classic polar heart curve at parameter `t`, scaled, in the
    /// x/y plane.
    pub fn heart_point(&self, t: f32) -> Vec3 {
        let x = 16.0 * t.sin().powi(3);
        let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
        Vec3::new(x * self.heart_scale, y * self.heart_scale, 0.0)
    }

    /// Sample the heart at a random phase with slight jitter on all three
    /// axes, scattering particles organically along the curve.
    pub fn sample_heart<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let t = rng.gen_range(0.0..TAU);
        let j = self.heart_jitter;
        let jitter = Vec3::new(
            rng.gen_range(-j..=j),
            rng.gen_range(-j..=j),
            rng.gen_range(-j..=j),
        );
        self.heart_point(t) + jitter
    }

    /// Uniform random point in the scatter cube.
    pub fn sample_scatter<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let e = self.scatter_extent;
        Vec3::new(
            rng.gen_range(-e..=e),
            rng.gen_range(-e..=e),
            rng.gen_range(-e..=e),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
