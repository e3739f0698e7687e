//! Particles

mod warp_grid;

// Re-export
pub use warp_grid::*;

use crate::geometry::*;
use crate::mist::*;
use crate::rng::RNG;
use std::sync::Arc;

/// Interface for a particle suspended in a specimen. Particles are generated
/// per photon encounter, used on one thread, and dropped when the photon path
/// resolves.
pub trait Particle {
    /// Get the point where a ray starting inside the particle leaves it,
    /// together with the distance along the ray and the outward surface
    /// normal at that point. Returns `None` if the ray misses the surface.
    ///
    /// * `ray` - The ray, with its origin inside the particle.
    fn exit_point(&self, ray: &Ray) -> Option<(Float, Point3f, Vector3f)>;

    /// Get a uniformly random point on the hemisphere of the particle's
    /// surface that faces the incoming direction, with the outward normal at
    /// that point.
    ///
    /// * `dir` - The direction of the incoming ray; the chosen normal opposes
    ///           it.
    /// * `rng` - Random number generator.
    fn uniform_random_point(&self, dir: &Vector3f, rng: &mut RNG) -> (Point3f, Vector3f);

    /// Test whether a ray strikes the particle anywhere along its extent.
    ///
    /// * `ray` - The ray.
    fn intersects(&self, ray: &Ray) -> bool;

    /// Test whether a ray strikes the particle with the ray parameter
    /// restricted to a closed interval.
    ///
    /// * `ray` - The ray.
    /// * `i`   - The allowed parameter interval.
    fn intersects_interval(&self, ray: &Ray, i: &Interval) -> bool;

    /// The particle's largest extent.
    fn diameter(&self) -> Float;
}

/// Interface for particle generation. The only method of substance is
/// `generate`.
pub trait ParticleGenerator: Send + Sync {
    /// Generate a new, independent, immutable particle. Ownership passes to
    /// the caller.
    ///
    /// * `rng` - Random number generator driving the stochastic geometry.
    fn generate(&self, rng: &mut RNG) -> Box<dyn Particle>;

    /// Get the average distance between particles. This is the distance from
    /// the exit point of one particle to the entry point of the next.
    fn average_particle_distance(&self) -> Float;
}

/// Atomic reference counted `ParticleGenerator`. Generators are built once at
/// configuration and shared read-only across casting workers.
pub type ArcParticleGenerator = Arc<dyn ParticleGenerator>;
