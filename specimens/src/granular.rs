//! Granular Specimen

use core::error::{Error, Result};
use core::fresnel::{fr_dielectric, reflect, refract};
use core::geometry::{Point3f, Ray, Vector3f};
use core::mist::*;
use core::rng::RNG;
use core::sampling::{pick_weighted, sample_exponential};
use core::specimen::{
    validate_media, MediumDef, ParticleDef, RayFlags, RayResult, Specimen,
};
use core::spectrum::{ComplexIndex, SpectralSample};

/// Cap on medium/particle events per photon path. A photon that is still
/// bouncing after this many events is counted as absorbed.
const MAX_SCATTER_EVENTS: usize = 10_000;

/// Cap on total internal reflections inside a single particle.
const MAX_INTERNAL_BOUNCES: usize = 64;

/// A slab of randomly generated particles suspended in one or more
/// interstitial media, such as snow or sand.
///
/// The specimen occupies z ∈ [-depth, 0] with the photon entering at the
/// origin heading downward. Each photon is propagated through an alternating
/// sequence of free paths in an interstitial medium and Fresnel interactions
/// with freshly generated particles, until it leaves through the entry face
/// (reflected), leaves through the bottom face (transmitted), or is absorbed
/// along the way.
///
/// After default construction the specimen is not ready for use; the depth,
/// media and particle populations must be configured first.
pub struct GranularSpecimen {
    /// The name of the material.
    name: String,

    /// The depth (thickness) of the sample in metres.
    depth: Float,

    /// The interstitial media and their volumetric fractions.
    media: Vec<MediumDef>,

    /// Medium weights, extracted for the per-event weighted draw.
    media_weights: Vec<Float>,

    /// The particle populations.
    particles: Vec<ParticleDef>,

    /// Particle concentrations, extracted for the per-event weighted draw.
    concentrations: Vec<Float>,

    /// If set, the boundary of the sample is subject to mirror-like Fresnel
    /// effects: a Bernoulli trial weighted by the Fresnel reflectance decides
    /// between specular reflection off the entry plane and refraction into
    /// the slab. This creates spikes in BRDF output, but is correct for some
    /// situations, like full saturation.
    mirror_interface: bool,

    /// Whether the material has a perfect reflector beneath it. When unset
    /// the photon transmits through the bottom face instead.
    lower_reflector: bool,
}

impl Default for GranularSpecimen {
    fn default() -> Self {
        Self {
            name: "snow".to_string(),
            depth: -1.0,
            media: Vec::new(),
            media_weights: Vec::new(),
            particles: Vec::new(),
            concentrations: Vec::new(),
            mirror_interface: true,
            lower_reflector: false,
        }
    }
}

impl GranularSpecimen {
    /// Default construct the specimen. It is not ready for use until its
    /// properties are set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the depth (thickness) of the sample in metres. A depth of zero is
    /// allowed and makes the slab a pure interface: photons are specularly
    /// reflected or transmitted, never absorbed.
    ///
    /// * `depth` - The depth. Must be non-negative.
    pub fn set_depth(&mut self, depth: Float) -> Result<()> {
        if !(depth >= 0.0) {
            return Err(Error::config(format!(
                "specimen depth must be non-negative, got {depth}"
            )));
        }
        self.depth = depth;
        Ok(())
    }

    /// Get the depth (thickness) of the sample in metres.
    pub fn depth(&self) -> Float {
        self.depth
    }

    /// Set the types of media that exist between the particles and their
    /// respective fractional quantities. The weights must sum to one within
    /// tolerance.
    ///
    /// * `media` - The medium definitions. At least one must be given.
    pub fn set_media_types(&mut self, media: Vec<MediumDef>) -> Result<()> {
        validate_media(&media)?;
        self.media_weights = media.iter().map(|m| m.weight).collect();
        self.media = media;
        Ok(())
    }

    /// Provide access to the media types for debugging output.
    pub fn media_types(&self) -> &[MediumDef] {
        &self.media
    }

    /// Set the particle populations of the specimen.
    ///
    /// * `particles` - The particle definitions. At least one must be given
    ///                 and each must validate.
    pub fn set_particles(&mut self, particles: Vec<ParticleDef>) -> Result<()> {
        if particles.is_empty() {
            return Err(Error::config(
                "at least one particle type must be defined",
            ));
        }
        for p in &particles {
            p.validate()?;
        }
        self.concentrations = particles.iter().map(|p| p.concentration).collect();
        self.particles = particles;
        Ok(())
    }

    /// Provide access to the particle populations for debugging output.
    pub fn particles(&self) -> &[ParticleDef] {
        &self.particles
    }

    /// Enable or disable mirror-like Fresnel effects at the sample boundary.
    ///
    /// * `mirror` - Set to true to enable mirror-like interface reflections.
    pub fn set_mirror_interface(&mut self, mirror: bool) {
        self.mirror_interface = mirror;
    }

    /// Test whether the Fresnel boundary interface is enabled.
    pub fn is_mirror_interface(&self) -> bool {
        self.mirror_interface
    }

    /// Set whether the material has a perfect reflector beneath its surface.
    ///
    /// * `reflector` - If true, photons reaching the bottom face are mirrored
    ///                 back up instead of transmitting.
    pub fn set_lower_reflector(&mut self, reflector: bool) {
        self.lower_reflector = reflector;
    }

    /// Test whether the lower reflector is enabled.
    pub fn has_lower_reflector(&self) -> bool {
        self.lower_reflector
    }

    /// Check that the specimen has been fully configured. Call before
    /// handing the specimen to a measurement job.
    pub fn validate(&self) -> Result<()> {
        if !(self.depth >= 0.0) {
            return Err(Error::config("specimen depth has not been set"));
        }
        if self.media.is_empty() {
            return Err(Error::config("specimen media have not been set"));
        }
        if self.particles.is_empty() {
            return Err(Error::config("specimen particles have not been set"));
        }
        Ok(())
    }

    /// Draw one interstitial medium according to the volumetric fractions.
    fn pick_medium(&self, rng: &mut RNG) -> &MediumDef {
        &self.media[pick_weighted(&self.media_weights, rng.uniform_float())]
    }

    /// Draw one particle population according to the concentrations.
    fn pick_population(&self, rng: &mut RNG) -> &ParticleDef {
        &self.particles[pick_weighted(&self.concentrations, rng.uniform_float())]
    }

    /// Bernoulli absorption trial over a path of length `length` in a medium
    /// with absorption coefficient `alpha`.
    fn absorbed_over(alpha: Float, length: Float, rng: &mut RNG) -> bool {
        alpha > 0.0 && sample_exponential(rng.uniform_float(), 1.0 / alpha) < length
    }

    /// Cross the entry or bottom face from inside the slab. Applies the
    /// Fresnel interface when enabled; an internal reflection trial or total
    /// internal reflection turns the photon back into the slab (`None`).
    fn leave_slab(
        &self,
        dir: &Vector3f,
        normal_out: &Vector3f,
        ambient: &ComplexIndex,
        lambda: Float,
        rng: &mut RNG,
    ) -> Option<Vector3f> {
        if !self.mirror_interface {
            return Some(*dir);
        }
        let medium = self.pick_medium(rng).complex_index(lambda);
        // The incident side of the interface is inside the slab.
        let n = -*normal_out;
        let reflectance = fr_dielectric(abs(dir.dot(&n)), medium.n, ambient.n);
        if rng.uniform_float() < reflectance {
            return None;
        }
        refract(dir, &n, medium.n, ambient.n)
    }

    /// Scatter the photon through one particle encounter: Fresnel trial at
    /// the particle surface, then chord-wise absorption and internal
    /// reflections until the photon leaves the particle or dies.
    ///
    /// Returns the outgoing direction, or `None` when the photon was
    /// absorbed inside the particle.
    fn particle_scatter(
        &self,
        dir: &Vector3f,
        lambda: Float,
        rng: &mut RNG,
    ) -> Option<Vector3f> {
        let population = self.pick_population(rng);
        let particle = population.generator.generate(rng);
        let medium = self.pick_medium(rng).complex_index(lambda);
        let interior = population.complex_index(lambda);
        let alpha = population.absorption_coefficient(lambda);

        let (entry, normal) = particle.uniform_random_point(dir, rng);

        let reflectance = fr_dielectric(abs(dir.dot(&normal)), medium.n, interior.n);
        if rng.uniform_float() < reflectance {
            return Some(reflect(dir, &normal).normalize());
        }

        // Refract into the particle. The surface point sampler guarantees
        // the normal opposes the incoming direction.
        let mut inside = match refract(dir, &normal, medium.n, interior.n) {
            Some(d) => d.normalize(),
            None => return Some(reflect(dir, &normal).normalize()),
        };
        let mut position = entry;

        for _ in 0..MAX_INTERNAL_BOUNCES {
            let (chord, exit, exit_normal) =
                match particle.exit_point(&Ray::new(position, inside)) {
                    Some(hit) => hit,
                    // Numerical corner: the exit ray grazes its own entry
                    // point. Treat the photon as leaving undeviated.
                    None => return Some(inside),
                };

            if Self::absorbed_over(alpha, chord, rng) {
                return None;
            }

            // Internal reflection trial at the particle boundary.
            let reflectance =
                fr_dielectric(abs(inside.dot(&exit_normal)), interior.n, medium.n);
            if rng.uniform_float() < reflectance {
                inside = reflect(&inside, &exit_normal).normalize();
                position = exit;
                continue;
            }
            match refract(&inside, &(-exit_normal), interior.n, medium.n) {
                Some(out) => return Some(out.normalize()),
                None => {
                    inside = reflect(&inside, &exit_normal).normalize();
                    position = exit;
                }
            }
        }
        // Trapped by repeated total internal reflection.
        None
    }
}

impl Specimen for GranularSpecimen {
    /// Run the per-photon state machine to termination.
    fn scatter(
        &self,
        photon: &Ray,
        ss: &SpectralSample,
        ambient: &ComplexIndex,
        rng: &mut RNG,
    ) -> RayResult {
        let lambda = ss.lambda;
        let up = Vector3f::z_axis();
        let entry = photon.o;
        let mut dir = photon.d.normalize();

        // Incident: Fresnel trial at the entry plane.
        if self.mirror_interface {
            let medium = self.pick_medium(rng).complex_index(lambda);
            let reflectance = fr_dielectric(abs(dir.z), ambient.n, medium.n);
            if rng.uniform_float() < reflectance {
                let exit = Ray::new(entry, reflect(&dir, &up).normalize());
                return RayResult::reflected(exit).with_flags(RayFlags::MIRROR);
            }
            if let Some(refracted) = refract(&dir, &up, ambient.n, medium.n) {
                dir = refracted.normalize();
            }
        }

        let mut position = entry;
        for _ in 0..MAX_SCATTER_EVENTS {
            // Free path to the next particle encounter.
            let mean_distance = if self.particles.is_empty() {
                INFINITY
            } else {
                self.pick_population(rng).mean_distance()
            };
            let free_path = if mean_distance.is_finite() {
                sample_exponential(rng.uniform_float(), mean_distance)
            } else {
                INFINITY
            };

            // Distance to whichever slab face the direction points at.
            let face_distance = if dir.z > 0.0 {
                -position.z / dir.z
            } else if dir.z < 0.0 {
                (-self.depth - position.z) / dir.z
            } else {
                INFINITY
            };

            let segment = min(free_path, face_distance);
            if !segment.is_finite() {
                // Travelling parallel to the faces in a particle-free medium.
                return RayResult::absorbed();
            }

            let medium = self.pick_medium(rng);
            if Self::absorbed_over(medium.absorption_coefficient(lambda), segment, rng) {
                return RayResult::absorbed();
            }

            if face_distance <= free_path {
                // Slab face reached before the next particle.
                let face = position + dir * face_distance;
                if dir.z > 0.0 {
                    match self.leave_slab(&dir, &up, ambient, lambda, rng) {
                        Some(out) => {
                            let exit = Ray::new(Point3f::new(face.x, face.y, 0.0), out);
                            return RayResult::reflected(exit);
                        }
                        None => {
                            dir = reflect(&dir, &up).normalize();
                            position = Point3f::new(face.x, face.y, 0.0);
                            continue;
                        }
                    }
                }
                if self.lower_reflector {
                    dir = reflect(&dir, &up).normalize();
                    position = Point3f::new(face.x, face.y, -self.depth);
                    continue;
                }
                match self.leave_slab(&dir, &-up, ambient, lambda, rng) {
                    Some(out) => {
                        let exit = Ray::new(Point3f::new(face.x, face.y, -self.depth), out);
                        return RayResult::transmitted(exit);
                    }
                    None => {
                        dir = reflect(&dir, &up).normalize();
                        position = Point3f::new(face.x, face.y, -self.depth);
                        continue;
                    }
                }
            }

            // Particle encounter inside the slab.
            position = position + dir * free_path;
            match self.particle_scatter(&dir, lambda, rng) {
                Some(out) => dir = out,
                None => return RayResult::absorbed(),
            }
        }

        debug!(
            "photon exceeded {} scatter events in '{}', counting it absorbed",
            MAX_SCATTER_EVENTS, self.name
        );
        RayResult::absorbed()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
