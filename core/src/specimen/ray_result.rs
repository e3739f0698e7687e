//! Ray results.

use crate::geometry::Ray;
use bitflags::bitflags;

/// Specifies whether a ray was reflected, transmitted, or absorbed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interaction {
    /// The ray was reflected.
    Reflected,

    /// The ray was transmitted.
    Transmitted,

    /// The ray was absorbed.
    Absorbed,
}

bitflags! {
    /// Flags for the various aspects that affect a ray.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct RayFlags: u32 {
        /// Mirror reflection off the material surface.
        const MIRROR = 0x001;
    }
}

/// Describes what happened to a ray while interacting with a specimen.
/// Immutable; produced exactly once per photon path.
#[derive(Clone, Debug, PartialEq)]
pub struct RayResult {
    interaction: Interaction,
    flags: RayFlags,
    exit_ray: Option<Ray>,
}

impl RayResult {
    /// Construct a reflected result.
    ///
    /// * `exit_ray` - The ray leaving the specimen on the incident side.
    pub fn reflected(exit_ray: Ray) -> Self {
        Self {
            interaction: Interaction::Reflected,
            flags: RayFlags::empty(),
            exit_ray: Some(exit_ray),
        }
    }

    /// Construct a transmitted result.
    ///
    /// * `exit_ray` - The ray leaving the specimen on the far side.
    pub fn transmitted(exit_ray: Ray) -> Self {
        Self {
            interaction: Interaction::Transmitted,
            flags: RayFlags::empty(),
            exit_ray: Some(exit_ray),
        }
    }

    /// Construct an absorbed result. There is no exit ray.
    pub fn absorbed() -> Self {
        Self {
            interaction: Interaction::Absorbed,
            flags: RayFlags::empty(),
            exit_ray: None,
        }
    }

    /// Attach flags to the result.
    ///
    /// * `flags` - The flags to set.
    pub fn with_flags(mut self, flags: RayFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// The terminal interaction.
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// The ray leaving the specimen, if it left at all.
    pub fn exit_ray(&self) -> Option<&Ray> {
        self.exit_ray.as_ref()
    }

    /// Test if this was a mirror reflection off the material surface instead
    /// of subsurface scattering.
    pub fn is_mirror(&self) -> bool {
        self.flags.contains(RayFlags::MIRROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point3f, Vector3f};

    #[test]
    fn absorbed_has_no_exit_ray() {
        let r = RayResult::absorbed();
        assert_eq!(r.interaction(), Interaction::Absorbed);
        assert!(r.exit_ray().is_none());
        assert!(!r.is_mirror());
    }

    #[test]
    fn mirror_flag_is_reported() {
        let ray = Ray::new(Point3f::origin(), Vector3f::z_axis());
        let r = RayResult::reflected(ray).with_flags(RayFlags::MIRROR);
        assert_eq!(r.interaction(), Interaction::Reflected);
        assert!(r.is_mirror());
    }
}
