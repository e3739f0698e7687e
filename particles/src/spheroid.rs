//! Spheroid

use core::error::{Error, Result};
use core::geometry::{coordinate_system, Interval, Point3f, Ray, Vector3f};
use core::mist::*;
use core::particle::Particle;
use core::rng::RNG;
use core::sampling::uniform_sample_sphere;

/// An ellipsoid of revolution centered at the origin of its own frame, with
/// an equatorial semi-axis `a` repeated around the polar axis and a polar
/// semi-axis `c`. A prolate spheroid has `c > a`, an oblate one `c < a`, and
/// `a == c` degenerates to a sphere.
///
/// The particle frame is immutable after construction; all queries take and
/// return world-space coordinates.
#[derive(Clone, Debug)]
pub struct Spheroid {
    /// Center of the spheroid in world space.
    center: Point3f,

    /// First basis vector of the particle frame, perpendicular to the axis.
    u: Vector3f,

    /// Second basis vector of the particle frame, perpendicular to the axis.
    v: Vector3f,

    /// Polar axis. Unit length.
    w: Vector3f,

    /// Equatorial semi-axis.
    a: Float,

    /// Polar semi-axis.
    c: Float,
}

impl Spheroid {
    /// Construct a spheroid from its frame and semi-axes.
    ///
    /// * `center` - The center in world space.
    /// * `axis`   - The polar axis. An arbitrary non-zero vector is
    ///              normalized.
    /// * `a`      - The equatorial semi-axis. Must be positive.
    /// * `c`      - The polar semi-axis. Must be positive.
    pub fn new(center: Point3f, axis: Vector3f, a: Float, c: Float) -> Result<Self> {
        if !(a > 0.0) || !(c > 0.0) {
            return Err(Error::config("spheroid semi-axes must be positive"));
        }
        if axis.has_nans() || axis.length_squared() == 0.0 {
            return Err(Error::config("spheroid axis must be a non-zero vector"));
        }
        let w = axis.normalize();
        let (u, v) = coordinate_system(&w);
        Ok(Self {
            center,
            u,
            v,
            w,
            a,
            c,
        })
    }

    /// Construct a sphere, the degenerate spheroid.
    ///
    /// * `center` - The center in world space.
    /// * `radius` - The radius. Must be positive.
    pub fn sphere(center: Point3f, radius: Float) -> Result<Self> {
        Self::new(center, Vector3f::z_axis(), radius, radius)
    }

    /// The equatorial semi-axis.
    pub fn equatorial_radius(&self) -> Float {
        self.a
    }

    /// The polar semi-axis.
    pub fn polar_radius(&self) -> Float {
        self.c
    }

    /// The polar axis in world space.
    pub fn axis(&self) -> &Vector3f {
        &self.w
    }

    /// Express a world-space point in the particle frame.
    fn point_to_local(&self, p: &Point3f) -> Vector3f {
        let d = *p - self.center;
        Vector3f::new(d.dot(&self.u), d.dot(&self.v), d.dot(&self.w))
    }

    /// Express a world-space direction in the particle frame.
    fn dir_to_local(&self, d: &Vector3f) -> Vector3f {
        Vector3f::new(d.dot(&self.u), d.dot(&self.v), d.dot(&self.w))
    }

    /// Map a particle-frame position back to world space.
    fn point_to_world(&self, p: &Vector3f) -> Point3f {
        self.center + self.u * p.x + self.v * p.y + self.w * p.z
    }

    /// Map a particle-frame direction back to world space.
    fn dir_to_world(&self, d: &Vector3f) -> Vector3f {
        self.u * d.x + self.v * d.y + self.w * d.z
    }

    /// The outward unit surface normal at a particle-frame surface position,
    /// in world space. This is the gradient of the implicit surface.
    fn normal_at(&self, p: &Vector3f) -> Vector3f {
        let n_local = Vector3f::new(
            p.x / (self.a * self.a),
            p.y / (self.a * self.a),
            p.z / (self.c * self.c),
        );
        self.dir_to_world(&n_local).normalize()
    }

    /// Intersect a world-space ray with the surface, returning both ray
    /// parameters in ascending order. The surface is scaled to the unit
    /// sphere; the parameterization survives the scaling, so the returned
    /// `t` values apply to the original ray.
    fn roots(&self, ray: &Ray) -> Option<(Float, Float)> {
        let o = self.point_to_local(&ray.o);
        let d = self.dir_to_local(&ray.d);

        let ox = o.x / self.a;
        let oy = o.y / self.a;
        let oz = o.z / self.c;
        let dx = d.x / self.a;
        let dy = d.y / self.a;
        let dz = d.z / self.c;

        let qa = dx * dx + dy * dy + dz * dz;
        let qb = 2.0 * (ox * dx + oy * dy + oz * dz);
        let qc = ox * ox + oy * oy + oz * oz - 1.0;
        Quadratic::solve(qa, qb, qc)
    }
}

impl Particle for Spheroid {
    /// The exit point is the farther of the two surface crossings, so a ray
    /// starting inside the particle (where the near root is negative) still
    /// resolves to the point where it leaves.
    fn exit_point(&self, ray: &Ray) -> Option<(Float, Point3f, Vector3f)> {
        let (_, t1) = self.roots(ray)?;
        if !(t1 > 0.0) || t1 > ray.t_max {
            return None;
        }
        let p_local = self.point_to_local(&ray.at(t1));
        let n = self.normal_at(&p_local);
        Some((t1, self.point_to_world(&p_local), n))
    }

    fn uniform_random_point(&self, dir: &Vector3f, rng: &mut RNG) -> (Point3f, Vector3f) {
        let h = uniform_sample_sphere(rng.uniform_float(), rng.uniform_float());

        // Radial scale putting `h` on the surface.
        let hx = h.x / self.a;
        let hy = h.y / self.a;
        let hz = h.z / self.c;
        let r = 1.0 / (hx * hx + hy * hy + hz * hz).sqrt();
        let mut p_local = h * r;

        // Flip to the hemisphere whose normal opposes the incoming direction.
        let mut n = self.normal_at(&p_local);
        if n.dot(dir) > 0.0 {
            p_local = -p_local;
            n = self.normal_at(&p_local);
        }
        (self.point_to_world(&p_local), n)
    }

    fn intersects(&self, ray: &Ray) -> bool {
        match self.roots(ray) {
            Some((t0, t1)) => (t0 > 0.0 && t0 <= ray.t_max) || (t1 > 0.0 && t1 <= ray.t_max),
            None => false,
        }
    }

    fn intersects_interval(&self, ray: &Ray, i: &Interval) -> bool {
        match self.roots(ray) {
            Some((t0, t1)) => {
                (t0 > 0.0 && i.contains(t0)) || (t1 > 0.0 && i.contains(t1))
            }
            None => false,
        }
    }

    fn diameter(&self) -> Float {
        2.0 * max(self.a, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn unit_sphere() -> Spheroid {
        Spheroid::sphere(Point3f::origin(), 1.0).unwrap()
    }

    #[test]
    fn degenerate_axes_are_rejected() {
        assert!(Spheroid::new(Point3f::origin(), Vector3f::z_axis(), 0.0, 1.0).is_err());
        assert!(Spheroid::new(Point3f::origin(), Vector3f::z_axis(), 1.0, -1.0).is_err());
        assert!(Spheroid::new(Point3f::origin(), Vector3f::zero(), 1.0, 1.0).is_err());
    }

    #[test]
    fn ray_through_sphere_center_exits_on_far_side() {
        let s = unit_sphere();
        let ray = Ray::new(Point3f::new(-2.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));
        let (t, p, n) = s.exit_point(&ray).unwrap();
        assert_approx_eq!(Float, t, 3.0, epsilon = 1e-9);
        assert_approx_eq!(Float, p.x, 1.0, epsilon = 1e-9);
        assert_approx_eq!(Float, n.x, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn ray_from_inside_finds_the_exit() {
        let s = unit_sphere();
        let ray = Ray::new(Point3f::origin(), Vector3f::new(0.0, 1.0, 0.0));
        let (t, p, _) = s.exit_point(&ray).unwrap();
        assert_approx_eq!(Float, t, 1.0, epsilon = 1e-9);
        assert_approx_eq!(Float, p.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn missing_ray_does_not_intersect() {
        let s = unit_sphere();
        let ray = Ray::new(Point3f::new(-2.0, 2.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));
        assert!(s.exit_point(&ray).is_none());
        assert!(!s.intersects(&ray));
    }

    #[test]
    fn ray_behind_the_particle_does_not_intersect() {
        let s = unit_sphere();
        let ray = Ray::new(Point3f::new(3.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));
        assert!(!s.intersects(&ray));
        assert!(s.exit_point(&ray).is_none());
    }

    #[test]
    fn interval_restricts_the_hit_range() {
        let s = unit_sphere();
        let ray = Ray::new(Point3f::new(-2.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));
        assert!(s.intersects_interval(&ray, &Interval::new(0.0, 1.5)));
        assert!(!s.intersects_interval(&ray, &Interval::new(1.5, 2.5)));
        assert!(s.intersects_interval(&ray, &Interval::new(2.5, 4.0)));
    }

    #[test]
    fn oblate_spheroid_is_squashed_along_its_axis() {
        let s = Spheroid::new(Point3f::origin(), Vector3f::z_axis(), 2.0, 0.5).unwrap();
        assert_approx_eq!(Float, s.diameter(), 4.0);

        let along_axis = Ray::new(Point3f::new(0.0, 0.0, -3.0), Vector3f::new(0.0, 0.0, 1.0));
        let (t, _, _) = s.exit_point(&along_axis).unwrap();
        assert_approx_eq!(Float, t, 3.5, epsilon = 1e-9);

        let across = Ray::new(Point3f::new(-3.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));
        let (t, _, _) = s.exit_point(&across).unwrap();
        assert_approx_eq!(Float, t, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn tilted_axis_rotates_the_geometry() {
        // Squashed along x instead of z.
        let s = Spheroid::new(
            Point3f::origin(),
            Vector3f::new(1.0, 0.0, 0.0),
            2.0,
            0.5,
        )
        .unwrap();
        let along_x = Ray::new(Point3f::new(-3.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));
        let (t, _, _) = s.exit_point(&along_x).unwrap();
        assert_approx_eq!(Float, t, 3.5, epsilon = 1e-9);
    }

    #[test]
    fn random_surface_points_lie_on_the_surface() {
        let s = Spheroid::new(
            Point3f::new(0.5, -0.25, 1.0),
            Vector3f::new(0.3, -0.2, 0.9),
            1.5,
            0.75,
        )
        .unwrap();
        let mut rng = RNG::new(41);

        for _ in 0..1_000 {
            let dx = 2.0 * rng.uniform_float() - 1.0;
            let dy = 2.0 * rng.uniform_float() - 1.0;
            let dir = Vector3f::new(dx, dy, -1.0).normalize();

            let (p, n) = s.uniform_random_point(&dir, &mut rng);
            assert!(n.dot(&dir) <= 0.0);

            // Implicit surface equation evaluates to one.
            let local = *s.axis();
            let d = p - Point3f::new(0.5, -0.25, 1.0);
            let z = d.dot(&local);
            let r2 = d.length_squared() - z * z;
            let f = r2 / (1.5 * 1.5) + z * z / (0.75 * 0.75);
            assert!((f - 1.0).abs() < 1e-9);
        }
    }
}
