//! Common sampling patterns.
//!
//! All functions map independent uniform values in [0, 1) to a point on a
//! geometric domain. None of them keep any state.

use crate::geometry::*;
use crate::pbrt::*;

/// Uniformly sample a point on the unit disk using a polar mapping.
///
/// * `u` - The random sample point.
pub fn sample_disk(u: &Point2f) -> Point2f {
    let omega = u[1] * TWO_PI;
    safe_sqrt(u[0]) * Point2f::new(cos(omega), sin(omega))
}

/// Sample a direction on the hemisphere around `(0, 0, 1)` with `cos θ = u[0]`.
///
/// * `u` - The random sample point.
pub fn sample_hemisphere(u: &Point2f) -> Vector3f {
    let omega = u[1] * TWO_PI;
    let cos_theta = u[0];
    let sin_theta = safe_sqrt(1.0 - square(cos_theta));
    Vector3f::new(sin_theta * cos(omega), sin_theta * sin(omega), cos_theta)
}

/// Uniformly sample a direction on the unit sphere.
///
/// * `u` - The random sample point.
pub fn sample_sphere(u: &Point2f) -> Vector3f {
    let omega = u[1] * TWO_PI;
    let cos_theta = u[0] * 2.0 - 1.0;
    let sin_theta = safe_sqrt(1.0 - square(cos_theta));
    Vector3f::new(sin_theta * cos(omega), sin_theta * sin(omega), cos_theta)
}

/// Sample a point inside the unit ball. The direction is uniform on the sphere
/// and the radius is the 4th root of `u[2]`, which concentrates samples
/// towards the boundary less than a cube root would.
///
/// * `u` - The random sample point.
pub fn sample_ball(u: &Vector3f) -> Vector3f {
    let direction = sample_sphere(&Point2f::new(u[0], u[1]));
    direction * safe_sqrt(safe_sqrt(u[2]))
}

/// Sample a point on the unit disk along a Fibonacci (golden angle) spiral
/// with a random overall rotation.
///
/// * `u` - The random sample point. `u[0]` selects the position along the
///         spiral and `u[1]` the rotation.
pub fn sample_spiral(u: &Point2f) -> Point2f {
    let mut omega = FOUR_PI * (1.0 + Float::sqrt(5.0)) * u[0];
    let r = safe_sqrt(u[0]);
    omega += u[1] * TWO_PI;
    r * Point2f::new(cos(omega), sin(omega))
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    prop_point2!(unit_point2, f32, 0.0..1.0f32, 0.0..1.0f32);
    prop_vector3!(unit_vector3, f32, 0.0..1.0f32, 0.0..1.0f32, 0.0..1.0f32);

    #[test]
    fn disk_origin() {
        assert_eq!(sample_disk(&Point2f::zero()), Point2f::zero());
    }

    #[test]
    fn hemisphere_pole() {
        let v = sample_hemisphere(&Point2f::new(1.0, 0.0));
        assert!(approx_eq!(f32, v.z, 1.0));
        assert!(approx_eq!(f32, v.x, 0.0));
    }

    #[test]
    fn sphere_poles() {
        assert!(approx_eq!(f32, sample_sphere(&Point2f::new(0.0, 0.3)).z, -1.0));
        assert!(approx_eq!(f32, sample_sphere(&Point2f::new(ONE_MINUS_EPSILON, 0.3)).z, 1.0, epsilon = 1e-6));
    }

    #[test]
    fn ball_centre() {
        assert_eq!(sample_ball(&Vector3f::new(0.5, 0.5, 0.0)).length(), 0.0);
    }

    proptest! {
        #[test]
        fn disk_inside(u in unit_point2()) {
            let p = sample_disk(&u);
            prop_assert!(!p.has_nans());
            prop_assert!(p.length() <= 1.0 + 1e-6);
        }

        #[test]
        fn hemisphere_unit_length(u in unit_point2()) {
            let v = sample_hemisphere(&u);
            prop_assert!(v.z >= 0.0);
            prop_assert!(approx_eq!(f32, v.length(), 1.0, epsilon = 1e-5));
        }

        #[test]
        fn sphere_unit_length(u in unit_point2()) {
            let v = sample_sphere(&u);
            prop_assert!(!v.has_nans());
            prop_assert!(approx_eq!(f32, v.length(), 1.0, epsilon = 1e-5));
        }

        #[test]
        fn ball_inside(u in unit_vector3()) {
            let v = sample_ball(&u);
            prop_assert!(!v.has_nans());
            prop_assert!(v.length() <= 1.0 + 1e-5);
        }

        #[test]
        fn spiral_inside(u in unit_point2()) {
            let p = sample_spiral(&u);
            prop_assert!(!p.has_nans());
            prop_assert!(approx_eq!(f32, p.length(), u.x.sqrt(), epsilon = 1e-5));
        }
    }
}
