use crate::{
    math::{approx_eq::ApproxEq, tuple::Tuple, vector::Vector},
    render::ray::Ray,
};

/// Plane extending in x and z, at y = 0.
pub struct PlaneXZ {}

impl PlaneXZ {
    pub fn local_normal_at() -> Vector {
        Vector::new(0., 1., 0.)
    }

    /// A ray parallel to the plane never hits; a coplanar ray would hit
    /// infinitely often, so both count as a miss.
    pub fn local_intersect(object_ray: &Ray) -> Vec<f64> {
        if object_ray.direction().y().approx_eq(&0.) {
            return Vec::new();
        }
        vec![-object_ray.origin().y() / object_ray.direction().y()]
    }
}
