use crate::{
    math::{point::Point, vector::Vector},
    render::ray::Ray,
};

use super::{plane::PlaneXZ, sphere::UnitSphere};

/// Closed set of primitives. Both operations work in object space; the
/// owning `Object` handles the world-space conversions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Unit sphere at the origin
    Sphere,
    /// Plane extending in x and z directions, at y = 0
    Plane,
}

impl Shape {
    pub fn local_normal_at(&self, object_point: Point) -> Vector {
        match self {
            Shape::Sphere => UnitSphere::local_normal_at(object_point),
            Shape::Plane => PlaneXZ::local_normal_at(),
        }
    }

    pub fn local_intersect(&self, object_ray: &Ray) -> Vec<f64> {
        match self {
            Shape::Sphere => UnitSphere::local_intersect(object_ray),
            Shape::Plane => PlaneXZ::local_intersect(object_ray),
        }
    }
}
