use crate::{
    math::{approx_eq::EPSILON, point::Point, vector::Vector},
    scene::object::Object,
};

use super::ray::Ray;

#[derive(Debug)]
pub struct Intersection<'a> {
    time: f64,
    object: &'a Object,
}

impl<'a> Intersection<'a> {
    pub fn new(time: f64, object: &'a Object) -> Self {
        Self { time, object }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn object(&self) -> &'a Object {
        self.object
    }

    pub fn computations(&self, ray: &Ray) -> IntersecComputations<'a> {
        IntersecComputations::new(self.time, self.object, ray)
    }
}

/// Shading-ready data derived from a single intersection.
#[derive(Debug)]
pub struct IntersecComputations<'a> {
    time: f64,
    object: &'a Object,
    point: Point,
    /// Hit point nudged along the normal, so shadow rays cast from it
    /// cannot re-intersect the surface they started on (shadow acne).
    over_point: Point,
    eye_v: Vector,
    normal_v: Vector,
    inside: bool,
}

impl<'a> IntersecComputations<'a> {
    pub fn new(time: f64, object: &'a Object, ray: &Ray) -> Self {
        let point = ray.position(time);
        let eye_v = -*ray.direction();
        let mut normal_v = object.normal_vector_at(point);

        let inside = normal_v.dot(eye_v) < 0.;
        if inside {
            normal_v = -normal_v;
        }

        let over_point = point + normal_v * EPSILON;

        Self {
            time,
            object,
            point,
            over_point,
            eye_v,
            normal_v,
            inside,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn object(&self) -> &'a Object {
        self.object
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn over_point(&self) -> Point {
        self.over_point
    }

    pub fn eye_v(&self) -> Vector {
        self.eye_v
    }

    pub fn normal_v(&self) -> Vector {
        self.normal_v
    }

    pub fn inside(&self) -> bool {
        self.inside
    }
}

/// Intersections of one ray with any number of objects, kept sorted by
/// time so the hit is always the first non-negative entry.
pub struct IntersectionCollection<'a> {
    ray: Ray,
    vec: Vec<Intersection<'a>>,
}

impl<'a> IntersectionCollection<'a> {
    pub fn new(ray: Ray, mut vec: Vec<Intersection<'a>>) -> Self {
        vec.sort_unstable_by(|i1, i2| i1.time().partial_cmp(&i2.time()).unwrap());
        Self { ray, vec }
    }

    pub fn from_ray_and_objects(ray: Ray, objects: &'a [Object]) -> Self {
        let intersections = objects
            .iter()
            .flat_map(|object| {
                object
                    .intersection_times(&ray)
                    .into_iter()
                    .map(|time| Intersection::new(time, object))
            })
            .collect();

        Self::new(ray, intersections)
    }

    pub fn from_times_and_obj(ray: Ray, times: Vec<f64>, object: &'a Object) -> Self {
        Self::new(
            ray,
            times
                .into_iter()
                .map(|time| Intersection::new(time, object))
                .collect(),
        )
    }

    /// Nearest intersection in front of the ray origin (time >= 0).
    pub fn hit(&self) -> Option<&Intersection<'a>> {
        self.vec.iter().find(|inter| inter.time() >= 0.)
    }

    pub fn hit_computations(&self) -> Option<IntersecComputations<'a>> {
        self.hit().map(|inter| inter.computations(&self.ray))
    }

    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    pub fn count(&self) -> usize {
        self.vec.len()
    }

    pub fn data(&self) -> &[Intersection<'a>] {
        &self.vec
    }

    pub fn times_vec(&self) -> Vec<f64> {
        self.vec.iter().map(|inter| inter.time()).collect()
    }
}
