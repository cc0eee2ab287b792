use crate::{
    math::{color::Color, point::Point},
    render::{
        camera::Camera,
        canvas::Canvas,
        intersection::{IntersecComputations, IntersectionCollection},
        ray::Ray,
    },
};

use super::{light::PointLightSource, object::Object};

/// Scene contents: shapes plus at most one point light. Mutated only
/// while the scene is being built; rendering reads it from many threads.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    objects: Vec<Object>,
    light_source: Option<PointLightSource>,
}

impl World {
    pub fn new(objects: Vec<Object>, light_source: Option<PointLightSource>) -> Self {
        Self {
            objects,
            light_source,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    pub fn add_object(&mut self, obj: Object) {
        self.objects.push(obj);
    }

    /// Sets the light. The world holds a single light; adding another
    /// replaces the previous one.
    pub fn add_light(&mut self, light_source: PointLightSource) {
        self.light_source = Some(light_source);
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn light_source(&self) -> Option<&PointLightSource> {
        self.light_source.as_ref()
    }

    /// All intersections of the ray with the scene, merged and sorted.
    pub fn intersect(&self, ray: Ray) -> IntersectionCollection<'_> {
        IntersectionCollection::from_ray_and_objects(ray, &self.objects)
    }

    /// Casts a ray from the point toward the light; the point is shadowed
    /// when anything is hit closer than the light. Without a light every
    /// point counts as shadowed.
    pub fn is_point_shadowed(&self, point: Point) -> bool {
        let Some(light_source) = &self.light_source else {
            return true;
        };

        let v = light_source.position() - point;

        let distance = v.magnitude();
        let direction = v.normalize();

        let ray = Ray::new(point, direction);
        match self.intersect(ray).hit() {
            None => false,
            Some(inter) => inter.time() < distance,
        }
    }

    /// Phong shading for a prepared hit. The shadow test and the pattern
    /// lookup both use the over point, not the raw hit point.
    pub fn shade_hit(&self, hit_comps: &IntersecComputations) -> Color {
        match &self.light_source {
            None => Color::black(),
            Some(light_source) => {
                let in_shadow = self.is_point_shadowed(hit_comps.over_point());
                light_source.color_of_illuminated_point(
                    hit_comps.object(),
                    hit_comps.over_point(),
                    hit_comps.eye_v(),
                    hit_comps.normal_v(),
                    in_shadow,
                )
            }
        }
    }

    pub fn color_at(&self, ray: Ray) -> Color {
        self.intersect(ray)
            .hit_computations()
            .map_or(Color::black(), |hit_comps| self.shade_hit(&hit_comps))
    }

    pub fn render(&self, camera: &Camera) -> Canvas {
        self.render_impl(camera, None)
    }

    pub fn render_with_progress(&self, camera: &Camera) -> Canvas {
        let style = indicatif::ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {wide_bar:.cyan/blue} pixels shaded: {human_pos}/{human_len} {percent}% ({eta})",
        )
        .unwrap();
        let pb = indicatif::ProgressBar::new(
            camera.target_width() as u64 * camera.target_height() as u64,
        )
        .with_style(style);

        self.render_impl(camera, Some(pb))
    }

    fn render_impl(&self, camera: &Camera, progressbar: Option<indicatif::ProgressBar>) -> Canvas {
        let mut image = camera.canvas();

        image.set_each_pixel(
            |x: usize, y: usize| self.color_at(camera.ray_for_pixel(x as f64, y as f64)),
            progressbar,
        );
        image
    }
}

impl Default for World {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
impl World {
    /// Two concentric spheres lit from the upper left; the scenario most
    /// shading tests are written against.
    pub fn default_testing() -> Self {
        use crate::{
            math::matrix::Matrix,
            scene::{material::Material, object::shape::Shape, pattern::Pattern},
        };
        use crate::math::tuple::Tuple;

        let sphere1 = Object::with_shape_material(
            Shape::Sphere,
            Material {
                pattern: Pattern::Const(Color::new(0.8, 1.0, 0.6)),
                diffuse: 0.7,
                specular: 0.2,
                ..Default::default()
            },
        );
        let sphere2 =
            Object::with_transformation(Shape::Sphere, Matrix::scaling_uniform(0.5)).unwrap();

        let light_source = PointLightSource::new(Point::new(-10., 10., -10.), Color::white());

        Self::new(vec![sphere1, sphere2], Some(light_source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assert_approx_eq_low_prec,
        math::{approx_eq::ApproxEq, matrix::Matrix, tuple::Tuple, vector::Vector},
        render::intersection::Intersection,
        scene::object::shape::Shape,
    };

    #[test]
    fn intersect_world_with_ray() {
        let world = World::default_testing();
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));

        let intersections = world.intersect(ray);
        assert_eq!(intersections.times_vec(), vec![4., 4.5, 5.5, 6.]);
    }

    #[test]
    fn shade_intersection() {
        let world = World::default_testing();
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));

        assert_approx_eq_low_prec!(world.color_at(ray), Color::new(0.38066, 0.47583, 0.2855));
    }

    #[test]
    fn shade_intersection_from_inside() {
        let mut world = World::default_testing();
        world.add_light(PointLightSource::new(
            Point::new(0., 0.25, 0.),
            Color::white(),
        ));

        let ray = Ray::new(Point::zero(), Vector::new(0., 0., 1.));

        assert_approx_eq_low_prec!(world.color_at(ray), Color::new(0.90498, 0.90498, 0.90498));
    }

    #[test]
    fn color_when_ray_misses() {
        let world = World::default_testing();
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 1., 0.));

        assert_approx_eq_low_prec!(world.color_at(ray), Color::black());
    }

    #[test]
    fn no_shadow_when_nothing_blocks_light() {
        let world = World::default_testing();

        assert!(!world.is_point_shadowed(Point::new(0., 10., 0.)));
    }

    #[test]
    fn shadow_when_object_is_between_point_and_light() {
        let world = World::default_testing();

        assert!(world.is_point_shadowed(Point::new(10., -10., 10.)));
    }

    #[test]
    fn no_shadow_when_object_is_behind_light() {
        let world = World::default_testing();

        assert!(!world.is_point_shadowed(Point::new(-20., 20., -20.)));
    }

    #[test]
    fn shade_hit_intersection_in_shadow() {
        let mut world = World::empty();
        world.add_light(PointLightSource::new(
            Point::new(0., 0., -10.),
            Color::white(),
        ));

        world.add_object(Object::with_shape(Shape::Sphere));
        world.add_object(
            Object::with_transformation(Shape::Sphere, Matrix::translation(0., 0., 10.)).unwrap(),
        );

        let ray = Ray::new(Point::new(0., 0., 5.), Vector::new(0., 0., 1.));
        let inter = Intersection::new(4., &world.objects[1]);
        let comps = inter.computations(&ray);

        assert_approx_eq_low_prec!(world.shade_hit(&comps), Color::new(0.1, 0.1, 0.1));
    }

    #[test]
    fn world_without_light_is_all_shadow() {
        let mut world = World::empty();
        world.add_object(Object::with_shape(Shape::Sphere));

        assert!(world.is_point_shadowed(Point::new(0., 10., 0.)));
    }

    #[test]
    fn world_without_light_renders_black() {
        let mut world = World::empty();
        world.add_object(Object::with_shape(Shape::Sphere));

        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));

        assert_approx_eq_low_prec!(world.color_at(ray), Color::black());
    }

    #[test]
    fn adding_a_light_replaces_the_previous_one() {
        let mut world = World::empty();
        world.add_light(PointLightSource::new(Point::zero(), Color::white()));
        world.add_light(PointLightSource::new(Point::new(1., 1., 1.), Color::red()));

        assert_eq!(
            world.light_source(),
            Some(&PointLightSource::new(Point::new(1., 1., 1.), Color::red()))
        );
    }
}
