use crate::math::{color::Color, point::Point, vector::Vector};

use super::object::Object;

#[derive(Clone, Debug, PartialEq)]
pub struct PointLightSource {
    position: Point,
    intensity: Color,
}

impl Default for PointLightSource {
    fn default() -> Self {
        Self {
            position: Point::zero(),
            intensity: Color::white(),
        }
    }
}

impl PointLightSource {
    pub fn new(position: Point, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Color of an illuminated point using the Phong reflection model.
    /// A shadowed point keeps only the ambient term.
    pub fn color_of_illuminated_point(
        &self,
        object: &Object,
        point: Point,
        eye_v: Vector,
        normal_v: Vector,
        in_shadow: bool,
    ) -> Color {
        let material = object.material();
        // combine surface color with the light's intensity (color)
        let effective_color = material.color_at_object(object, point) * self.intensity;

        let ambient = effective_color * material.ambient;

        if in_shadow {
            return ambient;
        }

        // direction to the light source
        let light_v = (self.position - point).normalize();

        let light_dot_normal = light_v.dot(normal_v);

        // if cosine between light and normal vectors is negative, light is
        // on the other side of the surface
        if light_dot_normal < 0. {
            return ambient;
        }
        let diffuse = effective_color * material.diffuse * light_dot_normal;

        let reflect_v = (-light_v).reflect(normal_v);
        let reflect_dot_eye = reflect_v.dot(eye_v);

        // if cosine between reflect and eye vectors is not positive, light
        // reflects away from the eye
        let specular = if reflect_dot_eye <= 0. {
            Color::black()
        } else {
            let factor = reflect_dot_eye.powf(material.shininess);
            self.intensity * material.specular * factor
        };

        ambient + diffuse + specular
    }
}
