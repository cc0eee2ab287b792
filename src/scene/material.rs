use crate::math::{color::Color, point::Point};

use super::{object::Object, pattern::Pattern};

/// Phong material. The surface color always comes from the pattern;
/// a solid base color is just `Pattern::Const`.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub pattern: Pattern,
    pub ambient: f64,   // [0;1]
    pub diffuse: f64,   // [0;1]
    pub specular: f64,  // [0;1]
    pub shininess: f64, // [10;+inf) (typically up to 200.0)
}

impl Material {
    pub fn with_pattern(pattern: Pattern) -> Self {
        Self {
            pattern,
            ..Default::default()
        }
    }

    pub fn with_color(color: Color) -> Self {
        Self::with_pattern(Pattern::Const(color))
    }

    pub fn matte_with_color(color: Color) -> Self {
        Self {
            pattern: Pattern::Const(color),
            specular: 0.05,
            shininess: 15.,
            ..Default::default()
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn color_at(&self, point: &Point) -> Color {
        self.pattern.color_at(point)
    }

    pub fn color_at_object(&self, object: &Object, world_point: Point) -> Color {
        self.pattern.color_at_object(object, world_point)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            pattern: Pattern::Const(Color::white()),
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.,
        }
    }
}
