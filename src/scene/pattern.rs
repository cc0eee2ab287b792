use crate::math::{
    approx_eq::ApproxEq,
    color::Color,
    matrix::{Matrix, NonInvertibleMatrixError},
    noise::PerlinNoise,
    point::Point,
    tuple::Tuple,
};

use super::object::Object;

/// Patterns color points in their own local space and may nest: the
/// combinator variants own children and hand them the parent-local point,
/// which each child converts through its own inverse transform. A pattern
/// never reaches into the shape it is applied to; `color_at_object` does
/// the world -> object conversion up front.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    Const(Color),
    /// Stripes alternating as x changes, closed on the left
    Stripe {
        c1: Color,
        c2: Color,
        inv_transform: Matrix,
    },
    /// Linear gradient in the x direction
    Gradient {
        c_start: Color,
        c_dist: Color,
        inv_transform: Matrix,
    },
    /// Concentric rings extending in x and z
    Ring {
        c1: Color,
        c2: Color,
        inv_transform: Matrix,
    },
    /// 3D checkerboard
    Checkers {
        c1: Color,
        c2: Color,
        inv_transform: Matrix,
    },
    /// Gradient keyed on the distance from the y axis, with a tunable
    /// y contribution (y_weight = 0 stays radial in the xz plane)
    RadialGradient {
        c_start: Color,
        c_dist: Color,
        y_weight: f64,
        inv_transform: Matrix,
    },
    /// Average of two child patterns sampled at the same point
    Blended {
        a: Box<Pattern>,
        b: Box<Pattern>,
        inv_transform: Matrix,
    },
    /// Child pattern sampled at a noise-displaced point
    Perturbed {
        pattern: Box<Pattern>,
        amplitude: f64,
        octaves: u32,
        persistence: f64,
        inv_transform: Matrix,
    },
}

fn inverse_of(transform: Option<Matrix>) -> Result<Matrix, NonInvertibleMatrixError> {
    transform.unwrap_or_default().inverse()
}

impl Pattern {
    pub fn stripe(
        c1: Color,
        c2: Color,
        transform: Option<Matrix>,
    ) -> Result<Self, NonInvertibleMatrixError> {
        Ok(Self::Stripe {
            c1,
            c2,
            inv_transform: inverse_of(transform)?,
        })
    }

    pub fn gradient(
        c1: Color,
        c2: Color,
        transform: Option<Matrix>,
    ) -> Result<Self, NonInvertibleMatrixError> {
        Ok(Self::Gradient {
            c_start: c1,
            c_dist: c2 - c1,
            inv_transform: inverse_of(transform)?,
        })
    }

    pub fn ring(
        c1: Color,
        c2: Color,
        transform: Option<Matrix>,
    ) -> Result<Self, NonInvertibleMatrixError> {
        Ok(Self::Ring {
            c1,
            c2,
            inv_transform: inverse_of(transform)?,
        })
    }

    pub fn checkers(
        c1: Color,
        c2: Color,
        transform: Option<Matrix>,
    ) -> Result<Self, NonInvertibleMatrixError> {
        Ok(Self::Checkers {
            c1,
            c2,
            inv_transform: inverse_of(transform)?,
        })
    }

    pub fn radial_gradient(
        c1: Color,
        c2: Color,
        y_weight: f64,
        transform: Option<Matrix>,
    ) -> Result<Self, NonInvertibleMatrixError> {
        Ok(Self::RadialGradient {
            c_start: c1,
            c_dist: c2 - c1,
            y_weight,
            inv_transform: inverse_of(transform)?,
        })
    }

    pub fn blended(
        a: Pattern,
        b: Pattern,
        transform: Option<Matrix>,
    ) -> Result<Self, NonInvertibleMatrixError> {
        Ok(Self::Blended {
            a: Box::new(a),
            b: Box::new(b),
            inv_transform: inverse_of(transform)?,
        })
    }

    pub fn perturbed(
        pattern: Pattern,
        amplitude: f64,
        octaves: u32,
        persistence: f64,
        transform: Option<Matrix>,
    ) -> Result<Self, NonInvertibleMatrixError> {
        Ok(Self::Perturbed {
            pattern: Box::new(pattern),
            amplitude,
            octaves,
            persistence,
            inv_transform: inverse_of(transform)?,
        })
    }

    /// Color at a point given in the space of whatever owns this pattern
    /// (the object for a top-level pattern, the parent pattern otherwise).
    pub fn color_at(&self, point: &Point) -> Color {
        match self {
            Self::Const(c) => *c,

            Self::Stripe {
                c1,
                c2,
                inv_transform,
            } => {
                let p = *inv_transform * *point;
                if (p.x().floor() % 2.).approx_eq(&0.) {
                    *c1
                } else {
                    *c2
                }
            }

            Self::Gradient {
                c_start,
                c_dist,
                inv_transform,
            } => {
                let p = *inv_transform * *point;
                *c_start + *c_dist * (p.x() - p.x().floor())
            }

            Self::Ring {
                c1,
                c2,
                inv_transform,
            } => {
                let p = *inv_transform * *point;
                let val = (p.x().powi(2) + p.z().powi(2)).sqrt().floor();
                if (val % 2.).approx_eq(&0.) { *c1 } else { *c2 }
            }

            Self::Checkers {
                c1,
                c2,
                inv_transform,
            } => {
                let p = *inv_transform * *point;
                let sum = p.x().floor() + p.y().floor() + p.z().floor();
                if (sum % 2.).approx_eq(&0.) { *c1 } else { *c2 }
            }

            Self::RadialGradient {
                c_start,
                c_dist,
                y_weight,
                inv_transform,
            } => {
                let p = *inv_transform * *point;
                let radius =
                    (p.x().powi(2) + y_weight * p.y().powi(2) + p.z().powi(2)).sqrt();
                *c_start + *c_dist * (radius - radius.floor())
            }

            Self::Blended {
                a,
                b,
                inv_transform,
            } => {
                let p = *inv_transform * *point;
                (a.color_at(&p) + b.color_at(&p)) / 2.
            }

            Self::Perturbed {
                pattern,
                amplitude,
                octaves,
                persistence,
                inv_transform,
            } => {
                let p = *inv_transform * *point;
                // Three decorrelated octave samples form the displacement
                // vector; noise is centered so the point can move both ways.
                let displace = |z_offset: f64| {
                    let n = PerlinNoise::octave_noise(
                        p.x(),
                        p.y(),
                        p.z() + z_offset,
                        *octaves,
                        *persistence,
                    );
                    (n - 0.5) * *amplitude
                };
                let jittered = Point::new(
                    p.x() + displace(0.),
                    p.y() + displace(1.),
                    p.z() + displace(2.),
                );
                pattern.color_at(&jittered)
            }
        }
    }

    /// Color the given object shows at a world-space point: the point
    /// travels through `inverse(object) `, then each pattern level applies
    /// its own inverse on the way down.
    pub fn color_at_object(&self, object: &Object, world_point: Point) -> Color {
        let object_point = *object.transformation_inverse() * world_point;
        self.color_at(&object_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_approx_eq_low_prec, scene::object::shape::Shape};

    fn stripe_wb() -> Pattern {
        Pattern::stripe(Color::white(), Color::black(), None).unwrap()
    }

    #[test]
    fn stripe_pattern_const_in_y_and_z() {
        let stripe = stripe_wb();

        assert_approx_eq_low_prec!(stripe.color_at(&Point::new(0., 0., 0.)), Color::white());
        assert_approx_eq_low_prec!(stripe.color_at(&Point::new(0., 1., 0.)), Color::white());
        assert_approx_eq_low_prec!(stripe.color_at(&Point::new(0., 2., 0.)), Color::white());
        assert_approx_eq_low_prec!(stripe.color_at(&Point::new(0., 0., 1.)), Color::white());
        assert_approx_eq_low_prec!(stripe.color_at(&Point::new(0., 0., 2.)), Color::white());
    }

    #[test]
    fn stripe_pattern_alternates_in_x() {
        let stripe = stripe_wb();

        assert_approx_eq_low_prec!(stripe.color_at(&Point::new(0., 0., 0.)), Color::white());
        assert_approx_eq_low_prec!(stripe.color_at(&Point::new(0.9, 0., 0.)), Color::white());
        assert_approx_eq_low_prec!(stripe.color_at(&Point::new(1., 0., 0.)), Color::black());
        assert_approx_eq_low_prec!(stripe.color_at(&Point::new(-0.1, 0., 0.)), Color::black());
        assert_approx_eq_low_prec!(stripe.color_at(&Point::new(-1., 0., 0.)), Color::black());
        assert_approx_eq_low_prec!(stripe.color_at(&Point::new(-1.1, 0., 0.)), Color::white());
    }

    #[test]
    fn stripes_with_object_transformation() {
        let sphere =
            Object::with_transformation(Shape::Sphere, Matrix::scaling_uniform(2.)).unwrap();
        let stripe = stripe_wb();

        assert_approx_eq_low_prec!(
            stripe.color_at_object(&sphere, Point::new(1.5, 0., 0.)),
            Color::white()
        );
    }

    #[test]
    fn stripes_with_pattern_transformation() {
        let sphere = Object::with_shape(Shape::Sphere);
        let stripe = Pattern::stripe(
            Color::white(),
            Color::black(),
            Some(Matrix::scaling_uniform(2.)),
        )
        .unwrap();

        assert_approx_eq_low_prec!(
            stripe.color_at_object(&sphere, Point::new(1.5, 0., 0.)),
            Color::white()
        );
    }

    #[test]
    fn stripes_with_object_and_pattern_transformation() {
        let sphere =
            Object::with_transformation(Shape::Sphere, Matrix::scaling_uniform(2.)).unwrap();
        let stripe = Pattern::stripe(
            Color::white(),
            Color::black(),
            Some(Matrix::translation(0.5, 0., 0.)),
        )
        .unwrap();

        assert_approx_eq_low_prec!(
            stripe.color_at_object(&sphere, Point::new(2.5, 0., 0.)),
            Color::white()
        );
    }

    #[test]
    fn singular_pattern_transform_is_rejected() {
        assert!(
            Pattern::stripe(
                Color::white(),
                Color::black(),
                Some(Matrix::scaling(0., 1., 1.)),
            )
            .is_err()
        );
    }

    #[test]
    fn gradient_linearly_interpolates_between_colors() {
        let gradient = Pattern::gradient(Color::white(), Color::black(), None).unwrap();

        assert_approx_eq_low_prec!(gradient.color_at(&Point::new(0., 0., 0.)), Color::white());
        assert_approx_eq_low_prec!(
            gradient.color_at(&Point::new(0.25, 0., 0.)),
            Color::new(0.75, 0.75, 0.75)
        );
        assert_approx_eq_low_prec!(
            gradient.color_at(&Point::new(0.5, 0., 0.)),
            Color::new(0.5, 0.5, 0.5)
        );
        assert_approx_eq_low_prec!(
            gradient.color_at(&Point::new(0.75, 0., 0.)),
            Color::new(0.25, 0.25, 0.25)
        );
    }

    #[test]
    fn ring_extends_in_both_x_and_z() {
        let ring = Pattern::ring(Color::white(), Color::black(), None).unwrap();

        assert_approx_eq_low_prec!(ring.color_at(&Point::new(0., 0., 0.)), Color::white());
        assert_approx_eq_low_prec!(ring.color_at(&Point::new(1., 0., 0.)), Color::black());
        assert_approx_eq_low_prec!(ring.color_at(&Point::new(0., 0., 1.)), Color::black());
        assert_approx_eq_low_prec!(ring.color_at(&Point::new(0.708, 0., 0.708)), Color::black());
    }

    #[test]
    fn checkers_repeat_in_every_dimension() {
        let checkers = Pattern::checkers(Color::white(), Color::black(), None).unwrap();

        assert_approx_eq_low_prec!(checkers.color_at(&Point::new(0., 0., 0.)), Color::white());
        assert_approx_eq_low_prec!(checkers.color_at(&Point::new(0.99, 0., 0.)), Color::white());
        assert_approx_eq_low_prec!(checkers.color_at(&Point::new(1.01, 0., 0.)), Color::black());
        assert_approx_eq_low_prec!(checkers.color_at(&Point::new(0., 0.99, 0.)), Color::white());
        assert_approx_eq_low_prec!(checkers.color_at(&Point::new(0., 1.01, 0.)), Color::black());
        assert_approx_eq_low_prec!(checkers.color_at(&Point::new(0., 0., 0.99)), Color::white());
        assert_approx_eq_low_prec!(checkers.color_at(&Point::new(0., 0., 1.01)), Color::black());
    }

    #[test]
    fn radial_gradient_interpolates_with_distance() {
        let radial =
            Pattern::radial_gradient(Color::white(), Color::black(), 0., None).unwrap();

        assert_approx_eq_low_prec!(radial.color_at(&Point::new(0., 0., 0.)), Color::white());
        assert_approx_eq_low_prec!(
            radial.color_at(&Point::new(0.25, 0., 0.)),
            Color::new(0.75, 0.75, 0.75)
        );
        assert_approx_eq_low_prec!(
            radial.color_at(&Point::new(0., 0., 0.5)),
            Color::new(0.5, 0.5, 0.5)
        );
    }

    #[test]
    fn radial_gradient_y_weight() {
        let flat = Pattern::radial_gradient(Color::white(), Color::black(), 0., None).unwrap();
        let spherical =
            Pattern::radial_gradient(Color::white(), Color::black(), 1., None).unwrap();

        // y does not contribute with zero weight
        assert_approx_eq_low_prec!(flat.color_at(&Point::new(0., 5., 0.)), Color::white());
        // with full weight the key is the euclidean distance
        assert_approx_eq_low_prec!(
            spherical.color_at(&Point::new(0., 0.5, 0.)),
            Color::new(0.5, 0.5, 0.5)
        );
    }

    #[test]
    fn blended_averages_both_children() {
        let blended = Pattern::blended(
            stripe_wb(),
            Pattern::stripe(
                Color::white(),
                Color::black(),
                Some(Matrix::translation(1., 0., 0.)),
            )
            .unwrap(),
            None,
        )
        .unwrap();

        // first stripe sees x = 0.5 (white), second sees x = -0.5 (black)
        assert_approx_eq_low_prec!(
            blended.color_at(&Point::new(0.5, 0., 0.)),
            Color::new(0.5, 0.5, 0.5)
        );
    }

    #[test]
    fn blended_children_nest_transform_chains() {
        let scaled_stripe = Pattern::stripe(
            Color::white(),
            Color::black(),
            Some(Matrix::scaling_uniform(2.)),
        )
        .unwrap();
        let blended =
            Pattern::blended(scaled_stripe.clone(), scaled_stripe, None).unwrap();
        let sphere = Object::with_shape(Shape::Sphere);

        assert_approx_eq_low_prec!(
            blended.color_at_object(&sphere, Point::new(1.5, 0., 0.)),
            Color::white()
        );
    }

    #[test]
    fn perturbed_is_deterministic() {
        let perturbed = Pattern::perturbed(stripe_wb(), 0.4, 3, 0.9, None).unwrap();
        let point = Point::new(1.3, 0.5, -2.1);

        assert_eq!(perturbed.color_at(&point), perturbed.color_at(&point));
    }

    #[test]
    fn perturbed_with_zero_amplitude_matches_child() {
        let child = stripe_wb();
        let perturbed = Pattern::perturbed(child.clone(), 0., 3, 0.9, None).unwrap();

        for x in [-1.6, -0.3, 0.1, 0.9, 1.4, 2.7] {
            let point = Point::new(x, 0., 0.);
            assert_approx_eq_low_prec!(perturbed.color_at(&point), child.color_at(&point));
        }
    }

    #[test]
    fn perturbed_const_is_const() {
        let perturbed =
            Pattern::perturbed(Pattern::Const(Color::red()), 2., 4, 0.9, None).unwrap();

        assert_approx_eq_low_prec!(perturbed.color_at(&Point::new(0.7, 1.9, -4.2)), Color::red());
    }
}
