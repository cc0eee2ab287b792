use derive_builder::Builder;

use crate::math::{
    matrix::{Matrix, NonInvertibleMatrixError},
    point::Point,
    tuple::Tuple,
    vector::Vector,
};

use super::{canvas::Canvas, ray::Ray};

// The camera looks toward -z from the origin of its own space, which puts
// +x on the left. Only the inverse of the camera transform is ever used,
// so that is what is stored.
#[derive(PartialEq, Debug, Clone)]
pub struct Camera {
    target_width: usize,
    target_height: usize,
    field_of_view: f64,
    inverse_transformation: Matrix,

    pixel_size: f64,
    half_width: f64,
    half_height: f64,
}

impl Camera {
    pub fn new(target_width: usize, target_height: usize, field_of_view: f64) -> Self {
        Self::with_inverse_transformation(
            target_width,
            target_height,
            field_of_view,
            Matrix::identity(),
        )
    }

    pub fn with_transformation(
        target_width: usize,
        target_height: usize,
        field_of_view: f64,
        transformation: Matrix,
    ) -> Result<Self, NonInvertibleMatrixError> {
        Ok(Self::with_inverse_transformation(
            target_width,
            target_height,
            field_of_view,
            transformation.inverse()?,
        ))
    }

    pub fn with_inverse_transformation(
        target_width: usize,
        target_height: usize,
        field_of_view: f64,
        inverse_transformation: Matrix,
    ) -> Self {
        assert!(target_height > 0);
        let half_view = (field_of_view / 2.).tan();
        let h_v_aspect = target_width as f64 / target_height as f64;

        let (half_width, half_height) = if h_v_aspect >= 1. {
            (half_view, half_view / h_v_aspect)
        } else {
            (half_view * h_v_aspect, half_view)
        };

        let pixel_size = 2. * half_width / target_width as f64;

        Self {
            target_width,
            target_height,
            field_of_view,
            inverse_transformation,

            pixel_size,
            half_width,
            half_height,
        }
    }

    /// World-space ray through the center of the given pixel. The pixel is
    /// projected onto the canvas plane at z = -1, then both it and the
    /// camera origin travel through the inverse transform.
    pub fn ray_for_pixel(&self, x: f64, y: f64) -> Ray {
        let x_offset_to_center = (x + 0.5) * self.pixel_size;
        let y_offset_to_center = (y + 0.5) * self.pixel_size;

        let world_x = self.half_width - x_offset_to_center;
        let world_y = self.half_height - y_offset_to_center;

        let pixel = self.inverse_transformation * Point::new(world_x, world_y, -1.);
        let origin = self.inverse_transformation * Point::zero();
        let direction = pixel - origin;

        Ray::new(origin, direction.normalize())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.target_width, self.target_height)
    }

    pub fn target_width(&self) -> usize {
        self.target_width
    }

    pub fn target_height(&self) -> usize {
        self.target_height
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn inverse_transformation(&self) -> Matrix {
        self.inverse_transformation
    }
}

/// Camera description as scene files provide it, with defaults for
/// anything left out. Built incrementally by the parser, then turned into
/// a camera in one step.
#[derive(PartialEq, Debug, Clone, Builder)]
#[builder(default)]
pub struct CameraConfig {
    pub width: usize,
    pub height: usize,
    pub field_of_view: f64,
    pub from: Point,
    pub to: Point,
    pub up: Vector,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            field_of_view: std::f64::consts::FRAC_PI_3,
            from: Point::new(0., 1.5, -5.),
            to: Point::new(0., 1., 0.),
            up: Vector::new(0., 1., 0.),
        }
    }
}

impl CameraConfig {
    pub fn build_camera(&self) -> Result<Camera, NonInvertibleMatrixError> {
        Camera::with_transformation(
            self.width,
            self.height,
            self.field_of_view,
            Matrix::view_transformation(self.from, self.to, self.up),
        )
    }
}
