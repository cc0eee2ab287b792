/// Common interface of the homogeneous 4-component tuples.
/// The w component distinguishes points (w = 1) from vectors (w = 0),
/// so a single matrix multiply handles both.
pub trait Tuple {
    fn new(x: f64, y: f64, z: f64) -> Self;

    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn z(&self) -> f64;
    fn w(&self) -> f64;
}
