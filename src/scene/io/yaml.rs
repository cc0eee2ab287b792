use std::fmt::Display;

use saphyr::Yaml;

use crate::{
    math::{
        color::Color,
        matrix::{Matrix, NonInvertibleMatrixError, Transform},
        point::Point,
        tuple::Tuple,
        vector::Vector,
    },
    render::camera::{Camera, CameraConfigBuilder},
    scene::{
        light::PointLightSource,
        material::Material,
        object::{Object, shape::Shape},
        pattern::Pattern,
        world::World,
    },
};

/// Scene files are a YAML list of `add` entries:
///
/// ```yaml
/// - add: camera
///   width: 800
///   height: 600
///   fov: 1.047
///   from: [ 0, 1.5, -5 ]
///   to: [ 0, 1, 0 ]
///   up: [ 0, 1, 0 ]
/// - add: light
///   at: [ -10, 10, -10 ]
///   intensity: [ 1, 1, 1 ]
/// - add: sphere
///   transform:
///     - [ scale, 0.5, 0.5, 0.5 ]
///     - [ translate, 0, 1, 0 ]
///   material:
///     color: [ 0.1, 1, 0.5 ]
///     diffuse: 0.7
/// - add: plane
///   material:
///     pattern:
///       type: checkers
///       colors:
///         - [ 1, 1, 1 ]
///         - [ 0, 0, 0 ]
/// ```
///
/// Transform steps apply in the order written.
#[derive(Debug, PartialEq)]
pub enum SceneParseError {
    MissingField(&'static str),
    InvalidField(&'static str),
    UnknownVariant(String),
    YamlSyntaxError(String),
    MultipleDocuments,
    NonInvertibleTransform,
    InternalError,
}

impl Display for SceneParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing field `{field}`"),
            Self::InvalidField(field) => write!(f, "invalid value for field `{field}`"),
            Self::UnknownVariant(what) => write!(f, "unknown entry `{what}`"),
            Self::YamlSyntaxError(source) => write!(f, "invalid yaml: `{source}`"),
            Self::MultipleDocuments => write!(f, "scene files must hold a single yaml document"),
            Self::NonInvertibleTransform => {
                write!(f, "a transform in the scene is not invertible")
            }
            Self::InternalError => write!(f, "internal parser error"),
        }
    }
}

impl From<NonInvertibleMatrixError> for SceneParseError {
    fn from(_: NonInvertibleMatrixError) -> Self {
        Self::NonInvertibleTransform
    }
}

type ParseResult<T> = Result<T, SceneParseError>;

/// Parses a scene source. The width, height and fov arguments seed the
/// camera so command-line options can fill anything the file leaves out.
pub fn parse_str(
    source: &str,
    default_width: usize,
    default_height: usize,
    default_fov: f64,
) -> ParseResult<(World, Camera)> {
    let yaml = str_to_yaml(source)?;

    let mut parser = SceneParser::new(default_width, default_height, default_fov);
    parser.parse(&yaml)?;
    parser.into_world_and_camera()
}

fn str_to_yaml(source: &str) -> ParseResult<Yaml> {
    let mut docs = Yaml::load_from_str(source)
        .map_err(|_| SceneParseError::YamlSyntaxError(source.to_string()))?;
    match docs.len() {
        1 => Ok(std::mem::replace(&mut docs[0], Yaml::BadValue)),
        0 => Ok(Yaml::Array(vec![])),
        _ => Err(SceneParseError::MultipleDocuments),
    }
}

struct SceneParser {
    world: World,
    camera_builder: CameraConfigBuilder,
}

impl SceneParser {
    fn new(default_width: usize, default_height: usize, default_fov: f64) -> Self {
        let mut camera_builder = CameraConfigBuilder::default();
        camera_builder
            .width(default_width)
            .height(default_height)
            .field_of_view(default_fov);

        Self {
            world: World::empty(),
            camera_builder,
        }
    }

    fn parse(&mut self, yaml: &Yaml) -> ParseResult<()> {
        for entry in yaml.as_vec().unwrap_or(&Vec::new()) {
            self.parse_entry(entry)?;
        }
        Ok(())
    }

    fn into_world_and_camera(self) -> ParseResult<(World, Camera)> {
        let camera = self
            .camera_builder
            .build()
            .map_err(|_| SceneParseError::InternalError)?
            .build_camera()?;
        Ok((self.world, camera))
    }

    fn parse_entry(&mut self, entry: &Yaml) -> ParseResult<()> {
        let kind = entry["add"]
            .as_str()
            .ok_or(SceneParseError::MissingField("add"))?;

        match kind {
            "camera" => self.parse_camera(entry),
            "light" => self.parse_light(entry),
            "sphere" => self.parse_object(Shape::Sphere, entry),
            "plane" => self.parse_object(Shape::Plane, entry),
            other => Err(SceneParseError::UnknownVariant(other.to_string())),
        }
    }

    fn parse_camera(&mut self, body: &Yaml) -> ParseResult<()> {
        if !body["width"].is_badvalue() {
            self.camera_builder
                .width(parse_num(&body["width"])? as usize);
        }
        if !body["height"].is_badvalue() {
            self.camera_builder
                .height(parse_num(&body["height"])? as usize);
        }
        if !body["fov"].is_badvalue() {
            self.camera_builder.field_of_view(parse_num(&body["fov"])?);
        }
        if !body["from"].is_badvalue() {
            self.camera_builder.from(parse_point(&body["from"])?);
        }
        if !body["to"].is_badvalue() {
            self.camera_builder.to(parse_point(&body["to"])?);
        }
        if !body["up"].is_badvalue() {
            self.camera_builder.up(parse_vector(&body["up"])?);
        }
        Ok(())
    }

    fn parse_light(&mut self, body: &Yaml) -> ParseResult<()> {
        let position = parse_point(&body["at"])?;
        let intensity = parse_color(&body["intensity"])?;

        self.world
            .add_light(PointLightSource::new(position, intensity));
        Ok(())
    }

    fn parse_object(&mut self, shape: Shape, body: &Yaml) -> ParseResult<()> {
        let transformation = parse_transform_list(&body["transform"])?;
        let material = parse_material(&body["material"])?;

        self.world.add_object(Object::new(shape, material, transformation)?);
        Ok(())
    }
}

fn parse_num(value: &Yaml) -> ParseResult<f64> {
    match value {
        Yaml::Integer(v) => Ok(*v as f64),
        Yaml::Real(v) => v
            .parse()
            .map_err(|_| SceneParseError::InvalidField("number")),
        _ => Err(SceneParseError::InvalidField("number")),
    }
}

fn parse_values(value: &Yaml) -> ParseResult<Vec<f64>> {
    value
        .as_vec()
        .ok_or(SceneParseError::InvalidField("expected a list of numbers"))?
        .iter()
        .map(parse_num)
        .collect()
}

fn parse_triple(value: &Yaml) -> ParseResult<[f64; 3]> {
    let values = parse_values(value)?;
    values
        .try_into()
        .map_err(|_| SceneParseError::InvalidField("expected 3 values"))
}

fn parse_point(value: &Yaml) -> ParseResult<Point> {
    let [x, y, z] = parse_triple(value)?;
    Ok(Point::new(x, y, z))
}

fn parse_vector(value: &Yaml) -> ParseResult<Vector> {
    let [x, y, z] = parse_triple(value)?;
    Ok(Vector::new(x, y, z))
}

fn parse_color(value: &Yaml) -> ParseResult<Color> {
    let [r, g, b] = parse_triple(value)?;
    Ok(Color::new(r, g, b))
}

/// A transform is a list of steps applied in the order written.
fn parse_transform_list(value: &Yaml) -> ParseResult<Matrix> {
    let mut result = Matrix::identity();
    if value.is_badvalue() {
        return Ok(result);
    }

    let steps = value
        .as_vec()
        .ok_or(SceneParseError::InvalidField("transform"))?;
    for step in steps {
        result.then(&parse_transform_step(step)?);
    }
    Ok(result)
}

fn parse_transform_step(step: &Yaml) -> ParseResult<Matrix> {
    let values = step
        .as_vec()
        .ok_or(SceneParseError::InvalidField("transform"))?;
    let kind = values
        .first()
        .and_then(|kind| kind.as_str())
        .ok_or(SceneParseError::InvalidField("transform"))?;
    let args: Vec<f64> = values[1..].iter().map(parse_num).collect::<ParseResult<_>>()?;

    let expect = |n: usize| {
        if args.len() == n {
            Ok(())
        } else {
            Err(SceneParseError::InvalidField("transform"))
        }
    };

    match kind {
        "translate" => {
            expect(3)?;
            Ok(Matrix::translation(args[0], args[1], args[2]))
        }
        "scale" => {
            expect(3)?;
            Ok(Matrix::scaling(args[0], args[1], args[2]))
        }
        "rotate-x" => {
            expect(1)?;
            Ok(Matrix::rotation_x(args[0]))
        }
        "rotate-y" => {
            expect(1)?;
            Ok(Matrix::rotation_y(args[0]))
        }
        "rotate-z" => {
            expect(1)?;
            Ok(Matrix::rotation_z(args[0]))
        }
        "shear" => {
            expect(6)?;
            Ok(Matrix::shearing(
                args[0], args[1], args[2], args[3], args[4], args[5],
            ))
        }
        other => Err(SceneParseError::UnknownVariant(other.to_string())),
    }
}

fn parse_material(value: &Yaml) -> ParseResult<Material> {
    let mut material = Material::default();
    if value.is_badvalue() {
        return Ok(material);
    }

    match (&value["color"], &value["pattern"]) {
        (Yaml::BadValue, Yaml::BadValue) => {}
        (color, Yaml::BadValue) => material.pattern = Pattern::Const(parse_color(color)?),
        (Yaml::BadValue, pattern) => material.pattern = parse_pattern(pattern)?,
        _ => return Err(SceneParseError::InvalidField("material")),
    }

    parse_optional_num(value, "ambient", &mut material.ambient)?;
    parse_optional_num(value, "diffuse", &mut material.diffuse)?;
    parse_optional_num(value, "specular", &mut material.specular)?;
    parse_optional_num(value, "shininess", &mut material.shininess)?;

    Ok(material)
}

fn parse_optional_num(body: &Yaml, field: &'static str, target: &mut f64) -> ParseResult<()> {
    match &body[field] {
        Yaml::BadValue => Ok(()),
        value => {
            *target = parse_num(value)?;
            Ok(())
        }
    }
}

fn parse_pattern_colors(body: &Yaml) -> ParseResult<(Color, Color)> {
    let colors = body["colors"]
        .as_vec()
        .ok_or(SceneParseError::MissingField("colors"))?;
    if colors.len() != 2 {
        return Err(SceneParseError::InvalidField("colors"));
    }
    Ok((parse_color(&colors[0])?, parse_color(&colors[1])?))
}

fn parse_pattern_transform(body: &Yaml) -> ParseResult<Option<Matrix>> {
    if body["transform"].is_badvalue() {
        Ok(None)
    } else {
        Ok(Some(parse_transform_list(&body["transform"])?))
    }
}

fn parse_pattern(body: &Yaml) -> ParseResult<Pattern> {
    let kind = body["type"]
        .as_str()
        .ok_or(SceneParseError::MissingField("type"))?;
    let transform = parse_pattern_transform(body)?;

    let pattern = match kind {
        "stripe" => {
            let (c1, c2) = parse_pattern_colors(body)?;
            Pattern::stripe(c1, c2, transform)?
        }
        "gradient" => {
            let (c1, c2) = parse_pattern_colors(body)?;
            Pattern::gradient(c1, c2, transform)?
        }
        "ring" => {
            let (c1, c2) = parse_pattern_colors(body)?;
            Pattern::ring(c1, c2, transform)?
        }
        "checkers" => {
            let (c1, c2) = parse_pattern_colors(body)?;
            Pattern::checkers(c1, c2, transform)?
        }
        "radial-gradient" => {
            let (c1, c2) = parse_pattern_colors(body)?;
            let mut y_weight = 0.;
            parse_optional_num(body, "y-weight", &mut y_weight)?;
            Pattern::radial_gradient(c1, c2, y_weight, transform)?
        }
        "blended" => {
            let children = body["patterns"]
                .as_vec()
                .ok_or(SceneParseError::MissingField("patterns"))?;
            if children.len() != 2 {
                return Err(SceneParseError::InvalidField("patterns"));
            }
            Pattern::blended(
                parse_pattern(&children[0])?,
                parse_pattern(&children[1])?,
                transform,
            )?
        }
        "perturbed" => {
            let child = parse_pattern(&body["pattern"])?;
            let mut amplitude = 0.5;
            let mut octaves = 3.;
            let mut persistence = 0.9;
            parse_optional_num(body, "amplitude", &mut amplitude)?;
            parse_optional_num(body, "octaves", &mut octaves)?;
            parse_optional_num(body, "persistence", &mut persistence)?;
            Pattern::perturbed(child, amplitude, octaves as u32, persistence, transform)?
        }
        other => return Err(SceneParseError::UnknownVariant(other.to_string())),
    };
    Ok(pattern)
}
