//! Animated properties: keyframe markers plus per-keyframe samples, and the value interpolated
//! between two neighboring keyframes.

use std::{fmt, str::FromStr};

use derive_more::Display;
use log::{debug, warn};
use svganim_geometry::{Color, Matrix, MatrixExt, Point};

use crate::Interpolatable;

/// The names of all animatable properties.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
pub enum PropertyName {
    #[display("fill")]
    Fill,
    #[display("stroke")]
    Stroke,
    #[display("transform")]
    Transform,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Color,
    Transform,
}

const ANIMATABLE_PROPERTIES: [(&str, PropertyName); 3] = [
    ("fill", PropertyName::Fill),
    ("stroke", PropertyName::Stroke),
    ("transform", PropertyName::Transform),
];

impl PropertyName {
    pub fn kind(self) -> PropertyKind {
        match self {
            PropertyName::Fill | PropertyName::Stroke => PropertyKind::Color,
            PropertyName::Transform => PropertyKind::Transform,
        }
    }
}

impl FromStr for PropertyName {
    type Err = NotAnimatable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ANIMATABLE_PROPERTIES
            .iter()
            .find(|(key, _)| *key == s)
            .map(|(_, name)| *name)
            .ok_or_else(|| NotAnimatable { name: s.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Property `{name}` is not animatable")]
pub struct NotAnimatable {
    pub name: String,
}

impl std::error::Error for NotAnimatable {}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InterpolationError {
    #[display("Invalid index {index} for {key_frames} key frames")]
    InvalidKeyFrameIndex { index: usize, key_frames: usize },
    #[display("No {channel} sample for key frame {index}, only {available} available")]
    MissingSample {
        channel: &'static str,
        index: usize,
        available: usize,
    },
}

impl std::error::Error for InterpolationError {}

/// A computed property value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PropertyValue {
    Color(Color),
    Transform(Matrix),
}

/// One animated property of an animation.
///
/// `key_frames` are progress markers in `0..=1`, and must be non-decreasing. They are not sorted
/// here, whoever builds the property supplies them in order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedProperty {
    name: PropertyName,
    key_frames: Vec<f64>,
    samples: Samples,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    Color(ColorSamples),
    Transform(TransformSamples),
}

impl AnimatedProperty {
    pub fn new(name: PropertyName) -> Self {
        let samples = match name.kind() {
            PropertyKind::Color => Samples::Color(ColorSamples::default()),
            PropertyKind::Transform => Samples::Transform(TransformSamples::default()),
        };
        Self {
            name,
            key_frames: Vec::new(),
            samples,
        }
    }

    /// Creates an empty property of the right kind for the property `name`.
    pub fn create(name: &str) -> Result<Self, NotAnimatable> {
        match name.parse() {
            Ok(name) => Ok(Self::new(name)),
            Err(e) => {
                debug!("{e}");
                Err(e)
            }
        }
    }

    pub fn name(&self) -> PropertyName {
        self.name
    }

    pub fn kind(&self) -> PropertyKind {
        match self.samples {
            Samples::Color(_) => PropertyKind::Color,
            Samples::Transform(_) => PropertyKind::Transform,
        }
    }

    pub fn key_frames(&self) -> &[f64] {
        &self.key_frames
    }

    pub fn set_key_frames(&mut self, key_frames: Vec<f64>) {
        self.key_frames = key_frames;
    }

    pub fn append_key_frame(&mut self, key_frame: f64) {
        self.key_frames.push(key_frame);
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn color(&self) -> Option<&ColorSamples> {
        match &self.samples {
            Samples::Color(color) => Some(color),
            Samples::Transform(_) => None,
        }
    }

    pub fn color_mut(&mut self) -> Option<&mut ColorSamples> {
        match &mut self.samples {
            Samples::Color(color) => Some(color),
            Samples::Transform(_) => None,
        }
    }

    pub fn transform(&self) -> Option<&TransformSamples> {
        match &self.samples {
            Samples::Transform(transform) => Some(transform),
            Samples::Color(_) => None,
        }
    }

    pub fn transform_mut(&mut self) -> Option<&mut TransformSamples> {
        match &mut self.samples {
            Samples::Transform(transform) => Some(transform),
            Samples::Color(_) => None,
        }
    }

    /// The value computed by the latest successful [`AnimatedProperty::interpolate`], if any.
    pub fn interpolated_value(&self) -> Option<PropertyValue> {
        match &self.samples {
            Samples::Color(color) => color.interpolated.map(PropertyValue::Color),
            Samples::Transform(transform) => transform.interpolated.map(PropertyValue::Transform),
        }
    }

    /// Interpolates within the interval between key frame `index - 1` and `index`.
    ///
    /// On error, the previously interpolated value stays and the error is logged.
    pub fn interpolate(&mut self, index: usize, t: f64) -> Result<(), InterpolationError> {
        let result = self.interpolate_interval(index, t);
        if let Err(e) = &result {
            warn!("Failed to interpolate {self}: {e}");
        }
        result
    }

    fn interpolate_interval(&mut self, index: usize, t: f64) -> Result<(), InterpolationError> {
        let key_frames = self.key_frames.len();
        if index == 0 || index >= key_frames {
            return Err(InterpolationError::InvalidKeyFrameIndex { index, key_frames });
        }

        match &mut self.samples {
            Samples::Color(color) => color.interpolate(index, t),
            Samples::Transform(transform) => {
                transform.interpolate(key_frames, index, t);
                Ok(())
            }
        }
    }
}

impl fmt::Display for AnimatedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} key frames)", self.name, self.key_frames.len())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorSamples {
    colors: Vec<Color>,
    interpolated: Option<Color>,
}

impl ColorSamples {
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn set_colors(&mut self, colors: Vec<Color>) {
        self.colors = colors;
    }

    pub fn append_color(&mut self, color: Color) {
        self.colors.push(color);
    }

    pub fn interpolated(&self) -> Option<Color> {
        self.interpolated
    }

    fn interpolate(&mut self, index: usize, t: f64) -> Result<(), InterpolationError> {
        let missing = || InterpolationError::MissingSample {
            channel: "color",
            index,
            available: self.colors.len(),
        };
        let from = self.colors.get(index - 1).ok_or_else(missing)?;
        let to = self.colors.get(index).ok_or_else(missing)?;
        self.interpolated = Some(Color::interpolate(from, to, t));
        Ok(())
    }
}

/// Transform channels.
///
/// A channel takes part in the interpolated transform only if it has exactly one sample per
/// key frame. Rotations need their centers of rotation to take part, too.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformSamples {
    translations: Vec<Point>,
    scales: Vec<Point>,
    /// Degrees.
    rotations: Vec<f64>,
    centers_of_rotation: Vec<Point>,
    /// Shear angles in degrees.
    skews: Vec<Point>,
    interpolated: Option<Matrix>,
}

impl TransformSamples {
    pub fn translations(&self) -> &[Point] {
        &self.translations
    }

    pub fn set_translations(&mut self, translations: Vec<Point>) {
        self.translations = translations;
    }

    pub fn append_translation(&mut self, translation: Point) {
        self.translations.push(translation);
    }

    pub fn scales(&self) -> &[Point] {
        &self.scales
    }

    pub fn set_scales(&mut self, scales: Vec<Point>) {
        self.scales = scales;
    }

    pub fn append_scale(&mut self, scale: Point) {
        self.scales.push(scale);
    }

    pub fn rotations(&self) -> &[f64] {
        &self.rotations
    }

    pub fn set_rotations(&mut self, rotations: Vec<f64>) {
        self.rotations = rotations;
    }

    pub fn append_rotation(&mut self, degrees: f64) {
        self.rotations.push(degrees);
    }

    pub fn centers_of_rotation(&self) -> &[Point] {
        &self.centers_of_rotation
    }

    pub fn set_centers_of_rotation(&mut self, centers: Vec<Point>) {
        self.centers_of_rotation = centers;
    }

    pub fn append_center_of_rotation(&mut self, center: Point) {
        self.centers_of_rotation.push(center);
    }

    pub fn skews(&self) -> &[Point] {
        &self.skews
    }

    pub fn set_skews(&mut self, skews: Vec<Point>) {
        self.skews = skews;
    }

    pub fn append_skew(&mut self, skew: Point) {
        self.skews.push(skew);
    }

    pub fn interpolated(&self) -> Option<Matrix> {
        self.interpolated
    }

    /// Composes shear, scale, rotation about center, and translation, in that order of
    /// prepending. Applied to a point, the translation comes first.
    fn interpolate(&mut self, key_frames: usize, index: usize, t: f64) {
        let mut transform = Matrix::identity();

        if let Some(skew) = channel(&self.skews, key_frames, index, t) {
            transform = transform.pre_shear(
                skew.x.to_radians().tan(),
                skew.y.to_radians().tan(),
            );
        }

        if let Some(scale) = channel(&self.scales, key_frames, index, t) {
            transform = transform.pre_scale_by(scale.x, scale.y);
        }

        if let (Some(rotation), Some(center)) = (
            channel(&self.rotations, key_frames, index, t),
            channel(&self.centers_of_rotation, key_frames, index, t),
        ) {
            transform = transform.pre_rotate_about(center, rotation);
        }

        if let Some(translation) = channel(&self.translations, key_frames, index, t) {
            transform = transform.pre_translate_by(translation.x, translation.y);
        }

        self.interpolated = Some(transform);
    }
}

/// The interpolated sample of a channel, or `None` if the channel was not declared for every
/// key frame.
fn channel<T: Interpolatable>(samples: &[T], key_frames: usize, index: usize, t: f64) -> Option<T> {
    if samples.len() != key_frames {
        return None;
    }
    let from = samples.get(index.checked_sub(1)?)?;
    let to = samples.get(index)?;
    Some(T::interpolate(from, to, t))
}
