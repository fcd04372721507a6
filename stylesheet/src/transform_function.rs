use log::debug;
use svganim_geometry::Point;

use crate::{DeclarationError, Value, parse_angle, parse_number, parse_pixels};

/// A transform function, reduced to the channels animated transforms are made of.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TransformFunction {
    Scale(Point),
    /// Pixels.
    Translate(Point),
    /// Degrees, always about the origin.
    Rotate(f64),
    /// Degrees.
    Skew(Point),
    /// `matrix(a, b, c, d, e, f)`, taken apart per component: `a` and `d` scale, `b` and `c`
    /// skew, `e` and `f` translate. This is not a decomposition of the matrix, rotations and
    /// shear corrections are not extracted.
    Matrix {
        scale: Point,
        skew: Point,
        translation: Point,
    },
}

impl TransformFunction {
    /// Parses a function value. Returns `Ok(None)` for functions that can not be animated.
    pub fn parse(name: &str, arguments: &str) -> Result<Option<Self>, DeclarationError> {
        let args: Vec<&str> = arguments
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|a| !a.is_empty())
            .collect();
        let args = Arguments {
            function: name,
            args: &args,
        };

        let function = match name {
            "scale" => {
                args.require(1)?;
                let sx = parse_number(args.get(0))?;
                let sy = args.optional(1).map(parse_number).transpose()?.unwrap_or(sx);
                Self::Scale(Point::new(sx, sy))
            }
            "scaleX" => {
                args.require(1)?;
                Self::Scale(Point::new(parse_number(args.get(0))?, 1.0))
            }
            "scaleY" => {
                args.require(1)?;
                Self::Scale(Point::new(1.0, parse_number(args.get(0))?))
            }
            "translate" => {
                args.require(1)?;
                let tx = parse_pixels(args.get(0))?;
                let ty = args.optional(1).map(parse_pixels).transpose()?.unwrap_or(0.0);
                Self::Translate(Point::new(tx, ty))
            }
            "translateX" => {
                args.require(1)?;
                Self::Translate(Point::new(parse_pixels(args.get(0))?, 0.0))
            }
            "translateY" => {
                args.require(1)?;
                Self::Translate(Point::new(0.0, parse_pixels(args.get(0))?))
            }
            "rotate" => {
                args.require(1)?;
                Self::Rotate(parse_angle(args.get(0))?)
            }
            "skew" => {
                args.require(1)?;
                let kx = parse_skew(args.get(0))?;
                let ky = args.optional(1).map(parse_skew).transpose()?.unwrap_or(0.0);
                Self::Skew(Point::new(kx, ky))
            }
            "skewX" => {
                args.require(1)?;
                Self::Skew(Point::new(parse_skew(args.get(0))?, 0.0))
            }
            "skewY" => {
                args.require(1)?;
                Self::Skew(Point::new(0.0, parse_skew(args.get(0))?))
            }
            "matrix" => {
                args.require(6)?;
                Self::Matrix {
                    scale: Point::new(parse_number(args.get(0))?, parse_number(args.get(3))?),
                    skew: Point::new(parse_skew(args.get(1))?, parse_skew(args.get(2))?),
                    translation: Point::new(
                        parse_pixels(args.get(4))?,
                        parse_pixels(args.get(5))?,
                    ),
                }
            }
            _ => {
                debug!("Transform function `{name}` is not animatable, ignored");
                return Ok(None);
            }
        };

        Ok(Some(function))
    }
}

/// Parses all transform functions of a `transform` declaration's values. Non-function values
/// are ignored. Fails if any function fails.
pub fn parse_transform_functions(
    values: &[Value],
) -> Result<Vec<TransformFunction>, DeclarationError> {
    let mut functions = Vec::new();
    for value in values {
        if let Value::Function { name, arguments } = value {
            functions.extend(TransformFunction::parse(name, arguments)?);
        }
    }
    Ok(functions)
}

/// Skew components are angles, but may come as lengths, too.
fn parse_skew(s: &str) -> Result<f64, DeclarationError> {
    parse_angle(s).or_else(|_| parse_pixels(s))
}

struct Arguments<'a> {
    function: &'a str,
    args: &'a [&'a str],
}

impl<'a> Arguments<'a> {
    fn require(&self, expected: usize) -> Result<(), DeclarationError> {
        if self.args.len() < expected {
            return Err(DeclarationError::TooFewArguments {
                function: self.function.into(),
                expected,
                actual: self.args.len(),
            });
        }
        Ok(())
    }

    /// Only valid after a successful [`Arguments::require`] covering `index`.
    fn get(&self, index: usize) -> &'a str {
        self.args.get(index).copied().unwrap_or_default()
    }

    fn optional(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }
}
