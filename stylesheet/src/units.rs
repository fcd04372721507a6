use derive_more::Display;

/// Why a declaration could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DeclarationError {
    #[display("Declaration has no value")]
    MissingValue,
    #[display("`{function}` expects at least {expected} arguments, got {actual}")]
    TooFewArguments {
        function: String,
        expected: usize,
        actual: usize,
    },
    #[display("Invalid number `{_0}`")]
    InvalidNumber(String),
    #[display("Invalid length `{_0}`")]
    InvalidLength(String),
    #[display("Invalid angle `{_0}`")]
    InvalidAngle(String),
    #[display("Invalid color `{_0}`")]
    InvalidColor(String),
}

impl std::error::Error for DeclarationError {}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LengthUnit {
    None,
    Px,
    Pt,
    Pc,
    Mm,
    Cm,
    In,
    Percent,
    Em,
    Ex,
}

// Two letter suffixes only, so the order does not matter.
const LENGTH_UNITS: [(&str, LengthUnit); 9] = [
    ("px", LengthUnit::Px),
    ("pt", LengthUnit::Pt),
    ("pc", LengthUnit::Pc),
    ("mm", LengthUnit::Mm),
    ("cm", LengthUnit::Cm),
    ("in", LengthUnit::In),
    ("em", LengthUnit::Em),
    ("ex", LengthUnit::Ex),
    ("%", LengthUnit::Percent),
];

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn parse(s: &str) -> Result<Self, DeclarationError> {
        let trimmed = s.trim().to_ascii_lowercase();
        let (number, unit) = LENGTH_UNITS
            .iter()
            .find_map(|(suffix, unit)| trimmed.strip_suffix(suffix).map(|n| (n, *unit)))
            .unwrap_or((trimmed.as_str(), LengthUnit::None));

        let value = parse_finite(number)
            .ok_or_else(|| DeclarationError::InvalidLength(s.trim().into()))?;
        Ok(Self { value, unit })
    }

    /// Absolute units are resolved at 90 dpi. Relative units have no reference here and pass
    /// through unchanged.
    pub fn to_pixels(self) -> f64 {
        let factor = match self.unit {
            LengthUnit::Pt => 1.25,
            LengthUnit::Pc => 15.0,
            LengthUnit::Mm => 3.543307,
            LengthUnit::Cm => 35.43307,
            LengthUnit::In => 90.0,
            LengthUnit::None
            | LengthUnit::Px
            | LengthUnit::Percent
            | LengthUnit::Em
            | LengthUnit::Ex => 1.0,
        };
        self.value * factor
    }
}

/// `f64::from_str` also accepts `nan`, `inf` and `infinity`, which are not numbers here.
fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse().ok().filter(|v: &f64| v.is_finite())
}

pub fn parse_number(s: &str) -> Result<f64, DeclarationError> {
    parse_finite(s).ok_or_else(|| DeclarationError::InvalidNumber(s.trim().into()))
}

pub fn parse_pixels(s: &str) -> Result<f64, DeclarationError> {
    Length::parse(s).map(Length::to_pixels)
}

// `grad` before `rad`.
const ANGLE_UNITS: [(&str, f64); 4] = [
    ("deg", 1.0),
    ("grad", 0.9),
    ("rad", 180.0 / std::f64::consts::PI),
    ("turn", 360.0),
];

/// Parses an angle into degrees. Unitless angles are degrees.
pub fn parse_angle(s: &str) -> Result<f64, DeclarationError> {
    let trimmed = s.trim().to_ascii_lowercase();
    let (number, factor) = ANGLE_UNITS
        .iter()
        .find_map(|(suffix, factor)| trimmed.strip_suffix(suffix).map(|n| (n, *factor)))
        .unwrap_or((trimmed.as_str(), 1.0));

    parse_finite(number)
        .map(|v| v * factor)
        .ok_or_else(|| DeclarationError::InvalidAngle(s.trim().into()))
}
