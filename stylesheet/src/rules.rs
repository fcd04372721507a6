use derive_more::{Constructor, Display};

/// A named `@keyframes` rule.
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct AnimationRule {
    pub name: String,
    pub rule_sets: Vec<KeyFrameRuleSet>,
}

/// The declarations of one keyframe selector.
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct KeyFrameRuleSet {
    /// Progress in `0..=1`.
    pub key_frame: f64,
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct Declaration {
    pub property: String,
    pub values: Vec<Value>,
}

/// A component value of a declaration.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum Value {
    /// Anything that is not a function: keywords, numbers, hex colors.
    #[display("{_0}")]
    Identifier(String),
    /// A function with its raw, unsplit argument text.
    #[display("{name}({arguments})")]
    Function { name: String, arguments: String },
}

impl Value {
    pub fn identifier(s: impl Into<String>) -> Self {
        Self::Identifier(s.into())
    }

    pub fn function(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self::Function {
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// A keyframe selector: `from`, `to`, or a percentage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KeyFrameSelector(f64);

impl KeyFrameSelector {
    /// Parses a selector and normalizes it to `0..=1`. Percentages outside of `0%..=100%` are
    /// invalid.
    pub fn parse(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        if selector.eq_ignore_ascii_case("from") {
            return Some(Self(0.0));
        }
        if selector.eq_ignore_ascii_case("to") {
            return Some(Self(1.0));
        }
        let percent: f64 = selector.strip_suffix('%')?.trim().parse().ok()?;
        (0.0..=100.0)
            .contains(&percent)
            .then_some(Self(percent / 100.0))
    }

    pub fn key_frame(self) -> f64 {
        self.0
    }
}
