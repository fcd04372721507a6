use std::collections::HashMap;

use log::{debug, trace, warn};
use svganim_animation::{
    AnimatedProperty, Animation, PropertyKind, PropertyName, RunningTime, TransformSamples,
};
use svganim_geometry::{Color, Point};

use crate::{
    AnimationRule, Declaration, DeclarationError, KeyFrameRuleSet, TransformFunction, Value,
    parse_transform_functions,
};

/// Turns `@keyframes` rules into stylesheet animations.
///
/// Rules are ingested up front; animations are built lazily, at most once per name, and then
/// served from a cache that is only emptied on request.
#[derive(Debug, Default)]
pub struct AnimationCompiler {
    /// Rule sets sorted by key frame.
    rules: HashMap<String, Vec<KeyFrameRuleSet>>,
    compiled: HashMap<String, Animation>,
}

impl AnimationCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the rules by name. A rule replaces an earlier one of the same name. Already
    /// compiled animations are not affected.
    pub fn ingest_rules(&mut self, rules: impl IntoIterator<Item = AnimationRule>) {
        for AnimationRule {
            name,
            mut rule_sets,
        } in rules
        {
            if name.is_empty() || rule_sets.is_empty() {
                debug!("Ignoring empty animation rule `{name}`");
                continue;
            }
            rule_sets.sort_by(|a, b| a.key_frame.total_cmp(&b.key_frame));
            self.rules.insert(name, rule_sets);
        }
    }

    pub fn contains_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn rule_sets(&self, name: &str) -> Option<&[KeyFrameRuleSet]> {
        self.rules.get(name).map(Vec::as_slice)
    }

    /// The animation for the rule `name`, or `None` if there is no such rule.
    ///
    /// Repeated calls return the same instance until the cache is cleared.
    pub fn compile(&mut self, name: &str) -> Option<&Animation> {
        if !self.compiled.contains_key(name) {
            let rule_sets = self.rules.get(name)?;
            debug!("Compiling animation `{name}`");
            let animation = compile_rule_sets(name, rule_sets);
            self.compiled.insert(name.into(), animation);
        } else {
            trace!("Animation `{name}` served from cache");
        }
        self.compiled.get(name)
    }

    /// A copy of the compiled animation `name`, scheduled at `running_time`, ready to be owned by
    /// a node.
    pub fn instantiate(&mut self, name: &str, running_time: RunningTime) -> Option<Animation> {
        self.compile(name)
            .map(|animation| animation.clone().with_running_time(running_time))
    }

    pub fn clear_cache(&mut self) {
        self.compiled.clear();
    }

    /// Drops the compiled animation `name`. Returns `true` if it was cached.
    pub fn evict(&mut self, name: &str) -> bool {
        self.compiled.remove(name).is_some()
    }
}

enum DeclaredValue {
    Color(Color),
    Transform(Vec<TransformFunction>),
}

fn compile_rule_sets(name: &str, rule_sets: &[KeyFrameRuleSet]) -> Animation {
    // In order of first appearance.
    let mut properties: Vec<AnimatedProperty> = Vec::new();

    for rule_set in rule_sets {
        for declaration in &rule_set.declarations {
            let Ok(property_name) = declaration.property.parse::<PropertyName>() else {
                trace!(
                    "`{}` in animation `{name}` is not animatable",
                    declaration.property
                );
                continue;
            };

            let value = match parse_declared_value(property_name, declaration) {
                Ok(value) => value,
                Err(e) => {
                    warn!(
                        "Skipping `{}` at key frame {} of animation `{name}`: {e}",
                        declaration.property, rule_set.key_frame
                    );
                    continue;
                }
            };

            let property = match properties.iter().position(|p| p.name() == property_name) {
                Some(index) => &mut properties[index],
                None => {
                    properties.push(AnimatedProperty::new(property_name));
                    let last = properties.len() - 1;
                    &mut properties[last]
                }
            };

            property.append_key_frame(rule_set.key_frame);
            match value {
                DeclaredValue::Color(color) => {
                    if let Some(colors) = property.color_mut() {
                        colors.append_color(color);
                    }
                }
                DeclaredValue::Transform(functions) => {
                    if let Some(transform) = property.transform_mut() {
                        append_transform_functions(transform, &functions);
                    }
                }
            }
        }
    }

    let mut animation = Animation::css();
    for property in properties {
        animation.append_property(property);
    }
    animation
}

fn parse_declared_value(
    name: PropertyName,
    declaration: &Declaration,
) -> Result<DeclaredValue, DeclarationError> {
    match name.kind() {
        PropertyKind::Color => parse_color(&declaration.values).map(DeclaredValue::Color),
        PropertyKind::Transform => {
            parse_transform_functions(&declaration.values).map(DeclaredValue::Transform)
        }
    }
}

/// The color of the first value.
fn parse_color(values: &[Value]) -> Result<Color, DeclarationError> {
    let value = values.first().ok_or(DeclarationError::MissingValue)?;
    let text = value.to_string();
    let color = csscolorparser::parse(&text)
        .map_err(|_| DeclarationError::InvalidColor(text.clone()))?;

    let channel = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    Ok(Color::new(
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a),
    ))
}

fn append_transform_functions(transform: &mut TransformSamples, functions: &[TransformFunction]) {
    for function in functions {
        match *function {
            TransformFunction::Scale(scale) => transform.append_scale(scale),
            TransformFunction::Translate(translation) => transform.append_translation(translation),
            TransformFunction::Rotate(degrees) => {
                transform.append_rotation(degrees);
                transform.append_center_of_rotation(Point::ZERO);
            }
            TransformFunction::Skew(skew) => transform.append_skew(skew),
            TransformFunction::Matrix {
                scale,
                skew,
                translation,
            } => {
                transform.append_skew(skew);
                transform.append_translation(translation);
                transform.append_scale(scale);
            }
        }
    }
}
