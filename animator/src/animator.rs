//! The per document animation registry.
//!
//! Nodes are associated with two lists of animations: declarative (SMIL) animations and
//! stylesheet (CSS) animations. A node's animations are always visited SMIL first, then CSS, each
//! list in registration order. Additive animations compose on top of what was composited before
//! them, so this order is observable.

use std::fmt;

use indexmap::IndexMap;
use log::{trace, warn};
use svganim_animation::{
    Additive, Animation, AnimationFamily, Clock, PropertyName, PropertyValue, VirtualClock,
    WallClock,
};
use svganim_geometry::{Color, Matrix};

use crate::{AnimatedNode, AnimatorConfig, ClockKind, NodeId, PaintContext};

pub struct Animator {
    clock: Box<dyn Clock>,
    smil: IndexMap<NodeId, Vec<Animation>>,
    css: IndexMap<NodeId, Vec<Animation>>,
    /// Document level duration in milliseconds.
    animation_duration: u64,
}

impl fmt::Debug for Animator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("clock", &self.clock)
            .field("smil_nodes", &self.smil.len())
            .field("css_nodes", &self.css.len())
            .field("animation_duration", &self.animation_duration)
            .finish()
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(WallClock::new())
    }
}

impl Animator {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            smil: IndexMap::new(),
            css: IndexMap::new(),
            animation_duration: 0,
        }
    }

    pub fn from_config(config: &AnimatorConfig) -> Self {
        let mut animator = match config.clock {
            ClockKind::Wall => Self::new(WallClock::new()),
            ClockKind::Virtual => Self::new(VirtualClock::new()),
        };
        animator.set_animation_duration(config.animation_duration);
        animator
    }

    /// Registers `animation` for `node`. Does nothing without a node.
    pub fn append_animation(&mut self, node: impl Into<Option<NodeId>>, animation: Animation) {
        let Some(node) = node.into() else {
            return;
        };

        let animations = match animation.family() {
            AnimationFamily::Smil => &mut self.smil,
            AnimationFamily::Css => &mut self.css,
        };
        animations.entry(node).or_default().push(animation);
    }

    /// The animations of `node`, SMIL first, then CSS.
    pub fn animations_for_node(&self, node: NodeId) -> Vec<&Animation> {
        let smil = self.smil.get(&node).into_iter().flatten();
        let css = self.css.get(&node).into_iter().flatten();
        smil.chain(css).collect()
    }

    /// Forgets all animations of a node that left the scene.
    pub fn remove_node(&mut self, node: NodeId) {
        self.smil.shift_remove(&node);
        self.css.shift_remove(&node);
    }

    pub fn has_animations(&self) -> bool {
        self.all_animations().next().is_some()
    }

    /// `true` if any animation has not finished yet.
    pub fn is_running(&self) -> bool {
        self.all_animations().any(|a| !a.is_finished())
    }

    /// Evaluates all unfinished animations at the clock's current time.
    pub fn advance_animations(&mut self) {
        let elapsed = self.clock.elapsed();
        self.advance(elapsed);
    }

    /// Evaluates all unfinished animations at `elapsed` milliseconds.
    pub fn advance(&mut self, elapsed: u64) {
        trace!("Advancing animations to {elapsed}ms");
        for animation in self
            .smil
            .values_mut()
            .chain(self.css.values_mut())
            .flatten()
        {
            if !animation.is_finished() {
                animation.evaluate(elapsed);
            }
        }
    }

    /// Restarts the clock and lets finished animations run again.
    pub fn restart_animation(&mut self) {
        self.clock.restart();
        for animation in self.smil.values_mut().chain(self.css.values_mut()).flatten() {
            animation.reset();
        }
    }

    pub fn current_elapsed(&self) -> u64 {
        self.clock.elapsed()
    }

    /// Jumps the clock `delta` milliseconds ahead.
    pub fn fast_forward(&mut self, delta: i64) {
        self.clock.advance_by(delta);
    }

    pub fn set_animation_duration(&mut self, duration: u64) {
        self.animation_duration = duration;
    }

    pub fn animation_duration(&self) -> u64 {
        self.animation_duration
    }

    /// Composites the current values of `node`'s active animations onto `context`.
    ///
    /// Replacing transforms replace the node's own transform; additive transforms compose with
    /// the current transform, including what earlier animations of this node set.
    pub fn apply_animations_on_node(
        &self,
        node: &(impl AnimatedNode + ?Sized),
        context: &mut (impl PaintContext + ?Sized),
    ) {
        let animations = self.animations_for_node(node.node_id());
        if animations.is_empty() {
            return;
        }

        let to_node = transform_to_node(node, context.world_transform());

        for animation in animations {
            if !animation.is_active() {
                continue;
            }

            let additive = animation.additive();
            for property in animation.properties() {
                let Some(value) = property.interpolated_value() else {
                    continue;
                };

                match (property.name(), value) {
                    (PropertyName::Fill, PropertyValue::Color(color)) => {
                        let color = composite_color(context.fill_color(), color, additive);
                        context.set_fill_color(color);
                    }
                    (PropertyName::Stroke, PropertyValue::Color(color)) => {
                        let color = composite_color(context.stroke_color(), color, additive);
                        context.set_stroke_color(color);
                    }
                    (_, PropertyValue::Transform(transform)) => {
                        let base = match additive {
                            Additive::Replace => to_node,
                            Additive::Sum => context.world_transform(),
                        };
                        context.set_world_transform(transform.then(&base));
                    }
                    _ => {}
                }
            }
        }
    }

    fn all_animations(&self) -> impl Iterator<Item = &Animation> {
        self.smil.values().chain(self.css.values()).flatten()
    }
}

fn composite_color(current: Color, animated: Color, additive: Additive) -> Color {
    match additive {
        Additive::Replace => animated,
        Additive::Sum => current.saturating_add(animated),
    }
}

/// The world transform without the node's own transform.
fn transform_to_node(node: &(impl AnimatedNode + ?Sized), world: Matrix) -> Matrix {
    let Some(local) = node.transform() else {
        return world;
    };
    match local.inverse() {
        Some(inverse) => inverse.then(&world),
        None => {
            warn!(
                "Transform of node {:?} is not invertible, animating on top of it",
                node.node_id()
            );
            world
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use svganim_animation::{AnimatedProperty, RunningTime};
    use svganim_geometry::{MatrixExt, Point};

    use super::*;
    use crate::PaintState;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    struct TestNode {
        id: NodeId,
        transform: Option<Matrix>,
    }

    impl AnimatedNode for TestNode {
        fn node_id(&self) -> NodeId {
            self.id
        }

        fn transform(&self) -> Option<Matrix> {
            self.transform
        }
    }

    fn color_property(name: PropertyName, from: Color, to: Color) -> AnimatedProperty {
        let mut property = AnimatedProperty::new(name);
        property.set_key_frames(vec![0.0, 1.0]);
        let colors = property.color_mut().unwrap();
        colors.append_color(from);
        colors.append_color(to);
        property
    }

    fn translation_property(from: Point, to: Point) -> AnimatedProperty {
        let mut property = AnimatedProperty::new(PropertyName::Transform);
        property.set_key_frames(vec![0.0, 1.0]);
        property
            .transform_mut()
            .unwrap()
            .set_translations(vec![from, to]);
        property
    }

    fn css_with(property: AnimatedProperty) -> Animation {
        let mut animation = Animation::css().with_running_time(RunningTime::new(0, 1000));
        animation.append_property(property);
        animation
    }

    fn smil_with(additive: Additive, property: AnimatedProperty) -> Animation {
        let mut animation =
            Animation::smil(additive).with_running_time(RunningTime::new(0, 1000));
        animation.append_property(property);
        animation
    }

    fn solid(name: PropertyName, color: Color) -> AnimatedProperty {
        color_property(name, color, color)
    }

    fn virtual_animator() -> Animator {
        init_logging();
        Animator::new(VirtualClock::new())
    }

    #[test]
    fn appending_without_node_is_a_no_op() {
        let mut animator = virtual_animator();
        animator.append_animation(None::<NodeId>, Animation::css());
        assert!(!animator.has_animations());
    }

    #[test]
    fn smil_animations_come_first() {
        let node = NodeId::from(1);
        let mut animator = virtual_animator();

        animator.append_animation(node, Animation::css());
        animator.append_animation(node, Animation::smil(Additive::Sum));
        animator.append_animation(node, Animation::css());

        let families: Vec<AnimationFamily> = animator
            .animations_for_node(node)
            .iter()
            .map(|a| a.family())
            .collect();
        assert_eq!(
            families,
            vec![
                AnimationFamily::Smil,
                AnimationFamily::Css,
                AnimationFamily::Css
            ]
        );
        assert!(animator.animations_for_node(NodeId::from(2)).is_empty());
    }

    #[test]
    fn later_replacing_fill_wins() {
        let node = NodeId::from(1);
        let mut animator = virtual_animator();
        animator.append_animation(node, css_with(solid(PropertyName::Fill, Color::rgb(255, 0, 0))));
        animator.append_animation(node, css_with(solid(PropertyName::Fill, Color::rgb(0, 255, 0))));

        animator.advance(500);
        let mut state = PaintState::default();
        animator.apply_animations_on_node(&node, &mut state);

        assert_eq!(state.fill, Color::rgb(0, 255, 0));
    }

    #[test]
    fn additive_colors_saturate() {
        let node = NodeId::from(1);
        let mut animator = virtual_animator();
        animator.append_animation(
            node,
            smil_with(Additive::Sum, solid(PropertyName::Stroke, Color::rgb(100, 100, 100))),
        );

        animator.advance(10);
        let mut state = PaintState {
            stroke: Color::new(200, 200, 200, 0),
            ..Default::default()
        };
        animator.apply_animations_on_node(&node, &mut state);

        assert_eq!(state.stroke, Color::new(255, 255, 255, 255));
    }

    #[test]
    fn additive_colors_accumulate_in_order() {
        let node = NodeId::from(1);
        let mut animator = virtual_animator();
        animator.append_animation(
            node,
            smil_with(Additive::Replace, solid(PropertyName::Fill, Color::rgb(10, 0, 0))),
        );
        animator.append_animation(
            node,
            smil_with(Additive::Sum, solid(PropertyName::Fill, Color::rgb(5, 5, 0))),
        );

        animator.advance(0);
        let mut state = PaintState::default();
        animator.apply_animations_on_node(&node, &mut state);

        assert_eq!(state.fill, Color::rgb(15, 5, 0));
    }

    #[test]
    fn interpolated_fill_follows_time() {
        let node = NodeId::from(1);
        let mut animator = virtual_animator();
        animator.append_animation(
            node,
            css_with(color_property(
                PropertyName::Fill,
                Color::rgb(255, 0, 0),
                Color::rgb(0, 0, 255),
            )),
        );

        animator.fast_forward(500);
        animator.advance_animations();
        let mut state = PaintState::default();
        animator.apply_animations_on_node(&node, &mut state);

        assert_eq!(state.fill, Color::rgb(127, 0, 127));
    }

    #[test]
    fn inactive_animations_are_skipped() {
        let node = NodeId::from(1);
        let mut animator = virtual_animator();
        let late = css_with(solid(PropertyName::Fill, Color::WHITE))
            .with_running_time(RunningTime::new(1000, 1000));
        animator.append_animation(node, late);

        animator.advance(500);
        let mut state = PaintState::default();
        animator.apply_animations_on_node(&node, &mut state);
        assert_eq!(state, PaintState::default());
    }

    #[test]
    fn finished_animations_are_skipped_and_not_evaluated() {
        let node = NodeId::from(1);
        let mut animator = virtual_animator();
        animator.append_animation(node, css_with(solid(PropertyName::Fill, Color::WHITE)));

        animator.advance(500);
        assert!(animator.is_running());
        animator.advance(1500);
        assert!(!animator.is_running());

        // Going back in time does not revive a finished animation.
        animator.advance(500);
        let mut state = PaintState::default();
        animator.apply_animations_on_node(&node, &mut state);
        assert_eq!(state.fill, Color::BLACK);
    }

    #[test]
    fn restart_revives_finished_animations() {
        let node = NodeId::from(1);
        let mut animator = virtual_animator();
        animator.append_animation(node, css_with(solid(PropertyName::Fill, Color::WHITE)));

        animator.fast_forward(2000);
        animator.advance_animations();
        assert!(!animator.is_running());

        animator.restart_animation();
        assert_eq!(animator.current_elapsed(), 0);
        animator.advance_animations();
        assert!(animator.is_running());
    }

    #[test]
    fn replacing_transform_drops_node_transform() {
        let node = TestNode {
            id: NodeId::from(1),
            transform: Some(Matrix::scale(2.0, 2.0)),
        };
        let parent = Matrix::translation(100.0, 0.0);
        let world = node.transform.unwrap().then(&parent);

        let mut animator = virtual_animator();
        animator.append_animation(
            node.id,
            css_with(translation_property(Point::new(10.0, 0.0), Point::new(10.0, 0.0))),
        );
        animator.advance(0);

        let mut state = PaintState {
            world_transform: world,
            ..Default::default()
        };
        animator.apply_animations_on_node(&node, &mut state);

        let mapped = state.world_transform.map(Point::ZERO);
        // Translated by 10, the node's scale gone, then the parent's translation.
        assert_abs_diff_eq!(mapped.x, 110.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mapped.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn additive_transform_composes_on_current() {
        let node = TestNode {
            id: NodeId::from(1),
            transform: Some(Matrix::scale(2.0, 2.0)),
        };

        let mut animator = virtual_animator();
        animator.append_animation(
            node.id,
            smil_with(
                Additive::Sum,
                translation_property(Point::new(10.0, 0.0), Point::new(10.0, 0.0)),
            ),
        );
        animator.append_animation(
            node.id,
            smil_with(
                Additive::Sum,
                translation_property(Point::new(0.0, 5.0), Point::new(0.0, 5.0)),
            ),
        );
        animator.advance(0);

        let mut state = PaintState {
            world_transform: node.transform.unwrap(),
            ..Default::default()
        };
        animator.apply_animations_on_node(&node, &mut state);

        let mapped = state.world_transform.map(Point::ZERO);
        assert_abs_diff_eq!(mapped.x, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mapped.y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn singular_node_transform_falls_back_to_world() {
        let node = TestNode {
            id: NodeId::from(1),
            transform: Some(Matrix::scale(0.0, 0.0)),
        };
        let mut animator = virtual_animator();
        animator.append_animation(
            node.id,
            css_with(translation_property(Point::new(1.0, 1.0), Point::new(1.0, 1.0))),
        );
        animator.advance(0);

        let mut state = PaintState {
            world_transform: Matrix::translation(5.0, 5.0),
            ..Default::default()
        };
        animator.apply_animations_on_node(&node, &mut state);
        assert_eq!(state.world_transform.map(Point::ZERO), Point::new(6.0, 6.0));
    }

    #[test]
    fn removed_nodes_lose_their_animations() {
        let (a, b) = (NodeId::from(1), NodeId::from(2));
        let mut animator = virtual_animator();
        animator.append_animation(a, Animation::css());
        animator.append_animation(b, Animation::smil(Additive::Replace));

        animator.remove_node(a);
        assert!(animator.animations_for_node(a).is_empty());
        assert_eq!(animator.animations_for_node(b).len(), 1);
    }

    #[test]
    fn compiled_stylesheet_animation_paints_node() {
        use svganim_stylesheet::{
            AnimationCompiler, AnimationRule, Declaration, KeyFrameRuleSet, Value,
        };

        let mut compiler = AnimationCompiler::new();
        compiler.ingest_rules([AnimationRule::new(
            "slide".into(),
            vec![
                KeyFrameRuleSet::new(
                    1.0,
                    vec![Declaration::new(
                        "transform".into(),
                        vec![Value::function("translate", "100px, 0")],
                    )],
                ),
                KeyFrameRuleSet::new(
                    0.0,
                    vec![Declaration::new(
                        "transform".into(),
                        vec![Value::function("translate", "0, 0")],
                    )],
                ),
            ],
        )]);

        let node = NodeId::from(1);
        let mut animator = virtual_animator();
        let animation = compiler
            .instantiate("slide", RunningTime::new(0, 2000))
            .unwrap();
        animator.append_animation(node, animation);

        animator.fast_forward(500);
        animator.advance_animations();
        let mut state = PaintState::default();
        animator.apply_animations_on_node(&node, &mut state);

        assert_eq!(state.world_transform.map(Point::ZERO), Point::new(25.0, 0.0));
    }

    #[test]
    fn config_selects_clock_and_duration() {
        let animator = Animator::from_config(&AnimatorConfig {
            clock: ClockKind::Virtual,
            animation_duration: 1200,
        });
        assert_eq!(animator.animation_duration(), 1200);
        assert_eq!(animator.current_elapsed(), 0);
    }
}
