use svganim_geometry::UnitInterval;

use crate::{AnimatedProperty, InterpolationError, PropertyName};

/// Where an animation comes from. Decides its compositing order and mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AnimationFamily {
    /// Declarative animation elements, scheduled and composited individually.
    Smil,
    /// Compiled from stylesheet keyframe rules, always replacing.
    Css,
}

/// How an animation's values combine with the values already set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Additive {
    #[default]
    Replace,
    Sum,
}

/// Timing of an animation in milliseconds of document time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct RunningTime {
    pub start: u64,
    pub duration: u64,
    /// When the animation stops contributing. Defaults to `start + duration`. If later than
    /// that, the animation holds its final values until then.
    pub end: Option<u64>,
}

impl RunningTime {
    pub const fn new(start: u64, duration: u64) -> Self {
        Self {
            start,
            duration,
            end: None,
        }
    }

    pub const fn with_end(self, end: u64) -> Self {
        Self {
            end: Some(end),
            ..self
        }
    }

    pub fn end(&self) -> u64 {
        self.end
            .unwrap_or_else(|| self.start.saturating_add(self.duration))
    }

    /// The linear progress at `elapsed`, `None` before the start.
    pub fn progress(&self, elapsed: u64) -> Option<UnitInterval> {
        if elapsed < self.start {
            return None;
        }
        if self.duration == 0 {
            return Some(UnitInterval::ONE);
        }
        let t = (elapsed - self.start) as f64 / self.duration as f64;
        Some(UnitInterval::saturating(t))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
enum State {
    #[default]
    Pending,
    Running,
    Finished,
}

/// A set of animated properties sharing one running time.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    family: AnimationFamily,
    additive: Additive,
    running_time: RunningTime,
    properties: Vec<AnimatedProperty>,
    state: State,
}

impl Animation {
    pub fn css() -> Self {
        Self::new(AnimationFamily::Css, Additive::Replace)
    }

    pub fn smil(additive: Additive) -> Self {
        Self::new(AnimationFamily::Smil, additive)
    }

    fn new(family: AnimationFamily, additive: Additive) -> Self {
        Self {
            family,
            additive,
            running_time: RunningTime::default(),
            properties: Vec::new(),
            state: State::default(),
        }
    }

    pub fn with_running_time(mut self, running_time: RunningTime) -> Self {
        self.running_time = running_time;
        self
    }

    pub fn set_running_time(&mut self, running_time: RunningTime) {
        self.running_time = running_time;
    }

    pub fn running_time(&self) -> RunningTime {
        self.running_time
    }

    pub fn family(&self) -> AnimationFamily {
        self.family
    }

    /// The compositing mode. Stylesheet animations always replace.
    pub fn additive(&self) -> Additive {
        match self.family {
            AnimationFamily::Smil => self.additive,
            AnimationFamily::Css => Additive::Replace,
        }
    }

    pub fn set_additive(&mut self, additive: Additive) {
        self.additive = additive;
    }

    pub fn properties(&self) -> &[AnimatedProperty] {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut [AnimatedProperty] {
        &mut self.properties
    }

    pub fn property(&self, name: PropertyName) -> Option<&AnimatedProperty> {
        self.properties.iter().find(|p| p.name() == name)
    }

    pub fn append_property(&mut self, property: AnimatedProperty) {
        self.properties.push(property);
    }

    /// `true` while started and not finished.
    pub fn is_active(&self) -> bool {
        self.state == State::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Forget the activity state, so that the animation can run again from a restarted clock.
    pub fn reset(&mut self) {
        self.state = State::Pending;
    }

    /// Updates the activity state for `elapsed` milliseconds and, if running, recomputes the
    /// interpolated values of all properties.
    pub fn evaluate(&mut self, elapsed: u64) {
        let Some(progress) = self.running_time.progress(elapsed) else {
            self.state = State::Pending;
            return;
        };

        if elapsed >= self.running_time.end() {
            self.state = State::Finished;
            return;
        }

        self.state = State::Running;
        let t = progress.get();
        for property in &mut self.properties {
            // Failures are logged by the property, which keeps its previous value.
            let _ = evaluate_property(property, t);
        }
    }
}

/// Locates the key frame interval that contains `t` and interpolates inside of it.
fn evaluate_property(property: &mut AnimatedProperty, t: f64) -> Result<(), InterpolationError> {
    let key_frames = property.key_frames();
    if key_frames.len() < 2 {
        return Ok(());
    }

    // Past the last key frame, the last interval holds at its end.
    let position = key_frames
        .windows(2)
        .position(|interval| t <= interval[1])
        .unwrap_or(key_frames.len() - 2);
    let (from, to) = (key_frames[position], key_frames[position + 1]);

    let local_t = if t <= from {
        0.0
    } else if t >= to || to <= from {
        1.0
    } else {
        (t - from) / (to - from)
    };

    property.interpolate(position + 1, local_t)
}
