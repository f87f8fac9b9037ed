// crates/slotframe-layout/src/events.rs
use std::fmt;
use std::rc::Rc;

use glam::Vec2;
use slotframe_core::{EventArgs, Rect, Result};
use tracing::trace;

use crate::{Element, ElementTree};

/// Predicate deciding whether an event's effect runs.
pub type Condition = Rc<dyn Fn(&ElementTree, &EventArgs) -> bool>;

/// Action run when an event fires. Free to mutate the tree.
pub type Effect = Rc<dyn Fn(&mut ElementTree, &EventArgs)>;

/// Argument keys read by the built-in pointer conditions.
pub const ARG_ELEMENT: &str = "element";
pub const ARG_POS_X: &str = "posX";
pub const ARG_POS_Y: &str = "posY";

/// A named condition/effect pair with default arguments.
///
/// Events are shared between elements through `Rc`; an element only holds a
/// reference.
#[derive(Clone)]
pub struct Event {
    name: String,
    condition: Option<Condition>,
    effect: Option<Effect>,
    condition_defaults: EventArgs,
    effect_defaults: EventArgs,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: None,
            effect: None,
            condition_defaults: EventArgs::new(),
            effect_defaults: EventArgs::new(),
        }
    }

    pub fn with_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&ElementTree, &EventArgs) -> bool + 'static,
    {
        self.condition = Some(Rc::new(condition));
        self
    }

    pub fn with_effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(&mut ElementTree, &EventArgs) + 'static,
    {
        self.effect = Some(Rc::new(effect));
        self
    }

    pub fn with_condition_defaults(mut self, defaults: EventArgs) -> Self {
        self.condition_defaults = defaults;
        self
    }

    pub fn with_effect_defaults(mut self, defaults: EventArgs) -> Self {
        self.effect_defaults = defaults;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_condition(&self) -> bool {
        self.condition.is_some()
    }

    pub fn has_effect(&self) -> bool {
        self.effect.is_some()
    }

    pub fn condition_defaults(&self) -> &EventArgs {
        &self.condition_defaults
    }

    pub fn effect_defaults(&self) -> &EventArgs {
        &self.effect_defaults
    }

    pub fn set_condition(&mut self, condition: Option<Condition>) {
        self.condition = condition;
    }

    pub fn set_effect(&mut self, effect: Option<Effect>) {
        self.effect = effect;
    }

    pub fn set_condition_defaults(&mut self, defaults: EventArgs) {
        self.condition_defaults = defaults;
    }

    pub fn set_effect_defaults(&mut self, defaults: EventArgs) {
        self.effect_defaults = defaults;
    }

    /// Evaluates the condition and runs the effect if it holds.
    ///
    /// Call-supplied arguments win over the defaults on key collisions. With no
    /// condition the effect always runs; with no effect nothing happens and
    /// the condition is not evaluated. Returns whether the effect ran.
    pub fn activate(
        &self,
        tree: &mut ElementTree,
        condition_args: &EventArgs,
        effect_args: &EventArgs,
    ) -> bool {
        let Some(effect) = &self.effect else {
            return false;
        };

        if let Some(condition) = &self.condition {
            let merged = condition_args.clone().merged_with(&self.condition_defaults);
            if !condition(tree, &merged) {
                trace!("event '{}' condition not met", self.name);
                return false;
            }
        }

        let merged = effect_args.clone().merged_with(&self.effect_defaults);
        effect(tree, &merged);
        true
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("condition", &self.condition.is_some())
            .field("effect", &self.effect.is_some())
            .field("condition_defaults", &self.condition_defaults)
            .field("effect_defaults", &self.effect_defaults)
            .finish()
    }
}

/// True when `posX`/`posY` fall inside the content rect of `element`.
///
/// Missing or mistyped arguments and unknown elements make the condition
/// false.
pub fn pointer_in_content(tree: &ElementTree, args: &EventArgs) -> bool {
    pointer_in(tree, args, Element::content).unwrap_or(false)
}

/// True when `posX`/`posY` fall inside the slot rect of `element`.
pub fn pointer_in_slot(tree: &ElementTree, args: &EventArgs) -> bool {
    pointer_in(tree, args, Element::slot).unwrap_or(false)
}

fn pointer_in(tree: &ElementTree, args: &EventArgs, frame: fn(&Element) -> Rect) -> Result<bool> {
    let id = args.element(ARG_ELEMENT)?;
    let point = Vec2::new(args.float(ARG_POS_X)?, args.float(ARG_POS_Y)?);
    let element = tree.get(id)?;
    Ok(frame(element).contains_point(point))
}

/// Condition and effect arguments for a pointer at `position` over `element`.
pub fn pointer_args(element: slotframe_core::ElementId, position: Vec2) -> EventArgs {
    EventArgs::new()
        .with(ARG_ELEMENT, slotframe_core::Value::Element(element))
        .with(ARG_POS_X, position.x)
        .with(ARG_POS_Y, position.y)
}
