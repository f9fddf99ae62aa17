//! Hover highlight state machine. Decides which part to restore and which to
//! highlight; the scene layer applies the material changes.

use bevy::prelude::*;

use crate::part::Part;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(Part),
}

/// Material work produced by one pointer update. Restore always runs first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverTransition {
    pub restore: Option<Part>,
    pub highlight: Option<Part>,
}

impl HoverTransition {
    pub fn is_empty(&self) -> bool {
        self.restore.is_none() && self.highlight.is_none()
    }
}

#[derive(Resource, Debug, Default)]
pub struct HoverController {
    state: HoverState,
}

impl HoverController {
    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn hovered(&self) -> Option<Part> {
        match self.state {
            HoverState::Idle => None,
            HoverState::Hovering(part) => Some(part),
        }
    }

    /// Feed the resolver's answer for the current pointer position.
    pub fn update(&mut self, hit: Option<Part>) -> HoverTransition {
        let transition = match (self.state, hit) {
            (HoverState::Idle, None) => HoverTransition::default(),
            (HoverState::Idle, Some(next)) => HoverTransition {
                restore: None,
                highlight: Some(next),
            },
            (HoverState::Hovering(current), Some(next)) if current == next => {
                HoverTransition::default()
            }
            (HoverState::Hovering(current), next) => HoverTransition {
                restore: Some(current),
                highlight: next,
            },
        };
        self.state = hit.map_or(HoverState::Idle, HoverState::Hovering);
        transition
    }
}
