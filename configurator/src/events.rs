//! Discrete UI and picking events. Panels only emit these; systems apply them.

use bevy::prelude::*;

use crate::catalog::ColorValue;
use crate::checkout::CustomerForm;
use crate::part::Part;

/// A part was picked in the viewport or in the part navigation.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartNavClicked(pub Part);

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorChosen(pub ColorValue);

/// Raw fabric id; unknown ids are rejected by the state.
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub struct FabricChosen(pub String);

/// EU size as entered.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeChosen(pub u8);

#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub struct InitialsEntered(pub String);

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantityChanged(pub u32);

#[derive(Event, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfirmRequested;

#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub struct PlaceOrderRequested(pub CustomerForm);

pub fn register_events(app: &mut App) {
    app.add_event::<PartNavClicked>()
        .add_event::<ColorChosen>()
        .add_event::<FabricChosen>()
        .add_event::<SizeChosen>()
        .add_event::<InitialsEntered>()
        .add_event::<QuantityChanged>()
        .add_event::<ConfirmRequested>()
        .add_event::<PlaceOrderRequested>();
}
