mod customization;
mod hover;
mod status;

pub use customization::{
    CompletenessPolicy, ConfiguratorState, CustomizationState, MAX_QUANTITY,
};
pub use hover::{HoverController, HoverState, HoverTransition};
pub use status::StatusMessage;
