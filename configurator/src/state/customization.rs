//! Selection & customization state: the selected part and the user's choices.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use bevy::prelude::*;

use crate::catalog::{ColorValue, Fabric, ShoeSize};
use crate::data::{ConfigStore, SavedConfiguration};
use crate::error::{ConfiguratorError, IncompleteConfiguration};
use crate::part::Part;

/// Most pairs a single order can hold.
pub const MAX_QUANTITY: u32 = 99;

/// How much of the shoe must be customized before an order can be confirmed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompletenessPolicy {
    /// Every part needs a color and a fabric.
    #[default]
    AllParts,
    /// At least one part needs a color and a fabric.
    AnyPart,
}

impl FromStr for CompletenessPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "all_parts" => Ok(CompletenessPolicy::AllParts),
            "any" | "any_part" => Ok(CompletenessPolicy::AnyPart),
            other => Err(format!("unknown completeness policy {other:?}")),
        }
    }
}

/// User-chosen color and fabric per part.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomizationState {
    colors: HashMap<Part, ColorValue>,
    fabrics: HashMap<Part, Fabric>,
}

impl CustomizationState {
    pub fn color(&self, part: Part) -> Option<ColorValue> {
        self.colors.get(&part).copied()
    }

    pub fn fabric(&self, part: Part) -> Option<Fabric> {
        self.fabrics.get(&part).copied()
    }

    /// A part is user-customized once it carries a chosen color.
    pub fn is_customized(&self, part: Part) -> bool {
        self.colors.contains_key(&part)
    }

    pub fn is_complete(&self, part: Part) -> bool {
        self.colors.contains_key(&part) && self.fabrics.contains_key(&part)
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.fabrics.is_empty()
    }
}

/// Owned by the app as a resource; panels and pickers go through it.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ConfiguratorState {
    selected: Option<Part>,
    customization: CustomizationState,
    size: Option<ShoeSize>,
    initials: Option<String>,
    quantity: u32,
}

impl Default for ConfiguratorState {
    fn default() -> Self {
        Self {
            selected: None,
            customization: CustomizationState::default(),
            size: None,
            initials: None,
            quantity: 1,
        }
    }
}

impl ConfiguratorState {
    pub fn selected(&self) -> Option<Part> {
        self.selected
    }

    pub fn customization(&self) -> &CustomizationState {
        &self.customization
    }

    pub fn size(&self) -> Option<ShoeSize> {
        self.size
    }

    pub fn initials(&self) -> Option<&str> {
        self.initials.as_deref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Points the selection at `part`. Colors and fabrics are untouched.
    pub fn select_part(&mut self, part: Part) {
        self.selected = Some(part);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn set_color(&mut self, part: Part, color: ColorValue) -> Result<(), ConfiguratorError> {
        if self.selected.is_none() {
            return Err(ConfiguratorError::NoPartSelected);
        }
        self.customization.colors.insert(part, color);
        Ok(())
    }

    /// Unknown fabric ids leave the state untouched.
    pub fn set_fabric(&mut self, part: Part, fabric_id: &str) -> Result<Fabric, ConfiguratorError> {
        if self.selected.is_none() {
            return Err(ConfiguratorError::NoPartSelected);
        }
        let fabric = fabric_id.parse::<Fabric>()?;
        self.customization.fabrics.insert(part, fabric);
        Ok(fabric)
    }

    pub fn set_size(&mut self, eu: u8) -> Result<ShoeSize, ConfiguratorError> {
        let size = ShoeSize::new(eu)?;
        self.size = Some(size);
        Ok(size)
    }

    /// Empty or whitespace-only text clears the initials.
    pub fn set_initials(&mut self, text: &str) {
        let trimmed = text.trim();
        self.initials = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Clamped to `1..=MAX_QUANTITY`.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.clamp(1, MAX_QUANTITY);
    }

    pub fn validate(&self, policy: CompletenessPolicy) -> bool {
        self.check_complete(policy).is_ok()
    }

    pub fn check_complete(&self, policy: CompletenessPolicy) -> Result<(), IncompleteConfiguration> {
        let custom = &self.customization;
        let mut missing = IncompleteConfiguration {
            missing_size: self.size.is_none(),
            missing_quantity: self.quantity == 0,
            ..Default::default()
        };

        match policy {
            CompletenessPolicy::AllParts => {
                missing.missing_colors = Part::ALL
                    .into_iter()
                    .filter(|p| custom.color(*p).is_none())
                    .collect();
                missing.missing_fabrics = Part::ALL
                    .into_iter()
                    .filter(|p| custom.fabric(*p).is_none())
                    .collect();
            }
            CompletenessPolicy::AnyPart => {
                missing.missing_any_part = !Part::ALL.into_iter().any(|p| custom.is_complete(p));
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }

    /// Snapshot in the persisted shape, or `None` while no size is chosen.
    pub fn to_saved(&self) -> Option<SavedConfiguration> {
        Some(SavedConfiguration {
            colors: self
                .customization
                .colors
                .iter()
                .map(|(p, c)| (*p, *c))
                .collect::<BTreeMap<_, _>>(),
            fabrics: self
                .customization
                .fabrics
                .iter()
                .map(|(p, f)| (*p, *f))
                .collect::<BTreeMap<_, _>>(),
            size: self.size?,
            initials: self.initials.clone(),
            quantity: self.quantity,
        })
    }

    /// Validates and writes the configuration. Nothing is written when incomplete.
    pub fn confirm_order(
        &self,
        policy: CompletenessPolicy,
        store: &mut dyn ConfigStore,
    ) -> Result<SavedConfiguration, ConfiguratorError> {
        self.check_complete(policy)?;
        let saved = self.to_saved().ok_or(IncompleteConfiguration {
            missing_size: true,
            ..Default::default()
        })?;
        store.save(&saved)?;
        Ok(saved)
    }

    /// Back to a fresh session, after the order has been handed downstream.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ConfigStore, MemoryStore};

    const RED: ColorValue = ColorValue::rgb(255, 0, 0);
    const BLUE: ColorValue = ColorValue::rgb(0, 0, 255);

    fn fully_configured() -> ConfiguratorState {
        let mut state = ConfiguratorState::default();
        for part in Part::ALL {
            state.select_part(part);
            state.set_color(part, RED).unwrap();
            state.set_fabric(part, "leather").unwrap();
        }
        state
    }

    #[test]
    fn select_part_leaves_choices_alone() {
        let mut state = fully_configured();
        let before = state.customization().clone();
        state.select_part(Part::Inside);
        assert_eq!(state.selected(), Some(Part::Inside));
        assert_eq!(state.customization(), &before);
    }

    #[test]
    fn color_requires_a_selection() {
        let mut state = ConfiguratorState::default();
        assert!(matches!(
            state.set_color(Part::Laces, RED),
            Err(ConfiguratorError::NoPartSelected)
        ));
        assert!(state.customization().is_empty());
    }

    #[test]
    fn coloring_b_keeps_a_stored_color() {
        let mut state = ConfiguratorState::default();
        state.select_part(Part::Outside1);
        state.set_color(Part::Outside1, RED).unwrap();
        state.select_part(Part::Outside2);
        state.set_color(Part::Outside2, BLUE).unwrap();

        assert_eq!(state.customization().color(Part::Outside1), Some(RED));
        assert_eq!(state.customization().color(Part::Outside2), Some(BLUE));
    }

    #[test]
    fn unknown_fabric_is_a_no_op() {
        let mut state = ConfiguratorState::default();
        state.select_part(Part::Laces);
        state.set_fabric(Part::Laces, "denim").unwrap();

        let err = state.set_fabric(Part::Laces, "chainmail").unwrap_err();
        assert!(matches!(err, ConfiguratorError::UnknownFabric(_)));
        assert_eq!(state.customization().fabric(Part::Laces), Some(Fabric::Denim));
    }

    #[test]
    fn empty_initials_mean_none() {
        let mut state = ConfiguratorState::default();
        state.set_initials("  AB ");
        assert_eq!(state.initials(), Some("AB"));
        state.set_initials("   ");
        assert_eq!(state.initials(), None);
    }

    #[test]
    fn quantity_never_drops_below_one() {
        let mut state = ConfiguratorState::default();
        state.set_quantity(0);
        assert_eq!(state.quantity(), 1);
        state.set_quantity(3);
        assert_eq!(state.quantity(), 3);
        state.set_quantity(20_000_000);
        assert_eq!(state.quantity(), MAX_QUANTITY);
    }

    #[test]
    fn validate_is_false_without_colors() {
        let mut state = ConfiguratorState::default();
        state.set_size(42).unwrap();
        assert!(!state.validate(CompletenessPolicy::AllParts));
        assert!(!state.validate(CompletenessPolicy::AnyPart));
    }

    #[test]
    fn all_parts_policy_needs_every_part_and_size() {
        let mut state = fully_configured();
        assert!(!state.validate(CompletenessPolicy::AllParts));
        state.set_size(41).unwrap();
        assert!(state.validate(CompletenessPolicy::AllParts));
    }

    #[test]
    fn any_part_policy_accepts_one_complete_part() {
        let mut state = ConfiguratorState::default();
        state.set_size(39).unwrap();
        state.select_part(Part::Laces);
        state.set_color(Part::Laces, RED).unwrap();

        let missing = state.check_complete(CompletenessPolicy::AnyPart).unwrap_err();
        assert!(missing.missing_any_part);

        state.set_fabric(Part::Laces, "canvas").unwrap();
        assert!(state.validate(CompletenessPolicy::AnyPart));
        assert!(!state.validate(CompletenessPolicy::AllParts));
    }

    #[test]
    fn all_parts_report_lists_missing_parts() {
        let mut state = ConfiguratorState::default();
        state.select_part(Part::Laces);
        state.set_color(Part::Laces, RED).unwrap();

        let missing = state.check_complete(CompletenessPolicy::AllParts).unwrap_err();
        assert_eq!(missing.missing_colors.len(), 6);
        assert!(!missing.missing_colors.contains(&Part::Laces));
        assert_eq!(missing.missing_fabrics.len(), 7);
        assert!(missing.missing_size);
    }

    #[test]
    fn confirm_without_size_does_not_touch_store() {
        let state = fully_configured();
        let mut store = MemoryStore::new();

        let err = state
            .confirm_order(CompletenessPolicy::AllParts, &mut store)
            .unwrap_err();
        match err {
            ConfiguratorError::Incomplete(missing) => assert!(missing.missing_size),
            other => panic!("expected incomplete configuration, got {other:?}"),
        }
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn confirm_writes_the_saved_shape() {
        let mut state = fully_configured();
        state.set_size(43).unwrap();
        state.set_initials("KB");
        let mut store = MemoryStore::new();

        let saved = state
            .confirm_order(CompletenessPolicy::AllParts, &mut store)
            .unwrap();
        assert_eq!(saved.colors.len(), 7);
        assert_eq!(saved.fabrics[&Part::SoleBottom], Fabric::Leather);
        assert_eq!(saved.initials.as_deref(), Some("KB"));
        assert_eq!(store.get(), Some(saved));
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = fully_configured();
        state.reset();
        assert_eq!(state, ConfiguratorState::default());
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("ALL".parse(), Ok(CompletenessPolicy::AllParts));
        assert_eq!("any".parse(), Ok(CompletenessPolicy::AnyPart));
        assert!("most".parse::<CompletenessPolicy>().is_err());
    }
}
