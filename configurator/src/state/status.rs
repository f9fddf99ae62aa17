use std::fmt::Display;

use bevy::prelude::*;

/// Message shown to the user under the customizer panel.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    text: Option<String>,
    is_error: bool,
}

impl StatusMessage {
    pub fn info(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.is_error = false;
    }

    pub fn error(&mut self, err: impl Display) {
        self.text = Some(err.to_string());
        self.is_error = true;
    }

    pub fn clear(&mut self) {
        self.text = None;
        self.is_error = false;
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }
}
