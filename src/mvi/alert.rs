//! Alert and confirmation dialog destinations.

use serde::Serialize;

/// Semantic role of a dialog button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonRole {
    Cancel,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct ButtonState<A> {
    pub label: String,
    pub role: Option<ButtonRole>,
    /// Action sent when tapped. Tapping any button also dismisses the dialog.
    #[serde(skip)]
    pub action: Option<A>,
}

impl<A> ButtonState<A> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            role: None,
            action: None,
        }
    }

    pub fn action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    pub fn role(mut self, role: ButtonRole) -> Self {
        self.role = Some(role);
        self
    }
}

/// Modal alert: title, optional message, buttons.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct AlertState<A> {
    pub title: String,
    pub message: Option<String>,
    pub buttons: Vec<ButtonState<A>>,
}

impl<A> AlertState<A> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: None,
            buttons: Vec::new(),
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn button(mut self, button: ButtonState<A>) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn find_button(&self, label: &str) -> Option<&ButtonState<A>> {
        self.buttons.iter().find(|b| b.label == label)
    }
}

/// Action sheet style confirmation dialog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct ConfirmationDialogState<A> {
    pub title: String,
    pub title_visible: bool,
    pub message: Option<String>,
    pub buttons: Vec<ButtonState<A>>,
}

impl<A> ConfirmationDialogState<A> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            title_visible: true,
            message: None,
            buttons: Vec::new(),
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn button(mut self, button: ButtonState<A>) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn find_button(&self, label: &str) -> Option<&ButtonState<A>> {
        self.buttons.iter().find(|b| b.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Choice {
        Reset,
    }

    #[test]
    fn builder_collects_buttons_in_order() {
        let alert = AlertState::new("Warning")
            .message("really?")
            .button(ButtonState::new("Reset").action(Choice::Reset).role(ButtonRole::Destructive))
            .button(ButtonState::new("Cancel").role(ButtonRole::Cancel));

        let labels: Vec<_> = alert.buttons.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Reset", "Cancel"]);
        assert_eq!(
            alert.find_button("Reset").and_then(|b| b.action.clone()),
            Some(Choice::Reset)
        );
        assert!(alert.find_button("Cancel").and_then(|b| b.action.clone()).is_none());
    }

    #[test]
    fn serialization_omits_actions() {
        let dialog = ConfirmationDialogState::new("Title")
            .button(ButtonState::new("Go").action(Choice::Reset));
        let json = serde_json::to_value(&dialog).unwrap();
        assert_eq!(json["buttons"][0], serde_json::json!({"label": "Go", "role": null}));
    }
}
