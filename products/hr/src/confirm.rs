//! Yes/no prompt guarding destructive actions.

pub const DEFAULT_TITLE: &str = "Are you sure?";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GateSignal {
    Confirmed,
    Cancelled,
}

/// Two-state prompt: hidden, or shown with a message. Showing again while
/// shown replaces the message; there is no queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmGate {
    title: String,
    message: Option<String>,
}

impl Default for ConfirmGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmGate {
    pub fn new() -> Self {
        Self::with_title(DEFAULT_TITLE)
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_shown(&self) -> bool {
        self.message.is_some()
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Closes the prompt and reports `Confirmed`; `None` if it was not shown.
    pub fn proceed(&mut self) -> Option<GateSignal> {
        self.message.take().map(|_| GateSignal::Confirmed)
    }

    /// Closes the prompt and reports `Cancelled`; `None` if it was not shown.
    pub fn dismiss(&mut self) -> Option<GateSignal> {
        self.message.take().map(|_| GateSignal::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden_with_default_title() {
        let gate = ConfirmGate::new();
        assert!(!gate.is_shown());
        assert_eq!(gate.title(), "Are you sure?");
        assert_eq!(gate.message(), None);
    }

    #[test]
    fn proceed_confirms_and_hides() {
        let mut gate = ConfirmGate::new();
        gate.show("delete it");
        assert_eq!(gate.proceed(), Some(GateSignal::Confirmed));
        assert!(!gate.is_shown());
        assert_eq!(gate.proceed(), None);
    }

    #[test]
    fn dismiss_cancels_and_hides() {
        let mut gate = ConfirmGate::new();
        gate.show("delete it");
        assert_eq!(gate.dismiss(), Some(GateSignal::Cancelled));
        assert!(!gate.is_shown());
        assert_eq!(gate.dismiss(), None);
    }

    #[test]
    fn second_show_replaces_the_message() {
        let mut gate = ConfirmGate::new();
        gate.show("first");
        gate.show("second");
        assert_eq!(gate.message(), Some("second"));
        assert_eq!(gate.proceed(), Some(GateSignal::Confirmed));
        assert_eq!(gate.proceed(), None);
    }
}
