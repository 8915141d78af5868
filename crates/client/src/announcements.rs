//! Announcement bar visibility state.
//!
//! The bar shows the site-wide announcement message until the visitor
//! dismisses it. A dismissal only covers the message it was made against:
//! when the backend publishes a new message, the dismissal resets so the
//! new announcement shows up. During maintenance mode the bar is hidden
//! regardless.

use crate::api::SiteSettings;

/// Visibility state machine for the announcement bar.
#[derive(Debug, Clone, Default)]
pub struct AnnouncementBar {
    message: String,
    maintenance_mode: bool,
    dismissed: bool,
}

impl AnnouncementBar {
    /// Create a bar with no announcement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply freshly fetched settings.
    ///
    /// A changed message resets dismissal so new announcements show up.
    pub fn apply(&mut self, settings: &SiteSettings) {
        if settings.announcement_message != self.message {
            self.dismissed = false;
        }
        self.message = settings.announcement_message.clone();
        self.maintenance_mode = settings.maintenance_mode;
    }

    /// Dismiss the current announcement.
    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    /// Whether the bar should be rendered.
    #[must_use]
    pub fn visible(&self) -> bool {
        !self.maintenance_mode && !self.dismissed && !self.message.is_empty()
    }

    /// The current announcement message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(message: &str, maintenance: bool) -> SiteSettings {
        SiteSettings {
            announcement_message: message.to_string(),
            maintenance_mode: maintenance,
        }
    }

    #[test]
    fn test_hidden_without_message() {
        let mut bar = AnnouncementBar::new();
        assert!(!bar.visible());

        bar.apply(&settings("", false));
        assert!(!bar.visible());
    }

    #[test]
    fn test_visible_with_message() {
        let mut bar = AnnouncementBar::new();
        bar.apply(&settings("Free shipping", false));
        assert!(bar.visible());
        assert_eq!(bar.message(), "Free shipping");
    }

    #[test]
    fn test_dismiss_hides_until_message_changes() {
        let mut bar = AnnouncementBar::new();
        bar.apply(&settings("Free shipping", false));
        bar.dismiss();
        assert!(!bar.visible());

        // Same message on refresh: stays dismissed
        bar.apply(&settings("Free shipping", false));
        assert!(!bar.visible());

        // New message: dismissal resets
        bar.apply(&settings("Holiday sale", false));
        assert!(bar.visible());
        assert_eq!(bar.message(), "Holiday sale");
    }

    #[test]
    fn test_maintenance_hides_bar() {
        let mut bar = AnnouncementBar::new();
        bar.apply(&settings("Free shipping", true));
        assert!(!bar.visible());

        // Maintenance clearing brings the message back
        bar.apply(&settings("Free shipping", false));
        assert!(bar.visible());
    }
}
