//! Fixed emoji markers used on event announcements.

/// Emoji the command author reacts with to dismiss a confirmation notice.
pub const DISMISS_EMOJI: &str = "🧨";

/// Status reactions attached to every bound announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusEmoji {
    /// The member attends the event. Only this reaction grants the role.
    Attending,
    /// The member is unavailable on this date.
    Tentative,
    /// The member is not interested.
    Declined,
}

impl StatusEmoji {
    /// All status reactions, in the order they are attached.
    pub const ALL: [Self; 3] = [Self::Attending, Self::Tentative, Self::Declined];

    /// Returns the emoji glyph.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attending => "✅",
            Self::Tentative => "📆",
            Self::Declined => "🚫",
        }
    }

    /// Returns `true` when `emoji` is the attending marker.
    #[must_use]
    pub fn is_attending(emoji: &str) -> bool {
        emoji == Self::Attending.as_str()
    }
}
