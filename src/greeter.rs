//! The press handler used by the `greeter` program, and button caption
//! parsing.

use crate::toolkit::TextDisplay;

/// The title of the greeter's window.
pub const WINDOW_TITLE: &str = "Hello there";

/// The greeter button's caption before it is pressed, in mnemonic form.
pub const INITIAL_CAPTION: &str = "_Click me!";

/// The caption a pressed greeter button shows.
pub const GREETING: &str = "It worked!";

/// Handles a press of `control` by replacing its caption with [`GREETING`].
///
/// Pressing an already-greeted control leaves it unchanged.
pub fn press<Control>(control: &Control)
where
    Control: TextDisplay + ?Sized,
{
    tracing::info!("button clicked");
    if control.text() != GREETING {
        control.set_text(GREETING.to_string());
    }
}

/// A caption with an optional access key.
///
/// An underscore marks the character after it as the access key and is not
/// displayed. Two underscores display a single underscore. Only the first
/// marked character becomes the access key; an underscore at the end of the
/// caption is displayed as-is.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Mnemonic {
    text: String,
    key: Option<char>,
}

impl Mnemonic {
    /// Parses `caption`.
    #[must_use]
    pub fn parse(caption: &str) -> Self {
        let mut text = String::with_capacity(caption.len());
        let mut key = None;
        let mut chars = caption.chars();
        while let Some(ch) = chars.next() {
            if ch != '_' {
                text.push(ch);
                continue;
            }

            match chars.next() {
                Some('_') | None => text.push('_'),
                Some(marked) => {
                    if key.is_none() {
                        key = marked.to_lowercase().next();
                    }
                    text.push(marked);
                }
            }
        }

        Self { text, key }
    }

    /// Returns the caption as displayed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the lower-cased access key, if the caption marks one.
    #[must_use]
    pub const fn key(&self) -> Option<char> {
        self.key
    }

    /// Returns true if `key` activates this caption's control.
    #[must_use]
    pub fn activated_by(&self, key: char) -> bool {
        self.key.is_some() && key.to_lowercase().next() == self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessLabel;

    #[test]
    fn initial_caption() {
        let caption = Mnemonic::parse(INITIAL_CAPTION);
        assert_eq!(caption.text(), "Click me!");
        assert_eq!(caption.key(), Some('c'));
        assert!(caption.activated_by('C'));
        assert!(!caption.activated_by('l'));
    }

    #[test]
    fn mnemonic_escapes() {
        let caption = Mnemonic::parse("snake__case_Save_");
        assert_eq!(caption.text(), "snake_caseSave_");
        assert_eq!(caption.key(), Some('s'));

        let plain = Mnemonic::parse("Plain");
        assert_eq!(plain.text(), "Plain");
        assert_eq!(plain.key(), None);
        assert!(!plain.activated_by('p'));
    }

    #[test]
    fn only_first_marker_is_the_key() {
        let caption = Mnemonic::parse("_Open _Recent");
        assert_eq!(caption.text(), "Open Recent");
        assert_eq!(caption.key(), Some('o'));
    }

    #[test]
    fn press_is_idempotent() {
        let button = HeadlessLabel::new(Mnemonic::parse(INITIAL_CAPTION).text());
        assert_eq!(button.text(), "Click me!");
        for _ in 0..3 {
            press(&button);
            assert_eq!(button.text(), GREETING);
        }
    }
}
