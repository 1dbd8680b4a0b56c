// Keynorm Presenter
// Human-readable key strings for help screens and settings pages

use smallvec::SmallVec;

use crate::code_map::CodeMap;
use crate::event::KeyEvent;
use crate::modifier::Modifiers;

/// Friendly form of a logical key pressed without ctrl/alt/meta.
///
/// A single character with a distinct lowercase form is shown as
/// `shift+<lowercase>`. Everything else (lowercase letters, digits,
/// punctuation, named keys such as `Enter`) is returned unchanged.
pub fn friendly_key_label(key: &str) -> String {
    let mut chars = key.chars();
    let single_char = chars.next().is_some() && chars.next().is_none();
    let lower = key.to_lowercase();
    if single_char && lower != key {
        format!("shift+{}", lower)
    } else {
        key.to_string()
    }
}

/// Friendly form of a physical code held with modifiers, e.g. `meta+ctrl+shift+z`
pub(crate) fn friendly_code_combo(code: &str, modifiers: &Modifiers, code_map: &CodeMap) -> String {
    // Up to four modifier prefixes plus the key label
    let mut segments: SmallVec<[&str; 5]> = SmallVec::new();
    if modifiers.meta {
        segments.push("meta");
    }
    if modifiers.ctrl {
        segments.push("ctrl");
    }
    if modifiers.alt {
        segments.push("alt");
    }
    if modifiers.shift {
        segments.push("shift");
    }
    segments.push(code_map.friendly_code(code, modifiers.shift));
    segments.join("+")
}

/// Converts a keyboard event to its user-facing string using the builtin code map.
///
/// Display only; use [`crate::canonical_key_string`] for lookups.
pub fn friendly_key_string(event: &KeyEvent) -> String {
    friendly_key_string_with(event, CodeMap::builtin())
}

/// Same as [`friendly_key_string`] with a caller-supplied code map
pub fn friendly_key_string_with(event: &KeyEvent, code_map: &CodeMap) -> String {
    if event.modifiers.is_special() {
        friendly_code_combo(&event.code, &event.modifiers, code_map)
    } else {
        friendly_key_label(&event.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_map::CodeMapEntry;

    #[test]
    fn test_ctrl_shift_z() {
        let event = KeyEvent::new("Z", "KeyZ").with_shift().with_ctrl();
        assert_eq!(friendly_key_string(&event), "ctrl+shift+z");
    }

    #[test]
    fn test_prefix_order() {
        let event = KeyEvent::new("q", "KeyQ")
            .with_shift()
            .with_ctrl()
            .with_alt()
            .with_meta();
        assert_eq!(friendly_key_string(&event), "meta+ctrl+alt+shift+q");
    }

    #[test]
    fn test_shift_variant_used_when_available() {
        let event = KeyEvent::new("!", "Digit1").with_shift().with_alt();
        assert_eq!(friendly_key_string(&event), "alt+shift+!");

        let unshifted = KeyEvent::new("1", "Digit1").with_alt();
        assert_eq!(friendly_key_string(&unshifted), "alt+1");
    }

    #[test]
    fn test_unknown_code_falls_back_to_raw() {
        let event = KeyEvent::new("?", "Foo123").with_ctrl();
        assert_eq!(friendly_key_string(&event), "ctrl+Foo123");
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(friendly_key_string(&KeyEvent::new("a", "KeyA")), "a");
        assert_eq!(friendly_key_string(&KeyEvent::new("7", "Digit7")), "7");
        assert_eq!(friendly_key_string(&KeyEvent::new("?", "Slash").with_shift()), "?");
    }

    #[test]
    fn test_uppercase_plain_key_gets_shift_prefix() {
        let event = KeyEvent::new("A", "KeyA").with_shift();
        assert_eq!(friendly_key_string(&event), "shift+a");
    }

    #[test]
    fn test_named_keys_unchanged() {
        assert_eq!(friendly_key_string(&KeyEvent::new("Enter", "Enter")), "Enter");
        assert_eq!(friendly_key_string(&KeyEvent::new("ArrowDown", "ArrowDown")), "ArrowDown");
        assert_eq!(friendly_key_string(&KeyEvent::new(" ", "Space")), " ");
    }

    #[test]
    fn test_non_ascii_uppercase() {
        assert_eq!(friendly_key_label("É"), "shift+é");
        assert_eq!(friendly_key_label("é"), "é");
    }

    #[test]
    fn test_case_rule_follows_lowercase_mapping() {
        // Mathematical bold capital A has no lowercase mapping
        assert_eq!(friendly_key_label("\u{1D400}"), "\u{1D400}");
        // Titlecase DŽ lowercases to dž
        assert_eq!(friendly_key_label("\u{01C5}"), "shift+\u{01C6}");
    }

    #[test]
    fn test_custom_code_map() {
        let map = CodeMap::from_entries([("KeyQ", CodeMapEntry::new("a", Some("A")))]);
        let event = KeyEvent::new("a", "KeyQ").with_ctrl().with_shift();
        assert_eq!(friendly_key_string_with(&event, &map), "ctrl+shift+A");

        let unknown = KeyEvent::new("z", "KeyZ").with_ctrl();
        assert_eq!(friendly_key_string_with(&unknown, &map), "ctrl+KeyZ");
    }
}
