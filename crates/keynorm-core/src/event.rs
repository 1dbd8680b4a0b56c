// Keynorm Key Event
// Read-only view of a keyboard event as delivered by the event-capture layer

use serde::Deserialize;

use crate::modifier::{is_modifier_key_name, Modifiers};

/// A single keyboard event.
///
/// Deserializes from the DOM `KeyboardEvent` shape:
/// `{"key": "z", "code": "KeyZ", "shiftKey": false, "ctrlKey": true, ...}`.
/// Modifier flags missing from the input default to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct KeyEvent {
    /// Logical key (`"a"`, `"A"`, `"Enter"`), already shift-aware
    pub key: String,
    /// Physical key identifier (`"KeyA"`, `"Digit1"`)
    pub code: String,
    #[serde(flatten)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create an event with no modifiers held
    pub fn new(key: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            code: code.into(),
            modifiers: Modifiers::NONE,
        }
    }

    /// Replace the held modifier state
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark shift as held
    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    /// Mark ctrl as held
    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    /// Mark alt as held
    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    /// Mark meta as held
    pub fn with_meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    /// True if this event is a bare Shift/Alt/Control/Meta press
    pub fn is_modifier_key(&self) -> bool {
        is_modifier_key_name(&self.key)
    }
}

/// Returns true if the event is only a modifier key press
pub fn is_modifier_key(event: &KeyEvent) -> bool {
    event.is_modifier_key()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_modifier_key() {
        assert!(is_modifier_key(&KeyEvent::new("Shift", "ShiftLeft")));
        assert!(is_modifier_key(&KeyEvent::new("Control", "ControlRight").with_ctrl()));
        assert!(is_modifier_key(&KeyEvent::new("Meta", "MetaLeft")));
        assert!(is_modifier_key(&KeyEvent::new("Alt", "AltLeft")));
        assert!(!is_modifier_key(&KeyEvent::new("a", "KeyA")));
        assert!(!is_modifier_key(&KeyEvent::new("AltGraph", "AltRight")));
    }

    #[test]
    fn test_builders() {
        let event = KeyEvent::new("Z", "KeyZ").with_shift().with_ctrl();
        assert!(event.modifiers.shift);
        assert!(event.modifiers.ctrl);
        assert!(!event.modifiers.alt);
        assert!(!event.modifiers.meta);
    }

    #[test]
    fn test_deserialize_dom_shape() {
        let event: KeyEvent = serde_json::from_str(
            r#"{"key": "z", "code": "KeyZ", "shiftKey": false, "ctrlKey": true, "altKey": false, "metaKey": true}"#,
        )
        .unwrap();
        assert_eq!(event, KeyEvent::new("z", "KeyZ").with_ctrl().with_meta());
    }

    #[test]
    fn test_deserialize_missing_flags_default_false() {
        let event: KeyEvent = serde_json::from_str(r#"{"key": "Enter", "code": "Enter"}"#).unwrap();
        assert_eq!(event.modifiers, Modifiers::NONE);
    }
}
