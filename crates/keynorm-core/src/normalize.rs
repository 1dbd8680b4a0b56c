// Keynorm Normalizer
// Canonical key strings used as exact-match lookup keys for shortcuts

use crate::event::KeyEvent;
use crate::modifier::Modifiers;

/// Canonical string for a physical code held with special modifiers.
///
/// `"KeyZ"` with shift and ctrl becomes `"KeyZ+SC"`.
pub(crate) fn canonical_code_string(code: &str, modifiers: &Modifiers) -> String {
    let flags = modifiers.flags();
    let mut out = String::with_capacity(code.len() + 1 + flags.len());
    out.push_str(code);
    out.push('+');
    out.push_str(&flags);
    out
}

/// Converts a keyboard event to its internal string representation.
///
/// When ctrl, alt or meta is held the result is built from the physical code
/// and the held modifiers, so the logical key is ignored. Otherwise the logical
/// key is returned verbatim; it already accounts for shift.
pub fn canonical_key_string(event: &KeyEvent) -> String {
    if event.modifiers.is_special() {
        canonical_code_string(&event.code, &event.modifiers)
    } else {
        event.key.clone()
    }
}
