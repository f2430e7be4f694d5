//! Hotkey identifiers and startup registration.
//!
//! The ten numeric-keypad keys are registered with a shared modifier mask
//! (CTRL+ALT by default).  The keypad's physical layout doubles as a
//! compass: 7/8/9 are the top row, 4/5/6 the middle, 1/2/3 the bottom.
//! Numpad 0 is registered too but has no orientation.

use crate::orientation::Orientation;
use crate::traits::HotkeyRegistrar;
use bitflags::bitflags;
use log::{info, warn};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A virtual-key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct KeyId(pub u32);

pub const VK_NUMPAD0: KeyId = KeyId(0x60);
pub const VK_NUMPAD1: KeyId = KeyId(0x61);
pub const VK_NUMPAD2: KeyId = KeyId(0x62);
pub const VK_NUMPAD3: KeyId = KeyId(0x63);
pub const VK_NUMPAD4: KeyId = KeyId(0x64);
pub const VK_NUMPAD5: KeyId = KeyId(0x65);
pub const VK_NUMPAD6: KeyId = KeyId(0x66);
pub const VK_NUMPAD7: KeyId = KeyId(0x67);
pub const VK_NUMPAD8: KeyId = KeyId(0x68);
pub const VK_NUMPAD9: KeyId = KeyId(0x69);

/// Every key registered at startup, in digit order.
pub const NUMPAD_KEYS: [KeyId; 10] = [
    VK_NUMPAD0, VK_NUMPAD1, VK_NUMPAD2, VK_NUMPAD3, VK_NUMPAD4, VK_NUMPAD5, VK_NUMPAD6,
    VK_NUMPAD7, VK_NUMPAD8, VK_NUMPAD9,
];

impl KeyId {
    /// Numpad key for `digit` (0–9).
    pub fn numpad(digit: u8) -> Option<Self> {
        NUMPAD_KEYS.get(digit as usize).copied()
    }

    /// The digit printed on this key, if it is a numpad digit.
    pub fn numpad_digit(self) -> Option<u8> {
        NUMPAD_KEYS
            .iter()
            .position(|k| *k == self)
            .map(|i| i as u8)
    }

    /// The compass position this key selects.
    pub fn orientation(self) -> Option<Orientation> {
        let orientation = match self {
            VK_NUMPAD7 => Orientation::TopLeft,
            VK_NUMPAD8 => Orientation::TopCenter,
            VK_NUMPAD9 => Orientation::TopRight,
            VK_NUMPAD4 => Orientation::MiddleLeft,
            VK_NUMPAD5 => Orientation::MiddleCenter,
            VK_NUMPAD6 => Orientation::MiddleRight,
            VK_NUMPAD1 => Orientation::BottomLeft,
            VK_NUMPAD2 => Orientation::BottomCenter,
            VK_NUMPAD3 => Orientation::BottomRight,
            _ => return None,
        };
        Some(orientation)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.numpad_digit() {
            Some(digit) => write!(f, "numpad{}", digit),
            None => write!(f, "vk{:#04x}", self.0),
        }
    }
}

/// Parse a key name: `"numpad7"`, `"kp7"`, `"7"` or a raw code such as
/// `"0x67"`.
pub fn parse_key(s: &str) -> Option<KeyId> {
    let normalized: String = s
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect();
    if let Some(hex) = normalized.strip_prefix("0x") {
        return u32::from_str_radix(hex, 16).ok().map(KeyId);
    }
    let digits = normalized
        .strip_prefix("numpad")
        .or_else(|| normalized.strip_prefix("kp"))
        .unwrap_or(&normalized);
    match digits.parse::<u8>() {
        Ok(d) if d <= 9 => KeyId::numpad(d),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for KeyId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = KeyId;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "virtual-key code or key name such as \"numpad7\"")
            }
            fn visit_u64<E>(self, n: u64) -> Result<KeyId, E>
            where
                E: DeError,
            {
                u32::try_from(n)
                    .map(KeyId)
                    .map_err(|_| DeError::custom("virtual-key code out of range"))
            }
            fn visit_str<E>(self, s: &str) -> Result<KeyId, E>
            where
                E: DeError,
            {
                parse_key(s).ok_or_else(|| DeError::custom(format!("invalid key: {:?}", s)))
            }
        }
        deserializer.deserialize_any(V)
    }
}

bitflags! {
    /// Modifier mask shared by every registered hotkey.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const ALT = 0x0001;
        const CONTROL = 0x0002;
        const SHIFT = 0x0004;
        const WIN = 0x0008;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Modifiers::CONTROL | Modifiers::ALT
    }
}

/// Parse a modifier list such as `"ctrl+alt"` or `"SHIFT SUPER"`.
pub fn parse_modifiers(s: &str) -> Option<Modifiers> {
    let mut mods = Modifiers::empty();
    for part in s
        .split(|c: char| c == '+' || c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
    {
        mods |= match part.to_lowercase().as_str() {
            "alt" => Modifiers::ALT,
            "ctrl" | "control" => Modifiers::CONTROL,
            "shift" => Modifiers::SHIFT,
            "win" | "super" | "logo" | "mod4" => Modifiers::WIN,
            _ => return None,
        };
    }
    Some(mods)
}

impl Modifiers {
    /// Lowercase names of the set flags, in `ctrl alt shift super` order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        [
            (Modifiers::CONTROL, "ctrl"),
            (Modifiers::ALT, "alt"),
            (Modifiers::SHIFT, "shift"),
            (Modifiers::WIN, "super"),
        ]
        .into_iter()
        .filter(move |(m, _)| self.contains(*m))
        .map(|(_, name)| name)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().collect::<Vec<_>>().join("+"))
    }
}

impl Serialize for Modifiers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Modifiers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_modifiers(&s).ok_or_else(|| DeError::custom(format!("invalid modifiers: {:?}", s)))
    }
}

/// A hotkey that could not be registered.
#[derive(Debug, thiserror::Error)]
pub enum HotkeyError {
    #[error("hotkey {key} not registered: {reason}")]
    RegistrationFailed { key: KeyId, reason: String },
}

/// Register all ten numpad keys with `modifiers`.
///
/// Each key is attempted regardless of earlier failures; the failures are
/// returned so the caller can report them.
pub fn register_numpad_hotkeys<R: HotkeyRegistrar>(
    registrar: &R,
    modifiers: Modifiers,
) -> Vec<HotkeyError> {
    let mut failures = Vec::new();
    for key in NUMPAD_KEYS {
        match registrar.register(modifiers, key) {
            Ok(()) => info!("hotkey {}+{} registered", modifiers, key),
            Err(e) => {
                warn!("hotkey {}+{} not registered: {}", modifiers, key, e);
                failures.push(HotkeyError::RegistrationFailed {
                    key,
                    reason: e.to_string(),
                });
            }
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn numpad_layout_is_a_compass() {
        assert_eq!(VK_NUMPAD7.orientation(), Some(Orientation::TopLeft));
        assert_eq!(VK_NUMPAD8.orientation(), Some(Orientation::TopCenter));
        assert_eq!(VK_NUMPAD9.orientation(), Some(Orientation::TopRight));
        assert_eq!(VK_NUMPAD4.orientation(), Some(Orientation::MiddleLeft));
        assert_eq!(VK_NUMPAD5.orientation(), Some(Orientation::MiddleCenter));
        assert_eq!(VK_NUMPAD6.orientation(), Some(Orientation::MiddleRight));
        assert_eq!(VK_NUMPAD1.orientation(), Some(Orientation::BottomLeft));
        assert_eq!(VK_NUMPAD2.orientation(), Some(Orientation::BottomCenter));
        assert_eq!(VK_NUMPAD3.orientation(), Some(Orientation::BottomRight));
    }

    #[test]
    fn numpad_zero_and_others_are_unmapped() {
        assert_eq!(VK_NUMPAD0.orientation(), None);
        assert_eq!(KeyId(0x41).orientation(), None);
    }

    #[test]
    fn parse_key_names() {
        assert_eq!(parse_key("numpad7"), Some(VK_NUMPAD7));
        assert_eq!(parse_key("KP_3"), Some(VK_NUMPAD3));
        assert_eq!(parse_key("0"), Some(VK_NUMPAD0));
        assert_eq!(parse_key("0x41"), Some(KeyId(0x41)));
        assert_eq!(parse_key("numpad12"), None);
        assert_eq!(parse_key("enter"), None);
    }

    #[test]
    fn key_display() {
        assert_eq!(VK_NUMPAD5.to_string(), "numpad5");
        assert_eq!(KeyId(0x41).to_string(), "vk0x41");
    }

    #[test]
    fn deserialize_key_from_number_or_name() {
        let k: KeyId = serde_json::from_str("103").unwrap();
        assert_eq!(k, VK_NUMPAD7);
        let k: KeyId = serde_json::from_str(r#""kp9""#).unwrap();
        assert_eq!(k, VK_NUMPAD9);
        assert!(serde_json::from_str::<KeyId>(r#""nope""#).is_err());
    }

    #[test]
    fn default_modifiers_are_ctrl_alt() {
        let m = Modifiers::default();
        assert_eq!(m.bits(), 0x0003);
        assert_eq!(m.to_string(), "ctrl+alt");
    }

    #[test]
    fn modifier_names_round_trip_through_parse() {
        let all = Modifiers::all();
        assert_eq!(all.names().collect::<Vec<_>>(), ["ctrl", "alt", "shift", "super"]);
        for name in all.names() {
            let m = parse_modifiers(name).unwrap();
            assert_eq!(m.names().collect::<Vec<_>>(), [name]);
        }
    }

    #[test]
    fn parse_modifier_strings() {
        assert_eq!(parse_modifiers("ctrl+alt"), Some(Modifiers::default()));
        assert_eq!(
            parse_modifiers("SHIFT SUPER"),
            Some(Modifiers::SHIFT | Modifiers::WIN)
        );
        assert_eq!(parse_modifiers(""), Some(Modifiers::empty()));
        assert_eq!(parse_modifiers("ctrl+hyper"), None);
    }

    //  Registration

    #[derive(Debug, thiserror::Error)]
    #[error("already taken")]
    struct Taken;

    /// Refuses one key and records every attempt.
    #[derive(Default)]
    struct PickyRegistrar {
        attempts: RefCell<Vec<(Modifiers, KeyId)>>,
    }

    impl HotkeyRegistrar for PickyRegistrar {
        type Error = Taken;

        fn register(&self, modifiers: Modifiers, key: KeyId) -> Result<(), Taken> {
            self.attempts.borrow_mut().push((modifiers, key));
            if key == VK_NUMPAD5 {
                Err(Taken)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn one_failure_does_not_stop_the_rest() {
        let r = PickyRegistrar::default();
        let failures = register_numpad_hotkeys(&r, Modifiers::default());
        assert_eq!(r.attempts.borrow().len(), 10);
        assert!(r
            .attempts
            .borrow()
            .iter()
            .all(|(m, _)| *m == Modifiers::default()));
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            failures[0],
            HotkeyError::RegistrationFailed { key: VK_NUMPAD5, .. }
        ));
    }
}
