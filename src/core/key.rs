//! # Key Input
//!
//! Hosts deliver keys in several shapes: a raw character, a character
//! code, a float that should have been a code, or a message whose name is
//! the key. Everything funnels into a `KeySymbol`.

use std::fmt;

/// One of the ten bound keys, or whatever else arrived.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeySymbol {
    /// `h`
    H,
    /// `j`
    J,
    /// `k`
    K,
    /// `l`
    L,
    /// `H`
    ShiftH,
    /// `J`
    ShiftJ,
    /// `K`
    ShiftK,
    /// `L`
    ShiftL,
    /// `g`
    G,
    /// The literal space character.
    Space,
    /// Raw input that matched no binding.
    Unrecognized(String),
}

impl KeySymbol {
    pub fn from_char(c: char) -> Self {
        match c {
            'h' => KeySymbol::H,
            'j' => KeySymbol::J,
            'k' => KeySymbol::K,
            'l' => KeySymbol::L,
            'H' => KeySymbol::ShiftH,
            'J' => KeySymbol::ShiftJ,
            'K' => KeySymbol::ShiftK,
            'L' => KeySymbol::ShiftL,
            'g' => KeySymbol::G,
            ' ' => KeySymbol::Space,
            other => KeySymbol::Unrecognized(other.to_string()),
        }
    }

    /// Parse a message name. Only single-character strings can match.
    pub fn parse(raw: &str) -> Self {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => KeySymbol::Unrecognized(raw.to_string()),
        }
    }

    /// Resolve a character code. Codes wrap modulo 2^16 like the host's
    /// UTF-16 code units, so 65640 is `h`. Lone surrogates stay unrecognized
    /// and keep their numeric text.
    pub fn from_code(code: i64) -> Self {
        let unit = code.rem_euclid(0x1_0000) as u32;
        char::from_u32(unit)
            .map(Self::from_char)
            .unwrap_or_else(|| KeySymbol::Unrecognized(code.to_string()))
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, KeySymbol::Unrecognized(_))
    }
}

impl fmt::Display for KeySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySymbol::H => f.write_str("h"),
            KeySymbol::J => f.write_str("j"),
            KeySymbol::K => f.write_str("k"),
            KeySymbol::L => f.write_str("l"),
            KeySymbol::ShiftH => f.write_str("H"),
            KeySymbol::ShiftJ => f.write_str("J"),
            KeySymbol::ShiftK => f.write_str("K"),
            KeySymbol::ShiftL => f.write_str("L"),
            KeySymbol::G => f.write_str("g"),
            KeySymbol::Space => f.write_str(" "),
            KeySymbol::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// Messages a host sends to the script.
#[derive(Debug, Clone, PartialEq)]
pub enum HostMessage {
    /// No-argument "are you there" check.
    Bang,
    Char(char),
    /// Character code.
    Int(i64),
    /// Floored, then treated as a character code.
    Float(f64),
    /// The message name is the key.
    Anything(String),
}

impl HostMessage {
    /// The key this message carries. `Bang` carries none.
    pub fn key(&self) -> Option<KeySymbol> {
        match self {
            HostMessage::Bang => None,
            HostMessage::Char(c) => Some(KeySymbol::from_char(*c)),
            HostMessage::Int(code) => Some(KeySymbol::from_code(*code)),
            HostMessage::Float(value) => Some(float_to_key(*value)),
            HostMessage::Anything(name) => Some(KeySymbol::parse(name)),
        }
    }
}

fn float_to_key(value: f64) -> KeySymbol {
    let floored = value.floor();
    if floored.is_finite() && floored >= i64::MIN as f64 && floored <= i64::MAX as f64 {
        KeySymbol::from_code(floored as i64)
    } else {
        KeySymbol::Unrecognized(value.to_string())
    }
}
