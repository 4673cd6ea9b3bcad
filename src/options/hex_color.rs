//! Serde adapter for `0xRRGGBB` colors.
//!
//! Colors are written as `"#RRGGBB"` strings. Reading also accepts plain
//! integers, so TOML files can use hex literals (`color = 0xFFA500`).

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

const MAX_COLOR: u32 = 0xFF_FFFF;

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Int(u32),
    Text(String),
}

/// Serialize `color` as `"#RRGGBB"`.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub(super) fn serialize<S: Serializer>(
    color: &u32,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("#{color:06X}"))
}

/// Deserialize a color from an integer or a `"#RRGGBB"` / `"0xRRGGBB"`
/// string.
pub(super) fn deserialize<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<u32, D::Error> {
    let color = match Repr::deserialize(d)? {
        Repr::Int(value) => value,
        Repr::Text(text) => parse(&text).ok_or_else(|| {
            D::Error::custom(format!("invalid color: {text:?}"))
        })?,
    };
    if color > MAX_COLOR {
        return Err(D::Error::custom(format!(
            "color {color:#X} exceeds 0xFFFFFF"
        )));
    }
    Ok(color)
}

fn parse(text: &str) -> Option<u32> {
    let digits = text
        .strip_prefix('#')
        .or_else(|| text.strip_prefix("0x"))
        .or_else(|| text.strip_prefix("0X"))?;
    if digits.is_empty() || digits.len() > 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
