//! Core value types: identifiers, colors, and RGBA records.

use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Stable identifier of a variable (e.g. `VariableID:1:23`).
    VariableId
);

string_id!(
    /// Identifier of a variable collection.
    CollectionId
);

string_id!(
    /// Opaque key selecting which value of a variable is active.
    ModeId
);

string_id!(
    /// Identifier of a canvas node handed in by the host.
    NodeId
);

/// Font specification of a text node. Opaque to the engine; it is handed back
/// to the host together with the rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontName {
    pub family: String,
    pub style: String,
}

/// A color value with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Scale the color channels to 0-255. Alpha is left in [0, 1].
    pub fn to_rgba_record(&self) -> RgbaRecord {
        RgbaRecord {
            r: self.r * 255.0,
            g: self.g * 255.0,
            b: self.b * 255.0,
            a: self.a,
        }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// A color with `r`, `g`, `b` scaled to 0-255 (unrounded) and `a` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RgbaRecord {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl RgbaRecord {
    /// Convert to an 8-bit RGBA tuple, rounding half-up.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            channel_byte(self.r),
            channel_byte(self.g),
            channel_byte(self.b),
            channel_byte(self.a * 255.0),
        )
    }

    /// Convert to a lowercase hex string (e.g. "#ff0080", or "#ff008080" with alpha).
    pub fn to_hex(&self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        if a == 255 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }

    /// Convert to CSS-style `rgba(r, g, b, a)` text.
    pub fn to_rgba_text(&self) -> String {
        let (r, g, b, _) = self.to_rgba8();
        format!("rgba({}, {}, {}, {})", r, g, b, self.a)
    }
}

/// Round half-up and clamp to a byte. NaN maps to 0.
fn channel_byte(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value + 0.5).floor().clamp(0.0, 255.0) as u8
}
