//! The fixed set of format tokens.

use std::fmt;
use std::str::FromStr;

use vprint_core::ResolveError;

/// A `%`-prefixed format token.
///
/// Declaration order matters: when markers share a prefix (`%rgba` and `%r`,
/// `%bound` and `%b`), the earlier token wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatToken {
    /// `%v`: the raw terminal value.
    Value,
    /// `%hex`: lowercase hex color.
    Hex,
    /// `%rgba`: `rgba(r, g, b, a)` text.
    Rgba,
    /// `%bound`: name of the aliased variable, one hop away.
    Bound,
    /// `%r`: red channel, 0-255.
    Red,
    /// `%g`: green channel, 0-255.
    Green,
    /// `%b`: blue channel, 0-255.
    Blue,
    /// `%a`: alpha, 0-1.
    Alpha,
}

impl FormatToken {
    /// All tokens in declaration order.
    pub const ALL: [FormatToken; 8] = [
        FormatToken::Value,
        FormatToken::Hex,
        FormatToken::Rgba,
        FormatToken::Bound,
        FormatToken::Red,
        FormatToken::Green,
        FormatToken::Blue,
        FormatToken::Alpha,
    ];

    /// Token name without the `%` prefix.
    pub fn name(self) -> &'static str {
        match self {
            FormatToken::Value => "v",
            FormatToken::Hex => "hex",
            FormatToken::Rgba => "rgba",
            FormatToken::Bound => "bound",
            FormatToken::Red => "r",
            FormatToken::Green => "g",
            FormatToken::Blue => "b",
            FormatToken::Alpha => "a",
        }
    }

    /// The marker as written in a template (e.g. `%hex`).
    pub fn marker(self) -> &'static str {
        match self {
            FormatToken::Value => "%v",
            FormatToken::Hex => "%hex",
            FormatToken::Rgba => "%rgba",
            FormatToken::Bound => "%bound",
            FormatToken::Red => "%r",
            FormatToken::Green => "%g",
            FormatToken::Blue => "%b",
            FormatToken::Alpha => "%a",
        }
    }

    /// Whether rendering this token needs a color value.
    pub fn requires_color(self) -> bool {
        !matches!(self, FormatToken::Value | FormatToken::Bound)
    }
}

impl FromStr for FormatToken {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix('%').unwrap_or(s);
        FormatToken::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| ResolveError::UnknownToken { token: name.to_string() })
    }
}

impl fmt::Display for FormatToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}
