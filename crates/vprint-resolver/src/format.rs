//! Format token resolution and template substitution.

use indexmap::IndexMap;
use vprint_core::{format_number, ModeId, ResolveError, RgbaRecord, TerminalValue, Variable};
use vprint_parser::{FormatToken, Template};

use crate::directory::VariableDirectory;
use crate::evaluate::{bound_name, evaluate};

/// Text rendered for `%bound` when the value is not an alias.
pub const NO_BINDING: &str = "N/A";

/// Resolves format tokens for one variable at one mode.
///
/// The terminal value is evaluated up front. The RGBA record is computed on
/// the first color token and reused for the rest of the node.
pub struct TokenResolver<'d> {
    directory: &'d VariableDirectory,
    variable: &'d Variable,
    mode: &'d ModeId,
    value: &'d TerminalValue,
    rgba: Option<RgbaRecord>,
}

impl<'d> TokenResolver<'d> {
    pub fn new(
        directory: &'d VariableDirectory,
        variable: &'d Variable,
        mode: &'d ModeId,
    ) -> Result<Self, ResolveError> {
        let value = evaluate(directory, variable, mode)?;
        Ok(Self {
            directory,
            variable,
            mode,
            value,
            rgba: None,
        })
    }

    /// Render a single token.
    pub fn resolve(&mut self, token: FormatToken) -> Result<String, ResolveError> {
        let text = match token {
            FormatToken::Value => self.value.to_string(),
            FormatToken::Bound => bound_name(self.directory, self.variable, self.mode)?
                .unwrap_or(NO_BINDING)
                .to_string(),
            FormatToken::Hex => self.rgba()?.to_hex(),
            FormatToken::Rgba => self.rgba()?.to_rgba_text(),
            FormatToken::Red => format_number(self.rgba()?.r),
            FormatToken::Green => format_number(self.rgba()?.g),
            FormatToken::Blue => format_number(self.rgba()?.b),
            FormatToken::Alpha => format_number(self.rgba()?.a),
        };
        Ok(text)
    }

    /// Render a token given by name (`"hex"` or `"%hex"`).
    pub fn resolve_named(&mut self, name: &str) -> Result<String, ResolveError> {
        let token = name.parse::<FormatToken>()?;
        self.resolve(token)
    }

    fn rgba(&mut self) -> Result<RgbaRecord, ResolveError> {
        if let Some(rgba) = self.rgba {
            return Ok(rgba);
        }
        let rgba = self.value.to_rgba()?;
        self.rgba = Some(rgba);
        Ok(rgba)
    }
}

/// Resolve `variable` at `mode` and substitute every token in `template`.
///
/// Tokens are resolved once each, in declaration order, then spliced into
/// the template in a single pass.
pub fn render_template(
    directory: &VariableDirectory,
    template: &Template,
    variable: &Variable,
    mode: &ModeId,
) -> Result<String, ResolveError> {
    let mut resolver = TokenResolver::new(directory, variable, mode)?;

    let mut texts: IndexMap<FormatToken, String> = IndexMap::new();
    for token in template.tokens() {
        texts.insert(token, resolver.resolve(token)?);
    }

    template.try_render(|token| {
        texts
            .get(&token)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownToken {
                token: token.name().to_string(),
            })
    })
}
