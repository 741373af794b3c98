//! Naming-convention parsing.

use std::sync::OnceLock;

use regex::Regex;

/// A parsed `%printf("<template>", <variableName>)` node name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintfCall {
    pub template: String,
    pub variable_name: String,
}

fn printf_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"%printf\("(.*)",\s*(.*)\)"#).expect("printf pattern is a valid regex")
    })
}

/// Parse a node name as a printf call.
///
/// Returns `None` when the name does not follow the convention; such nodes are
/// not printf nodes and are skipped. Both groups are greedy, so a template may
/// contain `", ` as long as the last occurrence separates it from the variable
/// name. Quotes inside the template cannot be escaped.
pub fn parse_printf_name(name: &str) -> Option<PrintfCall> {
    let captures = printf_pattern().captures(name)?;
    Some(PrintfCall {
        template: captures.get(1)?.as_str().trim().to_string(),
        variable_name: captures.get(2)?.as_str().trim().to_string(),
    })
}
