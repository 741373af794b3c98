//! Parser for `%printf` node names and format templates.
//!
//! Node names follow the convention:
//!
//! ```text
//! %printf("<template>", <variableName>)
//! ```
//!
//! The template is then split into literal text and `%token` markers.
//!
//! # Example
//!
//! ```
//! use vprint_parser::{parse_printf_name, Template};
//!
//! let call = parse_printf_name(r#"%printf("Color: %hex", Primary)"#).unwrap();
//! assert_eq!(call.variable_name, "Primary");
//!
//! let template = Template::parse(&call.template);
//! assert_eq!(template.render(|_| "#ff0000".to_string()), "Color: #ff0000");
//! ```

mod name;
mod template;
mod token;

pub use name::{parse_printf_name, PrintfCall};
pub use template::{Segment, Template};
pub use token::FormatToken;
