//! Variable resolution and format-string rendering.
//!
//! This crate resolves:
//! - Variable names to variables (the [`VariableDirectory`])
//! - Mode-scoped values through alias chains to terminal values
//! - Format tokens (`%hex`, `%bound`, ...) to text
//! - Whole batches of printf nodes, written back through a [`NodeSink`]

mod directory;
mod evaluate;
mod format;
mod render;

pub use directory::{StaticSource, VariableDirectory, VariableSource};
pub use evaluate::{bound_name, evaluate};
pub use format::{render_template, TokenResolver, NO_BINDING};
pub use render::{
    Candidate, FailurePolicy, NodeFailure, NodeSink, RenderOptions, RenderReport, Renderer,
};

use vprint_core::RenderError;

/// Render every candidate against a directory with default options.
pub fn render_all<'c, I>(
    directory: &VariableDirectory,
    candidates: I,
    sink: &mut dyn NodeSink,
) -> Result<RenderReport, RenderError>
where
    I: IntoIterator<Item = &'c Candidate>,
{
    Renderer::new(directory).render_all(candidates, sink)
}
