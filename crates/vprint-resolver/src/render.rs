//! Batch rendering of printf nodes.

use indexmap::IndexMap;
use vprint_core::{
    CollectionId, FontName, ModeId, NodeId, RenderError, ResolveError, SinkError, Variable,
};
use vprint_parser::{parse_printf_name, Template};

use crate::directory::VariableDirectory;
use crate::format::render_template;

/// A text node offered for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub node_id: NodeId,
    /// The node's name; only `%printf(...)` names are rendered.
    pub name: String,
    /// Passed through to the sink untouched.
    pub font: Option<FontName>,
    /// The node's resolved mode per collection.
    pub resolved_modes: IndexMap<CollectionId, ModeId>,
}

impl Candidate {
    pub fn new(node_id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            name: name.into(),
            font: None,
            resolved_modes: IndexMap::new(),
        }
    }

    /// Set the resolved mode for a collection.
    pub fn with_mode(mut self, collection: impl Into<CollectionId>, mode: impl Into<ModeId>) -> Self {
        self.resolved_modes.insert(collection.into(), mode.into());
        self
    }

    pub fn with_font(mut self, font: FontName) -> Self {
        self.font = Some(font);
        self
    }
}

/// Receives rendered text and the final summary.
pub trait NodeSink {
    /// Replace the text content of a node.
    fn write_text(
        &mut self,
        node: &NodeId,
        font: Option<&FontName>,
        text: &str,
    ) -> Result<(), SinkError>;

    /// Surface a message to the user.
    fn notify(&mut self, _message: &str) {}
}

/// What to do when a node fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FailurePolicy {
    /// Stop the batch at the first failing node.
    #[default]
    AbortOnFirst,
    /// Record the failure and continue with the next node.
    Isolate,
}

/// Options for a rendering batch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RenderOptions {
    pub failure_policy: FailurePolicy,
    /// Send the summary to [`NodeSink::notify`] when the batch completes.
    pub notify: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::AbortOnFirst,
            notify: true,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep going past failing nodes.
    pub fn isolate_failures(mut self) -> Self {
        self.failure_policy = FailurePolicy::Isolate;
        self
    }

    /// Do not send the summary notification.
    pub fn silent(mut self) -> Self {
        self.notify = false;
        self
    }
}

/// A node that failed under [`FailurePolicy::Isolate`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeFailure {
    pub node_id: NodeId,
    pub error: ResolveError,
}

/// Outcome of a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    /// Nodes whose text was written.
    pub rendered: usize,
    /// Nodes without a printf name.
    pub skipped: usize,
    pub failures: Vec<NodeFailure>,
}

impl RenderReport {
    /// Human-readable summary, e.g. "Printed 3 variables".
    pub fn summary(&self) -> String {
        let mut summary = format!("Printed {} variables", self.rendered);
        if !self.failures.is_empty() {
            summary.push_str(&format!(" ({} failed)", self.failures.len()));
        }
        summary
    }
}

/// Renders printf nodes against a variable directory.
pub struct Renderer<'d> {
    directory: &'d VariableDirectory,
    options: RenderOptions,
}

impl<'d> Renderer<'d> {
    pub fn new(directory: &'d VariableDirectory) -> Self {
        Self {
            directory,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// The mode to evaluate `variable` in for this candidate.
    ///
    /// Uses the candidate's resolved mode for the variable's collection,
    /// falling back to the collection's default mode. A resolved mode that
    /// is not one of the collection's modes is ignored.
    pub fn mode_for<'a>(
        &'a self,
        candidate: &'a Candidate,
        variable: &Variable,
    ) -> Result<&'a ModeId, ResolveError> {
        let collection = self.directory.collection(&variable.collection_id);

        let resolved = candidate
            .resolved_modes
            .get(&variable.collection_id)
            .filter(|mode| match collection {
                Some(c) if !c.has_mode(mode) => {
                    tracing::warn!(
                        node = %candidate.node_id,
                        collection = %c.id,
                        mode = %mode,
                        "resolved mode is not in collection, using default"
                    );
                    false
                }
                _ => true,
            });

        resolved
            .or_else(|| collection.map(|c| &c.default_mode_id))
            .ok_or_else(|| ResolveError::NoModeForCollection {
                variable: variable.name.clone(),
                collection: variable.collection_id.clone(),
            })
    }

    /// Render one candidate. Returns `Ok(None)` when its name is not a printf name.
    pub fn render_one(&self, candidate: &Candidate) -> Result<Option<String>, ResolveError> {
        let Some(call) = parse_printf_name(&candidate.name) else {
            return Ok(None);
        };

        let variable = self.directory.lookup(&call.variable_name)?;
        let mode = self.mode_for(candidate, variable)?;
        let template = Template::parse(&call.template);

        render_template(self.directory, &template, variable, mode).map(Some)
    }

    /// Render every candidate and write the results to `sink`.
    ///
    /// Under [`FailurePolicy::AbortOnFirst`] the first resolution error ends
    /// the batch; nodes after it are not written and no summary is sent.
    /// Sink errors always end the batch.
    pub fn render_all<'c, I>(
        &self,
        candidates: I,
        sink: &mut dyn NodeSink,
    ) -> Result<RenderReport, RenderError>
    where
        I: IntoIterator<Item = &'c Candidate>,
    {
        let mut report = RenderReport::default();

        for candidate in candidates {
            match self.render_one(candidate) {
                Ok(Some(text)) => {
                    tracing::debug!(node = %candidate.node_id, text = %text, "rendered printf node");
                    sink.write_text(&candidate.node_id, candidate.font.as_ref(), &text)?;
                    report.rendered += 1;
                }
                Ok(None) => {
                    tracing::trace!(node = %candidate.node_id, "not a printf node");
                    report.skipped += 1;
                }
                Err(error) => match self.options.failure_policy {
                    FailurePolicy::AbortOnFirst => {
                        return Err(RenderError::Node {
                            node: candidate.node_id.clone(),
                            source: error,
                        });
                    }
                    FailurePolicy::Isolate => {
                        tracing::warn!(node = %candidate.node_id, %error, "failed to render printf node");
                        report.failures.push(NodeFailure {
                            node_id: candidate.node_id.clone(),
                            error,
                        });
                    }
                },
            }
        }

        let summary = report.summary();
        tracing::info!(
            rendered = report.rendered,
            skipped = report.skipped,
            failed = report.failures.len(),
            "{}",
            summary
        );
        if self.options.notify {
            sink.notify(&summary);
        }

        Ok(report)
    }
}
