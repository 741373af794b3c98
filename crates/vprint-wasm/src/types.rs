//! TypeScript-friendly type definitions for WASM bindings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use vprint_core::{Collection, FontName, NodeId, RenderError, SinkError, Variable};
use vprint_parser::{FormatToken, PrintfCall, Template};
use vprint_resolver::{Candidate, NodeSink, RenderOptions, Renderer, StaticSource, VariableDirectory};

/// Variables and collections exported by the host plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableSnapshotJs {
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub collections: Vec<Collection>,
}

impl VariableSnapshotJs {
    pub fn into_source(self) -> StaticSource {
        StaticSource {
            variables: self.variables,
            collections: self.collections,
        }
    }
}

/// A text node from JavaScript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateJs {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub font_name: Option<FontName>,
    /// Collection id -> mode id.
    #[serde(default)]
    pub resolved_variable_modes: IndexMap<String, String>,
}

impl CandidateJs {
    pub fn into_core(self) -> Candidate {
        let mut candidate = Candidate::new(self.id, self.name);
        candidate.font = self.font_name;
        for (collection, mode) in self.resolved_variable_modes {
            candidate = candidate.with_mode(collection, mode);
        }
        candidate
    }
}

/// A parsed printf name for JavaScript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintfCallJs {
    pub template: String,
    pub variable_name: String,
    /// Token names present in the template, e.g. `["hex", "bound"]`.
    pub tokens: Vec<String>,
}

impl From<PrintfCall> for PrintfCallJs {
    fn from(call: PrintfCall) -> Self {
        let tokens = Template::parse(&call.template)
            .tokens()
            .into_iter()
            .map(|t: FormatToken| t.name().to_string())
            .collect();
        Self {
            template: call.template,
            variable_name: call.variable_name,
            tokens,
        }
    }
}

/// A text write the host should perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextWriteJs {
    pub node_id: String,
    pub font_name: Option<FontName>,
    pub text: String,
}

/// A node that failed to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureJs {
    pub node_id: String,
    pub message: String,
}

/// Result of a batch for JavaScript.
///
/// When the batch aborts, `writes` holds the nodes rendered before the
/// failure and `error` describes it; `summary` is only set on completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResultJs {
    pub rendered: usize,
    pub skipped: usize,
    pub failures: Vec<FailureJs>,
    pub writes: Vec<TextWriteJs>,
    pub summary: Option<String>,
    pub error: Option<String>,
}

/// Collects writes so the host can apply them after font loading.
#[derive(Debug, Default)]
pub struct BufferedSink {
    pub writes: Vec<TextWriteJs>,
    pub summary: Option<String>,
}

impl NodeSink for BufferedSink {
    fn write_text(
        &mut self,
        node: &NodeId,
        font: Option<&FontName>,
        text: &str,
    ) -> Result<(), SinkError> {
        self.writes.push(TextWriteJs {
            node_id: node.to_string(),
            font_name: font.cloned(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        self.summary = Some(message.to_string());
    }
}

/// Render a batch of JavaScript candidates.
pub fn render_batch(
    directory: &VariableDirectory,
    options: &RenderOptions,
    candidates: Vec<CandidateJs>,
) -> RenderResultJs {
    let candidates: Vec<Candidate> = candidates.into_iter().map(CandidateJs::into_core).collect();
    let mut sink = BufferedSink::default();

    let outcome = Renderer::new(directory)
        .with_options(options.clone())
        .render_all(&candidates, &mut sink);

    let mut result = RenderResultJs {
        writes: sink.writes,
        summary: sink.summary,
        ..Default::default()
    };

    match outcome {
        Ok(report) => {
            result.rendered = report.rendered;
            result.skipped = report.skipped;
            result.failures = report
                .failures
                .into_iter()
                .map(|f| FailureJs {
                    node_id: f.node_id.to_string(),
                    message: f.error.to_string(),
                })
                .collect();
        }
        Err(err) => {
            tracing::warn!(%err, "printf batch aborted");
            result.rendered = result.writes.len();
            if let RenderError::Node { node, source } = &err {
                result.failures.push(FailureJs {
                    node_id: node.to_string(),
                    message: source.to_string(),
                });
            }
            result.error = Some(err.to_string());
        }
    }

    result
}
