//! Batch rendering against a small design system.

use proptest::prelude::*;
use vprint_core::{
    Collection, CollectionId, Color, FontName, Mode, ModeId, NodeId, RenderError, ResolveError,
    SinkError, TerminalValue, Variable, VariableValue,
};
use vprint_resolver::{
    render_all, Candidate, NodeSink, RenderOptions, Renderer, StaticSource, VariableDirectory,
};

#[derive(Default)]
struct CanvasSink {
    texts: Vec<(NodeId, Option<FontName>, String)>,
    toasts: Vec<String>,
}

impl NodeSink for CanvasSink {
    fn write_text(
        &mut self,
        node: &NodeId,
        font: Option<&FontName>,
        text: &str,
    ) -> Result<(), SinkError> {
        self.texts.push((node.clone(), font.cloned(), text.to_string()));
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        self.toasts.push(message.to_string());
    }
}

fn design_system() -> VariableDirectory {
    let source = StaticSource {
        variables: vec![
            Variable::new("VariableID:1:1", "Primary", "theme")
                .with_value("Light", Color::rgb(1.0, 0.0, 0.0))
                .with_value("Dark", Color::rgba(0.0, 0.0, 0.0, 0.5)),
            Variable::new("VariableID:1:2", "Brand", "theme")
                .with_value("Light", VariableValue::alias("VariableID:1:1"))
                .with_value("Dark", VariableValue::alias("VariableID:1:1")),
            Variable::new("VariableID:1:3", "Button/Fill", "theme")
                .with_value("Light", VariableValue::alias("VariableID:1:2"))
                .with_value("Dark", Color::WHITE),
            Variable::new("VariableID:2:1", "Radius/MD", "scale")
                .with_value("Default", TerminalValue::Number(6.0)),
        ],
        collections: vec![
            Collection {
                id: CollectionId::from("theme"),
                name: "Theme".into(),
                modes: vec![
                    Mode { mode_id: ModeId::from("Light"), name: "Light".into() },
                    Mode { mode_id: ModeId::from("Dark"), name: "Dark".into() },
                ],
                default_mode_id: ModeId::from("Light"),
            },
            Collection {
                id: CollectionId::from("scale"),
                name: "Scale".into(),
                modes: vec![Mode { mode_id: ModeId::from("Default"), name: "Default".into() }],
                default_mode_id: ModeId::from("Default"),
            },
        ],
    };
    VariableDirectory::from_source(&source).unwrap()
}

#[test]
fn end_to_end_scenario() {
    let dir = design_system();
    let candidates = vec![
        Candidate::new("10:1", r#"%printf("Color: %hex (%rgba)", Primary)"#).with_mode("theme", "Light"),
    ];
    let mut sink = CanvasSink::default();

    let report = render_all(&dir, &candidates, &mut sink).unwrap();

    assert_eq!(report.rendered, 1);
    assert_eq!(sink.texts[0].2, "Color: #ff0000 (rgba(255, 0, 0, 1))");
    assert_eq!(sink.toasts, vec!["Printed 1 variables".to_string()]);
}

#[test]
fn alias_chain_and_bound_name() {
    let dir = design_system();
    let renderer = Renderer::new(&dir);
    let candidate = Candidate::new("10:2", r#"%printf("%hex <- %bound", Button/Fill)"#)
        .with_mode("theme", "Light");

    // Resolves through Brand to Primary, but %bound stops at Brand.
    assert_eq!(
        renderer.render_one(&candidate).unwrap().as_deref(),
        Some("#ff0000 <- Brand")
    );
}

#[test]
fn modes_select_values() {
    let dir = design_system();
    let renderer = Renderer::new(&dir);

    let dark = Candidate::new("10:3", r#"%printf("%hex %rgba %a", Brand)"#).with_mode("theme", "Dark");
    assert_eq!(
        renderer.render_one(&dark).unwrap().as_deref(),
        Some("#00000080 rgba(0, 0, 0, 0.5) 0.5")
    );

    let unbound = Candidate::new("10:4", r#"%printf("%bound", Button/Fill)"#).with_mode("theme", "Dark");
    assert_eq!(renderer.render_one(&unbound).unwrap().as_deref(), Some("N/A"));
}

#[test]
fn font_is_passed_through() {
    let dir = design_system();
    let font = FontName { family: "Inter".into(), style: "Medium".into() };
    let candidates = vec![Candidate::new("10:5", r#"%printf("%vpx", Radius/MD)"#).with_font(font.clone())];
    let mut sink = CanvasSink::default();

    render_all(&dir, &candidates, &mut sink).unwrap();

    assert_eq!(sink.texts, vec![(NodeId::from("10:5"), Some(font), "6px".to_string())]);
}

#[test]
fn missing_variable_aborts_batch() {
    let dir = design_system();
    let candidates = vec![
        Candidate::new("20:1", r#"%printf("%hex", Primary)"#),
        Candidate::new("20:2", r#"%printf("%hex", Secondary)"#),
        Candidate::new("20:3", r#"%printf("%hex", Brand)"#),
        Candidate::new("20:4", r#"%printf("%v", Radius/MD)"#),
    ];
    let mut sink = CanvasSink::default();

    let err = render_all(&dir, &candidates, &mut sink).unwrap_err();

    assert!(matches!(
        err.resolve_error(),
        Some(ResolveError::NotFound { name }) if name == "Secondary"
    ));
    assert!(matches!(err, RenderError::Node { ref node, .. } if node.as_str() == "20:2"));
    // Nothing after the failing node is written, and no summary is shown.
    assert_eq!(sink.texts.len(), 1);
    assert!(sink.toasts.is_empty());
}

#[test]
fn isolated_failures_are_reported() {
    let dir = design_system();
    let candidates = vec![
        Candidate::new("20:1", r#"%printf("%hex", Secondary)"#),
        Candidate::new("20:2", r#"%printf("%hex", Radius/MD)"#),
        Candidate::new("20:3", r#"%printf("%hex", Brand)"#),
    ];
    let mut sink = CanvasSink::default();

    let report = Renderer::new(&dir)
        .with_options(RenderOptions::new().isolate_failures())
        .render_all(&candidates, &mut sink)
        .unwrap();

    assert_eq!(report.rendered, 1);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(sink.toasts, vec!["Printed 1 variables (2 failed)".to_string()]);
}

#[test]
fn non_printf_nodes_are_not_counted() {
    let dir = design_system();
    let candidates = vec![
        Candidate::new("30:1", "Heading"),
        Candidate::new("30:2", "printf(\"%hex\", Primary)"),
        Candidate::new("30:3", r#"%printf("%hex", Primary)"#),
    ];
    let mut sink = CanvasSink::default();

    let report = render_all(&dir, &candidates, &mut sink).unwrap();

    assert_eq!(report.rendered, 1);
    assert_eq!(report.skipped, 2);
    assert_eq!(sink.texts.len(), 1);
    assert_eq!(sink.toasts, vec!["Printed 1 variables".to_string()]);
}

#[test]
fn all_tokens_leave_no_markers() {
    let dir = design_system();
    let renderer = Renderer::new(&dir);
    let candidate = Candidate::new(
        "40:1",
        r#"%printf("%v %hex %rgba %bound %r %g %b %a", Brand)"#,
    );

    let out = renderer.render_one(&candidate).unwrap().unwrap();

    assert!(!out.contains('%'));
    assert!(out.ends_with("#ff0000 rgba(255, 0, 0, 1) Primary 255 0 0 1"));
}

proptest! {
    #[test]
    fn rendering_is_idempotent(prefix in "[a-zA-Z0-9 :()]{0,20}", dark in any::<bool>()) {
        let dir = design_system();
        let renderer = Renderer::new(&dir);
        let mode = if dark { "Dark" } else { "Light" };
        let candidate = Candidate::new("50:1", format!(r#"%printf("{}%hex %bound", Brand)"#, prefix))
            .with_mode("theme", mode);

        let first = renderer.render_one(&candidate).unwrap();
        let second = renderer.render_one(&candidate).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unknown_markers_pass_through(word in "[c-fi-qs-uw-z][a-z]{0,7}") {
        let dir = design_system();
        let renderer = Renderer::new(&dir);
        let candidate = Candidate::new("50:2", format!(r#"%printf("%{} %v", Radius/MD)"#, word));

        let out = renderer.render_one(&candidate).unwrap().unwrap();
        prop_assert_eq!(out, format!("%{} 6", word));
    }
}
