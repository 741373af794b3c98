//! Batch rendering benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vprint_core::{Color, NodeId, FontName, SinkError, Variable, VariableValue};
use vprint_resolver::{Candidate, NodeSink, Renderer, VariableDirectory};

struct NullSink;

impl NodeSink for NullSink {
    fn write_text(&mut self, _node: &NodeId, _font: Option<&FontName>, _text: &str) -> Result<(), SinkError> {
        Ok(())
    }
}

fn palette(size: usize) -> VariableDirectory {
    let mut variables = Vec::with_capacity(size * 2);
    for i in 0..size {
        let shade = i as f64 / size as f64;
        variables.push(
            Variable::new(format!("base:{}", i), format!("Palette/{}", i), "theme")
                .with_value("light", Color::rgb(shade, 0.5, 1.0 - shade)),
        );
        variables.push(
            Variable::new(format!("alias:{}", i), format!("Semantic/{}", i), "theme")
                .with_value("light", VariableValue::alias(format!("base:{}", i))),
        );
    }
    VariableDirectory::new(variables, vec![])
}

fn render_batch(c: &mut Criterion) {
    let dir = palette(500);
    let candidates: Vec<Candidate> = (0..500)
        .map(|i| {
            Candidate::new(
                format!("1:{}", i),
                format!(r#"%printf("%bound: %hex (%rgba)", Semantic/{})"#, i),
            )
            .with_mode("theme", "light")
        })
        .collect();

    c.bench_function("render_500_aliased_colors", |b| {
        b.iter(|| {
            Renderer::new(&dir)
                .render_all(black_box(&candidates), &mut NullSink)
                .map(|report| report.rendered)
        })
    });
}

criterion_group!(benches, render_batch);
criterion_main!(benches);
