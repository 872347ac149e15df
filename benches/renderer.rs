use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use treemap_rs_renderer::config::LayoutConfig;
use treemap_rs_renderer::ir::Node;
use treemap_rs_renderer::layout::compute_layout;
use treemap_rs_renderer::render::render_svg;
use treemap_rs_renderer::theme::Theme;

fn synthetic_dataset(categories: usize, leaves_per_category: usize) -> Node {
    let mut groups = Vec::with_capacity(categories);
    for c in 0..categories {
        let name = format!("Category {c}");
        let mut children = Vec::with_capacity(leaves_per_category);
        for l in 0..leaves_per_category {
            // Deterministic spread of weights so sorting has work to do.
            let value = ((l * 7919 + c * 104729) % 997 + 1) as f64;
            children.push(Node::leaf(
                format!("Title {c}-{l} with a medium length name"),
                name.clone(),
                value,
            ));
        }
        groups.push(Node::internal(name, children));
    }
    Node::internal("root", groups)
}

fn bench_layout(c: &mut Criterion) {
    let theme = Theme::classic();
    let config = LayoutConfig::default();
    let mut group = c.benchmark_group("layout");
    for (categories, leaves) in [(5, 20), (10, 50), (20, 200)] {
        let tree = synthetic_dataset(categories, leaves);
        let id = BenchmarkId::from_parameter(categories * leaves);
        group.bench_with_input(id, &tree, |b, tree| {
            b.iter(|| compute_layout(black_box(tree), &theme, &config).unwrap());
        });
    }
    group.finish();
}

fn bench_layout_and_render(c: &mut Criterion) {
    let theme = Theme::classic();
    let config = LayoutConfig::default();
    let mut group = c.benchmark_group("layout_and_render");
    for (categories, leaves) in [(5, 20), (10, 50), (20, 200)] {
        let tree = synthetic_dataset(categories, leaves);
        let id = BenchmarkId::from_parameter(categories * leaves);
        group.bench_with_input(id, &tree, |b, tree| {
            b.iter(|| {
                let layout = compute_layout(black_box(tree), &theme, &config).unwrap();
                render_svg(&layout, &theme)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_layout_and_render);
criterion_main!(benches);
