mod label;
mod legend;
mod treemap;
pub(crate) mod types;

pub use label::{line_offset, place_label};
pub use treemap::{LayoutError, LeafRect, partition};
pub use types::*;

use crate::config::LayoutConfig;
use crate::ir::Node;
use crate::theme::{OrdinalColorScale, Theme};

/// Computes the full chart from the dataset tree: tile geometry, label
/// plans, leaf colors, and the legend strip. Pure with respect to its
/// inputs; every call rebuilds the layout from scratch.
pub fn compute_layout(root: &Node, theme: &Theme, config: &LayoutConfig) -> Result<Layout, LayoutError> {
    let treemap_cfg = &config.treemap;
    let map_width = treemap_cfg.width;
    let map_height = treemap_cfg.height;

    let leaf_rects = partition(root, map_width, map_height, treemap_cfg.padding)?;

    // Seed the scale with the top-level group names so legend order and
    // leaf colors agree no matter which leaf is visited first.
    let mut scale = OrdinalColorScale::new(theme.category_colors.clone());
    let top_level: Vec<String> = root.children.iter().map(|child| child.name.clone()).collect();
    scale.seed(top_level.iter().map(String::as_str));

    if treemap_cfg.verify_areas {
        log_area_ratios(&leaf_rects, root.weight(), map_width * map_height);
    }

    let leaves = leaf_rects
        .into_iter()
        .map(|leaf| {
            let rect = leaf.rect;
            let label = place_label(&leaf.node.name, rect.width(), rect.height());
            LeafLayout {
                name: leaf.node.name.clone(),
                category: leaf.node.category.clone(),
                value: leaf.node.value.unwrap_or(0.0),
                rect,
                color: scale.color(leaf.node.color_key()),
                label,
            }
        })
        .collect();

    let legend = if treemap_cfg.legend {
        legend::compute_legend(&top_level, &mut scale, map_width, map_height, config)
    } else {
        Vec::new()
    };
    let height = map_height + legend::legend_height(legend.len(), map_width, config);

    Ok(Layout {
        width: map_width,
        height,
        map_width,
        map_height,
        leaves,
        legend,
        tooltip: treemap_cfg.tooltip,
    })
}

fn log_area_ratios(leaves: &[LeafRect<'_>], total_weight: f64, canvas_area: f32) {
    for leaf in leaves {
        let expected = leaf.node.value.unwrap_or(0.0) / total_weight;
        let actual = f64::from(leaf.rect.area() / canvas_area);
        log::debug!(
            "area check '{}': actual {:.6} expected {:.6} (delta {:+.2e})",
            leaf.node.name,
            actual,
            expected,
            actual - expected
        );
    }
}
