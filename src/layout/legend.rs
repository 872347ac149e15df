use crate::config::LayoutConfig;
use crate::theme::OrdinalColorScale;

use super::LegendItemLayout;

/// Lays out the legend strip below the map: one swatch per entry, wrapped
/// into rows of however many item slots fit the map width.
pub(super) fn compute_legend(
    entries: &[String],
    scale: &mut OrdinalColorScale,
    map_width: f32,
    map_height: f32,
    config: &LayoutConfig,
) -> Vec<LegendItemLayout> {
    let legend_cfg = &config.legend;
    let per_row = ((map_width / legend_cfg.item_width).floor() as usize).max(1);
    let row_height = legend_cfg.marker_size + legend_cfg.spacing;

    entries
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let row = index / per_row;
            let col = index % per_row;
            LegendItemLayout {
                x: col as f32 * legend_cfg.item_width,
                y: map_height + legend_cfg.offset_y + row as f32 * row_height,
                label: label.clone(),
                color: scale.color(label),
                marker_size: legend_cfg.marker_size,
            }
        })
        .collect()
}

/// Total height the legend strip adds below the map.
pub(super) fn legend_height(item_count: usize, map_width: f32, config: &LayoutConfig) -> f32 {
    if item_count == 0 {
        return 0.0;
    }
    let legend_cfg = &config.legend;
    let per_row = ((map_width / legend_cfg.item_width).floor() as usize).max(1);
    let rows = item_count.div_ceil(per_row);
    let row_height = legend_cfg.marker_size + legend_cfg.spacing;
    legend_cfg.offset_y + rows as f32 * row_height
}
