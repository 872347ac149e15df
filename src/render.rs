use crate::config::RenderConfig;
use crate::layout::{Layout, LeafLayout, line_offset};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(layout: &Layout, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for leaf in &layout.leaves {
        svg.push_str(&leaf_svg(leaf, layout.tooltip, theme));
    }

    if !layout.legend.is_empty() {
        svg.push_str("<g class=\"legend\">");
        for item in &layout.legend {
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
                item.x, item.y, item.marker_size, item.marker_size, item.color
            ));
            let text_x = item.x + item.marker_size + 6.0;
            let text_y = item.y + item.marker_size * 0.75;
            svg.push_str(&format!(
                "<text x=\"{text_x:.2}\" y=\"{text_y:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                theme.font_family,
                theme.font_size,
                theme.legend_text_color,
                escape_xml(&item.label)
            ));
        }
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

fn leaf_svg(leaf: &LeafLayout, tooltip: bool, theme: &Theme) -> String {
    let rect = leaf.rect;
    let width = rect.width();
    let height = rect.height();
    let mut out = String::new();

    out.push_str(&format!(
        "<g transform=\"translate({:.2},{:.2})\">",
        rect.x0, rect.y0
    ));
    if tooltip {
        out.push_str(&format!(
            "<title>{}: {}</title>",
            escape_xml(&leaf.name),
            format_value(leaf.value)
        ));
    }
    out.push_str(&format!(
        "<rect width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
        width, height, leaf.color
    ));

    out.push_str(&format!(
        "<text text-anchor=\"middle\" dominant-baseline=\"middle\" font-family=\"{}\" font-size=\"{:.3}\" fill=\"{}\">",
        theme.font_family, leaf.label.font_size, theme.label_color
    ));
    let center_x = width / 2.0;
    for (index, line) in leaf.label.lines.iter().enumerate() {
        let y = line_offset(&leaf.label, index, height);
        out.push_str(&format!(
            "<tspan x=\"{center_x:.2}\" y=\"{y:.2}\">{}</tspan>",
            escape_xml(line)
        ));
    }
    out.push_str("</text>");

    out.push_str("</g>");
    out
}

/// Tooltip number formatting: round to two decimals, drop them when the
/// value is whole (revenue datasets are integral).
fn format_value(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if (rounded - rounded.round()).abs() < 0.001 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.2}", rounded)
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme.font_family.clone();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(
    _svg: &str,
    _output: &Path,
    _render_cfg: &RenderConfig,
    _theme: &Theme,
) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the 'png' feature"
    ))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::Node;
    use crate::layout::compute_layout;

    fn sample_layout(config: &LayoutConfig) -> Layout {
        let tree = Node::internal(
            "Movies",
            vec![
                Node::internal(
                    "Action",
                    vec![Node::leaf("Mad Max & Furiosa", "Action", 300.0)],
                ),
                Node::internal("Drama", vec![Node::leaf("Up", "Drama", 100.0)]),
            ],
        );
        compute_layout(&tree, &Theme::classic(), config).unwrap()
    }

    #[test]
    fn render_svg_basic() {
        let layout = sample_layout(&LayoutConfig::default());
        let svg = render_svg(&layout, &Theme::classic());
        assert!(svg.contains("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("translate("));
        assert!(svg.contains("<tspan"));
    }

    #[test]
    fn tooltip_titles_follow_the_toggle() {
        let mut config = LayoutConfig::default();
        let svg = render_svg(&sample_layout(&config), &Theme::classic());
        assert!(svg.contains("<title>Mad Max &amp; Furiosa: 300</title>"));

        config.treemap.tooltip = false;
        let svg = render_svg(&sample_layout(&config), &Theme::classic());
        assert!(!svg.contains("<title>"));
    }

    #[test]
    fn legend_follows_the_toggle() {
        let mut config = LayoutConfig::default();
        let svg = render_svg(&sample_layout(&config), &Theme::classic());
        assert!(svg.contains("class=\"legend\""));
        assert!(svg.contains(">Action</text>"));

        config.treemap.legend = false;
        let svg = render_svg(&sample_layout(&config), &Theme::classic());
        assert!(!svg.contains("class=\"legend\""));
    }

    #[test]
    fn names_are_xml_escaped() {
        let svg = render_svg(&sample_layout(&LayoutConfig::default()), &Theme::classic());
        assert!(svg.contains("Mad Max &amp;"));
        assert!(!svg.contains("Max & Furiosa"));
    }

    #[test]
    fn format_value_drops_trailing_zeroes() {
        assert_eq!(format_value(936662225.0), "936662225");
        assert_eq!(format_value(12.5), "12.50");
        assert_eq!(format_value(12.004), "12");
    }
}
