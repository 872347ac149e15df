use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// JSON mirror of a computed layout, for debugging and golden comparisons.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub map_width: f32,
    pub map_height: f32,
    pub leaves: Vec<LeafDump>,
    pub legend: Vec<LegendDump>,
}

#[derive(Debug, Serialize)]
pub struct LeafDump {
    pub name: String,
    pub category: Option<String>,
    pub value: f64,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub color: String,
    pub label_lines: Vec<String>,
    pub font_size: f32,
}

#[derive(Debug, Serialize)]
pub struct LegendDump {
    pub label: String,
    pub color: String,
    pub x: f32,
    pub y: f32,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let leaves = layout
            .leaves
            .iter()
            .map(|leaf| LeafDump {
                name: leaf.name.clone(),
                category: leaf.category.clone(),
                value: leaf.value,
                x0: leaf.rect.x0,
                y0: leaf.rect.y0,
                x1: leaf.rect.x1,
                y1: leaf.rect.y1,
                color: leaf.color.clone(),
                label_lines: leaf.label.lines.clone(),
                font_size: leaf.label.font_size,
            })
            .collect();

        let legend = layout
            .legend
            .iter()
            .map(|item| LegendDump {
                label: item.label.clone(),
                color: item.color.clone(),
                x: item.x,
                y: item.y,
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            map_width: layout.map_width,
            map_height: layout.map_height,
            leaves,
            legend,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
