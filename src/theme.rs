use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub label_color: String,
    pub legend_text_color: String,
    pub border_color: String,
    pub category_colors: Vec<String>,
}

impl Theme {
    /// The look of the original chart: d3's schemeCategory10 palette with
    /// white tile labels.
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 12.0,
            background: "#FFFFFF".to_string(),
            label_color: "#FFFFFF".to_string(),
            legend_text_color: "#333333".to_string(),
            border_color: "#000000".to_string(),
            category_colors: to_owned(&[
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
                "#7f7f7f", "#bcbd22", "#17becf",
            ]),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            background: "#FFFFFF".to_string(),
            label_color: "#FFFFFF".to_string(),
            legend_text_color: "#1C2430".to_string(),
            border_color: "#C7D2E5".to_string(),
            category_colors: to_owned(&[
                "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1",
                "#ff9da7", "#9c755f", "#bab0ab",
            ]),
        }
    }
}

fn to_owned(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| c.to_string()).collect()
}

/// Ordinal palette assignment: every distinct key gets the next palette
/// color the first time it is seen, and the same color ever after. The
/// palette wraps around when exhausted.
#[derive(Debug, Clone)]
pub struct OrdinalColorScale {
    palette: Vec<String>,
    assigned: HashMap<String, String>,
    next: usize,
}

impl OrdinalColorScale {
    pub fn new(palette: Vec<String>) -> Self {
        Self {
            palette,
            assigned: HashMap::new(),
            next: 0,
        }
    }

    /// Pre-assigns colors to `keys` in order, pinning the domain the way
    /// the original seeds its scale with the top-level genre names.
    pub fn seed<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        for key in keys {
            self.color(key);
        }
    }

    pub fn color(&mut self, key: &str) -> String {
        if let Some(color) = self.assigned.get(key) {
            return color.clone();
        }
        let color = self.palette[self.next % self.palette.len()].clone();
        self.next += 1;
        self.assigned.insert(key.to_string(), color.clone());
        color
    }
}
