use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreemapConfig {
    pub width: f32,
    pub height: f32,
    /// Gap inserted between adjacent sibling rectangles. Interior edges
    /// only; the canvas boundary is never inset.
    pub padding: f32,
    /// Feature toggles that used to be separate chart variants.
    pub legend: bool,
    pub tooltip: bool,
    /// Log actual vs expected area ratios per leaf at debug level.
    pub verify_areas: bool,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 600.0,
            padding: 1.0,
            legend: true,
            tooltip: true,
            verify_areas: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendConfig {
    pub marker_size: f32,
    pub spacing: f32,
    /// Horizontal slot reserved per legend entry.
    pub item_width: f32,
    /// Vertical gap between the map and the legend strip.
    pub offset_y: f32,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            marker_size: 14.0,
            spacing: 8.0,
            item_width: 150.0,
            offset_y: 16.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LayoutConfig {
    pub treemap: TreemapConfig,
    pub legend: LegendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    label_color: Option<String>,
    legend_text_color: Option<String>,
    border_color: Option<String>,
    category_colors: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreemapConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    legend: Option<bool>,
    tooltip: Option<bool>,
    verify_areas: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegendConfigFile {
    marker_size: Option<f32>,
    spacing: Option<f32>,
    item_width: Option<f32>,
    offset_y: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    treemap: Option<TreemapConfigFile>,
    legend: Option<LegendConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = match serde_json::from_str(&contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(&contents)
            .map_err(|_| anyhow::anyhow!("invalid config file: {json_err}"))?,
    };

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.label_color {
            config.theme.label_color = v;
        }
        if let Some(v) = vars.legend_text_color {
            config.theme.legend_text_color = v;
        }
        if let Some(v) = vars.border_color {
            config.theme.border_color = v;
        }
        if let Some(v) = vars.category_colors {
            if !v.is_empty() {
                config.theme.category_colors = v;
            }
        }
    }

    if let Some(treemap) = parsed.treemap {
        if let Some(v) = treemap.width {
            config.layout.treemap.width = v;
        }
        if let Some(v) = treemap.height {
            config.layout.treemap.height = v;
        }
        if let Some(v) = treemap.padding {
            config.layout.treemap.padding = v;
        }
        if let Some(v) = treemap.legend {
            config.layout.treemap.legend = v;
        }
        if let Some(v) = treemap.tooltip {
            config.layout.treemap.tooltip = v;
        }
        if let Some(v) = treemap.verify_areas {
            config.layout.treemap.verify_areas = v;
        }
        config.render.width = config.layout.treemap.width;
        config.render.height = config.layout.treemap.height;
    }

    if let Some(legend) = parsed.legend {
        if let Some(v) = legend.marker_size {
            config.layout.legend.marker_size = v;
        }
        if let Some(v) = legend.spacing {
            config.layout.legend.spacing = v;
        }
        if let Some(v) = legend.item_width {
            config.layout.legend.item_width = v;
        }
        if let Some(v) = legend.offset_y {
            config.layout.legend.offset_y = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("treemap-config-{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout.treemap.width, 1100.0);
        assert!(config.layout.treemap.legend);
        assert!(!config.layout.treemap.verify_areas);
    }

    #[test]
    fn file_overrides_merge_over_defaults() {
        let path = write_temp(
            r##"{
                "theme": "modern",
                "themeVariables": {"labelColor": "#000000"},
                "treemap": {"width": 800, "padding": 0, "verifyAreas": true},
                "legend": {"itemWidth": 120}
            }"##,
        );
        let config = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.theme.label_color, "#000000");
        assert_eq!(config.layout.treemap.width, 800.0);
        assert_eq!(config.layout.treemap.padding, 0.0);
        assert!(config.layout.treemap.verify_areas);
        assert_eq!(config.layout.legend.item_width, 120.0);
        // Untouched fields keep their defaults.
        assert_eq!(config.layout.treemap.height, 600.0);
        assert!(config.layout.treemap.tooltip);
    }
}
