#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use ir::Node;
pub use layout::{LabelPlan, Layout, LayoutError, Rect, compute_layout, partition, place_label};
pub use parser::{DatasetError, parse_dataset};
pub use render::render_svg;
pub use theme::Theme;
