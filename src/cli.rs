use crate::config::load_config;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_dataset;
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "tmr", version, about = "Treemap chart renderer in Rust")]
pub struct Args {
    /// Input dataset (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, treemap and legend sections)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width, overrides the config file
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Canvas height, overrides the config file
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Gap between adjacent tiles, overrides the config file
    #[arg(long = "padding")]
    pub padding: Option<f32>,

    /// Skip the legend strip
    #[arg(long = "no-legend")]
    pub no_legend: bool,

    /// Skip the per-tile tooltips
    #[arg(long = "no-tooltip")]
    pub no_tooltip: bool,

    /// Log actual vs expected tile area ratios (debug level)
    #[arg(long = "verify-areas")]
    pub verify_areas: bool,

    /// Write the computed layout as JSON to this path
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;

    if let Some(width) = args.width {
        config.layout.treemap.width = width;
    }
    if let Some(height) = args.height {
        config.layout.treemap.height = height;
    }
    if let Some(padding) = args.padding {
        config.layout.treemap.padding = padding;
    }
    if args.no_legend {
        config.layout.treemap.legend = false;
    }
    if args.no_tooltip {
        config.layout.treemap.tooltip = false;
    }
    if args.verify_areas {
        config.layout.treemap.verify_areas = true;
    }

    let input = read_input(args.input.as_deref())?;
    let tree = match parse_dataset(&input) {
        Ok(tree) => tree,
        Err(err) => {
            // Load failures leave the view empty: log, write nothing.
            log::error!("failed to load dataset: {err}");
            return Err(err.into());
        }
    };

    let layout = compute_layout(&tree, &config.theme, &config.layout)?;
    config.render.width = layout.width;
    config.render.height = layout.height;

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout)?;
    }

    let svg = render_svg(&layout, &config.theme);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.render, &config.theme)?;
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
