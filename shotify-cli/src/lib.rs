//! # Shotify CLI
//!
//! Command-line front-end for the Shotify layout engine.
//!
//! ## Usage
//!
//! ```bash
//! shotify plan template.json --device "iPhone 6.7\"" --output plans.json
//! shotify preview template.json --device "Android Phone" --output preview.svg
//! shotify devices
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Resolved configuration the commands run against
//! - `load_document` / `build_plans` - Document loading and plan building
//! - `preview::render_svg` - SVG wireframe of an export plan

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod preview;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use shotify_core::{find_preset, preset_devices, ExportPlan, ExportSize, TemplateConfig};
use thiserror::Error;

/// Command-line arguments for shotify.
#[derive(Debug, Clone, Parser)]
#[command(name = "shotify")]
#[command(about = "Plan and preview store screenshot exports")]
#[command(version)]
pub struct CliArgs {
    /// Log output format
    #[arg(long, value_enum, env = "SHOTIFY_LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write export plans for a template or project document as JSON
    Plan {
        /// Template or project JSON file
        file: PathBuf,
        /// Only plan this export size (by name)
        #[arg(long)]
        device: Option<String>,
        /// Output file (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Render an SVG wireframe of one slide at one export size
    Preview {
        /// Template or project JSON file
        file: PathBuf,
        /// Export size to preview (by name)
        #[arg(long)]
        device: String,
        /// Slide index for devices with several slides
        #[arg(long, default_value = "0")]
        slide: usize,
        /// Output file (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the preset export sizes
    Devices {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Log output format.
    pub log_format: LogFormat,
    /// Command to run.
    pub command: Command,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            log_format: args.log_format,
            command: args.command,
        }
    }
}

/// Errors raised by CLI commands, beyond IO and parse failures.
#[derive(Debug, Error)]
pub enum CliError {
    /// The named export size is neither in the document nor a preset.
    #[error("Unknown device: {0}")]
    UnknownDevice(String),

    /// The requested slide index does not exist for the device.
    #[error("Slide {index} out of range for {device} ({count} slides)")]
    SlideOutOfRange {
        /// Device name.
        device: String,
        /// Requested index.
        index: usize,
        /// Number of slides available.
        count: usize,
    },
}

/// Load a template or project document.
///
/// Project documents parse as templates; their image list is ignored.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid document.
pub fn load_document(path: &Path) -> anyhow::Result<TemplateConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document = TemplateConfig::from_json(&json)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        layers = document.layers.len(),
        exports = document.exports.len(),
        "Loaded document"
    );
    Ok(document)
}

/// Export sizes for a document: its own list, or the presets when empty.
#[must_use]
pub fn export_sizes(document: &TemplateConfig) -> Vec<ExportSize> {
    if document.exports.is_empty() {
        tracing::info!("Document lists no export sizes, using presets");
        preset_devices()
    } else {
        document.exports.clone()
    }
}

/// Resolve a device name against the document's sizes, then the presets.
///
/// # Errors
///
/// Returns [`CliError::UnknownDevice`] if nothing matches.
pub fn resolve_device(document: &TemplateConfig, name: &str) -> Result<ExportSize, CliError> {
    export_sizes(document)
        .into_iter()
        .find(|size| size.name.eq_ignore_ascii_case(name))
        .or_else(|| find_preset(name))
        .ok_or_else(|| CliError::UnknownDevice(name.to_string()))
}

/// Build export plans for every slide at every selected export size.
///
/// # Errors
///
/// Returns an error if the device is unknown or a slide fails validation.
pub fn build_plans(
    document: &TemplateConfig,
    device: Option<&str>,
) -> anyhow::Result<Vec<ExportPlan>> {
    let sizes = match device {
        Some(name) => vec![resolve_device(document, name)?],
        None => export_sizes(document),
    };

    let mut plans = Vec::new();
    for size in &sizes {
        let slides = document
            .slides_for(size)
            .with_context(|| format!("Invalid slides for {}", size.name))?;
        plans.extend(slides.iter().map(|slide| ExportPlan::build(slide, size)));
    }
    tracing::info!(sizes = sizes.len(), plans = plans.len(), "Built export plans");
    Ok(plans)
}

/// Build the SVG preview of one slide.
///
/// # Errors
///
/// Returns an error if the device is unknown, the slide index is out of
/// range, or a slide fails validation.
pub fn build_preview(
    document: &TemplateConfig,
    device: &str,
    index: usize,
) -> anyhow::Result<String> {
    let size = resolve_device(document, device)?;
    let slides = document
        .slides_for(&size)
        .with_context(|| format!("Invalid slides for {}", size.name))?;
    let slide = slides.get(index).ok_or_else(|| CliError::SlideOutOfRange {
        device: size.name.clone(),
        index,
        count: slides.len(),
    })?;
    Ok(preview::render_svg(&ExportPlan::build(slide, &size)))
}

#[derive(Serialize)]
struct DeviceRow<'a> {
    name: &'a str,
    platform: &'a str,
    width: f64,
    height: f64,
    tablet: bool,
}

/// Format the preset list as aligned text or JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_devices(json: bool) -> anyhow::Result<String> {
    let presets = preset_devices();
    if json {
        let rows: Vec<DeviceRow<'_>> = presets
            .iter()
            .map(|size| DeviceRow {
                name: &size.name,
                platform: &size.platform,
                width: size.width,
                height: size.height,
                tablet: size.is_tablet(),
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let mut out = String::new();
    for size in &presets {
        out.push_str(&format!(
            "{:<20} {:<8} {:>5} x {:<5}\n",
            size.name, size.platform, size.width, size.height
        ));
    }
    Ok(out)
}

/// Run a command.
///
/// # Errors
///
/// Returns an error if the command fails.
pub fn run(config: &CliConfig) -> anyhow::Result<()> {
    match &config.command {
        Command::Plan {
            file,
            device,
            output,
        } => {
            let document = load_document(file)?;
            let plans = build_plans(&document, device.as_deref())?;
            let json = serde_json::to_string_pretty(&plans)?;
            write_output(output.as_deref(), &json)
        }
        Command::Preview {
            file,
            device,
            slide,
            output,
        } => {
            let document = load_document(file)?;
            let svg = build_preview(&document, device, *slide)?;
            write_output(output.as_deref(), &svg)
        }
        Command::Devices { json } => write_output(None, &format_devices(*json)?),
    }
}

fn write_output(path: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = contents.len(), "Wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            if !contents.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
