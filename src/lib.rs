//! drawables - Encode bitmaps as chained image directives
//!
//! A library for turning an image into directive chains applied to a 1×1
//! base texture, and for binding those chains into item descriptors and
//! spawn commands.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod output;
pub mod render;
pub mod types;

pub use config::Manifest;
pub use error::{DrawError, ErrorKind, Result};
pub use export::{
    render_document, spawn_command, Exporter, ExporterTemplate, ItemExporter, ItemKind,
    TemplateExporter, TemplateSet,
};
pub use render::{
    build_icon, generate, generate_image, generate_scaled, merge, merge_with, optimize, DrawMode,
    Drawable, DrawablesOutput, GenerateOptions, MergeOptions,
};
pub use types::{Colour, IgnoreColour, PixelGrid, Region};
