//! Single-texture merger - collapses a directive grid into one chain.
//!
//! The merged chain starts with a canvas directive covering the whole image
//! and then draws every region on top of it. One drawable replaces one per
//! cell, at the cost of a longer chain and a bounded source span.

use crate::error::{DrawError, Result};
use crate::types::{Colour, Region};

use super::directive::{encode, Anchor, DirectiveFlags};
use super::generate::DrawablesOutput;

/// Default per-axis source span limit, in pixels.
pub const DEFAULT_MAX_SOURCE_SIZE: u32 = 64;

/// Longest chain the engine accepts, in bytes.
pub const MAX_CHAIN_LENGTH: usize = 65535;

/// Settings for [`merge_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Largest canvas width or height allowed, in pixels.
    pub max_source_size: u32,
    /// Fade regions over a transparent canvas instead of a filler.
    pub fade: bool,
    /// Hand position to anchor at; defaults to the output's own.
    pub anchor: Option<(i32, i32)>,
    pub max_chain_length: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            max_source_size: DEFAULT_MAX_SOURCE_SIZE,
            fade: false,
            anchor: None,
            max_chain_length: MAX_CHAIN_LENGTH,
        }
    }
}

/// Merge every cell of `output` into a single directive chain.
pub fn merge(output: &DrawablesOutput, max_source_size: u32, fade: bool) -> Result<String> {
    merge_with(
        output,
        &MergeOptions {
            max_source_size,
            fade,
            ..MergeOptions::default()
        },
    )
}

/// Merge with full control over anchoring and the chain limit.
pub fn merge_with(output: &DrawablesOutput, options: &MergeOptions) -> Result<String> {
    let scale = output.scale().max(1);
    let span_w = output.width() * scale;
    let span_h = output.height() * scale;
    let span = span_w.max(span_h);

    if span > options.max_source_size {
        return Err(DrawError::Capacity {
            what: "source span",
            size: span as usize,
            limit: options.max_source_size as usize,
            help: Some(format!(
                "The image draws {}x{} pixels; raise the maximum source size or use a smaller image",
                span_w, span_h
            )),
        });
    }

    let (hand_x, hand_y) = options.anchor.unwrap_or(output.hand());
    let anchor = Anchor::new(hand_x, hand_y, output.height());
    let flags = DirectiveFlags {
        fade: options.fade,
        scale,
    };

    let fill = if options.fade {
        Colour::TRANSPARENT
    } else {
        Colour::FILLER
    };
    let canvas = Region::new(0, 0, output.width(), output.height(), fill);
    let canvas_flags = DirectiveFlags {
        fade: false,
        scale,
    };

    let mut text = encode(&canvas, &anchor, canvas_flags)?.to_string();
    for directive in output.directives() {
        text.push_str(&encode(&directive.region, &anchor, flags)?.to_string());
    }

    ensure_chain_length(&text, options.max_chain_length)?;

    log::debug!(
        "merged {} directive(s) into a {} byte chain",
        output.directive_count(),
        text.len()
    );

    Ok(text)
}

/// Fail when a chain is longer than `limit` bytes.
pub fn ensure_chain_length(text: &str, limit: usize) -> Result<()> {
    if text.len() > limit {
        return Err(DrawError::Capacity {
            what: "directive chain",
            size: text.len(),
            limit,
            help: Some("Use fewer colours, a smaller image, or export per-cell drawables".to_string()),
        });
    }
    Ok(())
}
