//! Region optimizer - groups pixels into uniformly coloured rectangles.
//!
//! Each row is first split into maximal runs of one colour. Runs are then
//! stacked: a run with the same horizontal extent and colour as a rectangle
//! that ended on the row above grows that rectangle downward. The result is
//! not a minimum rectangle cover, but it is linear in the pixel count and
//! fully deterministic.

use std::collections::HashMap;

use crate::types::{is_skipped, Colour, IgnoreColour, PixelGrid, Rect, Region};

/// A horizontal run of one colour within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u32,
    width: u32,
    colour: Colour,
}

/// Partition every visible pixel of `grid` into regions.
pub fn optimize(grid: &PixelGrid, ignore: Option<&IgnoreColour>) -> Vec<Region> {
    optimize_within(grid, grid.bounds(), ignore)
}

/// Partition the visible pixels inside `bounds` into regions.
///
/// `bounds` is clipped to the grid. Regions are returned row-major, ties
/// broken by column and then colour.
pub fn optimize_within(
    grid: &PixelGrid,
    bounds: Rect,
    ignore: Option<&IgnoreColour>,
) -> Vec<Region> {
    let Some(bounds) = bounds.intersect(&grid.bounds()) else {
        return Vec::new();
    };

    let mut closed: Vec<Region> = Vec::new();
    // Rectangles still growing, keyed by (x, width).
    let mut open: HashMap<(u32, u32), Region> = HashMap::new();

    for y in bounds.y..bounds.bottom() {
        let runs = row_runs(grid, y, bounds.x, bounds.right(), ignore);
        let mut next: HashMap<(u32, u32), Region> = HashMap::with_capacity(runs.len());

        for run in runs {
            let key = (run.x, run.width);
            let region = match open.remove(&key) {
                Some(mut region) if region.colour == run.colour => {
                    region.height += 1;
                    region
                }
                previous => {
                    closed.extend(previous);
                    Region::new(run.x, y, run.width, 1, run.colour)
                }
            };
            next.insert(key, region);
        }

        closed.extend(open.into_values());
        open = next;
    }

    closed.extend(open.into_values());
    closed.sort_by_key(Region::order_key);
    closed
}

/// Split one row into maximal same-colour runs, breaking at skipped pixels.
fn row_runs(
    grid: &PixelGrid,
    y: u32,
    start: u32,
    end: u32,
    ignore: Option<&IgnoreColour>,
) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut current: Option<Run> = None;

    for x in start..end {
        let colour = grid.get(x, y).unwrap_or(Colour::TRANSPARENT);

        if is_skipped(colour, ignore) {
            runs.extend(current.take());
            continue;
        }

        match current.as_mut() {
            Some(run) if run.colour == colour => run.width += 1,
            _ => {
                runs.extend(current.take());
                current = Some(Run {
                    x,
                    width: 1,
                    colour,
                });
            }
        }
    }

    runs.extend(current);
    runs
}
