//! Legend band layout and drawing below the plot area.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_text_width_px, truncate_to_width};
use super::util::{legend_opacity, series_color};

const FONT_PX: u32 = 13;
const LINE_H: i32 = FONT_PX as i32 + 6;
const PAD: i32 = 8;
const SWATCH: i32 = 10;
const SWATCH_GAP: i32 = 6;
const TRAILING_GAP: i32 = 14;

/// One legend row: entity label plus its palette slot.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color_idx: usize,
}

fn block_width(label: &str) -> i32 {
    SWATCH + SWATCH_GAP + estimate_text_width_px(label, FONT_PX) as i32 + TRAILING_GAP
}

/// Flow the entries into rows and return the band height needed, in pixels.
/// Zero when there is nothing to show.
pub fn estimate_legend_height_px(entries: &[LegendEntry], total_w: i32) -> i32 {
    if entries.is_empty() {
        return 0;
    }
    let usable = (total_w - 2 * PAD).max(SWATCH + SWATCH_GAP + TRAILING_GAP);
    let mut rows = 1;
    let mut x = 0;
    for e in entries {
        let w = block_width(&e.label).min(usable);
        if x > 0 && x + w > usable {
            rows += 1;
            x = 0;
        }
        x += w;
    }
    rows * LINE_H + 2 * PAD
}

/// Draw the legend band: a color swatch plus label per entry, flowed into
/// rows, with the highlight policy applied to entry opacity.
pub fn draw_legend<DB>(
    area: &DrawingArea<DB, Shift>,
    entries: &[LegendEntry],
    highlight: Option<&str>,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let (w, _h) = area.dim_in_pixel();
    let usable = (w as i32 - 2 * PAD).max(SWATCH + SWATCH_GAP + TRAILING_GAP);

    let mut x = PAD;
    let mut y = PAD;
    for entry in entries {
        let label = truncate_to_width(&entry.label, FONT_PX, (usable - SWATCH - SWATCH_GAP) as u32);
        let bw = block_width(&label).min(usable);
        if x > PAD && x - PAD + bw > usable {
            x = PAD;
            y += LINE_H;
        }

        let alpha = legend_opacity(highlight, &entry.label);
        let color = series_color(entry.color_idx).mix(alpha);

        let sw_top = y + (LINE_H - SWATCH) / 2;
        area.draw(&Rectangle::new(
            [(x, sw_top), (x + SWATCH, sw_top + SWATCH)],
            color.filled(),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let label_color = BLACK.mix(alpha);
        let text_style = TextStyle::from((FontFamily::SansSerif, FONT_PX))
            .color(&label_color)
            .pos(Pos::new(HPos::Left, VPos::Center));
        area.draw(&Text::new(
            label,
            (x + SWATCH + SWATCH_GAP, y + LINE_H / 2),
            text_style,
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        x += bw;
    }
    Ok(())
}
