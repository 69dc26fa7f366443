//! Frame painter: turns a [`Scene`] into plotters primitives.
//!
//! Axes are drawn by hand rather than through `ChartBuilder`: the vertical
//! axis runs inverted (rank 1 on top) with integer ticks, and the horizontal
//! tick set comes from the controller's cached round layout, neither of which
//! fits the mesh configuration path.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::scene::{LinearScale, Scene};

use super::legend::{self, LegendEntry};
use super::text::estimate_text_width_px;
use super::tooltip::Tooltip;
use super::types::ChartOptions;
use super::util::{series_color, series_opacity};

const TICK_LEN: i32 = 4;
const TICK_FONT_PX: u32 = 12;
const LABEL_FONT_PX: u32 = 12;
const MARKER_RADIUS: i32 = 3;

/// Everything one paint needs besides the drawing area.
pub struct FrameSpec<'a> {
    pub scene: &'a Scene,
    pub opts: &'a ChartOptions,
    /// Full-season tick positions; only those inside the visible x domain are
    /// drawn.
    pub x_ticks: &'a [u32],
    pub highlight: Option<&'a str>,
    pub tooltip: Option<Tooltip>,
}

/// Paint one frame onto `root`: scaffold, axes, series, end labels, legend
/// band, tooltip.
pub fn draw_frame<DB>(root: &DrawingArea<DB, Shift>, spec: &FrameSpec<'_>) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let scene = spec.scene;
    let (w, h) = root.dim_in_pixel();

    let entries: Vec<LegendEntry> = scene
        .series
        .iter()
        .map(|s| LegendEntry {
            label: s.key.clone(),
            color_idx: s.color_idx,
        })
        .collect();
    let legend_h = legend::estimate_legend_height_px(&entries, w as i32);

    let (plot_area, legend_area) = if legend_h > 0 {
        let (plot, legend) = root.split_vertically(h as i32 - legend_h);
        (plot, Some(legend))
    } else {
        (root.clone(), None)
    };

    let (_, plot_h) = plot_area.dim_in_pixel();
    let m = spec.opts.margin;
    let left = m.left as i32;
    let right = w as i32 - m.right as i32;
    let top = m.top as i32;
    let bottom = plot_h as i32 - m.bottom as i32;

    let x = LinearScale::new(scene.x_domain, (left as f64, right as f64));
    let y = LinearScale::new(scene.y_domain, (bottom as f64, top as f64));

    draw_axes(&plot_area, spec, &x, &y, (left, right, top, bottom))?;
    draw_series(&plot_area, spec, &x, &y)?;

    if let Some(ref legend_area) = legend_area {
        legend::draw_legend(legend_area, &entries, spec.highlight)?;
    }

    if let Some(ref tip) = spec.tooltip {
        draw_tooltip(root, tip, w as i32, h as i32)?;
    }
    Ok(())
}

fn draw_axes<DB>(
    area: &DrawingArea<DB, Shift>,
    spec: &FrameSpec<'_>,
    x: &LinearScale,
    y: &LinearScale,
    frame: (i32, i32, i32, i32),
) -> Result<()>
where
    DB: DrawingBackend,
{
    let (left, right, top, bottom) = frame;
    let axis_style = ShapeStyle {
        color: BLACK.to_rgba(),
        filled: false,
        stroke_width: 1,
    };

    area.draw(&PathElement::new(
        vec![(left, bottom), (right, bottom)],
        axis_style,
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    area.draw(&PathElement::new(
        vec![(left, top), (left, bottom)],
        axis_style,
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let x_label_style = TextStyle::from((FontFamily::SansSerif, TICK_FONT_PX))
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    let (x0, x1) = spec.scene.x_domain;
    for &round in spec.x_ticks {
        let r = round as f64;
        if r < x0 - 0.5 || r > x1 + 0.5 {
            continue;
        }
        let px = x.apply(r).round() as i32;
        area.draw(&PathElement::new(
            vec![(px, bottom), (px, bottom + TICK_LEN)],
            axis_style,
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        area.draw(&Text::new(
            round.to_string(),
            (px, bottom + TICK_LEN + 2),
            x_label_style.clone(),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    let y_label_style = TextStyle::from((FontFamily::SansSerif, TICK_FONT_PX))
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    for pos in y_tick_positions(spec.scene.y_domain) {
        let py = y.apply(pos as f64).round() as i32;
        area.draw(&PathElement::new(
            vec![(left - TICK_LEN, py), (left, py)],
            axis_style,
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        area.draw(&Text::new(
            pos.to_string(),
            (left - TICK_LEN - 2, py),
            y_label_style.clone(),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    Ok(())
}

/// Integer rank ticks from 1 down to the season's worst position, thinned to
/// at most 10 labels.
fn y_tick_positions(y_domain: (f64, f64)) -> Vec<u32> {
    let max_pos = y_domain.0.max(y_domain.1).round() as u32;
    if max_pos == 0 {
        return Vec::new();
    }
    let step = (max_pos as usize).div_ceil(10).max(1) as u32;
    (1..=max_pos).step_by(step as usize).collect()
}

fn draw_series<DB>(
    area: &DrawingArea<DB, Shift>,
    spec: &FrameSpec<'_>,
    x: &LinearScale,
    y: &LinearScale,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let label_style_base = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
        .pos(Pos::new(HPos::Left, VPos::Center));

    for node in &spec.scene.series {
        let alpha = series_opacity(spec.highlight, &node.key);
        let color = series_color(node.color_idx).mix(alpha);

        let px_points: Vec<(i32, i32)> = node
            .points
            .iter()
            .map(|&(r, p)| (x.apply(r).round() as i32, y.apply(p).round() as i32))
            .collect();

        if px_points.len() > 1 {
            area.draw(&PathElement::new(
                px_points.clone(),
                ShapeStyle {
                    color,
                    filled: false,
                    stroke_width: 2,
                },
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
        for &pt in &px_points {
            area.draw(&Circle::new(pt, MARKER_RADIUS, color.filled()))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }

        if let Some((lr, lp)) = node.label_point(spec.scene.cutoff) {
            let lx = x.apply(lr).round() as i32 + MARKER_RADIUS + 5;
            let ly = y.apply(lp).round() as i32;
            area.draw(&Text::new(
                node.key.clone(),
                (lx, ly),
                label_style_base.clone().color(&color),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
    }
    Ok(())
}

/// Black box with white text, offset from the pointer and clamped to the
/// canvas.
fn draw_tooltip<DB>(root: &DrawingArea<DB, Shift>, tip: &Tooltip, w: i32, h: i32) -> Result<()>
where
    DB: DrawingBackend,
{
    const PAD: i32 = 6;
    const FONT_PX: u32 = 11;

    let text_w = estimate_text_width_px(&tip.text, FONT_PX) as i32;
    let box_w = text_w + 2 * PAD;
    let box_h = FONT_PX as i32 + 2 * PAD;
    let bx = (tip.x + 12).min(w - box_w).max(0);
    let by = (tip.y + 12).min(h - box_h).max(0);

    root.draw(&Rectangle::new(
        [(bx, by), (bx + box_w, by + box_h)],
        BLACK.mix(0.9).filled(),
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    root.draw(&Text::new(
        tip.text.clone(),
        (bx + PAD, by + PAD + FONT_PX as i32 / 2),
        TextStyle::from((FontFamily::SansSerif, FONT_PX))
            .color(&WHITE)
            .pos(Pos::new(HPos::Left, VPos::Center)),
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_ticks_cover_small_fields_densely() {
        assert_eq!(y_tick_positions((2.0, 1.0)), vec![1, 2]);
        assert_eq!(y_tick_positions((5.0, 1.0)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn y_ticks_thin_out_for_large_fields() {
        let ticks = y_tick_positions((20.0, 1.0));
        assert!(ticks.len() <= 10);
        assert_eq!(ticks[0], 1);
        assert_eq!(*ticks.last().unwrap(), 19);
    }

    #[test]
    fn no_ticks_for_empty_domain() {
        assert!(y_tick_positions((0.0, 0.0)).is_empty());
    }
}
