//! Length-by-accession chart. Rows are sorted by length descending for
//! display only; the exported table keeps its input order.

use crate::length_report::LengthRow;
use anyhow::{Result, anyhow};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Line, Path, Rectangle, Text};

const W: f32 = 1200.0;
const H: f32 = 700.0;
const MARGIN_LEFT: f32 = 70.0;
const MARGIN_RIGHT: f32 = 30.0;
const MARGIN_TOP: f32 = 50.0;
const MARGIN_BOTTOM: f32 = 150.0;
const MARKER_RADIUS: f32 = 3.0;
const Y_TICKS: usize = 5;

fn length_to_y(length: u64, max_length: u64) -> f32 {
    let frac = length as f32 / max_length as f32;
    MARGIN_TOP + (H - MARGIN_TOP - MARGIN_BOTTOM) * (1.0 - frac)
}

fn slot_to_x(idx: usize, slots: usize) -> f32 {
    let step = (W - MARGIN_LEFT - MARGIN_RIGHT) / slots.max(1) as f32;
    MARGIN_LEFT + (idx as f32 + 0.5) * step
}

pub fn length_plot_svg(rows: &[LengthRow]) -> String {
    let mut sorted: Vec<&LengthRow> = rows.iter().collect();
    sorted.sort_by(|a, b| b.length.cmp(&a.length));
    let max_length = sorted.iter().map(|row| row.length).max().unwrap_or(0).max(1);

    let baseline = H - MARGIN_BOTTOM;
    let mut doc = Document::new()
        .set("viewBox", (0, 0, W, H))
        .set("width", W)
        .set("height", H)
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", W)
                .set("height", H)
                .set("fill", "#ffffff"),
        );

    doc = doc.add(
        Text::new("Sequence Lengths by Accession")
            .set("x", W / 2.0)
            .set("y", 28)
            .set("text-anchor", "middle")
            .set("font-family", "monospace")
            .set("font-size", 16)
            .set("fill", "#111111"),
    );

    for tick in 0..=Y_TICKS {
        let value = max_length as f32 * tick as f32 / Y_TICKS as f32;
        let y = length_to_y(value.round() as u64, max_length);
        doc = doc
            .add(
                Line::new()
                    .set("x1", MARGIN_LEFT - 4.0)
                    .set("y1", y)
                    .set("x2", W - MARGIN_RIGHT)
                    .set("y2", y)
                    .set("stroke", if tick == 0 { "#000000" } else { "#dddddd" })
                    .set("stroke-width", 1),
            )
            .add(
                Text::new(format!("{}", value.round() as u64))
                    .set("x", MARGIN_LEFT - 8.0)
                    .set("y", y + 3.0)
                    .set("text-anchor", "end")
                    .set("font-family", "monospace")
                    .set("font-size", 10)
                    .set("fill", "#444444"),
            );
    }

    doc = doc.add(
        Line::new()
            .set("x1", MARGIN_LEFT)
            .set("y1", MARGIN_TOP)
            .set("x2", MARGIN_LEFT)
            .set("y2", baseline)
            .set("stroke", "#000000")
            .set("stroke-width", 1),
    );

    let mut line_data = Data::new();
    for (idx, row) in sorted.iter().enumerate() {
        let x = slot_to_x(idx, sorted.len());
        let y = length_to_y(row.length, max_length);
        line_data = if idx == 0 {
            line_data.move_to((x, y))
        } else {
            line_data.line_to((x, y))
        };
    }
    if sorted.len() > 1 {
        doc = doc.add(
            Path::new()
                .set("d", line_data)
                .set("fill", "none")
                .set("stroke", "#1f4fcc")
                .set("stroke-width", 1.5),
        );
    }

    for (idx, row) in sorted.iter().enumerate() {
        let x = slot_to_x(idx, sorted.len());
        let y = length_to_y(row.length, max_length);
        doc = doc.add(
            Circle::new()
                .set("cx", x)
                .set("cy", y)
                .set("r", MARKER_RADIUS)
                .set("fill", "#1f4fcc"),
        );
        // Accession labels read upwards, matching a 90-degree tick rotation.
        let label_y = baseline + 8.0;
        doc = doc.add(
            Text::new(row.accession.clone())
                .set("x", x)
                .set("y", label_y)
                .set("text-anchor", "end")
                .set("transform", format!("rotate(-90 {x:.1} {label_y:.1})"))
                .set("font-family", "monospace")
                .set("font-size", 9)
                .set("fill", "#111111"),
        );
    }

    doc = doc
        .add(
            Text::new("GenBank Accession")
                .set("x", MARGIN_LEFT + (W - MARGIN_LEFT - MARGIN_RIGHT) / 2.0)
                .set("y", H - 12.0)
                .set("text-anchor", "middle")
                .set("font-family", "monospace")
                .set("font-size", 12)
                .set("fill", "#111111"),
        )
        .add(
            Text::new("Sequence Length")
                .set("x", 18)
                .set("y", MARGIN_TOP + (H - MARGIN_TOP - MARGIN_BOTTOM) / 2.0)
                .set("text-anchor", "middle")
                .set(
                    "transform",
                    format!(
                        "rotate(-90 18 {:.1})",
                        MARGIN_TOP + (H - MARGIN_TOP - MARGIN_BOTTOM) / 2.0
                    ),
                )
                .set("font-family", "monospace")
                .set("font-size", 12)
                .set("fill", "#111111"),
        );

    doc.to_string()
}

/// Renders the chart and rasterizes it to a PNG file.
pub fn save_length_plot_png(rows: &[LengthRow], path: &std::path::Path) -> Result<()> {
    let svg_text = length_plot_svg(rows);
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = resvg::usvg::Tree::from_str(&svg_text, &options)
        .map_err(|e| anyhow!("Could not parse plot SVG: {e}"))?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow!("Could not allocate a {}x{} pixmap", size.width(), size.height()))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );
    pixmap
        .save_png(path)
        .map_err(|e| anyhow!("Could not write plot PNG '{}': {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn toy_rows() -> Vec<LengthRow> {
        [(120u64, "AB000120.1"), (50, "AB000050.1"), (300, "AB000300.1")]
            .iter()
            .map(|(length, accession)| LengthRow {
                accession: accession.to_string(),
                length: *length,
                description: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_plot_orders_by_length_descending() {
        let svg_text = length_plot_svg(&toy_rows());
        let idx_300 = svg_text.find("AB000300.1").expect("300 bp label");
        let idx_120 = svg_text.find("AB000120.1").expect("120 bp label");
        let idx_50 = svg_text.find("AB000050.1").expect("50 bp label");
        assert!(idx_300 < idx_120 && idx_120 < idx_50);
    }

    #[test]
    fn test_plot_does_not_mutate_rows() {
        let rows = toy_rows();
        let before = rows.clone();
        let _ = length_plot_svg(&rows);
        assert_eq!(rows, before);
    }

    #[test]
    fn test_empty_table_still_renders() {
        let svg_text = length_plot_svg(&[]);
        assert!(svg_text.contains("Sequence Lengths by Accession"));
    }

    #[test]
    fn test_save_length_plot_png() {
        let td = tempdir().unwrap();
        let path = td.path().join("plot.png");
        save_length_plot_png(&toy_rows(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }
}
