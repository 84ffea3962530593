use crate::stats::{Histogram, log_histogram};
use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;

const BACKGROUND: Rgb<u8> = Rgb([250, 250, 250]);
const AXIS: Rgb<u8> = Rgb([60, 60, 60]);
const BAR: Rgb<u8> = Rgb([118, 8, 170]);
const MARGIN: u32 = 12;

/// Renders a cascade-size histogram as a PNG bar chart: x axis is cascade
/// size ascending, y axis is count (or log count). Purely a consumer of
/// the histogram; the simulation core never depends on it.
pub struct ChartExporter {
    width: u32,
    height: u32,
}

impl ChartExporter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(4 * MARGIN),
            height: height.max(4 * MARGIN),
        }
    }

    pub fn render(&self, histogram: &Histogram, log_scale: bool) -> RgbImage {
        let mut img = ImageBuffer::from_pixel(self.width, self.height, BACKGROUND);
        self.draw_axes(&mut img);

        if histogram.is_empty() {
            return img;
        }

        // BTreeMap iteration already sorts cascade sizes ascending
        let values: Vec<f64> = if log_scale {
            log_histogram(histogram).values().copied().collect()
        } else {
            histogram.values().map(|&count| count as f64).collect()
        };
        let max_value = values.iter().cloned().fold(0.0f64, f64::max);
        if max_value <= 0.0 {
            return img;
        }

        let plot_w = self.width - 2 * MARGIN;
        let plot_h = self.height - 2 * MARGIN;
        let bar_w = (plot_w / values.len() as u32).max(1);

        let gap = if bar_w > 2 { 1 } else { 0 };
        for (i, value) in values.iter().enumerate() {
            let bar_h = ((value / max_value) * plot_h as f64).round() as u32;
            let x0 = MARGIN + i as u32 * bar_w;
            for x in x0..(x0 + bar_w - gap).min(self.width - 1) {
                for y in (self.height - MARGIN - bar_h)..(self.height - MARGIN) {
                    img.put_pixel(x, y, BAR);
                }
            }
        }
        img
    }

    pub fn export<P: AsRef<Path>>(
        &self,
        histogram: &Histogram,
        log_scale: bool,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.render(histogram, log_scale).save(path.as_ref())?;
        Ok(())
    }

    fn draw_axes(&self, img: &mut RgbImage) {
        for x in MARGIN..=(self.width - MARGIN) {
            img.put_pixel(x, self.height - MARGIN, AXIS);
        }
        for y in MARGIN..=(self.height - MARGIN) {
            img.put_pixel(MARGIN, y, AXIS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_histogram() -> Histogram {
        let mut h = Histogram::new();
        h.insert(0, 120);
        h.insert(1, 40);
        h.insert(5, 3);
        h
    }

    #[test]
    fn chart_has_requested_dimensions() {
        let img = ChartExporter::new(320, 200).render(&sample_histogram(), false);
        assert_eq!(img.dimensions(), (320, 200));
    }

    #[test]
    fn bars_show_up_above_the_axis() {
        let img = ChartExporter::new(320, 200).render(&sample_histogram(), false);
        let has_bar_pixels = img.pixels().any(|&p| p == BAR);
        assert!(has_bar_pixels, "expected at least one bar pixel");
    }

    #[test]
    fn empty_histogram_renders_axes_only() {
        let img = ChartExporter::new(100, 100).render(&Histogram::new(), false);
        assert!(img.pixels().all(|&p| p == BACKGROUND || p == AXIS));
    }

    #[test]
    fn log_scale_flattens_the_tallest_bar_gap() {
        let exporter = ChartExporter::new(200, 150);
        // both scales must render without panicking, including count == 1
        let mut h = Histogram::new();
        h.insert(0, 1000);
        h.insert(9, 1);
        let _ = exporter.render(&h, false);
        let _ = exporter.render(&h, true);
    }

    #[test]
    fn export_writes_a_png_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("charts").join("totals.png");

        ChartExporter::new(320, 200)
            .export(&sample_histogram(), false, &path)
            .expect("export chart");
        assert!(std::fs::metadata(&path).expect("file exists").len() > 0);
    }
}
