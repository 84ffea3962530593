use crate::constants::HEAT_RAMP;
use crate::pile::Pile;
use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;

/// Renders a pile as an image: one cell per pixel block, intensity
/// proportional to `255 * count / threshold`.
pub struct PngExporter {
    /// Pixels per cell edge, so small grids still produce visible images.
    scale: u32,
}

impl PngExporter {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    pub fn render(&self, pile: &Pile) -> RgbImage {
        let edge = pile.size() * self.scale;
        let mut img = ImageBuffer::new(edge, edge);
        for (x, column) in pile.counts().iter().enumerate() {
            for (y, &count) in column.iter().enumerate() {
                let color = cell_color(count, pile.threshold());
                for px in 0..self.scale {
                    for py in 0..self.scale {
                        img.put_pixel(
                            x as u32 * self.scale + px,
                            y as u32 * self.scale + py,
                            color,
                        );
                    }
                }
            }
        }
        img
    }

    /// Render and save, creating parent directories as needed.
    pub fn export<P: AsRef<Path>>(
        &self,
        pile: &Pile,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.render(pile).save(path.as_ref())?;
        Ok(())
    }
}

/// Map a grain count onto the heat ramp. Counts at or above the threshold
/// saturate at the top of the ramp.
pub fn cell_color(count: u32, threshold: u32) -> Rgb<u8> {
    let intensity = (count as u64 * 255 / threshold as u64).min(255) as usize;
    HEAT_RAMP[intensity]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coord;

    #[test]
    fn image_dimensions_follow_grid_and_scale() {
        let pile = Pile::new(10, 4).unwrap();
        let img = PngExporter::new(6).render(&pile);
        assert_eq!(img.dimensions(), (60, 60));
    }

    #[test]
    fn empty_cells_render_dark_and_full_cells_bright() {
        let mut pile = Pile::new(3, 4).unwrap();
        for _ in 0..3 {
            pile.add_grain(Coord::new(1, 1)).unwrap();
        }
        let img = PngExporter::new(1).render(&pile);

        assert_eq!(*img.get_pixel(0, 0), cell_color(0, 4));
        assert_eq!(*img.get_pixel(1, 1), cell_color(3, 4));
        let Rgb([r0, ..]) = *img.get_pixel(0, 0);
        let Rgb([r1, ..]) = *img.get_pixel(1, 1);
        assert!(r1 > r0, "fuller cells render brighter");
    }

    #[test]
    fn intensity_saturates_at_the_threshold() {
        assert_eq!(cell_color(4, 4), HEAT_RAMP[255]);
        assert_eq!(cell_color(40, 4), HEAT_RAMP[255]);
        assert_eq!(cell_color(0, 4), HEAT_RAMP[0]);
        assert_eq!(cell_color(1, 4), HEAT_RAMP[63]);
    }

    #[test]
    fn export_writes_a_png_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("pile.png");

        let pile = Pile::new(4, 4).unwrap();
        PngExporter::new(2).export(&pile, &path).expect("export png");

        let metadata = std::fs::metadata(&path).expect("file exists");
        assert!(metadata.len() > 0);
    }
}
