use crate::constants::GIF_GRAY_PALETTE;
use crate::pile::Pile;
use crate::png_exporter::PngExporter;
use gif::{Encoder, Frame, Repeat};
use std::fs::File;
use std::path::Path;

/// Streams pile snapshots into an animated GIF, one frame at a time, so
/// memory use stays flat no matter how long the run is. The file is
/// finalized when the recorder is dropped.
pub struct GifRecorder {
    encoder: Encoder<File>,
    renderer: PngExporter,
    edge: u16,
}

impl GifRecorder {
    pub fn create<P: AsRef<Path>>(
        path: P,
        grid_size: u32,
        scale: u32,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let edge_px = u64::from(grid_size) * u64::from(scale.max(1));
        let edge = u16::try_from(edge_px).map_err(|_| {
            format!(
                "GIF frame edge of {} pixels exceeds the format limit of {}",
                edge_px,
                u16::MAX
            )
        })?;
        let file = File::create(path)?;
        let mut encoder = Encoder::new(file, edge, edge, &GIF_GRAY_PALETTE)?;
        encoder.set_repeat(Repeat::Infinite)?;
        Ok(Self {
            encoder,
            renderer: PngExporter::new(scale),
            edge,
        })
    }

    /// Append the pile's current state as one frame.
    pub fn record_frame(&mut self, pile: &Pile) -> Result<(), Box<dyn std::error::Error>> {
        let image = self.renderer.render(pile);

        // quantize to the grayscale global palette
        let indexed: Vec<u8> = image
            .pixels()
            .map(|pixel| {
                let [r, g, b] = pixel.0;
                (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) as u8
            })
            .collect();

        let mut frame = Frame::from_indexed_pixels(self.edge, self.edge, &*indexed, None);
        frame.delay = 20; // 0.2 seconds per frame
        self.encoder.write_frame(&frame)?;
        Ok(())
    }
}
