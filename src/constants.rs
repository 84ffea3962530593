use image::Rgb;
use once_cell::sync::Lazy;

pub const DEFAULT_SIZE: u32 = 10;
pub const DEFAULT_ITERATIONS: u32 = 1000;
pub const DEFAULT_THRESHOLD: u32 = 4;
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Frames are captured for the GIF every this many steps unless overridden.
pub const DEFAULT_VIS_FREQ: u32 = 10;

/// Progress lines per run when debug output is on (roughly one per 1%).
pub const PROGRESS_REPORTS_PER_RUN: u32 = 100;

/// Stride between derived seeds in an ensemble so runs never share a stream.
pub const ENSEMBLE_SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// 256-entry heat ramp used by the pile and chart renderers.
/// Index 0 is near-black, the top of the ramp burns out to white.
pub static HEAT_RAMP: Lazy<Vec<Rgb<u8>>> = Lazy::new(|| {
    (0..=255u32)
        .map(|i| {
            let t = i as f64 / 255.0;
            let red = (t * 2.0).min(1.0);
            let green = (t * 1.2 - 0.2).clamp(0.0, 1.0);
            let blue = (t * 2.5 - 1.5).clamp(0.0, 1.0);
            Rgb([
                (red * 255.0) as u8,
                (green * 255.0) as u8,
                (blue * 255.0) as u8,
            ])
        })
        .collect()
});

/// Grayscale global palette for GIF frames (256 gray levels, RGB triplets).
pub static GIF_GRAY_PALETTE: Lazy<Vec<u8>> = Lazy::new(|| {
    let mut palette = Vec::with_capacity(256 * 3);
    for i in 0..256 {
        let gray = i as u8;
        palette.extend_from_slice(&[gray, gray, gray]);
    }
    palette
});
