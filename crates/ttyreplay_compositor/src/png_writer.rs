//! Serializes a composed bitmap as an 8-bit RGB PNG.
//!
//! Per §5's cancellation contract, a partially-written tile-set must never
//! be left half-written as a named output file: encode into a `.tmp`
//! sibling and rename it into place only once encoding succeeds.

use std::io::BufWriter;
use std::path::Path;

use image::RgbImage;
use png::{BitDepth, ColorType, Encoder};

use crate::error::Result;

/// Writes `image` to `path` as a non-interlaced 8-bit RGB PNG, via a
/// same-directory temporary file that is renamed into place on success.
pub fn write_png(image: &RgbImage, path: &Path) -> Result<()> {
    let tmp_path = path.with_extension("png.tmp");

    {
        let file = std::fs::File::create(&tmp_path)?;
        let writer = BufWriter::new(file);
        let mut encoder = Encoder::new(writer, image.width(), image.height());
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.as_raw())?;
        writer.finish()?;
    }

    std::fs::rename(&tmp_path, path)?;
    Ok(())
}
