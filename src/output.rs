//! Framed text printout of frame buffers and grayscale export of depth buffers.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::error::{LimitError, LimitErrorKind};
use image::{GrayImage, ImageError, ImageResult, Luma};
use log::info;

use crate::render::{DepthBuffer, FrameBuffer, Pixel};

/// Prints the buffer inside a `+---+` / `|...|` border, one line per row.
impl<T: Pixel> fmt::Display for FrameBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(self.width());
        writeln!(f, "+{border}+")?;
        for row in self.rows() {
            write!(f, "|")?;
            for cell in row {
                cell.fmt_cell(f)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "+{border}+")
    }
}

impl<T: Pixel> FrameBuffer<T> {
    /// Write the framed printout to `<stem>.dat` and return the path written.
    pub fn save_framed(&self, stem: impl AsRef<Path>) -> io::Result<PathBuf> {
        let path = stem.as_ref().with_extension("dat");
        let mut out = BufWriter::new(File::create(&path)?);
        write!(out, "{self}")?;
        out.flush()?;
        info!("frame saved to {}", path.display());
        Ok(path)
    }
}

impl DepthBuffer {
    /// Grayscale view of the buffer: depth 0 is white, depth 1 and untouched
    /// cells are black.
    ///
    /// # Errors
    /// A limits error if either dimension does not fit an image's `u32` size.
    pub fn to_image(&self) -> ImageResult<GrayImage> {
        let (width, height) = image_dimensions(self.width(), self.height())?;
        let cells = self.as_slice();
        Ok(GrayImage::from_fn(width, height, |x, y| {
            let depth = cells[y as usize * self.width() + x as usize];
            let level = if depth.is_finite() {
                ((1.0 - depth.clamp(0.0, 1.0)) * 255.0).round() as u8
            } else {
                0
            };
            Luma([level])
        }))
    }

    /// Save [`to_image`](Self::to_image); the format follows the extension.
    pub fn save_image(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.to_image()?.save(path.as_ref())?;
        info!("depth image saved to {}", path.as_ref().display());
        Ok(())
    }
}

fn image_dimensions(width: usize, height: usize) -> ImageResult<(u32, u32)> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(ImageError::Limits(LimitError::from_kind(
            LimitErrorKind::DimensionError,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use crate::projection::Projection;
    use crate::render::{DepthBandShader, FlatShader};
    use crate::scene::Scene;

    fn scenario_a() -> Scene {
        Scene::from_raw(
            [[0.0, -1.0, 1.5], [1.0, 1.0, 1.5], [-1.0, 1.0, 1.5]],
            [[0, 1, 2]],
        )
    }

    fn unit() -> Projection {
        Projection::new(-1.0, 1.0, -1.0, 1.0, 1.0, 2.0).unwrap()
    }

    #[test]
    fn test_framed_printout() {
        let mut pipeline = Pipeline::<char>::new(4, 4, unit(), DepthBandShader).unwrap();
        pipeline.render(&scenario_a()).unwrap();
        assert_eq!(
            pipeline.frame_buffer().to_string(),
            "+----+\n|  6 |\n|  6 |\n| 66 |\n|6666|\n+----+\n"
        );
    }

    #[test]
    fn test_int_blank_prints_as_space() {
        let mut pipeline = Pipeline::<i32>::new(4, 4, unit(), DepthBandShader).unwrap();
        pipeline.render(&scenario_a()).unwrap();
        let text = pipeline.frame_buffer().to_string();
        assert_eq!(text.lines().nth(1), Some("|  6 |"));
    }

    #[test]
    fn test_save_framed_writes_dat_file() {
        let mut pipeline = Pipeline::new(4, 4, unit(), FlatShader::new(b'x')).unwrap();
        pipeline.render(&scenario_a()).unwrap();

        let stem = std::env::temp_dir().join(format!("zraster-frame-{}", std::process::id()));
        let path = pipeline.frame_buffer().save_framed(&stem).unwrap();
        let saved = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("dat"));
        assert_eq!(saved, pipeline.frame_buffer().to_string());
        assert!(saved.contains("|xxxx|"));
    }

    #[test]
    fn test_depth_image_levels() {
        let mut pipeline = Pipeline::<char>::new(4, 4, unit(), DepthBandShader).unwrap();
        pipeline.render(&scenario_a()).unwrap();
        let img = pipeline.depth_buffer().to_image().unwrap();

        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(img.get_pixel(0, 0).0, [0]);
        // Depth 2/3 maps to a third of full brightness.
        assert_eq!(img.get_pixel(0, 3).0, [85]);
    }

    #[test]
    fn test_image_dimensions_fit_u32() {
        assert_eq!(image_dimensions(150, 50).unwrap(), (150, 50));
        assert_eq!(
            image_dimensions(u32::MAX as usize, 1).unwrap(),
            (u32::MAX, 1)
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_oversized_image_dimensions_are_rejected() {
        let wide = u32::MAX as usize + 1;
        assert!(matches!(
            image_dimensions(wide, 4),
            Err(ImageError::Limits(_))
        ));
        assert!(image_dimensions(4, wide).is_err());
    }
}
