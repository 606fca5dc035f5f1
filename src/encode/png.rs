use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{ImageSink, image_file_name};
use crate::foundation::core::CropRect;
use crate::foundation::error::{BdnError, BdnResult};
use crate::render::frame::FrameBuffer;

/// Writes each event image as `<dir>/%08d.png`.
#[derive(Clone, Debug)]
pub struct PngDirSink {
    dir: PathBuf,
    written: usize,
}

impl PngDirSink {
    /// Create the sink, creating `dir` when missing.
    pub fn new(dir: impl Into<PathBuf>) -> BdnResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create image directory '{}'", dir.display()))
            .map_err(|e| BdnError::init(format!("{e:#}")))?;
        Ok(Self { dir, written: 0 })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of images successfully written.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Full path of the image for event `index`.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(image_file_name(index))
    }
}

impl ImageSink for PngDirSink {
    fn write_event(&mut self, index: usize, frame: &FrameBuffer, crop: CropRect) -> BdnResult<()> {
        let path = self.path_for(index);
        let rgba = frame.region_rgba8(crop);

        image::save_buffer_with_format(
            &path,
            &rgba,
            crop.width(),
            crop.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| BdnError::encode(format!("write png '{}': {e}", path.display())))?;

        self.written += 1;
        Ok(())
    }
}
