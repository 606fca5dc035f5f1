use crate::foundation::core::CropRect;
use crate::foundation::error::BdnResult;
use crate::render::frame::FrameBuffer;

/// File name of the image for event `index`.
///
/// The BDN manifest references images by this exact name.
pub fn image_file_name(index: usize) -> String {
    format!("{index:08}.png")
}

/// Consumer of event images.
///
/// `write_event` is called once per new event, in increasing index order, while the frame still
/// holds the composited pixels. Errors should be [`crate::BdnError::Encode`]; the sampler logs
/// them and continues.
pub trait ImageSink {
    /// Store the `crop` region of `frame` as the image for event `index`.
    fn write_event(&mut self, index: usize, frame: &FrameBuffer, crop: CropRect) -> BdnResult<()>;
}

/// One image captured by [`InMemoryImageSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedImage {
    /// Event index.
    pub index: usize,
    /// Region the pixels were cut from.
    pub crop: CropRect,
    /// Tightly packed straight-alpha RGBA8.
    pub rgba: Vec<u8>,
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryImageSink {
    pub(crate) images: Vec<CapturedImage>,
}

impl InMemoryImageSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured images.
    pub fn images(&self) -> &[CapturedImage] {
        &self.images
    }
}

impl ImageSink for InMemoryImageSink {
    fn write_event(&mut self, index: usize, frame: &FrameBuffer, crop: CropRect) -> BdnResult<()> {
        self.images.push(CapturedImage {
            index,
            crop,
            rgba: frame.region_rgba8(crop),
        });
        Ok(())
    }
}
