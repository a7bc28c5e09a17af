//! Frame type produced by a capture source.

use image::RgbaImage;

/// One decoded video frame.
///
/// The session clones the frame once per loop iteration before handing it
/// to the plugin update pass, so plugins can mutate pixels freely without
/// touching the capture source's buffer.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Zero-based frame index within the recording.
    pub index: usize,
    /// Recording-relative timestamp in seconds.
    pub timestamp: f64,
    /// Pixel buffer.
    pub img: RgbaImage,
}

impl Frame {
    /// Create a new frame.
    pub fn new(index: usize, timestamp: f64, img: RgbaImage) -> Self {
        Self {
            index,
            timestamp,
            img,
        }
    }

    /// Image size as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.img.width(), self.img.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_is_independent() {
        let mut frame = Frame::new(0, 0.0, RgbaImage::new(4, 4));
        let copy = frame.clone();

        frame.img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));

        assert_eq!(copy.img.get_pixel(0, 0), &image::Rgba([0, 0, 0, 0]));
        assert_eq!(copy.size(), (4, 4));
    }
}
