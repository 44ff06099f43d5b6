use std::{
    fs,
    path::{Path, PathBuf},
};

use image::{imageops::FilterType, DynamicImage};
use tracing::debug;

use crate::{
    error::{Error, Result},
    Float,
};

/// A single grayscale frame at a fixed resolution, pixel values scaled
/// into [0, 1]. Immutable once built.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    width: usize,
    height: usize,
    data: Vec<Float>,
}

impl Frame {
    /// Converts to luma, resizes to the exact target resolution, and
    /// scales bytes into [0, 1].
    pub fn from_image(img: &DynamicImage, width: usize, height: usize) -> Self {
        let luma = img.to_luma8();
        let resized =
            image::imageops::resize(&luma, width as u32, height as u32, FilterType::Triangle);

        let data = resized
            .into_raw()
            .into_iter()
            .map(|pixel| pixel as Float / 255.0)
            .collect();

        Self {
            width,
            height,
            data,
        }
    }

    pub fn from_data(width: usize, height: usize, data: Vec<Float>) -> Result<Self> {
        if data.len() != width * height {
            return Err(Error::ShapeMismatch {
                len: data.len(),
                width,
                height,
                depth: 1,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn get(&self, x: usize, y: usize) -> Float {
        self.data[self.width * y + x]
    }

    /// A frame is degenerate when every pixel equals zero. Such frames
    /// carry no signal and poison any window containing them.
    pub fn is_degenerate(&self) -> bool {
        self.data.iter().all(|v| *v == 0.0)
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn data(&self) -> &[Float] {
        &self.data
    }
}

/// Reads every file in `dir` as a grayscale frame, in sorted filename
/// order. A file that does not decode as an image fails the whole run;
/// nothing is skipped.
pub fn load_frame_dir(dir: impl AsRef<Path>, width: usize, height: usize) -> Result<Vec<Frame>> {
    let dir = dir.as_ref();

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .map(|entry| {
            entry
                .map(|e| e.path())
                .map_err(|source| Error::Io {
                    path: dir.to_path_buf(),
                    source,
                })
        })
        .collect::<Result<_>>()?;
    paths.sort();

    let mut frames = Vec::with_capacity(paths.len());
    for path in &paths {
        let img = image::open(path).map_err(|source| Error::Image {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "loaded frame");
        frames.push(Frame::from_image(&img, width, height));
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};

    use super::*;

    #[test]
    fn from_image_resizes_and_scales_to_unit_interval() {
        let img = GrayImage::from_pixel(32, 48, Luma([255u8]));
        let frame = Frame::from_image(&DynamicImage::ImageLuma8(img), 64, 64);

        assert_eq!(frame.width(), 64);
        assert_eq!(frame.height(), 64);
        assert_eq!(frame.data().len(), 64 * 64);
        for v in frame.data() {
            assert!((v - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn degeneracy_means_every_pixel_zero() {
        let zero = Frame::from_data(4, 4, vec![0.0; 16]).unwrap();
        assert!(zero.is_degenerate());

        let mut data = vec![0.0; 16];
        data[9] = 0.001;
        let nearly = Frame::from_data(4, 4, data).unwrap();
        assert!(!nearly.is_degenerate());
    }

    #[test]
    fn load_frame_dir_reads_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();

        // written out of order on purpose; loading must sort by name
        for (name, value) in [("b.png", 200u8), ("a.png", 50u8), ("c.png", 100u8)] {
            let img = GrayImage::from_pixel(8, 8, Luma([value]));
            img.save(dir.path().join(name)).unwrap();
        }

        let frames = load_frame_dir(dir.path(), 8, 8).unwrap();
        assert_eq!(frames.len(), 3);
        assert!((frames[0].get(0, 0) - 50.0 / 255.0).abs() < 1e-6);
        assert!((frames[1].get(0, 0) - 200.0 / 255.0).abs() < 1e-6);
        assert!((frames[2].get(0, 0) - 100.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn non_image_file_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"not an image").unwrap();

        let result = load_frame_dir(dir.path(), 8, 8);
        assert!(matches!(result, Err(Error::Image { .. })));
    }
}
