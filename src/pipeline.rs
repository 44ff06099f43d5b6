use std::{fs, path::Path};

use ndarray::Ix3;
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};
use rand::Rng;
use tracing::{debug, info};

use crate::{
    augment::RotationAugment,
    config::PreprocessConfig,
    dataset::Sample,
    error::{Error, Result},
    frames::{load_frame_dir, Frame},
    normalize::HuNormalizer,
    resample::Resampler,
    volume::{Tensor4, Volume},
    window::{windows, WindowBound},
    Float,
};

/// Scan-side pipeline: read a NIfTI file, normalize HU intensities,
/// resample to the configured voxel grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanPipeline {
    normalizer: HuNormalizer,
    resampler: Resampler,
}

impl ScanPipeline {
    pub fn new(config: &PreprocessConfig) -> Self {
        Self {
            normalizer: HuNormalizer::new(config.clip_low, config.clip_high),
            resampler: Resampler::new(config.target_shape),
        }
    }

    /// Reads and fully preprocesses one scan. Any failure aborts the
    /// run with the offending path attached.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<Volume> {
        let path = path.as_ref();

        let object = ReaderOptions::new()
            .read_file(path)
            .map_err(|source| Error::Nifti {
                path: path.to_path_buf(),
                source,
            })?;
        let scan = object
            .into_volume()
            .into_ndarray::<Float>()
            .map_err(|source| Error::Nifti {
                path: path.to_path_buf(),
                source,
            })?;
        let scan = scan
            .into_dimensionality::<Ix3>()
            .map_err(|_| Error::NotVolume3d {
                path: path.to_path_buf(),
            })?;

        let (width, height, depth) = scan.dim();
        let mut volume = Volume::zeros(width, height, depth);
        for ((x, y, z), value) in scan.indexed_iter() {
            volume.set(x, y, z, *value);
        }
        debug!(path = %path.display(), width, height, depth, "loaded scan");

        self.process(volume)
    }

    /// Normalize-then-resample on an already-loaded volume.
    pub fn process(&self, mut volume: Volume) -> Result<Volume> {
        self.normalizer.apply(&mut volume)?;
        let volume = self.resampler.apply(&volume)?;
        info!(shape = ?volume.shape(), "scan preprocessed");
        Ok(volume)
    }
}

/// An ordered run of exactly `window_size` consecutive non-degenerate
/// frames, contiguous in time. Overlap between sequences is expected.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Frame-side pipeline: read a directory of grayscale frames, resize
/// each, and group the survivors into sliding-window sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePipeline {
    frame_width: usize,
    frame_height: usize,
    window_size: usize,
    bound: WindowBound,
}

impl FramePipeline {
    pub fn new(config: &PreprocessConfig) -> Self {
        Self {
            frame_width: config.frame_width,
            frame_height: config.frame_height,
            window_size: config.window_size,
            bound: config.window_bound,
        }
    }

    pub fn process_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<FrameSequence>> {
        let dir = dir.as_ref();
        let frames = load_frame_dir(dir, self.frame_width, self.frame_height)?;

        let sequences: Vec<FrameSequence> = windows(&frames, self.window_size, self.bound)
            .map(|window| FrameSequence {
                frames: window.to_vec(),
            })
            .collect();

        info!(
            dir = %dir.display(),
            frames = frames.len(),
            sequences = sequences.len(),
            "frame directory windowed"
        );
        Ok(sequences)
    }

    /// Writes the windowed, normalized frame data once as a single
    /// serialized array file for downstream consumption.
    pub fn write_artifact(&self, path: impl AsRef<Path>, sequences: &[FrameSequence]) -> Result<()> {
        let path = path.as_ref();
        let array = SequenceArray::stack(
            sequences,
            self.window_size,
            self.frame_width,
            self.frame_height,
        );

        let bytes = bincode::serialize(&array).map_err(|source| Error::ArtifactWrite {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, bytes).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), sequences = array.count, "artifact written");
        Ok(())
    }
}

/// The serialized artifact: raw shape plus one flat buffer, nothing
/// more. Layout is sequence-major, then frame, then row, then column.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequenceArray {
    pub count: usize,
    pub window: usize,
    pub height: usize,
    pub width: usize,
    pub data: Vec<Float>,
}

impl SequenceArray {
    fn stack(sequences: &[FrameSequence], window: usize, width: usize, height: usize) -> Self {
        let mut data = Vec::with_capacity(sequences.len() * window * width * height);
        for sequence in sequences {
            for frame in sequence.frames() {
                data.extend_from_slice(frame.data());
            }
        }
        Self {
            count: sequences.len(),
            window,
            height,
            width,
            data,
        }
    }

    /// Read-back convenience for inspecting a written artifact.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        bincode::deserialize(&bytes).map_err(|source| Error::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Train-time mapping handed to the training framework: augment, then
/// add the channel dimension. Called once per example per pass.
pub fn train_map<R: Rng + ?Sized>(
    augment: &RotationAugment,
    sample: Sample<Volume>,
    rng: &mut R,
) -> Sample<Tensor4> {
    sample.map(|volume| augment.apply(&volume, rng).into_channeled())
}

/// Validation-time mapping: add the channel dimension only.
pub fn eval_map(sample: Sample<Volume>) -> Sample<Tensor4> {
    sample.map(Volume::into_channeled)
}
