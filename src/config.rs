use std::{fs, path::Path};

use crate::{
    error::{Error, Result},
    volume::Shape,
    window::WindowBound,
    Float,
};

/// Every constant the reference pipeline kept as module-level state,
/// made explicit so callers can see and override all of it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PreprocessConfig {
    /// HU clip bounds applied before rescaling to [0, 1].
    pub clip_low: Float,
    pub clip_high: Float,

    /// Voxel counts every scan is resampled to.
    pub target_shape: Shape,

    /// Resolution every frame is resized to.
    pub frame_width: usize,
    pub frame_height: usize,

    /// Sliding-window length over the frame list.
    pub window_size: usize,
    pub window_bound: WindowBound,

    /// Per-class head count that goes into the training split.
    pub train_count: usize,

    /// Candidate rotation angles for augmentation, in degrees.
    pub angles_deg: Vec<Float>,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            clip_low: -1000.0,
            clip_high: 400.0,
            target_shape: Shape::new(128, 128, 64),
            frame_width: 64,
            frame_height: 64,
            window_size: 6,
            window_bound: WindowBound::Truncated,
            train_count: 70,
            angles_deg: vec![-20.0, -10.0, -5.0, 5.0, 10.0, 20.0],
        }
    }
}

impl PreprocessConfig {
    pub fn builder() -> PreprocessConfigBuilder {
        PreprocessConfigBuilder::new()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub struct PreprocessConfigBuilder {
    config: PreprocessConfig,
}

impl PreprocessConfigBuilder {
    fn new() -> Self {
        Self {
            config: PreprocessConfig::default(),
        }
    }

    pub fn clip_bounds(mut self, low: Float, high: Float) -> Self {
        self.config.clip_low = low;
        self.config.clip_high = high;
        self
    }

    pub fn target_shape(mut self, shape: Shape) -> Self {
        self.config.target_shape = shape;
        self
    }

    pub fn frame_size(mut self, width: usize, height: usize) -> Self {
        self.config.frame_width = width;
        self.config.frame_height = height;
        self
    }

    pub fn window_size(mut self, value: usize) -> Self {
        self.config.window_size = value;
        self
    }

    pub fn window_bound(mut self, value: WindowBound) -> Self {
        self.config.window_bound = value;
        self
    }

    pub fn train_count(mut self, value: usize) -> Self {
        self.config.train_count = value;
        self
    }

    pub fn angles_deg(mut self, value: Vec<Float>) -> Self {
        self.config.angles_deg = value;
        self
    }

    pub fn build(self) -> PreprocessConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = PreprocessConfig::default();

        assert_eq!(config.clip_low, -1000.0);
        assert_eq!(config.clip_high, 400.0);
        assert_eq!(config.target_shape, Shape::new(128, 128, 64));
        assert_eq!(config.window_size, 6);
        assert_eq!(config.train_count, 70);
        assert_eq!(config.angles_deg.len(), 6);
    }

    #[test]
    fn builder_overrides_only_what_is_set() {
        let config = PreprocessConfig::builder()
            .window_size(3)
            .window_bound(WindowBound::Full)
            .build();

        assert_eq!(config.window_size, 3);
        assert_eq!(config.window_bound, WindowBound::Full);
        assert_eq!(config.clip_low, -1000.0);
    }

    #[test]
    fn json_round_trip() {
        let config = PreprocessConfig::builder().train_count(10).build();
        let text = serde_json::to_string(&config).unwrap();
        let back: PreprocessConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
