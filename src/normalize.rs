use crate::{
    error::{Error, Result},
    volume::Volume,
    Float,
};

/// Clips raw scan intensities to a Hounsfield window and rescales the
/// result linearly to [0, 1]. Values at or below `low` map to 0, values
/// at or above `high` map to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HuNormalizer {
    low: Float,
    high: Float,
}

impl Default for HuNormalizer {
    fn default() -> Self {
        // everything below -1000 HU is air, above 400 HU is bone
        Self::new(-1000.0, 400.0)
    }
}

impl HuNormalizer {
    pub fn new(low: Float, high: Float) -> Self {
        debug_assert!(low < high);
        Self { low, high }
    }

    pub fn apply(&self, volume: &mut Volume) -> Result<()> {
        if volume.is_empty() {
            return Err(Error::EmptyVolume);
        }

        let span = self.high - self.low;
        for v in &mut volume.data {
            *v = (v.clamp(self.low, self.high) - self.low) / span;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_lies_in_unit_interval() {
        let mut volume =
            Volume::from_data(1, 1, 5, vec![-2000.0, -1000.0, -300.0, 400.0, 900.0]).unwrap();
        HuNormalizer::default().apply(&mut volume).unwrap();

        for v in &volume.data {
            assert!((0.0..=1.0).contains(v));
        }
    }

    #[test]
    fn clip_bounds_map_to_interval_ends() {
        let mut volume =
            Volume::from_data(1, 1, 4, vec![-5000.0, -1000.0, 400.0, 5000.0]).unwrap();
        HuNormalizer::default().apply(&mut volume).unwrap();

        assert_eq!(volume.data[0], 0.0);
        assert_eq!(volume.data[1], 0.0);
        assert_eq!(volume.data[2], 1.0);
        assert_eq!(volume.data[3], 1.0);
    }

    #[test]
    fn idempotent_on_normalized_data_with_covering_bounds() {
        let mut volume = Volume::from_data(1, 1, 3, vec![0.0, 0.5, 1.0]).unwrap();
        let normalizer = HuNormalizer::new(0.0, 1.0);

        normalizer.apply(&mut volume).unwrap();
        let once = volume.clone();
        normalizer.apply(&mut volume).unwrap();

        assert_eq!(volume, once);
    }

    #[test]
    fn empty_volume_is_an_error() {
        let mut volume = Volume::zeros(0, 0, 0);
        let result = HuNormalizer::default().apply(&mut volume);
        assert!(matches!(result, Err(Error::EmptyVolume)));
    }
}
