use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::{volume::Volume, Float};

/// Random rotation augmentation applied once per training example per
/// pass. Picks one angle uniformly from a fixed candidate set, rotates
/// every depth slice about its center with bilinear sampling (zero fill
/// outside the source), then clamps back into [0, 1].
///
/// Stateless apart from the caller-supplied random source, so repeated
/// passes over the same base volume see different rotations.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationAugment {
    angles_deg: Vec<Float>,
}

impl Default for RotationAugment {
    fn default() -> Self {
        Self::new(vec![-20.0, -10.0, -5.0, 5.0, 10.0, 20.0])
    }
}

impl RotationAugment {
    pub fn new(angles_deg: Vec<Float>) -> Self {
        debug_assert!(!angles_deg.is_empty());
        Self { angles_deg }
    }

    pub fn angles_deg(&self) -> &[Float] {
        &self.angles_deg
    }

    pub fn apply<R: Rng + ?Sized>(&self, volume: &Volume, rng: &mut R) -> Volume {
        let uniform = Uniform::new(0, self.angles_deg.len());
        let angle = self.angles_deg[uniform.sample(rng)];
        rotate(volume, angle)
    }
}

/// Rotates the volume by `angle_deg` within its first two axes and
/// clamps the result into [0, 1]. Output shape equals input shape.
pub fn rotate(volume: &Volume, angle_deg: Float) -> Volume {
    let radians = angle_deg.to_radians();
    let (sin, cos) = radians.sin_cos();

    let cx = (volume.width() as Float - 1.0) / 2.0;
    let cy = (volume.height() as Float - 1.0) / 2.0;

    let mut out = Volume::zeros(volume.width(), volume.height(), volume.depth());
    for y in 0..volume.height() {
        let dy = y as Float - cy;
        for x in 0..volume.width() {
            let dx = x as Float - cx;

            // inverse-map the output pixel back into the source slice
            let sx = cos * dx + sin * dy + cx;
            let sy = -sin * dx + cos * dy + cy;

            for z in 0..volume.depth() {
                out.set(x, y, z, sample_bilinear(volume, sx, sy, z));
            }
        }
    }

    out.clamp(0.0, 1.0);
    out
}

fn sample_bilinear(volume: &Volume, x: Float, y: Float, z: usize) -> Float {
    // zero fill outside the source slice
    if x < -1.0 || y < -1.0 || x > volume.width() as Float || y > volume.height() as Float {
        return 0.0;
    }

    let x0 = x.floor();
    let y0 = y.floor();
    let tx = x - x0;
    let ty = y - y0;

    let at = |ix: Float, iy: Float| -> Float {
        if ix < 0.0 || iy < 0.0 || ix >= volume.width() as Float || iy >= volume.height() as Float {
            0.0
        } else {
            volume.get(ix as usize, iy as usize, z)
        }
    };

    let c0 = at(x0, y0) * (1.0 - tx) + at(x0 + 1.0, y0) * tx;
    let c1 = at(x0, y0 + 1.0) * (1.0 - tx) + at(x0 + 1.0, y0 + 1.0) * tx;

    c0 * (1.0 - ty) + c1 * ty
}
