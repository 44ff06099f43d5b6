mod serde;

use crate::{error::Error, Float};

// Volume is the basic building block of all scan data in the
// preprocessing pipeline. It is essentially just a 3D volume of
// intensity values, with a width, height, and depth measured in
// voxels. Values are stored flat, row-major within each depth
// slice, so the whole volume can be handed to a framework as a
// single contiguous buffer.
#[derive(Debug, Clone, PartialEq, ::serde::Serialize)]
pub struct Volume {
    width: usize,
    height: usize,
    depth: usize,

    pub data: Vec<Float>,
}

/// Target voxel counts for a resampled [`Volume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ::serde::Serialize, ::serde::Deserialize)]
pub struct Shape {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl Shape {
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn voxels(&self) -> usize {
        self.width * self.height * self.depth
    }
}

impl Volume {
    pub fn zeros(width: usize, height: usize, depth: usize) -> Self {
        Self::with_constant(width, height, depth, 0.0)
    }

    pub fn with_constant(width: usize, height: usize, depth: usize, constant: Float) -> Self {
        let n = width * height * depth;
        Self {
            width,
            height,
            depth,
            data: vec![constant; n],
        }
    }

    /// Wraps an existing buffer. The buffer length must match the shape.
    pub fn from_data(
        width: usize,
        height: usize,
        depth: usize,
        data: Vec<Float>,
    ) -> Result<Self, Error> {
        let n = width * height * depth;
        if data.len() != n {
            return Err(Error::ShapeMismatch {
                len: data.len(),
                width,
                height,
                depth,
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            data,
        })
    }

    fn get_index(&self, x: usize, y: usize, z: usize) -> usize {
        ((self.width * y) + x) * self.depth + z
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Float {
        let index = self.get_index(x, y, z);
        self.data[index]
    }

    pub fn set(&mut self, x: usize, y: usize, z: usize, value: Float) {
        let index = self.get_index(x, y, z);
        self.data[index] = value
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.width, self.height, self.depth)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clamps every voxel into [lo, hi] in place.
    pub fn clamp(&mut self, lo: Float, hi: Float) {
        for v in &mut self.data {
            *v = v.clamp(lo, hi);
        }
    }

    /// Appends a trailing channel axis of size one. The flat buffer is
    /// unchanged, only the shape metadata grows, which is exactly what
    /// the training framework expects from its per-example mapping stage.
    pub fn into_channeled(self) -> Tensor4 {
        Tensor4 {
            width: self.width,
            height: self.height,
            depth: self.depth,
            channels: 1,
            data: self.data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn depth(&self) -> usize {
        self.depth
    }
}

// A volume with an explicit channel axis, as consumed by the training
// framework. Produced only by Volume::into_channeled, so channels is
// always one for now.
#[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
pub struct Tensor4 {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub channels: usize,
    pub data: Vec<Float>,
}
