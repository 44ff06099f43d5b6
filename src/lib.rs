mod augment;
mod config;
mod dataset;
mod error;
mod frames;
mod normalize;
mod pipeline;
mod resample;
mod volume;
mod window;

pub use augment::*;
pub use config::*;
pub use dataset::*;
pub use error::*;
pub use frames::*;
pub use normalize::*;
pub use pipeline::*;
pub use resample::*;
pub use volume::*;
pub use window::*;

pub type Float = f32;
