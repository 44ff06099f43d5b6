use std::error::Error;

use voxelprep::{PreprocessConfig, ScanPipeline};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/scan.nii.gz".into());

    let config = PreprocessConfig::default();
    let pipeline = ScanPipeline::new(&config);

    let volume = pipeline.process_file(&path)?;
    let shape = volume.shape();
    println!(
        "{path}: {}x{}x{} voxels, all intensities in [0, 1]",
        shape.width, shape.height, shape.depth
    );

    Ok(())
}
