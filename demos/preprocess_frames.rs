use std::error::Error;

use voxelprep::{FramePipeline, PreprocessConfig};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let dir = args.next().unwrap_or_else(|| "data/frames".into());
    let out = args.next().unwrap_or_else(|| "sequences.bin".into());

    let config = PreprocessConfig::default();
    let pipeline = FramePipeline::new(&config);

    let sequences = pipeline.process_dir(&dir)?;
    println!(
        "{} sequences of {} frames each from {dir}",
        sequences.len(),
        config.window_size
    );

    pipeline.write_artifact(&out, &sequences)?;
    println!("artifact written to {out}");

    Ok(())
}
