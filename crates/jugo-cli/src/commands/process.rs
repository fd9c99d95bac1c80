//! File-based metered processing command.

use crate::chain::{build_stage, parse_chain};
use clap::Args;
use jugo_effects::MeteredPipeline;
use jugo_io::{WavSpec, read_wav_stereo, write_wav_stereo};
use std::path::PathBuf;
use tracing::debug;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Effect chain spec (e.g., "material:texture=0.8|punch:punch=0.7")
    #[arg(short, long)]
    chain: String,

    /// Score sensitivity multiplier (0.5-2.0)
    #[arg(long, default_value = "1.0")]
    sensitivity: f32,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (mut samples, spec) = read_wav_stereo(&args.input)?;
    let sample_rate = spec.sample_rate as f32;
    println!(
        "  {} frames, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        samples.len() as f32 / sample_rate
    );

    let stages = parse_chain(&args.chain)?;
    if stages.is_empty() {
        anyhow::bail!("empty chain spec");
    }

    let block = args.block_size.max(1);
    let mut pipeline = MeteredPipeline::new(sample_rate);
    pipeline.set_sensitivity(args.sensitivity);
    for stage in &stages {
        debug!(id = %stage.id, params = stage.params.len(), "adding stage");
        pipeline.push(build_stage(stage, sample_rate)?);
    }
    pipeline.prepare(sample_rate, block, 2);

    println!(
        "Processing through {} stage(s): {}",
        stages.len(),
        stages
            .iter()
            .map(|s| s.id.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    );

    for (l, r) in samples
        .left
        .chunks_mut(block)
        .zip(samples.right.chunks_mut(block))
    {
        pipeline.process_block(l, Some(r));
    }

    println!();
    println!(
        "Juiciness: {:.1} -> {:.1}",
        pipeline.pre_score(),
        pipeline.post_score()
    );
    println!();
    super::analyze::print_metrics(&pipeline.metrics());

    let out_spec = WavSpec {
        channels: 2,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };
    write_wav_stereo(&args.output, &samples, out_spec)?;
    println!();
    println!("Wrote {} frames to {}", samples.len(), args.output.display());
    Ok(())
}
