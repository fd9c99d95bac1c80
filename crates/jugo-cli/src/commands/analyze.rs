//! Juiciness scoring command.

use clap::Args;
use jugo_analysis::{JuicinessAnalyzer, JuicinessMetrics};
use jugo_core::db_to_linear;
use jugo_io::{WavFormat, read_wav_info, read_wav_stereo};
use std::path::PathBuf;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Input trim in dB applied before analysis
    #[arg(long, default_value = "0.0")]
    trim_db: f32,

    /// Score sensitivity multiplier (0.5-2.0)
    #[arg(long, default_value = "1.0")]
    sensitivity: f32,

    /// Analysis block size
    #[arg(long, default_value = "512")]
    block_size: usize,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    println!("Analyzing {}...", args.input.display());

    let info = read_wav_info(&args.input)?;
    println!(
        "  {} ch, {} Hz, {}-bit {}, {:.2}s",
        info.channels,
        info.sample_rate,
        info.bits_per_sample,
        match info.format {
            WavFormat::Pcm => "pcm",
            WavFormat::IeeeFloat => "float",
        },
        info.duration_secs
    );

    let (mut samples, spec) = read_wav_stereo(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    let trim = db_to_linear(args.trim_db);
    if args.trim_db != 0.0 {
        for s in samples.left.iter_mut().chain(samples.right.iter_mut()) {
            *s *= trim;
        }
    }

    let sensitivity = args.sensitivity.clamp(0.5, 2.0);
    let block = args.block_size.max(1);
    let mut analyzer = JuicinessAnalyzer::new(sample_rate);
    let mut metrics = JuicinessMetrics::default();
    for (l, r) in samples
        .left
        .chunks(block)
        .zip(samples.right.chunks(block))
    {
        metrics = analyzer.analyze(l, Some(r));
    }
    metrics.score = (metrics.score * sensitivity).clamp(0.0, 100.0);

    println!();
    println!("Juiciness score: {:>6.1} / 100", metrics.score);
    println!();
    print_metrics(&metrics);
    Ok(())
}

pub fn print_metrics(m: &JuicinessMetrics) {
    println!("  {:<20} {:>6.3}", "punch", m.punch);
    println!("  {:<20} {:>6.3}", "richness", m.richness);
    println!("  {:<20} {:>6.3}", "clarity", m.clarity);
    println!("  {:<20} {:>6.3}", "width", m.width);
    println!("  {:<20} {:>6.3}", "mono safety", m.mono_safety);
    println!("  {:<20} {:>6.3}", "emphasis", m.emphasis);
    println!("  {:<20} {:>6.3}", "coherence", m.coherence);
    println!("  {:<20} {:>6.3}", "synesthesia", m.synesthesia);
    println!("  {:<20} {:>6.3}", "fatigue risk", m.fatigue_risk);
    println!("  {:<20} {:>6.3}", "repetition density", m.repetition_density);
}
