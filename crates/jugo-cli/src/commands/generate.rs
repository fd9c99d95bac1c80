//! Test signal generation command.

use clap::{Args, Subcommand};
use jugo_core::Lcg;
use jugo_io::{WavSpec, write_wav};
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a sine tone
    Tone {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Generate an impulse
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Length in samples
        #[arg(long, default_value = "48000")]
        length: usize,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Impulse amplitude
        #[arg(long, default_value = "1.0")]
        amplitude: f32,
    },

    /// Generate white noise
    Noise {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,
    },

    /// Generate a decaying-hit drum loop, useful for exercising the
    /// transient and material effects
    Drumloop {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Hits per second
        #[arg(long, default_value = "4.0")]
        rate: f32,

        /// Duration in seconds
        #[arg(long, default_value = "4.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Tone {
            output,
            freq,
            duration,
            sample_rate,
            amplitude,
        } => {
            println!("Generating sine tone...");
            println!("  {} Hz for {:.2}s", freq, duration);

            let num_samples = (duration * sample_rate as f32) as usize;
            let samples: Vec<f32> = (0..num_samples)
                .map(|i| {
                    let t = i as f32 / sample_rate as f32;
                    (2.0 * std::f32::consts::PI * freq * t).sin() * amplitude
                })
                .collect();

            write_out(&output, &samples, sample_rate)?;
        }

        GenerateCommand::Impulse {
            output,
            length,
            sample_rate,
            amplitude,
        } => {
            println!("Generating impulse...");

            let mut samples = vec![0.0; length];
            if !samples.is_empty() {
                samples[0] = amplitude;
            }

            write_out(&output, &samples, sample_rate)?;
        }

        GenerateCommand::Noise {
            output,
            duration,
            sample_rate,
            amplitude,
        } => {
            println!("Generating white noise...");
            println!("  {:.2}s at {} Hz", duration, sample_rate);

            let mut rng = Lcg::default();
            let num_samples = (duration * sample_rate as f32) as usize;
            let samples: Vec<f32> = (0..num_samples).map(|_| rng.white() * amplitude).collect();

            write_out(&output, &samples, sample_rate)?;
        }

        GenerateCommand::Drumloop {
            output,
            rate,
            duration,
            sample_rate,
            amplitude,
        } => {
            println!("Generating drum loop...");
            println!("  {:.1} hits/s for {:.2}s", rate, duration);

            let sr = sample_rate as f32;
            let period = (sr / rate.max(0.1)) as usize;
            let num_samples = (duration * sr) as usize;
            let mut rng = Lcg::default();

            let samples: Vec<f32> = (0..num_samples)
                .map(|i| {
                    let phase = i % period.max(1);
                    let t = phase as f32 / sr;
                    // 180 Hz thump with a fast decay plus a click of noise.
                    let body = (-t * 28.0).exp()
                        * (2.0 * std::f32::consts::PI * 180.0 * t).sin();
                    let click = if phase < 64 { rng.white() * 0.3 } else { 0.0 };
                    (body + click) * amplitude
                })
                .collect();

            write_out(&output, &samples, sample_rate)?;
        }
    }

    Ok(())
}

fn write_out(output: &PathBuf, samples: &[f32], sample_rate: u32) -> anyhow::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
    };
    write_wav(output, samples, spec)?;
    println!("Wrote {} samples to {}", samples.len(), output.display());
    Ok(())
}
