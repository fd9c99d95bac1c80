//! Effect listing command.

use clap::Args;
use jugo_effects::{EFFECT_IDS, create_effect};

#[derive(Args)]
pub struct EffectsArgs {
    /// Show parameters for a single effect
    #[arg(value_name = "EFFECT")]
    effect: Option<String>,
}

pub fn run(args: EffectsArgs) -> anyhow::Result<()> {
    match args.effect {
        Some(id) => describe(&id),
        None => {
            println!("Available effects:");
            for id in EFFECT_IDS {
                println!("  {id}");
            }
            println!();
            println!("Run `jugo effects <EFFECT>` for parameter details.");
            Ok(())
        }
    }
}

fn describe(id: &str) -> anyhow::Result<()> {
    let effect = create_effect(id, 48000.0)
        .ok_or_else(|| anyhow::anyhow!("unknown effect '{id}' (try `jugo effects`)"))?;

    println!("{id}:");
    println!(
        "  {:<16} {:>8} {:>8} {:>8}  {}",
        "parameter", "min", "max", "default", "unit"
    );
    for i in 0..effect.param_count() {
        if let Some(desc) = effect.param_info(i) {
            let unit = if desc.stepped {
                "stepped"
            } else {
                desc.unit.suffix()
            };
            println!(
                "  {:<16} {:>8.2} {:>8.2} {:>8.2}  {}",
                desc.name, desc.min, desc.max, desc.default, unit
            );
        }
    }
    Ok(())
}
