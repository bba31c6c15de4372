//! Level simulator.
//!
//! Loads a level file, applies the requested activations, then runs the
//! tick driver so delayed work resolves. Prints the resulting HUD and media
//! state as JSON.
//!
//! ```text
//! level_sim <level.toml|level.json> [--activate UID[:on|off]]... [--ticks N] [--tick-ms MS]
//! ```

use std::path::PathBuf;

use clap::Parser;
use event_graph::LevelLogic;
use level_world::Uid;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Load a level, fire events and run the tick driver")]
struct Args {
    /// Level definition (.toml or .json).
    level: PathBuf,

    /// Activate an event by uid before ticking; `UID`, `UID:on` or `UID:off`.
    #[arg(long = "activate", value_name = "UID[:on|off]", value_parser = parse_activation)]
    activations: Vec<Activation>,

    /// Number of frames to run.
    #[arg(long, default_value_t = 10)]
    ticks: u32,

    /// Frame length in milliseconds.
    #[arg(long = "tick-ms", default_value_t = 100)]
    tick_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Activation {
    uid: Uid,
    on: bool,
}

fn parse_activation(raw: &str) -> Result<Activation, String> {
    let (uid, on) = match raw.split_once(':') {
        Some((uid, "on")) => (uid, true),
        Some((uid, "off")) => (uid, false),
        Some((_, state)) => {
            return Err(format!("activation state must be on or off, got '{state}'"))
        }
        None => (raw, true),
    };
    let uid = uid
        .parse::<i32>()
        .map_err(|err| format!("invalid uid '{uid}': {err}"))?;
    Ok(Activation { uid: Uid(uid), on })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    let mut logic = LevelLogic::load_file(&args.level)?;
    info!(level = %args.level.display(), events = logic.graph.len(), "level ready");

    for activation in &args.activations {
        logic.activate_uid(activation.uid, activation.on)?;
    }

    let mut fired = 0;
    for _ in 0..args.ticks {
        fired += logic.tick(args.tick_ms);
    }
    info!(
        ticks = args.ticks,
        now_ms = logic.world.clock.now_ms(),
        delayed_signals = fired,
        stock_invocations = logic.stock_invocations().len(),
        "simulation finished"
    );

    let summary = serde_json::json!({
        "hud": logic.world.hud,
        "media": logic.world.media,
        "settings": logic.world.settings,
        "stock": logic
            .stock_invocations()
            .iter()
            .map(|inv| serde_json::json!({ "uid": inv.uid, "kind": inv.kind.name(), "on": inv.on }))
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_activation() {
        assert_eq!(parse_activation("12"), Ok(Activation { uid: Uid(12), on: true }));
        assert_eq!(parse_activation("12:off"), Ok(Activation { uid: Uid(12), on: false }));
        assert!(parse_activation("12:maybe").is_err());
        assert!(parse_activation("door").is_err());
    }

    #[test]
    fn test_args_defaults_and_repeats() {
        let args = Args::try_parse_from([
            "level_sim",
            "level.toml",
            "--activate",
            "3",
            "--activate",
            "4:off",
            "--tick-ms",
            "16",
        ])
        .unwrap();

        assert_eq!(args.level, PathBuf::from("level.toml"));
        assert_eq!(
            args.activations,
            vec![
                Activation { uid: Uid(3), on: true },
                Activation { uid: Uid(4), on: false },
            ]
        );
        assert_eq!(args.ticks, 10);
        assert_eq!(args.tick_ms, 16);
    }

    #[test]
    fn test_args_require_level() {
        assert!(Args::try_parse_from(["level_sim"]).is_err());
        assert!(Args::try_parse_from(["level_sim", "a.toml", "--activate", "x"]).is_err());
    }
}
