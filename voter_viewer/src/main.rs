//! voter_viewer: interactive entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use voter_viewer::app::{dump_frame, run, AppConfig};
use voter_viewer::controls::KEY_LEGEND;

#[derive(Parser, Debug)]
#[command(name = "voter_viewer", version, about = "Wave party flags, jump, and pick the music")]
struct Cli {
    /// Track played while the right (red) flag is higher
    #[arg(long, value_name = "FILE")]
    track_a: Option<PathBuf>,

    /// Track played while the left (blue) flag is higher
    #[arg(long, value_name = "FILE")]
    track_b: Option<PathBuf>,

    /// Run without opening an audio device
    #[arg(long)]
    mute: bool,

    /// Print the draw calls of the first frame and exit, no window
    #[arg(long)]
    dump_frame: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger; RUST_LOG still wins when set
    let level = match (cli.verbose, cli.quiet) {
        (0, true) => "error",
        (0, false) => "info",
        (1, _) => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let cfg = AppConfig {
        mute: cli.mute || cli.dump_frame,
        ..AppConfig::default()
    }
    .with_tracks(cli.track_a, cli.track_b);

    if cli.dump_frame {
        print!("{}", dump_frame(&cfg));
        return Ok(());
    }

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Voter — Ruling Party and Opposition Party :)          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  {}", KEY_LEGEND);
    println!("  Track A: {}", cfg.playlist.track_a.display());
    println!("  Track B: {}", cfg.playlist.track_b.display());
    println!();

    run(cfg)?;
    Ok(())
}
