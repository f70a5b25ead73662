use clap::Parser;
use hjkl_nav::core::KeyCommandRouter;
use hjkl_nav::core::config::{self, CliOverrides};
use hjkl_nav::host::SimulatedSet;
use hjkl_nav::terminal::{self, StdoutSink, TerminalSink};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hjkl-nav", about = "Vim-style navigation for a Live set")]
struct Args {
    /// Config file (defaults to ~/.hjkl-nav/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON snapshot of the set to navigate
    #[arg(short, long)]
    set: Option<PathBuf>,

    /// Beats moved per h/l press
    #[arg(long)]
    step: Option<f64>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Dispatch these keys in order and exit instead of reading the terminal
    #[arg(short, long)]
    keys: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            move_step: args.step,
            log_file: args.log_file.clone(),
        },
    );

    // Initialize file logger; status lines go to the terminal separately
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }
    resolved.log_notes();

    log::info!(
        "hjkl-nav starting up (move_step={}, zoom_factor={})",
        resolved.settings.move_step,
        resolved.settings.zoom_factor
    );

    let set = match &args.set {
        Some(path) => SimulatedSet::load(path)?,
        None => SimulatedSet::default(),
    };

    match args.keys {
        Some(keys) => {
            let mut router = KeyCommandRouter::new(set, resolved.settings).with_sink(StdoutSink);
            terminal::run_script(&mut router, &keys);
        }
        None => {
            let mut router =
                KeyCommandRouter::new(set, resolved.settings).with_sink(TerminalSink);
            router.initialize();
            router.ready();
            terminal::run(&mut router)?;
        }
    }

    Ok(())
}
