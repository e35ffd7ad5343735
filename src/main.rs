use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use weatherfeed::{FeedConfig, ForecastService, Units, logging};

/// Print a short weather forecast from a feed, caching condition icons locally
#[derive(Parser, Debug)]
#[command(name = "weatherfeed", author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to <config dir>/weatherfeed/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Location code, e.g. UKXX0718_c
    #[arg(short, long)]
    location: Option<String>,

    /// Temperature units, replacing the location code's suffix
    #[arg(short, long, value_enum)]
    units: Option<Units>,

    /// Existing directory to cache icons in
    #[arg(long)]
    images_path: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn apply_overrides(&self, config: &mut FeedConfig) {
        if let Some(location) = &self.location {
            config.feed.location = location.clone();
        }
        if let Some(units) = self.units {
            config.feed.units = Some(units);
        }
        if let Some(images_path) = &self.images_path {
            config.icons.images_path = images_path.clone();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = FeedConfig::load_from_path(cli.config.clone())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    logging::init(&config.logging, cli.verbose)?;

    let mut service = ForecastService::from_config(config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = service.run(&mut out);
    out.flush()?;
    // lead with the user-facing message, keep the detail as the cause
    result.map_err(|e| {
        let message = e.user_message();
        anyhow::Error::new(e).context(message)
    })?;

    Ok(())
}
