use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use spdlog::{info, warn};

use penned::builder::{build_site, BuildOptions};
use penned::config::Config;
use penned::logger::configure_logger;
use penned::server::server_run;
use penned::website::Website;

use crate::config::{open_config, sample_config_path};
use crate::config_data::write_sample_cfg;

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "penned.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve blog and notes over HTTP
    Serve,
    /// Render the site into the output directory
    Build {
        /// Do not render the OG image of each entry
        #[arg(long)]
        skip_og: bool,
    },
    /// Write a sample configuration file
    Init,
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let config = open_config(config_path)
        .map_err(|err| anyhow!("{}\nPlease run penned --help", err))?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }
    Ok(config)
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    match args.command {
        Command::Serve => {
            let config = load_config(config_path)?;
            info!("Starting Penned =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
            server_run(config).await?;
        }
        Command::Build { skip_og } => {
            let config = load_config(config_path)?;
            let website = Website::load(config)?;
            let report = build_site(&website, BuildOptions { og_images: !skip_og })?;
            println!("Wrote {} files to {}", report.written.len(), website.config.paths.output_dir.display());
        }
        Command::Init => {
            let path = sample_config_path(config_path).map_err(|e| anyhow!(e))?;
            if path.exists() {
                return Err(anyhow!("{} already exists, not overwriting", path.display()));
            }
            write_sample_cfg(&path)?;
            println!("Sample config written to {}", path.display());
        }
    }

    Ok(())
}
