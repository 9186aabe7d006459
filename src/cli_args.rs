use clap::{Parser, Subcommand};
use std::num::NonZeroU32;
use std::path::PathBuf;
use tc_core::configuration::AppConfiguration;
use tc_core::edsm_client::DEFAULT_EDSM_BASE_URL;

#[derive(Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[arg(long, global = true, env("EDSM_BASE_URL"), default_value = DEFAULT_EDSM_BASE_URL)]
    pub edsm_base_url: String,
    #[arg(long, global = true, env("TRADE_COMPANION_DATA_DIR"), default_value = ".trade-companion")]
    pub data_dir: PathBuf,
    #[arg(long, global = true, env("TRADE_COMPANION_CARGO_CAPACITY"), default_value_t = 100)]
    pub cargo_capacity: u32,
    #[arg(long, global = true, env("EDSM_REQUESTS_PER_SECOND"), default_value = "2")]
    pub requests_per_second: NonZeroU32,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn app_configuration(&self) -> AppConfiguration {
        AppConfiguration {
            edsm_base_url: self.edsm_base_url.clone(),
            data_dir: self.data_dir.clone(),
            cargo_capacity: self.cargo_capacity,
            requests_per_second: self.requests_per_second,
        }
    }
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    /// ranks profitable trades between the stations of a system
    Routes {
        #[arg(long)]
        system: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// shows a system with its stations and bodies
    System {
        #[arg(long)]
        system: String,
    },
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },
    ProfileImage {
        #[command(subcommand)]
        command: ProfileImageCommand,
    },
}

#[derive(Clone, Subcommand)]
pub enum NotesCommand {
    List,
    Add { text: String },
    Remove { index: usize },
}

#[derive(Clone, Subcommand)]
pub enum ProfileImageCommand {
    Set { path: PathBuf },
    Clear,
    Info,
}
