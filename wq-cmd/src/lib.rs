//! Command implementations for the water-quality CLI.
//!
//! Provides subcommands for analysing a directory of sensor exports,
//! exporting the daily series, rendering charts and listing sites.

use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use wq_core::site::SiteLocation;
use wq_data::{depth::DEFAULT_MAX_DEPTH_FT, pipeline::PipelineConfig};

pub mod analyze;
pub mod chart;
pub mod export;

#[derive(Subcommand)]
pub enum Command {
    /// Run the pipeline and print the per-site correlation report
    Analyze {
        /// Directory holding one CSV per site and variable
        #[arg(short = 'd', long)]
        data_dir: String,

        /// Discard readings at or deeper than this many feet
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH_FT)]
        max_depth_ft: u32,

        /// CSV of site coordinates (ID,NAME,LATITUDE,LONGITUDE); built-in sites if omitted
        #[arg(long)]
        sites: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write merged daily series and correlation statistics as CSV
    Export {
        /// Directory holding one CSV per site and variable
        #[arg(short = 'd', long)]
        data_dir: String,

        /// Directory to write the CSV files into (created if missing)
        #[arg(short = 'o', long)]
        out_dir: String,

        /// Discard readings at or deeper than this many feet
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH_FT)]
        max_depth_ft: u32,
    },

    /// Render daily, correlation and map charts as SVG
    Chart {
        /// Directory holding one CSV per site and variable
        #[arg(short = 'd', long)]
        data_dir: String,

        /// Directory to write the SVG files into (created if missing)
        #[arg(short = 'o', long)]
        out_dir: String,

        /// Discard readings at or deeper than this many feet
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH_FT)]
        max_depth_ft: u32,

        /// CSV of site coordinates (ID,NAME,LATITUDE,LONGITUDE); built-in sites if omitted
        #[arg(long)]
        sites: Option<String>,

        /// First day on the time axis (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// Last day on the time axis (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },

    /// List the configured monitoring sites
    Sites {
        /// CSV of site coordinates (ID,NAME,LATITUDE,LONGITUDE); built-in sites if omitted
        #[arg(long)]
        sites: Option<String>,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Analyze {
            data_dir,
            max_depth_ft,
            sites,
            json,
        } => {
            let sites = load_sites(sites.as_deref())?;
            analyze::run_analyze(Path::new(&data_dir), &PipelineConfig { max_depth_ft }, &sites, json)
        }
        Command::Export {
            data_dir,
            out_dir,
            max_depth_ft,
        } => export::run_export(
            Path::new(&data_dir),
            Path::new(&out_dir),
            &PipelineConfig { max_depth_ft },
        ),
        Command::Chart {
            data_dir,
            out_dir,
            max_depth_ft,
            sites,
            start,
            end,
        } => {
            let sites = load_sites(sites.as_deref())?;
            chart::run_chart(
                Path::new(&data_dir),
                Path::new(&out_dir),
                &PipelineConfig { max_depth_ft },
                &sites,
                start.as_deref(),
                end.as_deref(),
            )
        }
        Command::Sites { sites } => {
            let sites = load_sites(sites.as_deref())?;
            for site in &sites {
                println!(
                    "{:<6}{:<24}{:>10.4}{:>11.4}",
                    site.site_id, site.name, site.latitude, site.longitude
                );
            }
            Ok(())
        }
    }
}

/// Site coordinates from `path`, or the built-in table.
pub fn load_sites(path: Option<&str>) -> anyhow::Result<Vec<SiteLocation>> {
    match path {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("reading site table {}", path))?;
            SiteLocation::parse_site_csv(&data).with_context(|| format!("parsing site table {}", path))
        }
        None => Ok(SiteLocation::get_site_locations()?),
    }
}
