// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Command line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Football match clip tagger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Video to open on startup
    #[arg(value_name = "VIDEO")]
    pub video: Option<PathBuf>,

    /// Project file (JSON) to load on startup
    #[arg(short = 'p', long = "project", value_name = "PROJECT")]
    pub project: Option<PathBuf>,

    /// Configuration file (defaults to <config dir>/matchclip/config.yaml)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Args {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
