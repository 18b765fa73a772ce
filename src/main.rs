// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! MatchClip - Football match clip tagger
//!
//! A desktop application for scrubbing through a match video, marking
//! in/out points, tagging the resulting clips and exporting them.

mod app;
mod cli;
mod config;
mod error;
mod io;
mod models;
mod session;
mod ui;
mod util;

use anyhow::Result;
use app::MatchClipApp;
use clap::Parser;
use cli::Args;
use config::AppConfig;
use session::Session;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG overrides the -v level
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let config = match args.config.clone().or_else(AppConfig::default_path) {
        Some(path) => AppConfig::load(&path).unwrap_or_else(|e| {
            log::warn!("{:#}; using default settings", e);
            AppConfig::default()
        }),
        None => AppConfig::default(),
    };

    let mut app = MatchClipApp::new(Session::new(config.tag_registry()), config);
    if let Some(project) = &args.project {
        app.load_project_file(project);
    }
    if let Some(video) = &args.video {
        app.open_video_file(video);
    }

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("MatchClip - Football Clip Tagger"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native("MatchClip", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
