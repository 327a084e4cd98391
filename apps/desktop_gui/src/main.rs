use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime::launch};
use crate::controller::events::UiEvent;
use crate::ui::ActivitiesApp;

const APP_TITLE: &str = "Mergington High School Activities";

#[derive(Parser, Debug)]
#[command(name = "activities-gui", about = "Desktop page for Mergington High School activities")]
struct Args {
    /// Base URL of the activities server.
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file to read instead of the default locations.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref());
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let base_url = settings.server_base_url()?;
    let server_label = base_url.to_string();
    let message_display = settings.message_display();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    launch(base_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([760.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ActivitiesApp::new(
                cmd_tx,
                ui_rx,
                server_label,
                message_display,
            )))
        }),
    )
    .map_err(|err| anyhow!("gui event loop failed: {err}"))
}
