//! submission-desk - a terminal admin panel for contact form submissions
//!
//! Lists submissions page by page and lets an administrator edit or delete
//! them. Uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::services::JsonFileStore;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

fn main() -> Result<()> {
    // An unreadable config aborts startup instead of being replaced
    let mut config = match Config::load()? {
        Some(config) => config,
        None => {
            let config = Config::default();
            if let Err(e) = config.save() {
                eprintln!("Could not write default config: {:#}", e);
            }
            config
        }
    };

    // First argument overrides the data file
    if let Some(path) = std::env::args().nth(1) {
        config.data_path = PathBuf::from(path);
    }

    match logging::init(&config) {
        Ok(log_path) => info!(
            data = %config.data_path.display(),
            log = %log_path.display(),
            "starting submission-desk"
        ),
        Err(e) => eprintln!("Logging disabled: {:#}", e),
    }

    let store = JsonFileStore::new(config.data_path.clone()).with_latency(config.service_latency());
    let source_label = store.path().display().to_string();
    let mut app = App::new(Arc::new(store), source_label);

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(config.tick_rate());
    tui.enter()?;

    app.init()?;
    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        error!(error = %err, "application error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("bye");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                warn!(error = %e, "draw failed");
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // An action may produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
