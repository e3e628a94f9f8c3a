// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapty console
//!
//! Logs workouts on a text map. Commands are read from stdin; the map, the
//! workout list and alerts are printed to stdout, logs go to stderr.

use anyhow::Context;
use mapty::{
    config::Config,
    console::{self, ClickRelay, ConsoleForm, ConsoleList, ConsoleMap, ConsoleNotifier},
    db::FileStore,
    services::{FixedPosition, MapWidget},
    AppController, Surfaces,
};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        key = %config.storage_key,
        "Starting Mapty"
    );

    let relay = ClickRelay::default();
    let map_relay = relay.clone();
    let surfaces = Surfaces {
        map: Box::new(move |_, _| {
            Box::new(ConsoleMap::new(io::stdout(), map_relay)) as Box<dyn MapWidget>
        }),
        form: Box::new(ConsoleForm::new(io::stdout())),
        list: Box::new(ConsoleList::new(io::stdout())),
        notifier: Box::new(ConsoleNotifier::new(io::stdout())),
    };

    let store = FileStore::new(&config.data_dir);
    let geolocator = FixedPosition(config.home_position);
    let mut app = AppController::new(config, Box::new(store), surfaces);

    println!("{}", console::USAGE);

    // Blocking stdin reads stay off the runtime
    let events = app.sender();
    std::thread::spawn(move || {
        console::read_commands(io::stdin().lock(), io::stdout(), &relay, &events);
    });

    app.run(&geolocator).await;
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mapty=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
