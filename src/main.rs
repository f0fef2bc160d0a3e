use anyhow::Context;
use clap::Parser;
use macroquad::Window;
use macroquad::prelude::{Conf, next_frame};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tile_life::{
    Config, Driver, Simulation, TickPacer, TileAdapter,
    input::{EventSource, MacroquadWindow},
    rendering::ScreenRenderer,
};

fn window_conf(config: &Config) -> anyhow::Result<Conf> {
    Ok(Conf {
        window_title: "Game of Life".to_owned(),
        window_width: i32::try_from(config.width).context("window width too large")?,
        window_height: i32::try_from(config.height).context("window height too large")?,
        window_resizable: false,
        ..Default::default()
    })
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Everything that can fail is checked before the window opens
    let config = Config::parse();
    if let Err(err) = config.validate() {
        error!(%err, "invalid configuration");
        return Err(err).context("invalid configuration");
    }
    let tick_budget = config.tick_budget()?;
    let conf = window_conf(&config)?;

    let seed = config.resolve_seed();
    info!(seed, "seed");
    info!(
        rows = config.rows,
        cols = config.cols,
        tick_rate = config.tick_rate,
        rule = %config.rule,
        mode = config.mode.name(),
        "starting simulation"
    );
    if let Some(pattern) = config.pattern.map(|preset| preset.pattern()) {
        info!(pattern = pattern.name, description = pattern.description, "seeding preset");
    }

    let grid = config.build_grid(seed)?;
    let simulation = Simulation::with_mode(grid, Box::new(config.rule), config.mode);
    let driver = Driver::new(
        simulation,
        TileAdapter::new(config.tile_layout()),
        TickPacer::new(tick_budget),
    );

    Window::from_config(conf, run(driver));
    Ok(())
}

/// Same cycle as `Driver::run`, with macroquad's `next_frame` presenting the
/// frame and pumping events between draw and tick.
async fn run(mut driver: Driver) {
    let mut window = MacroquadWindow::new();
    let mut renderer = ScreenRenderer::new();
    let generation_at_start = driver.simulation().generation();

    while !window.should_close() {
        driver.render_frame(&mut renderer);
        next_frame().await;
        window.poll_events();
        driver.advance();
    }

    let summary = driver.summary_since(generation_at_start);
    info!(
        frames = summary.frames,
        presented = renderer.frames(),
        generations = summary.generations,
        alive = summary.alive,
        "finished"
    );
}
