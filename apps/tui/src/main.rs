mod app;
mod cli;
mod event;
mod telemetry;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use taqueria_map::config::init_app_config;
use taqueria_map::Dataset;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config().wrap_err("invalid configuration")?;
    let interactive = !args.headless && is_terminal();
    telemetry::init(args.debug, config.log_file.as_deref(), interactive)?;

    // The snapshot every interaction filters against
    let dataset = Dataset::load(&config.data_path)
        .await
        .wrap_err_with(|| format!("failed to load {}", config.data_path.display()))?;
    let criteria = args.criteria(&dataset.bounds());

    if !interactive {
        return event::run_headless(&dataset, &criteria, &config, args.json, args.sort).await;
    }

    let mut app = App::new(dataset, criteria, config.map.clone(), config.output_dir.clone());
    if let Some(sort) = args.sort {
        app.sort_column = sort;
        app.refresh();
    }

    // Setup terminal
    let mut terminal = terminal::setup_terminal()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup_terminal_state(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
