use anyhow::{Context, Result};
use glyphlab::app::AppContext;
use glyphlab::{cli, debug};
use glyphlab_config::Settings;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    // CLI --log-level wins, then GLYPHLAB_LOG, then the settings file (below).
    debug::init_log_bridge(options.log_level);

    log::info!("Starting glyphlab {}", glyphlab::VERSION);

    let settings_path = options.config.clone().or_else(Settings::settings_path);
    let settings = match &settings_path {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    debug::apply_settings_level(settings.log_level);

    if let Err(e) = run(settings, settings_path, options) {
        log::error!("{e:#}");
        log::logger().flush();
        eprintln!("glyphlab: error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run(
    settings: Settings,
    settings_path: Option<std::path::PathBuf>,
    options: cli::RuntimeOptions,
) -> Result<()> {
    let mut app = AppContext::new(settings, settings_path)?;
    if let Some(dir) = &options.font_dir {
        app.set_font_dir(dir)
            .with_context(|| format!("cannot use font directory {}", dir.display()))?;
    }
    cli::run_command(&mut app, options.command)
}
