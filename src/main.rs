use clap::Parser;
use trusty_todo::cli::Cli;
use trusty_todo::commands::{dispatch, CommandError};
use trusty_todo::config::{resolve_config_path, ConfigManager};

fn setup_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let config_path = resolve_config_path(cli.config.as_deref())?;
    let mut manager = ConfigManager::load(&config_path)?;
    setup_logging(manager.config().log_level());
    log::debug!("using config {}", config_path.display());

    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut manager, &mut stdout)
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
