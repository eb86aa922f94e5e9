use std::error::Error;

use clap::Parser;
use deplock::{
    cli::args::{CliArgs, Command},
    config::DeplockConfig,
    Deplock, LockMode,
};

fn run(cli_args: CliArgs, config: DeplockConfig) -> Result<(), Box<dyn Error>> {
    let deplock = Deplock::builder()
        .root(cli_args.root)
        .lock_file_name(cli_args.lock_file.unwrap_or(config.lock_file))
        .try_build()?;

    match cli_args.cmd {
        Command::Record { reports, locked } => {
            let lock_mode = if locked {
                LockMode::Locked
            } else {
                LockMode::Update
            };
            deplock.record(lock_mode, &reports)?;
            Ok(())
        }
        Command::Show { module } => deplock.show(module.as_ref()),
    }
}

fn main() {
    let cli_args = CliArgs::parse();
    let config = DeplockConfig::load();

    let filter = match &config {
        Ok(config) => config.log_filter.clone(),
        Err(_) => DeplockConfig::default().log_filter,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let result = config
        .map_err(Into::into)
        .and_then(|config| run(cli_args, config));
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
