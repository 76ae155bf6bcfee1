use clap::Parser;
use daily_digest::{init_logging, run, Cli};

fn main() {
    // A missing .env file is normal when the scheduler provides the variables
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let _handle = match init_logging(cli.log_level.into(), &cli.log_dir) {
        Ok(handle) => Some(handle),
        Err(e) => {
            // The run itself does not depend on logging
            eprintln!("Failed to initialize logging: {e:?}");
            None
        }
    };
    if let Ok(path) = dotenv {
        log::debug!("Loaded environment from {path:?}");
    }

    run(&cli);
}
