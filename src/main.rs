// src/main.rs

use watchrun::config::load_settings;
use watchrun::errors::WatchrunError;
use watchrun::{cli, logging, print_dry_run, run};

#[tokio::main]
async fn main() {
    let code = match run_main().await {
        Ok(()) => 0,
        Err(err) => match err.downcast_ref::<WatchrunError>() {
            Some(WatchrunError::MissingCommand) => {
                cli::print_help();
                1
            }
            _ => {
                eprintln!("watchrun error: {err:#}");
                1
            }
        },
    };
    // Exit right away; blocking scan threads are not waited for.
    std::process::exit(code);
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;

    let settings = load_settings(&args)?;
    if args.dry_run {
        print_dry_run(&settings);
        return Ok(());
    }

    run(settings).await?;
    Ok(())
}
