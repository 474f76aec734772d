use clap::Parser;
use log::info;
use memplot::cli::Cli;
use memplot::logging;
use memplot::shared::config::{RunConfig, Settings};
use memplot::shared::error::MemplotError;

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    if let Err(e) = try_main(&cli) {
        eprintln!("memplot: {}", e);
        std::process::exit(1);
    }
}

fn try_main(cli: &Cli) -> Result<(), MemplotError> {
    let file_settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    let config = RunConfig::from_settings(cli.settings().merge(file_settings))?;

    let report = memplot::run(config)?;
    info!(
        "Done: {} samples of PID {} plotted to {}",
        report.samples,
        report.subject_id,
        report.output.display()
    );
    Ok(())
}
