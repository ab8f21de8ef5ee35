use std::process::ExitCode;

use clap::Parser;

use inkshed::error::EXIT_USAGE;
use inkshed::{Args, Config, InkshedError, Label, Launcher, ProcessRunner};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .parse_default_env()
        .init();

    let label = match Label::new(&args.label) {
        Ok(label) => label,
        Err(e) => {
            eprintln!("inkshed: {}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match run(args, label).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("inkshed: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(args: Args, label: Label) -> Result<(), InkshedError> {
    let config = Config::from_args(args)?;
    if let Some(path) = &config.config_path {
        log::info!("using config file {}", path.display());
    }

    let launcher = Launcher::new(config, ProcessRunner);
    let report = launcher.run(&label).await?;

    if report.converted {
        log::info!(
            "{} -> {}",
            report.paths.source.display(),
            report.paths.output.display()
        );
    }
    Ok(())
}
