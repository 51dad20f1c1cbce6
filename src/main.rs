mod cli;

use anyhow::Context;
use env_logger::{Env, Target};
use log::info;
use std::fs::OpenOptions;
use std::path::Path;
use wwara_chirp::{ConvertOptions, IndexPolicy};

fn setup_logging(level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let env = Env::default().filter_or("RUST_LOG", match level {
        "essential" => "info",
        "debug" => "debug",
        "trace" => "trace",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    });
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = cli::parse_cli();
    setup_logging(&args.log_level, args.log_file.as_deref())?;
    info!("WWARA CHIRP export: {} -> {}", args.input_file.display(), args.output_file.display());

    let opts = ConvertOptions {
        index_policy: args.index_policy.parse::<IndexPolicy>()?,
    };

    let summary = wwara_chirp::run(&args.input_file, &args.output_file, &opts)
        .with_context(|| format!("converting {}", args.input_file.display()))?;

    info!("Done: {} of {} rows written", summary.written, summary.read);
    Ok(())
}
