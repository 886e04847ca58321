mod render;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use std::{
    env, fs,
    io::{BufWriter, Write},
    ops::ControlFlow,
    path::PathBuf,
    time::Instant,
};

use basemark_core::{ProbeCache, classify_source, profile_for};
use basemark_index::{BaseFileIndex, Config, WatchOptions};

#[derive(Parser)]
#[command(name = "basemark")]
#[command(about = "Highlight source files that depend only on external packages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List base files under the project roots
    Scan(ScanArgs),
    /// Keep the base file list up to date as files and settings change
    Watch(WatchArgs),
    /// Show how every import of a single file is classified
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct ScanArgs {
    #[command(flatten)]
    config: Config,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct WatchArgs {
    #[command(flatten)]
    config: Config,

    #[command(flatten)]
    options: WatchOptions,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Source file to analyze
    file: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);
    let cwd = env::current_dir().ok();

    match cli.command {
        Commands::Scan(ScanArgs { mut config, json }) => {
            let start = Instant::now();
            config.initialize()?;
            let settings = config.load_settings()?;
            info!(
                "Scanning {:?} (using {} threads)",
                settings.file_extensions,
                rayon::current_num_threads()
            );

            let index = BaseFileIndex::new(config.roots.clone(), settings.clone());
            let snapshot = index.refresh();

            if json {
                render::print_json(&mut stdout, &snapshot)?;
            } else {
                render::print_base_files(&mut stdout, &snapshot, &settings, cwd.as_deref())?;
                render::print_summary(&mut stdout, &snapshot, None, start.elapsed().as_millis())?;
            }
            Ok(())
        }
        Commands::Watch(WatchArgs { mut config, options }) => {
            config.initialize()?;
            let index = BaseFileIndex::new(config.roots.clone(), config.load_settings()?);

            let mut last = Instant::now();
            basemark_index::watch(&index, &config, options.policy(), |trigger, snapshot| {
                let elapsed_ms = last.elapsed().as_millis();
                last = Instant::now();
                let printed = render::print_base_files(
                    &mut stdout,
                    snapshot,
                    &index.settings(),
                    cwd.as_deref(),
                )
                .and_then(|_| {
                    render::print_summary(&mut stdout, snapshot, Some(trigger), elapsed_ms)
                });
                // Nobody is listening anymore
                if printed.is_err() { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
            })?;
            stdout.flush()?;
            Ok(())
        }
        Commands::Check(CheckArgs { file }) => {
            let Some(profile) = profile_for(&file) else {
                bail!("No import rules for {}", file.display());
            };
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file = file.canonicalize().unwrap_or(file);

            let results = classify_source(&content, &file, profile, &ProbeCache::new());
            debug!("Classified {} imports in {}", results.len(), file.display());
            render::print_check(&mut stdout, &file, &results, cwd.as_deref())?;
            Ok(())
        }
    }
}
