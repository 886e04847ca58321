use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    time::UNIX_EPOCH,
};

use colored::{ColoredString, Colorize};
use log::{debug, trace};
use serde::Serialize;

use basemark_core::{Decoration, ImportTarget, Settings};
use basemark_index::{Snapshot, Trigger};

#[derive(Debug, Serialize)]
struct ScanReport<'a> {
    generation: u64,
    files_analyzed: usize,
    /// Seconds since the Unix epoch
    refreshed_at: Option<u64>,
    base_files: Vec<&'a Path>,
}

/// Path relative to `cwd` when it lies beneath it, for clickable output
fn display_path(path: &Path, cwd: Option<&Path>) -> String {
    cwd.and_then(|cwd| path.strip_prefix(cwd).ok())
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

fn paint(text: &str, decoration: &Decoration) -> ColoredString {
    match decoration.rgb() {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => {
            trace!("Unparsable color '{}', printing plain", decoration.color);
            text.normal()
        }
    }
}

fn sorted(snapshot: &Snapshot) -> Vec<&PathBuf> {
    let mut files: Vec<_> = snapshot.base_files.iter().collect();
    files.sort();
    files
}

/// One line per base file, decorated the way the settings ask for
pub fn print_base_files<W: Write>(
    writer: &mut W,
    snapshot: &Snapshot,
    settings: &Settings,
    cwd: Option<&Path>,
) -> io::Result<()> {
    debug!("Printing {} base files", snapshot.base_files.len());
    for file in sorted(snapshot) {
        let shown = display_path(file, cwd);
        match Decoration::for_file(settings, true) {
            Some(decoration) => match decoration.badge {
                Some(badge) => {
                    writeln!(writer, "{} {}", paint(&badge.to_string(), &decoration), shown)?
                }
                None => writeln!(writer, "{}", paint(&shown, &decoration))?,
            },
            None => writeln!(writer, "{}", shown)?,
        }
    }
    writer.flush()
}

pub fn print_json<W: Write>(writer: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    let report = ScanReport {
        generation: snapshot.generation,
        files_analyzed: snapshot.files_analyzed,
        refreshed_at: snapshot
            .refreshed_at
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs()),
        base_files: sorted(snapshot).into_iter().map(PathBuf::as_path).collect(),
    };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    writer.flush()
}

pub fn print_summary<W: Write>(
    writer: &mut W,
    snapshot: &Snapshot,
    trigger: Option<Trigger>,
    elapsed_ms: u128,
) -> io::Result<()> {
    let reason = trigger.map(|t| format!(" after {:?} trigger", t)).unwrap_or_default();
    writeln!(
        writer,
        "\n{} {} base files out of {} ({}ms, refresh #{}{}).",
        "●".bright_blue(),
        snapshot.base_files.len().to_string().green().bold(),
        snapshot.files_analyzed.to_string().cyan(),
        elapsed_ms.to_string().cyan(),
        snapshot.generation,
        reason
    )?;
    writer.flush()
}

pub fn print_check<W: Write>(
    writer: &mut W,
    path: &Path,
    results: &[(ImportTarget, bool)],
    cwd: Option<&Path>,
) -> io::Result<()> {
    writeln!(writer, "{}", display_path(path, cwd).bright_white().bold())?;

    for (idx, (target, local)) in results.iter().enumerate() {
        let prefix = if idx == results.len() - 1 { "└──" } else { "├──" };
        let verdict = if *local { "local".red() } else { "external".green() };
        writeln!(
            writer,
            "{}  {} ({:?}) {}",
            prefix.dimmed(),
            target.request,
            target.form,
            verdict
        )?;
    }

    let is_base = results.iter().all(|(_, local)| !local);
    if is_base {
        writeln!(writer, "\n{} Base file (no local dependencies)", "✓".green().bold())?;
    } else {
        let count = results.iter().filter(|(_, local)| *local).count();
        writeln!(writer, "\n{} Depends on {} local imports", "✗".yellow().bold(), count)?;
    }
    writer.flush()
}
