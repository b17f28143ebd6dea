//! Composites grid dump CSVs into per-frame PNGs, sequentially or across a
//! rayon worker pool.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use clap::Parser;

use ttyreplay_cli::{init_logging, install_cancellation_flag, reset_terminal, AssetPaths, RenderCli};
use ttyreplay_compositor::{render_parallel, render_sequential, FontFaces, JobOutcome, RenderAssets, RenderJob, SpriteSheets};

fn main() {
    let cli = RenderCli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(true)` when every selected frame rendered cleanly.
fn run(cli: &RenderCli) -> anyhow::Result<bool> {
    let cancel = install_cancellation_flag()?;
    let progress = Arc::new(AtomicUsize::new(0));

    let assets = load_assets(&cli.assets_dir)?;
    let jobs = select_jobs(cli)?;
    log::info!("rendering {} frame(s)", jobs.len());

    let results = if cli.parallel {
        render_parallel(&jobs, &assets, &cancel, &progress)
    } else {
        render_sequential(&jobs, &assets, &cancel, &progress)
    };

    log::debug!("rendered {} of {} frames", progress.load(Ordering::Relaxed), jobs.len());

    let mut ok = true;
    let mut cancelled = false;
    for result in &results {
        match result.outcome {
            JobOutcome::Completed => {}
            JobOutcome::Cancelled => cancelled = true,
            JobOutcome::Failed(_) => ok = false,
        }
    }

    if cancelled {
        log::warn!("run interrupted before completion");
        reset_terminal();
        ok = false;
    }

    Ok(ok)
}

fn load_assets(assets_dir: &std::path::Path) -> anyhow::Result<RenderAssets> {
    let assets = AssetPaths::new(assets_dir.to_path_buf());
    let sheets = SpriteSheets::load(assets.sheets_dir())?;
    let font_bytes = std::fs::read(assets.font_path())?;
    let fonts = FontFaces::load(&font_bytes)?;
    Ok(RenderAssets { sheets, fonts })
}

fn select_jobs(cli: &RenderCli) -> anyhow::Result<Vec<RenderJob>> {
    let frame_numbers = match cli.explicit_range() {
        Some((from, to)) => (from..=to).collect(),
        None => discover_frame_numbers(&cli.data_dir)?,
    };
    Ok(frame_numbers.into_iter().map(|frame_no| RenderJob::new(frame_no, &cli.data_dir)).collect())
}

/// Lists every `<n>.csv` under `data_dir`, sorted by frame number.
fn discover_frame_numbers(data_dir: &std::path::Path) -> anyhow::Result<Vec<usize>> {
    let mut numbers = Vec::new();
    for entry in std::fs::read_dir(data_dir)? {
        let entry = entry?;
        let path: PathBuf = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            if let Ok(n) = stem.parse::<usize>() {
                numbers.push(n);
            }
        }
    }
    numbers.sort_unstable();
    Ok(numbers)
}
