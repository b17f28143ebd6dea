//! The rayon-backed worker pool that turns grid-dump CSVs into PNGs.
//!
//! Grounded on `icy_engine::buffers_rendering`'s `par_chunks_mut` fan-out
//! (same crate, same "disjoint work per item" shape) and on the
//! `ctrlc`-driven cancellation loop in the pack's one batch-CLI example
//! (`other_examples/0aed1bb6_..._src-main.rs.rs`): a shared `AtomicBool`
//! flag, checked once per unit of work, lets a cooperative cancellation
//! request drain in-flight work instead of aborting mid-file.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use ttyreplay_term::GridDump;

use crate::compositor;
use crate::error::CompositorError;
use crate::font::FontFaces;
use crate::png_writer;
use crate::sprite_sheets::SpriteSheets;

/// The two asset bundles a tile-set render needs, loaded once per run and
/// shared read-only across every worker.
pub struct RenderAssets {
    pub sheets: SpriteSheets,
    pub fonts: FontFaces,
}

/// One unit of compositor work: a CSV dump to read and the PNG path to
/// write it to.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub frame_no: usize,
    pub csv_path: PathBuf,
    pub png_path: PathBuf,
}

impl RenderJob {
    pub fn new(frame_no: usize, data_dir: &Path) -> Self {
        RenderJob {
            frame_no,
            csv_path: data_dir.join(format!("{frame_no}.csv")),
            png_path: data_dir.join(format!("{frame_no}.png")),
        }
    }
}

/// The outcome of one job: completed, skipped because cancellation was
/// already requested, or failed (logged, doesn't stop the pool).
#[derive(Debug)]
pub enum JobOutcome {
    Completed,
    Cancelled,
    Failed(CompositorError),
}

/// One job's result, paired with the frame number it came from.
#[derive(Debug)]
pub struct RenderResult {
    pub frame_no: usize,
    pub outcome: JobOutcome,
}

fn render_one(job: &RenderJob, assets: &RenderAssets, cancel: &AtomicBool, progress: &AtomicUsize) -> RenderResult {
    if cancel.load(Ordering::Relaxed) {
        return RenderResult { frame_no: job.frame_no, outcome: JobOutcome::Cancelled };
    }

    let outcome = render_job_inner(job, assets).map_or_else(JobOutcome::Failed, |()| JobOutcome::Completed);
    if matches!(outcome, JobOutcome::Completed) {
        progress.fetch_add(1, Ordering::Relaxed);
        log::info!("rendered {}", job.png_path.display());
    } else if let JobOutcome::Failed(ref err) = outcome {
        log::error!("frame {}: {err}", job.frame_no);
    }
    RenderResult { frame_no: job.frame_no, outcome }
}

fn render_job_inner(job: &RenderJob, assets: &RenderAssets) -> crate::error::Result<()> {
    let file = std::fs::File::open(&job.csv_path)?;
    let dump = GridDump::read(job.frame_no, file).map_err(|e| CompositorError::DumpReadFailure(e.to_string()))?;
    let bitmap = compositor::compose(&dump.grid, &assets.sheets, &assets.fonts)?;
    png_writer::write_png(&bitmap, &job.png_path)?;
    Ok(())
}

/// Runs every job on the calling thread, in order.
pub fn render_sequential(jobs: &[RenderJob], assets: &RenderAssets, cancel: &AtomicBool, progress: &AtomicUsize) -> Vec<RenderResult> {
    jobs.iter().map(|job| render_one(job, assets, cancel, progress)).collect()
}

/// Runs every job across a rayon thread pool. `cancel` and `progress` are
/// the only state shared between workers; each job still owns its own
/// output buffer end to end.
pub fn render_parallel(jobs: &[RenderJob], assets: &RenderAssets, cancel: &Arc<AtomicBool>, progress: &Arc<AtomicUsize>) -> Vec<RenderResult> {
    jobs.par_iter().map(|job| render_one(job, assets, cancel, progress)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_job_paths_follow_the_frame_number_convention() {
        let job = RenderJob::new(42, Path::new("./data"));
        assert_eq!(job.csv_path, Path::new("./data/42.csv"));
        assert_eq!(job.png_path, Path::new("./data/42.png"));
    }
}
