//! Shared argument parsing, asset discovery, and cancellation wiring for the
//! `emulate` and `render` binaries.
//!
//! The flat-flags `Cli` shape (no subcommand, one required path) mirrors
//! `icy_play`'s `Cli` struct; the cooperative cancellation flag mirrors the
//! one pack example that wires `ctrlc` for a batch tool rather than a GUI
//! event loop.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::{ArgGroup, Parser};

/// `emulate --path <ttyrec> [--out-dir DIR] [-v...]`
#[derive(Parser, Debug)]
#[command(about = "Replays a ttyrec session into per-frame grid dump CSVs.")]
pub struct EmulateCli {
    /// The ttyrec file to replay.
    #[arg(long)]
    pub path: PathBuf,

    /// Directory grid dump CSVs are written to.
    #[arg(long, default_value = "./data", env = "TTYREPLAY_DATA_DIR")]
    pub out_dir: PathBuf,

    /// Raises the log level; repeatable (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// `render [--frame N | --range A B] [--data-dir DIR] [--assets-dir DIR] [--parallel] [-v...]`
#[derive(Parser, Debug)]
#[command(about = "Composites grid dump CSVs into per-frame PNGs.")]
#[command(group(ArgGroup::new("selection").args(["frame", "range"])))]
pub struct RenderCli {
    /// Render only this frame number.
    #[arg(long)]
    pub frame: Option<usize>,

    /// Render an inclusive frame range.
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
    pub range: Option<Vec<usize>>,

    /// Directory grid dump CSVs are read from.
    #[arg(long, default_value = "./data", env = "TTYREPLAY_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Directory the sprite sheets and font file are looked up in.
    #[arg(long, default_value = ".", env = "TTYREPLAY_ASSETS_DIR")]
    pub assets_dir: PathBuf,

    /// Use the rayon worker pool instead of a sequential loop.
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Raises the log level; repeatable (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl RenderCli {
    /// The inclusive `(from, to)` range selected by `--frame`/`--range`, or
    /// `None` when neither was given (meaning "every dump under `data_dir`").
    pub fn explicit_range(&self) -> Option<(usize, usize)> {
        if let Some(frame) = self.frame {
            return Some((frame, frame));
        }
        self.range.as_ref().map(|r| (r[0], r[1]))
    }
}

/// The seven asset files a render run needs (six sprite sheets plus one
/// font file), resolved under one directory.
pub struct AssetPaths {
    pub dir: PathBuf,
}

impl AssetPaths {
    pub const FONT_NAME: &'static str = "Menlo.ttc";

    pub fn new(dir: PathBuf) -> Self {
        AssetPaths { dir }
    }

    pub fn sheets_dir(&self) -> &std::path::Path {
        &self.dir
    }

    pub fn font_path(&self) -> PathBuf {
        self.dir.join(Self::FONT_NAME)
    }
}

/// Initializes `env_logger` at the verbosity implied by a repeated `-v`
/// flag, with `warn` as the quiet default.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Installs a `ctrlc` handler that flips a shared flag instead of exiting
/// the process directly, so in-flight work can drain before the binary
/// exits nonzero through its normal aggregation path.
pub fn install_cancellation_flag() -> anyhow::Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = flag.clone();
    ctrlc::set_handler(move || {
        log::warn!("interrupt received, finishing in-flight work");
        handler_flag.store(true, std::sync::atomic::Ordering::Relaxed);
    })?;
    Ok(flag)
}

/// Resets the terminal to a sane state, the same way the original player's
/// `clear_screen()` does on every exit path (`clear`, `reset`, `stty
/// sane`). Called once cancellation has drained in-flight work, right
/// before the binary exits nonzero. Best-effort: a failed reset is logged
/// but never masks the underlying cancellation.
pub fn reset_terminal() {
    for args in [["clear"].as_slice(), &["reset"], &["stty", "sane"]] {
        let (program, rest) = args.split_first().expect("each command names a program");
        if let Err(err) = std::process::Command::new(program).args(rest).status() {
            log::warn!("failed to run `{program}` while resetting the terminal: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn explicit_range_prefers_frame_over_range() {
        let cli = RenderCli {
            frame: Some(7),
            range: None,
            data_dir: PathBuf::from("./data"),
            assets_dir: PathBuf::from("."),
            parallel: false,
            verbose: 0,
        };
        assert_eq!(cli.explicit_range(), Some((7, 7)));
    }

    #[test]
    fn explicit_range_reads_a_range_pair() {
        let cli = RenderCli {
            frame: None,
            range: Some(vec![3, 9]),
            data_dir: PathBuf::from("./data"),
            assets_dir: PathBuf::from("."),
            parallel: false,
            verbose: 0,
        };
        assert_eq!(cli.explicit_range(), Some((3, 9)));
    }

    #[test]
    fn explicit_range_is_none_with_neither_flag() {
        let cli = RenderCli {
            frame: None,
            range: None,
            data_dir: PathBuf::from("./data"),
            assets_dir: PathBuf::from("."),
            parallel: false,
            verbose: 0,
        };
        assert_eq!(cli.explicit_range(), None);
    }

    #[test]
    fn asset_paths_joins_font_name_under_the_given_dir() {
        let assets = AssetPaths::new(PathBuf::from("/opt/assets"));
        assert_eq!(assets.font_path(), PathBuf::from("/opt/assets/Menlo.ttc"));
    }
}
