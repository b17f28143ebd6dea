//! Replays a ttyrec session and writes one grid dump CSV per retained frame.

use std::fs::File;
use std::io::{BufWriter, Write};

use clap::Parser;

use ttyreplay_cli::{init_logging, install_cancellation_flag, reset_terminal, EmulateCli};

fn main() {
    let cli = EmulateCli::parse();
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

/// Returns `Ok(true)` when the session replayed to completion, `Ok(false)`
/// when a user interrupt cut it short.
fn run(cli: &EmulateCli) -> anyhow::Result<bool> {
    let cancel = install_cancellation_flag()?;
    std::fs::create_dir_all(&cli.out_dir)?;

    let file = File::open(&cli.path)?;
    let session = ttyreplay_term::replay_session_cancellable(file, Some(&cancel))?;
    log::debug!("retained {} grid dumps", session.dumps.len());

    for dump in &session.dumps {
        let path = cli.out_dir.join(format!("{}.csv", dump.frame_no));
        let mut writer = BufWriter::new(File::create(&path)?);
        dump.write(&mut writer)?;
        writer.flush()?;
    }

    log::info!("wrote {} grid dumps to {}", session.dumps.len(), cli.out_dir.display());
    if session.cancelled {
        log::warn!("run interrupted before completion");
        reset_terminal();
    }
    Ok(!session.cancelled)
}
