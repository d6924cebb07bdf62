use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::util;

use self::{dump_config::DumpConfigArg, play::PlayArg};

mod dump_config;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Write log events to this file (honours `RUST_LOG`, defaults to `info`)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the effective play configuration as JSON
    DumpConfig(#[clap(flatten)] DumpConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or(Mode::Play(PlayArg::default()));

    // The terminal UI owns the screen, so play mode only logs to a file.
    let log_to_stderr = !matches!(mode, Mode::Play(_));
    util::init_logging(args.log_file.as_deref(), log_to_stderr)?;

    match mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::DumpConfig(arg) => dump_config::run(&arg)?,
    }
    Ok(())
}
