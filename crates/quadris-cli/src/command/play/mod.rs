use crate::{command::play::app::PlayApp, tui::Runtime};

pub(crate) use self::config::{ConfigArgs, PlayConfig};

mod app;
mod config;
mod input;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    config: ConfigArgs,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = arg.config.resolve()?;
    let mut app = PlayApp::new(&config)?;

    let engine_config = app.engine_config();
    tracing::info!(
        seed = %app.seed(),
        columns = engine_config.columns,
        rows = engine_config.rows,
        fps = config.fps,
        "starting game"
    );
    Runtime::new().run(&mut app)?;

    let stats = app.stats();
    tracing::info!(
        score = stats.score(),
        lines = stats.total_cleared_lines(),
        level = stats.level(),
        pieces = stats.completed_pieces(),
        "session ended"
    );
    Ok(())
}
