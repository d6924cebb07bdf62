use std::io::{self, Write as _};

use anyhow::Context as _;

use crate::command::play::ConfigArgs;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DumpConfigArg {
    #[clap(flatten)]
    config: ConfigArgs,
}

pub(crate) fn run(arg: &DumpConfigArg) -> anyhow::Result<()> {
    let config = arg.config.resolve()?;
    tracing::debug!(?config, "resolved play configuration");

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &config)
        .context("Failed to write configuration to stdout")?;
    writeln!(stdout).context("Failed to write configuration to stdout")?;
    Ok(())
}
