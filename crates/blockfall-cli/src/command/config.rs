use std::path::PathBuf;

use crate::util::{self, GameConfigArg};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    #[clap(flatten)]
    game_config: GameConfigArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ConfigArg) -> anyhow::Result<()> {
    let config = arg.game_config.resolve()?;
    util::save_json(&config, arg.output.as_deref())
}
