use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use blockfall_engine::{GameConfig, SpawnRotation};
use serde::Serialize;

/// Writes `value` as pretty JSON to `output_path`, or to stdout without one.
pub(crate) fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    match output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(BufWriter::new(file), value)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))
        }
        None => write_json(io::stdout().lock(), value).context("Failed to write JSON to stdout"),
    }
}

fn write_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn read_config_file(path: &Path) -> anyhow::Result<GameConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open config file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse config JSON file: {}", path.display()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum SpawnRotationArg {
    Random,
    Zero,
}

impl From<SpawnRotationArg> for SpawnRotation {
    fn from(arg: SpawnRotationArg) -> Self {
        match arg {
            SpawnRotationArg::Random => SpawnRotation::Random,
            SpawnRotationArg::Zero => SpawnRotation::Zero,
        }
    }
}

/// Game configuration from an optional JSON file, with flag overrides.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GameConfigArg {
    /// JSON file with the game configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of board rows
    #[arg(long)]
    rows: Option<usize>,
    /// Number of board columns
    #[arg(long)]
    cols: Option<usize>,
    /// Initial rotation of freshly drawn pieces
    #[arg(long, value_enum)]
    spawn_rotation: Option<SpawnRotationArg>,
}

impl GameConfigArg {
    pub(crate) fn resolve(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => read_config_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(spawn_rotation) = self.spawn_rotation {
            config.spawn_rotation = spawn_rotation.into();
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}
