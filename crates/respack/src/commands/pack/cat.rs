use clap::Args;
use miette::{miette, Result};
use tracing::debug;

use super::LayerArgs;

#[derive(Args)]
pub struct CatArgs {
    #[command(flatten)]
    layers: LayerArgs,

    /// The path of the file inside the packs
    #[arg(long, value_name = "PATH")]
    path: String,
}

impl CatArgs {
    pub fn handle(&self) -> Result<()> {
        let merged = self.layers.load_merged()?;

        let file = merged
            .file(&self.path)
            .ok_or(miette!("{} was not found in any pack", self.path))?;
        debug!("writing {} bytes of {}", file.len(), self.path);

        super::write_stdout(file)
    }
}
