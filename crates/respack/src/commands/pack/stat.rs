use clap::Args;
use itertools::Itertools;
use miette::Result;
use owo_colors::OwoColorize;
use respack_tree::ResourceTree;

use super::LayerArgs;

#[derive(Args)]
pub struct StatArgs {
    #[command(flatten)]
    layers: LayerArgs,
}

fn summary(tree: &ResourceTree) -> String {
    format!(
        "{} files, {} folders, {} bytes",
        tree.file_count(),
        tree.folder_count(),
        tree.total_size()
    )
}

impl StatArgs {
    pub fn handle(&self) -> Result<()> {
        let layers = self.layers.load()?;

        let lines = layers
            .iter()
            .enumerate()
            .map(|(priority, layer)| {
                let marker = if layer.result.success {
                    "✅".to_string()
                } else {
                    format!("❌ {}", "incomplete".red())
                };
                format!(
                    "{} {} {}: {}",
                    marker,
                    priority,
                    layer.path.display(),
                    summary(&layer.result.tree)
                )
            })
            .join("\n");

        let merged = ResourceTree::from_layers(layers.iter().map(|layer| &layer.result.tree));

        println!("{}", lines);
        println!("🔃 {}: {}", "merged".blue(), summary(&merged));

        Ok(())
    }
}
