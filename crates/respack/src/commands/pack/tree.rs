use clap::Args;
use miette::Result;
use owo_colors::OwoColorize;
use respack_tree::Folder;
use std::fmt::Write;

use super::LayerArgs;

#[derive(Args)]
pub struct TreeArgs {
    #[command(flatten)]
    layers: LayerArgs,

    /// Only print folders up to this depth
    #[arg(long, value_name = "DEPTH")]
    depth: Option<usize>,

    /// Only print the folder at this path
    #[arg(long, value_name = "PATH")]
    root: Option<String>,
}

fn render(out: &mut String, folder: &Folder, indent: usize, depth: Option<usize>) {
    let pad = "  ".repeat(indent);

    for (name, child) in &folder.folders {
        let _ = writeln!(out, "{}{}", pad, format!("{}/", name).blue().bold());
        if depth.map_or(true, |d| indent + 1 < d) {
            render(out, child, indent + 1, depth);
        }
    }

    for (name, file) in &folder.files {
        let _ = writeln!(
            out,
            "{}{} {}",
            pad,
            name,
            format!("({} bytes)", file.len()).dimmed()
        );
    }
}

impl TreeArgs {
    pub fn handle(&self) -> Result<()> {
        let merged = self.layers.load_merged()?;

        let folder = match &self.root {
            Some(path) => merged
                .folder(path)
                .ok_or(miette::miette!("{} was not found in any pack", path))?,
            None => &merged,
        };

        let mut out = String::new();
        render(&mut out, folder, 0, self.depth);
        super::write_stdout(out.as_bytes())
    }
}
