use clap::Args;
use miette::{miette, Context, IntoDiagnostic, Result};
use respack_tree::{report::TracingReporter, BuildOptions, BuildResult, ResourceTree};
use std::path::PathBuf;
use tracing::{info, warn};
use walkdir::WalkDir;

pub mod cat;
pub mod stat;
pub mod tree;

#[derive(clap::Subcommand)]
pub enum PackCommands {
    /// Print the merged folder hierarchy
    Tree(tree::TreeArgs),
    /// Write a single merged file to stdout
    Cat(cat::CatArgs),
    /// Summarize every layer and the merged result
    Stat(stat::StatArgs),
}

impl PackCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            PackCommands::Tree(tree) => tree.handle(),
            PackCommands::Cat(cat) => cat.handle(),
            PackCommands::Stat(stat) => stat.handle(),
        }
    }
}

#[derive(Args)]
pub struct LayerArgs {
    /// A resource pack, the first one given has the highest priority
    #[arg(short, long = "pack", value_name = "FILE")]
    packs: Vec<PathBuf>,

    /// A directory whose packs are layered below the ones given with --pack, in file name order
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// The extension resource packs must have
    #[arg(long, default_value = "zip")]
    extension: String,
}

/// One imported pack
pub struct LoadedLayer {
    pub path: PathBuf,
    pub result: BuildResult,
}

impl LayerArgs {
    fn options(&self) -> BuildOptions {
        BuildOptions::builder()
            .extension(self.extension.as_str())
            .build()
    }

    /// Every pack path in priority order
    pub fn paths(&self) -> Result<Vec<PathBuf>> {
        let mut paths = self.packs.clone();

        if let Some(dir) = &self.dir {
            if !dir.is_dir() {
                return Err(miette!("{} is not a directory", dir.display()));
            }

            let found = WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| {
                    e.path()
                        .extension()
                        .is_some_and(|ext| ext == self.extension.as_str())
                })
                .map(|e| e.into_path());
            paths.extend(found);
        }

        if paths.is_empty() {
            return Err(miette!("no resource packs were given"));
        }

        Ok(paths)
    }

    /// Import every pack on its own, reporting problems through tracing
    pub fn load(&self) -> Result<Vec<LoadedLayer>> {
        let options = self.options();

        let layers = self
            .paths()
            .context("collecting resource packs")?
            .into_iter()
            .map(|path| {
                info!("importing {}", path.display());
                let result = ResourceTree::from_zip(&path, &options, &mut TracingReporter);
                if !result.success {
                    warn!("{} was not fully imported", path.display());
                }
                LoadedLayer { path, result }
            })
            .collect();

        Ok(layers)
    }

    /// Import and merge every pack
    pub fn load_merged(&self) -> Result<ResourceTree> {
        let layers = self.load()?;
        Ok(ResourceTree::from_layers(
            layers.into_iter().map(|layer| layer.result.tree),
        ))
    }
}

pub(crate) fn write_stdout(data: &[u8]) -> Result<()> {
    use std::io::Write;

    let mut out = std::io::stdout().lock();
    out.write_all(data)
        .and_then(|_| out.flush())
        .into_diagnostic()
        .context("writing to stdout")
}
