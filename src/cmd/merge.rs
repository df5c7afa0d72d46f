use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::{merge, output};

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Directory to search for JSON files.
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// File name pattern (glob).
    #[arg(long, default_value = "*.json")]
    pub pattern: String,

    /// Search recursively in subdirectories.
    #[arg(short, long)]
    pub recursive: bool,
}

pub fn run(args: MergeArgs) -> Result<()> {
    let merged = merge::merge_directory(&args.dir, &args.pattern, args.recursive)?;
    output::print_json(&merged)
}
