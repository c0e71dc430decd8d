use std::path::PathBuf;
use std::process;

use clap::Args;

use kernel_catalog::{CatalogOptions, CatalogStyle, DEFAULT_BASE_DIR, DEFAULT_OUTPUT_DIR};

use super::check_options;

#[derive(Args)]
pub struct GenerateArgs {
    /// Directory where target folders are located
    #[arg(short = 'd', long, default_value = DEFAULT_BASE_DIR)]
    pub base_dir: PathBuf,
    /// Directory receiving supported.xml
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
    /// Catalog shape: kernels with inputs/outputs, or bare kernel names
    #[arg(long, value_enum, default_value_t = CatalogStyle::Extended)]
    pub style: CatalogStyle,
    /// Report scanned files on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn cmd_generate(args: GenerateArgs) {
    let GenerateArgs {
        base_dir,
        output_dir,
        style,
        verbose,
    } = args;
    let options = CatalogOptions::new(base_dir, output_dir)
        .with_style(style)
        .with_verbose(verbose);
    let options = check_options(options);

    let path = match kernel_catalog::generate(&options) {
        Ok(path) => path,
        Err(e) => {
            e.render();
            process::exit(1);
        }
    };

    if verbose {
        eprintln!("Catalog written to {}", path.display());
    }
    println!("XML file 'supported.xml' generated successfully.");
}
