use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::catalog::{emit, Catalog};
use crate::diagnostic::Diagnostic;

pub(crate) mod pipeline;


/// Base directory used when none is given on the command line.
pub const DEFAULT_BASE_DIR: &str = "targets";

/// Output directory used when none is given on the command line.
pub const DEFAULT_OUTPUT_DIR: &str = "./";

/// Which catalog shape to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CatalogStyle {
    /// Kernels carry their declared Inputs and Outputs.
    #[default]
    Extended,
    /// Kernels are bare dotted identifiers, one text element each.
    Simple,
}

/// Options controlling a catalog run: where to scan, where to write, what shape.
#[derive(Clone, Debug)]
pub struct CatalogOptions {
    /// Directory whose first-level subdirectories are targets.
    pub base_dir: PathBuf,
    /// Directory receiving `supported.xml`.
    pub output_dir: PathBuf,
    pub style: CatalogStyle,
    /// Report progress on stderr.
    pub verbose: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            style: CatalogStyle::default(),
            verbose: false,
        }
    }
}

impl CatalogOptions {
    pub fn new(base_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: CatalogStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Validate both directories and normalize the output directory so it
    /// ends with a path separator.
    pub fn check(mut self) -> Result<Self, Diagnostic> {
        self.output_dir = with_trailing_separator(&self.output_dir);

        if !self.base_dir.exists() {
            return Err(Diagnostic::error(format!(
                "The directory {} does not exist.",
                self.base_dir.display()
            )));
        }
        if !self.output_dir.is_dir() {
            return Err(Diagnostic::error(format!(
                "The output path {} is not a directory.",
                self.output_dir.display()
            )));
        }
        Ok(self)
    }

    /// Full path of the catalog file.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(emit::OUTPUT_FILE)
    }
}

fn with_trailing_separator(dir: &Path) -> PathBuf {
    let text = dir.to_string_lossy();
    if text.ends_with('/') || text.ends_with(MAIN_SEPARATOR) {
        return dir.to_path_buf();
    }
    let mut s = dir.as_os_str().to_os_string();
    s.push(MAIN_SEPARATOR.to_string());
    PathBuf::from(s)
}

/// Scan the base directory and build the catalog without writing anything.
pub fn build_catalog(options: &CatalogOptions) -> Result<Catalog, Diagnostic> {
    pipeline::CatalogPass::new(options)?.run()
}

/// Scan, build, and write `supported.xml`. Returns the written path.
pub fn generate(options: &CatalogOptions) -> Result<PathBuf, Diagnostic> {
    let catalog = build_catalog(options)?;
    let path = options.output_path();
    emit::write_catalog(&catalog, &path)?;
    Ok(path)
}
