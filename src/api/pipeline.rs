//! Walk → scan → merge loop shared by `build_catalog` and `generate`.

use crate::api::{CatalogOptions, CatalogStyle};
use crate::catalog::Catalog;
use crate::diagnostic::Diagnostic;
use crate::scan::Scanner;
use crate::workspace::{self, SourceFile};

/// One pass over a workspace, accumulating into a single catalog.
pub(crate) struct CatalogPass<'a> {
    options: &'a CatalogOptions,
    scanner: Scanner,
}

impl<'a> CatalogPass<'a> {
    pub fn new(options: &'a CatalogOptions) -> Result<Self, Diagnostic> {
        Ok(Self {
            options,
            scanner: Scanner::new()?,
        })
    }

    pub fn run(&self) -> Result<Catalog, Diagnostic> {
        let walk = workspace::collect_sources(&self.options.base_dir);
        let mut skipped = walk.skipped.len();
        if self.options.verbose {
            for warning in &walk.skipped {
                warning.render();
            }
        }

        let mut catalog = Catalog::new(self.options.style);
        let mut scanned = 0usize;
        for file in &walk.files {
            // Unreadable files contribute nothing.
            let source = match workspace::read_source(&file.path) {
                Ok(source) => source,
                Err(e) => {
                    skipped += 1;
                    if self.options.verbose {
                        self.unreadable(file, e).render();
                    }
                    continue;
                }
            };
            if self.options.verbose {
                eprintln!("  scanning {}", self.display_path(file));
            }
            scanned += 1;
            self.merge_file(&mut catalog, &file.target, &source);
        }

        if self.options.verbose {
            let mut summary = format!(
                "Scanned {} files, {} kernels across {} targets",
                scanned,
                catalog.kernel_count(),
                catalog.target_count()
            );
            if skipped > 0 {
                summary.push_str(&format!(" ({} skipped)", skipped));
            }
            eprintln!("{}", summary);
        }
        Ok(catalog)
    }

    fn merge_file(&self, catalog: &mut Catalog, target: &str, source: &str) {
        match self.options.style {
            CatalogStyle::Extended => {
                for decl in self.scanner.scan_kernels(source) {
                    catalog.insert_kernel(target, decl);
                }
            }
            CatalogStyle::Simple => {
                for name in self.scanner.scan_names(source) {
                    catalog.insert_name(target, name);
                }
            }
        }
    }

    fn unreadable(&self, file: &SourceFile, err: Diagnostic) -> Diagnostic {
        Diagnostic::warning(format!("skipping unreadable file {}", self.display_path(file)))
            .with_note(err.message)
    }

    fn display_path(&self, file: &SourceFile) -> String {
        file.path
            .strip_prefix(&self.options.base_dir)
            .unwrap_or(file.path.as_path())
            .to_string_lossy()
            .replace('\\', "/")
    }
}
