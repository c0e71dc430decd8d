pub mod generate;

use std::process;

use kernel_catalog::CatalogOptions;

/// Validate directories, exiting with status 1 before any scanning.
pub fn check_options(options: CatalogOptions) -> CatalogOptions {
    match options.check() {
        Ok(checked) => checked,
        Err(e) => {
            println!("Error: {}", e.message);
            process::exit(1);
        }
    }
}
