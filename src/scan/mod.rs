//! Declaration scanning.
//!
//! Kernels are registered with brace-initialized records:
//!
//! ```text
//! static constexpr vx_param_description_t kernelParams[] = {
//!     {VX_INPUT, "src", VX_TYPE_IMAGE},
//!     {VX_OUTPUT, "dst", VX_TYPE_IMAGE},
//! };
//!
//! vx_kernel_description_t blur_kernel = {
//!     VX_KERNEL_BLUR,
//!     "org.khronos.blur",
//!     Blur::run,
//!     const_cast<vx_param_description_t*>(Blur::kernelParams),
//!     ...
//! };
//! ```
//!
//! The scanner finds both kinds of declaration with regexes, splits each
//! kernel initializer with [`fields::split_fields`], and resolves the
//! parameter reference against the parameter blocks of the same file.
//! Nothing here is a real C/C++ parser; shapes it does not recognize are
//! skipped without complaint.

pub mod fields;
pub mod params;

use regex::Regex;

use crate::diagnostic::Diagnostic;
use fields::{split_fields, unquote};
pub use params::{ParamBlocks, ParamResolver, Roles};


/// Files without this substring hold no kernel declarations.
pub const KERNEL_MARKER: &str = "_kernel_description_t";

/// Minimum initializer fields: id, name, function, parameters.
const MIN_KERNEL_FIELDS: usize = 4;

const NAME_FIELD: usize = 1;
const PARAMS_FIELD: usize = 3;

/// A kernel recovered from one declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KernelDecl {
    pub name: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl KernelDecl {
    pub fn new(name: impl Into<String>, roles: Roles) -> Self {
        Self {
            name: name.into(),
            inputs: roles.inputs,
            outputs: roles.outputs,
        }
    }
}

/// Compiled declaration patterns; build once, scan many files.
pub struct Scanner {
    param_decl: Regex,
    kernel_decl: Regex,
    dotted_name: Regex,
    params: ParamResolver,
}

impl Scanner {
    pub fn new() -> Result<Self, Diagnostic> {
        Self::compile().map_err(|e| Diagnostic::error(format!("invalid scan pattern: {}", e)))
    }

    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            param_decl: Regex::new(
                r"(?s)(?:\b(?i:static|const|constexpr)\s+)*(?i:vx_param_description_t)\s+([A-Za-z_][\w:]*)\s*\[[^\]]*\]\s*=\s*\{(.*?)\}\s*;",
            )?,
            kernel_decl: Regex::new(
                r"(?s)(?i:vx_kernel_description_t)\s+([A-Za-z_]\w*)\s*=\s*\{(.*?)\}\s*;",
            )?,
            dotted_name: Regex::new(r#""((?:[A-Za-z0-9_:-]+\.){2,}[A-Za-z0-9_:-]+)""#)?,
            params: ParamResolver::new()?,
        })
    }

    /// Cheap pre-filter run before any pattern matching.
    pub fn has_kernels(source: &str) -> bool {
        source.contains(KERNEL_MARKER)
    }

    /// Parameter blocks declared in `source`, keyed by the last `::` segment
    /// of the declared name; a later block replaces an earlier one.
    pub fn param_blocks(&self, source: &str) -> ParamBlocks {
        let mut blocks = ParamBlocks::new();
        for caps in self.param_decl.captures_iter(source) {
            blocks.insert(params::last_segment(&caps[1]), &caps[2]);
        }
        blocks
    }

    /// Every well-formed kernel declaration in `source`, in source order.
    pub fn scan_kernels(&self, source: &str) -> Vec<KernelDecl> {
        if !Self::has_kernels(source) {
            return Vec::new();
        }
        let blocks = self.param_blocks(source);
        self.kernel_decl
            .captures_iter(source)
            .filter_map(|caps| self.kernel_from_body(&caps[2], &blocks))
            .collect()
    }

    /// Interpret one kernel initializer body.
    pub fn kernel_from_body(&self, body: &str, blocks: &ParamBlocks) -> Option<KernelDecl> {
        let fields = split_fields(body);
        if fields.len() < MIN_KERNEL_FIELDS {
            return None;
        }
        let name = unquote(&fields[NAME_FIELD]);
        let roles = self.params.resolve(&fields[PARAMS_FIELD], blocks);
        Some(KernelDecl::new(name, roles))
    }

    /// Quoted dotted identifiers (`"a.b.c"`) in a file that declares kernels.
    pub fn scan_names(&self, source: &str) -> Vec<String> {
        if !Self::has_kernels(source) {
            return Vec::new();
        }
        self.dotted_name
            .captures_iter(source)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}
