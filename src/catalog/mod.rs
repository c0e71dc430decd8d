//! The target → kernel catalog.

pub mod emit;

use std::collections::BTreeMap;

use crate::api::CatalogStyle;
use crate::scan::KernelDecl;

/// Declared parameters of one kernel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KernelEntry {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// Kernels supported by one target, ordered by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetEntry {
    pub kernels: BTreeMap<String, KernelEntry>,
}

/// Everything found in one workspace scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    pub style: CatalogStyle,
    pub targets: BTreeMap<String, TargetEntry>,
}

impl Catalog {
    pub fn new(style: CatalogStyle) -> Self {
        Self {
            style,
            targets: BTreeMap::new(),
        }
    }

    /// Record a kernel; a later kernel of the same name replaces the earlier
    /// one within its target.
    pub fn insert_kernel(&mut self, target: &str, decl: KernelDecl) {
        let entry = KernelEntry {
            inputs: decl.inputs,
            outputs: decl.outputs,
        };
        self.target_mut(target).kernels.insert(decl.name, entry);
    }

    /// Record a bare kernel name; repeats are ignored.
    pub fn insert_name(&mut self, target: &str, name: String) {
        self.target_mut(target).kernels.entry(name).or_default();
    }

    fn target_mut(&mut self, target: &str) -> &mut TargetEntry {
        self.targets.entry(target.to_string()).or_default()
    }

    pub fn target(&self, name: &str) -> Option<&TargetEntry> {
        self.targets.get(name)
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn kernel_count(&self) -> usize {
        self.targets.values().map(|t| t.kernels.len()).sum()
    }
}
