//! Parameter descriptor blocks and the kernel references that point at them.

use std::collections::HashMap;

use regex::Regex;

/// Substring marking an input descriptor entry.
pub const INPUT_MARKER: &str = "VX_INPUT";

/// Substring marking an output descriptor entry.
pub const OUTPUT_MARKER: &str = "VX_OUTPUT";

/// Raw bodies of the parameter blocks declared in one file, keyed by name.
///
/// Built fresh for every file; a kernel only ever resolves against blocks
/// from its own file.
#[derive(Clone, Debug, Default)]
pub struct ParamBlocks {
    blocks: HashMap<String, String>,
}

impl ParamBlocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a block, replacing any earlier block of the same name.
    pub fn insert(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.blocks.insert(name.into(), body.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.blocks.get(name).map(String::as_str)
    }
}

/// Declared parameter names of one kernel, in entry order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roles {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// Patterns for turning a kernel's parameter reference into names.
pub struct ParamResolver {
    cast_ref: Regex,
    qualified_ref: Regex,
    entry: Regex,
    input_name: Regex,
    output_name: Regex,
}

impl ParamResolver {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // const_cast<vx_param_description_t*>(Ns::name), or a C-style cast
            cast_ref: Regex::new(
                r"(?:(?:const|static|reinterpret)_cast\s*<\s*(?:const\s+)?(?i:vx_param_description_t)\s*\*\s*>\s*\(\s*([A-Za-z_][\w:]*)\s*\)|\(\s*(?:const\s+)?(?i:vx_param_description_t)\s*\*\s*\)\s*\(?\s*([A-Za-z_][\w:]*))",
            )?,
            // Ns::Class::name with nothing around it
            qualified_ref: Regex::new(r"^\s*(?:[A-Za-z_]\w*\s*::\s*)+([A-Za-z_]\w*)\s*$")?,
            // Flat `{...}` entries; nested braces are not supported
            entry: Regex::new(r"\{([^{}]*)\}")?,
            input_name: role_name_pattern(INPUT_MARKER)?,
            output_name: role_name_pattern(OUTPUT_MARKER)?,
        })
    }

    /// Turn the fourth initializer field into a parameter-block name.
    ///
    /// Casts yield the last `::` segment of the cast identifier, bare
    /// qualified names yield their tail, and anything else is used verbatim.
    pub fn block_key(&self, field: &str) -> String {
        if let Some(caps) = self.cast_ref.captures(field) {
            if let Some(ident) = caps.get(1).or_else(|| caps.get(2)) {
                return last_segment(ident.as_str()).to_string();
            }
        }
        if let Some(caps) = self.qualified_ref.captures(field) {
            return caps[1].to_string();
        }
        field.to_string()
    }

    /// Collect input and output names from a block's raw body.
    pub fn roles(&self, body: &str) -> Roles {
        let mut roles = Roles::default();
        for caps in self.entry.captures_iter(body) {
            let entry = &caps[1];
            if entry.contains(INPUT_MARKER) {
                if let Some(name) = role_name(&self.input_name, entry) {
                    roles.inputs.push(name);
                }
            } else if entry.contains(OUTPUT_MARKER) {
                if let Some(name) = role_name(&self.output_name, entry) {
                    roles.outputs.push(name);
                }
            }
        }
        roles
    }

    /// Resolve a parameter reference against a file's blocks.
    /// An unknown block yields empty roles.
    pub fn resolve(&self, field: &str, blocks: &ParamBlocks) -> Roles {
        match blocks.get(&self.block_key(field)) {
            Some(body) => self.roles(body),
            None => Roles::default(),
        }
    }
}

/// `MARKER, "name"` / `MARKER, 'name'` / `MARKER, name`, first alternative wins.
fn role_name_pattern(marker: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r#"{}\s*,\s*(?:"([^"]*)"|'([^']*)'|([A-Za-z_]\w*))"#,
        regex::escape(marker)
    ))
}

fn role_name(pattern: &Regex, entry: &str) -> Option<String> {
    let caps = pattern.captures(entry)?;
    let name = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
    Some(name.as_str().to_string())
}

pub(crate) fn last_segment(ident: &str) -> &str {
    ident.rsplit(':').next().unwrap_or(ident)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ParamResolver {
        ParamResolver::new().unwrap()
    }

    #[test]
    fn test_const_cast_strips_namespace() {
        let r = resolver();
        assert_eq!(
            r.block_key("const_cast<vx_param_description_t*>(Namespace::Foo)"),
            "Foo"
        );
        assert_eq!(
            r.block_key("const_cast<vx_param_description_t *>( A::B::kernelParams )"),
            "kernelParams"
        );
        assert_eq!(r.block_key("const_cast<vx_param_description_t*>(plain)"), "plain");
    }

    #[test]
    fn test_other_casts() {
        let r = resolver();
        assert_eq!(
            r.block_key("reinterpret_cast<const vx_param_description_t*>(Ns::p)"),
            "p"
        );
        assert_eq!(r.block_key("(vx_param_description_t *)Ns::params"), "params");
        assert_eq!(r.block_key("(VX_PARAM_DESCRIPTION_T*)(params)"), "params");
    }

    #[test]
    fn test_qualified_reference_tail() {
        let r = resolver();
        assert_eq!(r.block_key("VxRunner::kernelParams"), "kernelParams");
        assert_eq!(r.block_key("outer::inner::params"), "params");
    }

    #[test]
    fn test_fallback_is_verbatim() {
        let r = resolver();
        assert_eq!(r.block_key("kernel_params"), "kernel_params");
        assert_eq!(r.block_key("&params[0]"), "&params[0]");
    }

    #[test]
    fn test_roles_by_marker() {
        let r = resolver();
        let body = r#"
            {VX_INPUT, "foo", VX_TYPE_IMAGE},
            {VX_OUTPUT, 'bar', VX_TYPE_IMAGE},
            {VX_BIDIRECTIONAL, "baz"},
        "#;
        let roles = r.roles(body);
        assert_eq!(roles.inputs, vec!["foo"]);
        assert_eq!(roles.outputs, vec!["bar"]);
    }

    #[test]
    fn test_roles_bare_identifier_and_order() {
        let r = resolver();
        let body = "{VX_INPUT, VX_TYPE_ARRAY, VX_PARAMETER_STATE_REQUIRED}, // model\n\
                    {VX_INPUT, \"tensors\"},\n\
                    {VX_OUTPUT, out_tensor}";
        let roles = r.roles(body);
        assert_eq!(roles.inputs, vec!["VX_TYPE_ARRAY", "tensors"]);
        assert_eq!(roles.outputs, vec!["out_tensor"]);
    }

    #[test]
    fn test_roles_keep_duplicates() {
        let r = resolver();
        let roles = r.roles("{VX_INPUT, \"a\"}, {VX_INPUT, \"a\"}");
        assert_eq!(roles.inputs, vec!["a", "a"]);
    }

    #[test]
    fn test_marker_without_name_contributes_nothing() {
        let r = resolver();
        let roles = r.roles("{VX_INPUT}, {VX_OUTPUT,}");
        assert_eq!(roles, Roles::default());
    }

    #[test]
    fn test_resolve_missing_block_is_empty() {
        let r = resolver();
        let mut blocks = ParamBlocks::new();
        blocks.insert("known", "{VX_INPUT, \"x\"}");
        assert_eq!(r.resolve("unknown", &blocks), Roles::default());
        assert_eq!(r.resolve("Ns::known", &blocks).inputs, vec!["x"]);
    }

    #[test]
    fn test_blocks_last_insert_wins() {
        let mut blocks = ParamBlocks::new();
        blocks.insert("p", "{VX_INPUT, \"old\"}");
        blocks.insert("p", "{VX_INPUT, \"new\"}");
        assert_eq!(blocks.get("p"), Some("{VX_INPUT, \"new\"}"));
    }
}
