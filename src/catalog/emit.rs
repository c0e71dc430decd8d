//! `supported.xml` rendering.

use std::path::Path;

use super::Catalog;
use crate::api::CatalogStyle;
use crate::diagnostic::Diagnostic;

/// File name of the catalog inside the output directory.
pub const OUTPUT_FILE: &str = "supported.xml";

const INDENT: &str = "  ";

/// A markup element with attributes and either text or children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: &'static str, value: &str) -> Self {
        self.attrs.push((key, value.to_string()));
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Append this element at `depth` levels of indentation.
    pub fn render(&self, depth: usize, out: &mut String) {
        let indent = INDENT.repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(self.name);
        for (key, value) in &self.attrs {
            out.push_str(&format!(" {}=\"{}\"", key, escape(value, true)));
        }

        match (&self.text, self.children.is_empty()) {
            (None, true) => out.push_str("/>\n"),
            (Some(text), true) => {
                out.push_str(&format!(">{}</{}>\n", escape(text, false), self.name));
            }
            _ => {
                out.push_str(">\n");
                if let Some(text) = &self.text {
                    out.push_str(&format!("{}{}{}\n", indent, INDENT, escape(text, false)));
                }
                for child in &self.children {
                    child.render(depth + 1, out);
                }
                out.push_str(&format!("{}</{}>\n", indent, self.name));
            }
        }
    }
}

fn escape(s: &str, attr: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the element tree for a catalog.
pub fn catalog_tree(catalog: &Catalog) -> Element {
    let mut root = Element::new("Workspace");
    for (target_name, target) in &catalog.targets {
        let mut target_el = Element::new("Target").with_attr("name", target_name);
        for (kernel_name, kernel) in &target.kernels {
            let kernel_el = match catalog.style {
                CatalogStyle::Simple => Element::new("Kernel").with_text(kernel_name),
                CatalogStyle::Extended => {
                    let mut el = Element::new("Kernel").with_attr("name", kernel_name);
                    if let Some(inputs) = role_list("Inputs", "Input", &kernel.inputs) {
                        el.push(inputs);
                    }
                    if let Some(outputs) = role_list("Outputs", "Output", &kernel.outputs) {
                        el.push(outputs);
                    }
                    el
                }
            };
            target_el.push(kernel_el);
        }
        root.push(target_el);
    }
    root
}

/// `<Inputs><Input>a</Input>...</Inputs>`, or nothing for an empty list.
fn role_list(group: &'static str, item: &'static str, names: &[String]) -> Option<Element> {
    if names.is_empty() {
        return None;
    }
    let mut el = Element::new(group);
    for name in names {
        el.push(Element::new(item).with_text(name));
    }
    Some(el)
}

/// Render the full document, declaration included.
pub fn to_xml(catalog: &Catalog) -> String {
    let mut out = String::from("<?xml version=\"1.0\" ?>\n");
    catalog_tree(catalog).render(0, &mut out);
    out
}

/// Write the rendered catalog to `path`.
pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<(), Diagnostic> {
    std::fs::write(path, to_xml(catalog)).map_err(|e| {
        Diagnostic::io("write", path, e)
            .with_help("check that the output directory exists and is writable".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{KernelDecl, Roles};

    fn roles(inputs: &[&str], outputs: &[&str]) -> Roles {
        Roles {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_extended_document() {
        let mut catalog = Catalog::new(CatalogStyle::Extended);
        catalog.insert_kernel("gpu", KernelDecl::new("org.x.mul", Roles::default()));
        catalog.insert_kernel("cpu", KernelDecl::new("org.x.sub", roles(&["z", "a"], &[])));
        catalog.insert_kernel("cpu", KernelDecl::new("org.x.add", roles(&["a"], &["b"])));

        insta::assert_snapshot!(to_xml(&catalog), @r#"
        <?xml version="1.0" ?>
        <Workspace>
          <Target name="cpu">
            <Kernel name="org.x.add">
              <Inputs>
                <Input>a</Input>
              </Inputs>
              <Outputs>
                <Output>b</Output>
              </Outputs>
            </Kernel>
            <Kernel name="org.x.sub">
              <Inputs>
                <Input>z</Input>
                <Input>a</Input>
              </Inputs>
            </Kernel>
          </Target>
          <Target name="gpu">
            <Kernel name="org.x.mul"/>
          </Target>
        </Workspace>
        "#);
    }

    #[test]
    fn test_simple_document() {
        let mut catalog = Catalog::new(CatalogStyle::Simple);
        catalog.insert_name("onnxRT", "ort.cpu.runner".to_string());
        catalog.insert_name("ai_server", "remote.model.chat".to_string());
        catalog.insert_name("ai_server", "remote.model.embed".to_string());

        insta::assert_snapshot!(to_xml(&catalog), @r#"
        <?xml version="1.0" ?>
        <Workspace>
          <Target name="ai_server">
            <Kernel>remote.model.chat</Kernel>
            <Kernel>remote.model.embed</Kernel>
          </Target>
          <Target name="onnxRT">
            <Kernel>ort.cpu.runner</Kernel>
          </Target>
        </Workspace>
        "#);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(CatalogStyle::Extended);
        assert_eq!(to_xml(&catalog), "<?xml version=\"1.0\" ?>\n<Workspace/>\n");
    }

    #[test]
    fn test_escaping() {
        let mut catalog = Catalog::new(CatalogStyle::Extended);
        catalog.insert_kernel("a&b", KernelDecl::new("k\"<1>", roles(&["x<y"], &[])));
        let xml = to_xml(&catalog);
        assert!(xml.contains("<Target name=\"a&amp;b\">"));
        assert!(xml.contains("<Kernel name=\"k&quot;&lt;1&gt;\">"));
        assert!(xml.contains("<Input>x&lt;y</Input>"));
    }

    #[test]
    fn test_write_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OUTPUT_FILE);
        let catalog = Catalog::new(CatalogStyle::Simple);
        write_catalog(&catalog, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), to_xml(&catalog));
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join(OUTPUT_FILE);
        let err = write_catalog(&Catalog::new(CatalogStyle::Simple), &path).unwrap_err();
        assert!(err.message.starts_with("cannot write"));
        assert_eq!(
            err.help.as_deref(),
            Some("check that the output directory exists and is writable")
        );
    }
}
