use html5ever::{LocalName, Namespace, QualName};
use std::cell::RefCell;
use std::rc::Rc;

pub mod dom_tree {
    use super::*;

    pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

    #[derive(Debug, Clone)]
    pub enum Node {
        DocumentRoot(DocumentRootNode),
        Element(ElementNode),
        Text(String),
    }

    #[derive(Debug, Clone)]
    pub struct DocumentRootNode {
        pub children: Vec<Rc<RefCell<Node>>>,
    }

    #[derive(Debug, Clone)]
    pub struct ElementNode {
        pub tag: String,
        pub qual_name: QualName,
        /// Attributes in source order, keyed by their (possibly prefixed) name.
        pub attributes: Vec<(String, String)>,
        pub children: Vec<Rc<RefCell<Node>>>,
    }

    #[derive(Debug)]
    pub struct Document {
        pub root: Rc<RefCell<Node>>,
        /// `<?xml ...?>` exactly as written, when the input starts with one.
        pub xml_declaration: RefCell<Option<String>>,
        pub doctype: RefCell<Option<Doctype>>,
    }

    #[derive(Debug)]
    pub struct Doctype {
        pub name: String,
        pub public_id: String,
        pub system_id: String,
    }

    impl DocumentRootNode {
        pub fn new() -> Self {
            DocumentRootNode {
                children: Vec::new(),
            }
        }
    }

    impl Default for DocumentRootNode {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ElementNode {
        pub fn new(tag: String, qual_name: QualName) -> Self {
            ElementNode {
                tag,
                qual_name,
                attributes: Vec::new(),
                children: Vec::new(),
            }
        }

        pub fn get_attribute(&self, name: &str) -> Option<&str> {
            self.attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        }

        pub fn has_attribute(&self, name: &str) -> bool {
            self.attributes.iter().any(|(key, _)| key == name)
        }

        /// Overwrites an existing attribute in place, or appends a new one.
        pub fn set_attribute(&mut self, name: &str, value: String) {
            match self.attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value,
                None => self.attributes.push((name.to_string(), value)),
            }
        }

        pub fn remove_attribute(&mut self, name: &str) {
            self.attributes.retain(|(key, _)| key != name);
        }
    }

    impl Node {
        pub fn children(&self) -> Option<&Vec<Rc<RefCell<Node>>>> {
            match self {
                Node::DocumentRoot(root) => Some(&root.children),
                Node::Element(elem) => Some(&elem.children),
                Node::Text(_) => None,
            }
        }

        pub fn children_mut(&mut self) -> Option<&mut Vec<Rc<RefCell<Node>>>> {
            match self {
                Node::DocumentRoot(root) => Some(&mut root.children),
                Node::Element(elem) => Some(&mut elem.children),
                Node::Text(_) => None,
            }
        }

        pub fn is_element_named(&self, name: &str) -> bool {
            matches!(self, Node::Element(elem) if elem.tag == name)
        }
    }

    pub fn new_document() -> Document {
        Document {
            root: Rc::new(RefCell::new(Node::DocumentRoot(DocumentRootNode::new()))),
            xml_declaration: RefCell::new(None),
            doctype: RefCell::new(None),
        }
    }

    /// Creates a detached SVG-namespaced element.
    pub fn new_svg_element(tag: &str) -> Rc<RefCell<Node>> {
        let qual_name = QualName::new(None, Namespace::from(SVG_NAMESPACE), LocalName::from(tag));
        Rc::new(RefCell::new(Node::Element(ElementNode::new(
            tag.to_string(),
            qual_name,
        ))))
    }
}
