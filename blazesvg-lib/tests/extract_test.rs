use blazesvg_lib::blaze_optimize::blaze_svg_optimize;
use blazesvg_lib::dom::dom_tree::{Document, Node};
use blazesvg_lib::parser::blaze_svg::create_dom_tree;
use blazesvg_lib::parser::serialize::serialize_svg;
use blazesvg_lib::style::extract::{find_first_element, walk_nodes};
use blazesvg_lib::{
    extract_styles_to_classes, BlazeSvgError, ClassRegistry, DocumentHost, DomError, Options,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn class_of(document: &Document, id: &str) -> Option<String> {
    let root = document.root();
    let mut found = None;
    walk_nodes(document, &root, |node| {
        if found.is_none() && document.get_attribute(node, "id").as_deref() == Some(id) {
            found = document.get_attribute(node, "class");
        }
        Ok(())
    })
    .unwrap();
    found
}

fn stylesheet_text(document: &Document) -> String {
    let root = document.root();
    let style = find_first_element(document, &root, "style").expect("style element");
    let borrowed = style.borrow();
    let Node::Element(elem) = &*borrowed else {
        panic!("style is not an element");
    };
    elem.children
        .iter()
        .filter_map(|child| match &*child.borrow() {
            Node::Text(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn equivalent_declarations_collapse_into_one_class() {
    init_logger();
    let document = create_dom_tree(
        r#"<svg>
            <text id="a" style="fill:red;font-size:12px">a</text>
            <text id="b" style="fill:red;font-size:12px">b</text>
            <text id="c" style="fill:red; font-size:12.0px">c</text>
        </svg>"#,
    );

    let report = extract_styles_to_classes(&document, &Options::default()).unwrap();

    assert_eq!(report.classes, 1);
    for id in ["a", "b", "c"] {
        assert_eq!(class_of(&document, id).as_deref(), Some("c0"));
    }
    assert_eq!(
        stylesheet_text(&document),
        "\n    .c0 {\n        fill: red;\n        font-size: 12;\n    }"
    );
}

#[test]
fn no_style_attribute_survives() {
    init_logger();
    let document = create_dom_tree(
        r#"<svg><g style=""><g style="stroke:#000"><path style=" ; " d="M0 0"/><circle style="r:0.5in"/></g></g></svg>"#,
    );

    extract_styles_to_classes(&document, &Options::default()).unwrap();

    let root = document.root();
    let mut styled = 0;
    walk_nodes(&document, &root, |node| {
        if document.has_attribute(node, "style") {
            styled += 1;
        }
        Ok(())
    })
    .unwrap();
    assert_eq!(styled, 0);

    // " ; " is non-empty, so it still earns a (property-less) class.
    assert_eq!(
        serialize_svg(&document).unwrap(),
        concat!(
            r#"<svg><defs><style type="text/css">"#,
            "\n    .c0 {\n        stroke: #000;\n    }\n",
            "\n    .c1 {\n;\n    }\n",
            "\n    .c2 {\n        r: 48;\n    }",
            r#"</style></defs><g><g class="c0"><path d="M0 0" class="c1"/><circle class="c2"/></g></g></svg>"#,
        )
    );
}

#[test]
fn removal_option_prunes_properties() {
    init_logger();
    let options = Options {
        remove_css_styles: vec!["font-size".to_string()],
        ..Default::default()
    };
    let output = blaze_svg_optimize::optimize(
        r#"<svg><text style="fill:red;font-size:12px">x</text><text style="fill:red;font-size:9px">y</text></svg>"#,
        &options,
    )
    .unwrap();

    assert_eq!(
        output,
        concat!(
            r#"<svg><defs><style type="text/css">"#,
            "\n    .c0 {\n        fill: red;\n    }",
            r#"</style></defs><text class="c0">x</text><text class="c0">y</text></svg>"#,
        )
    );
}

#[test]
fn removal_names_with_surrounding_spaces_still_match() {
    init_logger();
    let options = Options {
        remove_css_styles: vec![" font-size".to_string()],
        ..Default::default()
    };
    let output =
        blaze_svg_optimize::optimize(r#"<svg><rect style="fill:red;font-size:2px"/></svg>"#, &options)
            .unwrap();

    assert_eq!(
        output,
        concat!(
            r#"<svg><defs><style type="text/css">"#,
            "\n    .c0 {\n        fill: red;\n    }",
            r#"</style></defs><rect class="c0"/></svg>"#,
        )
    );
}

#[test]
fn identifiers_are_assigned_in_document_order() {
    init_logger();
    let document = create_dom_tree(
        r#"<svg>
            <g id="g1" style="opacity:0.5"><rect id="r1" style="fill:blue"/></g>
            <rect id="r2" style="opacity:.5"/>
            <rect id="r3" style="fill:green"/>
        </svg>"#,
    );

    extract_styles_to_classes(&document, &Options::default()).unwrap();

    assert_eq!(class_of(&document, "g1").as_deref(), Some("c0"));
    assert_eq!(class_of(&document, "r1").as_deref(), Some("c1"));
    assert_eq!(class_of(&document, "r2").as_deref(), Some("c0"));
    assert_eq!(class_of(&document, "r3").as_deref(), Some("c2"));
}

#[test]
fn registry_replay_matches_pass() {
    let styles = ["fill:red", "stroke:blue", "fill: red", "fill:red;stroke:blue"];
    let mut first = ClassRegistry::new(&Options::default()).unwrap();
    let mut second = ClassRegistry::new(&Options::default()).unwrap();

    let first_ids: Vec<_> = styles.iter().map(|s| first.add(s)).collect();
    let second_ids: Vec<_> = styles.iter().map(|s| second.add(s)).collect();

    assert_eq!(first_ids, vec!["c0", "c1", "c0", "c2"]);
    assert_eq!(first_ids, second_ids);
    assert_eq!(first.serialize(), second.serialize());
}

/// Mutation the [`InstrumentedHost`] rejects.
#[derive(Clone, Copy, PartialEq)]
enum FailOn {
    Nothing,
    SetAttribute,
    InsertChild,
}

/// A host that counts how often the pass writes and can reject one kind of mutation,
/// to check the collaborator contract works with handles other than the built-in DOM.
struct InstrumentedHost {
    inner: Document,
    writes: RefCell<usize>,
    text_appends: RefCell<usize>,
    fail_on: FailOn,
}

impl InstrumentedHost {
    fn new(svg: &str, fail_on: FailOn) -> Self {
        InstrumentedHost {
            inner: create_dom_tree(svg),
            writes: RefCell::new(0),
            text_appends: RefCell::new(0),
            fail_on,
        }
    }
}

impl DocumentHost for InstrumentedHost {
    type Handle = Rc<RefCell<Node>>;

    fn root(&self) -> Self::Handle {
        self.inner.root()
    }

    fn children_of(&self, node: &Self::Handle) -> Vec<Self::Handle> {
        self.inner.children_of(node)
    }

    fn is_element_named(&self, node: &Self::Handle, name: &str) -> bool {
        self.inner.is_element_named(node, name)
    }

    fn is_text(&self, node: &Self::Handle) -> bool {
        self.inner.is_text(node)
    }

    fn get_attribute(&self, node: &Self::Handle, name: &str) -> Option<String> {
        self.inner.get_attribute(node, name)
    }

    fn set_attribute(&self, node: &Self::Handle, name: &str, value: &str) -> Result<(), DomError> {
        if self.fail_on == FailOn::SetAttribute {
            return Err(DomError::NotAnElement(name.to_string()));
        }
        *self.writes.borrow_mut() += 1;
        self.inner.set_attribute(node, name, value)
    }

    fn remove_attribute(&self, node: &Self::Handle, name: &str) -> Result<(), DomError> {
        *self.writes.borrow_mut() += 1;
        self.inner.remove_attribute(node, name)
    }

    fn create_element(&self, name: &str) -> Self::Handle {
        self.inner.create_element(name)
    }

    fn create_text(&self) -> Self::Handle {
        self.inner.create_text()
    }

    fn insert_child_at(
        &self,
        parent: &Self::Handle,
        index: usize,
        child: Self::Handle,
    ) -> Result<(), DomError> {
        if self.fail_on == FailOn::InsertChild {
            return Err(DomError::NotAContainer);
        }
        self.inner.insert_child_at(parent, index, child)
    }

    fn append_child(&self, parent: &Self::Handle, child: Self::Handle) -> Result<(), DomError> {
        self.inner.append_child(parent, child)
    }

    fn append_text_content(&self, node: &Self::Handle, text: &str) -> Result<(), DomError> {
        *self.text_appends.borrow_mut() += 1;
        self.inner.append_text_content(node, text)
    }
}

const TWO_RED_RECTS: &str = r#"<svg><rect style="fill:red"/><rect style="fill:red"/></svg>"#;

#[test]
fn pass_runs_through_custom_host() {
    init_logger();
    let host = InstrumentedHost::new(TWO_RED_RECTS, FailOn::Nothing);

    let report = extract_styles_to_classes(&host, &Options::default()).unwrap();

    assert_eq!(report.nodes_rewritten, 2);
    // Two class writes, two style removals, one `type` attribute on the new <style>.
    assert_eq!(*host.writes.borrow(), 5);
    assert_eq!(*host.text_appends.borrow(), 1);
}

#[test]
fn rejected_attribute_write_aborts_the_pass() {
    init_logger();
    let host = InstrumentedHost::new(TWO_RED_RECTS, FailOn::SetAttribute);

    let result = extract_styles_to_classes(&host, &Options::default());

    match result {
        Err(BlazeSvgError::Dom(err)) => assert_eq!(err, DomError::NotAnElement("class".to_string())),
        other => panic!("expected a DOM error, got {:?}", other),
    }
    assert_eq!(*host.text_appends.borrow(), 0);
    let root = host.inner.root();
    assert!(find_first_element(&host.inner, &root, "style").is_none());
    // The first rect failed before its style was removed.
    assert_eq!(*host.writes.borrow(), 0);
}

#[test]
fn rejected_stylesheet_insertion_aborts_the_pass() {
    init_logger();
    let host = InstrumentedHost::new(TWO_RED_RECTS, FailOn::InsertChild);

    let result = extract_styles_to_classes(&host, &Options::default());

    assert!(matches!(
        result,
        Err(BlazeSvgError::Dom(DomError::NotAContainer))
    ));
    assert_eq!(*host.text_appends.borrow(), 0);
    let root = host.inner.root();
    assert!(find_first_element(&host.inner, &root, "defs").is_none());
    assert!(find_first_element(&host.inner, &root, "style").is_none());
}
