//! Integration tests for the Simplifier API
//!
//! These tests run whole documents through load, transform and save and
//! check the shape of the result.

use std::fs;

use graphml_slim::{
    Document, SimplifyReport, Simplifier, SlimError,
    config::{AppConfig, KeyConfig},
};
use graphml_slim_core::{Element, name::ns, reader::parse};

const FIXTURE: &str = include_str!("fixtures/diagram.graphml");

fn simplify(source: &str) -> (String, SimplifyReport) {
    Simplifier::default()
        .simplify(source)
        .expect("Failed to simplify")
}

fn find<'a>(doc: &'a Document, local: &str, id: &str) -> &'a Element {
    doc.root()
        .find_descendant_by(&|e: &Element| e.is(ns::GRAPHML, local) && e.attribute("id") == Some(id))
        .unwrap_or_else(|| panic!("no <{local} id=\"{id}\">"))
}

fn data_entries(element: &Element) -> Vec<&Element> {
    element
        .child_elements()
        .filter(|c| c.is(ns::GRAPHML, "data"))
        .collect()
}

fn label(element: &Element) -> Option<String> {
    let entries = data_entries(element);
    assert!(entries.len() <= 1, "more than one data entry left");
    entries.first().map(|data| {
        let children: Vec<_> = data.child_elements().collect();
        assert_eq!(children.len(), 1, "label entry must hold one element");
        assert!(children[0].is(ns::YFILES, "Label.Text"));
        children[0].text()
    })
}

#[test]
fn test_fixture_report() {
    let (_, report) = simplify(FIXTURE);

    assert_eq!(
        report,
        SimplifyReport {
            key_definitions_removed: 20,
            shared_entries_removed: 2,
            nodes: 4,
            node_labels: 2,
            edges: 2,
            edge_labels: 1,
            entries_removed: 6,
            empty_labels_dropped: 1,
            ports_removed: 5,
            port_references_removed: 4,
            foreign_items_dropped: 1,
        }
    );
}

#[test]
fn test_fixture_labels() {
    let (xml, _) = simplify(FIXTURE);
    let doc = parse(&xml).expect("output must parse");

    assert_eq!(label(find(&doc, "node", "n0")).as_deref(), Some("Order Service"));
    assert_eq!(
        label(find(&doc, "node", "n1")).as_deref(),
        Some("Billing & Invoicing")
    );
    assert_eq!(label(find(&doc, "node", "n2")), None);
    assert_eq!(label(find(&doc, "node", "n3")), None);
    assert_eq!(
        label(find(&doc, "edge", "e0")).as_deref(),
        Some("creates invoices")
    );
    assert_eq!(label(find(&doc, "edge", "e1")), None);
}

#[test]
fn test_no_leftover_schema() {
    let (xml, _) = simplify(FIXTURE);
    let doc = parse(&xml).unwrap();

    doc.root().walk(&mut |e: &Element| {
        assert!(!e.is(ns::GRAPHML, "key"), "key definition left");
        assert!(!e.is(ns::GRAPHML, "port"), "port left");
        assert_ne!(e.attribute("key"), Some("d19"), "shared entry left");
        if e.is(ns::GRAPHML, "node") {
            assert!(data_entries(e).iter().all(|d| d.attribute("key") == Some("d4")));
        }
        if e.is(ns::GRAPHML, "edge") {
            assert!(data_entries(e).iter().all(|d| d.attribute("key") == Some("d11")));
            assert_eq!(e.attribute("sourceport"), None);
            assert_eq!(e.attribute("targetport"), None);
        }
    });
}

#[test]
fn test_namespace_minimization() {
    let (xml, _) = simplify(FIXTURE);
    let doc = parse(&xml).unwrap();

    let prefixes: Vec<_> = doc
        .root()
        .namespaces()
        .iter()
        .map(|b| (b.prefix(), b.uri()))
        .collect();
    assert_eq!(
        prefixes,
        [
            (None, ns::GRAPHML),
            (Some("y"), ns::YFILES),
            (Some("x"), ns::MARKUP),
        ]
    );
    assert!(!xml.contains("yjs"));
    assert!(!xml.contains("schemaLocation"));
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
}

#[test]
fn test_idempotence() {
    let (first, _) = simplify(FIXTURE);
    let (second, report) = simplify(&first);

    assert_eq!(first, second);
    assert_eq!(report.key_definitions_removed, 0);
    assert_eq!(report.shared_entries_removed, 0);
    assert_eq!(report.entries_removed, 0);
    assert_eq!(report.ports_removed, 0);
    assert_eq!(report.port_references_removed, 0);
    assert_eq!(report.foreign_items_dropped, 0);
    assert_eq!(report.node_labels, 2);
    assert_eq!(report.edge_labels, 1);
}

#[test]
fn test_label_extraction_correctness() {
    let source = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:y="http://www.yworks.com/xml/yfiles-common/3.0">
  <graph id="G">
    <node id="n0"><data key="d4"><y:Label.Text>  &lt;p&gt;Hello&lt;/p&gt; &lt;strong&gt;World&lt;/strong&gt; &amp;amp;  </y:Label.Text></data></node>
  </graph>
</graphml>"#;
    let (xml, _) = simplify(source);

    assert!(
        xml.contains(r#"<data key="d4"><y:Label.Text>Hello World &amp;</y:Label.Text></data>"#),
        "unexpected output:\n{xml}"
    );
}

#[test]
fn test_idempotence_with_escaped_references() {
    let source = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:y="http://www.yworks.com/xml/yfiles-common/3.0">
  <graph id="G">
    <node id="n0"><data key="d4"><y:Label Text="a &amp;amp;lt;b&amp;amp;gt; c"/></data></node>
    <node id="n1"><data key="d4"><y:Label.Text><![CDATA[x &amp;lt; y]]></y:Label.Text></data></node>
  </graph>
</graphml>"#;
    let (first, _) = simplify(source);
    let (second, _) = simplify(&first);

    assert_eq!(first, second);
    let doc = parse(&first).unwrap();
    assert_eq!(label(find(&doc, "node", "n0")).as_deref(), Some("a c"));
    assert_eq!(label(find(&doc, "node", "n1")).as_deref(), Some("x < y"));
}

#[test]
fn test_absent_label_removes_entry() {
    let source = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <graph id="G">
    <node id="n0"><data key="d4">no label element here</data></node>
  </graph>
</graphml>"#;
    let (xml, report) = simplify(source);
    let doc = parse(&xml).unwrap();

    assert!(data_entries(find(&doc, "node", "n0")).is_empty());
    assert_eq!(report.empty_labels_dropped, 1);
}

#[test]
fn test_empty_label_keeps_empty_text_element() {
    let source = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:y="http://www.yworks.com/xml/yfiles-common/3.0">
  <graph id="G">
    <node id="n0"><data key="d4"><y:Label Text="  "/></data></node>
  </graph>
</graphml>"#;
    let (xml, _) = simplify(source);

    assert!(
        xml.contains(r#"<node id="n0"><data key="d4"><y:Label.Text/></data></node>"#),
        "unexpected output:\n{xml}"
    );
    let (again, _) = simplify(&xml);
    assert_eq!(xml, again);
}

#[test]
fn test_port_removal_regardless_of_label() {
    let source = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <graph id="G">
    <node id="labelled"><data key="d4"><y:Label xmlns:y="http://www.yworks.com/xml/yfiles-common/3.0" Text="A"/></data><port name="p0"/><port name="p1"/></node>
    <node id="bare"><port name="p0"/><port name="p1"/></node>
  </graph>
</graphml>"#;
    let (xml, report) = simplify(source);
    let doc = parse(&xml).unwrap();

    assert_eq!(report.ports_removed, 4);
    for id in ["labelled", "bare"] {
        let node = find(&doc, "node", id);
        assert_eq!(node.child_elements().filter(|c| c.is(ns::GRAPHML, "port")).count(), 0);
    }
}

#[test]
fn test_edge_port_attributes_stripped() {
    let source = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <graph id="G">
    <node id="a"/><node id="b"/>
    <edge id="e0" source="a" target="b" sourceport="p1" targetport="p2"/>
  </graph>
</graphml>"#;
    let (xml, _) = simplify(source);

    assert!(
        xml.contains(r#"<edge id="e0" source="a" target="b"/>"#),
        "unexpected output:\n{xml}"
    );
}

#[test]
fn test_custom_keys() {
    let source = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:y="http://www.yworks.com/xml/yfiles-common/3.0">
  <graph id="G">
    <data key="d2">shared</data>
    <node id="n0"><data key="d6"><y:Label Text="six"/></data><data key="d4"><y:Label Text="four"/></data></node>
    <edge id="e0" source="n0" target="n0"><data key="d10"><y:Label Text="ten"/></data></edge>
  </graph>
</graphml>"#;
    let simplifier = Simplifier::new(AppConfig::new(KeyConfig::new("d6", "d10", "d2")));
    let (xml, report) = simplifier.simplify(source).unwrap();
    let doc = parse(&xml).unwrap();

    assert_eq!(report.shared_entries_removed, 1);
    assert_eq!(label(find(&doc, "node", "n0")).as_deref(), Some("six"));
    assert_eq!(label(find(&doc, "edge", "e0")).as_deref(), Some("ten"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let simplifier = Simplifier::new(AppConfig::new(KeyConfig::new("", "d11", "d19")));
    let err = simplifier.simplify(FIXTURE).unwrap_err();
    assert!(matches!(err, SlimError::Config(_)), "got {err:?}");
}

#[test]
fn test_malformed_input_keeps_source() {
    let source = "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\"><graph></graphml>";
    let err = Simplifier::default().simplify(source).unwrap_err();

    match err {
        SlimError::Xml { err, src } => {
            assert_eq!(src, source);
            assert!(err.position().is_some());
        }
        other => panic!("Expected Xml error, got {other:?}"),
    }
}

#[test]
fn test_missing_graph_is_fatal() {
    let source = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns"><key id="d4"/></graphml>"#;
    let err = Simplifier::default().simplify(source).unwrap_err();
    assert!(matches!(err, SlimError::Structure(_)), "got {err:?}");
}

#[test]
fn test_simplify_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("in.graphml");
    let output = dir.path().join("out.graphml");
    fs::write(&input, FIXTURE).unwrap();

    let report = Simplifier::default()
        .simplify_file(&input, &output)
        .expect("Failed to simplify file");

    assert_eq!(report.nodes, 4);
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, simplify(FIXTURE).0);
}

#[test]
fn test_simplify_file_writes_nothing_on_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.graphml");
    let output = dir.path().join("out.graphml");
    fs::write(&input, "<graphml").unwrap();

    assert!(Simplifier::default().simplify_file(&input, &output).is_err());
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.graphml");
    fs::write(&input, FIXTURE).unwrap();
    let output = dir.path().join("missing-dir").join("out.graphml");

    let err = Simplifier::default()
        .simplify_file(&input, &output)
        .unwrap_err();
    assert!(matches!(err, SlimError::Io(_)), "got {err:?}");
}

#[test]
fn test_phases_can_run_separately() {
    let simplifier = Simplifier::default();
    let mut doc = simplifier.load(FIXTURE).unwrap();
    let mut report = simplifier.transform(&mut doc).unwrap();
    let xml = simplifier.save(&mut doc, &mut report).unwrap();

    assert_eq!((xml, report), simplify(FIXTURE));
}
