//! Node processing.

use log::trace;

use graphml_slim_core::{Document, Element, name::ns};

use super::{
    SimplifyReport,
    label::{LabelOutcome, normalize_label_entry},
};

/// Reduce every `<node>` to at most one label entry and remove its ports.
///
/// Nodes are visited in document order, including nodes of graphs nested in
/// group nodes. A node without a `label_key` entry ends up with no `data`
/// entry at all; ports are removed whatever happened to the label.
pub fn process_nodes(document: &mut Document, label_key: &str, report: &mut SimplifyReport) {
    document.root_mut().walk_mut(&mut |element: &mut Element| {
        if !element.is(ns::GRAPHML, "node") {
            return;
        }
        report.nodes += 1;

        let cleanup = normalize_label_entry(element, label_key);
        report.entries_removed += cleanup.removed;
        match &cleanup.outcome {
            LabelOutcome::Kept(_) => report.node_labels += 1,
            LabelOutcome::Dropped => report.empty_labels_dropped += 1,
            LabelOutcome::Missing => {}
        }

        let ports = element
            .remove_child_elements(|child| child.is(ns::GRAPHML, "port"))
            .len();
        report.ports_removed += ports;

        trace!(
            id = element.attribute("id").unwrap_or_default(),
            label:? = cleanup.outcome,
            ports;
            "Processed node"
        );
    });
}

#[cfg(test)]
mod tests {
    use graphml_slim_core::reader::parse;

    use super::*;

    const SOURCE: &str = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:y="http://www.yworks.com/xml/yfiles-common/3.0">
  <graph id="G">
    <node id="n0">
      <data key="d3">style</data>
      <data key="d4"><y:Label><y:Label.Text>Hello</y:Label.Text></y:Label></data>
      <port name="p0"/>
      <port name="p1"><data key="d8">port style</data></port>
    </node>
    <node id="n1">
      <data key="d4"/>
      <port name="p0"/>
    </node>
    <node id="group">
      <graph id="group:">
        <node id="group::n0"><data key="d4"><y:Label Text="inner"/></data></node>
      </graph>
    </node>
    <edge source="n0" target="n1"><data key="d3"/></edge>
  </graph>
</graphml>"#;

    #[test]
    fn test_process_nodes() {
        let mut doc = parse(SOURCE).unwrap();
        let mut report = SimplifyReport::default();
        process_nodes(&mut doc, "d4", &mut report);

        assert_eq!(report.nodes, 4);
        assert_eq!(report.node_labels, 2);
        assert_eq!(report.empty_labels_dropped, 1);
        assert_eq!(report.entries_removed, 1);
        assert_eq!(report.ports_removed, 3);

        let mut nodes = Vec::new();
        doc.root().walk(&mut |e: &Element| {
            if e.is(ns::GRAPHML, "node") {
                let data: Vec<_> = e
                    .child_elements()
                    .filter(|c| c.is(ns::GRAPHML, "data"))
                    .collect();
                assert!(e.child_elements().all(|c| !c.is(ns::GRAPHML, "port")));
                nodes.push((
                    e.attribute("id").unwrap().to_string(),
                    data.len(),
                    data.first()
                        .and_then(|d| d.find_descendant(ns::YFILES, "Label.Text"))
                        .map(|t| t.text()),
                ));
            }
        });

        assert_eq!(
            nodes,
            [
                ("n0".to_string(), 1, Some("Hello".to_string())),
                ("n1".to_string(), 0, None),
                ("group".to_string(), 0, None),
                ("group::n0".to_string(), 1, Some("inner".to_string())),
            ]
        );
    }

    #[test]
    fn test_edges_are_not_touched() {
        let mut doc = parse(SOURCE).unwrap();
        let mut report = SimplifyReport::default();
        process_nodes(&mut doc, "d4", &mut report);

        let edge = doc.root().find_descendant(ns::GRAPHML, "edge").unwrap();
        assert_eq!(edge.child_elements().count(), 1);
        assert_eq!(report.edges, 0);
    }
}
