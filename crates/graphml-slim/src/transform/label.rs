//! Label entry normalization shared by nodes and edges.

use graphml_slim_core::{Element, QName, name::ns};

use crate::text::clean_label_text;

/// What happened to the label entry of a node or edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum LabelOutcome {
    /// The entry now holds a single `y:Label.Text` with this cleaned text.
    Kept(String),
    /// The entry held no label text and was removed.
    Dropped,
    /// There was no entry with the label key.
    Missing,
}

/// Result of [`normalize_label_entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct EntryCleanup {
    /// Other `data` entries removed from the owner, including duplicates of
    /// the label entry.
    pub removed: usize,
    pub outcome: LabelOutcome,
}

/// Reduce the `data` children of `owner` to one normalized label entry.
///
/// Entries with any other key are removed. Of the entries keyed
/// `label_key`, only the first is considered. Its label is taken from a
/// nested `y:Label.Text` element if there is one, otherwise from the `Text`
/// attribute of the first `y:Label`. The entry is then rebuilt to hold only
/// the cleaned text, or removed when neither form is present.
pub(super) fn normalize_label_entry(owner: &mut Element, label_key: &str) -> EntryCleanup {
    let mut removed = owner
        .remove_child_elements(|child| is_data(child) && child.attribute("key") != Some(label_key))
        .len();

    let mut seen = false;
    removed += owner
        .remove_child_elements(|child| {
            if !is_label_entry(child, label_key) {
                return false;
            }
            let duplicate = seen;
            seen = true;
            duplicate
        })
        .len();

    let Some(entry) = owner
        .child_elements_mut()
        .find(|child| is_label_entry(child, label_key))
    else {
        return EntryCleanup {
            removed,
            outcome: LabelOutcome::Missing,
        };
    };

    if let Some(raw) = extract_label(entry) {
        let cleaned = clean_label_text(Some(&raw));
        rebuild_entry(entry, label_key, &cleaned);
        return EntryCleanup {
            removed,
            outcome: LabelOutcome::Kept(cleaned),
        };
    }

    owner.remove_child_elements(|child| is_label_entry(child, label_key));
    EntryCleanup {
        removed,
        outcome: LabelOutcome::Dropped,
    }
}

/// Raw label text of an entry. The nested text form wins over the attribute form.
fn extract_label(entry: &Element) -> Option<String> {
    if let Some(text) = entry.find_descendant(ns::YFILES, "Label.Text") {
        return Some(text.text());
    }
    entry
        .find_descendant(ns::YFILES, "Label")
        .and_then(|label| label.attribute("Text"))
        .map(str::to_string)
}

/// Replace everything in `entry` with `<y:Label.Text>{text}</y:Label.Text>`,
/// keeping only the `key` attribute.
fn rebuild_entry(entry: &mut Element, label_key: &str, text: &str) {
    entry.retain_attributes(|_| false);
    entry.set_attribute("key", label_key);
    entry.clear_children();

    let mut label_text = Element::new(QName::namespaced(ns::YFILES, "Label.Text"));
    if !text.is_empty() {
        label_text.push_text(text);
    }
    entry.push_element(label_text);
}

fn is_data(element: &Element) -> bool {
    element.is(ns::GRAPHML, "data")
}

fn is_label_entry(element: &Element, label_key: &str) -> bool {
    is_data(element) && element.attribute("key") == Some(label_key)
}
