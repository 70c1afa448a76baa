//! Optional-returning lookups for walking entry elements.
//!
//! Every helper answers `None` (or an empty iterator) when something is
//! missing, so callers can chain them with `and_then` without failing a
//! whole record.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Arguments
/// * `node` - XML node
///
/// # Returns
/// Local tag name (e.g., "adb_entry")
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use astrodata_filter::xml::get_tag_name;
///
/// let doc = Document::parse(r#"<adb_entry adb_id="1"/>"#).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "adb_entry");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `tag` - Tag name to search for
///
/// # Returns
/// First matching child element, or `None` if not found
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use astrodata_filter::xml::find_child;
///
/// let doc = Document::parse(r#"<adb_entry><public_data/></adb_entry>"#).unwrap();
/// let entry = doc.root_element();
///
/// assert!(find_child(entry, "public_data").is_some());
/// assert!(find_child(entry, "research_data").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `tag` - Tag name to search for
///
/// # Returns
/// Iterator over matching child elements, in document order
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Follow a slash-separated path of child tags.
///
/// # Arguments
/// * `node` - Starting node
/// * `path` - Slash-separated tag names (e.g., "public_data/bdata")
///
/// # Returns
/// The element at the end of the path, or `None` at the first missing link
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use astrodata_filter::xml::find_by_path;
///
/// let xml = r#"<adb_entry><public_data><bdata><place>Paris</place></bdata></public_data></adb_entry>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let place = find_by_path(doc.root_element(), "public_data/bdata/place");
/// assert_eq!(place.and_then(|n| n.text()), Some("Paris"));
/// assert!(find_by_path(doc.root_element(), "research_data/categories").is_none());
/// ```
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    path.split('/')
        .try_fold(node, |current, part| find_child(current, part))
}

/// Trimmed text content of a node, empty when the node has no text.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Trimmed text of a child element.
///
/// # Arguments
/// * `node` - Parent node
/// * `tag` - Tag name of the child
///
/// # Returns
/// The text, or `None` when the child is missing or blank
pub fn child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    find_child(node, tag)
        .map(get_text)
        .filter(|s| !s.is_empty())
}

/// Trimmed attribute value.
///
/// # Arguments
/// * `node` - Element carrying the attribute
/// * `name` - Attribute name (e.g., "sun_degmin")
///
/// # Returns
/// The value, or `None` when absent or blank
pub fn attribute_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
