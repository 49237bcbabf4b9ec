//! Basic helpers over the parsed markup tree

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse serialized markup into a DOM
pub fn html_to_dom(markup: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut markup.as_bytes())
        .unwrap()
}

/// Find the first direct child element with the given tag name
pub fn get_child_node_by_name(parent: &Handle, node_name: &str) -> Option<Handle> {
    let children = parent.children.borrow();
    let matching_children = children.iter().find(|child| match child.data {
        NodeData::Element { ref name, .. } => &*name.local == node_name,
        _ => false,
    });
    matching_children.cloned()
}

/// Node whose children are the document's content.
///
/// The parser wraps fragments in html/head/body containers; the body is
/// where record content lands.
pub fn content_root(dom: &RcDom) -> Handle {
    get_child_node_by_name(&dom.document, "html")
        .and_then(|html| get_child_node_by_name(&html, "body"))
        .unwrap_or_else(|| dom.document.clone())
}

/// Concatenated text of a node's direct text children
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    for child in node.children.borrow().iter() {
        if let NodeData::Text { ref contents } = child.data {
            text.push_str(&contents.borrow());
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_root_is_the_body() {
        let dom = html_to_dom("<div>hello</div>");
        let root = content_root(&dom);
        assert!(matches!(root.data, NodeData::Element { ref name, .. } if &*name.local == "body"));
        assert_eq!(root.children.borrow().len(), 1);
    }

    #[test]
    fn test_text_content_joins_direct_text_children() {
        let dom = html_to_dom("<div>one<span>skip</span>two</div>");
        let body = content_root(&dom);
        let div = get_child_node_by_name(&body, "div").unwrap();
        assert_eq!(text_content(&div), "onetwo");
    }
}
