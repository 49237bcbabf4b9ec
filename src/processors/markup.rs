//! Markup content processor: text-node extraction, reinsertion, and
//! serialization with the downstream tag-case convention

use std::cell::RefCell;
use std::rc::Rc;

use html5ever::serialize::{serialize, SerializeOpts};
use html5ever::tendril::StrTendril;
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use regex::Regex;

use crate::core::errors::Result;
use crate::core::models::TextLocation;
use crate::processors::dom::{content_root, html_to_dom, text_content};

/// In-memory form of one record's markup content.
///
/// `<style>` blocks are stripped at parse time and kept aside so their text
/// never reaches the translation endpoint; they are re-prepended verbatim
/// when the document is rendered.
pub struct MarkupDocument {
    dom: RcDom,
    style: Option<String>,
}

impl MarkupDocument {
    /// Parse serialized markup content
    pub fn parse(content: &str) -> Self {
        let dom = html_to_dom(content);
        let style = extract_style_blocks(&dom);
        Self { dom, style }
    }

    /// Serialize the content subtree without any post-processing
    pub fn serialize_content(&self) -> Result<String> {
        let mut buf: Vec<u8> = Vec::new();
        let serializable: SerializableHandle = content_root(&self.dom).into();
        serialize(&mut buf, &serializable, SerializeOpts::default())?;
        Ok(String::from_utf8_lossy(&buf).to_string())
    }

    /// Serialize, apply the tag-case convention, and re-prepend any
    /// extracted style block
    pub fn render(&self) -> Result<String> {
        let markup = normalize_tag_case(&self.serialize_content()?);

        match &self.style {
            Some(style) => Ok(format!("{}{}", format_style_block(style), markup)),
            None => Ok(markup),
        }
    }
}

/// Visit every non-blank text leaf below `root` in pre-order.
///
/// Extraction and reinsertion both run through here, which keeps their
/// visitation order identical by construction. The traversal uses an
/// explicit stack; children are pushed in reverse so they are popped in
/// document order.
fn for_each_text_leaf<F>(root: &Handle, mut visit: F)
where
    F: FnMut(&RefCell<StrTendril>),
{
    let mut stack: Vec<Handle> = root.children.borrow().iter().rev().cloned().collect();

    while let Some(node) = stack.pop() {
        match node.data {
            NodeData::Text { ref contents } => {
                if !contents.borrow().trim().is_empty() {
                    visit(contents);
                }
            }
            _ => {
                for child in node.children.borrow().iter().rev() {
                    stack.push(child.clone());
                }
            }
        }
    }
}

/// Collect every non-blank text leaf across `docs` in document order.
///
/// Returns the flat payload list and, for each entry, the document index
/// and the zero-based leaf position within that document. Absent documents
/// contribute nothing and consume no position counters.
pub fn extract_text_nodes(docs: &[Option<MarkupDocument>]) -> (Vec<String>, Vec<TextLocation>) {
    let mut flat_texts = Vec::new();
    let mut index = Vec::new();

    for (document_index, doc) in docs.iter().enumerate() {
        if let Some(doc) = doc {
            let mut position_in_document = 0;
            for_each_text_leaf(&content_root(&doc.dom), |contents| {
                flat_texts.push(contents.borrow().to_string());
                index.push(TextLocation {
                    document_index,
                    position_in_document,
                });
                position_in_document += 1;
            });
        }
    }

    (flat_texts, index)
}

/// Write translations back into the text leaves they were extracted from.
///
/// The traversal is re-run exactly as during extraction, so the Nth leaf of
/// a document receives the Nth translation recorded for that document.
/// Leaves with no corresponding translation keep their original text.
/// Returns the number of leaves left untranslated.
pub fn reinsert_text_nodes(
    docs: &[Option<MarkupDocument>],
    index: &[TextLocation],
    translations: &[String],
) -> usize {
    let mut per_document: Vec<Vec<Option<&str>>> = vec![Vec::new(); docs.len()];
    for (flat_index, location) in index.iter().enumerate() {
        per_document[location.document_index]
            .push(translations.get(flat_index).map(String::as_str));
    }

    let mut untranslated = 0;
    for (document_index, doc) in docs.iter().enumerate() {
        if let Some(doc) = doc {
            let doc_translations = &per_document[document_index];
            let mut position = 0;
            for_each_text_leaf(&content_root(&doc.dom), |contents| {
                match doc_translations.get(position).copied().flatten() {
                    Some(translated) => {
                        *contents.borrow_mut() = StrTendril::from_slice(translated);
                    }
                    None => untranslated += 1,
                }
                position += 1;
            });
        }
    }

    untranslated
}

/// Rewrite the fixed tag whitelist to the consumer's upper-case convention.
///
/// This is a literal post-processing pass over the serialized markup, not a
/// general case transform: only div, img, br, b, table, tbody, tr, td and
/// span are rewritten, `</img>` is dropped, and `<br>`/`<br/>` become
/// `<BR/>`. Tags outside the whitelist are left as the serializer emitted
/// them.
pub fn normalize_tag_case(markup: &str) -> String {
    let normalized = markup
        .replace("<div", "<DIV")
        .replace("</div>", "</DIV>")
        .replace("<img", "<IMG")
        .replace("</img>", "");

    let normalized = Regex::new(r"<br/?>")
        .unwrap()
        .replace_all(&normalized, "<BR/>")
        .into_owned();

    normalized
        .replace("<b>", "<B>")
        .replace("</b>", "</B>")
        .replace("<table", "<TABLE")
        .replace("</table>", "</TABLE>")
        .replace("<tbody", "<TBODY")
        .replace("</tbody>", "</TBODY>")
        .replace("<tr", "<TR")
        .replace("</tr>", "</TR>")
        .replace("<td", "<TD")
        .replace("</td>", "</TD>")
        .replace("<span", "<SPAN")
        .replace("</span>", "</SPAN>")
}

/// Collect and strip `<style>` blocks anywhere in the document.
///
/// Multiple blocks are concatenated in document order. Returns `None` when
/// the document carries no style text.
fn extract_style_blocks(dom: &RcDom) -> Option<String> {
    let mut style_nodes: Vec<(Handle, Handle)> = Vec::new();
    let mut stack: Vec<(Handle, Handle)> = dom
        .document
        .children
        .borrow()
        .iter()
        .rev()
        .map(|child| (dom.document.clone(), child.clone()))
        .collect();

    while let Some((parent, node)) = stack.pop() {
        let is_style =
            matches!(node.data, NodeData::Element { ref name, .. } if &*name.local == "style");
        if is_style {
            style_nodes.push((parent, node));
        } else {
            for child in node.children.borrow().iter().rev() {
                stack.push((node.clone(), child.clone()));
            }
        }
    }

    let mut style = String::new();
    for (parent, node) in &style_nodes {
        style.push_str(&text_content(node));
        parent
            .children
            .borrow_mut()
            .retain(|child| !Rc::ptr_eq(child, node));
    }

    if style.is_empty() {
        None
    } else {
        Some(style)
    }
}

/// Literal `<style>` block placed ahead of the normalized markup
fn format_style_block(style: &str) -> String {
    let indented = style
        .split('\n')
        .map(|line| format!("        {}", line))
        .collect::<Vec<_>>()
        .join("\n");
    format!("    <style>\n{}\n    </style>\n", indented)
}
