//! HTML serialization of the in-memory document.
//!
//! Used by the `simulate` command to show the page after a scenario ran.
//! Elements are written in document order with classes first, then the
//! remaining attributes sorted by name, then the inline style.

use crate::dom::{Document, ElementId};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Elements that never have a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Elements whose text is emitted verbatim.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}

pub fn render_page(doc: &Document) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            (PreEscaped(render_element(doc, doc.head())))
            (PreEscaped(render_element(doc, doc.body())))
        }
    }
}

/// Serialize one element and its subtree.
pub fn render_element(doc: &Document, id: ElementId) -> String {
    let mut out = String::new();
    write_element(doc, id, &mut out);
    out
}

fn write_element(doc: &Document, id: ElementId, out: &mut String) {
    let el = doc.get(id);
    let tag = el.tag();

    out.push('<');
    out.push_str(tag);
    if !el.classes().is_empty() {
        out.push_str(&format!(r#" class="{}""#, escape(&el.classes().join(" "))));
    }
    for (name, value) in el.attributes() {
        out.push_str(&format!(r#" {name}="{}""#, escape(value)));
    }
    if !el.styles().is_empty() {
        out.push_str(&format!(r#" style="{}""#, escape(&el.style_text())));
    }
    out.push('>');

    if VOID_TAGS.contains(&tag) {
        return;
    }
    if RAW_TEXT_TAGS.contains(&tag) {
        out.push_str(el.text());
    } else {
        out.push_str(&escape(el.text()));
    }
    for child in doc.children(id) {
        write_element(doc, *child, out);
    }
    out.push_str(&format!("</{tag}>"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementSpec;

    #[test]
    fn renders_nested_elements_with_attributes() {
        let mut doc = Document::new();
        let body = doc.body();
        let card = doc.insert_spec(
            body,
            &ElementSpec::new("div")
                .id("card")
                .class("mystic-card")
                .class("fade-in")
                .child(ElementSpec::new("img").attr("src", "a.jpg"))
                .child(ElementSpec::new("p").text("Amarres")),
        );
        doc.get_mut(card).set_style("opacity", "1");

        let html = render_element(&doc, card);
        assert_eq!(
            html,
            r#"<div class="mystic-card fade-in" id="card" style="opacity: 1;"><img src="a.jpg"><p>Amarres</p></div>"#
        );
    }

    #[test]
    fn escapes_text_and_attribute_values() {
        let mut doc = Document::new();
        let body = doc.body();
        let link = doc.insert_spec(
            body,
            &ElementSpec::new("a")
                .attr("data-message", r#"Hola "amigo" & <familia>"#)
                .text("<b>no</b>"),
        );
        let html = render_element(&doc, link);
        assert!(html.contains(r#"data-message="Hola &quot;amigo&quot; &amp; &lt;familia&gt;""#));
        assert!(html.contains("&lt;b&gt;no&lt;/b&gt;"));
    }

    #[test]
    fn style_rules_are_not_escaped() {
        let mut doc = Document::new();
        doc.add_style_rules(".a > .b { color: red; }");
        let html = render_page(&doc).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>.a > .b { color: red; }</style>"));
        assert!(html.contains("<body></body>"));
    }
}
