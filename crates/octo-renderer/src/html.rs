//! Plain HTML element markup.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::state::escape_html;

/// Backend producing plain HTML5.
///
/// Code blocks are escaped into `<pre><code>` with a `language-*` class,
/// which is what client-side highlighters pick up.
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        let class = lang
            .map(|lang| format!(r#" class="language-{}""#, escape_html(lang)))
            .unwrap_or_default();
        write!(out, "<pre><code{class}>{}</code></pre>", escape_html(content)).unwrap();
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        write!(out, r#"<img src="{}""#, escape_html(src)).unwrap();
        if !title.is_empty() {
            write!(out, r#" title="{}""#, escape_html(title)).unwrap();
        }
        write!(out, r#" alt="{}">"#, escape_html(alt)).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        HtmlBackend::code_block(Some("rust"), "let x = 1 < 2;", &mut out);
        assert_eq!(
            out,
            r#"<pre><code class="language-rust">let x = 1 &lt; 2;</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let mut out = String::new();
        HtmlBackend::code_block(None, "plain", &mut out);
        assert_eq!(out, "<pre><code>plain</code></pre>");
    }

    #[test]
    fn test_image_with_title() {
        let mut out = String::new();
        HtmlBackend::image("cat.png", "A cat", "Cat", &mut out);
        assert_eq!(out, r#"<img src="cat.png" title="Cat" alt="A cat">"#);
    }

    #[test]
    fn test_image_without_title() {
        let mut out = String::new();
        HtmlBackend::image("cat.png", "A cat", "", &mut out);
        assert_eq!(out, r#"<img src="cat.png" alt="A cat">"#);
    }

    #[test]
    fn test_default_hooks() {
        let mut out = String::new();
        HtmlBackend::hard_break(&mut out);
        HtmlBackend::horizontal_rule(&mut out);
        HtmlBackend::task_list_marker(true, &mut out);
        assert_eq!(
            out,
            r#"<br><hr><input type="checkbox" checked disabled> "#
        );
    }
}
