//! Element hooks for output-specific markup.
//!
//! [`MarkdownRenderer`](crate::MarkdownRenderer) renders everything that
//! looks the same in every target and hands the remaining elements to a
//! [`RenderBackend`].

/// Markup for the elements whose rendering differs between targets.
///
/// Hooks are associated functions: a backend is a type-level strategy and
/// carries no state. Code blocks, blockquotes and images must be provided;
/// breaks, rules and task list markers default to HTML.
pub trait RenderBackend {
    /// Write a code block.
    ///
    /// `lang` is the first word of the fence info string, if any. `content`
    /// is the block text exactly as written, unescaped and with its
    /// indentation intact.
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    fn blockquote_start(out: &mut String);

    fn blockquote_end(out: &mut String);

    /// Write an image. `title` is empty when the source gives none.
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Write the checkbox of a task list item.
    fn task_list_marker(checked: bool, out: &mut String) {
        let checked = if checked { " checked" } else { "" };
        out.push_str(&format!(r#"<input type="checkbox"{checked} disabled> "#));
    }
}
