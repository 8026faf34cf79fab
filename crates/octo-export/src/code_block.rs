//! Code blocks as publishing-platform shortcodes.

/// A source code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language identifier, if the block names one.
    pub language: Option<String>,
    /// Raw block text.
    pub value: String,
}

impl CodeBlock {
    /// Render this block as a shortcode.
    #[must_use]
    pub fn to_shortcode(&self) -> String {
        format_shortcode(self.language.as_deref(), &self.value)
    }
}

/// Wrap code in a `{% codeblock %}` shortcode.
///
/// The common leading indentation is removed first; otherwise the value is
/// passed through verbatim, unescaped, keeping whatever trailing newline it
/// had. A missing or empty language omits the `lang:` argument.
///
/// ```
/// use octo_export::format_shortcode;
///
/// assert_eq!(
///     format_shortcode(Some("python"), "print(1)\n"),
///     "{% codeblock lang:python %}\nprint(1)\n{% endcodeblock %}"
/// );
/// ```
#[must_use]
pub fn format_shortcode(language: Option<&str>, value: &str) -> String {
    let value = dedent(value);
    match language.map(str::trim).filter(|lang| !lang.is_empty()) {
        Some(lang) => format!("{{% codeblock lang:{lang} %}}\n{value}{{% endcodeblock %}}"),
        None => format!("{{% codeblock %}}\n{value}{{% endcodeblock %}}"),
    }
}

/// Remove the indentation common to all non-blank lines.
///
/// Spaces and tabs both count as one column. Blank lines do not limit the
/// common indentation and lose at most that much leading whitespace.
#[must_use]
pub fn dedent(text: &str) -> String {
    let indent_of = |line: &str| {
        line.bytes()
            .take_while(|b| *b == b' ' || *b == b'\t')
            .count()
    };

    let common = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(indent_of)
        .min()
        .unwrap_or(0);
    if common == 0 {
        return text.to_owned();
    }

    text.split_inclusive('\n')
        .map(|line| &line[indent_of(line).min(common)..])
        .collect()
}
