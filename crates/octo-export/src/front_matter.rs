//! Front matter header block.
//!
//! The header is a `---`-delimited block of `key: value` lines read by
//! static-site generators. Field order and layout are fixed so the output
//! stays byte-compatible with downstream tooling:
//!
//! ```text
//! ---
//! title: "<title>"
//! date: <date>
//! lang: <lang>
//! layout: <layout>
//! ref: <ref>
//! permalink: <permalink>
//! categories: <list-or-empty>
//! tags: <list-or-empty>
//! published: <published>
//! comments: <comments>
//! ---
//! ```

use std::fmt;

use octo_renderer::InlineFormatter;

use crate::error::ExportError;
use crate::field::{FieldDefaults, FieldResolver, format_list};
use crate::options::ExportOptions;
use crate::publish::PublishState;

/// Title prefix marking a preview document.
pub const PREVIEW_TITLE_PREFIX: &str = "[PREVIEW] ";

const DELIMITER: &str = "---";

/// Resolved front matter for one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrontMatter {
    title: String,
    date: String,
    lang: String,
    layout: String,
    reference: String,
    permalink: String,
    categories: String,
    tags: String,
    published: String,
    comments: String,
    state: PublishState,
}

impl FrontMatter {
    /// Resolve all header fields from a document's options.
    ///
    /// `layout`, `categories`, `tags` and `published` fall back to
    /// `defaults`; the remaining fields are empty when unset. A preview
    /// document gets [`PREVIEW_TITLE_PREFIX`] in front of its title.
    ///
    /// # Errors
    ///
    /// Propagates inline formatting failures.
    pub fn build<F: InlineFormatter>(
        options: &ExportOptions,
        defaults: &FieldDefaults,
        formatter: &F,
    ) -> Result<Self, ExportError> {
        let fields = FieldResolver::new(options, formatter);

        let title = fields.resolve("title", None)?;
        let date = fields.resolve("date", None)?;
        let lang = fields.resolve("lang", None)?;
        let reference = fields.resolve("ref", None)?;
        let permalink = fields.resolve("permalink", None)?;
        let layout = fields.resolve("layout", Some(&defaults.layout))?;
        let categories = fields.resolve("categories", Some(&defaults.categories))?;
        let tags = fields.resolve("tags", Some(&defaults.tags))?;
        let published = fields.resolve("published", Some(&defaults.published))?;
        let comments = fields.resolve("comments", None)?;

        let state = PublishState::parse(&published);
        let title = match state {
            PublishState::Published => title,
            PublishState::Preview => format!("{PREVIEW_TITLE_PREFIX}{title}"),
        };
        tracing::debug!(%state, %layout, "Resolved front matter");

        Ok(Self {
            title,
            date,
            lang,
            layout,
            reference,
            permalink,
            categories,
            tags,
            published,
            comments,
            state,
        })
    }

    /// Publish state derived from the `published` field.
    #[must_use]
    pub fn state(&self) -> PublishState {
        self.state
    }

    /// Title as written to the header, including any preview prefix.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Header entries in output order, values exactly as emitted.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, String); 10] {
        [
            ("title", format!("\"{}\"", self.title)),
            ("date", self.date.clone()),
            ("lang", self.lang.clone()),
            ("layout", self.layout.clone()),
            ("ref", self.reference.clone()),
            ("permalink", self.permalink.clone()),
            ("categories", format_list(&self.categories)),
            ("tags", format_list(&self.tags)),
            ("published", self.published.clone()),
            ("comments", self.comments.clone()),
        ]
    }

    /// Render the delimited header block, ending with a newline.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(256);
        out.push_str(DELIMITER);
        out.push('\n');
        for (key, value) in self.entries() {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(&value);
            out.push('\n');
        }
        out.push_str(DELIMITER);
        out.push('\n');
        out
    }
}

impl fmt::Display for FrontMatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octo_renderer::MarkdownInline;
    use pretty_assertions::assert_eq;
    use serde_yaml::{Mapping, Value};

    fn build(options: &ExportOptions) -> FrontMatter {
        FrontMatter::build(options, &FieldDefaults::default(), &MarkdownInline).unwrap()
    }

    fn parse_header(header: &str) -> Mapping {
        let inner = header
            .strip_prefix("---\n")
            .and_then(|rest| rest.strip_suffix("---\n"))
            .unwrap();
        serde_yaml::from_str(inner).unwrap()
    }

    #[test]
    fn test_defaults_only() {
        let header = build(&ExportOptions::new()).render();
        assert_eq!(
            header,
            "---\n\
             title: \"\"\n\
             date: \n\
             lang: \n\
             layout: post\n\
             ref: \n\
             permalink: \n\
             categories: \n\
             tags: \n\
             published: true\n\
             comments: \n\
             ---\n"
        );
    }

    #[test]
    fn test_full_header() {
        let options = ExportOptions::new()
            .with("title", "Hello")
            .with("date", "2023-05-01")
            .with("lang", "en")
            .with("ref", "hello")
            .with("permalink", "/hello/")
            .with("layout", "page")
            .with("categories", "rust")
            .with("tags", "a b")
            .with("comments", "true");
        let header = build(&options).render();
        assert_eq!(
            header,
            "---\n\
             title: \"Hello\"\n\
             date: 2023-05-01\n\
             lang: en\n\
             layout: page\n\
             ref: hello\n\
             permalink: /hello/\n\
             categories: \n- rust\n\
             tags: \n- a \n- b\n\
             published: true\n\
             comments: true\n\
             ---\n"
        );
    }

    #[test]
    fn test_published_title_has_no_prefix() {
        let front = build(&ExportOptions::new().with("title", "Hi").with("published", "true"));
        assert_eq!(front.state(), PublishState::Published);
        assert_eq!(front.title(), "Hi");
    }

    #[test]
    fn test_preview_title_is_prefixed() {
        for published in ["false", "draft", "True"] {
            let front =
                build(&ExportOptions::new().with("title", "Hi").with("published", published));
            assert_eq!(front.state(), PublishState::Preview);
            assert_eq!(front.title(), "[PREVIEW] Hi");
        }
    }

    #[test]
    fn test_default_published_setting_drives_preview() {
        let defaults = FieldDefaults {
            published: "false".to_owned(),
            ..FieldDefaults::default()
        };
        let front = FrontMatter::build(
            &ExportOptions::new().with("title", "Hi"),
            &defaults,
            &MarkdownInline,
        )
        .unwrap();
        assert_eq!(front.title(), "[PREVIEW] Hi");
        assert!(front.render().contains("\npublished: false\n"));
    }

    #[test]
    fn test_default_categories_rendered_as_list() {
        let defaults = FieldDefaults {
            categories: "blog notes".to_owned(),
            ..FieldDefaults::default()
        };
        let front =
            FrontMatter::build(&ExportOptions::new(), &defaults, &MarkdownInline).unwrap();
        assert!(front.render().contains("\ncategories: \n- blog \n- notes\n"));
    }

    #[test]
    fn test_header_round_trips_through_yaml() {
        let options = ExportOptions::new()
            .with("title", "Round trip")
            .with("date", "2023-05-01")
            .with("categories", "rust web")
            .with("tags", "one two three")
            .with("published", "false");
        let mapping = parse_header(&build(&options).render());

        let keys: Vec<&str> = mapping.keys().filter_map(Value::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "title",
                "date",
                "lang",
                "layout",
                "ref",
                "permalink",
                "categories",
                "tags",
                "published",
                "comments"
            ]
        );
        assert_eq!(mapping["title"], Value::from("[PREVIEW] Round trip"));
        let categories: Vec<&str> = mapping["categories"]
            .as_sequence()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(categories, vec!["rust", "web"]);
        let tags: Vec<&str> = mapping["tags"]
            .as_sequence()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(tags, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_display_matches_render() {
        let front = build(&ExportOptions::new().with("title", "Shown"));
        assert_eq!(front.to_string(), front.render());
    }
}
