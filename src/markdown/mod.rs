//! Markdown pre-processing pipeline.
//!
//! A document flows through a fixed sequence of pure `Document -> Document`
//! stages before it reaches the index builder. Each stage owns one concern
//! and is tested in isolation:
//!
//! | Stage                        | Applies to | Effect                                  |
//! |------------------------------|------------|-----------------------------------------|
//! | [`tags::extract_tag_line`]   | posts      | trailing `#tag` line -> `meta.tags`     |
//! | [`extract::extract_title_description`] | articles | first H1/paragraph -> meta    |
//! | [`words::count_stage`]       | both       | word count + reading time -> meta       |
//!
//! Stages never perform I/O and never fail; same input, same output.

pub mod extract;
pub mod preview;
pub mod tags;
pub mod words;

/// A markdown body plus the metadata derived from (or feeding) the stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Markdown body text. Stages may rewrite it (e.g. tag-line removal).
    pub body: String,
    /// Derived metadata, pre-seeded with frontmatter values where present.
    pub meta: DocMeta,
}

/// Metadata carried alongside a document body.
///
/// Fields already populated (from frontmatter) act as overrides: stages
/// only fill what is missing, mirroring how explicit metadata always wins
/// over derived values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub word_count: usize,
    pub reading_time: usize,
}

impl Document {
    /// Wrap a raw body with frontmatter-seeded metadata.
    pub fn new(body: impl Into<String>, meta: DocMeta) -> Self {
        Self {
            body: body.into(),
            meta,
        }
    }
}

/// One pipeline stage.
pub type Stage = fn(Document) -> Document;

/// Stage order for short-form posts.
pub const POST_STAGES: &[Stage] = &[tags::extract_tag_line, words::count_stage];

/// Stage order for long-form articles.
pub const ARTICLE_STAGES: &[Stage] = &[extract::extract_title_description, words::count_stage];

/// Run a document through the given stages in order.
pub fn run(doc: Document, stages: &[Stage]) -> Document {
    stages.iter().fold(doc, |doc, stage| stage(doc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_pipeline_order() {
        // Tag removal happens before counting, so tag tokens never inflate
        // the word count.
        let doc = Document::new("One two three\n\n#rust #blog", DocMeta::default());
        let out = run(doc, POST_STAGES);

        assert_eq!(out.body, "One two three");
        assert_eq!(out.meta.tags, vec!["rust", "blog"]);
        assert_eq!(out.meta.word_count, 3);
        assert_eq!(out.meta.reading_time, 1);
    }

    #[test]
    fn test_article_pipeline_extracts_and_counts() {
        let doc = Document::new(
            "# My Title\n\nAn opening paragraph.\n\nMore body text here.",
            DocMeta::default(),
        );
        let out = run(doc, ARTICLE_STAGES);

        assert_eq!(out.meta.title.as_deref(), Some("My Title"));
        assert_eq!(out.meta.description.as_deref(), Some("An opening paragraph."));
        assert_eq!(out.body, "More body text here.");
        assert_eq!(out.meta.word_count, 4);
    }

    #[test]
    fn test_run_empty_stage_list_is_identity() {
        let doc = Document::new("unchanged", DocMeta::default());
        let out = run(doc.clone(), &[]);
        assert_eq!(out, doc);
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let doc = Document::new("Hello world\n\n#foo", DocMeta::default());
        let a = run(doc.clone(), POST_STAGES);
        let b = run(doc, POST_STAGES);
        assert_eq!(a, b);
    }
}
