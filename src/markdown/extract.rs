//! Title and description extraction for articles.
//!
//! Article bodies often open with an `# H1` and a lead paragraph repeating
//! what the frontmatter already declares. This stage lifts those into
//! metadata when the frontmatter omits them, and removes them from the
//! body either way (missing or identical), so list views never render the
//! title twice.
//!
//! Fenced code blocks are opaque: a `# comment` inside one is never taken
//! for a heading.

use super::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    /// A `# ` level-one heading line.
    Heading1,
    /// Any other heading line (`##` and deeper).
    Heading,
    /// A run of plain lines.
    Paragraph,
    /// A fenced code block, kept verbatim.
    Code,
}

#[derive(Debug)]
struct Block {
    kind: BlockKind,
    text: String,
}

/// Pipeline stage: pull the first H1 and lead paragraph into metadata.
///
/// - H1 removed when `meta.title` is absent or matches it; an absent title
///   is filled from the heading.
/// - The first paragraph after the H1 (or the first paragraph at all when
///   there is no H1) is treated the same way against `meta.description`.
pub fn extract_title_description(mut doc: Document) -> Document {
    let blocks = split_blocks(&doc.body);
    let mut removed = vec![false; blocks.len()];

    let h1_index = blocks.iter().position(|b| b.kind == BlockKind::Heading1);

    if let Some(i) = h1_index {
        let h1_text = heading_text(&blocks[i].text);
        if doc.meta.title.as_deref().is_none_or(|t| t == h1_text) {
            if doc.meta.title.is_none() {
                doc.meta.title = Some(h1_text.to_owned());
            }
            removed[i] = true;
        }
    }

    let search_start = h1_index.map_or(0, |i| i + 1);
    let p_index = blocks
        .iter()
        .enumerate()
        .skip(search_start)
        .find(|(_, b)| b.kind == BlockKind::Paragraph)
        .map(|(i, _)| i);

    if let Some(i) = p_index {
        let p_text = blocks[i].text.trim();
        if doc.meta.description.as_deref().is_none_or(|d| d == p_text) {
            if doc.meta.description.is_none() {
                doc.meta.description = Some(p_text.to_owned());
            }
            removed[i] = true;
        }
    }

    doc.body = blocks
        .iter()
        .zip(&removed)
        .filter(|(_, gone)| !**gone)
        .map(|(b, _)| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    doc
}

/// Text of a heading line with the marker stripped.
fn heading_text(line: &str) -> &str {
    line.trim_start().trim_start_matches('#').trim()
}

/// Split a body into top-level blocks.
///
/// Blank lines separate blocks; heading lines always form their own block;
/// fenced regions (``` or ~~~) become one `Code` block even when they
/// contain blank lines.
fn split_blocks(body: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut fence: Vec<&str> = Vec::new();
    let mut in_fence = false;

    let flush_paragraph = |lines: &mut Vec<&str>, blocks: &mut Vec<Block>| {
        if !lines.is_empty() {
            blocks.push(Block {
                kind: BlockKind::Paragraph,
                text: lines.join("\n"),
            });
            lines.clear();
        }
    };

    for line in body.lines() {
        let trimmed = line.trim_start();
        let is_fence_marker = trimmed.starts_with("```") || trimmed.starts_with("~~~");

        if in_fence {
            fence.push(line);
            if is_fence_marker {
                blocks.push(Block {
                    kind: BlockKind::Code,
                    text: fence.join("\n"),
                });
                fence.clear();
                in_fence = false;
            }
            continue;
        }

        if is_fence_marker {
            flush_paragraph(&mut paragraph, &mut blocks);
            fence.push(line);
            in_fence = true;
            continue;
        }

        if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            continue;
        }

        if trimmed.starts_with('#') {
            flush_paragraph(&mut paragraph, &mut blocks);
            let kind = if trimmed.starts_with("# ") {
                BlockKind::Heading1
            } else {
                BlockKind::Heading
            };
            blocks.push(Block {
                kind,
                text: line.to_owned(),
            });
            continue;
        }

        paragraph.push(line);
    }

    // An unterminated fence still counts as code
    if !fence.is_empty() {
        blocks.push(Block {
            kind: BlockKind::Code,
            text: fence.join("\n"),
        });
    }
    flush_paragraph(&mut paragraph, &mut blocks);

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::DocMeta;

    fn doc(body: &str) -> Document {
        Document::new(body, DocMeta::default())
    }

    #[test]
    fn test_extracts_title_and_description() {
        let out = extract_title_description(doc(
            "# Hello\n\nThe lead paragraph.\n\nRemaining body.",
        ));
        assert_eq!(out.meta.title.as_deref(), Some("Hello"));
        assert_eq!(out.meta.description.as_deref(), Some("The lead paragraph."));
        assert_eq!(out.body, "Remaining body.");
    }

    #[test]
    fn test_matching_frontmatter_title_deduplicated() {
        let meta = DocMeta {
            title: Some("Hello".into()),
            ..DocMeta::default()
        };
        let out = extract_title_description(Document::new("# Hello\n\nBody.", meta));

        // Title kept from frontmatter, duplicate heading removed
        assert_eq!(out.meta.title.as_deref(), Some("Hello"));
        assert!(!out.body.contains("# Hello"));
    }

    #[test]
    fn test_different_frontmatter_title_keeps_heading() {
        let meta = DocMeta {
            title: Some("Frontmatter Title".into()),
            ..DocMeta::default()
        };
        let out = extract_title_description(Document::new("# In-body Title\n\nBody.", meta));

        assert_eq!(out.meta.title.as_deref(), Some("Frontmatter Title"));
        assert!(out.body.contains("# In-body Title"));
    }

    #[test]
    fn test_no_h1_first_paragraph_is_description() {
        let out = extract_title_description(doc("Opening line.\n\nSecond paragraph."));
        assert_eq!(out.meta.title, None);
        assert_eq!(out.meta.description.as_deref(), Some("Opening line."));
        assert_eq!(out.body, "Second paragraph.");
    }

    #[test]
    fn test_h2_is_not_a_title() {
        let out = extract_title_description(doc("## Section\n\nBody."));
        assert_eq!(out.meta.title, None);
        assert!(out.body.contains("## Section"));
    }

    #[test]
    fn test_code_fence_hash_is_not_a_heading() {
        let body = "```sh\n# just a comment\n\necho hi\n```\n\nReal paragraph.";
        let out = extract_title_description(doc(body));

        assert_eq!(out.meta.title, None);
        assert_eq!(out.meta.description.as_deref(), Some("Real paragraph."));
        assert!(out.body.contains("# just a comment"));
    }

    #[test]
    fn test_description_searched_after_h1() {
        // The paragraph before the H1 is not the lead paragraph
        let body = "Preamble.\n\n# Title\n\nLead.";
        let out = extract_title_description(doc(body));
        assert_eq!(out.meta.title.as_deref(), Some("Title"));
        assert_eq!(out.meta.description.as_deref(), Some("Lead."));
        assert_eq!(out.body, "Preamble.");
    }

    #[test]
    fn test_empty_body() {
        let out = extract_title_description(doc(""));
        assert_eq!(out.meta.title, None);
        assert_eq!(out.meta.description, None);
        assert_eq!(out.body, "");
    }

    #[test]
    fn test_multiline_paragraph_kept_whole() {
        let body = "# T\n\nLine one\nline two.\n\nRest.";
        let out = extract_title_description(doc(body));
        assert_eq!(out.meta.description.as_deref(), Some("Line one\nline two."));
        assert_eq!(out.body, "Rest.");
    }

    #[test]
    fn test_split_blocks_unterminated_fence() {
        let blocks = split_blocks("```\nno closing fence");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Code);
    }
}
