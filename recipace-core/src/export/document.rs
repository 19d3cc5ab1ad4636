//! Structured layout of an exported recipe.
//!
//! The layout is derived from the raw model output line by line:
//!
//! ```text
//! Title                      <- first line
//! Generated on ...           <- only when a timestamp is supplied
//! Parameters                 <- level 1 heading
//!   • Name: Value            <- one per set parameter
//! Recipe & Extras            <- level 1 heading
//!   Ingredients:  -> heading "Ingredients" (level 2)
//!   anything else -> paragraph, blank lines included
//! <page break>
//! Generated by Recipace-AI
//! ```

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::selection::Selection;

/// Closing paragraph of every exported document.
pub const ATTRIBUTION: &str = "Generated by Recipace-AI";

pub const PARAMETERS_HEADING: &str = "Parameters";
pub const CONTENT_HEADING: &str = "Recipe & Extras";

/// A block of document content, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Block {
    /// Section heading. Level 1 for fixed sections, level 2 for recipe subsections.
    Heading1(String),
    Heading2(String),
    Paragraph(String),
    /// A "Name: Value" parameter line, rendered with a bullet.
    Bullet(String),
    PageBreak,
}

/// A recipe laid out for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeDocument {
    pub title: String,
    pub blocks: Vec<Block>,
}

/// Lay out recipe text and the active selection as a document.
///
/// `generated_at` adds a "Generated on" line under the title; pass `None` for
/// output that depends only on the text and selection.
pub fn build_document(
    text: &str,
    selection: &Selection,
    generated_at: Option<NaiveDateTime>,
) -> RecipeDocument {
    let mut lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
    let title = lines.next().unwrap_or_default().to_string();

    let mut blocks = Vec::new();

    if let Some(ts) = generated_at {
        blocks.push(Block::Paragraph(format!(
            "Generated on {}",
            ts.format("%Y-%m-%d %H:%M")
        )));
    }

    blocks.push(Block::Heading1(PARAMETERS_HEADING.to_string()));
    blocks.extend(
        selection
            .active()
            .map(|(name, value)| Block::Bullet(format!("{}: {}", name, value))),
    );

    blocks.push(Block::Heading1(CONTENT_HEADING.to_string()));
    blocks.extend(lines.map(content_block));

    blocks.push(Block::PageBreak);
    blocks.push(Block::Paragraph(ATTRIBUTION.to_string()));

    RecipeDocument { title, blocks }
}

/// A line ending in ':' (ignoring surrounding whitespace) is a subsection heading.
fn content_block(line: &str) -> Block {
    if line.trim().ends_with(':') {
        Block::Heading2(line.trim_end().trim_end_matches(':').to_string())
    } else {
        Block::Paragraph(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterSet;

    fn params() -> ParameterSet {
        ParameterSet::from_json(r#"{"Cuisine": ["None", "French"], "Diet": ["None", "Keto"]}"#)
            .unwrap()
    }

    fn content(doc: &RecipeDocument) -> Vec<Block> {
        let start = doc
            .blocks
            .iter()
            .position(|b| *b == Block::Heading1(CONTENT_HEADING.to_string()))
            .unwrap();
        let end = doc
            .blocks
            .iter()
            .position(|b| *b == Block::PageBreak)
            .unwrap();
        doc.blocks[start + 1..end].to_vec()
    }

    #[test]
    fn test_headings_and_paragraphs() {
        let selection = Selection::new(&params());
        let doc = build_document(
            "Title\nSteps:\nMix flour.\nBake:\n350F for 20 min.",
            &selection,
            None,
        );

        assert_eq!(doc.title, "Title");
        assert_eq!(
            content(&doc),
            vec![
                Block::Heading2("Steps".to_string()),
                Block::Paragraph("Mix flour.".to_string()),
                Block::Heading2("Bake".to_string()),
                Block::Paragraph("350F for 20 min.".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let selection = Selection::new(&params());
        let doc = build_document("Soup\n\nServes 4\n\n", &selection, None);
        assert_eq!(
            content(&doc),
            vec![
                Block::Paragraph(String::new()),
                Block::Paragraph("Serves 4".to_string()),
                Block::Paragraph(String::new()),
                Block::Paragraph(String::new()),
            ]
        );
    }

    #[test]
    fn test_heading_detection_ignores_trailing_whitespace() {
        let selection = Selection::new(&params());
        let doc = build_document("T\n  Tips:  \r\nNote: salt to taste", &selection, None);
        assert_eq!(
            content(&doc),
            vec![
                Block::Heading2("  Tips".to_string()),
                Block::Paragraph("Note: salt to taste".to_string()),
            ]
        );
    }

    #[test]
    fn test_parameters_section_lists_set_values() {
        let params = params();
        let mut selection = Selection::new(&params);
        selection.set(&params, "Diet", "Keto").unwrap();

        let doc = build_document("Keto Bites", &selection, None);
        assert_eq!(
            doc.blocks[..3],
            [
                Block::Heading1(PARAMETERS_HEADING.to_string()),
                Block::Bullet("Diet: Keto".to_string()),
                Block::Heading1(CONTENT_HEADING.to_string()),
            ]
        );
    }

    #[test]
    fn test_closing_blocks() {
        let selection = Selection::new(&params());
        let doc = build_document("Only a title", &selection, None);
        let n = doc.blocks.len();
        assert_eq!(doc.blocks[n - 2], Block::PageBreak);
        assert_eq!(doc.blocks[n - 1], Block::Paragraph(ATTRIBUTION.to_string()));
    }

    #[test]
    fn test_generated_on_line() {
        let selection = Selection::new(&params());
        let ts = chrono::NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(18, 5, 0)
            .unwrap();
        let doc = build_document("Crepes", &selection, Some(ts));
        assert_eq!(
            doc.blocks[0],
            Block::Paragraph("Generated on 2024-03-09 18:05".to_string())
        );
    }

    #[test]
    fn test_empty_text() {
        let selection = Selection::new(&params());
        let doc = build_document("", &selection, None);
        assert_eq!(doc.title, "");
        assert!(content(&doc).is_empty());
    }
}
