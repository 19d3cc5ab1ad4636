//! Word (.docx) rendering.
//!
//! A .docx file is a ZIP archive of WordprocessingML parts. Only the parts
//! Word needs to open the file are written, plus a style sheet defining the
//! Title and Heading styles used by [`RecipeDocument`].

use chrono::NaiveDateTime;
use quick_xml::escape::escape;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::document::{build_document, Block, RecipeDocument};
use crate::error::ExportError;
use crate::selection::Selection;

/// Filename for the current recipe as a Word document.
pub const DOCX_FILENAME: &str = "recipace_recipe.docx";

/// Content type for Word documents.
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:eastAsia="Calibri" w:cs="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="240"/></w:pPr><w:rPr><w:sz w:val="56"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="360" w:after="80"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="200" w:after="60"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:sz w:val="26"/></w:rPr></w:style></w:styles>"#;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const DOCUMENT_CLOSE: &str = r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr></w:body></w:document>"#;

/// Build and render a recipe document in one step.
pub fn export_docx(
    text: &str,
    selection: &Selection,
    generated_at: Option<NaiveDateTime>,
) -> Result<Vec<u8>, ExportError> {
    render_docx(&build_document(text, selection, generated_at))
}

/// Render a document as .docx bytes.
///
/// Entry timestamps are fixed, so the same document always produces the same
/// bytes.
pub fn render_docx(doc: &RecipeDocument) -> Result<Vec<u8>, ExportError> {
    let parts: [(&str, String); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", PACKAGE_RELS.to_string()),
        ("docProps/core.xml", core_properties(&doc.title)),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
        ("word/styles.xml", STYLES.to_string()),
        ("word/document.xml", document_xml(doc)),
    ];

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in &parts {
        zip.start_file(*name, options)?;
        zip.write_all(content.as_bytes())?;
    }
    let buffer = zip.finish()?.into_inner();

    tracing::debug!(
        title = %doc.title,
        blocks = doc.blocks.len(),
        bytes = buffer.len(),
        "Rendered docx"
    );

    Ok(buffer)
}

fn core_properties(title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{}</dc:title><dc:creator>Recipace-AI</dc:creator></cp:coreProperties>"#,
        xml_text(title)
    )
}

fn document_xml(doc: &RecipeDocument) -> String {
    let mut xml = String::from(DOCUMENT_OPEN);
    push_paragraph(&mut xml, Some("Title"), &doc.title);

    for block in &doc.blocks {
        match block {
            Block::Heading1(text) => push_paragraph(&mut xml, Some("Heading1"), text),
            Block::Heading2(text) => push_paragraph(&mut xml, Some("Heading2"), text),
            Block::Paragraph(text) => push_paragraph(&mut xml, None, text),
            Block::Bullet(text) => push_paragraph(&mut xml, None, &format!("• {}", text)),
            Block::PageBreak => xml.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#),
        }
    }

    xml.push_str(DOCUMENT_CLOSE);
    xml
}

fn push_paragraph(xml: &mut String, style: Option<&str>, text: &str) {
    xml.push_str("<w:p>");
    if let Some(style) = style {
        xml.push_str(r#"<w:pPr><w:pStyle w:val=""#);
        xml.push_str(style);
        xml.push_str(r#""/></w:pPr>"#);
    }
    if !text.is_empty() {
        xml.push_str(r#"<w:r><w:t xml:space="preserve">"#);
        xml.push_str(&xml_text(text));
        xml.push_str("</w:t></w:r>");
    }
    xml.push_str("</w:p>");
}

/// Escape text for XML, dropping characters XML 1.0 cannot carry.
fn xml_text(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|&c| c == '\t' || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}'))
        .collect();
    escape(cleaned.as_str()).into_owned()
}
