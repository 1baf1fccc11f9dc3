//! # Word Template Engine
//!
//! `DocxEngine` implements `TemplateEngine` for `.docx` files, which are ZIP
//! archives of XML parts. Only the parts that carry body text are inspected:
//! the main document, headers, footers, footnotes and endnotes. Every other
//! entry (styles, media, relationships, ...) is copied through unchanged.
//!
//! Only insertion commands can be rendered. Loops, conditions and the other
//! command kinds are still reported by `list_placeholders`, but rendering a
//! template that uses them fails with `EngineError::UnsupportedCommand`.

use super::command::{Command, CommandKind};
use super::error::EngineError;
use super::xml::{render_part, scan_commands};
use super::{Delimiters, TemplateEngine};
use common::model::placeholder::PlaceholderDescriptor;
use common::model::values::ValueMap;
use log::debug;
use std::collections::HashSet;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const MAIN_PART: &str = "word/document.xml";

#[derive(Debug, Default, Clone, Copy)]
pub struct DocxEngine;

impl DocxEngine {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateEngine for DocxEngine {
    fn list_placeholders(
        &self,
        document: &[u8],
        delimiters: Delimiters,
    ) -> Result<Vec<PlaceholderDescriptor>, EngineError> {
        let mut archive = open_archive(document)?;
        let mut seen = HashSet::new();
        let mut keys = Vec::new();

        for part in text_parts(&mut archive)? {
            let xml = read_part(&mut archive, &part)?;
            for command in scan_commands(&xml, delimiters)? {
                if seen.insert(command.code.clone()) {
                    keys.push(command.into_descriptor());
                }
            }
        }

        debug!("Found {} distinct commands", keys.len());
        Ok(keys)
    }

    fn render(
        &self,
        document: &[u8],
        values: &ValueMap,
        delimiters: Delimiters,
    ) -> Result<Vec<u8>, EngineError> {
        let mut archive = open_archive(document)?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let name = entry.name().to_string();
            let method = match entry.compression() {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let options = SimpleFileOptions::default().compression_method(method);

            if entry.is_dir() {
                writer.add_directory(name, options)?;
                continue;
            }

            let mut bytes = Vec::new();
            entry
                .read_to_end(&mut bytes)
                .map_err(|source| part_error(&name, source))?;

            if is_text_part(&name) {
                let xml = String::from_utf8(bytes).map_err(|e| {
                    part_error(&name, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
                })?;
                bytes = render_part(&xml, delimiters, |command| resolve(command, values))?
                    .into_bytes();
            }

            writer.start_file(name.as_str(), options)?;
            writer
                .write_all(&bytes)
                .map_err(|source| part_error(&name, source))?;
        }

        Ok(writer.finish()?.into_inner())
    }
}

/// Value written in place of a command.
fn resolve(command: &Command, values: &ValueMap) -> Result<String, EngineError> {
    match command.kind {
        CommandKind::Ins => Ok(values.get(&command.code).cloned().unwrap_or_default()),
        kind => Err(EngineError::UnsupportedCommand {
            kind: kind.as_str(),
            raw: command.raw.clone(),
        }),
    }
}

fn open_archive(document: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>, EngineError> {
    let archive = ZipArchive::new(Cursor::new(document))?;
    if !archive.file_names().any(|name| name == MAIN_PART) {
        return Err(EngineError::MissingPart(MAIN_PART));
    }
    Ok(archive)
}

/// Text-bearing parts, main document first, then the others in archive order.
fn text_parts(archive: &mut ZipArchive<Cursor<&[u8]>>) -> Result<Vec<String>, EngineError> {
    let mut parts = vec![MAIN_PART.to_string()];
    for index in 0..archive.len() {
        let name = archive.by_index(index)?.name().to_string();
        if name != MAIN_PART && is_text_part(&name) {
            parts.push(name);
        }
    }
    Ok(parts)
}

fn is_text_part(name: &str) -> bool {
    if name == MAIN_PART || name == "word/footnotes.xml" || name == "word/endnotes.xml" {
        return true;
    }
    (name.starts_with("word/header") || name.starts_with("word/footer")) && name.ends_with(".xml")
}

fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<String, EngineError> {
    let mut entry = archive.by_name(name)?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|source| part_error(name, source))?;
    Ok(xml)
}

fn part_error(name: &str, source: std::io::Error) -> EngineError {
    EngineError::Part {
        part: name.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{
        build_archive, docx_with_body, docx_with_paragraphs, document_text, read_entry,
    };
    use crate::engine::CMD_DELIMITERS;

    fn codes(document: &[u8]) -> Vec<String> {
        DocxEngine::new()
            .list_placeholders(document, CMD_DELIMITERS)
            .unwrap()
            .into_iter()
            .map(|d| d.code)
            .collect()
    }

    #[test]
    fn lists_distinct_codes_in_occurrence_order() {
        let docx = docx_with_paragraphs(&[
            &["Dear {name},"],
            &["Meeting on {", "date", "} with {name}."],
            &["{= place}"],
        ]);
        assert_eq!(codes(&docx), vec!["name", "date", "place"]);
    }

    #[test]
    fn descriptors_carry_raw_text_and_kind() {
        let docx = docx_with_paragraphs(&[&["{FOR row IN rows}{row}{END-FOR row}"]]);
        let keys = DocxEngine::new()
            .list_placeholders(&docx, CMD_DELIMITERS)
            .unwrap();

        assert_eq!(keys[0], PlaceholderDescriptor::new("FOR row IN rows", "FOR", "row IN rows"));
        assert_eq!(keys[1], PlaceholderDescriptor::new("row", "INS", "row"));
        // `END-FOR row` shares its code with the insertion above.
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn document_without_commands_yields_no_keys() {
        let docx = docx_with_paragraphs(&[&["Just text."], &[]]);
        assert!(codes(&docx).is_empty());
    }

    #[test]
    fn listing_is_idempotent() {
        let docx = docx_with_paragraphs(&[&["{b} {a} {c}"]]);
        let engine = DocxEngine::new();
        let first = engine.list_placeholders(&docx, CMD_DELIMITERS).unwrap();
        let second = engine.list_placeholders(&docx, CMD_DELIMITERS).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn headers_and_footers_are_scanned_after_the_body() {
        let docx = build_archive(&[
            ("word/header1.xml", "<w:hdr><w:p><w:r><w:t>{title}</w:t></w:r></w:p></w:hdr>"),
            ("word/document.xml", "<w:body><w:p><w:r><w:t>{body}</w:t></w:r></w:p></w:body>"),
            ("word/footer1.xml", "<w:ftr><w:p><w:r><w:t>{page}</w:t></w:r></w:p></w:ftr>"),
            ("word/styles.xml", "<w:styles><w:p><w:r><w:t>{ignored}</w:t></w:r></w:p></w:styles>"),
        ]);
        assert_eq!(codes(&docx), vec!["body", "title", "page"]);
    }

    #[test]
    fn rejects_bytes_that_are_not_an_archive() {
        let err = DocxEngine::new()
            .list_placeholders(b"plain text, not a document", CMD_DELIMITERS)
            .unwrap_err();
        assert!(matches!(err, EngineError::Archive(_)));
    }

    #[test]
    fn rejects_archive_without_main_part() {
        let archive = build_archive(&[("readme.txt", "hello")]);
        let err = DocxEngine::new()
            .list_placeholders(&archive, CMD_DELIMITERS)
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingPart("word/document.xml")));
    }

    #[test]
    fn unterminated_command_fails_listing() {
        let docx = docx_with_paragraphs(&[&["Hello {name"]]);
        assert!(DocxEngine::new()
            .list_placeholders(&docx, CMD_DELIMITERS)
            .is_err());
    }

    #[test]
    fn render_substitutes_values_and_removes_tokens() {
        let docx = docx_with_paragraphs(&[&["First {a}, then {", "b}."]]);
        let mut values = ValueMap::new();
        values.insert("a".to_string(), "X".to_string());
        values.insert("b".to_string(), "Y".to_string());

        let rendered = DocxEngine::new()
            .render(&docx, &values, CMD_DELIMITERS)
            .unwrap();
        let text = document_text(&rendered);

        assert_eq!(text, "First X, then Y.");
        assert!(!text.contains("{a}"));
        assert!(!text.contains("{b}"));
        assert!(codes(&rendered).is_empty());
    }

    #[test]
    fn render_uses_empty_text_for_missing_values_and_ignores_extras() {
        let docx = docx_with_paragraphs(&[&["[{name}] [{date}]"]]);
        let mut values = ValueMap::new();
        values.insert("name".to_string(), "Alice".to_string());
        values.insert("unused".to_string(), "zzz".to_string());

        let rendered = DocxEngine::new()
            .render(&docx, &values, CMD_DELIMITERS)
            .unwrap();
        assert_eq!(document_text(&rendered), "[Alice] []");
    }

    #[test]
    fn render_escapes_markup_in_values() {
        let docx = docx_with_paragraphs(&[&["{who}"]]);
        let mut values = ValueMap::new();
        values.insert("who".to_string(), "Smith & <Sons>".to_string());

        let rendered = DocxEngine::new()
            .render(&docx, &values, CMD_DELIMITERS)
            .unwrap();
        let xml = read_entry(&rendered, "word/document.xml");

        assert!(xml.contains("Smith &amp; &lt;Sons&gt;"));
        assert_eq!(document_text(&rendered), "Smith & <Sons>");
    }

    #[test]
    fn render_copies_other_entries_in_order() {
        let docx = build_archive(&[
            ("[Content_Types].xml", "<Types/>"),
            ("word/document.xml", "<w:body><w:p><w:r><w:t>{x}</w:t></w:r></w:p></w:body>"),
            ("word/styles.xml", "<w:styles>{kept}</w:styles>"),
        ]);
        let rendered = DocxEngine::new()
            .render(&docx, &ValueMap::new(), CMD_DELIMITERS)
            .unwrap();

        let mut archive = ZipArchive::new(Cursor::new(rendered.as_slice())).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["[Content_Types].xml", "word/document.xml", "word/styles.xml"]);
        assert_eq!(read_entry(&rendered, "word/styles.xml"), "<w:styles>{kept}</w:styles>");
    }

    /// Body as Word saves it: rsid attributes, an empty paragraph, an empty
    /// text element, spell check markers and a text box inside a run.
    const WORD_BODY: &str = concat!(
        r#"<w:p w:rsidR="00C31A2B" w:rsidRDefault="00C31A2B"/>"#,
        r#"<w:p w:rsidR="00C31A2B"><w:pPr><w:pStyle w:val="Title"/></w:pPr>"#,
        r#"<w:r><w:t xml:space="preserve"/></w:r><w:r><w:t xml:space="preserve">Dear {</w:t></w:r>"#,
        r#"<w:proofErr w:type="spellStart"/><w:r><w:t>na</w:t></w:r><w:proofErr w:type="spellEnd"/>"#,
        r#"<w:r><w:t>me}, </w:t></w:r>"#,
        r#"<w:r><w:drawing><wp:inline><a:graphic><a:graphicData><wps:wsp><wps:txbx><w:txbxContent>"#,
        r#"<w:p><w:r><w:t>Ref {ref}</w:t></w:r></w:p>"#,
        r#"</w:txbxContent></wps:txbx></wps:wsp></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#,
        r#"<w:r><w:t>see you on {date}.</w:t></w:r></w:p>"#,
    );

    #[test]
    fn lists_commands_from_word_shaped_markup() {
        let docx = docx_with_body(WORD_BODY);
        assert_eq!(codes(&docx), vec!["name", "ref", "date"]);
    }

    #[test]
    fn render_handles_word_shaped_markup() {
        let docx = docx_with_body(WORD_BODY);
        let mut values = ValueMap::new();
        values.insert("name".to_string(), "Alice".to_string());
        values.insert("ref".to_string(), "R-7".to_string());
        values.insert("date".to_string(), "Monday".to_string());

        let rendered = DocxEngine::new()
            .render(&docx, &values, CMD_DELIMITERS)
            .unwrap();
        let xml = read_entry(&rendered, "word/document.xml");

        assert_eq!(document_text(&rendered), "Dear Alice, see you on Monday.\nRef R-7");
        assert!(codes(&rendered).is_empty());
        assert!(!xml.contains("&lt;"));
        assert!(xml.contains(r#"<w:p w:rsidR="00C31A2B" w:rsidRDefault="00C31A2B"/>"#));
        assert!(xml.contains(r#"<w:r><w:t xml:space="preserve"/></w:r>"#));
    }

    #[test]
    fn render_rejects_control_commands() {
        let docx = docx_with_paragraphs(&[&["{IF vip}Welcome{END-IF vip}"]]);
        let err = DocxEngine::new()
            .render(&docx, &ValueMap::new(), CMD_DELIMITERS)
            .unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedCommand { kind: "IF", .. }));
        assert_eq!(err.to_string(), "Unsupported command IF in `IF vip`");
    }
}
