//! In-memory `.docx` builders shared by the engine and endpoint tests.

use super::xml::{escape, plain_text};
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

/// Builds a ZIP archive holding `entries` in the given order.
pub(crate) fn build_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Builds a minimal Word document. Each inner slice is one paragraph and each
/// string one run of that paragraph.
pub(crate) fn docx_with_paragraphs(paragraphs: &[&[&str]]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|runs| {
            let runs: String = runs
                .iter()
                .map(|text| format!(r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#, escape(text)))
                .collect();
            format!("<w:p>{runs}</w:p>")
        })
        .collect();
    docx_with_body(&body)
}

/// Builds a Word document whose `<w:body>` holds the given raw markup.
pub(crate) fn docx_with_body(body: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
    );
    build_archive(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("word/document.xml", &document),
    ])
}

pub(crate) fn read_entry(archive: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(archive)).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

/// Visible text of the main document, one line per paragraph.
pub(crate) fn document_text(archive: &[u8]) -> String {
    plain_text(&read_entry(archive, "word/document.xml"))
}
