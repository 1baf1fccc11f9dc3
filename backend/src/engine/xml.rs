//! Scanning and rewriting of WordprocessingML text.
//!
//! Word splits the text of a paragraph into runs (`<w:r><w:t>..</w:t></w:r>`)
//! wherever formatting, spell checking or editing history changes, so a
//! command like `{name}` is often stored as `{`, `na`, `me}`. Commands are
//! therefore searched in the joined, entity-decoded text of each paragraph.
//! When rendering, the value is written into the run where the command starts
//! and the remaining command text is cut from the runs that follow, which
//! keeps the formatting of the first run.
//!
//! Paragraphs are found by walking start and end tags with a depth stack, so a
//! text box (`w:txbxContent`) inside a run keeps its own paragraphs and the
//! enclosing paragraph continues after it.

use super::command::{parse_command, Command};
use super::error::EngineError;
use super::Delimiters;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

// Start, end and empty-element tags. Captures: `/` of an end tag, the
// qualified name, `/` of an empty element.
static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(/?)([A-Za-z_][\w:.\-]*)(?:\s[^>]*?)?(/?)>").unwrap());

const PARAGRAPH_TAG: &str = "w:p";
const TEXT_TAG: &str = "w:t";

/// Longest excerpt quoted in an unterminated command error.
const FRAGMENT_LEN: usize = 40;

/// A command located in the joined text of a paragraph.
struct Span {
    /// Byte offset of the open delimiter.
    start: usize,
    /// Byte offset just past the close delimiter.
    end: usize,
    command: Command,
}

/// A `<w:t>` element with content.
struct TextRun {
    /// Offset of the `<w:t ...>` start tag.
    tag_start: usize,
    /// Raw, still escaped, content between the start and end tag.
    content: Range<usize>,
}

/// The text elements owned by one `<w:p>`. Paragraphs nested in text boxes
/// own their runs; the enclosing paragraph only keeps the runs outside them.
struct Paragraph {
    start: usize,
    runs: Vec<TextRun>,
}

/// Paragraphs of a part ordered by their start tag. Empty elements such as
/// `<w:p w:rsidR=".."/>` or `<w:t xml:space="preserve"/>` carry no text and
/// are skipped, as are text elements outside any paragraph.
fn paragraphs(xml: &str) -> Vec<Paragraph> {
    let mut open: Vec<Paragraph> = Vec::new();
    let mut closed = Vec::new();
    let mut text_open: Option<(usize, usize)> = None;

    for caps in TAG_PATTERN.captures_iter(xml) {
        let Some(tag) = caps.get(0) else { continue };
        let is_end = !caps[1].is_empty();
        let is_empty = !caps[3].is_empty();

        match &caps[2] {
            PARAGRAPH_TAG if is_end => {
                if let Some(paragraph) = open.pop() {
                    closed.push(paragraph);
                }
                text_open = None;
            }
            PARAGRAPH_TAG if !is_empty => open.push(Paragraph {
                start: tag.start(),
                runs: Vec::new(),
            }),
            TEXT_TAG if is_end => {
                if let (Some((tag_start, content_start)), Some(paragraph)) =
                    (text_open.take(), open.last_mut())
                {
                    paragraph.runs.push(TextRun {
                        tag_start,
                        content: content_start..tag.start(),
                    });
                }
            }
            TEXT_TAG if !is_empty => text_open = Some((tag.start(), tag.end())),
            _ => {}
        }
    }

    closed.sort_by_key(|p| p.start);
    closed
}

/// Joined text of one paragraph plus the byte range each run occupies in it.
struct ParagraphText {
    text: String,
    runs: Vec<Range<usize>>,
}

impl ParagraphText {
    fn read(xml: &str, paragraph: &Paragraph) -> Self {
        let mut text = String::new();
        let mut runs = Vec::with_capacity(paragraph.runs.len());
        for run in &paragraph.runs {
            let start = text.len();
            text.push_str(&unescape(&xml[run.content.clone()]));
            runs.push(start..text.len());
        }
        Self { text, runs }
    }

    /// Index of the run holding the byte at `offset` of the joined text.
    fn run_at(&self, offset: usize) -> Option<usize> {
        self.runs.iter().position(|run| run.contains(&offset))
    }
}

/// Returns every command of an XML part in document order.
pub fn scan_commands(xml: &str, delimiters: Delimiters) -> Result<Vec<Command>, EngineError> {
    let mut found = Vec::new();
    for paragraph in paragraphs(xml) {
        let text = ParagraphText::read(xml, &paragraph);
        for span in find_spans(&text.text, delimiters)? {
            let position = text
                .run_at(span.start)
                .map_or(paragraph.start, |i| paragraph.runs[i].tag_start);
            found.push((position, span.command));
        }
    }
    // Text box paragraphs sit in the middle of their enclosing paragraph.
    found.sort_by_key(|(position, _)| *position);
    Ok(found.into_iter().map(|(_, command)| command).collect())
}

/// Rewrites an XML part, replacing every command by the text `resolve` returns.
pub fn render_part<F>(xml: &str, delimiters: Delimiters, mut resolve: F) -> Result<String, EngineError>
where
    F: FnMut(&Command) -> Result<String, EngineError>,
{
    let mut edits = Vec::new();
    for paragraph in paragraphs(xml) {
        edits.extend(render_paragraph(xml, &paragraph, delimiters, &mut resolve)?);
    }
    edits.sort_by_key(|(range, _): &(Range<usize>, String)| range.start);

    let mut out = String::with_capacity(xml.len());
    let mut last = 0;
    for (range, replacement) in edits {
        out.push_str(&xml[last..range.start]);
        out.push_str(&replacement);
        last = range.end;
    }
    out.push_str(&xml[last..]);
    Ok(out)
}

/// Replacement text elements for a paragraph that holds commands, as
/// `(range in the part, new element)` pairs. Empty when nothing changes.
fn render_paragraph<F>(
    xml: &str,
    paragraph: &Paragraph,
    delimiters: Delimiters,
    resolve: &mut F,
) -> Result<Vec<(Range<usize>, String)>, EngineError>
where
    F: FnMut(&Command) -> Result<String, EngineError>,
{
    let text = ParagraphText::read(xml, paragraph);
    let spans = find_spans(&text.text, delimiters)?;
    if spans.is_empty() {
        return Ok(Vec::new());
    }

    let replacements = spans
        .iter()
        .map(|span| resolve(&span.command))
        .collect::<Result<Vec<_>, _>>()?;

    let edits = text
        .runs
        .iter()
        .zip(&paragraph.runs)
        .map(|(range, run)| {
            let (run_start, run_end) = (range.start, range.end);
            let mut out = String::new();
            let mut pos = run_start;
            for (span, value) in spans.iter().zip(&replacements) {
                if span.end <= run_start || span.start >= run_end {
                    continue;
                }
                if span.start > pos {
                    out.push_str(&text.text[pos..span.start]);
                }
                if span.start >= run_start {
                    out.push_str(value);
                }
                pos = pos.max(span.end.min(run_end));
            }
            if pos < run_end {
                out.push_str(&text.text[pos..run_end]);
            }
            (
                run.tag_start..run.content.end,
                format!(r#"<w:t xml:space="preserve">{}"#, escape(&out)),
            )
        })
        .collect();
    Ok(edits)
}

fn find_spans(text: &str, delimiters: Delimiters) -> Result<Vec<Span>, EngineError> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    while let Some(found) = text[cursor..].find(delimiters.open) {
        let start = cursor + found;
        let inner_start = start + delimiters.open.len();
        let inner_len = text[inner_start..].find(delimiters.close).ok_or_else(|| {
            EngineError::UnterminatedCommand {
                fragment: text[start..].chars().take(FRAGMENT_LEN).collect(),
            }
        })?;
        let inner_end = inner_start + inner_len;
        let end = inner_end + delimiters.close.len();
        spans.push(Span {
            start,
            end,
            command: parse_command(&text[inner_start..inner_end])?,
        });
        cursor = end;
    }
    Ok(spans)
}

/// Escapes text for use inside an XML element.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decodes the predefined and numeric character references of XML text.
/// Unknown references are kept verbatim.
pub fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').and_then(|semi| decode_entity(&tail[1..semi]).map(|c| (c, semi))) {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let number = entity.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Text of each paragraph of a part, one line per paragraph.
#[cfg(test)]
pub fn plain_text(xml: &str) -> String {
    paragraphs(xml)
        .iter()
        .map(|p| ParagraphText::read(xml, p).text)
        .collect::<Vec<_>>()
        .join("\n")
}
