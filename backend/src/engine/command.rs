//! Classification of the text found between two delimiters.
//!
//! - `{name}` is an implicit insertion of `name`.
//! - `{= name}` and `{INS name}` are explicit insertions.
//! - `{! code}` is shorthand for `EXEC`.
//! - Any other upper-case keyword followed by an operand (`{FOR row IN rows}`,
//!   `{IF flag}`, ...) yields that kind with the operand as its code. A bare
//!   keyword such as `{IMAGE}` is still an implicit insertion.

use super::error::EngineError;
use common::model::placeholder::PlaceholderDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Ins,
    Exec,
    Image,
    Link,
    Html,
    For,
    EndFor,
    If,
    EndIf,
    Alias,
    Query,
}

impl CommandKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::Ins => "INS",
            CommandKind::Exec => "EXEC",
            CommandKind::Image => "IMAGE",
            CommandKind::Link => "LINK",
            CommandKind::Html => "HTML",
            CommandKind::For => "FOR",
            CommandKind::EndFor => "END-FOR",
            CommandKind::If => "IF",
            CommandKind::EndIf => "END-IF",
            CommandKind::Alias => "ALIAS",
            CommandKind::Query => "QUERY",
        }
    }

    fn from_keyword(word: &str) -> Option<Self> {
        let kind = match word {
            "INS" => CommandKind::Ins,
            "EXEC" => CommandKind::Exec,
            "IMAGE" => CommandKind::Image,
            "LINK" => CommandKind::Link,
            "HTML" => CommandKind::Html,
            "FOR" => CommandKind::For,
            "END-FOR" => CommandKind::EndFor,
            "IF" => CommandKind::If,
            "END-IF" => CommandKind::EndIf,
            "ALIAS" => CommandKind::Alias,
            "QUERY" => CommandKind::Query,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub raw: String,
    pub kind: CommandKind,
    pub code: String,
}

impl Command {
    pub fn into_descriptor(self) -> PlaceholderDescriptor {
        PlaceholderDescriptor {
            raw: self.raw,
            kind: self.kind.as_str().to_string(),
            code: self.code,
        }
    }
}

/// Parses the text between the delimiters of one command.
pub fn parse_command(text: &str) -> Result<Command, EngineError> {
    let raw = text.trim();
    if raw.is_empty() {
        return Err(EngineError::EmptyCommand);
    }

    let (kind, code) = if let Some(rest) = raw.strip_prefix('=') {
        (CommandKind::Ins, rest.trim())
    } else if let Some(rest) = raw.strip_prefix('!') {
        (CommandKind::Exec, rest.trim())
    } else {
        match raw.split_once(char::is_whitespace) {
            Some((head, tail)) => match CommandKind::from_keyword(head) {
                Some(kind) if !tail.trim().is_empty() => (kind, tail.trim()),
                _ => (CommandKind::Ins, raw),
            },
            None => (CommandKind::Ins, raw),
        }
    };

    if code.is_empty() {
        return Err(EngineError::EmptyCommand);
    }

    Ok(Command {
        raw: raw.to_string(),
        kind,
        code: code.to_string(),
    })
}
