//! Script block extraction for Vue SFC files.
//!
//! Only `<script>` and `<script setup>` matter for emit checking, so this is
//! a byte scanner over the top level of the file rather than a full SFC
//! parser. Block content is borrowed from the input.

use memchr::{memchr, memmem};
use oxc_span::SourceType;
use thiserror::Error;

use crate::context::ScriptKind;

const OPEN_SCRIPT: &[u8] = b"<script";
const CLOSING_SCRIPT: &[u8] = b"</script>";
const COMMENT_START: &[u8] = b"<!--";
const COMMENT_END: &[u8] = b"-->";

/// Errors found while locating script blocks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SfcError {
    #[error("SFC can only contain one <script> block (duplicate at offset {offset})")]
    DuplicateScript { offset: u32 },
    #[error("SFC can only contain one <script setup> block (duplicate at offset {offset})")]
    DuplicateScriptSetup { offset: u32 },
    #[error("<script> block at offset {offset} is never closed")]
    UnclosedScript { offset: u32 },
}

/// A `<script>` block of an SFC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptBlock<'a> {
    /// Text between the opening and closing tags
    pub content: &'a str,
    /// Byte offset of `content` in the file
    pub offset: u32,
    /// `<script setup>`
    pub setup: bool,
    /// Value of the `lang` attribute
    pub lang: Option<&'a str>,
}

impl ScriptBlock<'_> {
    #[inline]
    pub fn script_kind(&self) -> ScriptKind {
        if self.setup {
            ScriptKind::Setup
        } else {
            ScriptKind::Plain
        }
    }

    /// Source type used to parse the block content
    pub fn source_type(&self) -> SourceType {
        match self.lang {
            Some("ts" | "mts" | "cts") => SourceType::ts(),
            Some("tsx") => SourceType::tsx(),
            Some("jsx") => SourceType::jsx(),
            _ => SourceType::mjs(),
        }
    }
}

/// Find the top-level script blocks of an SFC, in source order.
///
/// Blocks with a `src` attribute and no inline content are skipped.
pub fn extract_script_blocks(source: &str) -> Result<Vec<ScriptBlock<'_>>, SfcError> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut blocks: Vec<ScriptBlock<'_>> = Vec::with_capacity(2);
    let mut pos = 0;

    while pos < len {
        let Some(lt_offset) = memchr(b'<', &bytes[pos..]) else {
            break;
        };
        pos += lt_offset;
        let rest = &bytes[pos..];

        if rest.starts_with(COMMENT_START) {
            match memmem::find(&rest[COMMENT_START.len()..], COMMENT_END) {
                Some(end) => {
                    pos += COMMENT_START.len() + end + COMMENT_END.len();
                    continue;
                }
                None => break,
            }
        }

        if !is_script_open(rest) {
            pos += 1;
            continue;
        }

        let tag_start = pos;
        let attrs_start = pos + OPEN_SCRIPT.len();
        let Some(tag_end) = find_tag_end(bytes, attrs_start) else {
            return Err(SfcError::UnclosedScript {
                offset: tag_start as u32,
            });
        };

        // <script src="./foo.ts" />
        if bytes[tag_end - 1] == b'/' {
            pos = tag_end + 1;
            continue;
        }

        let (setup, lang) = parse_attrs(&source[attrs_start..tag_end]);
        let content_start = tag_end + 1;
        let Some(content_end) = find_closing_script(bytes, content_start) else {
            return Err(SfcError::UnclosedScript {
                offset: tag_start as u32,
            });
        };

        if blocks.iter().any(|block| block.setup == setup) {
            let offset = tag_start as u32;
            return Err(if setup {
                SfcError::DuplicateScriptSetup { offset }
            } else {
                SfcError::DuplicateScript { offset }
            });
        }

        blocks.push(ScriptBlock {
            content: &source[content_start..content_end],
            offset: content_start as u32,
            setup,
            lang,
        });
        pos = content_end + CLOSING_SCRIPT.len();
    }

    tracing::trace!(count = blocks.len(), "extracted script blocks");
    Ok(blocks)
}

/// `<script` followed by whitespace, `>` or `/`
#[inline]
fn is_script_open(rest: &[u8]) -> bool {
    rest.len() > OPEN_SCRIPT.len()
        && rest[..OPEN_SCRIPT.len()].eq_ignore_ascii_case(OPEN_SCRIPT)
        && matches!(
            rest[OPEN_SCRIPT.len()],
            b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/'
        )
}

/// Position of the `>` closing an opening tag, skipping quoted attribute values
fn find_tag_end(bytes: &[u8], mut pos: usize) -> Option<usize> {
    while pos < bytes.len() {
        match bytes[pos] {
            b'>' => return Some(pos),
            quote @ (b'"' | b'\'') => {
                pos += 1;
                pos += memchr(quote, &bytes[pos..])?;
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

/// Start of `</script>` (any case) at or after `pos`
fn find_closing_script(bytes: &[u8], mut pos: usize) -> Option<usize> {
    while pos < bytes.len() {
        pos += memchr(b'<', &bytes[pos..])?;
        let rest = &bytes[pos..];
        if rest.len() >= CLOSING_SCRIPT.len()
            && rest[..CLOSING_SCRIPT.len()].eq_ignore_ascii_case(CLOSING_SCRIPT)
        {
            return Some(pos);
        }
        pos += 1;
    }
    None
}

/// Read `setup` and `lang` from the attribute text of an opening tag
fn parse_attrs(attrs: &str) -> (bool, Option<&str>) {
    let bytes = attrs.as_bytes();
    let len = bytes.len();
    let mut setup = false;
    let mut lang = None;
    let mut pos = 0;

    while pos < len {
        while pos < len && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b'/') {
            pos += 1;
        }
        let name_start = pos;
        while pos < len && !bytes[pos].is_ascii_whitespace() && !matches!(bytes[pos], b'=' | b'/')
        {
            pos += 1;
        }
        let name = &attrs[name_start..pos];
        if name.is_empty() {
            break;
        }

        let mut value = None;
        if pos < len && bytes[pos] == b'=' {
            pos += 1;
            match bytes.get(pos) {
                Some(&quote) if quote == b'"' || quote == b'\'' => {
                    let value_start = pos + 1;
                    let value_end = memchr(quote, &bytes[value_start..])
                        .map_or(len, |offset| value_start + offset);
                    value = Some(&attrs[value_start..value_end]);
                    pos = value_end + 1;
                }
                _ => {
                    let value_start = pos;
                    while pos < len && !bytes[pos].is_ascii_whitespace() {
                        pos += 1;
                    }
                    value = Some(&attrs[value_start..pos]);
                }
            }
        }

        if name.eq_ignore_ascii_case("setup") {
            setup = true;
        } else if name.eq_ignore_ascii_case("lang") {
            lang = value;
        }
    }

    (setup, lang)
}
