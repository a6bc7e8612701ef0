//! Single-pass placeholder discovery.
//!
//! The scanner walks a statement once, tracking quote/comment state so a
//! sigil inside a string literal, quoted identifier, comment, or
//! dollar-quoted block is never mistaken for a placeholder.

/// One named placeholder occurrence.
///
/// Offsets are byte positions into the scanned statement: `start` is the
/// sigil itself, `end` is one past the last name byte. Ordinals are 1-based
/// in discovery order and reset per statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub ordinal: usize,
    pub start: usize,
    pub end: usize,
}

/// Lexical state of the scan cursor.
#[derive(Clone)]
enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment(u32),
    DollarQuoted(String),
}

/// Characters that end a placeholder name.
pub(super) fn is_terminator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b';' | b')' | b',')
}

fn line_comment_opens(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'-') && bytes.get(idx + 1) == Some(&b'-')
}

fn block_comment_opens(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'/') && bytes.get(idx + 1) == Some(&b'*')
}

fn block_comment_closes(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'*') && bytes.get(idx + 1) == Some(&b'/')
}

/// Probe for a `$tag$` opener at `idx` (which must point at a `$`).
/// Returns the tag and the offset of the closing `$` of the opener.
fn dollar_tag_opens(bytes: &[u8], idx: usize) -> Option<(String, usize)> {
    let mut probe = idx + 1;
    while probe < bytes.len() && bytes[probe] != b'$' {
        let b = bytes[probe];
        if !(b.is_ascii_alphanumeric() || b == b'_') {
            return None;
        }
        probe += 1;
    }
    if probe < bytes.len() && bytes[probe] == b'$' {
        let tag = String::from_utf8(bytes[idx + 1..probe].to_vec()).ok()?;
        Some((tag, probe))
    } else {
        None
    }
}

/// True when the `$` at `idx` closes a `$tag$` block with this tag.
fn dollar_tag_closes(bytes: &[u8], idx: usize, tag: &str) -> bool {
    let end = idx + 1 + tag.len();
    end < bytes.len()
        && bytes[idx + 1..=end].starts_with(tag.as_bytes())
        && bytes.get(end) == Some(&b'$')
}

/// Discover every placeholder in `sql`, left to right.
///
/// A placeholder is the sigil followed by a run of non-terminator bytes; the
/// run may be empty (the caller treats an empty name as unresolvable, not as
/// a panic). Names are arbitrary UTF-8: terminators are all ASCII, so
/// stopping at the first terminator byte never splits a multi-byte
/// character.
pub(super) fn scan_placeholders(sql: &str, sigil: char) -> Vec<Placeholder> {
    let bytes = sql.as_bytes();
    let mut sigil_buf = [0u8; 4];
    let sigil_bytes = sigil.encode_utf8(&mut sigil_buf).as_bytes();

    let mut found = Vec::new();
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => {
                if b == b'\'' {
                    state = State::SingleQuoted;
                } else if b == b'"' {
                    state = State::DoubleQuoted;
                } else if line_comment_opens(bytes, idx) {
                    state = State::LineComment;
                } else if block_comment_opens(bytes, idx) {
                    state = State::BlockComment(1);
                } else if b == b'$'
                    && let Some((tag, advance)) = dollar_tag_opens(bytes, idx)
                {
                    state = State::DollarQuoted(tag);
                    idx = advance;
                } else if bytes[idx..].starts_with(sigil_bytes) {
                    // Second cursor seeks the end of the name.
                    let name_start = idx + sigil_bytes.len();
                    let mut name_end = name_start;
                    while name_end < bytes.len() && !is_terminator(bytes[name_end]) {
                        name_end += 1;
                    }
                    found.push(Placeholder {
                        name: sql[name_start..name_end].to_string(),
                        ordinal: found.len() + 1,
                        start: idx,
                        end: name_end,
                    });
                    idx = name_end;
                    continue;
                }
            }
            State::SingleQuoted => {
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1; // doubled quote is one escape unit
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment(depth) => {
                if block_comment_opens(bytes, idx) {
                    state = State::BlockComment(depth + 1);
                } else if block_comment_closes(bytes, idx) {
                    state = if depth == 1 {
                        State::Normal
                    } else {
                        State::BlockComment(depth - 1)
                    };
                }
            }
            State::DollarQuoted(ref tag) => {
                if b == b'$' && dollar_tag_closes(bytes, idx, tag) {
                    idx += tag.len() + 1;
                    state = State::Normal;
                }
            }
        }
        idx += 1;
    }

    found
}
