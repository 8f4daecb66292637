//! Splitting long messages to fit Discord's length limit.
//!
//! Length is measured in UTF-16 code units, which is never less than the
//! character count Discord enforces.

/// Discord's per-message content limit.
pub const DISCORD_MAX_LENGTH: usize = 2000;

/// Split `content` into chunks of at most `max_len` units.
///
/// Lines are kept whole where possible and joined with `\n`. A line longer
/// than `max_len` is split on character boundaries. Whitespace-only chunks
/// are dropped, so empty input yields no chunks.
pub fn split_message(content: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(2);
    if units(content) <= max_len {
        return if content.trim().is_empty() {
            Vec::new()
        } else {
            vec![content.to_owned()]
        };
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    for line in content.split('\n') {
        for piece in hard_split(line, max_len) {
            let joined = if current.is_empty() {
                units(piece)
            } else {
                units(&current).saturating_add(1).saturating_add(units(piece))
            };
            if joined > max_len {
                flush(&mut chunks, &mut current);
                current.push_str(piece);
            } else {
                if !current.is_empty() {
                    current.push('\n');
                }
                current.push_str(piece);
            }
        }
    }
    flush(&mut chunks, &mut current);
    chunks
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    let chunk = std::mem::take(current);
    if !chunk.trim().is_empty() {
        chunks.push(chunk);
    }
}

/// Pieces of `line`, each at most `max_len` units. `max_len` must be at
/// least 2 so that every character fits.
fn hard_split(line: &str, max_len: usize) -> Vec<&str> {
    if units(line) <= max_len {
        return vec![line];
    }
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut width = 0_usize;
    for (index, c) in line.char_indices() {
        let w = c.len_utf16();
        if width.saturating_add(w) > max_len {
            if let Some(piece) = line.get(start..index) {
                pieces.push(piece);
            }
            start = index;
            width = 0;
        }
        width = width.saturating_add(w);
    }
    if let Some(rest) = line.get(start..) {
        if !rest.is_empty() {
            pieces.push(rest);
        }
    }
    pieces
}

fn units(s: &str) -> usize {
    s.encode_utf16().count()
}
