//! Greedy word wrapping for help text.

use std::io::{self, Write};

/// Break `text` into lines of at most `width` characters.
///
/// Words are packed greedily. Embedded newlines are hard breaks. A word that
/// does not fit on a line of its own is hyphenated: it fills the room left
/// on the current line, minus one column for the `-`.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(2);
    let text = text.trim_end_matches('\n');
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut len = 0;

        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let mut word = word;
            loop {
                let word_len = word.chars().count();
                let sep = usize::from(len > 0);
                if len + sep + word_len <= width {
                    if sep == 1 {
                        line.push(' ');
                    }
                    line.push_str(word);
                    len += sep + word_len;
                    break;
                }
                if word_len <= width && len > 0 {
                    lines.push(std::mem::take(&mut line));
                    len = 0;
                    continue;
                }

                let room = width.saturating_sub(len + sep);
                if room < 2 {
                    lines.push(std::mem::take(&mut line));
                    len = 0;
                    continue;
                }
                let split = word
                    .char_indices()
                    .nth(room - 1)
                    .map_or(word.len(), |(i, _)| i);
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(&word[..split]);
                line.push('-');
                lines.push(std::mem::take(&mut line));
                len = 0;
                word = &word[split..];
            }
        }
        lines.push(line);
    }
    lines
}

/// Write `text` wrapped to `width` columns, every line indented by `indent`.
pub fn write_wrapped<W: Write>(
    out: &mut W,
    text: &str,
    indent: usize,
    width: usize,
) -> io::Result<()> {
    let room = width.saturating_sub(indent);
    for line in wrap_lines(text, room) {
        if line.is_empty() {
            writeln!(out)?;
        } else {
            writeln!(out, "{:indent$}{}", "", line, indent = indent)?;
        }
    }
    Ok(())
}
