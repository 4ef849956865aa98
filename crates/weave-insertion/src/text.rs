//! Line-oriented text helpers shared by the strategies

/// Byte offset of the start of the line containing `pos`
#[inline]
pub(crate) fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// Byte offset just past the newline ending the line containing `pos`,
/// or the end of the text for the last line
#[inline]
pub(crate) fn next_line_start(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |i| pos + i + 1)
}

/// Re-indent `snippet` under `indent`
///
/// The indentation common to the snippet's lines is removed first. A first
/// line with no indentation is treated as already trimmed, so only the
/// remaining lines set the common indentation. Blank lines become empty.
pub(crate) fn indent_block(snippet: &str, indent: &str) -> String {
    let mut lines: Vec<&str> = snippet
        .trim_end()
        .lines()
        .skip_while(|l| l.trim().is_empty())
        .collect();
    if lines.is_empty() {
        return String::new();
    }

    let first = leading_whitespace(lines[0]).len();
    let rest = lines[1..]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_whitespace(l).len())
        .min();
    let base = match (rest, first) {
        (Some(rest), 0) => rest,
        (Some(rest), first) => rest.min(first),
        (None, first) => first,
    };

    for line in &mut lines {
        let cut = base.min(leading_whitespace(line).len());
        *line = &line[cut..];
    }

    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Leading spaces and tabs of `line`
#[inline]
pub(crate) fn leading_whitespace(line: &str) -> &str {
    let end = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..end]
}

/// Whether `s` consists only of spaces and tabs
#[inline]
pub(crate) fn is_blank_indent(s: &str) -> bool {
    s.bytes().all(|b| b == b' ' || b == b'\t')
}

/// Byte offset of a `//` line comment in `line`, skipping string literals
pub(crate) fn line_comment_start(line: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut escaped = false;
    let bytes = line.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'"' | b'\'' | b'`' => quote = Some(b),
            b'/' if bytes.get(i + 1) == Some(&b'/') => return Some(i),
            _ => {}
        }
    }
    None
}

/// Byte offset just past the last code on any line of `text`, ignoring
/// line comments and trailing whitespace
pub(crate) fn code_end(text: &str) -> Option<usize> {
    let mut offset = 0;
    let mut end = None;
    for line in text.split_inclusive('\n') {
        let code = &line[..line_comment_start(line).unwrap_or(line.len())];
        let code = code.trim_end();
        if !code.is_empty() {
            end = Some(offset + code.len());
        }
        offset += line.len();
    }
    end
}
