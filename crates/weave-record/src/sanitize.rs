//! Input clean-up for generator output
//!
//! Generators frequently wrap the XML envelope in a markdown code fence or
//! surround it with prose. [`clean_xml`] reduces such text to the envelope
//! itself; it never touches anything between the opening and closing tags.

const XML_DECLARATION: &str = "<?xml";
const ROOT_TAG: &str = "module";

/// Strip code fences and surrounding prose from one module document
///
/// The document starts at the XML declaration, else at a `<module>` root
/// tag, else at the first element tag. It ends at the closing tag of its
/// root element.
#[must_use]
pub fn clean_xml(raw: &str) -> String {
    let mut s = raw.trim();

    if s.starts_with("```") {
        s = s.split_once('\n').map_or("", |(_, rest)| rest);
    }
    if let Some((body, last_line)) = s.trim_end().rsplit_once('\n') {
        if last_line.trim().starts_with("```") {
            s = body;
        }
    }
    s = s.trim().trim_matches('`').trim();

    let start = s
        .find(XML_DECLARATION)
        .or_else(|| find_tag(s, ROOT_TAG))
        .or_else(|| first_element(s))
        .unwrap_or(0);
    s = &s[start..];

    if let Some(name) = root_name(s) {
        let closing = format!("</{name}>");
        if let Some(end) = s.rfind(&closing) {
            s = &s[..end + closing.len()];
        }
    }

    s.trim().to_string()
}

/// Offset of the first `<name` that opens a tag called exactly `name`
fn find_tag(s: &str, name: &str) -> Option<usize> {
    let open = format!("<{name}");
    s.match_indices(&open)
        .map(|(i, _)| i)
        .find(|&i| {
            s[i + open.len()..].starts_with(|c: char| c == '>' || c == '/' || c.is_whitespace())
        })
}

/// Offset of the first `<` followed by an element name
fn first_element(s: &str) -> Option<usize> {
    s.match_indices('<')
        .map(|(i, _)| i)
        .find(|&i| s[i + 1..].starts_with(is_name_start))
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Name of the root element, skipping a leading XML declaration
fn root_name(s: &str) -> Option<&str> {
    let body = if s.starts_with(XML_DECLARATION) {
        &s[s.find("?>")? + 2..]
    } else {
        s
    };
    let tag = &body[first_element(body)? + 1..];
    let end = tag
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(tag.len());
    Some(&tag[..end])
}
