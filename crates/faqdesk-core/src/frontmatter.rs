/// Strips a leading metadata header delimited by `---` lines.
///
/// When the document (ignoring leading whitespace) opens with `---`, the
/// lines up to and including the next line that is exactly `---` are
/// discarded and the remainder is returned with leading blank lines
/// trimmed. Documents with no header, or with an opening delimiter but no
/// closing one, come back unchanged.
pub fn strip_front_matter(doc: &str) -> &str {
    let body = doc.trim_start();
    if !body.starts_with("---") {
        return doc;
    }

    let mut lines = body.split_inclusive('\n');
    let Some(opening) = lines.next() else {
        return doc;
    };

    let mut offset = opening.len();
    for line in lines {
        offset += line.len();
        if line.trim() == "---" {
            return body[offset..].trim_start_matches(['\r', '\n']);
        }
    }

    doc
}
