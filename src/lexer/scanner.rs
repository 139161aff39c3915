const BOM: char = '\u{feff}';

pub(super) fn strip_bom(input: &str) -> &str {
    input.strip_prefix(BOM).unwrap_or(input)
}

/// Split the next physical line off `rest`.
///
/// `\r\n`, `\n` and a lone `\r` all end a line. The terminator is consumed
/// but not returned. A trailing terminator does not produce an extra empty
/// line.
pub(super) fn next_physical_line<'a>(rest: &mut &'a str) -> Option<&'a str> {
    if rest.is_empty() {
        return None;
    }

    let input = *rest;
    match input.find(['\n', '\r']) {
        Some(end) => {
            let line = &input[..end];
            let skip = if input[end..].starts_with("\r\n") { 2 } else { 1 };
            *rest = &input[end + skip..];
            Some(line)
        }
        None => {
            *rest = "";
            Some(input)
        }
    }
}
