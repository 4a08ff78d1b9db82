//! TXT record chunking.
//!
//! A single TXT character-string holds at most [`MAX_TXT_CHUNK`] bytes. Longer values are
//! split before they reach the differ, written as a sequence of quoted strings and joined
//! again when read back, so a value survives the round trip independent of chunking.

use crate::types::{Record, RecordType};

/// Maximum length in bytes of one TXT character-string.
pub const MAX_TXT_CHUNK: usize = 255;

/// Splits every TXT record whose value does not fit a single string into
/// [`MAX_TXT_CHUNK`]-byte chunks. Records that already carry several chunks of legal
/// length are left alone.
pub fn split_long_txt(records: &mut [Record]) {
    for record in records
        .iter_mut()
        .filter(|r| r.record_type == RecordType::Txt)
    {
        if record.txt_strings.iter().all(|c| c.len() <= MAX_TXT_CHUNK)
            && !record.txt_strings.is_empty()
        {
            continue;
        }
        let chunks = split_text(&record.target);
        log::debug!(
            "Split TXT {} into {} chunks",
            record.name_fqdn,
            chunks.len()
        );
        record.set_txt_strings(chunks);
    }
}

/// Cuts `text` into pieces of at most [`MAX_TXT_CHUNK`] bytes without splitting a
/// multi-byte character. An empty text yields one empty chunk.
pub fn split_text(text: &str) -> Vec<String> {
    if text.len() <= MAX_TXT_CHUNK {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let mut end = rest.len().min(MAX_TXT_CHUNK);
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        let (head, tail) = rest.split_at(end);
        chunks.push(head.to_string());
        rest = tail;
    }
    chunks
}

/// Renders chunks as a single provider value.
///
/// One chunk is sent verbatim unless it would itself read back as a quoted sequence; such
/// a chunk and any longer list are sent as space-separated quoted strings with `"` and `\`
/// escaped.
pub fn encode_chunks(chunks: &[String]) -> String {
    match chunks {
        [] => String::new(),
        [single] if parse_quoted(single).is_none() => single.clone(),
        [single] => {
            let mut mid = single.len() / 2;
            while !single.is_char_boundary(mid) {
                mid -= 1;
            }
            let (head, tail) = single.split_at(mid);
            quote_all(&[head, tail])
        }
        many => quote_all(many),
    }
}

fn quote_all<S: AsRef<str>>(chunks: &[S]) -> String {
    chunks
        .iter()
        .map(|c| {
            let c = c.as_ref();
            format!("\"{}\"", c.replace('\\', "\\\\").replace('"', "\\\""))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Inverse of [`encode_chunks`].
///
/// A value made up entirely of quoted strings is split into them; anything else is a
/// single chunk.
pub fn decode_chunks(value: &str) -> Vec<String> {
    parse_quoted(value).unwrap_or_else(|| vec![value.to_string()])
}

fn parse_quoted(value: &str) -> Option<Vec<String>> {
    let trimmed = value.trim();
    if !trimmed.starts_with('"') {
        return None;
    }

    let mut chunks = Vec::new();
    let mut chars = trimmed.chars().peekable();
    loop {
        while chars.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            chars.next();
        }
        match chars.next() {
            None => break,
            Some('"') => {}
            Some(_) => return None,
        }

        let mut chunk = String::new();
        loop {
            match chars.next()? {
                '\\' => chunk.push(chars.next()?),
                '"' => break,
                c => chunk.push(c),
            }
        }
        chunks.push(chunk);

        // chunks must be separated by whitespace
        if chars.peek().is_some_and(|c| !c.is_ascii_whitespace()) {
            return None;
        }
    }

    if chunks.len() < 2 {
        return None;
    }
    Some(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_text("v=spf1 -all"), vec!["v=spf1 -all".to_string()]);
        assert_eq!(split_text(""), vec![String::new()]);
    }

    #[test]
    fn long_text_split_at_limit() {
        let text = "x".repeat(600);
        let chunks = split_text(&text);
        assert_eq!(
            chunks.iter().map(String::len).collect::<Vec<_>>(),
            vec![255, 255, 90]
        );
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn split_respects_char_boundaries() {
        let text = "ü".repeat(200);
        let chunks = split_text(&text);
        assert!(chunks.iter().all(|c| c.len() <= MAX_TXT_CHUNK));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn split_long_txt_only_touches_long_txt_records() {
        let long = "k".repeat(300);
        let mut records = vec![
            Record::txt("dkim", "example.com", long.clone()),
            Record::txt("@", "example.com", "short"),
            Record::new("www", "example.com", RecordType::A, "1.2.3.4"),
        ];
        split_long_txt(&mut records);

        assert_eq!(records[0].txt_strings.len(), 2);
        assert_eq!(records[0].target, long);
        assert_eq!(records[1].txt_strings, vec!["short".to_string()]);
        assert!(records[2].txt_strings.is_empty());
    }

    #[test]
    fn encode_single_chunk_verbatim() {
        assert_eq!(encode_chunks(&["hello \"world\"".to_string()]), "hello \"world\"");
    }

    #[test]
    fn quoted_looking_value_survives_write_and_read() {
        for text in ["\"a\" \"b\"", "\"v=DKIM1; k=rsa\" \"p=MIGf\"", "\"\" \"\""] {
            let wire = encode_chunks(&[text.to_string()]);
            assert_ne!(wire, text);
            assert_eq!(decode_chunks(&wire).concat(), text, "wire: {wire}");
        }
    }

    #[test]
    fn long_value_survives_write_and_read() {
        let text = format!("v=DKIM1; k=rsa; p={}\"quoted\\", "A".repeat(400));
        let wire = encode_chunks(&split_text(&text));
        assert!(wire.starts_with('"'));
        assert_eq!(decode_chunks(&wire).concat(), text);
    }

    #[test]
    fn decode_plain_value_is_single_chunk() {
        assert_eq!(decode_chunks("plain text"), vec!["plain text".to_string()]);
        // a lone quoted string is not a chunk sequence
        assert_eq!(decode_chunks("\"only\""), vec!["\"only\"".to_string()]);
        // unterminated quote falls back to the raw value
        assert_eq!(decode_chunks("\"a\" \"b"), vec!["\"a\" \"b".to_string()]);
    }
}
