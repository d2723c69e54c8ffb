//! `application/x-www-form-urlencoded` field lookup
//!
//! Values are decoded to raw bytes, so a payload may carry any byte sequence
//! (`%FF`, `%00`, ...) and comes back unchanged.

use percent_encoding::percent_decode;

/// First value of `name` in an urlencoded string, or `None` if absent.
pub fn form_value(encoded: &[u8], name: &str) -> Option<Vec<u8>> {
    encoded
        .split(|b| *b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (raw_name, raw_value) = match pair.iter().position(|b| *b == b'=') {
                Some(i) => (&pair[..i], &pair[i + 1..]),
                None => (pair, &pair[pair.len()..]),
            };
            (decode(raw_name) == name.as_bytes()).then(|| decode(raw_value))
        })
}

fn decode(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|b| if *b == b'+' { b' ' } else { *b })
        .collect();
    percent_decode(&spaced).collect()
}
