//! File names derived from certificate labels

use crate::utils::EmitError;
use once_cell::sync::Lazy;
use regex::bytes::{Captures, Regex};

static HEX_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\x([0-9a-fA-F]{2})").expect("valid hex escape pattern"));

/// Turn a quoted certdata label into a file name with `extension`.
///
/// The surrounding quotes are dropped, `/`, space and `,` become `_`, and
/// parentheses become `=`. `\xHH` escapes are then decoded, so UTF-8 labels
/// come out readable. A decoded `/` or NUL is replaced with `_` to keep the
/// file inside the output directory.
pub fn label_to_filename(label: &str, extension: &str) -> Result<String, EmitError> {
    let inner = label.strip_prefix('"').unwrap_or(label);
    let inner = inner.strip_suffix('"').unwrap_or(inner);

    let replaced: String = inner
        .chars()
        .map(|c| match c {
            '/' | ' ' | ',' => '_',
            '(' | ')' => '=',
            c => c,
        })
        .collect();

    let mut decoded = HEX_ESCAPE
        .replace_all(replaced.as_bytes(), |caps: &Captures| {
            decode_hex(&caps[1]).map_or_else(|| caps[0].to_vec(), |byte| vec![byte])
        })
        .into_owned();
    for byte in decoded.iter_mut() {
        if *byte == b'/' || *byte == 0 {
            *byte = b'_';
        }
    }

    let stem = match String::from_utf8(decoded) {
        Ok(stem) => stem,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    if stem.is_empty() || stem == "." || stem == ".." {
        return Err(EmitError::InvalidFileName {
            label: label.to_string(),
        });
    }

    if extension.is_empty() {
        Ok(stem)
    } else {
        Ok(format!("{}.{}", stem, extension))
    }
}

fn decode_hex(digits: &[u8]) -> Option<u8> {
    std::str::from_utf8(digits)
        .ok()
        .and_then(|s| u8::from_str_radix(s, 16).ok())
}
