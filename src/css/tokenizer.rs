//! Declaration tokenizer
//!
//! Turns declaration-list text into [`Property`] triples. The stores only depend on the
//! [`DeclarationTokenizer`] trait; [`CssTokenizer`] is the lenient default: malformed
//! declarations are skipped, while unbalanced brackets or unterminated strings fail the
//! whole text.

use crate::css::property::{IMPORTANT, Property};
use crate::error::{DomError, Result};

/// Source of declaration triples for a declaration block
pub trait DeclarationTokenizer {
    /// Parse a declaration list such as `color: red; margin: 0 !important`
    fn tokenize(&self, text: &str) -> Result<Vec<Property>>;

    /// Parse `value` as the value of `name`, splitting an optional trailing `!important`
    ///
    /// Returns `Ok(None)` when the pair does not form exactly one valid declaration.
    fn tokenize_value(&self, name: &str, value: &str) -> Result<Option<Property>> {
        let mut parsed = self.tokenize(&format!("{name}: {value}"))?;
        if parsed.len() == 1 {
            Ok(parsed.pop())
        } else {
            Ok(None)
        }
    }
}

/// Default declaration tokenizer
#[derive(Debug, Default, Clone, Copy)]
pub struct CssTokenizer;

impl DeclarationTokenizer for CssTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Property>> {
        let sanitized = strip_comments(text);
        let mut properties = Vec::new();

        for declaration in split_top_level(&sanitized, b';')? {
            let trimmed = declaration.trim_ascii();
            if trimmed.is_empty() {
                continue;
            }

            match parse_declaration(trimmed) {
                Some(property) => properties.push(property),
                None => log::debug!("Skipping malformed declaration {:?}", trimmed),
            }
        }

        Ok(properties)
    }
}

fn parse_declaration(declaration: &str) -> Option<Property> {
    let colon = find_top_level(declaration, b':')?;
    let name = declaration[..colon].trim_ascii();
    if name.is_empty() || name.contains(|c: char| c.is_ascii_whitespace()) {
        return None;
    }

    let (value, important) = split_importance(&normalize_value(&declaration[colon + 1..]));
    if value.is_empty() {
        return None;
    }

    Some(Property::new(name, value).with_important(important))
}

/// Split a trailing `!important` (any case, optional space after `!`) off a value
fn split_importance(value: &str) -> (String, bool) {
    let trimmed = value.trim_ascii_end();
    let Some(start) = trimmed.len().checked_sub(IMPORTANT.len()) else {
        return (trimmed.to_string(), false);
    };

    match trimmed.get(start..) {
        Some(tail) if tail.eq_ignore_ascii_case(IMPORTANT) => {
            match trimmed[..start].trim_ascii_end().strip_suffix('!') {
                Some(rest) => (rest.trim_ascii_end().to_string(), true),
                None => (trimmed.to_string(), false),
            }
        }
        _ => (trimmed.to_string(), false),
    }
}

/// Walk `input`, calling `visit` for every byte outside strings and brackets
///
/// A backslash escapes the byte after it, which is never visited. Fails on a closing
/// bracket without its opener, on a missing closer, or on an unterminated string.
pub(crate) fn scan_top_level(input: &str, mut visit: impl FnMut(usize, u8)) -> Result<()> {
    let mut quote: Option<u8> = None;
    let mut escape = false;
    let mut closers: Vec<u8> = Vec::new();

    for (idx, &byte) in input.as_bytes().iter().enumerate() {
        if escape {
            escape = false;
            continue;
        }
        if byte == b'\\' {
            escape = true;
            continue;
        }

        if let Some(open) = quote {
            if byte == open {
                quote = None;
            }
            continue;
        }

        match byte {
            b'\'' | b'"' => quote = Some(byte),
            b'(' => closers.push(b')'),
            b'[' => closers.push(b']'),
            b'{' => closers.push(b'}'),
            b')' | b']' | b'}' => {
                if closers.pop() != Some(byte) {
                    return Err(DomError::Syntax(format!(
                        "unexpected '{}' at offset {}",
                        byte as char, idx
                    )));
                }
            }
            _ if closers.is_empty() => visit(idx, byte),
            _ => {}
        }
    }

    if quote.is_some() {
        return Err(DomError::Syntax("unterminated string".to_string()));
    }
    if let Some(closer) = closers.last() {
        return Err(DomError::Syntax(format!("missing '{}'", *closer as char)));
    }

    Ok(())
}

/// Split on `delimiter` where it appears outside strings and brackets
pub(crate) fn split_top_level(input: &str, delimiter: u8) -> Result<Vec<&str>> {
    let mut cuts = Vec::new();
    scan_top_level(input, |idx, byte| {
        if byte == delimiter {
            cuts.push(idx);
        }
    })?;

    let mut parts = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        parts.push(&input[start..cut]);
        start = cut + 1;
    }
    parts.push(&input[start..]);

    Ok(parts)
}

fn find_top_level(input: &str, needle: u8) -> Option<usize> {
    let mut found = None;
    scan_top_level(input, |idx, byte| {
        if byte == needle && found.is_none() {
            found = Some(idx);
        }
    })
    .ok()?;
    found
}

/// Remove `/* ... */` comments outside strings, escapes and unquoted `url(...)` arguments
///
/// A comment becomes a single space so it still separates the tokens around it.
pub(crate) fn strip_comments(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut quote: Option<u8> = None;
    let mut idx = 0;

    while idx < bytes.len() {
        let byte = bytes[idx];

        if byte == b'\\' {
            let end = (idx + 2).min(bytes.len());
            out.extend_from_slice(&bytes[idx..end]);
            idx = end;
            continue;
        }

        if let Some(open) = quote {
            out.push(byte);
            if byte == open {
                quote = None;
            }
            idx += 1;
            continue;
        }

        if byte == b'/' && bytes.get(idx + 1) == Some(&b'*') {
            idx = input[idx + 2..]
                .find("*/")
                .map_or(bytes.len(), |end| idx + 2 + end + 2);
            out.push(b' ');
            continue;
        }

        if byte == b'(' && opens_unquoted_url(bytes, idx) {
            let end = unquoted_url_end(bytes, idx + 1);
            out.extend_from_slice(&bytes[idx..end]);
            idx = end;
            continue;
        }

        if byte == b'\'' || byte == b'"' {
            quote = Some(byte);
        }
        out.push(byte);
        idx += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' || byte >= 0x80
}

/// Whether the `(` at `paren` starts a `url(` whose argument is not a string
fn opens_unquoted_url(bytes: &[u8], paren: usize) -> bool {
    let Some(start) = paren.checked_sub(3) else {
        return false;
    };
    if !bytes[start..paren].eq_ignore_ascii_case(b"url") {
        return false;
    }
    if start > 0 && is_ident_byte(bytes[start - 1]) {
        return false;
    }

    let next = bytes[paren + 1..].iter().find(|b| !b.is_ascii_whitespace());
    !matches!(next, Some(b'\'' | b'"'))
}

/// Index just past the `)` closing an unquoted url argument starting at `from`
fn unquoted_url_end(bytes: &[u8], from: usize) -> usize {
    let mut escape = false;
    for (offset, &byte) in bytes[from..].iter().enumerate() {
        if escape {
            escape = false;
        } else if byte == b'\\' {
            escape = true;
        } else if byte == b')' {
            return from + offset + 1;
        }
    }
    bytes.len()
}

/// Collapse ASCII whitespace runs outside strings and escapes into single spaces and trim
fn normalize_value(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut quote: Option<char> = None;
    let mut escape = false;
    let mut last_was_space = false;

    for ch in input.chars() {
        if escape || ch == '\\' {
            escape = !escape;
            last_was_space = false;
            out.push(ch);
            continue;
        }

        if let Some(open) = quote {
            if ch == open {
                quote = None;
            }
            out.push(ch);
            continue;
        }

        if ch.is_ascii_whitespace() {
            if !last_was_space && !out.is_empty() {
                out.push(' ');
                last_was_space = true;
            }
            continue;
        }

        if ch == '\'' || ch == '"' {
            quote = Some(ch);
        }
        last_was_space = false;
        out.push(ch);
    }

    if last_was_space {
        out.pop();
    }
    out
}
