//! Escaping of broker resource names for use as URL path segments.
//!
//! The management API addresses resources as `/api/<kind>/<vhost>/<name>`, so any character
//! that would change how the broker splits or decodes the path has to be escaped by hand.

use std::borrow::Cow;

/// Escape a vhost name for use as a path segment. Only `/` is escaped, which makes the default
/// vhost `/` come out as `%2f`.
pub fn sanitize_vhost(vhost: &str) -> Cow<'_, str> {
    if vhost.contains('/') {
        Cow::Owned(vhost.replace('/', "%2f"))
    } else {
        Cow::Borrowed(vhost)
    }
}

/// Escape a queue, exchange, user, policy or parameter name for use as a path segment.
pub fn sanitize_name(name: &str) -> Cow<'_, str> {
    if !name.contains(is_reserved) {
        return Cow::Borrowed(name);
    }
    let mut escaped = String::with_capacity(name.len() + 8);
    for c in name.chars() {
        match c {
            '/' => escaped.push_str("%2f"),
            '+' => escaped.push_str("%2B"),
            '#' => escaped.push_str("%23"),
            ':' => escaped.push_str("%3A"),
            '[' => escaped.push_str("%5B"),
            ']' => escaped.push_str("%5D"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn is_reserved(c: char) -> bool {
    matches!(c, '/' | '+' | '#' | ':' | '[' | ']')
}

/// Re-escape a binding properties key before it goes into a binding delete path.
///
/// The broker hands out properties keys with `_` already escaped as `%5F`, and its binding
/// endpoint decodes that segment twice, so `%5F` has to be sent as `%255F`. This is a
/// compatibility shim for that one endpoint; it is not applied to any other identifier.
pub fn escape_properties_key(properties_key: &str) -> Cow<'_, str> {
    if properties_key.contains("%5F") {
        Cow::Owned(properties_key.replace("%5F", "%255F"))
    } else {
        Cow::Borrowed(properties_key)
    }
}
