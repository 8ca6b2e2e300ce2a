//! Field-name casing between the typed model and the broker's JSON.
//!
//! Most wire names are the mechanical snake_case form of a member name. A few (policy definition
//! keys, some enum spellings) are kebab-case or otherwise irregular and are listed as explicit
//! overrides, which bypass the mechanical rule entirely.

use std::borrow::Cow;
use std::collections::HashMap;

/// Insert `separator` before every uppercase letter that follows a lowercase letter or a digit,
/// then lowercase everything.
///
/// Already-separated lowercase input passes through unchanged, so `page_size` and `PageSize`
/// both map to `page_size`.
pub fn separate_words(name: &str, separator: char) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_uppercase() {
            if let Some(p) = prev {
                if p.is_lowercase() || p.is_ascii_digit() {
                    out.push(separator);
                }
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

pub fn to_snake_case(name: &str) -> String {
    separate_words(name, '_')
}

pub fn to_kebab_case(name: &str) -> String {
    separate_words(name, '-')
}

/// Inverse of [separate_words] for names whose words each start with a single uppercase letter.
pub fn to_pascal_case(wire: &str) -> String {
    wire.split(|c| c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// A deterministic member-name to wire-name mapping: a separator for the mechanical rule plus a
/// table of explicit overrides.
#[derive(Clone, Copy, Debug)]
pub struct NamingPolicy {
    separator: char,
    overrides: &'static [(&'static str, &'static str)],
}

/// Plain snake_case with no overrides. Used for query-string keys and most model fields.
pub const SNAKE_CASE: NamingPolicy = NamingPolicy::new('_', &[]);

impl NamingPolicy {
    pub const fn new(separator: char, overrides: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            separator,
            overrides,
        }
    }

    pub fn wire_name<'a>(&self, member: &'a str) -> Cow<'a, str> {
        match self.overrides.iter().find(|(m, _)| *m == member) {
            Some((_, wire)) => Cow::Borrowed(*wire),
            None => Cow::Owned(separate_words(member, self.separator)),
        }
    }

    /// Map a wire name back to the member name it came from, if it is one of `members`.
    pub fn member_name<'a>(&self, wire: &str, members: &[&'a str]) -> Option<&'a str> {
        members
            .iter()
            .copied()
            .find(|member| self.wire_name(member) == wire)
    }

    /// Check that no two of `members` map to the same wire name. Returns the first colliding
    /// pair otherwise.
    pub fn check_injective<'a>(&self, members: &[&'a str]) -> Result<(), (&'a str, &'a str)> {
        let mut seen: HashMap<Cow<'_, str>, &'a str> = HashMap::with_capacity(members.len());
        for member in members {
            if let Some(previous) = seen.insert(self.wire_name(member), *member) {
                return Err((previous, *member));
            }
        }
        Ok(())
    }
}
