use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::UserFields;

// A tag starts with a letter, '/', '!' or '?' right after '<' and runs to the
// next '>' or, when unterminated, to the end of the input.
static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<[A-Za-z/!?][^>]*(?:>|$)").expect("tag pattern is a valid regex")
});

/// Removes markup tags from user-supplied text.
///
/// Stripping repeats until nothing changes, so `<<b>i>` cannot reassemble
/// into a tag. Text such as `a < b` is left alone. Escaping of `<`, `&` and
/// quotes is left to the template engine at render time.
pub fn strip_tags(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let stripped = TAG_PATTERN.replace_all(&current, "").into_owned();
        if stripped == current {
            return current;
        }
        current = stripped;
    }
}

pub fn sanitize_fields(fields: &UserFields) -> UserFields {
    UserFields {
        name: strip_tags(&fields.name),
        email: strip_tags(&fields.email),
        phone: strip_tags(&fields.phone),
    }
}
