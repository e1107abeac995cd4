//! Stock property-name converters.
//!
//! Each converter is a plain `fn(&str) -> String` so it can be stored
//! directly as a [`crate::format::NameConverter`]. All of them share one
//! word splitter: names break on `_`, `-` and spaces as well as on case
//! boundaries, with uppercase runs kept together as acronyms (`"XMLFile"`
//! splits into `XML` + `File`).

/// `"log_level"` → `"LogLevel"`.
pub fn pascal_case(name: &str) -> String {
    split_words(name).iter().map(|word| capitalize(word)).collect()
}

/// `"log_level"` → `"logLevel"`.
pub fn camel_case(name: &str) -> String {
    let words = split_words(name);
    let mut out = String::with_capacity(name.len());
    for (index, word) in words.iter().enumerate() {
        if index == 0 {
            out.push_str(&word.to_ascii_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// `"LogLevel"` → `"log_level"`.
pub fn snake_case(name: &str) -> String {
    join_lowercase(name, '_')
}

/// `"LogLevel"` → `"log-level"`.
pub fn kebab_case(name: &str) -> String {
    join_lowercase(name, '-')
}

/// Pascal-cased and upper-cased: `"log_level"` → `"LOGLEVEL"`.
pub fn all_caps(name: &str) -> String {
    pascal_case(name).to_ascii_uppercase()
}

/// Pascal-cased and lower-cased: `"Log_Level"` → `"loglevel"`.
pub fn all_lower(name: &str) -> String {
    pascal_case(name).to_ascii_lowercase()
}

fn join_lowercase(name: &str, separator: char) -> String {
    let words = split_words(name);
    let mut out = String::with_capacity(name.len() + words.len());
    for (index, word) in words.iter().enumerate() {
        if index > 0 {
            out.push(separator);
        }
        out.push_str(&word.to_ascii_lowercase());
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(&chars.as_str().to_ascii_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Splits a name into words on delimiters and case boundaries. A new word
/// starts at an uppercase letter preceded by a lowercase letter or digit,
/// or at the last capital of an uppercase run that is followed by
/// lowercase.
fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (index, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() && c.is_ascii_uppercase() {
            let prev = chars[index - 1];
            let next_is_lower = chars
                .get(index + 1)
                .is_some_and(|next| next.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
