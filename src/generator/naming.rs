/// Converts between two conventions. The generator only uses
/// `CamelCase -> SnakeCase` (fields) and `ScreamingSnakeCase -> PascalCase`
/// (enum values); the other pairs are the reverse directions.
pub fn convert<F: NamingConvention, T: NamingConvention>(source: &str) -> String {
    T::concatenate(&F::split(source))
}

/// Converts a schema field name (`lowerCamelCase`) to a Rust field name.
///
/// Every ASCII uppercase letter gets an underscore in front of it and is
/// lowercased, including a leading one: `FooBar` becomes `_foo_bar`.
pub fn to_snake_case(identifier: &str) -> String {
    convert::<CamelCase, SnakeCase>(identifier)
}

/// Converts a schema enum value (`SCREAMING_SNAKE_CASE`) to a Rust variant name.
///
/// The whole input is lowercased first, so mixed-case input is folded as
/// well: `blahblah` becomes `Blahblah`, `_FOO__BAR_` becomes `_Foo_Bar_`.
pub fn to_upper_camel_case(identifier: &str) -> String {
    convert::<ScreamingSnakeCase, PascalCase>(identifier)
}

pub trait NamingConvention {
    fn split(name: &str) -> Vec<&str>;
    fn concatenate(words: &[&str]) -> String;
}

fn split_before_uppercase(name: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    for (index, c) in name.char_indices() {
        if c.is_ascii_uppercase() {
            words.push(&name[start..index]);
            start = index;
        }
    }
    words.push(&name[start..]);
    words
}

fn push_capitalized(result: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        result.push(first.to_ascii_uppercase());
        chars.for_each(|c| result.push(c.to_ascii_lowercase()));
    }
}

pub struct SnakeCase;

impl NamingConvention for SnakeCase {
    fn split(name: &str) -> Vec<&str> {
        name.split('_').collect()
    }

    fn concatenate(words: &[&str]) -> String {
        words
            .iter()
            .map(|w| w.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join("_")
    }
}

pub struct ScreamingSnakeCase;

impl NamingConvention for ScreamingSnakeCase {
    fn split(name: &str) -> Vec<&str> {
        SnakeCase::split(name)
    }

    fn concatenate(words: &[&str]) -> String {
        words
            .iter()
            .map(|w| w.to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join("_")
    }
}

pub struct CamelCase;

impl NamingConvention for CamelCase {
    /// Splits in front of every uppercase letter. A leading uppercase letter
    /// yields an empty first word.
    fn split(name: &str) -> Vec<&str> {
        split_before_uppercase(name)
    }

    fn concatenate(words: &[&str]) -> String {
        let mut result = String::new();
        if let Some((first, rest)) = words.split_first() {
            result.push_str(&first.to_ascii_lowercase());
            for word in rest {
                push_capitalized(&mut result, word);
            }
        }
        result
    }
}

pub struct PascalCase;

impl NamingConvention for PascalCase {
    fn split(name: &str) -> Vec<&str> {
        let mut words = split_before_uppercase(name);
        if words.len() > 1 && words[0].is_empty() {
            words.remove(0);
        }
        words
    }

    /// Every word is treated as if it followed a separator: words starting
    /// with a letter are capitalized, any other word keeps its underscore.
    fn concatenate(words: &[&str]) -> String {
        let mut result = String::new();
        for word in words {
            let word = word.to_lowercase();
            if word.starts_with(|c: char| c.is_ascii_lowercase()) {
                push_capitalized(&mut result, &word);
            } else {
                result.push('_');
                result.push_str(&word);
            }
        }
        result
    }
}
