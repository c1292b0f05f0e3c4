use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

pub type Meta = BTreeMap<String, String>;

/// Parses the info string that follows the language of a fenced code block.
///
/// Tokens are separated by whitespace and must look like `key="value"` or
/// `key='value'` with a non-empty value. Anything else is dropped.
pub fn parse_meta_string(raw: &str) -> Meta {
    lazy_static! {
        static ref META_TOKEN_REGEX: Regex = Regex::new(r#"^(.+)=(?:"(.+)"|'(.+)')$"#).unwrap();
    }

    let mut meta = Meta::new();
    for token in raw.split_whitespace() {
        let Some(caps) = META_TOKEN_REGEX.captures(token) else {
            continue;
        };
        let Some(key) = caps.get(1) else {
            continue;
        };
        let Some(value) = caps.get(2).or_else(|| caps.get(3)) else {
            continue;
        };
        meta.insert(key.as_str().to_string(), value.as_str().to_string());
    }
    meta
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txt(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn test_filename_and_bare_token() {
        let meta = parse_meta_string(r#"filename="app.ts" foo='bar' baz"#);
        let mut expected = Meta::new();
        expected.insert("filename".to_string(), txt("app.ts"));
        expected.insert("foo".to_string(), txt("bar"));
        assert_eq!(meta, expected);
    }

    #[test]
    fn test_malformed_tokens_are_skipped() {
        let meta = parse_meta_string(r#"a="x' b=unquoted c="ok" ="nokey" d='mixed""#);
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.get("c"), Some(&txt("ok")));
    }

    #[test]
    fn test_empty_value_is_dropped() {
        let meta = parse_meta_string(r#"wrap="" other='' title='t'"#);
        assert!(meta.get("wrap").is_none());
        assert!(meta.get("other").is_none());
        assert_eq!(meta.get("title"), Some(&txt("t")));
    }

    #[test]
    fn test_value_containing_equals() {
        let meta = parse_meta_string(r#"query="a=b""#);
        assert_eq!(meta.get("query"), Some(&txt("a=b")));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_meta_string("").is_empty());
        assert!(parse_meta_string("   ").is_empty());
    }
}
