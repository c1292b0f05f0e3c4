use std::collections::HashMap;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    /// `?page=N`, 1 when missing, zero or not a number.
    pub fn get_page(&self) -> u32 {
        match self.items.get("page").and_then(|v| v.parse::<u32>().ok()) {
            Some(0) | None => 1,
            Some(page) => page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_page() {
        assert_eq!(QueryString::from("page=3").get_page(), 3);
        assert_eq!(QueryString::from("tag=rust&page=2").get_page(), 2);
        assert_eq!(QueryString::from("").get_page(), 1);
        assert_eq!(QueryString::from("page=0").get_page(), 1);
        assert_eq!(QueryString::from("page=-4").get_page(), 1);
        assert_eq!(QueryString::from("page=abc").get_page(), 1);
    }

    #[test]
    fn test_parse_query_str() {
        let buf = "page=2&tag=web-dev&q=caf%C3%A9";
        let items = vec![
            ("page".to_owned(), "2".to_owned()),
            ("tag".to_owned(), "web-dev".to_owned()),
            ("q".to_owned(), "café".to_owned()),
        ].into_iter().collect::<HashMap<_, _>>();

        let expected = QueryString {
            items,
        };

        assert_eq!(QueryString::from(buf), expected);
    }

    #[test]
    fn test_parse_invalid_query_str() {
        let buf = "";
        let expected = QueryString {
            items: Default::default(),
        };
        assert_eq!(QueryString::from(buf), expected);
    }

    #[test]
    fn test_parse_key_only_query_str() {
        let buf = "key-only";
        let expected: HashMap<String, String> = vec![("key-only", "")].iter().map(|(x, y)| (x.to_string(), y.to_string())).collect::<HashMap<_, _>>();
        assert_eq!(QueryString::from(buf), QueryString { items: expected });
    }
}