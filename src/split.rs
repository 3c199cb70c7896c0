//! Keyed-item grouping and key/quote helpers.
//!
//! Some Tesira values are sent unquoted even though they contain spaces, so a
//! control body such as `"label":Main Room "gain":0` tokenizes into
//! `"label":Main`, `Room` and `"gain":0`. [`split_values`] puts such pieces
//! back together: a token containing a `:` starts a new item, any other token
//! is appended to the item before it.
//!
//! The rule is a protocol quirk, not a grammar. A value that legitimately
//! starts a new top-level token containing a colon without being a key is
//! split off as its own item; that behaviour is kept for wire compatibility.

use crate::scan::{find_top_level, split_array_values, Tokens};

/// Lazy iterator over `"key":value` items.
///
/// Created by [`split_values`].
#[derive(Debug, Clone)]
pub struct KeyedItems<'a> {
    tokens: Tokens<'a>,
    pending: Option<String>,
}

impl Iterator for KeyedItems<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut item = match self.pending.take() {
            Some(token) => token,
            None => self.tokens.next()?,
        };

        for token in self.tokens.by_ref() {
            if token.contains(':') {
                self.pending = Some(token);
                break;
            }
            item.push(' ');
            item.push_str(&token);
        }

        Some(item)
    }
}

/// Groups the top-level tokens of a control body into keyed items.
///
/// # Examples
///
/// ```rust
/// use tesira_ttp::split_values;
///
/// let items: Vec<String> = split_values("\"label\":Main Room \"gain\":0").collect();
/// assert_eq!(items, vec!["\"label\":Main Room", "\"gain\":0"]);
/// ```
pub fn split_values(fragment: &str) -> KeyedItems<'_> {
    KeyedItems {
        tokens: split_array_values(fragment),
        pending: None,
    }
}

/// Splits a leading `"key":` off an item.
///
/// Only an item starting with `"` can carry a key, and only a colon outside
/// every quote, brace and bracket ends it. Both halves come back trimmed.
///
/// # Examples
///
/// ```rust
/// use tesira_ttp::remove_key;
///
/// assert_eq!(remove_key("\"key\":value"), (Some("key"), "value"));
/// assert_eq!(remove_key("value"), (None, "value"));
/// assert_eq!(remove_key("\"12:30\""), (None, "\"12:30\""));
/// ```
#[must_use]
pub fn remove_key(item: &str) -> (Option<&str>, &str) {
    let trimmed = item.trim();
    if trimmed.starts_with('"') {
        if let Some(colon) = find_top_level(trimmed, ':') {
            let key = remove_quotes(trimmed[..colon].trim());
            return (Some(key), trimmed[colon + 1..].trim());
        }
    }
    (None, trimmed)
}

/// Strips at most one leading and one trailing `"`.
///
/// # Examples
///
/// ```rust
/// use tesira_ttp::remove_quotes;
///
/// assert_eq!(remove_quotes("\"text\""), "text");
/// assert_eq!(remove_quotes("\"\"nested\"\""), "\"nested\"");
/// assert_eq!(remove_quotes("bare"), "bare");
/// ```
#[must_use]
pub fn remove_quotes(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(fragment: &str) -> Vec<String> {
        split_values(fragment).collect()
    }

    #[test]
    fn test_split_values_keyed() {
        assert_eq!(
            items("\"deviceId\":0 \"classCode\":0 \"instanceNum\":0"),
            vec!["\"deviceId\":0", "\"classCode\":0", "\"instanceNum\":0"]
        );
    }

    #[test]
    fn test_split_values_merges_unquoted_words() {
        assert_eq!(
            items("\"name\":Tesira Server 1 \"id\":3"),
            vec!["\"name\":Tesira Server 1", "\"id\":3"]
        );
    }

    #[test]
    fn test_split_values_leading_unkeyed_token() {
        assert_eq!(items("stray \"a\":1"), vec!["stray", "\"a\":1"]);
    }

    #[test]
    fn test_split_values_nested_values() {
        assert_eq!(
            items("\"a\":{\"b\":1 \"c\":2} \"d\": [1 2]"),
            vec!["\"a\":{\"b\":1 \"c\":2}", "\"d\":[1 2]"]
        );
    }

    #[test]
    fn test_split_values_empty() {
        assert!(items("").is_empty());
    }

    #[test]
    fn test_remove_key() {
        assert_eq!(remove_key("\"key\":value"), (Some("key"), "value"));
        assert_eq!(remove_key("  \"key\" :  value  "), (Some("key"), "value"));
        assert_eq!(remove_key("value"), (None, "value"));
        assert_eq!(remove_key(""), (None, ""));
    }

    #[test]
    fn test_remove_key_nested_value() {
        assert_eq!(
            remove_key("\"value\":{\"a\":1}"),
            (Some("value"), "{\"a\":1}")
        );
    }

    #[test]
    fn test_remove_key_quoted_scalar_has_no_key() {
        assert_eq!(remove_key("\"a:b\""), (None, "\"a:b\""));
    }

    #[test]
    fn test_remove_quotes_strips_at_most_one_each_side() {
        assert_eq!(remove_quotes("\"\"x\"\""), "\"x\"");
        assert_eq!(remove_quotes("\"x"), "x");
        assert_eq!(remove_quotes("x\""), "x");
        assert_eq!(remove_quotes("\""), "");
        assert_eq!(remove_quotes(""), "");
        assert_eq!(remove_quotes("a\"b"), "a\"b");
    }
}
