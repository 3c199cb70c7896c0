//! Top-level tokenizer for TTP fragments.
//!
//! The scanner walks a fragment once, left to right, and splits it only at
//! *top-level* whitespace: positions outside every `{...}` and `[...]` region,
//! outside quotes and not directly after a backslash.
//!
//! The lexical state is a plain [`ScanState`] value. Each character produces
//! the next state through [`ScanState::advance`], so the transition table can
//! be exercised without any splitting logic attached.
//!
//! ```rust
//! use tesira_ttp::split_array_values;
//!
//! let tokens: Vec<String> = split_array_values("10 {\"A\":1 \"B\":2} [1 2]").collect();
//! assert_eq!(tokens, vec!["10", "{\"A\":1 \"B\":2}", "[1 2]"]);
//! ```

/// Lexical state carried across a single pass over a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanState {
    pub brace_depth: usize,
    pub bracket_depth: usize,
    pub in_quotes: bool,
    /// Set only for the character right after an unescaped `\`.
    pub escaped: bool,
}

impl ScanState {
    /// State at the start of a fragment.
    #[must_use]
    pub const fn new() -> Self {
        ScanState {
            brace_depth: 0,
            bracket_depth: 0,
            in_quotes: false,
            escaped: false,
        }
    }

    /// Returns `true` where the fragment may be split.
    #[inline]
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        self.brace_depth == 0 && self.bracket_depth == 0 && !self.in_quotes && !self.escaped
    }

    /// Returns the state after consuming `ch`.
    ///
    /// An escaped character is always literal. Braces and brackets inside
    /// quotes do not change depth. Closing an unopened region saturates at zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tesira_ttp::scan::ScanState;
    ///
    /// let state = "{\"a".chars().fold(ScanState::new(), ScanState::advance);
    /// assert_eq!(state.brace_depth, 1);
    /// assert!(state.in_quotes);
    /// assert!(!state.is_top_level());
    /// ```
    #[must_use]
    pub fn advance(self, ch: char) -> Self {
        let mut next = self;
        if self.escaped {
            next.escaped = false;
            return next;
        }

        match ch {
            '\\' => next.escaped = true,
            '"' => next.in_quotes = !self.in_quotes,
            _ if self.in_quotes => {}
            '{' => next.brace_depth += 1,
            '}' => next.brace_depth = self.brace_depth.saturating_sub(1),
            '[' => next.bracket_depth += 1,
            ']' => next.bracket_depth = self.bracket_depth.saturating_sub(1),
            _ => {}
        }
        next
    }
}

/// Lazy iterator over the top-level tokens of a fragment.
///
/// Created by [`split_array_values`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    chars: std::str::Chars<'a>,
    state: ScanState,
    after_colon: bool,
}

impl<'a> Tokens<'a> {
    fn new(fragment: &'a str) -> Self {
        Tokens {
            chars: fragment.chars(),
            state: ScanState::new(),
            after_colon: false,
        }
    }

    /// Lexical state reached so far.
    ///
    /// Once the iterator is exhausted a state that is not top-level means the
    /// fragment was unbalanced.
    #[must_use]
    pub fn state(&self) -> ScanState {
        self.state
    }
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut token = String::new();

        for ch in self.chars.by_ref() {
            let top_level = self.state.is_top_level();

            if top_level && ch.is_whitespace() {
                // `"key": value` stays one token
                if self.after_colon || token.is_empty() {
                    continue;
                }
                return Some(token);
            }

            self.after_colon = top_level && ch == ':';
            self.state = self.state.advance(ch);
            token.push(ch);
        }

        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }
}

/// Splits a fragment, given without its enclosing brackets, into top-level tokens.
///
/// Whitespace directly after a top-level `:` never ends a token, so keyed
/// items come out as `"key":value`. Unbalanced input is not rejected here.
///
/// # Examples
///
/// ```rust
/// use tesira_ttp::split_array_values;
///
/// let tokens: Vec<String> = split_array_values("\"a b\"  \"key\": value").collect();
/// assert_eq!(tokens, vec!["\"a b\"", "\"key\":value"]);
/// ```
pub fn split_array_values(fragment: &str) -> Tokens<'_> {
    Tokens::new(fragment)
}

/// Returns the byte offset of the first top-level occurrence of `target`.
///
/// # Examples
///
/// ```rust
/// use tesira_ttp::scan::find_top_level;
///
/// assert_eq!(find_top_level("\"a:b\":c", ':'), Some(5));
/// assert_eq!(find_top_level("{\"a\":1}", ':'), None);
/// ```
#[must_use]
pub fn find_top_level(fragment: &str, target: char) -> Option<usize> {
    let mut state = ScanState::new();
    for (index, ch) in fragment.char_indices() {
        if ch == target && state.is_top_level() {
            return Some(index);
        }
        state = state.advance(ch);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(fragment: &str) -> Vec<String> {
        split_array_values(fragment).collect()
    }

    #[test]
    fn test_state_transitions() {
        let state = ScanState::new().advance('{').advance('[');
        assert_eq!(state.brace_depth, 1);
        assert_eq!(state.bracket_depth, 1);

        let state = state.advance(']').advance('}');
        assert!(state.is_top_level());

        let state = ScanState::new().advance('\\');
        assert!(state.escaped);
        assert!(!state.is_top_level());
        let state = state.advance('"');
        assert!(!state.in_quotes);
        assert!(state.is_top_level());
    }

    #[test]
    fn test_brackets_inside_quotes_are_literal() {
        let state = "\"{[\"".chars().fold(ScanState::new(), ScanState::advance);
        assert_eq!(state, ScanState::new());
    }

    #[test]
    fn test_unbalanced_close_saturates() {
        let state = ScanState::new().advance('}').advance(']');
        assert_eq!(state.brace_depth, 0);
        assert_eq!(state.bracket_depth, 0);
    }

    #[test]
    fn test_split_simple() {
        assert_eq!(tokens("1 2 3"), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_split_coalesces_whitespace() {
        assert_eq!(tokens("  1 \t 2\n\n3  "), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(tokens("").is_empty());
        assert!(tokens("   ").is_empty());
    }

    #[test]
    fn test_split_nested() {
        assert_eq!(
            tokens("10 {\"A\":1 \"B\":[1 2]} [[1 2] [3]]"),
            vec!["10", "{\"A\":1 \"B\":[1 2]}", "[[1 2] [3]]"]
        );
    }

    #[test]
    fn test_split_quoted_whitespace() {
        assert_eq!(
            tokens("\"Main Room\" \"Lobby { west\""),
            vec!["\"Main Room\"", "\"Lobby { west\""]
        );
    }

    #[test]
    fn test_split_escaped_quote() {
        assert_eq!(
            tokens("\"say \\\"hi there\\\"\" next"),
            vec!["\"say \\\"hi there\\\"\"", "next"]
        );
    }

    #[test]
    fn test_split_escaped_whitespace() {
        assert_eq!(tokens("a\\ b c"), vec!["a\\ b", "c"]);
    }

    #[test]
    fn test_split_skips_whitespace_after_colon() {
        assert_eq!(
            tokens("\"key\":   value \"other\": 2"),
            vec!["\"key\":value", "\"other\":2"]
        );
    }

    #[test]
    fn test_colon_inside_quotes_keeps_boundary() {
        assert_eq!(tokens("\"12:\" 30"), vec!["\"12:\"", "30"]);
    }

    #[test]
    fn test_unbalanced_reports_state() {
        let mut iter = split_array_values("{\"a\":1 2");
        assert_eq!(iter.next().as_deref(), Some("{\"a\":1 2"));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.state().brace_depth, 1);
    }

    #[test]
    fn test_find_top_level() {
        assert_eq!(find_top_level("\"key\":value", ':'), Some(5));
        assert_eq!(find_top_level("\"k\\\":ey\":v", ':'), Some(8));
        assert_eq!(find_top_level("[a:b]", ':'), None);
        assert_eq!(find_top_level("", ':'), None);
    }
}
