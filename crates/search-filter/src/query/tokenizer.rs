//! Query tokenizer.

// ---------------------------------------------------------------------------
// Token types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryToken {
    /// A lowercased word or phrase. `quoted` is set when any part of it was
    /// inside double quotes.
    Text { value: String, quoted: bool },
    LParen,
    RParen,
    Plus,
    Minus,
    Or,
    End,
}

impl QueryToken {
    fn control(ch: char) -> Option<Self> {
        match ch {
            '(' => Some(Self::LParen),
            ')' => Some(Self::RParen),
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            _ => None,
        }
    }
}

fn is_query_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n' | '\u{3000}')
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Stateful cursor over a raw query string.
///
/// Each call to [`QueryTokenizer::next_token`] yields one token; once the input
/// is exhausted every further call yields [`QueryToken::End`].
pub struct QueryTokenizer<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> QueryTokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, cursor: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.cursor..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.cursor += ch.len_utf8();
        Some(ch)
    }

    pub fn next_token(&mut self) -> QueryToken {
        let mut word = String::new();
        let mut quoted = false;
        let mut in_quotes = false;

        while let Some(ch) = self.peek_char() {
            if in_quotes {
                self.bump();
                match ch {
                    '"' => return QueryToken::Text { value: word, quoted },
                    '\\' => match self.bump() {
                        Some(escaped) => push_folded(&mut word, escaped),
                        None => break,
                    },
                    _ => push_folded(&mut word, ch),
                }
                continue;
            }

            if is_query_whitespace(ch) {
                self.bump();
                if !word.is_empty() {
                    break;
                }
                continue;
            }

            if let Some(control) = QueryToken::control(ch) {
                if !word.is_empty() {
                    // re-offered on the next call
                    break;
                }
                self.bump();
                return control;
            }

            self.bump();
            match ch {
                '"' => {
                    in_quotes = true;
                    quoted = true;
                }
                '\\' => match self.bump() {
                    Some(escaped) => push_folded(&mut word, escaped),
                    None => break,
                },
                _ => push_folded(&mut word, ch),
            }
        }

        if word.is_empty() && !quoted {
            return QueryToken::End;
        }
        if !quoted && word == "or" {
            return QueryToken::Or;
        }
        QueryToken::Text {
            value: word,
            quoted,
        }
    }
}

impl Iterator for QueryTokenizer<'_> {
    type Item = QueryToken;

    fn next(&mut self) -> Option<QueryToken> {
        match self.next_token() {
            QueryToken::End => None,
            token => Some(token),
        }
    }
}

fn push_folded(word: &mut String, ch: char) {
    word.extend(ch.to_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> QueryToken {
        QueryToken::Text {
            value: s.to_string(),
            quoted: false,
        }
    }

    fn phrase(s: &str) -> QueryToken {
        QueryToken::Text {
            value: s.to_string(),
            quoted: true,
        }
    }

    fn tokens(input: &str) -> Vec<QueryToken> {
        QueryTokenizer::new(input).collect()
    }

    #[test]
    fn empty_and_blank_input_end_immediately() {
        assert!(tokens("").is_empty());
        assert!(tokens(" \t\r\n\u{3000}").is_empty());
        let mut tokenizer = QueryTokenizer::new("   ");
        assert_eq!(tokenizer.next_token(), QueryToken::End);
        assert_eq!(tokenizer.next_token(), QueryToken::End);
    }

    #[test]
    fn words_are_lowercased_and_split_on_whitespace() {
        assert_eq!(tokens("Foo  BAR\u{3000}baz"), vec![text("foo"), text("bar"), text("baz")]);
    }

    #[test]
    fn unicode_is_lowercased() {
        assert_eq!(tokens("ÄÖÜ Σ"), vec![text("äöü"), text("σ")]);
    }

    #[test]
    fn control_characters_terminate_words() {
        assert_eq!(
            tokens("a(b)c+d-e"),
            vec![
                text("a"),
                QueryToken::LParen,
                text("b"),
                QueryToken::RParen,
                text("c"),
                QueryToken::Plus,
                text("d"),
                QueryToken::Minus,
                text("e"),
            ]
        );
    }

    #[test]
    fn or_keyword_is_case_insensitive() {
        assert_eq!(tokens("a OR b"), vec![text("a"), QueryToken::Or, text("b")]);
        assert_eq!(tokens("a oR b"), vec![text("a"), QueryToken::Or, text("b")]);
        assert_eq!(tokens("order"), vec![text("order")]);
    }

    #[test]
    fn quoted_phrase_keeps_whitespace_and_controls() {
        assert_eq!(tokens("\"Foo (bar) -baz\""), vec![phrase("foo (bar) -baz")]);
    }

    #[test]
    fn quoted_or_is_text() {
        assert_eq!(tokens("\"or\""), vec![phrase("or")]);
        assert_eq!(tokens("\"OR\""), vec![phrase("or")]);
    }

    #[test]
    fn unclosed_quote_runs_to_end() {
        assert_eq!(tokens("a \"b c"), vec![text("a"), phrase("b c")]);
    }

    #[test]
    fn empty_quotes_yield_empty_text() {
        assert_eq!(tokens("\"\" a"), vec![phrase(""), text("a")]);
    }

    #[test]
    fn quote_inside_word_continues_word() {
        assert_eq!(tokens("foo\"bar baz\"qux"), vec![phrase("foobar baz"), text("qux")]);
    }

    #[test]
    fn backslash_escapes_next_character() {
        assert_eq!(tokens("foo\\ bar"), vec![text("foo bar")]);
        assert_eq!(tokens("\\-a"), vec![text("-a")]);
        assert_eq!(tokens("a\\(b\\)"), vec![text("a(b)")]);
        assert_eq!(tokens("a\\\\b"), vec![text("a\\b")]);
        assert_eq!(tokens("\\\"a"), vec![text("\"a")]);
    }

    #[test]
    fn backslash_escapes_inside_quotes() {
        assert_eq!(tokens("\"say \\\"hi\\\"\""), vec![phrase("say \"hi\"")]);
    }

    #[test]
    fn trailing_backslash_ends_token() {
        assert_eq!(tokens("abc\\"), vec![text("abc")]);
        assert!(tokens("\\").is_empty());
        assert_eq!(tokens("\"abc\\"), vec![phrase("abc")]);
    }
}
