//! Splits the free-form `other_options` string into converter arguments.
//!
//! Only paired `"` and `'` quoting is understood. There is no escape character:
//! a quote run can only be closed by the same character that opened it.

const SEPARATOR: char = ' ';

fn is_quote(ch: char) -> bool {
    ch == '"' || ch == '\''
}

/// Tokenize a command line fragment.
///
/// Tokens are separated by unquoted spaces; runs of spaces never yield empty
/// tokens. Quote characters are kept while scanning and a matching outer pair
/// is stripped from each finished token afterwards. An unterminated quote
/// swallows the rest of the input, spaces included.
///
/// # Examples
///
/// ```
/// use esddrop::services::tokenize;
///
/// assert_eq!(tokenize(r#"a "b c" 'd e'"#), vec!["a", "b c", "d e"]);
/// assert_eq!(tokenize(r#""mixed'quote""#), vec!["mixed'quote"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut open_quote: Option<char> = None;

    for ch in text.chars() {
        if is_quote(ch) {
            match open_quote {
                Some(open) if open == ch => open_quote = None,
                None => open_quote = Some(ch),
                Some(_) => {}
            }
        }

        if open_quote.is_none() && ch == SEPARATOR {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens.into_iter().map(unquote).collect()
}

/// Remove one outer pair of identical quote characters.
fn unquote(token: String) -> String {
    let mut chars = token.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if is_quote(first) && first == last => {
            // Both quote characters are one byte wide
            token[1..token.len() - 1].to_string()
        }
        _ => token,
    }
}
