//! Type-token rendering.
//!
//! Doc dumps store types as a flat token stream (`Array`, `<`, `string`, `>`),
//! with unions flattened away. The scanner below rebuilds `A|B` by looking at
//! the class of the previous token only.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenClass {
    /// Identifier-ish text: `string`, `Snowflake`, `Array`
    Word,
    /// Pure punctuation ending a generic, e.g. `>`
    Close,
    /// Any other token containing `<`, `>` or `*`
    Bracket,
    /// Separators such as `, ` or `(`
    Other,
}

const fn is_markup(c: char) -> bool {
    matches!(c, '<' | '>' | '*')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn classify(token: &str) -> TokenClass {
    let has_word = token.chars().any(is_word_char);
    let has_markup = token.chars().any(is_markup);

    match (has_word, has_markup) {
        (true, false) => TokenClass::Word,
        (false, true) if token.trim_end().ends_with('>') => TokenClass::Close,
        (_, true) => TokenClass::Bracket,
        (false, false) => TokenClass::Other,
    }
}

/// Escape characters that would otherwise be read as Markdown emphasis or HTML.
fn push_escaped(out: &mut String, token: &str) {
    for c in token.chars() {
        if is_markup(c) {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Render a type-token sequence as bold Markdown.
///
/// `link` is asked for every word token and may return a cross-reference to
/// replace it with.
pub fn format_type<F>(tokens: &[String], mut link: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::from("**");
    let mut previous: Option<TokenClass> = None;

    for token in tokens {
        let class = classify(token);

        if class == TokenClass::Word {
            if matches!(previous, Some(TokenClass::Word | TokenClass::Close)) {
                out.push('|');
            }
            match link(token) {
                Some(linked) => out.push_str(&linked),
                None => out.push_str(token),
            }
        } else {
            push_escaped(&mut out, token);
        }

        previous = Some(class);
    }

    out.push_str("**");
    out
}
