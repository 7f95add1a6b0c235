//! JavaScript syntax highlighting.
//!
//! A single-pass lexer good enough for showcase snippets (including JSX
//! tags). Every byte of the input lands in exactly one token, so joining
//! the token texts reproduces the input.
//!
//! Colors follow the Atom One Dark palette.

use crate::types::{Attr, Rgba};

// =============================================================================
// Tokens
// =============================================================================

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plain,
    Whitespace,
    Keyword,
    /// `true`, `false`, `null`, `undefined`, ...
    Literal,
    /// Well-known globals and `this`.
    BuiltIn,
    String,
    Comment,
    Number,
    /// Declared or called function/class names.
    Title,
    /// Member access after `.`
    Property,
    /// JSX tag opener (`<button`, `</button`)
    Tag,
    /// JSX attribute name
    Attribute,
    Punctuation,
}

/// A slice of the input with its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Editor background the palette is designed for.
pub const BACKGROUND: Rgba = Rgba::from_rgb_int(0x282c34);

impl TokenKind {
    pub const fn color(self) -> Rgba {
        match self {
            TokenKind::Keyword => Rgba::from_rgb_int(0xc678dd),
            TokenKind::Literal => Rgba::from_rgb_int(0x56b6c2),
            TokenKind::BuiltIn => Rgba::from_rgb_int(0xe6c07b),
            TokenKind::String => Rgba::from_rgb_int(0x98c379),
            TokenKind::Comment => Rgba::from_rgb_int(0x5c6370),
            TokenKind::Number | TokenKind::Attribute => Rgba::from_rgb_int(0xd19a66),
            TokenKind::Title => Rgba::from_rgb_int(0x61aeee),
            TokenKind::Tag => Rgba::from_rgb_int(0xe06c75),
            TokenKind::Plain
            | TokenKind::Whitespace
            | TokenKind::Property
            | TokenKind::Punctuation => Rgba::from_rgb_int(0xabb2bf),
        }
    }

    pub const fn attrs(self) -> Attr {
        match self {
            TokenKind::Comment => Attr::ITALIC,
            _ => Attr::NONE,
        }
    }

    /// highlight.js class name, for kinds that get one.
    pub const fn css_class(self) -> Option<&'static str> {
        match self {
            TokenKind::Keyword => Some("hljs-keyword"),
            TokenKind::Literal => Some("hljs-literal"),
            TokenKind::BuiltIn => Some("hljs-built_in"),
            TokenKind::String => Some("hljs-string"),
            TokenKind::Comment => Some("hljs-comment"),
            TokenKind::Number => Some("hljs-number"),
            TokenKind::Title => Some("hljs-title"),
            TokenKind::Property => Some("hljs-property"),
            TokenKind::Tag => Some("hljs-name"),
            TokenKind::Attribute => Some("hljs-attr"),
            TokenKind::Plain | TokenKind::Whitespace | TokenKind::Punctuation => None,
        }
    }
}

// =============================================================================
// Word Lists
// =============================================================================

const KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
    "delete", "do", "else", "export", "extends", "finally", "for", "from", "function", "if",
    "import", "in", "instanceof", "let", "new", "of", "return", "static", "switch", "throw",
    "try", "typeof", "var", "void", "while", "yield",
];

const LITERALS: &[&str] = &["true", "false", "null", "undefined", "NaN", "Infinity"];

const BUILT_INS: &[&str] = &[
    "this", "super", "console", "window", "document", "JSON", "Math", "Promise", "Object",
    "Array", "String", "Number", "Error",
];

/// Keywords after which a word names something being declared or built.
const DECLARING: &[&str] = &["function", "class", "extends", "new"];

/// Punctuation after which `<` starts a JSX tag rather than a comparison.
const TAG_CONTEXT: &[&str] = &["(", "=", ",", "{", "}", ">", ";", ":", "?", "&", "|"];

// =============================================================================
// Lexer
// =============================================================================

/// Split `code` into highlighted tokens.
pub fn highlight_javascript(code: &str) -> Vec<Token<'_>> {
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut prev: Option<Token<'_>> = None;
    let mut in_tag = false;
    let mut tag_braces = 0usize;
    let mut pos = 0;

    while pos < code.len() {
        let rest = &code[pos..];
        let Some(ch) = rest.chars().next() else {
            break;
        };

        let (kind, len) = if ch.is_whitespace() {
            (TokenKind::Whitespace, scan_while(rest, char::is_whitespace))
        } else if rest.starts_with("//") {
            (TokenKind::Comment, rest.find('\n').unwrap_or(rest.len()))
        } else if rest.starts_with("/*") {
            let len = rest[2..].find("*/").map_or(rest.len(), |i| i + 4);
            (TokenKind::Comment, len)
        } else if matches!(ch, '"' | '\'' | '`') {
            (TokenKind::String, scan_string(rest, ch))
        } else if ch.is_ascii_digit() {
            let len = scan_while(rest, |c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
            (TokenKind::Number, len)
        } else if is_ident_start(ch) {
            let len = scan_while(rest, is_ident_continue);
            let next = rest[len..].chars().next();
            let kind = if in_tag && tag_braces == 0 {
                TokenKind::Attribute
            } else {
                classify_word(&rest[..len], prev, next)
            };
            (kind, len)
        } else if ch == '<' && opens_tag(rest, prev) {
            (TokenKind::Tag, tag_len(rest))
        } else {
            (TokenKind::Punctuation, ch.len_utf8())
        };

        let token = Token {
            kind,
            text: &rest[..len],
        };

        match (token.kind, token.text) {
            (TokenKind::Tag, _) => {
                in_tag = true;
                tag_braces = 0;
            }
            (TokenKind::Punctuation, "{") if in_tag => tag_braces += 1,
            (TokenKind::Punctuation, "}") if in_tag => tag_braces = tag_braces.saturating_sub(1),
            (TokenKind::Punctuation, ">") if in_tag && tag_braces == 0 => in_tag = false,
            _ => {}
        }

        if !matches!(token.kind, TokenKind::Whitespace | TokenKind::Comment) {
            prev = Some(token);
        }
        tokens.push(token);
        pos += len;
    }

    tokens
}

fn classify_word(word: &str, prev: Option<Token<'_>>, next: Option<char>) -> TokenKind {
    let after_dot = matches!(prev, Some(Token { kind: TokenKind::Punctuation, text: "." }));
    let declared = matches!(
        prev,
        Some(Token { kind: TokenKind::Keyword, text }) if DECLARING.contains(&text)
    );

    if declared {
        TokenKind::Title
    } else if after_dot {
        if next == Some('(') {
            TokenKind::Title
        } else {
            TokenKind::Property
        }
    } else if LITERALS.contains(&word) {
        TokenKind::Literal
    } else if KEYWORDS.contains(&word) {
        TokenKind::Keyword
    } else if BUILT_INS.contains(&word) {
        TokenKind::BuiltIn
    } else if next == Some('(') {
        TokenKind::Title
    } else {
        TokenKind::Plain
    }
}

fn opens_tag(rest: &str, prev: Option<Token<'_>>) -> bool {
    let mut chars = rest.chars().skip(1);
    let starts_name = match chars.next() {
        Some('/') => chars.next().is_some_and(|c| c.is_ascii_alphabetic()),
        Some(c) => c.is_ascii_alphabetic(),
        None => false,
    };
    if !starts_name {
        return false;
    }

    match prev {
        None => true,
        Some(Token { kind: TokenKind::Keyword, text }) => text == "return",
        Some(Token { kind: TokenKind::Punctuation, text }) => TAG_CONTEXT.contains(&text),
        Some(_) => false,
    }
}

fn tag_len(rest: &str) -> usize {
    let start = if rest.starts_with("</") { 2 } else { 1 };
    start + scan_while(&rest[start..], |c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

fn scan_while(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|(_, c)| !pred(*c))
        .map_or(s.len(), |(i, _)| i)
}

/// Length of a string literal starting at `s[0] == quote`, including both
/// quotes. Single and double quoted strings stop at an unescaped newline.
fn scan_string(s: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '\n' if quote != '`' => return i,
            c if c == quote => return i + c.len_utf8(),
            _ => {}
        }
    }
    s.len()
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::SNIPPETS;

    fn kinds_of<'a>(tokens: &[Token<'a>], kind: TokenKind) -> Vec<&'a str> {
        tokens.iter().filter(|t| t.kind == kind).map(|t| t.text).collect()
    }

    fn kind_of(code: &str, text: &str) -> Option<TokenKind> {
        highlight_javascript(code)
            .into_iter()
            .find(|t| t.text == text)
            .map(|t| t.kind)
    }

    #[test]
    fn test_tokens_cover_input() {
        for snippet in SNIPPETS {
            let joined: String = highlight_javascript(snippet.code)
                .iter()
                .map(|t| t.text)
                .collect();
            assert_eq!(joined, snippet.code, "{}", snippet.title);
        }
    }

    #[test]
    fn test_keywords_and_literals() {
        let tokens = highlight_javascript("const x = null; if (!x) { return true; }");
        assert_eq!(kinds_of(&tokens, TokenKind::Keyword), vec!["const", "if", "return"]);
        assert_eq!(kinds_of(&tokens, TokenKind::Literal), vec!["null", "true"]);
    }

    #[test]
    fn test_strings() {
        let tokens = highlight_javascript(r#"a('it\'s', "q", `multi
line`)"#);
        assert_eq!(
            kinds_of(&tokens, TokenKind::String),
            vec![r"'it\'s'", "\"q\"", "`multi\nline`"]
        );
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        let tokens = highlight_javascript("'open\nnext");
        assert_eq!(tokens[0], Token { kind: TokenKind::String, text: "'open" });
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    }

    #[test]
    fn test_comments() {
        let tokens = highlight_javascript("x // trailing\n/* block */ y");
        assert_eq!(kinds_of(&tokens, TokenKind::Comment), vec!["// trailing", "/* block */"]);
        assert_eq!(tokens[0].kind, TokenKind::Plain);
    }

    #[test]
    fn test_titles_and_properties() {
        let code = "class LinkedList { add(value) { const node = new Node(value); this.size++; res.json(users); } }";
        assert_eq!(kind_of(code, "LinkedList"), Some(TokenKind::Title));
        assert_eq!(kind_of(code, "add"), Some(TokenKind::Title));
        assert_eq!(kind_of(code, "Node"), Some(TokenKind::Title));
        assert_eq!(kind_of(code, "size"), Some(TokenKind::Property));
        assert_eq!(kind_of(code, "json"), Some(TokenKind::Title));
        assert_eq!(kind_of(code, "this"), Some(TokenKind::BuiltIn));
    }

    #[test]
    fn test_numbers() {
        let tokens = highlight_javascript("limit(10); status(500); x = 0.5;");
        assert_eq!(kinds_of(&tokens, TokenKind::Number), vec!["10", "500", "0.5"]);
    }

    #[test]
    fn test_jsx_tags() {
        let tokens = highlight_javascript(SNIPPETS[0].code);
        assert_eq!(kinds_of(&tokens, TokenKind::Tag), vec!["<button", "</button"]);
        assert_eq!(kinds_of(&tokens, TokenKind::Attribute), vec!["onClick", "className"]);
        // Words inside `{...}` in a tag are not attributes
        assert!(kinds_of(&tokens, TokenKind::Plain).contains(&"children"));
    }

    #[test]
    fn test_less_than_is_not_tag() {
        let tokens = highlight_javascript("if (a <b) {}");
        assert!(kinds_of(&tokens, TokenKind::Tag).is_empty());
    }

    #[test]
    fn test_palette() {
        assert_eq!(TokenKind::Keyword.color(), Rgba::from_rgb_int(0xc678dd));
        assert_eq!(TokenKind::Comment.attrs(), Attr::ITALIC);
        assert_eq!(TokenKind::Punctuation.css_class(), None);
        assert_eq!(TokenKind::String.css_class(), Some("hljs-string"));
    }
}
