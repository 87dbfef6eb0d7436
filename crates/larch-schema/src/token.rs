//! Token vocabulary of the Larch type grammar.
//!
//! [`TokenKind`] is the closed set of lexical categories the schema may
//! reference; [`TokenChoice`] is a single acceptable alternative for a
//! token-shaped child slot, either a bare category or a category with a
//! required spelling.

use std::fmt;

use serde::Serialize;

/// Every lexical category the type-grammar schema can reference.
///
/// This is the complete vocabulary for token-shaped child slots. It covers
/// the word-like categories (identifiers, keywords, the `_` wildcard), the
/// punctuation the type grammar uses, and the four delimiter pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // ── Word-like categories ───────────────────────────────────────────
    Identifier,
    Keyword,
    /// The `_` placeholder.
    Wildcard,

    // ── Punctuation ────────────────────────────────────────────────────
    /// `.`
    Period,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `=`
    Equal,
    /// `->`
    Arrow,
    /// `@`
    AtSign,
    /// `&`
    Ampersand,
    /// `...`
    Ellipsis,
    /// `inout` in parameter position.
    Inout,
    /// `?` attached to the preceding type.
    PostfixQuestionMark,
    /// `!` attached to the preceding type.
    ExclamationMark,

    // ── Delimiters ─────────────────────────────────────────────────────
    LeftParen,
    RightParen,
    LeftSquareBracket,
    RightSquareBracket,
    LeftAngle,
    RightAngle,
    LeftBrace,
    RightBrace,
}

impl TokenKind {
    /// Whether this category can carry a required literal spelling.
    ///
    /// Only the reserved-word category is spellable: `Keyword` covers
    /// contextual keywords such as `some`, `any`, `repeat`, and `each`,
    /// which are distinguished purely by text.
    pub fn admits_text(self) -> bool {
        matches!(self, TokenKind::Keyword)
    }

    /// Whether this kind opens a delimiter pair.
    pub fn is_open_delimiter(self) -> bool {
        matches!(
            self,
            TokenKind::LeftParen
                | TokenKind::LeftSquareBracket
                | TokenKind::LeftAngle
                | TokenKind::LeftBrace
        )
    }

    /// The closing kind matching this opening delimiter, if any.
    pub fn matching_close(self) -> Option<TokenKind> {
        match self {
            TokenKind::LeftParen => Some(TokenKind::RightParen),
            TokenKind::LeftSquareBracket => Some(TokenKind::RightSquareBracket),
            TokenKind::LeftAngle => Some(TokenKind::RightAngle),
            TokenKind::LeftBrace => Some(TokenKind::RightBrace),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Wildcard => "wildcard",
            TokenKind::Period => "`.`",
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::Equal => "`=`",
            TokenKind::Arrow => "`->`",
            TokenKind::AtSign => "`@`",
            TokenKind::Ampersand => "`&`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::Inout => "`inout`",
            TokenKind::PostfixQuestionMark => "`?`",
            TokenKind::ExclamationMark => "`!`",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::LeftSquareBracket => "`[`",
            TokenKind::RightSquareBracket => "`]`",
            TokenKind::LeftAngle => "`<`",
            TokenKind::RightAngle => "`>`",
            TokenKind::LeftBrace => "`{`",
            TokenKind::RightBrace => "`}`",
        };
        f.write_str(name)
    }
}

/// One acceptable alternative for a token-shaped child slot.
///
/// Either a bare lexical category (any spelling of that category is
/// accepted) or a category with a required spelling, e.g. the keyword
/// `class`. Represented as a tagged pair rather than a string so the
/// validation engine can check category/spelling compatibility
/// exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenChoice {
    kind: TokenKind,
    text: Option<String>,
}

impl TokenChoice {
    /// A bare category: any token of `kind` satisfies the slot.
    pub fn bare(kind: TokenKind) -> Self {
        Self { kind, text: None }
    }

    /// A category with a required spelling.
    pub fn spelled(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: Some(text.into()),
        }
    }

    /// Shorthand for the common case of a spelled keyword.
    pub fn keyword(text: impl Into<String>) -> Self {
        Self::spelled(TokenKind::Keyword, text)
    }

    /// The lexical category of this alternative.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The required spelling, if this alternative demands one.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whether a token of `kind` with spelling `text` satisfies this
    /// alternative. A bare alternative ignores the spelling; a spelled
    /// alternative requires an exact match.
    pub fn accepts(&self, kind: TokenKind, text: Option<&str>) -> bool {
        if self.kind != kind {
            return false;
        }
        match self.text.as_deref() {
            None => true,
            Some(required) => text == Some(required),
        }
    }
}

impl fmt::Display for TokenChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text.as_deref() {
            None => write!(f, "{}", self.kind),
            Some(text) => write!(f, "{} `{}`", self.kind, text),
        }
    }
}
