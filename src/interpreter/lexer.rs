use logos::Logos;

/// A location in the source text, with 1-based line and column numbers.
///
/// Every token carries its position so that parse errors can point at the
/// offending piece of source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// The 1-based source line.
    pub line:   usize,
    /// The 1-based column of the token's first byte on that line.
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Represents a lexical token in comet source code.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// Integer literal tokens, such as `42`. The digits are kept as text and
    /// converted by the parser, so that a malformed literal becomes a
    /// recoverable parse error instead of a lexing failure.
    #[regex(r"[0-9]+", |lex| lex.slice().to_owned())]
    Number(String),
    /// String literal tokens. The quotes are stripped; no escape sequences
    /// are interpreted. A literal cannot span lines.
    #[regex(r#""[^"\n\r]*""#, |lex| { let s = lex.slice(); s[1..s.len() - 1].to_owned() })]
    Str(String),
    /// Identifier tokens; variable, function or type names such as `x` or
    /// `fib`. ASCII letters, digits and underscores only.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_owned())]
    Identifier(String),

    /// `func`
    #[token("func")]
    Func,
    /// `new`
    #[token("new")]
    New,
    /// `struct`
    #[token("struct")]
    Struct,
    /// `return`
    #[token("return")]
    Return,
    /// `var`
    #[token("var")]
    Var,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `in`
    #[token("in")]
    In,

    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Mul,
    /// `/`
    #[token("/")]
    Div,
    /// `!`
    #[token("!")]
    Bang,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `=`
    #[token("=")]
    Assign,
    /// `==`
    #[token("==")]
    Equal,
    /// `!=`
    #[token("!=")]
    NotEqual,

    /// `>>` (lexed, no evaluation semantics yet)
    #[token(">>")]
    ShiftRight,
    /// `<<` (lexed, no evaluation semantics yet)
    #[token("<<")]
    ShiftLeft,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `^`
    #[token("^")]
    Caret,
    /// `~`
    #[token("~")]
    Tilde,
    /// `&&`
    #[token("&&")]
    AmpAmp,
    /// `||`
    #[token("||")]
    PipePipe,

    /// `(`
    #[token("(")]
    OpenParen,
    /// `)`
    #[token(")")]
    CloseParen,
    /// `[`
    #[token("[")]
    OpenBracket,
    /// `]`
    #[token("]")]
    CloseBracket,
    /// `{`
    #[token("{")]
    OpenBrace,
    /// `}`
    #[token("}")]
    CloseBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `..`
    #[token("..")]
    DotDot,
    /// `;`
    #[token(";")]
    Semicolon,

    /// End of input. Never produced by a pattern match on real source; the
    /// tokenizer appends it after the input is exhausted and the parser
    /// relies on it as a sentinel.
    #[token("\0")]
    Eof,

    /// Line breaks. Skipped, but the callback keeps the line counter and the
    /// start-of-line offset up to date for position reporting.
    #[regex(r"\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    Newline,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset of the current line's
/// first character, from which token columns are computed.
#[derive(Default)]
pub struct LexerExtras {
    /// The current 1-based line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset at which the current line starts.
    pub line_start: usize,
}

impl Token {
    /// Returns a short, stable name for this token's kind, used when a parse
    /// error reports which kind of token was expected.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "Number",
            Self::Str(_) => "String",
            Self::Identifier(_) => "Identifier",
            Self::Func => "func",
            Self::New => "new",
            Self::Struct => "struct",
            Self::Return => "return",
            Self::Var => "var",
            Self::True => "true",
            Self::False => "false",
            Self::If => "if",
            Self::Else => "else",
            Self::For => "for",
            Self::In => "in",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Bang => "!",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Assign => "=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::ShiftRight => ">>",
            Self::ShiftLeft => "<<",
            Self::Ampersand => "&",
            Self::Pipe => "|",
            Self::Caret => "^",
            Self::Tilde => "~",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::OpenBracket => "[",
            Self::CloseBracket => "]",
            Self::OpenBrace => "{",
            Self::CloseBrace => "}",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::DotDot => "..",
            Self::Semicolon => ";",
            Self::Eof => "EOF",
            Self::Newline => "newline",
        }
    }
}

impl std::fmt::Display for Token {
    /// Renders the token as its source literal. Literal classes print their
    /// carried text, which is what error messages quote back at the user.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(digits) => write!(f, "{digits}"),
            Self::Str(text) => write!(f, "{text}"),
            Self::Identifier(name) => write!(f, "{name}"),
            other => write!(f, "{}", other.kind_name()),
        }
    }
}

/// A lexical failure, surfaced to the caller so that it can be recorded in
/// the parser's error bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    /// A string literal was opened but the line or the input ended before the
    /// closing quote.
    UnterminatedString {
        /// Where the opening quote sits.
        position: Position,
    },
    /// A byte that no token pattern recognizes.
    UnrecognizedCharacter {
        /// The offending text.
        found:    String,
        /// Where it sits.
        position: Position,
    },
}

/// Tokenizes the complete source text.
///
/// The returned token list always ends with a single [`Token::Eof`] entry, so
/// a parser can keep two tokens of lookahead without bounds checks. Lexical
/// failures do not abort tokenization; they are collected and returned
/// alongside whatever tokens could still be recognized.
///
/// # Parameters
/// - `source`: The full program text.
///
/// # Returns
/// The `(token, position)` pairs in source order, and any lexical errors.
///
/// # Example
/// ```
/// use comet::interpreter::lexer::{Token, tokenize};
///
/// let (tokens, errors) = tokenize("var a = 1");
///
/// assert!(errors.is_empty());
/// assert_eq!(tokens[0].0, Token::Var);
/// assert_eq!(tokens[1].0, Token::Identifier("a".to_string()));
/// assert_eq!(tokens[4].0, Token::Eof);
/// assert_eq!(tokens[3].1.column, 9);
/// ```
#[must_use]
pub fn tokenize(source: &str) -> (Vec<(Token, Position)>, Vec<LexicalError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = Token::lexer_with_extras(source,
                                             LexerExtras { line:       1,
                                                           line_start: 0, });

    while let Some(token) = lexer.next() {
        let position = Position { line:   lexer.extras.line,
                                  column: lexer.span().start - lexer.extras.line_start + 1, };
        match token {
            Ok(token) => tokens.push((token, position)),
            Err(()) => {
                let slice = lexer.slice();
                if slice.starts_with('"') {
                    errors.push(LexicalError::UnterminatedString { position });
                } else {
                    errors.push(LexicalError::UnrecognizedCharacter { found: slice.to_string(),
                                                                      position });
                }
            },
        }
    }

    let end = Position { line:   lexer.extras.line,
                         column: source.len() - lexer.extras.line_start + 1, };
    tokens.push((Token::Eof, end));

    (tokens, errors)
}
