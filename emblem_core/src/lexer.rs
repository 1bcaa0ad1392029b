use logos::Logos;

use crate::tokens::Token;

/// Raw tokens produced by logos for flat tokenization of an element line.
///
/// Quoted strings have no escape sequences: a backslash is an ordinary
/// character, so there is no state in which the lexer can stall on one.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	#[regex(r"%[A-Za-z][A-Za-z0-9_:\-]*")]
	ExplicitName,
	#[regex(r"[A-Za-z_][A-Za-z0-9_:\-]*")]
	Word,
	#[regex(r"\.[A-Za-z0-9_\-]+")]
	Class,
	#[regex(r"#[A-Za-z0-9_\-]+")]
	Id,
	#[token("=")]
	Equals,
	#[regex(r#""[^"]*""#)]
	DoubleQuotedString,
	#[regex(r"'[^']*'")]
	SingleQuotedString,
	#[regex(r"[ \t]+")]
	Whitespace,
}

/// Context states for the state machine that drives context-dependent token
/// processing. A line only ever moves forward through these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexerContext {
	/// Reading the element name and its `.class` / `#id` shorthands.
	Head,
	/// Reading `key=value` pairs.
	Attributes,
	/// Everything that remains is inline text.
	Text,
}

/// Walks the logos token stream with context-dependent rules, building
/// [`Token`]s for a single element line.
struct TokenWalker<'a> {
	/// The trimmed content of the line.
	source: &'a str,
	/// The collected raw tokens and their byte spans.
	raw_tokens: Vec<(Result<RawToken, ()>, std::ops::Range<usize>)>,
	/// Current index into `raw_tokens`.
	cursor: usize,
	context: LexerContext,
	tokens: Vec<Token>,
}

impl<'a> TokenWalker<'a> {
	fn new(source: &'a str) -> Self {
		let raw_tokens: Vec<_> = RawToken::lexer(source).spanned().collect();

		Self {
			source,
			raw_tokens,
			cursor: 0,
			context: LexerContext::Head,
			tokens: vec![],
		}
	}

	/// Get the text slice for the current raw token.
	fn current_slice(&self) -> &'a str {
		let (_, span) = &self.raw_tokens[self.cursor];
		&self.source[span.clone()]
	}

	fn peek(&self, offset: usize) -> Option<&RawToken> {
		self.raw_tokens
			.get(self.cursor + offset)
			.and_then(|(result, _)| result.as_ref().ok())
	}

	fn push_token(&mut self, token: Token) {
		self.tokens.push(token);
		self.cursor += 1;
	}

	/// Treat the rest of the line, starting at the current raw token, as
	/// inline text and stop walking.
	fn enter_text(&mut self) {
		let (_, span) = &self.raw_tokens[self.cursor];
		let text = &self.source[span.start..];
		if !text.is_empty() {
			self.tokens.push(Token::Text(text.to_string()));
		}

		self.context = LexerContext::Text;
		self.cursor = self.raw_tokens.len();
	}

	/// Process `name=value` starting at the current `Word` token. The caller
	/// has already checked that an `Equals` follows.
	fn process_attribute(&mut self) {
		let name = self.current_slice().to_string();
		let value_start = self.raw_tokens[self.cursor + 1].1.end;
		self.cursor += 2;

		match self.peek(0) {
			Some(RawToken::DoubleQuotedString) => {
				let value = strip_quotes(self.current_slice());
				self.push_token(Token::Attribute {
					name,
					value,
					quote: Some(b'"'),
				});
			}
			Some(RawToken::SingleQuotedString) => {
				let value = strip_quotes(self.current_slice());
				self.push_token(Token::Attribute {
					name,
					value,
					quote: Some(b'\''),
				});
			}
			_ => {
				// Unquoted values run up to the next whitespace.
				let rest = &self.source[value_start..];
				let value_end = rest
					.find([' ', '\t'])
					.map_or(self.source.len(), |index| value_start + index);

				while self
					.raw_tokens
					.get(self.cursor)
					.is_some_and(|(_, span)| span.start < value_end)
				{
					self.cursor += 1;
				}

				self.tokens.push(Token::Attribute {
					name,
					value: self.source[value_start..value_end].to_string(),
					quote: None,
				});
			}
		}
	}

	/// Main processing loop: walk the raw token stream with context-dependent
	/// rules.
	fn process(&mut self) {
		while self.cursor < self.raw_tokens.len() {
			let (result, _) = &self.raw_tokens[self.cursor];

			// Unrecognized bytes (including backslashes) end the structured
			// part of the line.
			let Ok(raw) = result else {
				match self.context {
					LexerContext::Head | LexerContext::Attributes => self.enter_text(),
					LexerContext::Text => break,
				}
				continue;
			};

			match self.context {
				LexerContext::Head => {
					match raw {
						RawToken::ExplicitName if self.tokens.is_empty() => {
							let name = self.current_slice()[1..].to_string();
							self.push_token(Token::Element(name));
						}
						RawToken::Word if self.tokens.is_empty() => {
							let name = self.current_slice().to_string();
							self.push_token(Token::Element(name));
						}
						RawToken::Class => {
							let name = self.current_slice()[1..].to_string();
							self.push_token(Token::Class(name));
						}
						RawToken::Id => {
							let name = self.current_slice()[1..].to_string();
							self.push_token(Token::Id(name));
						}
						RawToken::Whitespace => {
							self.context = LexerContext::Attributes;
							self.cursor += 1;
						}
						_ => self.enter_text(),
					}
				}
				LexerContext::Attributes => {
					match raw {
						RawToken::Whitespace => {
							self.cursor += 1;
						}
						RawToken::Word if self.peek(1) == Some(&RawToken::Equals) => {
							self.process_attribute();
						}
						_ => self.enter_text(),
					}
				}
				LexerContext::Text => break,
			}
		}
	}
}

fn strip_quotes(slice: &str) -> String {
	slice[1..slice.len() - 1].to_string()
}

/// Tokenize the trimmed content of an element line.
pub fn tokenize(content: &str) -> Vec<Token> {
	let mut walker = TokenWalker::new(content);
	walker.process();
	walker.tokens
}
