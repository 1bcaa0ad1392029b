use std::fmt::Display;

/// Tokens of an element line such as `%al:ex#main.wide title="x" Hello`.
///
/// Only the head, shorthands and attributes are tokenized. Everything from
/// the first token that is not an attribute to the end of the line is a
/// single [`Token::Text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
	/// `%name` or a bare element name, e.g. `p`
	Element(String),
	/// `.name`
	Class(String),
	/// `#name`
	Id(String),
	/// `name=value`, `name="value"` or `name='value'`
	Attribute {
		name: String,
		value: String,
		/// The quote character used in the source, if any.
		quote: Option<u8>,
	},
	/// Inline text content, e.g. `Hello there`
	Text(String),
}

impl Token {
	/// Whether this token belongs to the head of the line (name and
	/// shorthands).
	pub fn is_head(&self) -> bool {
		matches!(self, Token::Element(_) | Token::Class(_) | Token::Id(_))
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Token::Element(name) => write!(f, "%{name}"),
			Token::Class(name) => write!(f, ".{name}"),
			Token::Id(name) => write!(f, "#{name}"),
			Token::Attribute {
				name,
				value,
				quote: Some(quote),
			} => {
				let quote = *quote as char;
				write!(f, "{name}={quote}{value}{quote}")
			}
			Token::Attribute {
				name,
				value,
				quote: None,
			} => write!(f, "{name}={value}"),
			Token::Text(text) => write!(f, "{text}"),
		}
	}
}
