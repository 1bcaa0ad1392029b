//! Line classification: decides what kind of node a line of source creates.

use crate::ast::Attribute;
use crate::ast::Tag;
use crate::html::ElementSet;
use crate::lexer::tokenize;
use crate::tokens::Token;

/// The element name used when a line starts with a `.class` or `#id`
/// shorthand.
pub const IMPLICIT_ELEMENT: &str = "div";

/// The node a single line of source produces before it is attached to the
/// tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(variant_size_differences)]
pub enum LineKind {
	/// `| text`
	Literal(String),
	/// `' text`
	TrailingMarker(String),
	/// `<raw markup>`
	Passthrough(String),
	/// An element, with the inline text that followed its attributes.
	Element { tag: Tag, text: Option<String> },
	/// A mustache helper: a leading word that is not an element name.
	Mustache(Tag),
	/// Anything else.
	Text(String),
}

/// Classify the trimmed content of a line by its leading characters.
pub fn classify(content: &str, elements: &ElementSet) -> LineKind {
	let mut chars = content.chars();
	let Some(first) = chars.next() else {
		return LineKind::Text(String::new());
	};
	let second = chars.next();

	match first {
		'|' => LineKind::Literal(strip_marker(&content[1..])),
		'\'' if matches!(second, None | Some(' ')) => {
			LineKind::TrailingMarker(strip_marker(&content[1..]))
		}
		'<' => LineKind::Passthrough(content.to_string()),
		'%' if second.is_some_and(|c| c.is_ascii_alphabetic()) => classify_element(content),
		'.' | '#' if second.is_some_and(is_shorthand_char) => classify_element(content),
		c if c.is_ascii_alphabetic() || c == '_' => {
			let word_end = content
				.find(|c: char| !is_word_char(c))
				.unwrap_or(content.len());

			if elements.contains(&content[..word_end]) {
				classify_element(content)
			} else {
				classify_mustache(content)
			}
		}
		_ => LineKind::Text(content.to_string()),
	}
}

/// Drop the single separator space that follows a line marker. Any further
/// leading spaces are part of the text.
fn strip_marker(rest: &str) -> String {
	rest.strip_prefix(' ').unwrap_or(rest).to_string()
}

fn is_word_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-')
}

fn is_shorthand_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || matches!(c, '_' | '-')
}

fn classify_mustache(content: &str) -> LineKind {
	let (name, arguments) = content
		.split_once(char::is_whitespace)
		.unwrap_or((content, ""));

	LineKind::Mustache(Tag::mustache(name, arguments.trim()))
}

fn classify_element(content: &str) -> LineKind {
	let mut name = None;
	let mut id = None;
	let mut classes: Vec<String> = vec![];
	let mut attributes = AttributeList::default();
	let mut text = None;

	for token in tokenize(content) {
		match token {
			Token::Element(element) => name = Some(element),
			Token::Class(class) => classes.push(class),
			Token::Id(value) => id = Some(value),
			Token::Attribute { name, value, .. } => {
				match name.as_str() {
					"id" => id = Some(value),
					"class" => classes.push(value),
					_ => attributes.set(name, value),
				}
			}
			Token::Text(value) => text = Some(value),
		}
	}

	let mut tag = Tag::element(name.unwrap_or_else(|| IMPLICIT_ELEMENT.to_string()));

	if let Some(id) = id {
		tag.attributes.push(Attribute::new("id", id));
	}

	if !classes.is_empty() {
		tag.attributes.push(Attribute::new("class", classes.join(" ")));
	}

	tag.attributes.extend(attributes.0);

	LineKind::Element { tag, text }
}

/// Explicit attributes in source order. Setting an existing name replaces its
/// value in place.
#[derive(Default)]
struct AttributeList(Vec<Attribute>);

impl AttributeList {
	fn set(&mut self, name: String, value: String) {
		if let Some(existing) = self.0.iter_mut().find(|attribute| attribute.name == name) {
			existing.value = value;
		} else {
			self.0.push(Attribute { name, value });
		}
	}
}
