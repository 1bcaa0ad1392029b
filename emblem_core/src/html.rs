use std::collections::BTreeSet;

/// Element names that compile to HTML tags. Any other leading word on a line
/// compiles to a mustache expression or block.
pub const HTML_ELEMENTS: &[&str] = &[
	"a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
	"blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col", "colgroup",
	"command", "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt", "em",
	"embed", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
	"h6", "head", "header", "hgroup", "hr", "html", "i", "iframe", "img", "input", "ins", "kbd",
	"keygen", "label", "legend", "li", "link", "main", "map", "mark", "math", "menu", "meta",
	"meter", "nav", "noscript", "object", "ol", "optgroup", "option", "output", "p", "param",
	"picture", "pre", "progress", "q", "rp", "rt", "ruby", "s", "samp", "script", "section",
	"select", "small", "source", "span", "strong", "style", "sub", "summary", "sup", "svg",
	"table", "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "time", "title", "tr",
	"track", "u", "ul", "var", "video", "wbr",
];

/// The set of words recognized as element names: the built-in HTML elements
/// plus any extra names configured under `[compile] elements`.
///
/// Matching is ASCII case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct ElementSet {
	extra: BTreeSet<String>,
}

impl ElementSet {
	pub fn new<I, S>(extra: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self {
			extra: extra
				.into_iter()
				.map(|name| name.as_ref().to_ascii_lowercase())
				.collect(),
		}
	}

	pub fn contains(&self, word: &str) -> bool {
		let word = word.to_ascii_lowercase();
		HTML_ELEMENTS.contains(&word.as_str()) || self.extra.contains(&word)
	}
}
