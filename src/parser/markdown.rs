// file: src/parser/markdown.rs
// description: markdown to plain text conversion with pulldown-cmark
// reference: https://docs.rs/pulldown-cmark

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

pub struct MarkdownParser;

#[derive(Debug, Clone)]
pub struct ParsedMarkdown {
    pub plain_text: String,
    pub headings: Vec<Heading>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: u32,
    pub text: String,
}

impl ParsedMarkdown {
    /// Text of the first top-most heading, if any.
    pub fn title(&self) -> Option<&str> {
        let top = self.headings.iter().map(|h| h.level).min()?;
        self.headings
            .iter()
            .find(|h| h.level == top && !h.text.is_empty())
            .map(|h| h.text.as_str())
    }
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self
    }

    /// Markup is dropped; block boundaries become newlines so words from
    /// adjacent blocks never merge. Code is kept as text.
    pub fn parse(&self, content: &str) -> ParsedMarkdown {
        let parser = Parser::new(content);

        let mut plain_text = String::new();
        let mut headings = Vec::new();
        let mut current_heading: Option<(u32, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    current_heading = Some((level as u32, String::new()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, text)) = current_heading.take() {
                        headings.push(Heading {
                            level,
                            text: text.trim().to_string(),
                        });
                    }
                    plain_text.push('\n');
                }
                Event::End(
                    TagEnd::Paragraph | TagEnd::Item | TagEnd::CodeBlock | TagEnd::TableCell,
                ) => {
                    plain_text.push('\n');
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some((_, ref mut heading_text)) = current_heading {
                        heading_text.push_str(&text);
                    }
                    plain_text.push_str(&text);
                }
                Event::SoftBreak | Event::HardBreak => {
                    plain_text.push('\n');
                }
                _ => {}
            }
        }

        ParsedMarkdown {
            plain_text: plain_text.trim().to_string(),
            headings,
        }
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_parsing() {
        let parser = MarkdownParser::new();
        let parsed = parser.parse("# Title\n\nSome *emphasised* content here.");

        assert_eq!(parsed.headings.len(), 1);
        assert_eq!(parsed.headings[0].text, "Title");
        assert_eq!(parsed.plain_text, "Title\nSome emphasised content here.");
    }

    #[test]
    fn test_blocks_do_not_merge_words() {
        let parser = MarkdownParser::new();
        let parsed = parser.parse("- first\n- second\n\nlast");
        let words: Vec<&str> = parsed.plain_text.split_whitespace().collect();
        assert_eq!(words, vec!["first", "second", "last"]);
    }

    #[test]
    fn test_code_and_links_keep_their_text() {
        let parser = MarkdownParser::new();
        let parsed = parser.parse("See [the notes](https://example.com) and `fork()`.");
        assert!(parsed.plain_text.contains("the notes"));
        assert!(parsed.plain_text.contains("fork()"));
        assert!(!parsed.plain_text.contains("https://"));
    }

    #[test]
    fn test_title_prefers_top_level_heading() {
        let parser = MarkdownParser::new();
        let parsed = parser.parse("## Intro\n\ntext\n\n# Virtual Memory\n\nmore");
        assert_eq!(parsed.title(), Some("Virtual Memory"));

        assert_eq!(parser.parse("no headings").title(), None);
    }
}
