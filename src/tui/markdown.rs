use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

fn flush(lines: &mut Vec<Line<'static>>, spans: &mut Vec<Span<'static>>) {
    if !spans.is_empty() {
        lines.push(Line::from(std::mem::take(spans)));
    }
}

/// Render an answer's light markdown (bold, italics, code, lists, line breaks)
/// as styled ratatui lines
pub fn parse_markdown(input: &str, base: Style) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(input, options);
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut style_stack = vec![base];
    let mut in_code_block = false;
    let mut list_depth: usize = 0;

    for event in parser {
        let current = *style_stack.last().unwrap_or(&base);
        match event {
            Event::Start(tag) => {
                let new_style = match tag {
                    Tag::Heading { .. } => {
                        flush(&mut lines, &mut spans);
                        current.add_modifier(Modifier::BOLD)
                    }
                    Tag::Emphasis => current.add_modifier(Modifier::ITALIC),
                    Tag::Strong => current.add_modifier(Modifier::BOLD),
                    Tag::Strikethrough => current.add_modifier(Modifier::CROSSED_OUT),
                    Tag::CodeBlock(_) => {
                        flush(&mut lines, &mut spans);
                        in_code_block = true;
                        Style::default().fg(Color::Gray)
                    }
                    Tag::List(_) => {
                        flush(&mut lines, &mut spans);
                        list_depth += 1;
                        current
                    }
                    Tag::Item => {
                        let indent = "  ".repeat(list_depth.saturating_sub(1));
                        spans.push(Span::raw(indent));
                        spans.push(Span::styled("• ", Style::default().fg(Color::Yellow)));
                        current
                    }
                    _ => current,
                };
                style_stack.push(new_style);
            }
            Event::End(tag) => {
                style_stack.pop();
                match tag {
                    TagEnd::Paragraph => {
                        flush(&mut lines, &mut spans);
                        if list_depth == 0 {
                            lines.push(Line::default());
                        }
                    }
                    TagEnd::Heading(_) | TagEnd::Item => flush(&mut lines, &mut spans),
                    TagEnd::CodeBlock => in_code_block = false,
                    TagEnd::List(_) => list_depth = list_depth.saturating_sub(1),
                    _ => {}
                }
            }
            Event::Text(text) => {
                if in_code_block {
                    for line in text.lines() {
                        lines.push(Line::from(Span::styled(line.to_string(), current)));
                    }
                } else {
                    spans.push(Span::styled(text.to_string(), current));
                }
            }
            Event::Code(code) => {
                let style = Style::default().fg(Color::Yellow).bg(Color::Rgb(40, 40, 40));
                spans.push(Span::styled(code.to_string(), style));
            }
            Event::SoftBreak | Event::HardBreak => flush(&mut lines, &mut spans),
            _ => {}
        }
    }

    flush(&mut lines, &mut spans);

    // No trailing blank line after the last paragraph
    while lines.last().is_some_and(|l| l.spans.is_empty()) {
        lines.pop();
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_bold_and_italic() {
        let lines = parse_markdown("This is **key** and *soft*.", Style::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(text_of(&lines[0]), "This is key and soft.");

        let bold = lines[0].spans.iter().find(|s| s.content == "key").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        let italic = lines[0].spans.iter().find(|s| s.content == "soft").unwrap();
        assert!(italic.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_newlines_become_line_breaks() {
        let lines = parse_markdown("first\nsecond\n\nthird", Style::default());
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert_eq!(texts, vec!["first", "second", "", "third"]);
    }

    #[test]
    fn test_lists() {
        let lines = parse_markdown("- one\n- two", Style::default());
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert_eq!(texts, vec!["• one", "• two"]);
    }

    #[test]
    fn test_partial_markup_during_typing() {
        // Half-revealed bold markers must still render something sensible
        let lines = parse_markdown("Answer: **imp", Style::default());
        assert_eq!(text_of(&lines[0]), "Answer: **imp");
    }
}
