use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::app::{App, AppState};
use super::markdown::parse_markdown;
use crate::constants::EMPTY_MESSAGE_WARNING;
use crate::session::{Message, Sender};

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let input_lines = app.view.input.split('\n').count().clamp(1, 6) as u16;
    let warning_height = if app.view.show_empty_warning { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),               // Header
            Constraint::Min(8),                  // Main content
            Constraint::Length(warning_height),  // Inline warning
            Constraint::Length(input_lines + 2), // Input
            Constraint::Length(1),               // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[1]);

    render_sidebar(frame, content_chunks[0], app);
    render_chat(frame, content_chunks[1], app);

    if app.view.show_empty_warning {
        let warning = Paragraph::new(Line::from(vec![
            Span::styled("⚠ ", Style::default().fg(Color::Yellow)),
            Span::styled(EMPTY_MESSAGE_WARNING, Style::default().fg(Color::Yellow)),
        ]));
        frame.render_widget(warning, chunks[2]);
    }

    render_input(frame, chunks[3], app);
    render_status_bar(frame, chunks[4], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let session = app
        .controller
        .identity()
        .map(|i| i.uid.clone())
        .unwrap_or_else(|| "no session".to_string());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Prajna",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(app.view.phase.display_name(), Style::default().fg(Color::Green)),
        Span::raw(" | "),
        Span::styled(session, Style::default().fg(Color::Gray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

/// Upload status and recommended questions
fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let (label, detail) = if app.uploading {
        ("Uploading...", "")
    } else if app.view.documents_ingested {
        ("PDF Files Uploaded", "The PDF has been uploaded")
    } else {
        ("Upload PDF files", ":upload <file.pdf> ...")
    };
    let upload = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("⇪ {}", label),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(detail, Style::default().fg(Color::Gray))),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Documents "));
    frame.render_widget(upload, chunks[0]);

    let focused = app.state == AppState::Questions;
    let items: Vec<ListItem> = app
        .view
        .suggestions
        .iter()
        .map(|q| ListItem::new(Line::from(format!("{}. {}", q.id + 1, q.text))))
        .collect();

    let border = if focused { Color::Cyan } else { Color::DarkGray };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Recommended Questions "),
        )
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .highlight_symbol("› ");

    let mut state = ListState::default();
    if focused && !app.view.suggestions.is_empty() {
        state.select(Some(app.selected_question));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

/// Lines for one message, honoring the typing animation
fn message_lines(app: &App, index: usize, msg: &Message) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let role_style = match msg.sender() {
        Sender::User => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        Sender::Bot => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    };
    lines.push(Line::from(vec![
        Span::styled(format!("[{}]", msg.sender().label()), role_style),
        Span::styled(
            format!(" {}", msg.timestamp().format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    match msg.sender() {
        Sender::User => {
            for line in msg.text().split('\n') {
                lines.push(Line::from(line.to_string()));
            }
        }
        Sender::Bot => {
            let typing = app.typing.as_ref().filter(|t| t.message_index() == index);
            let text = typing.map(|t| t.visible(msg.text())).unwrap_or(msg.text());
            lines.extend(parse_markdown(text, Style::default()));

            if typing.is_none() && app.ui_config.show_citations && !msg.citations().is_empty() {
                lines.push(Line::from(Span::styled(
                    "Citations:",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
                for citation in msg.citations() {
                    lines.push(Line::from(Span::styled(
                        format!("  • {}", citation),
                        Style::default().fg(Color::Gray),
                    )));
                }
            }
        }
    }

    lines.push(Line::default());
    lines
}

fn render_chat(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    for (index, msg) in app.view.messages.iter().enumerate() {
        lines.extend(message_lines(app, index, msg));
    }

    if app.view.turn_in_flight {
        lines.push(Line::from(Span::styled(
            "Prajna is thinking...",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Upload PDFs, then ask a question or pick a recommended one.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let chat = Paragraph::new(lines).wrap(Wrap { trim: false });

    // Stick to the bottom unless the user scrolled up; count rows after wrapping
    let inner_width = area.width.saturating_sub(2);
    let viewport = area.height.saturating_sub(2);
    let total = u16::try_from(chat.line_count(inner_width)).unwrap_or(u16::MAX);
    let max_scroll = total.saturating_sub(viewport);
    let scroll = max_scroll.saturating_sub(app.scroll_offset.min(max_scroll));

    let chat = chat
        .block(Block::default().borders(Borders::ALL).title(" Chat "))
        .scroll((scroll, 0));

    frame.render_widget(chat, area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let (title, text, style) = match app.state {
        AppState::Command => (
            " Command ".to_string(),
            format!(":{}", app.command_input),
            Style::default().fg(Color::Yellow),
        ),
        AppState::Insert => (
            " Message (Enter send, Alt+Enter newline) ".to_string(),
            app.view.input.clone(),
            Style::default().fg(Color::Cyan),
        ),
        _ => (
            " Message ".to_string(),
            app.view.input.clone(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let input = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(style).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(input, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode = match app.state {
        AppState::Normal => "NORMAL",
        AppState::Insert => "INSERT",
        AppState::Questions => "QUESTIONS",
        AppState::Command => "COMMAND",
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", mode),
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )];
    match &app.status_message {
        Some(status) => spans.push(Span::raw(format!(" {}", status))),
        None => spans.push(Span::styled(
            " Tab questions | :help | Ctrl+C quit",
            Style::default().fg(Color::DarkGray),
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::UiConfig;
    use crate::models::MockQaService;
    use crate::session::{Citation, SessionController};
    use crate::tui::typing::TypingAnimation;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn app() -> App {
        let controller = Arc::new(SessionController::new(Arc::new(MockQaService::new()), None));
        App::new(controller, UiConfig::default())
    }

    fn header(msg: &Message) -> String {
        format!("[{}] {}", msg.sender().label(), msg.timestamp().format("%H:%M"))
    }

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render_ui(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn long_answer_app() -> App {
        let mut app = app();
        let mut answer = "word ".repeat(400);
        answer.push_str("TAILMARK");
        app.view.messages = vec![
            Message::user("q"),
            Message::bot(answer, vec![Citation::new(7, 3, "guide.pdf")]),
        ];
        app
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_bot_message_lines_with_citations() {
        let app = app();
        let msg = Message::bot("Answer", vec![Citation::new(1, 2, "pdfs")]);
        assert_eq!(
            texts(&message_lines(&app, 0, &msg)),
            vec![
                header(&msg).as_str(),
                "Answer",
                "Citations:",
                "  • Page 1, Paragraph 2, Source: PDF File",
                ""
            ]
        );
    }

    #[test]
    fn test_citations_hidden_while_typing() {
        let mut app = app();
        let msg = Message::bot("Answer", vec![Citation::new(1, 2, "a.pdf")]);
        let mut typing = TypingAnimation::new(0, msg.text(), 3);
        typing.tick();
        app.typing = Some(typing);

        assert_eq!(
            texts(&message_lines(&app, 0, &msg)),
            vec![header(&msg).as_str(), "Ans", ""]
        );
    }

    #[test]
    fn test_user_message_keeps_line_breaks() {
        let app = app();
        let msg = Message::user("one\ntwo");
        assert_eq!(
            texts(&message_lines(&app, 0, &msg)),
            vec![header(&msg).as_str(), "one", "two", ""]
        );
    }

    #[test]
    fn test_wrapped_answer_tail_and_citations_are_visible() {
        let app = long_answer_app();
        let rendered = screen(&app, 100, 30);
        assert!(rendered.contains("TAILMARK"));
        assert!(rendered.contains("Page 7, Paragraph 3, Source: guide.pdf"));
    }

    #[test]
    fn test_scrolling_up_leaves_the_bottom() {
        let mut app = long_answer_app();
        app.scroll_up(200);
        let top = screen(&app, 100, 30);
        assert!(!top.contains("TAILMARK"));
        assert!(top.contains("[You]"));

        app.scroll_down(200);
        assert!(screen(&app, 100, 30).contains("TAILMARK"));
    }
}
