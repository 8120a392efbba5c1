use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use pcap_reader_client::AnalysisClientBox;
use ratatui::backend::Backend;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::ScrollbarState;
use ratatui::Frame;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::task;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::MessageType;
use crate::domain::models::Phase;
use crate::domain::models::Role;
use crate::domain::services::actions::ActionsService;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::AppStateProps;
use crate::domain::services::ChatLine;
use crate::domain::services::LineKind;

fn line_style(kind: LineKind) -> Style {
    match kind {
        LineKind::Label(Role::Assistant) => {
            return Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        }
        LineKind::Label(Role::User) => {
            return Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        }
        LineKind::Label(Role::System) => {
            return Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        }
        LineKind::Body(MessageType::Error) => return Style::default().fg(Color::Red),
        LineKind::Body(MessageType::Normal) | LineKind::Blank => return Style::default(),
        LineKind::Status => {
            return Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC)
        }
    }
}

fn to_line(line: &ChatLine) -> Line<'static> {
    return Line::from(Span::styled(line.text.clone(), line_style(line.kind)));
}

fn render(frame: &mut Frame, app_state: &mut AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let phase = match app_state.conversation.session().job_id() {
        Some(job_id) => format!("job {job_id}"),
        None => "no capture analyzed".to_string(),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " PCAP AI Reader ",
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(format!(" {phase} | {}", app_state.backend_url)),
    ]));
    frame.render_widget(header, layout[0]);

    let chat_block = Block::default().borders(Borders::ALL);
    let chat_area = chat_block.inner(layout[1]);
    app_state.set_rect(chat_area);

    let lines: Vec<Line> = app_state.lines.iter().map(to_line).collect();
    let position = u16::try_from(app_state.scroll.position).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(lines)
            .block(chat_block)
            .scroll((position, 0)),
        layout[1],
    );

    let mut scrollbar_state =
        ScrollbarState::new(app_state.scroll.content_len()).position(app_state.scroll.position);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        layout[1],
        &mut scrollbar_state,
    );

    let input_title = app_state.input_title();
    let mut input_style = Style::default();
    if app_state.conversation.is_busy() {
        input_style = input_style.fg(Color::DarkGray);
    }
    app_state.input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(input_title)
            .style(input_style),
    );
    frame.render_widget(&app_state.input, layout[2]);

    let hints = match app_state.conversation.session().phase() {
        Phase::NoJob => " Enter upload | /help | Up/Down scroll | Ctrl-C quit",
        Phase::HasJob => " Enter send | /calls | /help | Up/Down scroll | Ctrl-C quit",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        layout[3],
    );
}

pub async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state_props: AppStateProps,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut app_state = AppState::new(app_state_props);
    let mut events = EventsService::new(rx);

    tx.send(Action::HealthCheck)?;

    loop {
        terminal.draw(|frame| render(frame, &mut app_state))?;

        let event = events.next().await?;
        app_state.handle_event(event, &tx).await?;

        if app_state.exit {
            break;
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

async fn run_terminal(
    backend_url: String,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let result = start_loop(&mut terminal, AppStateProps { backend_url }, tx, rx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    let _ = crossterm::execute!(io::stdout(), cursor::Show);

    return result;
}

/// Runs the full-screen client until the user quits.
pub async fn run(client: AnalysisClientBox) -> Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let backend_url = client.base_url().to_string();
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures
        .spawn(async move { ActionsService::start(client, event_tx, &mut action_rx).await });

    let result = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(res)) => res,
            Some(Err(err)) => Err(err.into()),
            None => Ok(()),
        },
        res = run_terminal(backend_url, action_tx, event_rx) => res,
    );

    if result.is_err() {
        destruct_terminal_for_panic();
    }

    return result;
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;

    fn render_to_text(app_state: &mut AppState, width: u16, height: u16) -> Result<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height))?;
        terminal.draw(|frame| render(frame, app_state))?;

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        Ok(text)
    }

    #[test]
    fn test_wide_characters_are_not_clipped() -> Result<()> {
        let mut app_state = AppState::new(AppStateProps {
            backend_url: "http://localhost:8000".to_string(),
        });
        let answer = "通话失败原因是忙线请重试";
        app_state.conversation.notice(answer);

        let rendered = render_to_text(&mut app_state, 12, 40)?;

        for c in answer.chars() {
            assert!(rendered.contains(c), "{c} missing from the chat pane");
        }
        Ok(())
    }

    #[test]
    fn test_renders_the_greeting_and_hints() -> Result<()> {
        let mut app_state = AppState::new(AppStateProps {
            backend_url: "http://localhost:8000".to_string(),
        });

        let rendered = render_to_text(&mut app_state, 80, 20)?;

        assert!(rendered.contains("Upload a PCAP file to begin analysis."));
        assert!(rendered.contains("Enter upload"));
        assert!(rendered.contains("no capture analyzed"));
        Ok(())
    }
}
