use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use super::events::{Action, AppEvent};
use super::layout::{centered_rect, AppLayout};
use super::portraits::PortraitCache;
use super::services::Services;
use super::theme;
use super::views::cards::CardsViewState;
use super::views::image_modal::ImageModal;
use crate::config::TuiConfig;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Character cards view state.
    pub cards: CardsViewState,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Backend services handle.
    services: Services,
}

impl AppState {
    pub fn new(services: Services, config: &TuiConfig) -> Self {
        let portraits = PortraitCache::new(services.client.http_client().clone(), config.portraits);
        let cards = CardsViewState::new(
            services.portrait_urls.clone(),
            portraits,
            ImageModal::new(config.image_modal),
        );

        Self {
            running: true,
            cards,
            show_help: false,
            services,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        let size = terminal.size()?;
        self.set_viewport(Rect::new(0, 0, size.width, size.height));

        // One fetch per launch
        self.cards.load(&self.services);

        while self.running {
            // Render
            terminal.draw(|frame| self.render(frame))?;

            // Select next event
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.handle_event(AppEvent::Tick);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.cards.poll(),
            AppEvent::Input(Event::Resize(width, height)) => {
                self.set_viewport(Rect::new(0, 0, width, height));
            }
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Cards (and the image modal they own)
                if self.cards.handle_input(&crossterm_event) {
                    return;
                }

                // Priority 3: Global keybindings
                if let Some(action) = self.map_input_to_action(&crossterm_event) {
                    self.handle_action(action);
                }
            }
        }
    }

    fn set_viewport(&mut self, viewport: Rect) {
        self.cards.set_area(AppLayout::compute(viewport).main);
    }

    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (*modifiers, *code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (_, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (*modifiers, *code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Action::Quit),
            (_, KeyCode::Char('?')) => Some(Action::ShowHelp),
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::Quit => {
                log::info!("Quit requested");
                self.running = false;
            }
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);

        self.render_header(frame, layout.header);
        self.cards.render(frame, layout.main);
        self.render_status_bar(frame, layout.status);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled(" springdex ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled("Personagens de Os Simpsons", theme::title()),
        ]);
        frame.render_widget(Paragraph::new(header), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let summary = match self.cards.status_message() {
            Some(message) => Span::styled(message, theme::muted()),
            None => Span::styled(
                format!("{}/{}", self.cards.selected() + 1, self.cards.cards().len()),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
        };

        let hints = if self.cards.modal().is_open() {
            vec![
                Span::styled("Esc/x", theme::key_hint()),
                Span::raw(":fechar "),
            ]
        } else {
            vec![
                Span::styled("←↓↑→", theme::key_hint()),
                Span::raw(":nav "),
                Span::styled("Enter", theme::key_hint()),
                Span::raw(":ampliar "),
            ]
        };

        let mut spans = vec![
            Span::styled(" springdex ", theme::brand_badge()),
            Span::raw(" "),
            summary,
            Span::raw(" │ "),
        ];
        spans.extend(hints);
        spans.extend([
            Span::styled("?", theme::key_hint()),
            Span::raw(":ajuda "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":sair"),
        ]);

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 70, area);

        let keybindings = [
            ("Global:", ""),
            ("q", "Sair"),
            ("?", "Mostrar/ocultar esta ajuda"),
            ("Ctrl+C", "Forçar saída"),
            ("", ""),
            ("Cartões:", ""),
            ("←↓↑→ / hjkl", "Navegar"),
            ("PageUp / PageDown", "Página anterior / próxima"),
            ("g / G", "Primeiro / último"),
            ("Enter / clique na foto", "Ampliar retrato"),
            ("", ""),
            ("Retrato ampliado:", ""),
            ("Esc / x", "Fechar"),
            ("Enter / Espaço", "Ativar botão Fechar"),
            ("Clique fora", "Fechar"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Atalhos",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<24}", key),
                        Style::default()
                            .fg(theme::PRIMARY_LIGHT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        let block = Block::default()
            .title(" Ajuda ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::characters::CharacterRecord;
    use crossterm::event::KeyEventState;
    use ratatui::backend::TestBackend;

    fn app() -> AppState {
        let mut config = AppConfig::default();
        config.tui.portraits = false;
        let mut app = AppState::new(Services::init(&config), &config.tui);
        app.set_viewport(Rect::new(0, 0, 100, 40));
        app
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> AppEvent {
        AppEvent::Input(Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
    }

    fn key(code: KeyCode) -> AppEvent {
        key_with(code, KeyModifiers::NONE)
    }

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_q_quits() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        app.handle_event(key_with(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('?')));
        assert!(app.show_help);
        assert!(draw(&app).contains("Atalhos"));

        // Help swallows navigation.
        app.cards.render_characters(&[CharacterRecord::named("Homer"), CharacterRecord::named("Marge")]);
        app.handle_event(key(KeyCode::Right));
        assert_eq!(app.cards.selected(), 0);

        app.handle_event(key(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_initial_frame_shows_loading() {
        let app = app();
        let screen = draw(&app);
        assert!(screen.contains("springdex"));
        assert!(screen.contains("Carregando personagens..."));
    }

    #[test]
    fn test_escape_in_modal_does_not_quit() {
        let mut app = app();
        app.cards.render_characters(&[CharacterRecord::named("Homer")]);
        app.handle_event(key(KeyCode::Enter));
        assert!(app.cards.modal().is_open());

        app.handle_event(key(KeyCode::Esc));
        assert!(!app.cards.modal().is_open());
        assert!(app.running);
    }

    #[test]
    fn test_resize_updates_card_area() {
        let mut app = app();
        app.cards.render_characters(&[CharacterRecord::named("Homer")]);
        app.handle_event(AppEvent::Input(Event::Resize(20, 8)));
        assert_eq!(app.cards.area(), AppLayout::compute(Rect::new(0, 0, 20, 8)).main);

        // Too small for the modal: opening is a no-op.
        app.handle_event(key(KeyCode::Enter));
        assert!(!app.cards.modal().is_open());
    }

    #[test]
    fn test_status_bar_shows_position() {
        let mut app = app();
        app.cards.render_characters(&[CharacterRecord::named("Homer"), CharacterRecord::named("Marge")]);
        app.handle_event(key(KeyCode::Right));
        assert!(draw(&app).contains("2/2"));
    }
}
