//! Character cards view — the whole list as a scrollable grid.
//!
//! Shows a loading message while the fetch runs, then either one card per
//! character (in API order) or a single status message. `Enter` on a card,
//! or a click on its portrait, opens the enlarged-portrait modal.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc;

use crate::core::api::NetworkError;
use crate::core::characters::{CharacterRecord, CharacterView, PortraitUrls};
use crate::tui::layout::{portrait_area, text_area, CardGrid};
use crate::tui::portraits::{PortraitCache, PortraitSlot, MODAL_MAX_DIM, THUMBNAIL_MAX_DIM};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::views::image_modal::{FocusTarget, ImageModal, ModalInput};
use crate::tui::widgets::portrait::{PortraitPlaceholder, PortraitWidget};

pub const LOADING_MESSAGE: &str = "Carregando personagens...";
pub const EMPTY_MESSAGE: &str = "Nenhum personagem encontrado.";
pub const ERROR_MESSAGE: &str =
    "Ocorreu um erro ao carregar os dados. Tente novamente mais tarde.";

// ── Internal async data events ─────────────────────────────────────────────

enum CardsDataEvent {
    Loaded(Vec<CharacterRecord>),
    Failed(NetworkError),
}

// ── State ──────────────────────────────────────────────────────────────────

/// What the container currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardsPhase {
    Loading,
    Ready(Vec<CharacterView>),
    Empty,
    Failed,
}

pub struct CardsViewState {
    phase: CardsPhase,
    selected: usize,
    focus: Option<FocusTarget>,
    /// First grid row on screen.
    scroll_row: usize,
    /// Last known container area, for hit-testing.
    area: Rect,

    modal: ImageModal,
    portraits: PortraitCache,
    urls: PortraitUrls,

    data_tx: mpsc::UnboundedSender<CardsDataEvent>,
    data_rx: mpsc::UnboundedReceiver<CardsDataEvent>,
}

impl CardsViewState {
    pub fn new(urls: PortraitUrls, portraits: PortraitCache, modal: ImageModal) -> Self {
        let (data_tx, data_rx) = mpsc::unbounded_channel();
        Self {
            phase: CardsPhase::Loading,
            selected: 0,
            focus: None,
            scroll_row: 0,
            area: Rect::default(),
            modal,
            portraits,
            urls,
            data_tx,
            data_rx,
        }
    }

    /// Show the loading message and fetch every character in the background.
    pub fn load(&mut self, services: &Services) {
        self.phase = CardsPhase::Loading;
        let client = services.client.clone();
        let tx = self.data_tx.clone();
        tokio::spawn(async move {
            match client.fetch_all_characters().await {
                Ok(records) => { let _ = tx.send(CardsDataEvent::Loaded(records)); }
                Err(e) => { let _ = tx.send(CardsDataEvent::Failed(e)); }
            }
        });
    }

    /// Drain background results and queue portraits for what is on screen.
    pub fn poll(&mut self) {
        while let Ok(event) = self.data_rx.try_recv() {
            match event {
                CardsDataEvent::Loaded(records) => {
                    log::info!("Rendering {} characters", records.len());
                    self.render_characters(&records);
                }
                CardsDataEvent::Failed(e) => {
                    log::error!("Failed to load characters: {e}");
                    self.render_error();
                }
            }
        }

        self.portraits.poll();
        self.request_visible_portraits();
    }

    /// Replace the content with one card per record, in order.
    pub fn render_characters(&mut self, records: &[CharacterRecord]) {
        self.scroll_row = 0;
        if records.is_empty() {
            self.phase = CardsPhase::Empty;
            self.selected = 0;
            self.focus = None;
            return;
        }

        let views: Vec<CharacterView> = records
            .iter()
            .map(|record| CharacterView::from_record(record, &self.urls))
            .collect();
        self.selected = self.selected.min(views.len() - 1);
        self.phase = CardsPhase::Ready(views);
        if !self.modal.is_open() {
            self.focus = Some(FocusTarget::Card(self.selected));
        }
        self.ensure_visible();
    }

    /// Replace the content with the generic failure message.
    pub fn render_error(&mut self) {
        self.phase = CardsPhase::Failed;
        self.selected = 0;
        self.scroll_row = 0;
        if !self.modal.is_open() {
            self.focus = None;
        }
    }

    pub fn phase(&self) -> &CardsPhase {
        &self.phase
    }

    /// Cards currently shown (empty unless loaded with at least one record).
    pub fn cards(&self) -> &[CharacterView] {
        match &self.phase {
            CardsPhase::Ready(views) => views,
            _ => &[],
        }
    }

    /// The single message shown instead of cards, if any.
    pub fn status_message(&self) -> Option<&'static str> {
        match self.phase {
            CardsPhase::Loading => Some(LOADING_MESSAGE),
            CardsPhase::Empty => Some(EMPTY_MESSAGE),
            CardsPhase::Failed => Some(ERROR_MESSAGE),
            CardsPhase::Ready(_) => None,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn focus(&self) -> Option<FocusTarget> {
        self.focus
    }

    pub fn modal(&self) -> &ImageModal {
        &self.modal
    }

    /// Container area used for hit-testing.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Record the container area from the latest layout.
    pub fn set_area(&mut self, area: Rect) {
        if self.area != area {
            self.area = area;
            self.ensure_visible();
        }
    }

    // ── Modal ──────────────────────────────────────────────────────────────

    /// Open the modal for card `index`.
    pub fn open_modal(&mut self, index: usize) {
        let Some(view) = self.cards().get(index).cloned() else {
            return;
        };
        self.selected = index;
        if let Some(focus) = self.modal.open(&view, self.focus, self.area) {
            self.focus = Some(focus);
            self.portraits.request(&view.full_image_url, MODAL_MAX_DIM);
        }
    }

    /// Close the modal and hand focus back to the card it was opened from.
    pub fn close_modal(&mut self) {
        if self.modal.is_open() {
            let restored = self.modal.close();
            self.restore_focus(restored);
        }
    }

    fn restore_focus(&mut self, restored: Option<FocusTarget>) {
        self.focus = match restored {
            Some(FocusTarget::Card(index)) if index < self.cards().len() => {
                self.selected = index;
                Some(FocusTarget::Card(index))
            }
            _ => None,
        };
        self.ensure_visible();
    }

    // ── Input handling ─────────────────────────────────────────────────────

    /// Returns true when the event was consumed.
    pub fn handle_input(&mut self, event: &Event) -> bool {
        if self.modal.is_open() {
            return self.handle_modal_input(event);
        }

        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => false,
        }
    }

    fn handle_modal_input(&mut self, event: &Event) -> bool {
        let outcome = match event {
            Event::Key(key) => self.modal.handle_key(key, self.focus),
            Event::Mouse(mouse) => self.modal.handle_mouse(mouse, self.area),
            _ => ModalInput::Ignored,
        };

        match outcome {
            ModalInput::Closed(restored) => {
                self.restore_focus(restored);
                true
            }
            ModalInput::Consumed => true,
            // Global keys still reach the app; the grid stays locked.
            ModalInput::Ignored => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let count = self.cards().len();
        if count == 0 {
            return false;
        }
        let columns = self.columns();
        let page = columns * self.visible_rows();

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('l') | KeyCode::Right) => {
                self.select(self.selected + 1);
            }
            (KeyModifiers::NONE, KeyCode::Char('h') | KeyCode::Left) => {
                self.select(self.selected.saturating_sub(1));
            }
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.select(self.selected + columns);
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.select(self.selected.saturating_sub(columns));
            }
            (KeyModifiers::NONE, KeyCode::PageDown) => {
                self.select(self.selected + page);
            }
            (KeyModifiers::NONE, KeyCode::PageUp) => {
                self.select(self.selected.saturating_sub(page));
            }
            (KeyModifiers::NONE, KeyCode::Char('g') | KeyCode::Home) => {
                self.select(0);
            }
            (KeyModifiers::SHIFT | KeyModifiers::NONE, KeyCode::Char('G')) | (_, KeyCode::End) => {
                self.select(count - 1);
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                self.open_modal(self.selected);
            }
            _ => return false,
        }
        true
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        if self.cards().is_empty() {
            return false;
        }
        let columns = self.columns();

        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.select(self.selected + columns);
                true
            }
            MouseEventKind::ScrollUp => {
                self.select(self.selected.saturating_sub(columns));
                true
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let position = Position::new(mouse.column, mouse.row);
                let Some((index, card)) = self.grid().card_at(position) else {
                    return false;
                };

                self.select(index);
                if portrait_area(card).is_some_and(|p| p.contains(position)) {
                    self.open_modal(index);
                }
                true
            }
            _ => false,
        }
    }

    fn select(&mut self, index: usize) {
        let count = self.cards().len();
        if count == 0 {
            return;
        }
        self.selected = index.min(count - 1);
        self.focus = Some(FocusTarget::Card(self.selected));
        self.ensure_visible();
    }

    // ── Geometry ───────────────────────────────────────────────────────────

    fn grid_area(&self) -> Rect {
        container_block(0).inner(self.area)
    }

    fn grid(&self) -> CardGrid {
        CardGrid::compute(self.grid_area(), self.cards().len(), self.scroll_row)
    }

    fn columns(&self) -> usize {
        CardGrid::columns_for(self.grid_area().width)
    }

    fn visible_rows(&self) -> usize {
        CardGrid::rows_for(self.grid_area().height)
    }

    /// Scroll so the selected card's row is on screen.
    fn ensure_visible(&mut self) {
        let row = self.selected / self.columns();
        let visible = self.visible_rows();
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible {
            self.scroll_row = row + 1 - visible;
        }
    }

    /// Start loading thumbnails for on-screen cards (and the modal image).
    pub fn request_visible_portraits(&mut self) {
        if !self.portraits.is_enabled() {
            return;
        }

        let grid = self.grid();
        let wanted: Vec<String> = grid
            .cells
            .iter()
            .filter(|(_, card)| portrait_area(*card).is_some())
            .filter_map(|(index, _)| self.cards().get(*index))
            .map(|view| view.image_url.clone())
            .collect();
        for url in wanted {
            self.portraits.request(&url, THUMBNAIL_MAX_DIM);
        }

        if let Some(url) = self.modal.image_url().map(str::to_string) {
            self.portraits.request(&url, MODAL_MAX_DIM);
        }
    }

    // ── Rendering ──────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = container_block(self.cards().len());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.status_message() {
            Some(message) => self.render_status_message(frame, inner, message),
            None => self.render_grid(frame, inner),
        }

        let modal_portrait = self.modal.image_url().and_then(|url| self.portraits.ready(url));
        self.modal.render(frame, area, modal_portrait, self.focus);
    }

    fn render_status_message(&self, frame: &mut Frame, area: Rect, message: &str) {
        let style = match self.phase {
            CardsPhase::Failed => Style::default().fg(theme::ERROR),
            _ => theme::muted(),
        };
        let top = area.height.saturating_sub(1) / 2;
        let mut lines: Vec<Line> = (0..top).map(|_| Line::raw("")).collect();
        lines.push(Line::styled(message, style));

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let cards = self.cards();
        let grid = CardGrid::compute(area, cards.len(), self.scroll_row);
        let card_focused = matches!(self.focus, Some(FocusTarget::Card(_)));

        for (index, rect) in &grid.cells {
            if let Some(view) = cards.get(*index) {
                let selected = card_focused && *index == self.selected;
                self.render_card(frame, *rect, view, selected);
            }
        }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, view: &CharacterView, selected: bool) {
        let border_style = if selected {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        frame.render_widget(
            Block::default().borders(Borders::ALL).border_style(border_style),
            area,
        );

        if let Some(portrait) = portrait_area(area) {
            match self.portraits.get(&view.image_url) {
                Some(PortraitSlot::Ready(image)) => {
                    frame.render_widget(PortraitWidget::new(image), portrait);
                }
                Some(PortraitSlot::Loading) => {
                    frame.render_widget(PortraitPlaceholder::new("carregando…"), portrait);
                }
                Some(PortraitSlot::Failed) | None => {
                    frame.render_widget(PortraitPlaceholder::new(&view.caption), portrait);
                }
            }
        }

        let mut lines = vec![
            Line::from(Span::styled(view.display_name.as_str(), theme::title())),
            Line::raw(""),
        ];
        for row in view.detail_rows() {
            let value_style = match row.category {
                Some(category) => theme::status_value(category),
                None => Style::default().fg(theme::TEXT),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", row.label), theme::muted()),
                Span::styled(row.value, value_style),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(format!("“{}”", view.quote), theme::quote())));

        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }),
            text_area(area),
        );
    }
}

fn container_block(count: usize) -> Block<'static> {
    let title = if count == 0 {
        " Personagens ".to_string()
    } else {
        format!(" Personagens ({count}) ")
    };
    Block::default()
        .title(Line::from(Span::styled(title, theme::title())))
        .borders(Borders::ALL)
        .border_style(theme::border_default())
}
