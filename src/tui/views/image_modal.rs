//! Enlarged-portrait modal.
//!
//! One instance per app, owned by the cards view. The modal is an explicit
//! two-state machine: `Closed`, or `Open` holding the target's full-size
//! image URL, its caption, and the focus to restore when it closes. Every
//! open is matched by exactly one close that hands the captured focus back.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::characters::CharacterView;
use crate::tui::layout::centered_rect;
use crate::tui::portraits::Portrait;
use crate::tui::theme;
use crate::tui::widgets::portrait::{PortraitPlaceholder, PortraitWidget};

/// Smallest host area the modal can be drawn in.
pub const MIN_SURFACE_WIDTH: u16 = 24;
pub const MIN_SURFACE_HEIGHT: u16 = 10;

const CLOSE_LABEL: &str = " ✕ Fechar ";

/// Something that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// A card in the grid, by index.
    Card(usize),
    /// The modal's close control.
    CloseControl,
}

/// Data held while the modal is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenModal {
    pub image_url: String,
    pub caption: String,
    /// Focus captured at open time.
    pub return_focus: Option<FocusTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(OpenModal),
}

/// What the modal did with an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalInput {
    /// Event handled, nothing else to do.
    Consumed,
    /// Modal closed; restore this focus if it is still valid.
    Closed(Option<FocusTarget>),
    /// Not for the modal.
    Ignored,
}

/// The image modal controller.
#[derive(Debug, Clone, Default)]
pub struct ImageModal {
    state: ModalState,
    /// Whether this build of the UI provides a modal surface at all.
    enabled: bool,
}

impl ImageModal {
    pub fn new(enabled: bool) -> Self {
        Self {
            state: ModalState::Closed,
            enabled,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    /// Image source while open; `None` when closed.
    pub fn image_url(&self) -> Option<&str> {
        match &self.state {
            ModalState::Open(open) => Some(&open.image_url),
            ModalState::Closed => None,
        }
    }

    /// Caption while open; `None` when closed.
    pub fn caption(&self) -> Option<&str> {
        match &self.state {
            ModalState::Open(open) => Some(&open.caption),
            ModalState::Closed => None,
        }
    }

    /// Where the modal would be drawn inside `host`, or `None` when there is
    /// no usable surface.
    pub fn surface(&self, host: Rect) -> Option<Rect> {
        if !self.enabled || host.width < MIN_SURFACE_WIDTH || host.height < MIN_SURFACE_HEIGHT {
            return None;
        }
        Some(centered_rect(70, 90, host))
    }

    /// Closed → Open for `target`.
    ///
    /// Returns the new focus (the close control), or `None` when nothing
    /// changed: already open, or no surface in `host`.
    pub fn open(
        &mut self,
        target: &CharacterView,
        focused: Option<FocusTarget>,
        host: Rect,
    ) -> Option<FocusTarget> {
        if self.is_open() {
            return None;
        }
        if self.surface(host).is_none() {
            log::debug!("Image modal unavailable in {host:?}; ignoring open");
            return None;
        }

        self.state = ModalState::Open(OpenModal {
            image_url: target.full_image_url.clone(),
            caption: target.caption.clone(),
            return_focus: focused,
        });
        log::debug!("Opened image modal for {}", target.caption);
        Some(FocusTarget::CloseControl)
    }

    /// Open → Closed. Returns the focus captured at open time.
    ///
    /// `None` if the modal was not open or nothing was focused then.
    pub fn close(&mut self) -> Option<FocusTarget> {
        match std::mem::take(&mut self.state) {
            ModalState::Open(open) => open.return_focus,
            ModalState::Closed => None,
        }
    }

    /// Keyboard handling while open: Esc, `x`, or Enter/Space on the close
    /// control close the modal.
    pub fn handle_key(&mut self, key: &KeyEvent, focus: Option<FocusTarget>) -> ModalInput {
        if !self.is_open() || key.kind != KeyEventKind::Press {
            return ModalInput::Ignored;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('x') => ModalInput::Closed(self.close()),
            KeyCode::Enter | KeyCode::Char(' ') if focus == Some(FocusTarget::CloseControl) => {
                ModalInput::Closed(self.close())
            }
            // Focus never leaves the modal while it is open.
            KeyCode::Tab | KeyCode::BackTab => ModalInput::Consumed,
            _ => ModalInput::Ignored,
        }
    }

    /// Mouse handling while open: a click on the close control or on the
    /// backdrop closes; clicks on the content do nothing.
    pub fn handle_mouse(&mut self, mouse: &MouseEvent, host: Rect) -> ModalInput {
        if !self.is_open() {
            return ModalInput::Ignored;
        }
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return ModalInput::Consumed;
        };
        let Some(surface) = self.surface(host) else {
            return ModalInput::Closed(self.close());
        };

        let position = Position::new(mouse.column, mouse.row);
        if close_control_area(surface).contains(position) || !surface.contains(position) {
            ModalInput::Closed(self.close())
        } else {
            ModalInput::Consumed
        }
    }

    /// Draw the modal over `host` when open.
    pub fn render(
        &self,
        frame: &mut Frame,
        host: Rect,
        portrait: Option<&Portrait>,
        focus: Option<FocusTarget>,
    ) {
        let (ModalState::Open(open), Some(surface)) = (&self.state, self.surface(host)) else {
            return;
        };

        frame.render_widget(Clear, surface);

        let block = Block::default()
            .title(Line::from(Span::styled(format!(" {} ", open.caption), theme::title())))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::BG_SURFACE));

        let inner = block.inner(surface);
        frame.render_widget(block, surface);

        // Image, then the source line, then the close control on the last row.
        let image_area = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(2));
        match portrait {
            Some(portrait) => frame.render_widget(PortraitWidget::new(portrait), image_area),
            None => frame.render_widget(PortraitPlaceholder::new("carregando imagem…"), image_area),
        }

        let source_area = Rect::new(inner.x, inner.bottom().saturating_sub(2), inner.width, 1);
        frame.render_widget(
            Paragraph::new(Line::styled(open.image_url.as_str(), theme::dim()))
                .alignment(Alignment::Center),
            source_area,
        );

        let focused = focus == Some(FocusTarget::CloseControl);
        frame.render_widget(
            Paragraph::new(Line::styled(CLOSE_LABEL, theme::button(focused))),
            close_control_area(surface),
        );
    }
}

/// Close control: bottom row of the modal, centered.
pub fn close_control_area(surface: Rect) -> Rect {
    let width = (CLOSE_LABEL.chars().count() as u16).min(surface.width.saturating_sub(2));
    let x = surface.x + (surface.width.saturating_sub(width)) / 2;
    let y = surface.bottom().saturating_sub(2);
    Rect::new(x, y, width, 1)
}
