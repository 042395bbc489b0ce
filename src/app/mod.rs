use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::ListState;
use ratatui::Terminal;

use crate::config::themes::Palette;
use crate::config::AppConfig;
use crate::ui;

pub mod editor;
pub mod state;

pub use editor::{EditorAction, EditorField, EditorState, GiftEditor, RemoveGift};
pub use state::{AppState, GiftEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    AddGift,
    RemoveGift,
    SelectNext,
    SelectPrevious,
    NextField,
    PreviousField,
    Type(char),
    Backspace,
}

pub struct App {
    pub config: Arc<AppConfig>,
    state: AppState,
    list_state: ListState,
    palette: Palette,
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let state = AppState::new(config.editor.max_field_len);
        let palette = Palette::for_theme(config.theme);
        let tick_rate = config.tick_rate();
        Self {
            config,
            state,
            list_state: ListState::default(),
            palette,
            should_quit: false,
            tick_rate,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal().map_err(|err| {
            tracing::error!(?err, "failed to set up terminal");
            err
        })?;
        let result = self.event_loop(&mut terminal);
        let restored = restore_terminal(&mut terminal);
        settle_session(result, restored)
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        tracing::info!("gift editor started");
        loop {
            terminal
                .draw(|frame| {
                    if self.state.is_empty() {
                        self.list_state.select(None);
                    } else {
                        self.list_state.select(Some(self.state.selected));
                    }
                    ui::draw_app(frame, &self.state, &mut self.list_state, &self.palette);
                })
                .context("rendering frame")?;

            if self.should_quit {
                break;
            }

            if event::poll(self.tick_rate).context("polling for terminal events")? {
                match event::read().context("reading terminal event")? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {
                        // next draw adapts to the new size
                    }
                    _ => {}
                }
            }
        }
        tracing::info!(gifts = self.state.len(), "gift editor closed");
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(action) = map_key(key) {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::AddGift => {
                let gift = self.state.add_gift();
                self.state
                    .set_status_message(Some(format!("Added gift #{}", gift.id)));
            }
            Action::RemoveGift => self.handle_remove_gift(),
            Action::SelectNext => self.state.move_selection(1),
            Action::SelectPrevious => self.state.move_selection(-1),
            Action::NextField => self.state.focus_next(),
            Action::PreviousField => self.state.focus_previous(),
            Action::Type(ch) => {
                if self.state.is_empty() {
                    self.state
                        .set_status_message(Some("Press Ctrl-a to add a gift first"));
                } else if !self.state.type_char(ch) {
                    let limit = self.state.max_field_len;
                    self.state.set_status_message(Some(format!(
                        "Field limit of {limit} characters reached"
                    )));
                }
            }
            Action::Backspace => {
                self.state.backspace();
            }
        }
    }

    fn handle_remove_gift(&mut self) {
        let Some(id) = self.state.request_remove_selected() else {
            self.state.set_status_message(Some("No gift selected"));
            return;
        };
        let removed = self.state.process_removals();
        tracing::debug!(gift_id = id, removed, "processed removal requests");
        self.state
            .set_status_message(Some(format!("Removed gift #{id}")));
    }
}

fn map_key(key: KeyEvent) -> Option<Action> {
    let plain = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);
    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::Quit)
        }
        KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::AddGift)
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::RemoveGift)
        }
        KeyCode::Down => Some(Action::SelectNext),
        KeyCode::Up => Some(Action::SelectPrevious),
        KeyCode::Tab => Some(Action::NextField),
        KeyCode::BackTab => Some(Action::PreviousField),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(ch) if plain => Some(Action::Type(ch)),
        _ => None,
    }
}

/// Logs both outcomes and keeps the event loop's error when both fail.
fn settle_session(result: Result<()>, restored: Result<()>) -> Result<()> {
    if let Err(err) = &result {
        tracing::error!(?err, "gift editor event loop failed");
    }
    if let Err(err) = &restored {
        tracing::error!(?err, "failed to restore terminal");
    }
    result.and(restored)
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("switching to alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("creating terminal backend")?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor().ok();
    disable_raw_mode().context("disabling raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("restoring screen state")?;
    Ok(())
}
