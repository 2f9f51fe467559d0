//! Terminal UI for monobass
//!
//! Draws transport, pattern, parameters, scope and spectrum, and turns key
//! presses into parameter writes and transport commands.

mod params;
pub mod state;
mod spectrum;
mod transport;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use monobass::SharedParams;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::{collections::VecDeque, sync::Arc, time::Duration};

pub use state::{ControlMessage, EngineStatus, SessionInfo};

use params::ParamEditor;
use spectrum::{render_spectrum, Spectrum};
use transport::{render_steps, render_transport, Levels};
use waveform::render_waveform;

/// Samples kept for the scope and the spectrum
const HISTORY: usize = 4096;

pub struct UiApp {
    session: SessionInfo,
    audio_rx: Consumer<f32>,
    status_rx: Consumer<EngineStatus>,
    control_tx: Producer<ControlMessage>,
    status: EngineStatus,
    history: VecDeque<f32>,
    /// Contiguous copy of `history`, reused every frame
    scratch: Vec<f32>,
    spectrum: Spectrum,
    editor: ParamEditor,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        session: SessionInfo,
        params: Arc<SharedParams>,
        audio_rx: Consumer<f32>,
        status_rx: Consumer<EngineStatus>,
        control_tx: Producer<ControlMessage>,
    ) -> Self {
        let spectrum = Spectrum::new(HISTORY, session.sample_rate);
        Self {
            session,
            audio_rx,
            status_rx,
            control_tx,
            status: EngineStatus {
                is_playing: true,
                ..EngineStatus::default()
            },
            history: std::iter::repeat(0.0).take(HISTORY).collect(),
            scratch: Vec::with_capacity(HISTORY),
            spectrum,
            editor: ParamEditor::new(params),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_status();

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }
        }
        Ok(())
    }

    fn poll_audio(&mut self) {
        while let Ok(sample) = self.audio_rx.pop() {
            if self.history.len() == HISTORY {
                self.history.pop_front();
            }
            self.history.push_back(sample);
        }
        self.scratch.clear();
        self.scratch.extend(self.history.iter().copied());
        self.spectrum.update(&self.scratch);
    }

    fn poll_status(&mut self) {
        while let Ok(status) = self.status_rx.pop() {
            self.status = status;
        }
    }

    fn send(&mut self, message: ControlMessage) {
        if self.control_tx.push(message).is_err() {
            log::warn!("control queue full, dropped {message:?}");
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let coarse = modifiers.contains(KeyModifiers::SHIFT);
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.send(ControlMessage::TogglePlayback),
            KeyCode::Char('r') | KeyCode::Char('R') => self.send(ControlMessage::Reset),
            KeyCode::Up | KeyCode::Char('k') => self.editor.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.editor.select_next(),
            KeyCode::Right | KeyCode::Char('l') => self.editor.nudge(1.0, coarse),
            KeyCode::Left | KeyCode::Char('h') => self.editor.nudge(-1.0, coarse),
            KeyCode::Char('d') => self.editor.reset_selected(),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport
                Constraint::Length(3), // Steps
                Constraint::Min(10),   // Params + scope/spectrum
                Constraint::Length(1), // Help
            ])
            .split(frame.area());

        let levels = Levels::measure(&self.scratch[self.scratch.len().saturating_sub(1024)..]);
        render_transport(frame, rows[0], &self.session, &self.status, &levels);
        render_steps(frame, rows[1], &self.session, &self.status);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(20)])
            .split(rows[2]);
        self.editor.render(frame, body[0]);

        let scopes = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(body[1]);
        render_waveform(frame, scopes[0], &self.scratch, self.editor.output_gain());
        render_spectrum(frame, scopes[1], &self.spectrum);

        let help = Paragraph::new(" [Q] Quit  [Space] Play/Stop  [R] Reset  [↑↓] Select  [←→] Adjust (Shift: coarse)  [D] Default")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[3]);
    }
}
