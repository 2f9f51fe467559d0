//! Parameter list - keyboard editing of the shared parameter store

use monobass::{ParamId, SharedParams};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use std::sync::Arc;

/// Fine steps across a parameter's full range
const FINE_STEPS: f32 = 100.0;
const COARSE_STEPS: f32 = 10.0;

pub struct ParamEditor {
    params: Arc<SharedParams>,
    selected: usize,
}

impl ParamEditor {
    pub fn new(params: Arc<SharedParams>) -> Self {
        Self { params, selected: 0 }
    }

    pub fn selected(&self) -> ParamId {
        ParamId::ALL[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % ParamId::ALL.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.checked_sub(1).unwrap_or(ParamId::ALL.len() - 1);
    }

    /// Move the selected value up (`direction > 0`) or down. Toggles flip.
    pub fn nudge(&mut self, direction: f32, coarse: bool) {
        let id = self.selected();
        if id.is_toggle() {
            let on = self.params.get(id) >= 0.5;
            self.params.set(id, if on { 0.0 } else { 1.0 });
            return;
        }

        let (min, max) = id.range();
        let steps = if coarse { COARSE_STEPS } else { FINE_STEPS };
        self.params.adjust(id, direction.signum() * (max - min) / steps);
    }

    pub fn reset_selected(&mut self) {
        let id = self.selected();
        self.params.set(id, id.default_value());
    }

    pub fn output_gain(&self) -> f32 {
        monobass::dsp::amplify::db_to_gain(self.params.snapshot().output_db)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let snapshot = self.params.snapshot();
        let items: Vec<ListItem> = ParamId::ALL
            .iter()
            .map(|&id| {
                let value = format_value(id, snapshot.get(id));
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<12}", id.id()), Style::default().fg(Color::White)),
                    Span::styled(value, Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title(" Params ").borders(Borders::ALL))
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("▸ ");

        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn format_value(id: ParamId, value: f32) -> String {
    match id {
        ParamId::MonoLegato => if value >= 0.5 { "on" } else { "off" }.to_string(),
        ParamId::Output => format!("{value:>6.1} dB"),
        ParamId::Tune => format!("{value:>+6.1} st"),
        ParamId::Cutoff | ParamId::LfoRate => format!("{value:>7.1} Hz"),
        ParamId::FmRatio => format!("{value:>6.2} x"),
        ParamId::Glide | ParamId::Attack | ParamId::Decay | ParamId::Release => {
            format!("{:>6.0} ms", value * 1000.0)
        }
        _ => format!("{value:>6.2}"),
    }
}
