//! Transport bar and step row

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{EngineStatus, SessionInfo};

/// Peak and RMS of the scope buffer
pub struct Levels {
    pub peak: f32,
    pub rms: f32,
}

impl Levels {
    pub fn measure(samples: &[f32]) -> Self {
        if samples.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        let rms = (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt();
        Self { peak, rms }
    }
}

const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

pub fn note_name(note: u8) -> String {
    let octave = note as i32 / 12 - 1;
    format!("{}{}", NOTE_NAMES[note as usize % 12], octave)
}

pub fn render_transport(frame: &mut Frame, area: Rect, session: &SessionInfo, status: &EngineStatus, levels: &Levels) {
    let (symbol, label, color) = if status.is_playing {
        ("▶", "Playing", Color::Green)
    } else {
        ("⏸", "Stopped", Color::Yellow)
    };
    let note = status.note.map_or_else(|| "--".to_string(), note_name);

    let line = Line::from(vec![
        Span::styled(format!(" {:.0} BPM  ", session.bpm), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{symbol} {label}  "), Style::default().fg(color)),
        Span::styled(
            format!("{note:<4} {:>7.1} Hz  ", status.frequency),
            Style::default().fg(Color::White),
        ),
        Span::styled(format!("env {:.2}  ", status.amp_level), Style::default().fg(Color::White)),
        Span::styled(
            format!("cutoff {:>6.0}/{:<6.0} Hz  ", status.cutoff_left, status.cutoff_right),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.1}kHz {}ch  ", session.sample_rate / 1000.0, session.channels),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak {:.2}  RMS {:.2}", levels.peak, levels.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().title(" monobass ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// One cell per step: note name, `>` for accent, `~` for slide. The playing
/// step is highlighted.
pub fn render_steps(frame: &mut Frame, area: Rect, session: &SessionInfo, status: &EngineStatus) {
    let spans: Vec<Span> = session
        .steps
        .iter()
        .enumerate()
        .map(|(index, &(note, accent, slide))| {
            let name = note.map_or_else(|| "·".to_string(), note_name);
            let text = format!(
                " {name:<3}{}{} ",
                if accent { '>' } else { ' ' },
                if slide { '~' } else { ' ' }
            );
            let mut style = Style::default().fg(if note.is_some() { Color::White } else { Color::DarkGray });
            if index == status.step && status.is_playing {
                style = style.bg(Color::Blue).add_modifier(Modifier::BOLD);
            }
            Span::styled(text, style)
        })
        .collect();

    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().title(" Pattern ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
