use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use multitap::score;
use multitap::session::Snapshot;

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const KEY_CELL_WIDTH: usize = 9;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Typing => render_typing(self, area, buf),
            AppState::Results => render_results(self, area, buf),
        }
    }
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let snapshot = app.session.snapshot();
    let keypad_lines = keypad_lines(app);
    let keypad_height = keypad_lines.len() as u16;

    // word count, target, input, keypad, legend, plus blank separators
    let occupied = 6 + keypad_height;
    let top = area.height.saturating_sub(occupied) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(top),
                Constraint::Length(1), // word count
                Constraint::Length(1),
                Constraint::Length(1), // target word
                Constraint::Length(1), // input + preview
                Constraint::Length(1),
                Constraint::Length(keypad_height),
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ]
            .as_ref(),
        )
        .split(area);

    let word_count = Paragraph::new(Span::styled(
        format!(
            "WORD {} OF {}",
            snapshot.word_index + 1,
            snapshot.word_total
        ),
        dim_style.patch(italic_style),
    ))
    .alignment(Alignment::Center);
    word_count.render(chunks[1], buf);

    let target = Paragraph::new(Span::styled(snapshot.target.to_string(), bold_style))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    target.render(chunks[3], buf);

    let input = Paragraph::new(Line::from(input_spans(&snapshot, chunks[4].width)))
        .alignment(Alignment::Left);
    input.render(chunks[4], buf);

    let keypad = Paragraph::new(keypad_lines).alignment(Alignment::Center);
    keypad.render(chunks[6], buf);

    let legend = Paragraph::new(Span::styled(
        "(0-9) tap / (bksp) clear / (enter) confirm / (esc)ape",
        italic_style,
    ))
    .alignment(Alignment::Center);
    legend.render(chunks[8], buf);
}

/// Committed characters colored against the target position, followed by
/// the pending preview character. Left-padded so the first input column
/// lines up under the centered target word.
fn input_spans(snapshot: &Snapshot, width: u16) -> Vec<Span<'static>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let preview_style = Style::default()
        .patch(bold_style)
        .fg(Color::Yellow)
        .add_modifier(Modifier::UNDERLINED);

    let pad = (width as usize).saturating_sub(snapshot.target.width()) / 2;
    let mut spans = vec![Span::raw(" ".repeat(pad))];

    let target_chars: Vec<char> = snapshot.target.chars().collect();
    for (idx, c) in snapshot.committed.chars().enumerate() {
        let style = match target_chars.get(idx) {
            Some(expected) if *expected == c => green_bold_style,
            _ => red_bold_style,
        };
        let shown = match c {
            ' ' => "·".to_string(),
            c => c.to_string(),
        };
        spans.push(Span::styled(shown, style));
    }

    match snapshot.preview {
        Some(c) => spans.push(Span::styled(c.to_string(), preview_style)),
        None => spans.push(Span::styled(
            "_".to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )),
    }

    spans
}

/// The on-screen 12-key pad: one row of digits, one row of candidates,
/// three keys per row.
fn keypad_lines(app: &App) -> Vec<Line<'static>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let mut lines = Vec::new();
    for row in &app.keymap.keys().chunks(3) {
        let keys: Vec<char> = row.collect();

        let digits = keys
            .iter()
            .map(|k| format!("{k:^KEY_CELL_WIDTH$}"))
            .collect::<String>();
        let candidates = keys
            .iter()
            .map(|k| {
                let cs = app.keymap.candidates(*k).unwrap_or_default();
                // The trailing digit candidate is implied by the key label
                let letters: String = cs[..cs.len().saturating_sub(1)]
                    .iter()
                    .map(|c| if *c == ' ' { '␣' } else { *c })
                    .collect();
                format!("{letters:^KEY_CELL_WIDTH$}")
            })
            .collect::<String>();

        lines.push(Line::from(Span::styled(digits, bold_style)));
        lines.push(Line::from(Span::styled(candidates, dim_style)));
    }
    lines
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(area.height.saturating_sub(4) / 2),
                Constraint::Length(1), // headline
                Constraint::Length(1),
                Constraint::Length(1), // stats
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ]
            .as_ref(),
        )
        .split(area);

    let headline = Paragraph::new(Span::styled("SESSION COMPLETE", bold_style))
        .alignment(Alignment::Center);
    headline.render(chunks[1], buf);

    let summary = app
        .session
        .summary()
        .unwrap_or_else(|| score::summarize(0, 0, None, None));
    let stats = Paragraph::new(Span::styled(
        format!(
            "{:.1}s   {} wpm   {}% acc",
            summary.elapsed_secs, summary.wpm, summary.accuracy
        ),
        bold_style,
    ))
    .alignment(Alignment::Center);
    stats.render(chunks[3], buf);

    let legend = Paragraph::new(Span::styled("(r)etry / (n)ew / (esc)ape", italic_style))
        .alignment(Alignment::Center);
    legend.render(chunks[5], buf);
}
