pub mod field;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::config::ColorScheme;
use crate::game::{Phase, Snapshot};

pub struct Palette {
    pub text: Color,
    pub accent: Color,
    pub dim: Color,
    pub alert: Color,
    pub background: Color,
    pub ship: Color,
    pub asteroid: Color,
}

impl Palette {
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Classic => Palette {
                text: Color::Rgb(0, 255, 0),
                accent: Color::Rgb(140, 255, 140),
                dim: Color::Rgb(40, 90, 40),
                alert: Color::Rgb(255, 0, 0),
                background: Color::Rgb(0, 0, 0),
                ship: Color::Rgb(0, 255, 0),
                asteroid: Color::Rgb(0, 200, 0),
            },
            ColorScheme::Amber => Palette {
                text: Color::Rgb(255, 176, 0),
                accent: Color::Rgb(255, 220, 120),
                dim: Color::Rgb(110, 75, 0),
                alert: Color::Rgb(255, 80, 40),
                background: Color::Rgb(10, 6, 0),
                ship: Color::Rgb(255, 200, 60),
                asteroid: Color::Rgb(200, 130, 0),
            },
            ColorScheme::Mono => Palette {
                text: Color::Rgb(255, 255, 255),
                accent: Color::Rgb(255, 255, 255),
                dim: Color::Rgb(90, 90, 90),
                alert: Color::Rgb(255, 255, 255),
                background: Color::Rgb(0, 0, 0),
                ship: Color::Rgb(255, 255, 255),
                asteroid: Color::Rgb(180, 180, 180),
            },
        }
    }
}

/// Minutes and seconds, e.g. `1:05`.
pub fn format_time(seconds: f64) -> String {
    let whole = seconds.max(0.0) as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

pub fn render(frame: &mut Frame, snap: &Snapshot, palette: &Palette) {
    let area = frame.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.dim))
        .title(" Word Drift ")
        .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(palette.background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(4),    // Field
            Constraint::Length(1), // Input line
            Constraint::Length(1), // Help bar
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(status_line(snap, palette)), chunks[0]);

    let fw = chunks[1].width as usize;
    let fh = chunks[1].height as usize;
    if fw > 0 && fh > 0 {
        let lines = field::render_field(snap, palette, fw, fh);
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    frame.render_widget(Paragraph::new(input_line(snap, palette)), chunks[2]);
    frame.render_widget(Paragraph::new(help_line(snap.phase, palette)), chunks[3]);

    match snap.phase {
        Phase::Countdown => {
            if let Some(n) = snap.countdown {
                render_countdown(frame, chunks[1], n, palette);
            }
        }
        Phase::GameOver => render_game_over(frame, chunks[1], snap, palette),
        Phase::Playing => {}
    }
}

fn status_line(snap: &Snapshot, palette: &Palette) -> Line<'static> {
    let sep = || Span::styled(" | ", Style::default().fg(palette.dim));
    Line::from(vec![
        Span::styled(
            format!(" Lives: {}", "\u{2666} ".repeat(snap.lives as usize)),
            Style::default().fg(palette.alert).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled(
            format!("Word: {}", snap.current_word),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled(
            format!("Heading: {:>3.0}\u{b0}", snap.ship.heading()),
            Style::default().fg(palette.text),
        ),
        sep(),
        Span::styled(
            format!("Time: {}", format_time(snap.elapsed)),
            Style::default().fg(palette.text),
        ),
        sep(),
        Span::styled(
            format!("Best: {}", format_time(snap.high_score)),
            Style::default().fg(palette.text),
        ),
        sep(),
        Span::styled(
            format!("Rocks: {}", snap.asteroids.len()),
            Style::default().fg(palette.dim),
        ),
    ])
}

fn input_line(snap: &Snapshot, palette: &Palette) -> Line<'static> {
    let mut spans = vec![
        Span::styled(" Input: ", Style::default().fg(palette.text)),
        Span::styled(
            snap.input.to_string(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
    ];
    if snap.phase == Phase::Playing {
        spans.push(Span::styled(
            "_",
            Style::default().fg(palette.accent).add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    if let Some(err) = snap.rejection {
        spans.push(Span::styled(format!("   ({err})"), Style::default().fg(palette.alert)));
    }
    Line::from(spans)
}

fn help_line(phase: Phase, palette: &Palette) -> Line<'static> {
    let key = Style::default().fg(palette.accent).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(palette.dim);
    match phase {
        Phase::Countdown => Line::from(vec![
            Span::styled(" Get ready... ", text),
            Span::styled("Esc", key),
            Span::styled(" Quit", text),
        ]),
        Phase::Playing => Line::from(vec![
            Span::styled(" Type a word, ", text),
            Span::styled("Enter", key),
            Span::styled(" to steer | ", text),
            Span::styled("Backspace", key),
            Span::styled(" Edit | ", text),
            Span::styled("Esc", key),
            Span::styled(" Quit", text),
        ]),
        Phase::GameOver => Line::from(vec![
            Span::styled(" GAME OVER! ", Style::default().fg(palette.alert).add_modifier(Modifier::BOLD)),
            Span::styled("R", key),
            Span::styled(" Restart | ", text),
            Span::styled("Q", key),
            Span::styled(" Quit", text),
        ]),
    }
}

fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

fn render_countdown(frame: &mut Frame, area: Rect, n: u32, palette: &Palette) {
    let box_area = centered(area, 11, 3);
    frame.render_widget(Clear, box_area);
    let p = Paragraph::new(Line::from(Span::styled(
        n.to_string(),
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(palette.text))
            .style(Style::default().bg(palette.background)),
    );
    frame.render_widget(p, box_area);
}

fn render_game_over(frame: &mut Frame, area: Rect, snap: &Snapshot, palette: &Palette) {
    let box_area = centered(area, 48, 9);
    frame.render_widget(Clear, box_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(palette.alert))
        .title(" GAME OVER ")
        .title_style(Style::default().fg(palette.alert).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(palette.background));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let record = snap.elapsed > 0.0 && snap.elapsed >= snap.high_score;
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Final Time: {}", format_time(snap.elapsed)),
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Best Time: {}", format_time(snap.high_score)),
            Style::default().fg(palette.text),
        )),
    ];
    if record {
        lines.push(Line::from(Span::styled(
            "New record!",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press R to restart or Q to quit",
        Style::default().fg(palette.alert),
    )));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
