//! Painting the terminal session onto the real terminal.
//!
//! [`layout`] turns session state into a list of styled rows and is pure, so
//! it is what the tests look at. [`paint`] only writes those rows out.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use knowme_core::{EntryKind, Terminal};
use knowme_terminal::group_thousands;
use knowme_types::theme::{Background, Theme};

/// How a row is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Decoration,
    Input,
    Output,
    Prompt,
    Hint,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub style: RowStyle,
    pub text: String,
}

impl Row {
    fn new(style: RowStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

pub fn theme_color(theme: Theme) -> Color {
    match theme {
        Theme::Green => Color::Rgb { r: 74, g: 222, b: 128 },
        Theme::Amber => Color::Rgb { r: 252, g: 211, b: 77 },
        Theme::Mono => Color::Rgb { r: 229, g: 229, b: 229 },
        Theme::Blue => Color::Rgb { r: 96, g: 165, b: 250 },
        Theme::Red => Color::Rgb { r: 248, g: 113, b: 113 },
    }
}

pub fn welcome_lines(user: &str, host: &str) -> Vec<String> {
    vec![
        "Booting terminal... done".to_string(),
        format!("Welcome to {user}@{host}. Type 'help' to begin."),
    ]
}

const HINTS: &str =
    "TAB = autocomplete · ↑/↓ = history · Ctrl+C = cancel · F2 = background · Esc = quit";

const MATRIX_GLYPHS: &[&str] = &["0", "1", "ｱ", "ｲ", "ｳ", "ｴ", "ｵ", "ｶ", "ｷ", "ﾊ", "ﾐ", "ﾑ"];

/// One animated row of the decorative background for animation `frame`.
pub fn decoration(background: Background, frame: u64, width: usize) -> String {
    match background {
        Background::Matrix => {
            let mut row = String::new();
            let mut used = 0;
            let mut i: u64 = 0;
            while used + 2 <= width {
                let idx = (i.wrapping_mul(7) ^ frame.wrapping_add(i * i)) as usize;
                let glyph = MATRIX_GLYPHS[idx % MATRIX_GLYPHS.len()];
                row.push_str(glyph);
                row.push(' ');
                used += glyph.width() + 1;
                i += 1;
            }
            row
        },
        Background::Grid => {
            let shift = (frame % 4) as usize;
            (0..width)
                .map(|x| if (x + shift) % 4 == 0 { '┼' } else { '─' })
                .collect()
        },
    }
}

/// Split `text` into rows at most `width` columns wide, keeping graphemes whole.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for g in text.graphemes(true) {
        let w = g.width();
        if used + w > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push_str(g);
        used += w;
    }
    rows.push(current);
    rows
}

/// Rows for a `width` x `height` screen: decoration, transcript tail,
/// prompt (or cancel hint) and footer.
pub fn layout(term: &Terminal, frame: u64, width: u16, height: u16) -> Vec<Row> {
    let width = usize::from(width.max(1));
    let height = usize::from(height);
    if height == 0 {
        return Vec::new();
    }

    let mut body = Vec::new();
    if term.transcript().is_empty() {
        for line in welcome_lines(term.user(), term.host()) {
            body.extend(wrap(&line, width).into_iter().map(|t| Row::new(RowStyle::Output, t)));
        }
    }
    for entry in term.transcript().entries() {
        let style = match entry.kind {
            EntryKind::Input => RowStyle::Input,
            EntryKind::Output => RowStyle::Output,
        };
        body.extend(wrap(&entry.text, width).into_iter().map(|t| Row::new(style, t)));
    }
    if term.is_busy() {
        body.push(Row::new(RowStyle::Hint, "Press Ctrl+C to cancel"));
    } else {
        let line = format!("{}{}", term.prompt(), term.input());
        body.extend(wrap(&line, width).into_iter().map(|t| Row::new(RowStyle::Prompt, t)));
    }

    let visits = term
        .visits()
        .map(group_thousands)
        .unwrap_or_else(|| "?".to_string());
    let footer = format!(
        "theme: {} · background: {} · visitors: {visits} · {HINTS}",
        term.theme(),
        term.background()
    );
    let footer_rows: Vec<Row> = wrap(&footer, width)
        .into_iter()
        .take(height.saturating_sub(1).max(1))
        .map(|t| Row::new(RowStyle::Footer, t))
        .collect();

    let mut rows = Vec::with_capacity(height);
    let has_decoration = height > footer_rows.len() + 1;
    if has_decoration {
        rows.push(Row::new(
            RowStyle::Decoration,
            decoration(term.background(), frame, width),
        ));
    }
    let room = height.saturating_sub(rows.len() + footer_rows.len());
    let skip = body.len().saturating_sub(room);
    rows.extend(body.into_iter().skip(skip));
    rows.extend(footer_rows);
    rows.truncate(height);
    rows
}

/// Screen position of the text cursor: the end of the last prompt row.
pub fn cursor_position(rows: &[Row]) -> Option<(u16, u16)> {
    let y = rows.iter().rposition(|r| r.style == RowStyle::Prompt)?;
    let x = rows[y].text.width();
    Some((u16::try_from(x).ok()?, u16::try_from(y).ok()?))
}

/// Write `rows` to `out`, top to bottom, overwriting the previous frame.
pub fn paint(out: &mut impl Write, rows: &[Row], theme: Theme) -> io::Result<()> {
    let accent = theme_color(theme);
    queue!(out, Hide)?;
    for (y, row) in rows.iter().enumerate() {
        let y = u16::try_from(y).unwrap_or(u16::MAX);
        queue!(out, MoveTo(0, y))?;
        match row.style {
            RowStyle::Decoration => {
                queue!(
                    out,
                    SetAttribute(Attribute::Dim),
                    SetForegroundColor(accent)
                )?;
            },
            RowStyle::Input => queue!(out, SetForegroundColor(Color::White))?,
            RowStyle::Output | RowStyle::Prompt => queue!(out, SetForegroundColor(accent))?,
            RowStyle::Hint => {
                queue!(
                    out,
                    SetAttribute(Attribute::Italic),
                    SetForegroundColor(Color::DarkGrey)
                )?;
            },
            RowStyle::Footer => queue!(out, SetForegroundColor(Color::DarkGrey))?,
        }
        queue!(
            out,
            Print(&row.text),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Clear(ClearType::UntilNewLine)
        )?;
    }
    let below = u16::try_from(rows.len()).unwrap_or(u16::MAX);
    queue!(out, MoveTo(0, below), Clear(ClearType::FromCursorDown))?;
    if let Some((x, y)) = cursor_position(rows) {
        queue!(out, MoveTo(x, y), Show)?;
    }
    out.flush()
}
