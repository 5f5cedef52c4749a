//! Runner screen rendering.
//!
//! Uses a cell buffer for per-character color control. Every command in
//! the frame's draw list is stamped into a 2D grid in order, so later
//! commands cover earlier ones, then the grid is emitted row-by-row as
//! Paragraph widgets.

use super::game_common::{
    create_game_layout, render_info_panel_frame, render_status_bar, render_too_small,
};
use super::viewport::Viewport;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use trex_run::runner::{
    speed_for_score, GamePhase, MenuButton, ObstacleKind, RenderCommand, RenderFrame, Sprite,
    TextAnchor, TextColor, WorldRect,
};

const INFO_PANEL_WIDTH: u16 = 20;
pub const MIN_WIDTH: u16 = 50;
pub const MIN_HEIGHT: u16 = 14;

const GROUND_CHAR: char = '▓';
const GROUND_SUB: char = '░';
const RUNNER_CHAR: char = '█';
const RUNNER_COLOR: Color = Color::LightYellow;
const BUSH_COLOR: Color = Color::Rgb(60, 140, 60);
const ROCK_COLOR: Color = Color::Rgb(120, 100, 80);

/// Cloud decorations of one background tile, in tile-relative world units.
const CLOUDS: [(f64, f64, &str); 4] = [
    (90.0, 40.0, "~~~~"),
    (330.0, 90.0, "~~~"),
    (520.0, 30.0, "~~~~~"),
    (700.0, 120.0, "~~"),
];

/// Ground texture period in world units.
const GROUND_STRIPE: f64 = 40.0;

/// Render a frame. Returns the play field mapping for pointer translation,
/// or `None` when the terminal is too small to draw it.
pub fn render_runner_scene(
    frame: &mut Frame,
    area: Rect,
    render: &RenderFrame,
    world: (f64, f64),
) -> Option<Viewport> {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area, MIN_WIDTH, MIN_HEIGHT);
        return None;
    }

    let layout = create_game_layout(frame, area, " T-Rex Run ", Color::LightYellow, INFO_PANEL_WIDTH);
    let viewport = Viewport::new(layout.content, world.0, world.1);

    render_play_field(frame, &viewport, render);
    render_status_bar_content(frame, layout.status_bar, render.phase);
    render_info_panel(frame, layout.info_panel, render);

    Some(viewport)
}

/// Cell in the render buffer with foreground and background colors.
#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

struct CellBuffer {
    rows: Vec<Vec<Cell>>,
}

impl CellBuffer {
    fn new(width: u16, height: u16) -> Self {
        Self {
            rows: vec![vec![Cell::default(); width as usize]; height as usize],
        }
    }

    fn set(&mut self, row: i32, col: i32, cell: Cell) {
        if row < 0 || col < 0 {
            return;
        }
        if let Some(slot) = self
            .rows
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        {
            *slot = cell;
        }
    }

    fn put_str(&mut self, row: i32, col: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set(
                row,
                col + i as i32,
                Cell {
                    ch,
                    fg,
                    bg: Color::Reset,
                },
            );
        }
    }
}

fn render_play_field(frame: &mut Frame, viewport: &Viewport, render: &RenderFrame) {
    let area = viewport.area;
    let mut buffer = CellBuffer::new(area.width, area.height);

    for command in &render.commands {
        match command {
            RenderCommand::Sprite {
                sprite,
                x,
                y,
                width,
                height,
            } => draw_sprite(&mut buffer, viewport, *sprite, WorldRect::new(*x, *y, *width, *height)),
            RenderCommand::Text {
                text,
                x,
                y,
                color,
                anchor,
            } => draw_text(&mut buffer, viewport, text, *x, *y, *color, *anchor),
            RenderCommand::Button { button, rect } => draw_button(&mut buffer, viewport, *button, rect),
        }
    }

    // ── Render buffer to terminal ─────────────────────────────────────
    for (row_idx, row_data) in buffer.rows.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn draw_sprite(buffer: &mut CellBuffer, viewport: &Viewport, sprite: Sprite, rect: WorldRect) {
    match sprite {
        Sprite::Background => draw_background_tile(buffer, viewport, rect),
        Sprite::Runner { frame } => draw_runner(buffer, viewport, rect, frame),
        Sprite::Obstacle(kind) => {
            let (ch, fg) = match kind {
                ObstacleKind::Bush => ('*', BUSH_COLOR),
                ObstacleKind::Rock => ('#', ROCK_COLOR),
            };
            fill(buffer, viewport, &rect, Cell { ch, fg, bg: Color::Reset });
        }
    }
}

/// One tile: its clouds plus the part of the ground strip it covers.
fn draw_background_tile(buffer: &mut CellBuffer, viewport: &Viewport, tile: WorldRect) {
    for (dx, dy, cloud) in CLOUDS {
        buffer.put_str(
            viewport.row_of(dy),
            viewport.column_of(tile.x + dx),
            cloud,
            Color::DarkGray,
        );
    }

    let ground_row = viewport.sky_rows() as i32;
    for col in 0..viewport.area.width as i32 {
        let wx = viewport.column_center(col);
        if wx < tile.x || wx >= tile.x + tile.width {
            continue;
        }
        let stripe = ((wx - tile.x) / GROUND_STRIPE) as i64;
        let ch = if stripe % 5 == 0 { GROUND_SUB } else { GROUND_CHAR };
        buffer.set(
            ground_row,
            col,
            Cell {
                ch,
                fg: Color::Rgb(100, 80, 50),
                bg: Color::Reset,
            },
        );
    }
}

/// Solid body; the bottom row alternates legs between animation frames.
fn draw_runner(buffer: &mut CellBuffer, viewport: &Viewport, rect: WorldRect, frame: usize) {
    let rows = viewport.rows(rect.y, rect.height);
    let cols = viewport.columns(rect.x, rect.width);
    let feet = rows.end - 1;
    for row in rows.clone() {
        for (dx, col) in cols.clone().enumerate() {
            let ch = if row == feet && rows.len() > 1 {
                match (frame % 2, dx % 2) {
                    (0, 0) => '/',
                    (1, 1) => '\\',
                    _ => ' ',
                }
            } else {
                RUNNER_CHAR
            };
            buffer.set(
                row,
                col,
                Cell {
                    ch,
                    fg: RUNNER_COLOR,
                    bg: Color::Reset,
                },
            );
        }
    }
}

fn fill(buffer: &mut CellBuffer, viewport: &Viewport, rect: &WorldRect, cell: Cell) {
    for row in viewport.rows(rect.y, rect.height) {
        for col in viewport.columns(rect.x, rect.width) {
            buffer.set(row, col, cell);
        }
    }
}

fn draw_text(
    buffer: &mut CellBuffer,
    viewport: &Viewport,
    text: &str,
    x: f64,
    y: f64,
    color: TextColor,
    anchor: TextAnchor,
) {
    let len = text.chars().count() as i32;
    let col = match anchor {
        TextAnchor::Left => viewport.column_of(x),
        TextAnchor::Center => viewport.column_of(x) - len / 2,
    };
    let fg = match color {
        TextColor::Plain => Color::White,
        TextColor::Alert => Color::LightRed,
    };
    buffer.put_str(viewport.row_of(y), col, text, fg);
}

/// Boxed button with its label and hotkey on the middle row.
fn draw_button(buffer: &mut CellBuffer, viewport: &Viewport, button: MenuButton, rect: &WorldRect) {
    let fg = match button {
        MenuButton::Restart => Color::LightGreen,
        MenuButton::Quit => Color::LightRed,
    };
    let rows = viewport.rows(rect.y, rect.height);
    let cols = viewport.columns(rect.x, rect.width);
    let fill_cell = Cell {
        ch: ' ',
        fg,
        bg: Color::Rgb(30, 30, 30),
    };
    for row in rows.clone() {
        for col in cols.clone() {
            buffer.set(row, col, fill_cell);
        }
    }

    let label = format!(
        "{} [{}]",
        button.label(),
        button.hotkey().to_ascii_uppercase()
    );
    let len = label.chars().count() as i32;
    let label_row = rows.start + (rows.len() as i32 - 1) / 2;
    let label_col = cols.start + (cols.len() as i32 - len).max(0) / 2;
    for (i, ch) in label.chars().enumerate() {
        let col = label_col + i as i32;
        if col >= cols.end {
            break;
        }
        buffer.set(label_row, col, Cell { ch, ..fill_cell });
    }
}

/// Render the status bar below the play field.
fn render_status_bar_content(frame: &mut Frame, area: Rect, phase: GamePhase) {
    match phase {
        GamePhase::Playing => render_status_bar(
            frame,
            area,
            "Run!",
            Color::LightYellow,
            &[("[Space/Up]", "Jump"), ("[Esc/Q]", "Quit")],
        ),
        GamePhase::GameOver => render_status_bar(
            frame,
            area,
            "Game Over",
            Color::LightRed,
            &[("[Y/Click]", "Restart"), ("[N/Esc]", "Quit")],
        ),
        GamePhase::Terminated => render_status_bar(frame, area, "Bye", Color::DarkGray, &[]),
    }
}

/// Render the info panel on the right side.
fn render_info_panel(frame: &mut Frame, area: Rect, render: &RenderFrame) {
    let inner = render_info_panel_frame(frame, area);

    let (state, state_color) = match render.phase {
        GamePhase::Playing => ("Running", Color::LightGreen),
        GamePhase::GameOver => ("Crashed", Color::LightRed),
        GamePhase::Terminated => ("Done", Color::DarkGray),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                render.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Speed: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:.0}", speed_for_score(render.score)),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("State: ", Style::default().fg(Color::DarkGray)),
            Span::styled(state, Style::default().fg(state_color)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled(format!(" {} ", RUNNER_CHAR), Style::default().fg(RUNNER_COLOR)),
            Span::styled("Runner", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" * ", Style::default().fg(BUSH_COLOR)),
            Span::styled(ObstacleKind::Bush.name(), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" # ", Style::default().fg(ROCK_COLOR)),
            Span::styled(ObstacleKind::Rock.name(), Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
