//! Stateless frame rendering from the projected view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use remote_tictactoe::{BoardView, CellView, Player};

/// Draws one frame. Everything on screen comes from the view; no game state
/// is read back from what was drawn.
pub fn draw(frame: &mut Frame, view: &BoardView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Remote Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], view);

    let status = Paragraph::new(view.status_line.as_str())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    draw_help(frame, chunks[3], view.restart_enabled);
}

fn draw_board(frame: &mut Frame, area: Rect, view: &BoardView) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    draw_row(frame, rows[0], view, 0);
    draw_separator(frame, rows[1]);
    draw_row(frame, rows[2], view, 3);
    draw_separator(frame, rows[3]);
    draw_row(frame, rows[4], view, 6);
}

fn draw_row(frame: &mut Frame, area: Rect, view: &BoardView, start: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    draw_cell(frame, cols[0], view.cells[start], start);
    draw_separator_vertical(frame, cols[1]);
    draw_cell(frame, cols[2], view.cells[start + 1], start + 1);
    draw_separator_vertical(frame, cols[3]);
    draw_cell(frame, cols[4], view.cells[start + 2], start + 2);
}

fn draw_cell(frame: &mut Frame, area: Rect, cell: CellView, pos: usize) {
    let (symbol, base_style) = match cell.mark {
        None => (
            format!("{}", pos + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Some(Player::Human) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Some(Player::Opponent) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if cell.highlighted {
        base_style.bg(Color::Yellow).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(symbol, style)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_help(frame: &mut Frame, area: Rect, restart_enabled: bool) {
    let restart_style = if restart_enabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
    };

    let help = Line::from(vec![
        Span::styled("1-9: Move | ", Style::default().fg(Color::DarkGray)),
        Span::styled("R: Restart", restart_style),
        Span::styled(" | S: Engine starts | Q: Quit", Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph = Paragraph::new(help).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
