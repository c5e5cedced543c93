use chrono::{Datelike, Timelike};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use menuboard_client::display::{BoardView, RotationPhase};
use menuboard_core::DishBadge;

use crate::app::App;
use crate::theme::Palette;

pub const HEADER_ROWS: u16 = 4;
pub const FOOTER_ROWS: u16 = 3;

const MONTHS: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа", "сентября", "октября",
    "ноября", "декабря",
];

pub fn render(frame: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.board.theme);
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.background), area);
    render_particles(frame, app, &palette, area);

    let chunks = Layout::default()
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Min(1),
            Constraint::Length(FOOTER_ROWS),
        ])
        .split(area);

    render_header(frame, app, &palette, chunks[0]);
    render_board(frame, app, &palette, chunks[1]);
    render_footer(frame, app, &palette, chunks[2]);
    render_promo(frame, app, &palette, area);
}

/// Rows available to the board for a terminal of `height` rows.
pub fn viewport_rows(height: u16) -> u16 {
    height.saturating_sub(HEADER_ROWS + FOOTER_ROWS)
}

/// Particles go straight into the buffer before the board, so board text
/// draws over them and blank cells keep them.
fn render_particles(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let Some(kind) = app.particles.kind() else {
        return;
    };
    let buf = frame.buffer_mut();
    for position in app.particles.visible(app.now) {
        let col = area.x + (position.x * f64::from(area.width)) as u16;
        let row = area.y + (position.y * f64::from(area.height)) as u16;
        if let Some(cell) = buf.cell_mut((col, row)) {
            let style = palette.particles[position.layer.min(palette.particles.len() - 1)];
            cell.set_char(kind.glyph(position.layer)).set_style(style);
        }
    }
}

fn render_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(palette.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).split(inner);

    let title = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" №1 ", palette.section),
            Span::styled("  СТОЛОВАЯ", palette.title),
        ]),
        Line::from(Span::styled("ВКУСНО • ПОЛЕЗНО • ПО-ДОМАШНЕМУ", palette.muted)),
    ]);
    frame.render_widget(title, halves[0]);

    let t = app.local_time;
    let month = MONTHS[t.month0() as usize % MONTHS.len()];
    let clock = Paragraph::new(vec![
        Line::from(Span::styled(format!("{}!", app.board.greeting.text()), palette.accent)),
        Line::from(Span::styled(format!("{:02}:{:02}", t.hour(), t.minute()), palette.title)),
        Line::from(Span::styled(format!("{} {}", t.day(), month), palette.muted)),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(clock, halves[1]);
}

fn badge_label(badge: DishBadge) -> Option<&'static str> {
    match badge {
        DishBadge::None => None,
        DishBadge::New => Some("НОВИНКА"),
        DishBadge::Hit => Some("ХИТ"),
        DishBadge::Spicy => Some("ОСТРОЕ"),
        DishBadge::Vegan => Some("ВЕГАН"),
    }
}

/// Lines of the scrolling board body.
pub fn board_lines(board: &BoardView, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for section in &board.sections {
        lines.push(Line::from(Span::styled(
            format!(" {} ", section.title.to_uppercase()),
            palette.section,
        )));
        lines.push(Line::default());

        for dish in &section.dishes {
            let mut spans = vec![Span::styled(format!("  {}", dish.name), palette.dish)];
            if let Some(label) = badge_label(dish.badge) {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(format!("[{}]", label), palette.accent));
            }
            spans.push(Span::raw("   "));
            match dish.discount_price {
                Some(discount) => {
                    spans.push(Span::styled(format!("{} ₽", dish.price), palette.old_price));
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(format!("{} ₽", discount), palette.accent));
                }
                None => spans.push(Span::styled(format!("{} ₽", dish.price), palette.price)),
            }
            if dish.sold_out {
                spans.push(Span::raw("  "));
                spans.push(Span::styled("ЗАКОНЧИЛОСЬ", palette.sold_out));
            }

            let mut line = Line::from(spans);
            if dish.sold_out {
                line = line.patch_style(palette.muted.add_modifier(Modifier::DIM));
            }
            lines.push(line);

            if !dish.description.trim().is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("    {}", dish.description.trim()),
                    palette.description,
                )));
            }
        }
        lines.push(Line::default());
    }
    lines
}

pub fn board_height(board: &BoardView) -> u16 {
    let palette = Palette::for_theme(board.theme);
    u16::try_from(board_lines(board, &palette).len()).unwrap_or(u16::MAX)
}

fn render_board(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let body = Paragraph::new(board_lines(&app.board, palette)).scroll((app.scroll_rows, 0));
    frame.render_widget(body, area);
}

fn render_footer(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        app.board.footer.to_uppercase(),
        palette.muted,
    )))
    .block(Block::default().borders(Borders::TOP).border_style(palette.border))
    .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

fn render_promo(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let Some(view) = app.rotation.current() else {
        return;
    };
    let promo = view.promotion;

    let style = match view.phase {
        RotationPhase::Hiding => palette.promo.add_modifier(Modifier::DIM),
        _ => palette.promo,
    };

    let popup = centered_rect(60, 40, area);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(Span::styled(promo.title.to_uppercase(), style.add_modifier(Modifier::BOLD))),
        Line::default(),
        Line::from(Span::styled(promo.description.clone(), style)),
    ];
    if let Some(url) = &promo.image_url {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(url.clone(), style.add_modifier(Modifier::ITALIC))));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" АКЦИЯ ")
        .title_alignment(Alignment::Center)
        .style(style);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use menuboard_core::MenuDocument;

    #[test]
    fn test_board_height_counts_sections_and_dishes() {
        let board = BoardView::build(&MenuDocument::seed(), 10);
        let height = board_height(&board) as usize;
        let min = board.sections.len() * 3 + board.dish_count();
        assert!(height >= min);
    }

    #[test]
    fn test_theme_particles_are_drawn() {
        use menuboard_core::Theme;
        use menuboard_shared::config::{ClientConfig, RotationSettings, ScrollSettings};
        use ratatui::{backend::TestBackend, Terminal};

        let config = ClientConfig {
            remote_url: None,
            cache_dir: "unused".into(),
            poll_interval_seconds: 120,
            request_timeout_seconds: 15,
            frame_millis: 50,
            rotation: RotationSettings::default(),
            scroll: ScrollSettings::default(),
        };
        let mut doc = MenuDocument::seed();
        doc.theme = Theme::NewYear;
        let mut app = App::new(&config, doc, 0);
        app.tick(30_000, 10);

        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let drawn = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .filter(|cell| matches!(cell.symbol(), "❄" | "*" | "·"))
            .count();
        assert!(drawn > 0);
    }

    #[test]
    fn test_viewport_leaves_room_for_chrome() {
        assert_eq!(viewport_rows(40), 33);
        assert_eq!(viewport_rows(3), 0);
    }
}
