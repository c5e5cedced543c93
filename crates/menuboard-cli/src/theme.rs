use ratatui::style::{Color, Modifier, Style};

use menuboard_core::Theme as BoardTheme;

/// Style tokens for the board, one palette per display theme
pub struct Palette {
    pub background: Style,
    pub title: Style,
    pub accent: Style,
    pub section: Style,
    pub dish: Style,
    pub description: Style,
    pub price: Style,
    pub old_price: Style,
    pub sold_out: Style,
    pub muted: Style,
    pub border: Style,
    pub promo: Style,
    /// Particle styles, nearest layer first
    pub particles: [Style; 3],
}

impl Palette {
    pub fn for_theme(theme: BoardTheme) -> Self {
        let (accent, particle, dark) = match theme {
            BoardTheme::Default => (Color::Red, Color::Reset, false),
            BoardTheme::NewYear => (Color::Cyan, Color::White, true),
            BoardTheme::Spring => (Color::Green, Color::Rgb(251, 207, 232), false),
            BoardTheme::Autumn => (Color::Rgb(194, 65, 12), Color::Rgb(234, 88, 12), false),
        };
        let (bg, fg, dim) = if dark {
            (Color::Rgb(15, 23, 42), Color::White, Color::Rgb(147, 197, 253))
        } else {
            (Color::Rgb(248, 250, 252), Color::Rgb(15, 23, 42), Color::Rgb(148, 163, 184))
        };

        let base = Style::default().bg(bg);
        Self {
            background: base.fg(fg),
            title: base.fg(fg).add_modifier(Modifier::BOLD),
            accent: base.fg(accent).add_modifier(Modifier::BOLD),
            section: Style::default()
                .fg(Color::White)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            dish: base.fg(fg).add_modifier(Modifier::BOLD),
            description: base.fg(dim).add_modifier(Modifier::ITALIC),
            price: base.fg(if dark { accent } else { fg }).add_modifier(Modifier::BOLD),
            old_price: base.fg(dim).add_modifier(Modifier::CROSSED_OUT),
            sold_out: base.fg(Color::Red).add_modifier(Modifier::BOLD),
            muted: base.fg(dim),
            border: base.fg(dim),
            promo: Style::default().fg(Color::White).bg(accent),
            particles: [
                base.fg(particle).add_modifier(Modifier::BOLD),
                base.fg(particle),
                base.fg(particle).add_modifier(Modifier::DIM),
            ],
        }
    }
}
