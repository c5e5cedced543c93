use chrono::{DateTime, Local, Timelike};

use menuboard_client::display::{AutoScroll, BoardView, ParticleField, RotationEngine};
use menuboard_core::MenuDocument;
use menuboard_shared::config::ClientConfig;
use menuboard_shared::now_millis;

use crate::ui;

/// Scroll steps are configured in pixels; one terminal row counts as this many.
pub const ROW_PIXELS: f64 = 16.0;

/// Display state for the TUI loop
pub struct App {
    pub document: MenuDocument,
    pub board: BoardView,
    pub rotation: RotationEngine,
    pub scroll: AutoScroll,
    pub scroll_rows: u16,
    pub particles: ParticleField,
    /// Display clock at the last tick
    pub now: u64,
    pub local_time: DateTime<Local>,
    pub should_quit: bool,
    /// Rows the board needs, recomputed when the document changes
    content_rows: u16,
}

impl App {
    pub fn new(config: &ClientConfig, document: MenuDocument, now: u64) -> Self {
        let local_time = Local::now();
        let board = BoardView::build(&document, local_time.hour());
        let mut rotation = RotationEngine::new(&config.rotation, now);
        rotation.set_promotions(document.promotions.iter().cloned(), now);

        Self {
            content_rows: ui::board_height(&board),
            board,
            rotation,
            scroll: AutoScroll::new(config.scroll.clone(), now),
            scroll_rows: 0,
            particles: ParticleField::new(document.theme, now_millis().unsigned_abs()),
            now,
            local_time,
            should_quit: false,
            document,
        }
    }

    /// A newer document arrived from the poll task.
    pub fn apply_document(&mut self, document: MenuDocument, now: u64) {
        self.rotation.set_promotions(document.promotions.iter().cloned(), now);
        self.particles.set_theme(document.theme);
        self.board = BoardView::build(&document, self.local_time.hour());
        self.content_rows = ui::board_height(&self.board);
        self.scroll.reset(now);
        self.document = document;
    }

    /// Advance clocks and machines for one frame.
    pub fn tick(&mut self, now: u64, viewport_rows: u16) {
        let local_time = Local::now();
        if local_time.hour() != self.local_time.hour() {
            self.board = BoardView::build(&self.document, local_time.hour());
        }
        self.local_time = local_time;
        self.now = now;

        self.rotation.tick(now);

        let max_scroll = f64::from(self.content_rows.saturating_sub(viewport_rows)) * ROW_PIXELS;
        let position = self.scroll.frame(now, max_scroll);
        self.scroll_rows = (position / ROW_PIXELS).round() as u16;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
