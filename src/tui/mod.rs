pub mod widgets;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};
use ratatui::DefaultTerminal;

use crate::color::{normalize_hue, Hsl};
use crate::pipeline::harmony::{generate_palette, random_base, Harmony, Origin, Palette};

use widgets::PaletteWidget;

const HUE_STEP: f64 = 5.0;
const PERCENT_STEP: f64 = 5.0;

/// State for the interactive palette browser.
pub struct TuiApp {
    pub base: Hsl,
    pub harmony: Harmony,
    pub origin: Origin,
    pub palette: Palette,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(base: Hsl, harmony: Harmony, origin: Origin) -> Self {
        let base = base.normalized();
        Self {
            base,
            harmony,
            origin,
            palette: build(base, harmony, origin),
            should_quit: false,
        }
    }

    fn regenerate(&mut self) {
        self.palette = build(self.base, self.harmony, self.origin);
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Right | KeyCode::Tab => self.harmony = self.harmony.next(),
            KeyCode::Left | KeyCode::BackTab => self.harmony = self.harmony.prev(),
            KeyCode::Up => self.base.h = normalize_hue(self.base.h + HUE_STEP),
            KeyCode::Down => self.base.h = normalize_hue(self.base.h - HUE_STEP),
            KeyCode::Char('S') => self.base.s = (self.base.s + PERCENT_STEP).min(100.0),
            KeyCode::Char('s') => self.base.s = (self.base.s - PERCENT_STEP).max(0.0),
            KeyCode::Char('L') => self.base.l = (self.base.l + PERCENT_STEP).min(100.0),
            KeyCode::Char('l') => self.base.l = (self.base.l - PERCENT_STEP).max(0.0),
            KeyCode::Char('r') => {
                self.base = random_base(&mut rand::rng());
                self.origin = Origin::Random;
            }
            _ => return,
        }
        self.regenerate();
    }

    fn status_line(&self) -> Line<'static> {
        Line::from(format!(
            "  base hsl({:.0}, {:.0}%, {:.0}%)  harmony {}",
            self.base.h, self.base.s, self.base.l, self.harmony
        ))
    }

    fn draw(&self, frame: &mut Frame) {
        let [palette_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(8),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(frame.area());

        frame.render_widget(PaletteWidget::new(&self.palette), palette_area);
        frame.render_widget(Paragraph::new(self.status_line()), status_area);
        frame.render_widget(
            Paragraph::new(
                "  ←/→ harmony   ↑/↓ hue   s/S saturation   l/L lightness   r random   q quit",
            )
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default()),
            help_area,
        );
    }
}

fn build(base: Hsl, harmony: Harmony, origin: Origin) -> Palette {
    let name = format!("hsl({:.0}, {:.0}%, {:.0}%) {}", base.h, base.s, base.l, harmony.label());
    generate_palette(name, base, harmony, origin)
}

/// Launch the TUI application.
pub fn run(mut app: TuiApp) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut TuiApp) -> Result<()> {
    while !app.should_quit {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;
        if let Event::Key(key) = event::read().context("failed to read terminal event")? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> TuiApp {
        TuiApp::new(Hsl::new(200.0, 70.0, 50.0), Harmony::Analogous, Origin::Seeded)
    }

    #[test]
    fn arrows_cycle_harmony() {
        let mut app = app();
        app.handle_key(KeyCode::Right);
        assert_eq!(app.harmony, Harmony::Monochrome);
        assert_eq!(app.palette.harmony, Harmony::Monochrome);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.harmony, Harmony::Analogous);
    }

    #[test]
    fn hue_wraps_around() {
        let mut app = TuiApp::new(Hsl::new(2.0, 70.0, 50.0), Harmony::Triad, Origin::Seeded);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.base.h, 357.0);
        app.handle_key(KeyCode::Up);
        assert_eq!(app.base.h, 2.0);
    }

    #[test]
    fn saturation_and_lightness_clamp() {
        let mut app = TuiApp::new(Hsl::new(0.0, 98.0, 3.0), Harmony::Triad, Origin::Seeded);
        app.handle_key(KeyCode::Char('S'));
        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.base.s, 100.0);
        assert_eq!(app.base.l, 0.0);
    }

    #[test]
    fn palette_follows_base() {
        let mut app = app();
        let before = app.palette.colors;
        app.handle_key(KeyCode::Up);
        assert_ne!(app.palette.colors, before);
        assert_eq!(
            app.palette.colors,
            crate::pipeline::harmony::generate(app.base, app.harmony)
        );
    }

    #[test]
    fn random_marks_origin() {
        let mut app = app();
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.origin, Origin::Random);
        assert_eq!(app.palette.origin, Origin::Random);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('x'));
        assert!(!app.should_quit);
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit);
    }
}
