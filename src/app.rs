//! Terminal host: event loop, keyboard-driven fields and the side panel

use crate::animation::FrameQueue;
use crate::config::SceneConfig;
use crate::controller::Controller;
use crate::error::{AppError, Result};
use crate::graphics::Canvas;
use crate::input::{FieldEvent, FieldId, Form, InputFields};
use crate::report::{Outputs, SharedLabel};
use crate::surface::Surface;
use crossterm::{
    cursor::{self, MoveTo},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{debug, warn};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

/// Columns reserved right of the canvas for fields and positions
const PANEL_WIDTH: u16 = 36;
const MIN_CANVAS_COLS: u16 = 20;
const MIN_CANVAS_ROWS: u16 = 10;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Picks the canvas grid for a `cols` x `rows` terminal.
///
/// Terminal cells are about twice as tall as they are wide, so the grid keeps
/// two columns per row for a square surface.
pub fn canvas_grid(cols: u16, rows: u16, surface: (f64, f64)) -> Result<(usize, usize)> {
    let too_small = AppError::TerminalTooSmall {
        cols,
        rows,
        min_cols: PANEL_WIDTH + 1 + MIN_CANVAS_COLS,
        min_rows: MIN_CANVAS_ROWS,
    };

    let available_cols = f64::from(cols.saturating_sub(PANEL_WIDTH + 1));
    let columns_per_row = 2.0 * surface.0 / surface.1;
    if !columns_per_row.is_finite() || columns_per_row <= 0.0 {
        return Err(too_small);
    }

    let mut grid_rows = f64::from(rows);
    let mut grid_cols = (grid_rows * columns_per_row).floor();
    if grid_cols > available_cols {
        grid_cols = available_cols;
        grid_rows = (grid_cols / columns_per_row).floor();
    }

    if grid_cols < f64::from(MIN_CANVAS_COLS) || grid_rows < f64::from(MIN_CANVAS_ROWS) {
        return Err(too_small);
    }
    Ok((grid_cols as usize, grid_rows as usize))
}

/// Application state
pub struct App {
    controller: Controller<Canvas, Form, FrameQueue>,
    /// Loop-side handle of the controller's frame requests
    frames: FrameQueue,
    /// Reported corner positions, in `Corner::ALL` order
    labels: [SharedLabel; 5],
    started: Instant,
    /// Wipe the whole screen before the next draw
    needs_clear: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: SceneConfig, surface: (f64, f64), grid: (usize, usize), form: Form) -> Self {
        let (outputs, labels) = Outputs::shared();
        let frames = FrameQueue::new();
        let canvas = Canvas::new(surface.0, surface.1, grid.0, grid.1);
        let controller = Controller::new(canvas, form, outputs, frames.clone(), config);
        App {
            controller,
            frames,
            labels,
            started: Instant::now(),
            needs_clear: true,
            should_quit: false,
        }
    }

    pub fn start(&mut self) {
        self.controller.start();
    }

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Runs the pending frame callback, if any. Returns whether one ran.
    pub fn tick(&mut self) -> bool {
        if self.frames.take() {
            let now = self.now_ms();
            self.controller.on_frame(now);
            true
        } else {
            false
        }
    }

    /// Handles a terminal event. Returns whether the screen needs a redraw.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key(key);
                true
            }
            Event::Resize(cols, rows) => {
                match canvas_grid(cols, rows, self.controller.surface().size()) {
                    Ok((grid_cols, grid_rows)) => {
                        debug!("canvas resized to {grid_cols}x{grid_rows} cells");
                        self.controller
                            .surface_mut()
                            .resize_grid(grid_cols, grid_rows);
                        self.controller.redraw();
                    }
                    Err(e) => warn!("{e}; keeping the previous canvas size"),
                }
                self.needs_clear = true;
                true
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Enter => {
                let now = self.now_ms();
                self.controller.trigger_rotation(now);
            }
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Backspace => self.edit(|form, field| form.pop_char(field)),
            KeyCode::Char(ch) => self.edit(|form, field| {
                form.push_char(field, ch);
                true
            }),
            _ => {}
        }
    }

    /// Blurs the focused field and focuses its neighbour
    fn move_focus(&mut self, forward: bool) {
        let current = self.controller.inputs().focused();
        if let Some(field) = current {
            self.controller.handle_field_event(field, FieldEvent::Blur);
        }

        let next = match (current, forward) {
            (Some(field), true) => field.next(),
            (Some(field), false) => field.prev(),
            (None, true) => FieldId::TranslateX,
            (None, false) => FieldId::PivotY,
        };
        self.controller.inputs_mut().set_focus(Some(next));
        self.controller.handle_field_event(next, FieldEvent::Focus);
    }

    /// Edits the focused field and reports the change as an input event
    fn edit(&mut self, edit: impl FnOnce(&mut Form, FieldId) -> bool) {
        let Some(field) = self.controller.inputs().focused() else {
            return;
        };
        if edit(self.controller.inputs_mut(), field) {
            self.controller.handle_field_event(field, FieldEvent::Input);
        }
    }

    fn panel_lines(&self) -> Vec<String> {
        let form = self.controller.inputs();
        let mut lines = vec!["2D affine transform".to_string(), String::new()];

        for field in FieldId::ALL {
            let focused = form.focused() == Some(field);
            lines.push(format!(
                "{} {:<14}{}{}",
                if focused { '>' } else { ' ' },
                format!("{}:", field.label()),
                form.text(field),
                if focused { "_" } else { "" }
            ));
        }

        lines.push(String::new());
        lines.extend(self.labels.iter().map(SharedLabel::text));
        lines.push(String::new());

        let state = if self.controller.mode().is_animating() {
            "rotating"
        } else {
            "idle"
        };
        lines.push(format!(
            "Degree: {:.2} ({state})",
            self.controller.params().degree
        ));
        lines.push(String::new());
        lines.push("Tab/Up/Down  move between fields".to_string());
        lines.push("Enter        rotate 360°".to_string());
        lines.push("Esc          quit".to_string());
        lines
    }

    pub fn draw<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.needs_clear {
            queue!(out, Clear(ClearType::All))?;
            self.needs_clear = false;
        }

        let canvas = self.controller.surface();
        canvas.present(out)?;

        let left = canvas.grid_size().0 as u16 + 1;
        for (row, line) in self.panel_lines().iter().enumerate() {
            let line: String = line.chars().take(PANEL_WIDTH as usize).collect();
            queue!(
                out,
                MoveTo(left, row as u16),
                Clear(ClearType::UntilNewLine),
                Print(line)
            )?;
        }
        out.flush()
    }
}

/// Run the terminal application
pub fn run(config: SceneConfig, surface: (f64, f64), form: Form) -> Result<()> {
    let size = termsize::get().ok_or(AppError::UnknownTerminalSize)?;
    let grid = canvas_grid(size.cols, size.rows, surface)?;
    let mut app = App::new(config, surface, grid, form);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let result = run_loop(&mut stdout, &mut app);

    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, cursor::Show)?;

    result
}

fn run_loop(out: &mut Stdout, app: &mut App) -> Result<()> {
    app.start();
    let mut dirty = true;

    loop {
        dirty |= app.tick();

        if dirty {
            app.draw(out)?;
            dirty = false;
        }

        if event::poll(FRAME_INTERVAL)? {
            dirty |= app.handle_event(event::read()?);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn app() -> App {
        let mut app = App::new(SceneConfig::default(), (400.0, 400.0), (40, 20), Form::default());
        app.start();
        app
    }

    #[test]
    fn grid_keeps_two_columns_per_row() {
        assert_eq!(canvas_grid(200, 40, (400.0, 400.0)).unwrap(), (80, 40));
        // Narrow terminals shrink the rows to match
        assert_eq!(canvas_grid(97, 40, (400.0, 400.0)).unwrap(), (60, 30));
        assert!(matches!(
            canvas_grid(40, 40, (400.0, 400.0)),
            Err(AppError::TerminalTooSmall { .. })
        ));
    }

    #[test]
    fn typing_into_a_focused_field_updates_positions() {
        let mut app = app();
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.controller.inputs().focused(), Some(FieldId::TranslateX));
        assert_eq!(app.controller.inputs().text(FieldId::TranslateX), "");

        app.handle_event(key(KeyCode::Char('7')));
        app.handle_event(key(KeyCode::Char('5')));
        assert_eq!(app.controller.params().translate_x, 75.0);
        assert_eq!(app.labels[0].text(), "Left Bottom: 75 / 0");
    }

    #[test]
    fn leaving_an_empty_field_restores_zero() {
        let mut app = app();
        app.handle_event(key(KeyCode::Tab));
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.controller.inputs().text(FieldId::TranslateX), "0");
        assert_eq!(app.controller.inputs().focused(), Some(FieldId::TranslateY));
    }

    #[test]
    fn typing_without_focus_is_ignored() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('9')));
        assert_eq!(*app.controller.inputs(), Form::default());
    }

    #[test]
    fn enter_starts_one_rotation() {
        let mut app = app();
        app.handle_event(key(KeyCode::Enter));
        assert!(app.controller.mode().is_animating());
        assert!(app.tick());
        app.handle_event(key(KeyCode::Enter));
        assert!(app.controller.mode().is_animating());
    }

    #[test]
    fn escape_quits() {
        let mut app = app();
        app.handle_event(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn draw_writes_panel_and_canvas() {
        let mut app = app();
        let mut out = Vec::new();
        app.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Center: 50 / 50"));
        assert!(text.contains("Translate X:"));
        assert!(text.contains('█'));
    }
}
