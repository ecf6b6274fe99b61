use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use ratatui::{DefaultTerminal, Frame};
use tessera_background::TriangleBackground;
use tessera_config::{Config, ConfigError};

mod logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init();

    let config = resolve_config(Config::load())?;
    tracing::info!(?config, "starting tessera");

    let terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
        .map_err(Into::into)
        .and_then(|()| App::new(config).run(terminal));
    let cleanup = execute!(io::stdout(), DisableFocusChange, DisableMouseCapture);
    ratatui::restore();

    tracing::info!("stopped tessera");
    result?;
    cleanup?;
    Ok(())
}

/// Fall back to the defaults when the config file is malformed.
///
/// I/O failures other than a missing file are still reported.
fn resolve_config(loaded: Result<Config, ConfigError>) -> color_eyre::Result<Config> {
    match loaded {
        Ok(config) => Ok(config),
        Err(err @ (ConfigError::Parse(_) | ConfigError::Invalid(_))) => {
            tracing::warn!(%err, "ignoring config, using defaults");
            Ok(Config::default())
        }
        Err(err) => Err(err.into()),
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// The animated triangle background.
    background: TriangleBackground,
    /// Time budget of a single frame.
    frame_interval: Duration,
    /// Animation clock origin.
    started: Instant,
    /// When the next frame is due.
    next_frame: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let frame_interval = config.background.frame_interval();
        let now = Instant::now();
        Self {
            running: false,
            background: TriangleBackground::new(config.background),
            frame_interval,
            started: now,
            next_frame: now,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            if Instant::now() >= self.next_frame {
                terminal.draw(|frame| self.render(frame))?;
                self.next_frame += self.frame_interval;
                // Skip frames we could not keep up with instead of bursting
                let now = Instant::now();
                if self.next_frame < now {
                    self.next_frame = now + self.frame_interval;
                }
            }
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Milliseconds since the animation started.
    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let elapsed_ms = self.elapsed_ms();
        self.background.render(frame, elapsed_ms);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self.next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::FocusLost => self.background.clear_pointer(),
                Event::Resize(width, height) => self.on_resize(width, height),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            _ => {}
        }
    }

    /// Track the pointer. One terminal cell spans two pixel rows.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
            self.background
                .set_pointer(i32::from(mouse.column), i32::from(mouse.row) * 2);
        }
    }

    /// Rebuild the grid for the new size and restart the frame schedule.
    fn on_resize(&mut self, width: u16, height: u16) {
        tracing::debug!(width, height, "terminal resized");
        let elapsed_ms = self.elapsed_ms();
        self.background.resize_cells(width, height, elapsed_ms);
        self.next_frame = Instant::now();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventState, MouseButton};

    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_mouse_moves_pointer() {
        let mut app = App::new(Config::default());
        app.on_mouse_event(mouse(MouseEventKind::Moved, 10, 4));
        assert_eq!(app.background.pointer(), Some((10, 8)));

        app.on_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 3, 1));
        assert_eq!(app.background.pointer(), Some((3, 2)));

        // Clicks do not move the pointer
        app.on_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert_eq!(app.background.pointer(), Some((3, 2)));
    }

    #[test]
    fn test_quit_keys() {
        for (code, modifiers) in [
            (KeyCode::Char('q'), KeyModifiers::NONE),
            (KeyCode::Esc, KeyModifiers::NONE),
            (KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = App::new(Config::default());
            app.running = true;
            app.on_key_event(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            });
            assert!(!app.running);
        }

        let mut app = App::new(Config::default());
        app.running = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(app.running);
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let invalid = Config::from_toml_str("[background]\ncols = 1000000");
        assert!(matches!(invalid, Err(ConfigError::Invalid(_))));
        assert_eq!(resolve_config(invalid).unwrap(), Config::default());

        let unparsable = Config::from_toml_str("[background]\nfps = \"fast\"");
        assert!(matches!(unparsable, Err(ConfigError::Parse(_))));
        assert_eq!(resolve_config(unparsable).unwrap(), Config::default());

        let custom = Config::from_toml_str("[background]\nfps = 12").unwrap();
        assert_eq!(resolve_config(Ok(custom.clone())).unwrap(), custom);
    }

    #[test]
    fn test_unreadable_config_is_an_error() {
        let dir = std::env::temp_dir();
        // Reading a directory as a file fails with something other than NotFound
        let loaded = Config::load_from(&dir);
        assert!(matches!(loaded, Err(ConfigError::Io { .. })));
        assert!(resolve_config(loaded).is_err());
    }

    #[test]
    fn test_resize_rebuilds_grid() {
        let mut app = App::new(Config::default());
        app.on_resize(40, 12);
        let layout = app.background.layout();
        assert_eq!((layout.width, layout.height), (40, 24));
        assert_eq!(layout.cols % 2, 0);
        assert_eq!(layout.rows % 2, 0);
    }
}
