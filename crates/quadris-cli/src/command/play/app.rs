use std::time::Duration;

use anyhow::Context as _;
use crossterm::event::Event;
use quadris_engine::{Engine, EngineConfig, GameStats, PieceSeed};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    command::play::{
        PlayConfig,
        input::{self, Action},
    },
    tui::{App, RenderMode, Runtime},
    view::widgets::{KeyBindingDisplay, SessionDisplay},
};

#[derive(Debug)]
pub(crate) struct PlayApp {
    engine: Engine,
    fps: u32,
    show_ghost: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(config: &PlayConfig) -> anyhow::Result<Self> {
        let engine = match config.seed {
            Some(seed) => Engine::with_seed(config.engine, seed),
            None => Engine::new(config.engine),
        }
        .context("invalid engine configuration")?;
        Ok(Self {
            engine,
            fps: config.fps,
            show_ghost: config.show_ghost,
            is_exiting: false,
        })
    }

    pub(crate) fn seed(&self) -> PieceSeed {
        self.engine.source().seed()
    }

    pub(crate) fn engine_config(&self) -> &EngineConfig {
        self.engine.config()
    }

    pub(crate) fn stats(&self) -> &GameStats {
        self.engine.stats()
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Engine(command) => {
                if self.engine.apply(command) {
                    tracing::trace!(%command, "applied command");
                }
            }
            Action::Quit => self.is_exiting = true,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        let rate = f64::from(self.fps);
        runtime.set_tick_rate(rate);
        runtime.set_render_mode(RenderMode::throttled_from_rate(rate));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_press_event()
            && let Some(action) = input::action_for_key(key.code)
        {
            self.handle_action(action);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.engine.snapshot();
        let session_display = SessionDisplay::new(&snapshot, self.show_ghost);
        let help = KeyBindingDisplay::new(input::key_bindings(snapshot.state));

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(&session_display, main_area);
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
        self.engine.tick(elapsed);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent};

    use super::*;

    fn app() -> PlayApp {
        let config = PlayConfig {
            seed: Some("000102030405060708090a0b0c0d0e0f".parse().unwrap()),
            ..PlayConfig::default()
        };
        PlayApp::new(&config).unwrap()
    }

    fn press(app: &mut PlayApp, code: KeyCode) {
        let mut runtime = Runtime::new();
        app.handle_event(&mut runtime, Event::Key(KeyEvent::from(code)));
    }

    #[test]
    fn test_seed_is_kept() {
        let app = app();
        assert_eq!(app.seed().to_string(), "000102030405060708090a0b0c0d0e0f");
    }

    #[test]
    fn test_keys_drive_engine() {
        let mut app = app();
        let x = app.engine.active_piece().position().x();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.engine.active_piece().position().x(), x - 1);

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.stats().completed_pieces(), 1);

        press(&mut app, KeyCode::Char('p'));
        assert!(app.engine.is_paused());
        assert!(!app.should_exit());

        press(&mut app, KeyCode::Esc);
        assert!(app.should_exit());
    }

    #[test]
    fn test_update_feeds_gravity() {
        let mut app = app();
        let y = app.engine.active_piece().position().y();
        let mut runtime = Runtime::new();
        app.update(&mut runtime, Duration::from_millis(500));
        app.update(&mut runtime, Duration::from_millis(400));
        assert_eq!(app.engine.active_piece().position().y(), y + 1);
    }

    #[test]
    fn test_engine_uses_play_config() {
        let config = PlayConfig {
            engine: EngineConfig {
                columns: 8,
                rows: 16,
                ..EngineConfig::default()
            },
            ..PlayConfig::default()
        };
        let app = PlayApp::new(&config).unwrap();
        assert_eq!(app.engine_config(), &config.engine);
        assert_eq!(app.engine.grid().width(), 8);
    }

    #[test]
    fn test_invalid_engine_config() {
        let config = PlayConfig {
            engine: EngineConfig {
                columns: 0,
                ..EngineConfig::default()
            },
            ..PlayConfig::default()
        };
        assert!(PlayApp::new(&config).is_err());
    }
}
