use std::sync::mpsc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{Config, ShadowConfig};
use crate::otp::{FieldGroup, OtpError};
use crate::ui::key_input::{self, KeyAction};
use crate::ui::theme::{Theme, ThemeColors};

/// Text shown under the cells before any code has been reported.
pub const INITIAL_LABEL: &str = "Hello";

/// A code reported by the field group's completion callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompletedCode {
    pub code: String,
    pub completed_at: DateTime<Utc>,
}

/// Host screen: owns the field group and reacts to its completion callback.
pub struct App {
    pub group: FieldGroup,
    pub theme: Theme,
    pub label: String,
    pub last_completed: Option<CompletedCode>,
    pub should_quit: bool,
    completions: mpsc::Receiver<String>,
}

impl App {
    pub fn new(config: &Config, theme: Theme) -> Result<Self, OtpError> {
        let mut group = FieldGroup::new(config.field_config())?;
        if let Some(shadow) = &config.shadow {
            apply_shadow(&mut group, shadow);
        }

        let (tx, rx) = mpsc::channel();
        group.on_complete(move |code| {
            if tx.send(code.to_string()).is_err() {
                tracing::warn!(message = "otp.completion_dropped", len = code.chars().count());
            }
        });

        Ok(Self {
            group,
            theme,
            label: INITIAL_LABEL.to_string(),
            last_completed: None,
            should_quit: false,
            completions: rx,
        })
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> KeyAction {
        let action = key_input::handle_key(&mut self.group, key);
        self.after(&action);
        action
    }

    pub fn handle_paste(&mut self, text: &str) -> KeyAction {
        let action = key_input::handle_paste(&mut self.group, text);
        self.after(&action);
        action
    }

    fn after(&mut self, action: &KeyAction) {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Reset => self.label = INITIAL_LABEL.to_string(),
            _ => {}
        }
        self.drain_completions();
    }

    fn drain_completions(&mut self) {
        while let Ok(code) = self.completions.try_recv() {
            self.label = code.clone();
            self.last_completed = Some(CompletedCode {
                code,
                completed_at: Utc::now(),
            });
        }
    }
}

fn apply_shadow(group: &mut FieldGroup, shadow: &ShadowConfig) {
    group.apply_shadow_style(
        (shadow.offset_x, shadow.offset_y),
        ThemeColors::parse_color(&shadow.color),
        shadow.radius,
        shadow.opacity,
    );
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::style::Color;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(config: &Config) -> App {
        App::new(config, Theme {
            name: "test".to_string(),
            colors: ThemeColors::default(),
        })
        .unwrap()
    }

    #[test]
    fn label_shows_code_after_completion() {
        let mut app = app(&Config::default());
        assert_eq!(app.label, INITIAL_LABEL);
        for ch in ['4', '3', '2'] {
            app.handle_key(key(KeyCode::Char(ch)));
        }
        assert_eq!(app.label, INITIAL_LABEL);
        assert!(app.last_completed.is_none());

        app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(app.label, "4321");
        assert_eq!(app.last_completed.as_ref().unwrap().code, "4321");
    }

    #[test]
    fn reset_restores_initial_label() {
        let mut app = app(&Config {
            cell_count: 1,
            ..Config::default()
        });
        app.handle_key(key(KeyCode::Char('8')));
        assert_eq!(app.label, "8");
        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(app.label, INITIAL_LABEL);
        assert_eq!(app.group.code(), "");
        // The last reported code is kept for output on exit.
        assert_eq!(app.last_completed.as_ref().unwrap().code, "8");
    }

    #[test]
    fn esc_quits() {
        let mut app = app(&Config::default());
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn paste_can_complete() {
        let mut app = app(&Config {
            paste_mode: crate::otp::PasteMode::Spread,
            ..Config::default()
        });
        app.handle_paste("9876");
        assert_eq!(app.label, "9876");
    }

    #[test]
    fn configured_shadow_is_applied() {
        let app = app(&Config {
            shadow: Some(ShadowConfig {
                offset_x: 2,
                offset_y: 1,
                color: "#101010".to_string(),
                radius: 1,
                opacity: 0.4,
            }),
            ..Config::default()
        });
        let shadow = app.group.shadow().unwrap();
        assert_eq!(shadow.offset, (2, 1));
        assert_eq!(shadow.color, Color::Rgb(16, 16, 16));
    }

    #[test]
    fn completion_survives_closed_receiver() {
        let mut app = app(&Config {
            cell_count: 1,
            ..Config::default()
        });
        // Swapping in a fresh receiver drops the one the callback sends to.
        let (_tx, rx) = mpsc::channel();
        app.completions = rx;
        app.handle_key(key(KeyCode::Char('5')));
        assert_eq!(app.group.code(), "5");
        assert!(app.group.is_complete());
        assert_eq!(app.label, INITIAL_LABEL);
        assert!(app.last_completed.is_none());
    }

    #[test]
    fn invalid_cell_count_fails() {
        let result = App::new(
            &Config {
                cell_count: 0,
                ..Config::default()
            },
            Theme::default(),
        );
        assert!(matches!(result, Err(OtpError::InvalidConfiguration(_))));
    }
}
