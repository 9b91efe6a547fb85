use ast_core::{ConfigError, Controls};
use log::{debug, error};
use rdev::{listen, Button, Event, EventType, Key};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs::{read_to_string, write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    thread::spawn,
};

/// Serializable wrapper for keyboard keys or mouse buttons
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyInput {
    Key(String),
    Mouse(String),
}

impl KeyInput {
    pub fn from_key(k: Key) -> Self {
        KeyInput::Key(format!("{:?}", k))
    }

    pub fn from_button(b: Button) -> Self {
        KeyInput::Mouse(format!("{:?}", b))
    }

    fn name(&self) -> &str {
        match self {
            KeyInput::Key(k) | KeyInput::Mouse(k) => k,
        }
    }
}

/// Represents a key or key+modifier combination
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCombo {
    pub input: KeyInput,
    #[serde(default)]
    pub modifiers: Vec<String>, // modifiers like ControlLeft, ShiftLeft, etc.
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Thrust,
    RotateLeft,
    RotateRight,
    Fire,
    Exit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    pub bindings: HashMap<Action, Vec<KeyCombo>>,

    #[serde(skip)]
    pressed_keys: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl KeyBindings {
    /// Create empty keybindings
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            pressed_keys: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Bind a key combo to an action
    pub fn bind(&mut self, action: Action, combo: KeyCombo) {
        self.bindings.entry(action).or_default().push(combo);
    }

    /// Bind a single keyboard key
    pub fn bind_key(&mut self, action: Action, key: Key) {
        self.bind(
            action,
            KeyCombo {
                input: KeyInput::from_key(key),
                modifiers: Vec::new(),
            },
        );
    }

    /// Bind a single mouse button
    pub fn bind_mouse(&mut self, action: Action, button: Button) {
        self.bind(
            action,
            KeyCombo {
                input: KeyInput::from_button(button),
                modifiers: Vec::new(),
            },
        );
    }

    /// Check if action is currently held
    pub fn is_action_held(&self, action: Action) -> bool {
        let pressed = lock(&self.pressed_keys);
        self.is_combo_active(&pressed, action)
    }

    /// Helper to check combos against a set of active keys
    fn is_combo_active(&self, set: &[String], action: Action) -> bool {
        self.bindings.get(&action).is_some_and(|combos| {
            combos.iter().any(|combo| {
                combo.modifiers.iter().all(|m| set.contains(m))
                    && set.iter().any(|k| k == combo.input.name())
            })
        })
    }

    /// Snapshot of the held keys as simulation input
    pub fn controls(&self) -> Controls {
        let pressed = lock(&self.pressed_keys);
        Controls {
            thrust: self.is_combo_active(&pressed, Action::Thrust),
            rotate_left: self.is_combo_active(&pressed, Action::RotateLeft),
            rotate_right: self.is_combo_active(&pressed, Action::RotateRight),
            fire: self.is_combo_active(&pressed, Action::Fire),
        }
    }

    /// Start listening to global keyboard and mouse events
    pub fn start_listening(&self) {
        let pressed_clone = Arc::clone(&self.pressed_keys);

        // Create a thread
        spawn(move || {
            let result = listen(move |event: Event| {
                let (key_str, down) = match event.event_type {
                    EventType::KeyPress(k) => (format!("{:?}", k), true),
                    EventType::KeyRelease(k) => (format!("{:?}", k), false),
                    EventType::ButtonPress(b) => (format!("{:?}", b), true),
                    EventType::ButtonRelease(b) => (format!("{:?}", b), false),
                    _ => return,
                };

                let mut pressed = lock(&pressed_clone);
                if down {
                    if !pressed.contains(&key_str) {
                        pressed.push(key_str);
                    }
                } else {
                    pressed.retain(|x| x != &key_str);
                }
            });

            if let Err(e) = result {
                error!("Keyboard listener stopped: {:?}", e);
            }
        });
        debug!("Keyboard listener started");
    }

    /// Save bindings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(&self)?;
        write(path, json)?;
        Ok(())
    }

    /// Load bindings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = read_to_string(path)?;
        let mut bindings: KeyBindings = serde_json::from_str(&data)?;
        bindings.pressed_keys = Arc::new(Mutex::new(Vec::new()));
        Ok(bindings)
    }

    #[cfg(test)]
    fn press(&self, key: &str) {
        lock(&self.pressed_keys).push(key.to_string());
    }
}

/// Default keybindings
pub fn default_keybindings() -> KeyBindings {
    let mut kb = KeyBindings::new();

    kb.bind_key(Action::Thrust, Key::UpArrow);
    kb.bind_key(Action::RotateLeft, Key::LeftArrow);
    kb.bind_key(Action::RotateRight, Key::RightArrow);

    kb.bind_key(Action::Fire, Key::Space);
    kb.bind_mouse(Action::Fire, Button::Left);

    kb.bind_key(Action::Exit, Key::Escape);

    kb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_arrows_become_controls() {
        let kb = default_keybindings();
        kb.press("UpArrow");
        kb.press("LeftArrow");
        assert_eq!(
            kb.controls(),
            Controls {
                thrust: true,
                rotate_left: true,
                ..Controls::IDLE
            }
        );
        assert!(!kb.is_action_held(Action::Exit));
    }

    #[test]
    fn mouse_button_also_fires() {
        let kb = default_keybindings();
        kb.press("Left");
        assert!(kb.controls().fire);
    }

    #[test]
    fn combo_needs_its_modifiers() {
        let mut kb = KeyBindings::new();
        kb.bind(
            Action::Exit,
            KeyCombo {
                input: KeyInput::from_key(Key::KeyQ),
                modifiers: vec![String::from("ControlLeft")],
            },
        );
        kb.press("KeyQ");
        assert!(!kb.is_action_held(Action::Exit));
        kb.press("ControlLeft");
        assert!(kb.is_action_held(Action::Exit));
    }

    #[test]
    fn bindings_survive_a_file_round() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keybindings.json");
        default_keybindings().save(&path).unwrap();

        let loaded = KeyBindings::load(&path).unwrap();
        loaded.press("Space");
        assert!(loaded.controls().fire);
        assert_eq!(loaded.bindings.len(), 5);
    }
}
