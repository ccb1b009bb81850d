// Binding and gamepad map definitions
//
// Definitions are plain data loaded from TOML resources. A binding file lists
// triggers per device class:
//
// ```toml
// [[key_trigger]]
// input = "SPACE"
// action = "jump"
//
// [[mouse_trigger]]
// input = "LEFT"
// action = "fire"
// ```
//
// A gamepad map file lists one driver per controller model and platform:
//
// ```toml
// [[driver]]
// device = "Xbox 360 Wireless Receiver"
// platform = "linux"
// dead_zone = 0.2
//
// [[driver.map]]
// input = "LSTICK_LEFT"
// type = "AXIS"
// index = 0
// mod = ["NEGATE", "CLAMP"]
// ```

use super::keys::{GamepadInput, Key, MouseInput};
use super::InputError;
use serde::{Deserialize, Serialize};

/// Keyboard key -> action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTriggerDef {
    pub input: Key,
    pub action: String,
}

/// Mouse button or wheel direction -> action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseTriggerDef {
    pub input: MouseInput,
    pub action: String,
}

/// Logical gamepad input -> action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamepadTriggerDef {
    pub input: GamepadInput,
    pub action: String,
}

/// Touch slot -> action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchTriggerDef {
    /// Touch slot index, 0 for the first finger down
    pub input: usize,
    pub action: String,
}

/// Every trigger of one input consumer, grouped by device class
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputBindingDef {
    #[serde(default)]
    pub key_trigger: Vec<KeyTriggerDef>,

    #[serde(default)]
    pub mouse_trigger: Vec<MouseTriggerDef>,

    #[serde(default)]
    pub gamepad_trigger: Vec<GamepadTriggerDef>,

    #[serde(default)]
    pub touch_trigger: Vec<TouchTriggerDef>,
}

impl InputBindingDef {
    /// Create an empty definition
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a definition from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, InputError> {
        Ok(toml::from_str(text)?)
    }

    /// Add a keyboard trigger
    pub fn key(mut self, action: &str, input: Key) -> Self {
        self.key_trigger.push(KeyTriggerDef {
            input,
            action: action.to_string(),
        });
        self
    }

    /// Add a mouse trigger
    pub fn mouse(mut self, action: &str, input: MouseInput) -> Self {
        self.mouse_trigger.push(MouseTriggerDef {
            input,
            action: action.to_string(),
        });
        self
    }

    /// Add a gamepad trigger
    pub fn gamepad(mut self, action: &str, input: GamepadInput) -> Self {
        self.gamepad_trigger.push(GamepadTriggerDef {
            input,
            action: action.to_string(),
        });
        self
    }

    /// Add a touch trigger
    pub fn touch(mut self, action: &str, slot: usize) -> Self {
        self.touch_trigger.push(TouchTriggerDef {
            input: slot,
            action: action.to_string(),
        });
        self
    }
}

/// Whether a gamepad input is read from an axis or a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamepadType {
    Axis,
    Button,
}

/// Post-processing applied to an axis sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamepadModifier {
    /// Clamp to [0, 1]
    Clamp,
    /// Flip the sign
    Negate,
    /// Map [-1, 1] onto [0, 1]
    Scale,
}

/// Placement of one logical input on a controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamepadMapEntryDef {
    pub input: GamepadInput,

    #[serde(rename = "type")]
    pub kind: GamepadType,

    /// Hardware axis or button index
    pub index: u32,

    #[serde(default, rename = "mod")]
    pub modifiers: Vec<GamepadModifier>,
}

/// Layout of one controller model on one platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamepadMapDef {
    /// Device name as reported by the polling layer
    pub device: String,

    /// Platform the layout applies to
    pub platform: String,

    #[serde(default)]
    pub dead_zone: f32,

    #[serde(default)]
    pub map: Vec<GamepadMapEntryDef>,
}

/// A set of controller layouts, usually covering several platforms
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GamepadMapsDef {
    #[serde(default)]
    pub driver: Vec<GamepadMapDef>,
}

impl GamepadMapsDef {
    /// Parse gamepad maps from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, InputError> {
        Ok(toml::from_str(text)?)
    }
}
