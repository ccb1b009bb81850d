// Input binding system
//
// Turns raw device state into named, game-defined actions once per frame.
//
// ## Architecture
//
// - `keys`: raw input identifiers used by binding definitions, and the tables
//   translating them to the polling layer's identifiers
// - `definition`: binding and gamepad map definitions loaded from TOML
// - `action`: action identifiers, per-action state and the action registry
// - `gamepad`: controller layouts, modifiers and dead zone filtering
// - `context`: state shared by all bindings (repeat timing, gamepad slots,
//   gamepad layouts)
// - `binding`: per-consumer bindings, decoded every frame
//
// ## Usage Example
//
// ```rust
// use rusted_input::engine::input::{ActionId, InputBinding, InputBindingDef, InputContext, Key};
//
// let context = InputContext::new(hid, ContextParams::default()).into_shared();
// let mut binding = InputBinding::new(&context);
// binding.set_binding(&InputBindingDef::new().key("jump", Key::Space))?;
//
// // Once per frame
// binding.update(dt);
// if binding.pressed(ActionId::from_name("jump")) {
//     // Jump!
// }
// ```

pub mod action;
pub mod binding;
pub mod context;
pub mod definition;
pub mod gamepad;
pub mod keys;

// Re-export commonly used types
pub use action::{Action, ActionId, ActionRegistry};
pub use binding::InputBinding;
pub use context::{ContextParams, InputContext, SharedContext};
pub use definition::{GamepadMapsDef, InputBindingDef};
pub use gamepad::GamepadConfig;
pub use keys::{GamepadInput, Key, MouseInput};

/// Input configuration errors
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("All {capacity} gamepad slots are in use")]
    GamepadSlotsExhausted { capacity: usize },

    #[error("Gamepad map for '{device}' uses out of range index {index}")]
    InvalidGamepadIndex { device: String, index: u32 },

    #[error("Invalid input definition: {0}")]
    Definition(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_display() {
        let err = InputError::GamepadSlotsExhausted { capacity: 16 };
        assert_eq!(err.to_string(), "All 16 gamepad slots are in use");

        let err = InputError::InvalidGamepadIndex {
            device: "Pad".to_string(),
            index: 40,
        };
        assert_eq!(
            err.to_string(),
            "Gamepad map for 'Pad' uses out of range index 40"
        );
    }
}
