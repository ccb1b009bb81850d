// Logical actions and their per-frame state

use glam::IVec2;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Identifier of a named action, derived from the action name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(u64);

impl ActionId {
    /// Reserved for pointer movement that no trigger names explicitly
    pub const POINTER: ActionId = ActionId(0);

    /// Create an action ID from an action name
    ///
    /// Identical names always yield identical IDs. Distinct names colliding is
    /// possible but not expected; bindings warn when it happens.
    pub fn from_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Create an action ID from a raw u64
    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Aggregated state of one action for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Action {
    /// Strongest contribution of all triggers this frame
    pub value: f32,

    /// Value of the previous frame
    pub prev_value: f32,

    /// Went from zero to non-zero this frame
    pub pressed: bool,

    /// Went from non-zero to zero this frame
    pub released: bool,

    /// Pressed this frame, or held long enough for a repeat to fire
    pub repeated: bool,

    /// Seconds until the next repeat fires while held
    pub repeat_timer: f32,

    /// Pointer or touch position in window pixels
    pub position: IVec2,

    /// Position change since last frame
    pub delta: IVec2,

    /// Whether a device supplied a position this frame
    pub position_set: bool,
}

/// State reported for actions a binding doesn't know about
pub static NO_ACTION: Action = Action::NONE;

impl Action {
    /// An action with no input at all
    pub const NONE: Action = Action {
        value: 0.0,
        prev_value: 0.0,
        pressed: false,
        released: false,
        repeated: false,
        repeat_timer: 0.0,
        position: IVec2::ZERO,
        delta: IVec2::ZERO,
        position_set: false,
    };

    /// Start a new frame: keep the current value as previous and reset
    pub(crate) fn begin_frame(&mut self) {
        self.prev_value = self.value;
        self.value = 0.0;
        self.position_set = false;
    }

    /// Take `value` if it is stronger than what other triggers contributed
    pub(crate) fn merge(&mut self, value: f32) {
        if self.value.abs() < value.abs() {
            self.value = value;
        }
    }

    /// Derive edges and repeats from the value change over the last frame
    pub(crate) fn update_edges(&mut self, dt: f32, repeat_delay: f32, repeat_interval: f32) {
        self.pressed = self.prev_value == 0.0 && self.value > 0.0;
        self.released = self.prev_value > 0.0 && self.value == 0.0;
        self.repeated = false;

        if self.value > 0.0 {
            if self.pressed {
                self.repeated = true;
                self.repeat_timer = repeat_delay;
            } else {
                self.repeat_timer -= dt;
                if self.repeat_timer <= 0.0 {
                    self.repeated = true;
                    // Keep the overshoot so repeats don't drift with frame rate
                    self.repeat_timer += repeat_interval;
                }
            }
        }
    }

    /// Whether the action should be reported by `for_each_active`
    pub fn is_active(&self, id: ActionId) -> bool {
        self.value != 0.0
            || self.pressed
            || self.released
            || (id == ActionId::POINTER && self.delta != IVec2::ZERO)
    }
}

/// Actions of one binding, keyed by identifier
///
/// Entries are created when a binding is configured and updated in place
/// every frame after that. The pointer action is always present.
#[derive(Debug)]
pub struct ActionRegistry {
    actions: HashMap<ActionId, Action>,

    /// Name behind each identifier, used to detect hash collisions
    names: HashMap<ActionId, String>,
}

impl ActionRegistry {
    /// Create a registry holding only the pointer action
    pub fn new() -> Self {
        let mut registry = Self {
            actions: HashMap::new(),
            names: HashMap::new(),
        };
        registry.clear();
        registry
    }

    /// Drop every action except the pointer action
    pub fn clear(&mut self) {
        self.actions.clear();
        self.names.clear();
        self.actions.insert(ActionId::POINTER, Action::default());
    }

    /// Add an action by name, keeping its state if it already exists
    pub fn register(&mut self, name: &str) -> ActionId {
        let id = ActionId::from_name(name);
        match self.names.get(&id) {
            Some(existing) if existing != name => log::warn!(
                "Actions '{}' and '{}' share identifier {:#018x}",
                existing,
                name,
                id.as_u64()
            ),
            Some(_) => {}
            None => {
                self.names.insert(id, name.to_string());
            }
        }
        self.actions.entry(id).or_default();
        id
    }

    /// Get an action's state
    pub fn get(&self, id: ActionId) -> Option<&Action> {
        self.actions.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ActionId) -> Option<&mut Action> {
        self.actions.get_mut(&id)
    }

    /// Name an action was registered under
    pub fn name(&self, id: ActionId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Check if an action is registered
    pub fn contains(&self, id: ActionId) -> bool {
        self.actions.contains_key(&id)
    }

    /// Number of actions, including the pointer action
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Always false, the pointer action is never removed
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate over all actions in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, &Action)> {
        self.actions.iter().map(|(id, action)| (*id, action))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (ActionId, &mut Action)> {
        self.actions.iter_mut().map(|(id, action)| (*id, action))
    }

    /// Start a new frame for every action
    pub(crate) fn begin_frame(&mut self) {
        for action in self.actions.values_mut() {
            action.begin_frame();
        }
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DELAY: f32 = 0.5;
    const INTERVAL: f32 = 0.25;

    fn step(action: &mut Action, value: f32, dt: f32) {
        action.begin_frame();
        action.merge(value);
        action.update_edges(dt, DELAY, INTERVAL);
    }

    #[test]
    fn test_action_id_from_name() {
        let id1 = ActionId::from_name("jump");
        let id2 = ActionId::from_name("jump");
        let id3 = ActionId::from_name("fire");

        assert_eq!(id1, id2, "Same names should produce same IDs");
        assert_ne!(id1, id3, "Different names should produce different IDs");
        assert_ne!(id1, ActionId::POINTER);
    }

    #[test]
    fn test_action_id_roundtrip() {
        let id = ActionId::from_u64(12345);
        assert_eq!(id.as_u64(), 12345);
    }

    #[test]
    fn test_merge_keeps_strongest() {
        let mut action = Action::default();
        action.merge(0.3);
        action.merge(-0.8);
        action.merge(0.5);
        assert_relative_eq!(action.value, -0.8);
    }

    #[test]
    fn test_press_hold_release() {
        let mut action = Action::default();

        step(&mut action, 1.0, 0.1);
        assert!(action.pressed);
        assert!(!action.released);
        assert!(action.repeated);
        assert_relative_eq!(action.repeat_timer, DELAY);

        step(&mut action, 1.0, 0.1);
        assert!(!action.pressed);
        assert!(!action.released);
        assert!(!action.repeated);

        step(&mut action, 0.0, 0.1);
        assert!(!action.pressed);
        assert!(action.released);
        assert!(!action.repeated);
    }

    #[test]
    fn test_repeat_after_delay_then_interval() {
        let mut action = Action::default();
        step(&mut action, 1.0, 0.125);

        // 0.5s delay at 0.125s frames: three quiet frames, then a repeat
        for _ in 0..3 {
            step(&mut action, 1.0, 0.125);
            assert!(!action.repeated);
        }
        step(&mut action, 1.0, 0.125);
        assert!(action.repeated);

        step(&mut action, 1.0, 0.125);
        assert!(!action.repeated);
        step(&mut action, 1.0, 0.125);
        assert!(action.repeated);
    }

    #[test]
    fn test_repeat_keeps_remainder() {
        let mut action = Action::default();
        step(&mut action, 1.0, 0.0);

        // One long frame overshoots the delay by 0.125s
        step(&mut action, 1.0, 0.625);
        assert!(action.repeated);
        assert_relative_eq!(action.repeat_timer, INTERVAL - 0.125);
    }

    #[test]
    fn test_pressed_and_released_exclusive() {
        let mut action = Action::default();
        for value in [1.0, 0.0, 0.5, 0.5, 0.0, 0.0, 1.0] {
            step(&mut action, value, 0.016);
            assert!(!(action.pressed && action.released));
        }
    }

    #[test]
    fn test_negative_value_is_not_pressed() {
        let mut action = Action::default();
        step(&mut action, -1.0, 0.1);
        assert!(!action.pressed);
        assert!(!action.repeated);
        assert!(action.is_active(ActionId::from_name("left")));
    }

    #[test]
    fn test_is_active() {
        let id = ActionId::from_name("jump");
        let mut action = Action::default();
        assert!(!action.is_active(id));

        action.delta = IVec2::new(3, 0);
        assert!(!action.is_active(id), "Only the pointer action moves");
        assert!(action.is_active(ActionId::POINTER));

        action.delta = IVec2::ZERO;
        action.released = true;
        assert!(action.is_active(id));
    }

    #[test]
    fn test_no_action_defaults() {
        assert_eq!(NO_ACTION.value, 0.0);
        assert!(!NO_ACTION.pressed);
        assert!(!NO_ACTION.released);
        assert!(!NO_ACTION.repeated);
        assert_eq!(NO_ACTION, Action::default());
    }

    #[test]
    fn test_registry_starts_with_pointer() {
        let registry = ActionRegistry::new();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(ActionId::POINTER));
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = ActionRegistry::new();
        let id = registry.register("jump");
        registry.get_mut(id).unwrap().value = 1.0;

        assert_eq!(registry.register("jump"), id);
        assert_eq!(registry.get(id).unwrap().value, 1.0);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name(id), Some("jump"));
    }

    #[test]
    fn test_registry_clear_keeps_pointer() {
        let mut registry = ActionRegistry::new();
        let id = registry.register("fire");
        registry.clear();

        assert!(!registry.contains(id));
        assert!(registry.contains(ActionId::POINTER));
        assert_eq!(registry.name(id), None);
    }

    #[test]
    fn test_registry_begin_frame() {
        let mut registry = ActionRegistry::new();
        let id = registry.register("fire");
        {
            let action = registry.get_mut(id).unwrap();
            action.value = 0.5;
            action.position_set = true;
        }

        registry.begin_frame();
        let action = registry.get(id).unwrap();
        assert_eq!(action.prev_value, 0.5);
        assert_eq!(action.value, 0.0);
        assert!(!action.position_set);
    }
}
