// Process-wide input state shared by all bindings

use super::definition::GamepadMapsDef;
use super::gamepad::GamepadConfig;
use super::InputError;
use crate::engine::hid::{HidContext, MAX_GAMEPAD_COUNT};
use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Default seconds a held action waits before its first repeat
pub const DEFAULT_REPEAT_DELAY: f32 = 0.5;

/// Default seconds between repeats after the first one
pub const DEFAULT_REPEAT_INTERVAL: f32 = 0.2;

/// Context handle shared between the host and its bindings
pub type SharedContext = Rc<RefCell<InputContext>>;

/// Identifier of a controller model, derived from its device name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(u64);

impl DeviceId {
    /// Create a device ID from the name the polling layer reports
    pub fn from_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Settings for a new input context
#[derive(Debug, Clone, PartialEq)]
pub struct ContextParams {
    pub repeat_delay: f32,
    pub repeat_interval: f32,

    /// Platform name gamepad maps are matched against
    pub platform: String,
}

impl Default for ContextParams {
    fn default() -> Self {
        Self {
            repeat_delay: DEFAULT_REPEAT_DELAY,
            repeat_interval: DEFAULT_REPEAT_INTERVAL,
            platform: std::env::consts::OS.to_string(),
        }
    }
}

/// Pool of gamepad slot indices not owned by any binding
///
/// Indices are handed out lowest first and never given to two owners at once.
#[derive(Debug)]
pub struct GamepadSlots {
    free: Vec<usize>,
    capacity: usize,
}

impl GamepadSlots {
    /// Create a pool with slots `0..capacity` free
    pub fn new(capacity: usize) -> Self {
        Self {
            free: (0..capacity).rev().collect(),
            capacity,
        }
    }

    /// Take the lowest free slot
    pub fn acquire(&mut self) -> Result<usize, InputError> {
        self.free.pop().ok_or(InputError::GamepadSlotsExhausted {
            capacity: self.capacity,
        })
    }

    /// Return a slot to the pool
    pub fn release(&mut self, index: usize) {
        if index >= self.capacity || self.free.contains(&index) {
            log::error!("Gamepad slot {} released but not in use", index);
            return;
        }
        // Keep the stack sorted so the lowest slot is reused first
        let position = self.free.partition_point(|&free| free > index);
        self.free.insert(position, index);
    }

    /// Number of slots that can still be acquired
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Input state shared by every binding: device access, repeat timing,
/// gamepad slots and the gamepad layouts registered for this platform
pub struct InputContext {
    hid: Rc<dyn HidContext>,
    repeat_delay: f32,
    repeat_interval: f32,
    platform: String,
    gamepad_slots: GamepadSlots,
    gamepad_maps: HashMap<DeviceId, GamepadConfig>,
}

impl InputContext {
    /// Create a context polling devices through `hid`
    pub fn new(hid: Rc<dyn HidContext>, params: ContextParams) -> Self {
        log::info!(
            "Input context created for platform '{}' (repeat delay {}s, interval {}s)",
            params.platform,
            params.repeat_delay,
            params.repeat_interval
        );
        Self {
            hid,
            repeat_delay: params.repeat_delay,
            repeat_interval: params.repeat_interval,
            platform: params.platform,
            gamepad_slots: GamepadSlots::new(MAX_GAMEPAD_COUNT),
            gamepad_maps: HashMap::new(),
        }
    }

    /// Wrap the context for sharing with bindings
    pub fn into_shared(self) -> SharedContext {
        Rc::new(RefCell::new(self))
    }

    /// Device polling layer
    pub fn hid(&self) -> &dyn HidContext {
        self.hid.as_ref()
    }

    /// Change how held actions repeat
    pub fn set_repeat(&mut self, delay: f32, interval: f32) {
        self.repeat_delay = delay;
        self.repeat_interval = interval;
    }

    pub fn repeat_delay(&self) -> f32 {
        self.repeat_delay
    }

    pub fn repeat_interval(&self) -> f32 {
        self.repeat_interval
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Register the gamepad layouts meant for this platform
    ///
    /// Layouts for other platforms are ignored. A device that already has a
    /// layout keeps it; the new one is dropped with a warning. Returns the
    /// number of layouts added.
    pub fn register_gamepads(&mut self, maps: &GamepadMapsDef) -> usize {
        let mut registered = 0;
        for driver in maps.driver.iter().filter(|d| d.platform == self.platform) {
            let device_id = DeviceId::from_name(&driver.device);
            if self.gamepad_maps.contains_key(&device_id) {
                log::warn!("Gamepad map for device '{}' already registered", driver.device);
                continue;
            }
            self.gamepad_maps
                .insert(device_id, GamepadConfig::from_def(driver));
            log::debug!("Registered gamepad map for '{}'", driver.device);
            registered += 1;
        }
        registered
    }

    /// Layout registered for a device name
    pub fn gamepad_config(&self, device_name: &str) -> Option<&GamepadConfig> {
        self.gamepad_config_by_id(DeviceId::from_name(device_name))
    }

    pub(crate) fn gamepad_config_by_id(&self, device_id: DeviceId) -> Option<&GamepadConfig> {
        self.gamepad_maps.get(&device_id)
    }

    /// Number of gamepad layouts registered
    pub fn gamepad_map_count(&self) -> usize {
        self.gamepad_maps.len()
    }

    /// Gamepad slots not reserved by any binding
    pub fn gamepad_slots(&self) -> &GamepadSlots {
        &self.gamepad_slots
    }

    pub(crate) fn acquire_gamepad_slot(&mut self) -> Result<usize, InputError> {
        self.gamepad_slots.acquire()
    }

    pub(crate) fn release_gamepad_slot(&mut self, index: usize) {
        self.gamepad_slots.release(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::hid::testing::FakeHid;
    use crate::engine::input::definition::{GamepadMapDef, GamepadMapEntryDef, GamepadType};
    use crate::engine::input::keys::GamepadInput;
    use approx::assert_relative_eq;

    fn params(platform: &str) -> ContextParams {
        ContextParams {
            platform: platform.to_string(),
            ..ContextParams::default()
        }
    }

    fn driver(device: &str, platform: &str, dead_zone: f32) -> GamepadMapDef {
        GamepadMapDef {
            device: device.to_string(),
            platform: platform.to_string(),
            dead_zone,
            map: vec![GamepadMapEntryDef {
                input: GamepadInput::Start,
                kind: GamepadType::Button,
                index: 7,
                modifiers: Vec::new(),
            }],
        }
    }

    #[test]
    fn test_default_params() {
        let params = ContextParams::default();
        assert_relative_eq!(params.repeat_delay, DEFAULT_REPEAT_DELAY);
        assert_relative_eq!(params.repeat_interval, DEFAULT_REPEAT_INTERVAL);
        assert_eq!(params.platform, std::env::consts::OS);
    }

    #[test]
    fn test_set_repeat() {
        let mut context = InputContext::new(Rc::new(FakeHid::new()), params("linux"));
        context.set_repeat(1.0, 0.25);
        assert_relative_eq!(context.repeat_delay(), 1.0);
        assert_relative_eq!(context.repeat_interval(), 0.25);
    }

    #[test]
    fn test_slots_lowest_first() {
        let mut slots = GamepadSlots::new(4);
        assert_eq!(slots.acquire().unwrap(), 0);
        assert_eq!(slots.acquire().unwrap(), 1);
        assert_eq!(slots.available(), 2);

        slots.release(0);
        assert_eq!(slots.acquire().unwrap(), 0);
        assert_eq!(slots.acquire().unwrap(), 2);
    }

    #[test]
    fn test_slots_exhausted() {
        let mut slots = GamepadSlots::new(1);
        slots.acquire().unwrap();
        assert!(matches!(
            slots.acquire(),
            Err(InputError::GamepadSlotsExhausted { capacity: 1 })
        ));
    }

    #[test]
    fn test_slots_ignore_double_release() {
        let mut slots = GamepadSlots::new(2);
        let index = slots.acquire().unwrap();
        slots.release(index);
        slots.release(index);
        slots.release(9);
        assert_eq!(slots.available(), 2);
        assert_eq!(slots.capacity(), 2);
    }

    #[test]
    fn test_register_filters_platform() {
        let mut context = InputContext::new(Rc::new(FakeHid::new()), params("linux"));
        let maps = GamepadMapsDef {
            driver: vec![
                driver("Pad A", "linux", 0.1),
                driver("Pad B", "windows", 0.1),
            ],
        };

        assert_eq!(context.register_gamepads(&maps), 1);
        assert!(context.gamepad_config("Pad A").is_some());
        assert!(context.gamepad_config("Pad B").is_none());
    }

    #[test]
    fn test_register_keeps_first_map() {
        let mut context = InputContext::new(Rc::new(FakeHid::new()), params("linux"));
        let first = GamepadMapsDef {
            driver: vec![driver("Pad A", "linux", 0.1)],
        };
        let second = GamepadMapsDef {
            driver: vec![driver("Pad A", "linux", 0.9)],
        };

        assert_eq!(context.register_gamepads(&first), 1);
        assert_eq!(context.register_gamepads(&second), 0);
        assert_eq!(context.gamepad_map_count(), 1);
        assert_relative_eq!(context.gamepad_config("Pad A").unwrap().dead_zone, 0.1);
    }

    #[test]
    fn test_device_id_from_name() {
        assert_eq!(DeviceId::from_name("Pad"), DeviceId::from_name("Pad"));
        assert_ne!(DeviceId::from_name("Pad"), DeviceId::from_name("Other Pad"));
    }
}
