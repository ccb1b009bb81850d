// Per-consumer bindings: device triggers decoded into actions every frame

use super::action::{Action, ActionId, ActionRegistry, NO_ACTION};
use super::context::{DeviceId, InputContext, SharedContext};
use super::definition::InputBindingDef;
use super::keys::{GamepadInput, MouseInput};
use super::InputError;
use crate::engine::hid::{
    GamepadPacket, HidContext, HidKey, KeyboardPacket, MousePacket, TouchDevicePacket,
};
use glam::IVec2;
use std::rc::Rc;

/// One raw input feeding one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger<I> {
    pub action_id: ActionId,
    pub input: I,
}

/// Pointer state handed to actions that got no position of their own
#[derive(Debug, Clone, Copy)]
struct Pointer {
    position: IVec2,
    delta: IVec2,
}

#[derive(Debug, Default)]
struct KeyboardBinding {
    triggers: Vec<Trigger<HidKey>>,

    /// Last packet fetched, decoded again when a fetch fails
    packet: KeyboardPacket,
}

impl KeyboardBinding {
    fn update(&mut self, hid: &dyn HidContext, actions: &mut ActionRegistry) {
        if let Some(packet) = hid.keyboard_packet() {
            self.packet = packet;
        }
        for trigger in &self.triggers {
            let v = if self.packet.key(trigger.input) { 1.0 } else { 0.0 };
            if let Some(action) = actions.get_mut(trigger.action_id) {
                action.merge(v);
            }
        }
    }
}

#[derive(Debug, Default)]
struct MouseBinding {
    triggers: Vec<Trigger<MouseInput>>,
    prev_packet: MousePacket,
}

impl MouseBinding {
    fn update(&mut self, hid: &dyn HidContext, actions: &mut ActionRegistry) -> Pointer {
        let packet = hid.mouse_packet().unwrap_or(self.prev_packet);
        let wheel = (packet.wheel - self.prev_packet.wheel) as f32;

        for trigger in &self.triggers {
            let v = match trigger.input {
                MouseInput::WheelUp => wheel,
                MouseInput::WheelDown => -wheel,
                input => match input.hid_button() {
                    Some(button) if packet.button(button) => 1.0,
                    _ => 0.0,
                },
            };
            if let Some(action) = actions.get_mut(trigger.action_id) {
                action.merge(v.clamp(0.0, 1.0));
            }
        }

        let pointer = Pointer {
            position: packet.position,
            delta: packet.position - self.prev_packet.position,
        };
        self.prev_packet = packet;
        pointer
    }
}

#[derive(Debug)]
struct GamepadBinding {
    triggers: Vec<Trigger<GamepadInput>>,

    /// Slot reserved from the context for the lifetime of this binding
    index: usize,

    /// Device plugged into the slot, resolved on connection
    device_id: Option<DeviceId>,
    connected: bool,

    /// Set once the missing map has been reported for this connection
    no_map_warning: bool,

    /// Last raw packet fetched
    packet: GamepadPacket,
}

impl GamepadBinding {
    fn new(index: usize) -> Self {
        Self {
            triggers: Vec::new(),
            index,
            device_id: None,
            connected: false,
            no_map_warning: false,
            packet: GamepadPacket::default(),
        }
    }

    fn update(&mut self, context: &InputContext, actions: &mut ActionRegistry) {
        let hid = context.hid();
        let connected = hid.gamepad_connected(self.index);
        if connected && !self.connected {
            self.device_id = hid.gamepad_device_name(self.index).map(DeviceId::from_name);
            self.no_map_warning = false;
            self.packet = GamepadPacket::default();
            log::info!("Gamepad {} connected", self.index);
        } else if !connected && self.connected {
            log::info!("Gamepad {} disconnected", self.index);
        }
        self.connected = connected;
        if !connected {
            return;
        }

        let Some(config) = self.device_id.and_then(|id| context.gamepad_config_by_id(id)) else {
            if !self.no_map_warning {
                log::warn!("No gamepad map registered for gamepad {}, not used", self.index);
                self.no_map_warning = true;
            }
            return;
        };
        if let Some(packet) = hid.gamepad_packet(self.index) {
            self.packet = packet;
        }

        let mut packet = self.packet;
        config.apply_dead_zone(&mut packet);
        for trigger in &self.triggers {
            let Some(mapping) = config.mapping(trigger.input) else {
                continue;
            };
            if let Some(action) = actions.get_mut(trigger.action_id) {
                action.merge(mapping.apply(&packet));
            }
        }
    }
}

#[derive(Debug, Default)]
struct TouchBinding {
    triggers: Vec<Trigger<usize>>,
    prev_packet: TouchDevicePacket,
}

impl TouchBinding {
    fn update(&mut self, hid: &dyn HidContext, actions: &mut ActionRegistry) {
        let packet = hid.touch_packet().unwrap_or(self.prev_packet);
        for trigger in &self.triggers {
            let Some(action) = actions.get_mut(trigger.action_id) else {
                continue;
            };
            if let Some(position) = packet.touch(trigger.input) {
                action.position = position;
                action.delta = self
                    .prev_packet
                    .touch(trigger.input)
                    .map_or(IVec2::ZERO, |prev| position - prev);
                action.position_set = true;
                // An active touch always reads as fully pressed
                action.value = 1.0;
            }
        }
        self.prev_packet = packet;
    }
}

/// Why a gamepad slot contributes no input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GamepadIssue {
    Disconnected,
    NoMap,
}

fn gamepad_issue(context: &InputContext, index: usize) -> Option<GamepadIssue> {
    match context.hid().gamepad_device_name(index) {
        None => Some(GamepadIssue::Disconnected),
        Some(name) if context.gamepad_config(name).is_none() => Some(GamepadIssue::NoMap),
        Some(_) => None,
    }
}

/// The device-to-action mappings of one input consumer
///
/// A binding owns at most one sub-binding per device class. A gamepad
/// sub-binding reserves a gamepad slot from the context until it is torn
/// down by a rebind or the binding is dropped.
pub struct InputBinding {
    context: SharedContext,
    keyboard: Option<KeyboardBinding>,
    mouse: Option<MouseBinding>,
    gamepad: Option<GamepadBinding>,
    touch: Option<TouchBinding>,
    actions: ActionRegistry,
}

impl InputBinding {
    /// Create an empty binding
    pub fn new(context: &SharedContext) -> Self {
        Self {
            context: Rc::clone(context),
            keyboard: None,
            mouse: None,
            gamepad: None,
            touch: None,
            actions: ActionRegistry::new(),
        }
    }

    /// Replace all triggers with those of `def`
    ///
    /// Every action is reset. Device classes without triggers in `def` are
    /// torn down. The first gamepad trigger set reserves a gamepad slot; if
    /// none is free the binding is left untouched and an error is returned.
    pub fn set_binding(&mut self, def: &InputBindingDef) -> Result<(), InputError> {
        let new_gamepad_slot = if !def.gamepad_trigger.is_empty() && self.gamepad.is_none() {
            Some(self.context.borrow_mut().acquire_gamepad_slot()?)
        } else {
            None
        };

        self.actions.clear();

        if def.key_trigger.is_empty() {
            self.keyboard = None;
        } else {
            let triggers = def
                .key_trigger
                .iter()
                .map(|t| Trigger {
                    action_id: self.actions.register(&t.action),
                    input: t.input.hid_key(),
                })
                .collect();
            self.keyboard.get_or_insert_with(KeyboardBinding::default).triggers = triggers;
        }

        if def.mouse_trigger.is_empty() {
            self.mouse = None;
        } else {
            let triggers = def
                .mouse_trigger
                .iter()
                .map(|t| Trigger {
                    action_id: self.actions.register(&t.action),
                    input: t.input,
                })
                .collect();
            self.mouse.get_or_insert_with(MouseBinding::default).triggers = triggers;
        }

        if def.gamepad_trigger.is_empty() {
            if let Some(gamepad) = self.gamepad.take() {
                self.context.borrow_mut().release_gamepad_slot(gamepad.index);
            }
        } else {
            let triggers = def
                .gamepad_trigger
                .iter()
                .map(|t| Trigger {
                    action_id: self.actions.register(&t.action),
                    input: t.input,
                })
                .collect();
            if let Some(index) = new_gamepad_slot {
                self.warn_unusable_gamepad(index);
                self.gamepad = Some(GamepadBinding::new(index));
            }
            if let Some(gamepad) = self.gamepad.as_mut() {
                gamepad.triggers = triggers;
            }
        }

        if def.touch_trigger.is_empty() {
            self.touch = None;
        } else {
            let triggers = def
                .touch_trigger
                .iter()
                .map(|t| Trigger {
                    action_id: self.actions.register(&t.action),
                    input: t.input,
                })
                .collect();
            self.touch.get_or_insert_with(TouchBinding::default).triggers = triggers;
        }

        log::debug!(
            "Binding configured with {} actions ({} key, {} mouse, {} gamepad, {} touch triggers)",
            self.actions.len(),
            def.key_trigger.len(),
            def.mouse_trigger.len(),
            def.gamepad_trigger.len(),
            def.touch_trigger.len()
        );
        Ok(())
    }

    fn warn_unusable_gamepad(&self, index: usize) {
        let context = self.context.borrow();
        match gamepad_issue(&context, index) {
            Some(GamepadIssue::Disconnected) => log::warn!("Gamepad {} is not connected", index),
            Some(GamepadIssue::NoMap) => log::warn!(
                "No gamepad map found for gamepad {} ({}), it will not be used",
                index,
                context.hid().gamepad_device_name(index).unwrap_or_default()
            ),
            None => {}
        }
    }

    /// Decode this frame's device state into actions
    ///
    /// `dt` is the time since the previous update in seconds and drives the
    /// repeat timers.
    pub fn update(&mut self, dt: f32) {
        let context = Rc::clone(&self.context);
        let context = context.borrow();
        let hid = context.hid();

        self.actions.begin_frame();

        if let Some(keyboard) = self.keyboard.as_mut() {
            keyboard.update(hid, &mut self.actions);
        }
        let pointer = self
            .mouse
            .as_mut()
            .map(|mouse| mouse.update(hid, &mut self.actions));
        if let Some(gamepad) = self.gamepad.as_mut() {
            gamepad.update(&context, &mut self.actions);
        }
        if let Some(touch) = self.touch.as_mut() {
            touch.update(hid, &mut self.actions);
        }

        let repeat_delay = context.repeat_delay();
        let repeat_interval = context.repeat_interval();
        for (_, action) in self.actions.iter_mut() {
            if !action.position_set {
                match pointer {
                    Some(pointer) => {
                        action.position = pointer.position;
                        action.delta = pointer.delta;
                        action.position_set = true;
                    }
                    None => {
                        action.position = IVec2::ZERO;
                        action.delta = IVec2::ZERO;
                    }
                }
            }
            action.update_edges(dt, repeat_delay, repeat_interval);
        }
    }

    /// State of an action, the "no input" state if it isn't bound
    pub fn action(&self, id: ActionId) -> &Action {
        self.actions.get(id).unwrap_or(&NO_ACTION)
    }

    /// Current value of an action, 0.0 if it isn't bound
    pub fn value(&self, id: ActionId) -> f32 {
        self.action(id).value
    }

    /// Whether an action went active this frame
    pub fn pressed(&self, id: ActionId) -> bool {
        self.action(id).pressed
    }

    /// Whether an action went inactive this frame
    pub fn released(&self, id: ActionId) -> bool {
        self.action(id).released
    }

    /// Whether an action was pressed or fired a repeat this frame
    pub fn repeated(&self, id: ActionId) -> bool {
        self.action(id).repeated
    }

    /// Visit every action with input this frame, in no particular order
    ///
    /// An action is active when its value is non-zero or it was pressed or
    /// released this frame. The pointer action is also active while the
    /// pointer moves.
    pub fn for_each_active<F>(&self, mut visit: F)
    where
        F: FnMut(ActionId, &Action),
    {
        for (id, action) in self.actions.iter() {
            if action.is_active(id) {
                visit(id, action);
            }
        }
    }

    /// All actions of this binding
    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Check if an action is bound
    pub fn contains(&self, id: ActionId) -> bool {
        self.actions.contains(id)
    }

    /// Number of actions, including the pointer action
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Always false, the pointer action is always bound
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Gamepad slot reserved by this binding
    pub fn gamepad_index(&self) -> Option<usize> {
        self.gamepad.as_ref().map(|gamepad| gamepad.index)
    }
}

impl Drop for InputBinding {
    fn drop(&mut self) {
        if let Some(gamepad) = self.gamepad.take() {
            match self.context.try_borrow_mut() {
                Ok(mut context) => context.release_gamepad_slot(gamepad.index),
                Err(_) => log::error!(
                    "Input context busy, gamepad slot {} not released",
                    gamepad.index
                ),
            }
        }
    }
}
