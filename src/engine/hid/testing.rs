// Scripted HID backend for driving the input core from tests

use super::{
    GamepadPacket, HidContext, HidKey, HidMouseButton, KeyboardPacket, MousePacket,
    TouchDevicePacket, MAX_GAMEPAD_COUNT,
};
use glam::IVec2;
use std::cell::Cell;

/// HID backend whose device state is set directly by the test
///
/// A device class whose fetch is failing returns `None` without losing the
/// state that was scripted for it.
#[derive(Debug, Default)]
pub struct FakeHid {
    keyboard: Cell<KeyboardPacket>,
    mouse: Cell<MousePacket>,
    touch: Cell<TouchDevicePacket>,
    keyboard_fails: Cell<bool>,
    mouse_fails: Cell<bool>,
    touch_fails: Cell<bool>,

    /// Device name per gamepad slot, `None` while disconnected
    gamepad_names: [Cell<Option<&'static str>>; MAX_GAMEPAD_COUNT],
    gamepads: [Cell<GamepadPacket>; MAX_GAMEPAD_COUNT],
}

impl FakeHid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&self, key: HidKey, down: bool) {
        let mut packet = self.keyboard.get();
        packet.set_key(key, down);
        self.keyboard.set(packet);
    }

    pub fn set_keyboard_fails(&self, fails: bool) {
        self.keyboard_fails.set(fails);
    }

    pub fn set_mouse_position(&self, x: i32, y: i32) {
        let mut packet = self.mouse.get();
        packet.position = IVec2::new(x, y);
        self.mouse.set(packet);
    }

    pub fn set_mouse_button(&self, button: HidMouseButton, down: bool) {
        let mut packet = self.mouse.get();
        packet.set_button(button, down);
        self.mouse.set(packet);
    }

    pub fn scroll(&self, ticks: i32) {
        let mut packet = self.mouse.get();
        packet.wheel += ticks;
        self.mouse.set(packet);
    }

    pub fn set_mouse_fails(&self, fails: bool) {
        self.mouse_fails.set(fails);
    }

    pub fn set_touch(&self, slot: usize, position: Option<(i32, i32)>) {
        let mut packet = self.touch.get();
        packet.set_touch(slot, position.map(|(x, y)| IVec2::new(x, y)));
        self.touch.set(packet);
    }

    pub fn set_touch_fails(&self, fails: bool) {
        self.touch_fails.set(fails);
    }

    pub fn connect_gamepad(&self, index: usize, name: &'static str) {
        self.gamepad_names[index].set(Some(name));
        self.gamepads[index].set(GamepadPacket::default());
    }

    pub fn disconnect_gamepad(&self, index: usize) {
        self.gamepad_names[index].set(None);
        self.gamepads[index].set(GamepadPacket::default());
    }

    pub fn set_gamepad_axis(&self, index: usize, axis: usize, value: f32) {
        let mut packet = self.gamepads[index].get();
        packet.set_axis(axis, value);
        self.gamepads[index].set(packet);
    }

    pub fn set_gamepad_button(&self, index: usize, button: usize, down: bool) {
        let mut packet = self.gamepads[index].get();
        packet.set_button(button, down);
        self.gamepads[index].set(packet);
    }
}

impl HidContext for FakeHid {
    fn keyboard_packet(&self) -> Option<KeyboardPacket> {
        (!self.keyboard_fails.get()).then(|| self.keyboard.get())
    }

    fn mouse_packet(&self) -> Option<MousePacket> {
        (!self.mouse_fails.get()).then(|| self.mouse.get())
    }

    fn touch_packet(&self) -> Option<TouchDevicePacket> {
        (!self.touch_fails.get()).then(|| self.touch.get())
    }

    fn gamepad_connected(&self, index: usize) -> bool {
        self.gamepad_device_name(index).is_some()
    }

    fn gamepad_device_name(&self, index: usize) -> Option<&str> {
        self.gamepad_names.get(index)?.get()
    }

    fn gamepad_packet(&self, index: usize) -> Option<GamepadPacket> {
        self.gamepad_device_name(index)?;
        self.gamepads.get(index).map(Cell::get)
    }
}
