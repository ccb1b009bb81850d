// Polling backend fed by winit window events

use super::{
    GamepadPacket, HidContext, HidKey, HidMouseButton, KeyboardPacket, MousePacket,
    TouchDevicePacket, MAX_TOUCH_COUNT,
};
use glam::IVec2;
use std::cell::Cell;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels per wheel tick when the platform reports pixel scroll deltas
const PIXELS_PER_WHEEL_TICK: f64 = 120.0;

/// HID backend that accumulates winit window events into packets
///
/// The event loop feeds events through `handle_window_event`, the input core
/// polls the resulting packets once per frame. winit has no gamepad support,
/// so every gamepad slot reports as disconnected.
#[derive(Debug, Default)]
pub struct WinitHid {
    keyboard: Cell<KeyboardPacket>,
    mouse: Cell<MousePacket>,
    touch: Cell<TouchDevicePacket>,

    /// winit touch id occupying each touch slot
    touch_ids: Cell<[Option<u64>; MAX_TOUCH_COUNT]>,

    /// Sub-tick remainder of pixel based scrolling
    wheel_remainder: Cell<f64>,
}

impl WinitHid {
    /// Create a backend with every device in its rest state
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a window event into the device packets
    pub fn handle_window_event(&self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(key) = hid_key(code) {
                        let mut packet = self.keyboard.get();
                        packet.set_key(key, event.state == ElementState::Pressed);
                        self.keyboard.set(packet);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let mut packet = self.mouse.get();
                packet.position = IVec2::new(position.x as i32, position.y as i32);
                self.mouse.set(packet);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = hid_mouse_button(*button) {
                    let mut packet = self.mouse.get();
                    packet.set_button(button, *state == ElementState::Pressed);
                    self.mouse.set(packet);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let ticks = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y.round() as i32,
                    MouseScrollDelta::PixelDelta(position) => {
                        let total = self.wheel_remainder.get() + position.y / PIXELS_PER_WHEEL_TICK;
                        let ticks = total.trunc();
                        self.wheel_remainder.set(total - ticks);
                        ticks as i32
                    }
                };
                let mut packet = self.mouse.get();
                packet.wheel += ticks;
                self.mouse.set(packet);
            }
            WindowEvent::Touch(touch) => {
                let position = IVec2::new(touch.location.x as i32, touch.location.y as i32);
                self.handle_touch(touch.id, touch.phase, position);
            }
            WindowEvent::Focused(false) => {
                // Keys released while unfocused never reach us
                self.keyboard.set(KeyboardPacket::default());
            }
            _ => {}
        }
    }

    fn handle_touch(&self, id: u64, phase: TouchPhase, position: IVec2) {
        let mut ids = self.touch_ids.get();
        let mut packet = self.touch.get();
        let slot = ids.iter().position(|slot_id| *slot_id == Some(id));

        match phase {
            TouchPhase::Started | TouchPhase::Moved => {
                let slot = slot.or_else(|| packet.free_slot());
                match slot {
                    Some(slot) => {
                        ids[slot] = Some(id);
                        packet.set_touch(slot, Some(position));
                    }
                    None => log::debug!("Touch {} dropped, all {} slots in use", id, MAX_TOUCH_COUNT),
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if let Some(slot) = slot {
                    ids[slot] = None;
                    packet.set_touch(slot, None);
                }
            }
        }

        self.touch_ids.set(ids);
        self.touch.set(packet);
    }
}

impl HidContext for WinitHid {
    fn keyboard_packet(&self) -> Option<KeyboardPacket> {
        Some(self.keyboard.get())
    }

    fn mouse_packet(&self) -> Option<MousePacket> {
        Some(self.mouse.get())
    }

    fn touch_packet(&self) -> Option<TouchDevicePacket> {
        Some(self.touch.get())
    }

    fn gamepad_connected(&self, _index: usize) -> bool {
        false
    }

    fn gamepad_device_name(&self, _index: usize) -> Option<&str> {
        None
    }

    fn gamepad_packet(&self, _index: usize) -> Option<GamepadPacket> {
        None
    }
}

/// Translate a winit physical key, `None` for keys the HID layer doesn't track
fn hid_key(code: KeyCode) -> Option<HidKey> {
    let key = match code {
        KeyCode::Escape => HidKey::Esc,
        KeyCode::F1 => HidKey::F1,
        KeyCode::F2 => HidKey::F2,
        KeyCode::F3 => HidKey::F3,
        KeyCode::F4 => HidKey::F4,
        KeyCode::F5 => HidKey::F5,
        KeyCode::F6 => HidKey::F6,
        KeyCode::F7 => HidKey::F7,
        KeyCode::F8 => HidKey::F8,
        KeyCode::F9 => HidKey::F9,
        KeyCode::F10 => HidKey::F10,
        KeyCode::F11 => HidKey::F11,
        KeyCode::F12 => HidKey::F12,
        KeyCode::ArrowUp => HidKey::Up,
        KeyCode::ArrowDown => HidKey::Down,
        KeyCode::ArrowLeft => HidKey::Left,
        KeyCode::ArrowRight => HidKey::Right,
        KeyCode::ShiftLeft => HidKey::LShift,
        KeyCode::ShiftRight => HidKey::RShift,
        KeyCode::ControlLeft => HidKey::LCtrl,
        KeyCode::ControlRight => HidKey::RCtrl,
        KeyCode::AltLeft => HidKey::LAlt,
        KeyCode::AltRight => HidKey::RAlt,
        KeyCode::Tab => HidKey::Tab,
        KeyCode::Enter => HidKey::Enter,
        KeyCode::Backspace => HidKey::Backspace,
        KeyCode::Insert => HidKey::Insert,
        KeyCode::Delete => HidKey::Del,
        KeyCode::PageUp => HidKey::PageUp,
        KeyCode::PageDown => HidKey::PageDown,
        KeyCode::Home => HidKey::Home,
        KeyCode::End => HidKey::End,
        KeyCode::Space => HidKey::Space,
        KeyCode::Quote => HidKey::Quote,
        KeyCode::Comma => HidKey::Comma,
        KeyCode::Minus => HidKey::Minus,
        KeyCode::Period => HidKey::Period,
        KeyCode::Slash => HidKey::Slash,
        KeyCode::Digit0 => HidKey::Num0,
        KeyCode::Digit1 => HidKey::Num1,
        KeyCode::Digit2 => HidKey::Num2,
        KeyCode::Digit3 => HidKey::Num3,
        KeyCode::Digit4 => HidKey::Num4,
        KeyCode::Digit5 => HidKey::Num5,
        KeyCode::Digit6 => HidKey::Num6,
        KeyCode::Digit7 => HidKey::Num7,
        KeyCode::Digit8 => HidKey::Num8,
        KeyCode::Digit9 => HidKey::Num9,
        KeyCode::Semicolon => HidKey::Semicolon,
        KeyCode::Equal => HidKey::Equals,
        KeyCode::KeyA => HidKey::A,
        KeyCode::KeyB => HidKey::B,
        KeyCode::KeyC => HidKey::C,
        KeyCode::KeyD => HidKey::D,
        KeyCode::KeyE => HidKey::E,
        KeyCode::KeyF => HidKey::F,
        KeyCode::KeyG => HidKey::G,
        KeyCode::KeyH => HidKey::H,
        KeyCode::KeyI => HidKey::I,
        KeyCode::KeyJ => HidKey::J,
        KeyCode::KeyK => HidKey::K,
        KeyCode::KeyL => HidKey::L,
        KeyCode::KeyM => HidKey::M,
        KeyCode::KeyN => HidKey::N,
        KeyCode::KeyO => HidKey::O,
        KeyCode::KeyP => HidKey::P,
        KeyCode::KeyQ => HidKey::Q,
        KeyCode::KeyR => HidKey::R,
        KeyCode::KeyS => HidKey::S,
        KeyCode::KeyT => HidKey::T,
        KeyCode::KeyU => HidKey::U,
        KeyCode::KeyV => HidKey::V,
        KeyCode::KeyW => HidKey::W,
        KeyCode::KeyX => HidKey::X,
        KeyCode::KeyY => HidKey::Y,
        KeyCode::KeyZ => HidKey::Z,
        KeyCode::BracketLeft => HidKey::LBracket,
        KeyCode::Backslash => HidKey::Backslash,
        KeyCode::BracketRight => HidKey::RBracket,
        KeyCode::Backquote => HidKey::Backquote,
        KeyCode::Numpad0 => HidKey::Kp0,
        KeyCode::Numpad1 => HidKey::Kp1,
        KeyCode::Numpad2 => HidKey::Kp2,
        KeyCode::Numpad3 => HidKey::Kp3,
        KeyCode::Numpad4 => HidKey::Kp4,
        KeyCode::Numpad5 => HidKey::Kp5,
        KeyCode::Numpad6 => HidKey::Kp6,
        KeyCode::Numpad7 => HidKey::Kp7,
        KeyCode::Numpad8 => HidKey::Kp8,
        KeyCode::Numpad9 => HidKey::Kp9,
        KeyCode::NumpadDivide => HidKey::KpDivide,
        KeyCode::NumpadMultiply => HidKey::KpMultiply,
        KeyCode::NumpadSubtract => HidKey::KpSubtract,
        KeyCode::NumpadAdd => HidKey::KpAdd,
        KeyCode::NumpadDecimal => HidKey::KpDecimal,
        KeyCode::NumpadEqual => HidKey::KpEqual,
        KeyCode::NumpadEnter => HidKey::KpEnter,
        _ => return None,
    };
    Some(key)
}

fn hid_mouse_button(button: MouseButton) -> Option<HidMouseButton> {
    match button {
        MouseButton::Left => Some(HidMouseButton::Button1),
        MouseButton::Right => Some(HidMouseButton::Button2),
        MouseButton::Middle => Some(HidMouseButton::Button3),
        MouseButton::Back => Some(HidMouseButton::Button4),
        MouseButton::Forward => Some(HidMouseButton::Button5),
        MouseButton::Other(6) => Some(HidMouseButton::Button6),
        MouseButton::Other(7) => Some(HidMouseButton::Button7),
        MouseButton::Other(8) => Some(HidMouseButton::Button8),
        _ => None,
    }
}
