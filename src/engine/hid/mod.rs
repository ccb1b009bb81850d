// Device polling layer
//
// Raw device state is exposed as fixed-size, `Copy` packets so the input core
// can snapshot them every frame without touching the heap. Each device class
// has its own packet layout; a backend implements `HidContext` to hand them out.

mod winit_hid;

#[cfg(test)]
pub mod testing;

pub use winit_hid::WinitHid;

use glam::IVec2;

/// Number of gamepad slots a backend can report
pub const MAX_GAMEPAD_COUNT: usize = 16;

/// Axis samples carried by one gamepad packet
pub const MAX_GAMEPAD_AXIS_COUNT: usize = 32;

/// Buttons carried by one gamepad packet (one bit each)
pub const MAX_GAMEPAD_BUTTON_COUNT: usize = 32;

/// Simultaneous touch points tracked per touch device
pub const MAX_TOUCH_COUNT: usize = 16;

/// Physical keys as reported by the polling layer
///
/// The order is the backend's scan order and is unrelated to the order of
/// `input::Key`; the input core translates between them with a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HidKey {
    Esc,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Up,
    Down,
    Left,
    Right,
    LShift,
    RShift,
    LCtrl,
    RCtrl,
    LAlt,
    RAlt,
    Tab,
    Enter,
    Backspace,
    Insert,
    Del,
    PageUp,
    PageDown,
    Home,
    End,
    Space,
    Exclaim,
    QuoteDbl,
    Hash,
    Dollar,
    Ampersand,
    Quote,
    LParen,
    RParen,
    Asterisk,
    Plus,
    Comma,
    Minus,
    Period,
    Slash,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Colon,
    Semicolon,
    Less,
    Equals,
    Greater,
    Question,
    At,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    LBracket,
    Backslash,
    RBracket,
    Caret,
    Underscore,
    Backquote,
    LBrace,
    Pipe,
    RBrace,
    Tilde,
    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    KpDivide,
    KpMultiply,
    KpSubtract,
    KpAdd,
    KpDecimal,
    KpEqual,
    KpEnter,
}

/// Number of `HidKey` variants
pub const HID_KEY_COUNT: usize = HidKey::KpEnter as usize + 1;

const KEY_WORDS: usize = (HID_KEY_COUNT + 31) / 32;

/// Mouse buttons as reported by the polling layer
///
/// Buttons are numbered the way most drivers do: 1 is the primary (left)
/// button, 2 the secondary (right) and 3 the wheel (middle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HidMouseButton {
    Button1,
    Button2,
    Button3,
    Button4,
    Button5,
    Button6,
    Button7,
    Button8,
}

/// Snapshot of every key's up/down state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardPacket {
    keys: [u32; KEY_WORDS],
}

impl KeyboardPacket {
    /// Check if a key is held down
    pub fn key(&self, key: HidKey) -> bool {
        let index = key as usize;
        self.keys[index / 32] & (1 << (index % 32)) != 0
    }

    /// Set the state of a key
    pub fn set_key(&mut self, key: HidKey, down: bool) {
        let index = key as usize;
        if down {
            self.keys[index / 32] |= 1 << (index % 32);
        } else {
            self.keys[index / 32] &= !(1 << (index % 32));
        }
    }
}

/// Snapshot of cursor position, accumulated wheel and buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MousePacket {
    /// Cursor position in window pixels
    pub position: IVec2,

    /// Accumulated wheel ticks since the device was opened
    pub wheel: i32,

    buttons: u8,
}

impl MousePacket {
    /// Check if a button is held down
    pub fn button(&self, button: HidMouseButton) -> bool {
        self.buttons & (1 << button as u8) != 0
    }

    /// Set the state of a button
    pub fn set_button(&mut self, button: HidMouseButton, down: bool) {
        if down {
            self.buttons |= 1 << button as u8;
        } else {
            self.buttons &= !(1 << button as u8);
        }
    }
}

/// Snapshot of a gamepad's raw axes and buttons, indexed by hardware index
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadPacket {
    /// Raw axis samples, nominally in [-1, 1]
    pub axes: [f32; MAX_GAMEPAD_AXIS_COUNT],

    buttons: u32,
}

impl GamepadPacket {
    /// Get an axis sample, 0.0 for indices outside the packet
    pub fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    /// Set an axis sample, ignoring indices outside the packet
    pub fn set_axis(&mut self, index: usize, value: f32) {
        if let Some(axis) = self.axes.get_mut(index) {
            *axis = value;
        }
    }

    /// Check if a button is held down
    pub fn button(&self, index: usize) -> bool {
        index < MAX_GAMEPAD_BUTTON_COUNT && self.buttons & (1 << index) != 0
    }

    /// Set the state of a button, ignoring indices outside the packet
    pub fn set_button(&mut self, index: usize, down: bool) {
        if index >= MAX_GAMEPAD_BUTTON_COUNT {
            return;
        }
        if down {
            self.buttons |= 1 << index;
        } else {
            self.buttons &= !(1 << index);
        }
    }
}

/// Snapshot of active touch points, one optional position per slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchDevicePacket {
    touches: [Option<IVec2>; MAX_TOUCH_COUNT],
}

impl TouchDevicePacket {
    /// Position of the touch in `slot`, if one is active
    pub fn touch(&self, slot: usize) -> Option<IVec2> {
        self.touches.get(slot).copied().flatten()
    }

    /// Set or clear the touch in `slot`
    pub fn set_touch(&mut self, slot: usize, position: Option<IVec2>) {
        if let Some(touch) = self.touches.get_mut(slot) {
            *touch = position;
        }
    }

    /// First slot without an active touch
    pub fn free_slot(&self) -> Option<usize> {
        self.touches.iter().position(|t| t.is_none())
    }
}

/// Device polling interface consumed by the input core
///
/// Every fetch is a non-blocking snapshot and returns `None` when the device
/// class could not be read this frame. Calling a fetch twice in the same frame
/// yields the same packet.
pub trait HidContext {
    /// Current keyboard state
    fn keyboard_packet(&self) -> Option<KeyboardPacket>;

    /// Current mouse state
    fn mouse_packet(&self) -> Option<MousePacket>;

    /// Current touch state
    fn touch_packet(&self) -> Option<TouchDevicePacket>;

    /// Check if a gamepad is plugged into `index`
    fn gamepad_connected(&self, index: usize) -> bool;

    /// Device name of the gamepad at `index`, `None` when nothing is connected
    fn gamepad_device_name(&self, index: usize) -> Option<&str>;

    /// Current state of the gamepad at `index`
    fn gamepad_packet(&self, index: usize) -> Option<GamepadPacket>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_packet_keys() {
        let mut packet = KeyboardPacket::default();
        assert!(!packet.key(HidKey::Space));

        packet.set_key(HidKey::Space, true);
        packet.set_key(HidKey::KpEnter, true);
        assert!(packet.key(HidKey::Space));
        assert!(packet.key(HidKey::KpEnter));
        assert!(!packet.key(HidKey::A));

        packet.set_key(HidKey::Space, false);
        assert!(!packet.key(HidKey::Space));
        assert!(packet.key(HidKey::KpEnter));
    }

    #[test]
    fn test_mouse_packet_buttons() {
        let mut packet = MousePacket::default();
        packet.set_button(HidMouseButton::Button8, true);
        assert!(packet.button(HidMouseButton::Button8));
        assert!(!packet.button(HidMouseButton::Button1));

        packet.set_button(HidMouseButton::Button8, false);
        assert!(!packet.button(HidMouseButton::Button8));
    }

    #[test]
    fn test_gamepad_packet_out_of_range() {
        let mut packet = GamepadPacket::default();
        packet.set_axis(MAX_GAMEPAD_AXIS_COUNT, 1.0);
        packet.set_button(MAX_GAMEPAD_BUTTON_COUNT, true);

        assert_eq!(packet.axis(MAX_GAMEPAD_AXIS_COUNT), 0.0);
        assert!(!packet.button(MAX_GAMEPAD_BUTTON_COUNT));
    }

    #[test]
    fn test_gamepad_packet_buttons() {
        let mut packet = GamepadPacket::default();
        packet.set_button(31, true);
        packet.set_axis(2, -0.5);

        assert!(packet.button(31));
        assert!(!packet.button(0));
        assert_eq!(packet.axis(2), -0.5);
    }

    #[test]
    fn test_touch_packet_slots() {
        let mut packet = TouchDevicePacket::default();
        assert_eq!(packet.free_slot(), Some(0));

        packet.set_touch(0, Some(IVec2::new(10, 20)));
        assert_eq!(packet.touch(0), Some(IVec2::new(10, 20)));
        assert_eq!(packet.free_slot(), Some(1));

        assert_eq!(packet.touch(MAX_TOUCH_COUNT + 3), None);
    }
}
