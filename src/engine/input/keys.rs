// Raw input identifiers used in binding definitions
//
// These enums are the stable vocabulary of binding files. The polling layer
// has its own numbering (`HidKey`, `HidMouseButton`); the tables below
// translate between the two by direct indexing.

use crate::engine::hid::{HidKey, HidMouseButton};
use serde::{Deserialize, Serialize};

/// Keyboard keys a trigger can listen to
///
/// Binding files name keys in upper case without separators (`"LSHIFT"`,
/// `"PAGEUP"`). Digits are bare (`"0"`) and keypad keys carry a `KP_`
/// prefix (`"KP_0"`, `"KP_ENTER"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Key {
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
    #[serde(rename = "0")]
    Num0,
    #[serde(rename = "1")]
    Num1,
    #[serde(rename = "2")]
    Num2,
    #[serde(rename = "3")]
    Num3,
    #[serde(rename = "4")]
    Num4,
    #[serde(rename = "5")]
    Num5,
    #[serde(rename = "6")]
    Num6,
    #[serde(rename = "7")]
    Num7,
    #[serde(rename = "8")]
    Num8,
    #[serde(rename = "9")]
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
    #[serde(rename = "KP_0")]
    Kp0,
    #[serde(rename = "KP_1")]
    Kp1,
    #[serde(rename = "KP_2")]
    Kp2,
    #[serde(rename = "KP_3")]
    Kp3,
    #[serde(rename = "KP_4")]
    Kp4,
    #[serde(rename = "KP_5")]
    Kp5,
    #[serde(rename = "KP_6")]
    Kp6,
    #[serde(rename = "KP_7")]
    Kp7,
    #[serde(rename = "KP_8")]
    Kp8,
    #[serde(rename = "KP_9")]
    Kp9,
    #[serde(rename = "KP_DIVIDE")]
    KpDivide,
    #[serde(rename = "KP_MULTIPLY")]
    KpMultiply,
    #[serde(rename = "KP_SUBTRACT")]
    KpSubtract,
    #[serde(rename = "KP_ADD")]
    KpAdd,
    #[serde(rename = "KP_DECIMAL")]
    KpDecimal,
    #[serde(rename = "KP_EQUAL")]
    KpEqual,
    #[serde(rename = "KP_ENTER")]
    KpEnter,
}

impl Key {
    /// Number of `Key` variants
    pub const COUNT: usize = Key::KpEnter as usize + 1;

    /// The polling layer's identifier for this key
    pub fn hid_key(self) -> HidKey {
        KEY_MAP[self as usize]
    }
}

/// Mouse inputs a trigger can listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum MouseInput {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    Button1,
    Button2,
    Button3,
    Button4,
    Button5,
    Button6,
    Button7,
    Button8,
}

impl MouseInput {
    /// Number of `MouseInput` variants
    pub const COUNT: usize = MouseInput::Button8 as usize + 1;

    /// The polling layer's button for this input, `None` for wheel directions
    pub fn hid_button(self) -> Option<HidMouseButton> {
        MOUSE_BUTTON_MAP[self as usize]
    }
}

/// Logical gamepad inputs, independent of any controller's physical layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum GamepadInput {
    LstickLeft,
    LstickRight,
    LstickDown,
    LstickUp,
    LstickClick,
    Ltrigger,
    Lshoulder,
    LpadLeft,
    LpadRight,
    LpadDown,
    LpadUp,
    RstickLeft,
    RstickRight,
    RstickDown,
    RstickUp,
    RstickClick,
    Rtrigger,
    Rshoulder,
    RpadLeft,
    RpadRight,
    RpadDown,
    RpadUp,
    Start,
    Back,
    Guide,
}

impl GamepadInput {
    /// Number of `GamepadInput` variants
    pub const COUNT: usize = GamepadInput::Guide as usize + 1;
}

/// Definition key -> polling layer key, indexed by `Key as usize`
pub static KEY_MAP: [HidKey; Key::COUNT] = build_key_map();

/// Definition mouse input -> polling layer button, indexed by `MouseInput as usize`
pub static MOUSE_BUTTON_MAP: [Option<HidMouseButton>; MouseInput::COUNT] =
    build_mouse_button_map();

const fn build_key_map() -> [HidKey; Key::COUNT] {
    let mut map = [HidKey::Space; Key::COUNT];
    map[Key::Space as usize] = HidKey::Space;
    map[Key::Exclaim as usize] = HidKey::Exclaim;
    map[Key::QuoteDbl as usize] = HidKey::QuoteDbl;
    map[Key::Hash as usize] = HidKey::Hash;
    map[Key::Dollar as usize] = HidKey::Dollar;
    map[Key::Ampersand as usize] = HidKey::Ampersand;
    map[Key::Quote as usize] = HidKey::Quote;
    map[Key::LParen as usize] = HidKey::LParen;
    map[Key::RParen as usize] = HidKey::RParen;
    map[Key::Asterisk as usize] = HidKey::Asterisk;
    map[Key::Plus as usize] = HidKey::Plus;
    map[Key::Comma as usize] = HidKey::Comma;
    map[Key::Minus as usize] = HidKey::Minus;
    map[Key::Period as usize] = HidKey::Period;
    map[Key::Slash as usize] = HidKey::Slash;
    map[Key::Num0 as usize] = HidKey::Num0;
    map[Key::Num1 as usize] = HidKey::Num1;
    map[Key::Num2 as usize] = HidKey::Num2;
    map[Key::Num3 as usize] = HidKey::Num3;
    map[Key::Num4 as usize] = HidKey::Num4;
    map[Key::Num5 as usize] = HidKey::Num5;
    map[Key::Num6 as usize] = HidKey::Num6;
    map[Key::Num7 as usize] = HidKey::Num7;
    map[Key::Num8 as usize] = HidKey::Num8;
    map[Key::Num9 as usize] = HidKey::Num9;
    map[Key::Colon as usize] = HidKey::Colon;
    map[Key::Semicolon as usize] = HidKey::Semicolon;
    map[Key::Less as usize] = HidKey::Less;
    map[Key::Equals as usize] = HidKey::Equals;
    map[Key::Greater as usize] = HidKey::Greater;
    map[Key::Question as usize] = HidKey::Question;
    map[Key::At as usize] = HidKey::At;
    map[Key::A as usize] = HidKey::A;
    map[Key::B as usize] = HidKey::B;
    map[Key::C as usize] = HidKey::C;
    map[Key::D as usize] = HidKey::D;
    map[Key::E as usize] = HidKey::E;
    map[Key::F as usize] = HidKey::F;
    map[Key::G as usize] = HidKey::G;
    map[Key::H as usize] = HidKey::H;
    map[Key::I as usize] = HidKey::I;
    map[Key::J as usize] = HidKey::J;
    map[Key::K as usize] = HidKey::K;
    map[Key::L as usize] = HidKey::L;
    map[Key::M as usize] = HidKey::M;
    map[Key::N as usize] = HidKey::N;
    map[Key::O as usize] = HidKey::O;
    map[Key::P as usize] = HidKey::P;
    map[Key::Q as usize] = HidKey::Q;
    map[Key::R as usize] = HidKey::R;
    map[Key::S as usize] = HidKey::S;
    map[Key::T as usize] = HidKey::T;
    map[Key::U as usize] = HidKey::U;
    map[Key::V as usize] = HidKey::V;
    map[Key::W as usize] = HidKey::W;
    map[Key::X as usize] = HidKey::X;
    map[Key::Y as usize] = HidKey::Y;
    map[Key::Z as usize] = HidKey::Z;
    map[Key::LBracket as usize] = HidKey::LBracket;
    map[Key::Backslash as usize] = HidKey::Backslash;
    map[Key::RBracket as usize] = HidKey::RBracket;
    map[Key::Caret as usize] = HidKey::Caret;
    map[Key::Underscore as usize] = HidKey::Underscore;
    map[Key::Backquote as usize] = HidKey::Backquote;
    map[Key::LBrace as usize] = HidKey::LBrace;
    map[Key::Pipe as usize] = HidKey::Pipe;
    map[Key::RBrace as usize] = HidKey::RBrace;
    map[Key::Tilde as usize] = HidKey::Tilde;
    map[Key::Esc as usize] = HidKey::Esc;
    map[Key::F1 as usize] = HidKey::F1;
    map[Key::F2 as usize] = HidKey::F2;
    map[Key::F3 as usize] = HidKey::F3;
    map[Key::F4 as usize] = HidKey::F4;
    map[Key::F5 as usize] = HidKey::F5;
    map[Key::F6 as usize] = HidKey::F6;
    map[Key::F7 as usize] = HidKey::F7;
    map[Key::F8 as usize] = HidKey::F8;
    map[Key::F9 as usize] = HidKey::F9;
    map[Key::F10 as usize] = HidKey::F10;
    map[Key::F11 as usize] = HidKey::F11;
    map[Key::F12 as usize] = HidKey::F12;
    map[Key::Up as usize] = HidKey::Up;
    map[Key::Down as usize] = HidKey::Down;
    map[Key::Left as usize] = HidKey::Left;
    map[Key::Right as usize] = HidKey::Right;
    map[Key::LShift as usize] = HidKey::LShift;
    map[Key::RShift as usize] = HidKey::RShift;
    map[Key::LCtrl as usize] = HidKey::LCtrl;
    map[Key::RCtrl as usize] = HidKey::RCtrl;
    map[Key::LAlt as usize] = HidKey::LAlt;
    map[Key::RAlt as usize] = HidKey::RAlt;
    map[Key::Tab as usize] = HidKey::Tab;
    map[Key::Enter as usize] = HidKey::Enter;
    map[Key::Backspace as usize] = HidKey::Backspace;
    map[Key::Insert as usize] = HidKey::Insert;
    map[Key::Del as usize] = HidKey::Del;
    map[Key::PageUp as usize] = HidKey::PageUp;
    map[Key::PageDown as usize] = HidKey::PageDown;
    map[Key::Home as usize] = HidKey::Home;
    map[Key::End as usize] = HidKey::End;
    map[Key::Kp0 as usize] = HidKey::Kp0;
    map[Key::Kp1 as usize] = HidKey::Kp1;
    map[Key::Kp2 as usize] = HidKey::Kp2;
    map[Key::Kp3 as usize] = HidKey::Kp3;
    map[Key::Kp4 as usize] = HidKey::Kp4;
    map[Key::Kp5 as usize] = HidKey::Kp5;
    map[Key::Kp6 as usize] = HidKey::Kp6;
    map[Key::Kp7 as usize] = HidKey::Kp7;
    map[Key::Kp8 as usize] = HidKey::Kp8;
    map[Key::Kp9 as usize] = HidKey::Kp9;
    map[Key::KpDivide as usize] = HidKey::KpDivide;
    map[Key::KpMultiply as usize] = HidKey::KpMultiply;
    map[Key::KpSubtract as usize] = HidKey::KpSubtract;
    map[Key::KpAdd as usize] = HidKey::KpAdd;
    map[Key::KpDecimal as usize] = HidKey::KpDecimal;
    map[Key::KpEqual as usize] = HidKey::KpEqual;
    map[Key::KpEnter as usize] = HidKey::KpEnter;
    map
}

const fn build_mouse_button_map() -> [Option<HidMouseButton>; MouseInput::COUNT] {
    let mut map = [None; MouseInput::COUNT];
    map[MouseInput::Left as usize] = Some(HidMouseButton::Button1);
    map[MouseInput::Middle as usize] = Some(HidMouseButton::Button3);
    map[MouseInput::Right as usize] = Some(HidMouseButton::Button2);
    map[MouseInput::Button1 as usize] = Some(HidMouseButton::Button1);
    map[MouseInput::Button2 as usize] = Some(HidMouseButton::Button2);
    map[MouseInput::Button3 as usize] = Some(HidMouseButton::Button3);
    map[MouseInput::Button4 as usize] = Some(HidMouseButton::Button4);
    map[MouseInput::Button5 as usize] = Some(HidMouseButton::Button5);
    map[MouseInput::Button6 as usize] = Some(HidMouseButton::Button6);
    map[MouseInput::Button7 as usize] = Some(HidMouseButton::Button7);
    map[MouseInput::Button8 as usize] = Some(HidMouseButton::Button8);
    map
}
