/// ### English
/// Platform-native key codes reported by the UI toolkit.
///
/// Only the codes the translation table knows are listed; everything else arrives as
/// [`UiKeyCode::Undefined`].
///
/// ### 中文
/// UI 工具包上报的平台原生键码。
///
/// 只列出转换表认识的键码；其它键码统一以 [`UiKeyCode::Undefined`] 传入。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiKeyCode {
    Undefined,
    LeftParenthesis,
    RightParenthesis,
    DeadGrave,
    Multiply,
    NumLock,
    Decimal,
    Divide,
    Meta,
    At,
    Equals,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
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
    Alt,
    BackSlash,
    Comma,
    Left,
    Right,
    Up,
    Down,
    Enter,
    Home,
    Minus,
    Period,
    Add,
    Semicolon,
    Shift,
    Slash,
    Space,
    Tab,
    Control,
    PageDown,
    PageUp,
    Escape,
    End,
    Insert,
    Delete,
    Subtract,
    Quote,
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
    Colon,
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
}

/// ### English
/// Platform-native mouse buttons reported by the UI toolkit.
///
/// ### 中文
/// UI 工具包上报的平台原生鼠标按键。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum UiMouseButton {
    #[default]
    None,
    Primary,
    Secondary,
    Middle,
}
