//! ### English
//! Bidirectional mapping between UI key codes and target key codes.
//!
//! ### 中文
//! UI 键码与目标键码之间的双向映射。

use super::codes::{buttons, keys};
use super::ui_code::{UiKeyCode, UiMouseButton};

/// ### English
/// Maps a UI key code to its target key code; unmapped codes become [`keys::UNKNOWN`].
///
/// Several UI keys share a target code (`Meta`/`Alt` both map to `ALT_LEFT`, `Delete` maps to
/// `DEL`); [`key_to_ui_key`] picks one canonical UI key for each of those.
///
/// ### 中文
/// 将 UI 键码映射为目标键码；未映射的键码返回 [`keys::UNKNOWN`]。
///
/// 部分 UI 键共享同一目标键码（`Meta`/`Alt` 都映射到 `ALT_LEFT`，`Delete` 映射到 `DEL`）；
/// [`key_to_ui_key`] 为这些键各选一个规范 UI 键。
pub fn ui_key_to_key(code: UiKeyCode) -> i32 {
    match code {
        UiKeyCode::LeftParenthesis => keys::LEFT_BRACKET,
        UiKeyCode::RightParenthesis => keys::RIGHT_BRACKET,
        UiKeyCode::DeadGrave => keys::GRAVE,
        UiKeyCode::Multiply => keys::STAR,
        UiKeyCode::NumLock => keys::NUM,
        UiKeyCode::Decimal => keys::PERIOD,
        UiKeyCode::Divide => keys::SLASH,
        UiKeyCode::Meta => keys::ALT_LEFT,
        UiKeyCode::At => keys::AT,
        UiKeyCode::Equals => keys::EQUALS,
        UiKeyCode::Digit0 => keys::NUM_0,
        UiKeyCode::Digit1 => keys::NUM_1,
        UiKeyCode::Digit2 => keys::NUM_2,
        UiKeyCode::Digit3 => keys::NUM_3,
        UiKeyCode::Digit4 => keys::NUM_4,
        UiKeyCode::Digit5 => keys::NUM_5,
        UiKeyCode::Digit6 => keys::NUM_6,
        UiKeyCode::Digit7 => keys::NUM_7,
        UiKeyCode::Digit8 => keys::NUM_8,
        UiKeyCode::Digit9 => keys::NUM_9,
        UiKeyCode::A => keys::A,
        UiKeyCode::B => keys::B,
        UiKeyCode::C => keys::C,
        UiKeyCode::D => keys::D,
        UiKeyCode::E => keys::E,
        UiKeyCode::F => keys::F,
        UiKeyCode::G => keys::G,
        UiKeyCode::H => keys::H,
        UiKeyCode::I => keys::I,
        UiKeyCode::J => keys::J,
        UiKeyCode::K => keys::K,
        UiKeyCode::L => keys::L,
        UiKeyCode::M => keys::M,
        UiKeyCode::N => keys::N,
        UiKeyCode::O => keys::O,
        UiKeyCode::P => keys::P,
        UiKeyCode::Q => keys::Q,
        UiKeyCode::R => keys::R,
        UiKeyCode::S => keys::S,
        UiKeyCode::T => keys::T,
        UiKeyCode::U => keys::U,
        UiKeyCode::V => keys::V,
        UiKeyCode::W => keys::W,
        UiKeyCode::X => keys::X,
        UiKeyCode::Y => keys::Y,
        UiKeyCode::Z => keys::Z,
        UiKeyCode::Alt => keys::ALT_LEFT,
        UiKeyCode::BackSlash => keys::BACKSLASH,
        UiKeyCode::Comma => keys::COMMA,
        UiKeyCode::Left => keys::DPAD_LEFT,
        UiKeyCode::Right => keys::DPAD_RIGHT,
        UiKeyCode::Up => keys::DPAD_UP,
        UiKeyCode::Down => keys::DPAD_DOWN,
        UiKeyCode::Enter => keys::ENTER,
        UiKeyCode::Home => keys::HOME,
        UiKeyCode::Minus => keys::MINUS,
        UiKeyCode::Period => keys::PERIOD,
        UiKeyCode::Add => keys::PLUS,
        UiKeyCode::Semicolon => keys::SEMICOLON,
        UiKeyCode::Shift => keys::SHIFT_LEFT,
        UiKeyCode::Slash => keys::SLASH,
        UiKeyCode::Space => keys::SPACE,
        UiKeyCode::Tab => keys::TAB,
        UiKeyCode::Control => keys::CONTROL_LEFT,
        UiKeyCode::PageDown => keys::PAGE_DOWN,
        UiKeyCode::PageUp => keys::PAGE_UP,
        UiKeyCode::Escape => keys::ESCAPE,
        UiKeyCode::End => keys::END,
        UiKeyCode::Insert => keys::INSERT,
        UiKeyCode::Delete => keys::DEL,
        UiKeyCode::Subtract => keys::MINUS,
        UiKeyCode::Quote => keys::APOSTROPHE,
        UiKeyCode::F1 => keys::F1,
        UiKeyCode::F2 => keys::F2,
        UiKeyCode::F3 => keys::F3,
        UiKeyCode::F4 => keys::F4,
        UiKeyCode::F5 => keys::F5,
        UiKeyCode::F6 => keys::F6,
        UiKeyCode::F7 => keys::F7,
        UiKeyCode::F8 => keys::F8,
        UiKeyCode::F9 => keys::F9,
        UiKeyCode::F10 => keys::F10,
        UiKeyCode::F11 => keys::F11,
        UiKeyCode::F12 => keys::F12,
        UiKeyCode::Colon => keys::COLON,
        UiKeyCode::Numpad0 => keys::NUMPAD_0,
        UiKeyCode::Numpad1 => keys::NUMPAD_1,
        UiKeyCode::Numpad2 => keys::NUMPAD_2,
        UiKeyCode::Numpad3 => keys::NUMPAD_3,
        UiKeyCode::Numpad4 => keys::NUMPAD_4,
        UiKeyCode::Numpad5 => keys::NUMPAD_5,
        UiKeyCode::Numpad6 => keys::NUMPAD_6,
        UiKeyCode::Numpad7 => keys::NUMPAD_7,
        UiKeyCode::Numpad8 => keys::NUMPAD_8,
        UiKeyCode::Numpad9 => keys::NUMPAD_9,
        UiKeyCode::Undefined => keys::UNKNOWN,
    }
}

/// ### English
/// Reverse lookup: target key code to its canonical UI key code.
///
/// Unknown target codes (including [`keys::UNKNOWN`]) map to [`UiKeyCode::Undefined`].
///
/// ### 中文
/// 反向查询：目标键码到规范 UI 键码。
///
/// 未知目标键码（包括 [`keys::UNKNOWN`]）映射为 [`UiKeyCode::Undefined`]。
pub fn key_to_ui_key(key: i32) -> UiKeyCode {
    match key {
        keys::LEFT_BRACKET => UiKeyCode::LeftParenthesis,
        keys::RIGHT_BRACKET => UiKeyCode::RightParenthesis,
        keys::GRAVE => UiKeyCode::DeadGrave,
        keys::STAR => UiKeyCode::Multiply,
        keys::NUM => UiKeyCode::NumLock,
        keys::AT => UiKeyCode::At,
        keys::EQUALS => UiKeyCode::Equals,
        keys::NUM_0 => UiKeyCode::Digit0,
        keys::NUM_1 => UiKeyCode::Digit1,
        keys::NUM_2 => UiKeyCode::Digit2,
        keys::NUM_3 => UiKeyCode::Digit3,
        keys::NUM_4 => UiKeyCode::Digit4,
        keys::NUM_5 => UiKeyCode::Digit5,
        keys::NUM_6 => UiKeyCode::Digit6,
        keys::NUM_7 => UiKeyCode::Digit7,
        keys::NUM_8 => UiKeyCode::Digit8,
        keys::NUM_9 => UiKeyCode::Digit9,
        keys::A => UiKeyCode::A,
        keys::B => UiKeyCode::B,
        keys::C => UiKeyCode::C,
        keys::D => UiKeyCode::D,
        keys::E => UiKeyCode::E,
        keys::F => UiKeyCode::F,
        keys::G => UiKeyCode::G,
        keys::H => UiKeyCode::H,
        keys::I => UiKeyCode::I,
        keys::J => UiKeyCode::J,
        keys::K => UiKeyCode::K,
        keys::L => UiKeyCode::L,
        keys::M => UiKeyCode::M,
        keys::N => UiKeyCode::N,
        keys::O => UiKeyCode::O,
        keys::P => UiKeyCode::P,
        keys::Q => UiKeyCode::Q,
        keys::R => UiKeyCode::R,
        keys::S => UiKeyCode::S,
        keys::T => UiKeyCode::T,
        keys::U => UiKeyCode::U,
        keys::V => UiKeyCode::V,
        keys::W => UiKeyCode::W,
        keys::X => UiKeyCode::X,
        keys::Y => UiKeyCode::Y,
        keys::Z => UiKeyCode::Z,
        keys::ALT_LEFT | keys::ALT_RIGHT => UiKeyCode::Alt,
        keys::BACKSLASH => UiKeyCode::BackSlash,
        keys::COMMA => UiKeyCode::Comma,
        keys::FORWARD_DEL | keys::DEL => UiKeyCode::Delete,
        keys::DPAD_LEFT => UiKeyCode::Left,
        keys::DPAD_RIGHT => UiKeyCode::Right,
        keys::DPAD_UP => UiKeyCode::Up,
        keys::DPAD_DOWN => UiKeyCode::Down,
        keys::ENTER => UiKeyCode::Enter,
        keys::HOME => UiKeyCode::Home,
        keys::MINUS => UiKeyCode::Minus,
        keys::PERIOD => UiKeyCode::Period,
        keys::PLUS => UiKeyCode::Add,
        keys::SEMICOLON => UiKeyCode::Semicolon,
        keys::SHIFT_LEFT | keys::SHIFT_RIGHT => UiKeyCode::Shift,
        keys::SLASH => UiKeyCode::Slash,
        keys::SPACE => UiKeyCode::Space,
        keys::TAB => UiKeyCode::Tab,
        keys::CONTROL_LEFT | keys::CONTROL_RIGHT => UiKeyCode::Control,
        keys::PAGE_DOWN => UiKeyCode::PageDown,
        keys::PAGE_UP => UiKeyCode::PageUp,
        keys::ESCAPE => UiKeyCode::Escape,
        keys::END => UiKeyCode::End,
        keys::INSERT => UiKeyCode::Insert,
        keys::APOSTROPHE => UiKeyCode::Quote,
        keys::F1 => UiKeyCode::F1,
        keys::F2 => UiKeyCode::F2,
        keys::F3 => UiKeyCode::F3,
        keys::F4 => UiKeyCode::F4,
        keys::F5 => UiKeyCode::F5,
        keys::F6 => UiKeyCode::F6,
        keys::F7 => UiKeyCode::F7,
        keys::F8 => UiKeyCode::F8,
        keys::F9 => UiKeyCode::F9,
        keys::F10 => UiKeyCode::F10,
        keys::F11 => UiKeyCode::F11,
        keys::F12 => UiKeyCode::F12,
        keys::COLON => UiKeyCode::Colon,
        keys::NUMPAD_0 => UiKeyCode::Numpad0,
        keys::NUMPAD_1 => UiKeyCode::Numpad1,
        keys::NUMPAD_2 => UiKeyCode::Numpad2,
        keys::NUMPAD_3 => UiKeyCode::Numpad3,
        keys::NUMPAD_4 => UiKeyCode::Numpad4,
        keys::NUMPAD_5 => UiKeyCode::Numpad5,
        keys::NUMPAD_6 => UiKeyCode::Numpad6,
        keys::NUMPAD_7 => UiKeyCode::Numpad7,
        keys::NUMPAD_8 => UiKeyCode::Numpad8,
        keys::NUMPAD_9 => UiKeyCode::Numpad9,
        _ => UiKeyCode::Undefined,
    }
}

/// ### English
/// Maps a UI mouse button to a target button code; buttons without a mapping count as `LEFT`.
///
/// ### 中文
/// 将 UI 鼠标按键映射为目标按键码；无映射的按键视为 `LEFT`。
pub fn ui_button_to_button(button: UiMouseButton) -> i32 {
    match button {
        UiMouseButton::Secondary => buttons::RIGHT,
        UiMouseButton::Middle => buttons::MIDDLE,
        UiMouseButton::Primary | UiMouseButton::None => buttons::LEFT,
    }
}

/// ### English
/// Reverse of [`ui_button_to_button`].
///
/// ### 中文
/// [`ui_button_to_button`] 的反向映射。
pub fn button_to_ui_button(button: i32) -> UiMouseButton {
    match button {
        buttons::LEFT => UiMouseButton::Primary,
        buttons::RIGHT => UiMouseButton::Secondary,
        buttons::MIDDLE => UiMouseButton::Middle,
        _ => UiMouseButton::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_digits_and_function_keys_round_trip() {
        for code in [
            UiKeyCode::A,
            UiKeyCode::Z,
            UiKeyCode::Digit0,
            UiKeyCode::Digit9,
            UiKeyCode::F1,
            UiKeyCode::F12,
            UiKeyCode::Numpad5,
            UiKeyCode::Escape,
        ] {
            assert_eq!(key_to_ui_key(ui_key_to_key(code)), code);
        }
    }

    #[test]
    fn known_target_values() {
        assert_eq!(ui_key_to_key(UiKeyCode::A), 29);
        assert_eq!(ui_key_to_key(UiKeyCode::Digit0), 7);
        assert_eq!(ui_key_to_key(UiKeyCode::Escape), 131);
        assert_eq!(ui_key_to_key(UiKeyCode::F1), 244);
        assert_eq!(ui_key_to_key(UiKeyCode::Numpad0), 144);
    }

    #[test]
    fn aliases_share_a_target_code() {
        assert_eq!(ui_key_to_key(UiKeyCode::Meta), keys::ALT_LEFT);
        assert_eq!(ui_key_to_key(UiKeyCode::Alt), keys::ALT_LEFT);
        assert_eq!(key_to_ui_key(keys::ALT_LEFT), UiKeyCode::Alt);
        assert_eq!(ui_key_to_key(UiKeyCode::Subtract), keys::MINUS);
        assert_eq!(key_to_ui_key(keys::MINUS), UiKeyCode::Minus);
    }

    #[test]
    fn unknown_codes_map_to_canonical_values() {
        assert_eq!(ui_key_to_key(UiKeyCode::Undefined), keys::UNKNOWN);
        assert_eq!(key_to_ui_key(keys::UNKNOWN), UiKeyCode::Undefined);
        assert_eq!(key_to_ui_key(9999), UiKeyCode::Undefined);
    }

    #[test]
    fn buttons_map_both_ways() {
        assert_eq!(ui_button_to_button(UiMouseButton::Primary), buttons::LEFT);
        assert_eq!(ui_button_to_button(UiMouseButton::None), buttons::LEFT);
        assert_eq!(button_to_ui_button(buttons::MIDDLE), UiMouseButton::Middle);
        assert_eq!(button_to_ui_button(buttons::FORWARD), UiMouseButton::None);
    }
}
