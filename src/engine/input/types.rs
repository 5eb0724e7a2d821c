//! ### English
//! Event records: raw UI notifications captured on the UI thread and the target-vocabulary events
//! delivered to input sinks on the game thread.
//!
//! ### 中文
//! 事件记录：UI 线程捕获的原始 UI 通知，以及在游戏线程投递给输入 sink 的目标词汇事件。

use super::keys::{UiKeyCode, UiMouseButton};

/// ### English
/// Pointer notification kind reported by the UI toolkit.
///
/// ### 中文
/// UI 工具包上报的指针通知类型。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Pressed,
    Released,
    Dragged,
    Moved,
}

/// ### English
/// Raw UI-thread notification handed to `InputCapture::handle`.
///
/// Coordinates are surface-relative device pixels.
///
/// ### 中文
/// 交给 `InputCapture::handle` 的原始 UI 线程通知。
///
/// 坐标为相对 surface 的设备像素。
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawUiEvent {
    /// ### English
    /// Key press; `text` is the typed character if the key produced one.
    ///
    /// ### 中文
    /// 按键按下；若产生了字符，`text` 为该字符。
    KeyPressed { code: UiKeyCode, text: Option<char> },
    KeyReleased { code: UiKeyCode },
    Pointer {
        kind: PointerKind,
        x: f64,
        y: f64,
        button: UiMouseButton,
    },
    /// ### English
    /// Scroll wheel; only the sign of `delta_y` is kept.
    ///
    /// ### 中文
    /// 滚轮；只保留 `delta_y` 的符号。
    Scroll { x: f64, y: f64, delta_y: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyEventKind {
    #[default]
    Down,
    Up,
    Typed,
}

/// ### English
/// Pooled key event in the target vocabulary.
///
/// ### 中文
/// 目标词汇下的池化键盘事件。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub key_code: i32,
    pub key_char: char,
    /// ### English
    /// Nanoseconds since the input layer was created.
    ///
    /// ### 中文
    /// 自输入层创建以来的纳秒数。
    pub timestamp: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TouchEventKind {
    #[default]
    Down,
    Up,
    Dragged,
    Moved,
    Scrolled,
}

/// ### English
/// Pooled pointer event in the target vocabulary.
///
/// ### 中文
/// 目标词汇下的池化指针事件。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TouchEvent {
    pub kind: TouchEventKind,
    pub x: i32,
    pub y: i32,
    /// ### English
    /// `-1`, `0` or `1` for `Scrolled`; `0` otherwise.
    ///
    /// ### 中文
    /// `Scrolled` 时为 `-1`、`0` 或 `1`，其它情况为 `0`。
    pub scroll_amount: i32,
    /// ### English
    /// Target button code, `-1` when no button is involved.
    ///
    /// ### 中文
    /// 目标按键码；不涉及按键时为 `-1`。
    pub button: i32,
    pub pointer: i32,
    pub timestamp: u64,
}
