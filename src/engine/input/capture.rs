//! ### English
//! UI-thread side of the input layer: translates raw UI notifications into pooled events.
//!
//! ### 中文
//! 输入层的 UI 线程侧：将原始 UI 通知转换为池化事件。

use std::sync::Arc;

use dpi::PhysicalPosition;
use parking_lot::Mutex;

use super::keys::{keys, ui_button_to_button, ui_key_to_key};
use super::state::InputShared;
use super::types::{KeyEventKind, PointerKind, RawUiEvent, TouchEventKind};

/// ### English
/// Handle the UI thread feeds raw notifications into.
///
/// Cheap to clone; every clone writes into the same pending queues.
///
/// ### 中文
/// UI 线程向其投递原始通知的句柄。
///
/// 克隆开销很小；所有克隆都写入同一组待处理队列。
#[derive(Clone)]
pub struct InputCapture {
    shared: Arc<Mutex<InputShared>>,
}

impl InputCapture {
    pub(crate) fn new(shared: Arc<Mutex<InputShared>>) -> Self {
        Self { shared }
    }

    /// ### English
    /// Translates one raw UI notification.
    ///
    /// Key notifications are ignored while the input layer does not hold focus. A key press yields
    /// `Down` then `Typed` sharing one timestamp; a release yields `Up`. Every pointer or scroll
    /// notification yields exactly one touch event.
    ///
    /// ### 中文
    /// 转换一条原始 UI 通知。
    ///
    /// 输入层未持有焦点时忽略键盘通知。一次按键产生共享同一时间戳的 `Down` 与 `Typed`；
    /// 松开产生 `Up`。每条指针或滚轮通知恰好产生一个触摸事件。
    pub fn handle(&self, event: RawUiEvent) {
        let mut shared = self.shared.lock();
        let timestamp = shared.now();

        match event {
            RawUiEvent::KeyPressed { code, text } => {
                if !shared.focus.is_focused() {
                    return;
                }
                shared.live.pressed_keys += 1;
                shared.live.last_key = Some(code);
                let key_code = ui_key_to_key(code);
                shared.push_key(KeyEventKind::Down, key_code, '\0', timestamp);
                shared.push_key(
                    KeyEventKind::Typed,
                    keys::UNKNOWN,
                    text.unwrap_or('\0'),
                    timestamp,
                );
            }
            RawUiEvent::KeyReleased { code } => {
                if !shared.focus.is_focused() {
                    return;
                }
                shared.live.pressed_keys = shared.live.pressed_keys.saturating_sub(1);
                shared.live.last_key = None;
                shared.push_key(KeyEventKind::Up, ui_key_to_key(code), '\0', timestamp);
            }
            RawUiEvent::Pointer { kind, x, y, button } => {
                let position = PhysicalPosition::new(x as i32, y as i32);
                shared.set_pointer(position);
                let button = ui_button_to_button(button);
                let kind = match kind {
                    PointerKind::Pressed => {
                        shared.live.pressed_buttons.insert(button);
                        shared.live.last_button = Some(button);
                        shared.touched_since_drain = true;
                        shared.presses.surface_pressed = true;
                        TouchEventKind::Down
                    }
                    PointerKind::Released => {
                        shared.live.pressed_buttons.remove(button);
                        if shared.live.pressed_buttons.is_empty() {
                            shared.presses.surface_pressed = false;
                        }
                        TouchEventKind::Up
                    }
                    PointerKind::Dragged => TouchEventKind::Dragged,
                    PointerKind::Moved => TouchEventKind::Moved,
                };
                let button = match kind {
                    TouchEventKind::Down | TouchEventKind::Up => button,
                    _ => -1,
                };
                shared.push_touch(kind, position, 0, button, timestamp);
            }
            RawUiEvent::Scroll { x, y, delta_y } => {
                let amount = if delta_y > 0.0 {
                    -1
                } else if delta_y < 0.0 {
                    1
                } else {
                    0
                };
                let position = PhysicalPosition::new(x as i32, y as i32);
                shared.push_touch(TouchEventKind::Scrolled, position, amount, -1, timestamp);
            }
        }
    }

    /// ### English
    /// Overrides the surface-pressed flag (normally derived from pointer press/release).
    ///
    /// ### 中文
    /// 覆盖 surface 按下标记（通常由指针按下/松开推导）。
    pub fn set_surface_pressed(&self, pressed: bool) {
        self.shared.lock().presses.surface_pressed = pressed;
    }

    /// ### English
    /// Reports whether the UI root container is pressed anywhere.
    ///
    /// ### 中文
    /// 上报 UI 根容器是否在任意位置被按下。
    pub fn set_root_pressed(&self, pressed: bool) {
        self.shared.lock().presses.root_pressed = pressed;
    }
}
