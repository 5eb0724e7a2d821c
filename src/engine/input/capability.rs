//! ### English
//! Poll input capability set.
//!
//! Required members are the state queries and the per-tick drain. Everything a desktop surface
//! cannot provide has a default with a documented contract: sensors read zero, vibration and
//! cursor catching are no-ops, and interactive features (on-screen keyboard, text prompts, cursor
//! images) report [`InputError::Unsupported`].
//!
//! ### 中文
//! 轮询输入能力集。
//!
//! 必须实现的成员只有状态查询与每 tick 的 drain。桌面 surface 无法提供的能力都有带约定的默认实现：
//! 传感器读数为 0，震动与光标捕获为空操作，交互功能（屏幕键盘、文本输入框、光标图像）
//! 返回 [`InputError::Unsupported`]。

use crate::engine::error::InputError;

use super::sink::InputSink;

/// ### English
/// Input peripherals a source may report as available.
///
/// ### 中文
/// 输入源可能报告为可用的外设。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Peripheral {
    HardwareKeyboard,
    OnscreenKeyboard,
    MultitouchScreen,
    Accelerometer,
    Compass,
    Vibrator,
    Gyroscope,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// ### English
/// Polling input source: answers "what is the input state right now" as of the last drain.
///
/// ### 中文
/// 轮询输入源：回答“截至上次 drain 的输入状态”。
pub trait PollInputSource {
    /// ### English
    /// Pointer x as of the last drain that had a sink.
    ///
    /// ### 中文
    /// 截至上一次有 sink 的 drain 时的指针 x 坐标。
    fn x(&self) -> i32;

    fn y(&self) -> i32;

    fn delta_x(&self) -> i32;

    fn delta_y(&self) -> i32;

    /// ### English
    /// Whether the surface is currently pressed.
    ///
    /// ### 中文
    /// surface 当前是否处于按下状态。
    fn is_touched(&self) -> bool;

    /// ### English
    /// `true` only for the drain immediately following a touch-down.
    ///
    /// ### 中文
    /// 仅在紧随按下之后的那次 drain 后为 `true`。
    fn just_touched(&self) -> bool;

    fn is_button_pressed(&self, button: i32) -> bool;

    /// ### English
    /// `ANY_KEY` matches while any key is held; other codes compare with the last pressed key.
    ///
    /// `ANY_KEY` counts press notifications, and auto-repeat delivers extra presses without
    /// matching releases. After holding a key long enough to repeat it stays `true` until as many
    /// releases have arrived while focused.
    ///
    /// ### 中文
    /// `ANY_KEY` 在任意键按住时匹配；其它键码与最后按下的键比较。
    ///
    /// `ANY_KEY` 统计的是按下通知的次数，而自动连发会产生没有对应松开的额外按下。
    /// 长按触发连发后，它会保持 `true`，直到在持有焦点期间收到同样多次松开。
    fn is_key_pressed(&self, key: i32) -> bool;

    /// ### English
    /// Timestamp (ns) of the event currently or most recently delivered.
    ///
    /// ### 中文
    /// 当前（或最近）投递事件的时间戳（纳秒）。
    fn current_event_time(&self) -> u64;

    /// ### English
    /// Registers (or clears, with `None`) the sink receiving drained events.
    ///
    /// ### 中文
    /// 注册（或以 `None` 清除）接收 drain 事件的 sink。
    fn set_input_sink(&mut self, sink: Option<Box<dyn InputSink>>);

    /// ### English
    /// Delivers pending events to the sink (or discards them without one) and recomputes deltas.
    ///
    /// ### 中文
    /// 向 sink 投递待处理事件（无 sink 时丢弃）并重新计算增量。
    fn drain(&mut self);

    fn x_for(&self, pointer: i32) -> i32 {
        if pointer > 0 { 0 } else { self.x() }
    }

    fn y_for(&self, pointer: i32) -> i32 {
        if pointer > 0 { 0 } else { self.y() }
    }

    fn delta_x_for(&self, pointer: i32) -> i32 {
        if pointer == 0 { self.delta_x() } else { 0 }
    }

    fn delta_y_for(&self, pointer: i32) -> i32 {
        if pointer == 0 { self.delta_y() } else { 0 }
    }

    fn is_touched_for(&self, pointer: i32) -> bool {
        pointer <= 0 && self.is_touched()
    }

    fn supports_multitouch(&self) -> bool {
        false
    }

    fn is_peripheral_available(&self, peripheral: Peripheral) -> bool {
        peripheral == Peripheral::HardwareKeyboard
    }

    fn accelerometer(&self) -> [f32; 3] {
        [0.0; 3]
    }

    fn azimuth(&self) -> f32 {
        0.0
    }

    fn pitch(&self) -> f32 {
        0.0
    }

    fn roll(&self) -> f32 {
        0.0
    }

    /// ### English
    /// Leaves `matrix` untouched; no orientation sensor.
    ///
    /// ### 中文
    /// 不修改 `matrix`；没有方向传感器。
    fn rotation_matrix(&self, _matrix: &mut [f32; 16]) {}

    fn rotation(&self) -> i32 {
        0
    }

    fn native_orientation(&self) -> Orientation {
        Orientation::Landscape
    }

    fn vibrate(&mut self, _milliseconds: u32) {}

    fn cancel_vibrate(&mut self) {}

    fn set_cursor_catched(&mut self, _catched: bool) {}

    fn is_cursor_catched(&self) -> bool {
        false
    }

    fn set_cursor_position(&mut self, _x: i32, _y: i32) {}

    fn set_catch_back_key(&mut self, _catch_back: bool) {}

    fn set_catch_menu_key(&mut self, _catch_menu: bool) {}

    fn set_on_screen_keyboard_visible(&mut self, _visible: bool) -> Result<(), InputError> {
        Err(InputError::Unsupported("on-screen keyboard"))
    }

    fn request_text_input(&mut self, _title: &str, _text: &str) -> Result<String, InputError> {
        Err(InputError::Unsupported("text input prompt"))
    }

    fn request_placeholder_text_input(
        &mut self,
        _title: &str,
        _placeholder: &str,
    ) -> Result<String, InputError> {
        Err(InputError::Unsupported("text input prompt"))
    }

    /// ### English
    /// `pixels` are RGBA8 rows of `width` pixels.
    ///
    /// ### 中文
    /// `pixels` 为每行 `width` 像素的 RGBA8 数据。
    fn set_cursor_image(
        &mut self,
        _pixels: &[u8],
        _width: u32,
        _hotspot: (i32, i32),
    ) -> Result<(), InputError> {
        Err(InputError::Unsupported("cursor image"))
    }
}
