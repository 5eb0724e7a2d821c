//! ### English
//! Input sink receiving drained events on the tick thread.
//!
//! ### 中文
//! 在 tick 线程接收 drain 出的事件的输入 sink。

/// ### English
/// Receiver of translated input events.
///
/// Every method defaults to "not handled" (`false`), so a sink only overrides what it consumes.
/// Key events are delivered before pointer events within one drain, each group in capture order.
///
/// ### 中文
/// 转换后输入事件的接收者。
///
/// 所有方法默认返回“未处理”（`false`），sink 只需覆盖关心的方法。
/// 一次 drain 中，键盘事件先于指针事件投递，每组内部保持捕获顺序。
pub trait InputSink {
    fn key_down(&mut self, _key_code: i32) -> bool {
        false
    }

    fn key_up(&mut self, _key_code: i32) -> bool {
        false
    }

    fn key_typed(&mut self, _character: char) -> bool {
        false
    }

    fn touch_down(&mut self, _x: i32, _y: i32, _pointer: i32, _button: i32) -> bool {
        false
    }

    fn touch_up(&mut self, _x: i32, _y: i32, _pointer: i32, _button: i32) -> bool {
        false
    }

    fn touch_dragged(&mut self, _x: i32, _y: i32, _pointer: i32) -> bool {
        false
    }

    fn mouse_moved(&mut self, _x: i32, _y: i32) -> bool {
        false
    }

    /// ### English
    /// `amount` is `-1`, `0` or `1` (sign inverted from the raw wheel delta).
    ///
    /// ### 中文
    /// `amount` 为 `-1`、`0` 或 `1`（与原始滚轮增量符号相反）。
    fn scrolled(&mut self, _amount: i32) -> bool {
        false
    }
}
