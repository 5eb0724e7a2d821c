//! ### English
//! Poll input layer: raw UI notifications are translated into pooled events on the UI thread,
//! queued, and drained once per tick into an [`InputSink`] on the tick thread.
//!
//! ### 中文
//! 轮询输入层：原始 UI 通知在 UI 线程被转换为池化事件并排队，
//! 每个 tick 在 tick 线程被 drain 到 [`InputSink`]。
mod capability;
mod capture;
mod focus;
pub mod keys;
mod poll;
mod pool;
mod sink;
mod state;
mod types;

pub use capability::{Orientation, Peripheral, PollInputSource};
pub use capture::InputCapture;
pub use focus::{FocusLossPolicy, PressFlags, FocusState, FocusTransition};
pub use poll::PollInput;
pub use pool::EventPool;
pub use sink::InputSink;
pub use state::ButtonSet;
pub use types::{KeyEvent, KeyEventKind, PointerKind, RawUiEvent, TouchEvent, TouchEventKind};
