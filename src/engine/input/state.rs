//! ### English
//! Input state shared between the capture side (UI thread) and the drain side (tick thread).
//!
//! Everything here lives behind one `parking_lot::Mutex` so a drain can copy-and-clear the pending
//! queues and sample the live state in a single critical section.
//!
//! ### 中文
//! 捕获端（UI 线程）与 drain 端（tick 线程）共享的输入状态。
//!
//! 这里的所有数据都位于同一个 `parking_lot::Mutex` 之后，
//! 使 drain 能在单个临界区内复制并清空待处理队列、并采样实时状态。

use std::time::Instant;

use dpi::PhysicalPosition;

use super::focus::{PressFlags, FocusState};
use super::keys::UiKeyCode;
use super::pool::EventPool;
use super::types::{KeyEvent, KeyEventKind, TouchEvent, TouchEventKind};

/// ### English
/// Set of pressed target button codes (`0..32`).
///
/// ### 中文
/// 已按下的目标按键码集合（`0..32`）。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonSet(u32);

impl ButtonSet {
    #[inline]
    fn bit(button: i32) -> Option<u32> {
        u32::try_from(button)
            .ok()
            .filter(|&button| button < u32::BITS)
            .map(|button| 1 << button)
    }

    pub fn insert(&mut self, button: i32) {
        if let Some(bit) = Self::bit(button) {
            self.0 |= bit;
        }
    }

    pub fn remove(&mut self, button: i32) {
        if let Some(bit) = Self::bit(button) {
            self.0 &= !bit;
        }
    }

    pub fn contains(&self, button: i32) -> bool {
        Self::bit(button).is_some_and(|bit| self.0 & bit != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// ### English
/// Live key/pointer state mutated by the translator.
///
/// ### 中文
/// 由转换器修改的实时键盘/指针状态。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct LiveInputState {
    pub(crate) pressed_keys: u32,
    pub(crate) last_key: Option<UiKeyCode>,
    pub(crate) last_button: Option<i32>,
    pub(crate) pressed_buttons: ButtonSet,
    pub(crate) pointer: Option<PhysicalPosition<i32>>,
    /// ### English
    /// First pointer position ever observed; seeds the delta anchor.
    ///
    /// ### 中文
    /// 首次观察到的指针位置；作为增量基准的初始值。
    pub(crate) first_pointer: Option<PhysicalPosition<i32>>,
}

pub(crate) struct InputShared {
    epoch: Instant,
    pub(crate) key_pool: EventPool<KeyEvent>,
    pub(crate) touch_pool: EventPool<TouchEvent>,
    pub(crate) key_events: Vec<KeyEvent>,
    pub(crate) touch_events: Vec<TouchEvent>,
    pub(crate) live: LiveInputState,
    pub(crate) focus: FocusState,
    pub(crate) presses: PressFlags,
    /// ### English
    /// Raw "touch down since last drain" flag.
    ///
    /// ### 中文
    /// 原始的“自上次 drain 以来发生过按下”标记。
    pub(crate) touched_since_drain: bool,
}

impl InputShared {
    pub(crate) fn new(pool_initial_capacity: usize, pool_max_free: usize) -> Self {
        Self {
            epoch: Instant::now(),
            key_pool: EventPool::new(pool_initial_capacity, pool_max_free),
            touch_pool: EventPool::new(pool_initial_capacity, pool_max_free),
            key_events: Vec::with_capacity(pool_initial_capacity),
            touch_events: Vec::with_capacity(pool_initial_capacity),
            live: LiveInputState::default(),
            focus: FocusState::default(),
            presses: PressFlags::default(),
            touched_since_drain: false,
        }
    }

    /// ### English
    /// Nanoseconds since the input layer was created.
    ///
    /// ### 中文
    /// 自输入层创建以来的纳秒数。
    pub(crate) fn now(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    pub(crate) fn push_key(&mut self, kind: KeyEventKind, key_code: i32, key_char: char, timestamp: u64) {
        let mut event = self.key_pool.obtain();
        event.kind = kind;
        event.key_code = key_code;
        event.key_char = key_char;
        event.timestamp = timestamp;
        self.key_events.push(event);
    }

    pub(crate) fn push_touch(
        &mut self,
        kind: TouchEventKind,
        position: PhysicalPosition<i32>,
        scroll_amount: i32,
        button: i32,
        timestamp: u64,
    ) {
        let mut event = self.touch_pool.obtain();
        event.kind = kind;
        event.x = position.x;
        event.y = position.y;
        event.scroll_amount = scroll_amount;
        event.button = button;
        event.pointer = 0;
        event.timestamp = timestamp;
        self.touch_events.push(event);
    }

    pub(crate) fn set_pointer(&mut self, position: PhysicalPosition<i32>) {
        if self.live.first_pointer.is_none() {
            self.live.first_pointer = Some(position);
        }
        self.live.pointer = Some(position);
    }
}
