//! ### English
//! Tick-thread side of the input layer: the poll facade.
//!
//! Queries answer from a snapshot published by the last [`PollInput::drain`]; nothing reads the
//! live capture state directly.
//!
//! ### 中文
//! 输入层的 tick 线程侧：轮询门面。
//!
//! 查询结果来自上一次 [`PollInput::drain`] 发布的快照；不会直接读取实时捕获状态。

use std::mem;
use std::sync::Arc;

use dpi::PhysicalPosition;
use parking_lot::Mutex;

use crate::engine::config::InputConfig;
use crate::engine::present::FocusRequester;

use super::capability::PollInputSource;
use super::capture::InputCapture;
use super::focus::{FocusLossPolicy, FocusTransition};
use super::keys::{keys, ui_key_to_key};
use super::sink::InputSink;
use super::state::{InputShared, LiveInputState};
use super::types::{KeyEvent, KeyEventKind, TouchEvent, TouchEventKind};

/// ### English
/// State visible to queries between drains.
///
/// ### 中文
/// 两次 drain 之间查询可见的状态。
#[derive(Clone, Copy, Debug, Default)]
struct PublishedInput {
    live: LiveInputState,
    focused: bool,
    touched: bool,
    just_touched: bool,
    position: PhysicalPosition<i32>,
    delta: PhysicalPosition<i32>,
    last_recorded: Option<PhysicalPosition<i32>>,
    current_event_time: u64,
}

/// ### English
/// Poll input facade owned by the tick thread.
///
/// ### 中文
/// 由 tick 线程持有的轮询输入门面。
pub struct PollInput {
    shared: Arc<Mutex<InputShared>>,
    focus_loss: FocusLossPolicy,
    focus_requester: Option<FocusRequester>,
    sink: Option<Box<dyn InputSink>>,
    key_batch: Vec<KeyEvent>,
    touch_batch: Vec<TouchEvent>,
    published: PublishedInput,
}

impl PollInput {
    /// ### English
    /// Creates the facade and the capture handle feeding it.
    ///
    /// #### Parameters
    /// - `config`: Pool sizes and focus-loss policy.
    /// - `focus_requester`: Where focus requests are sent when focus is gained (`None` = nowhere).
    ///
    /// ### 中文
    /// 创建门面以及为其供数的捕获句柄。
    ///
    /// #### 参数
    /// - `config`：事件池大小与失焦策略。
    /// - `focus_requester`：获得焦点时发送焦点请求的目标（`None` 表示不发送）。
    pub fn new(config: InputConfig, focus_requester: Option<FocusRequester>) -> (Self, InputCapture) {
        let shared = Arc::new(Mutex::new(InputShared::new(
            config.pool_initial_capacity,
            config.pool_max_free,
        )));
        let poll = Self {
            shared: Arc::clone(&shared),
            focus_loss: config.focus_loss,
            focus_requester,
            sink: None,
            key_batch: Vec::with_capacity(config.pool_initial_capacity),
            touch_batch: Vec::with_capacity(config.pool_initial_capacity),
            published: PublishedInput::default(),
        };
        (poll, InputCapture::new(shared))
    }

    /// ### English
    /// Another capture handle writing into this facade's queues.
    ///
    /// ### 中文
    /// 另一个写入本门面队列的捕获句柄。
    pub fn capture(&self) -> InputCapture {
        InputCapture::new(Arc::clone(&self.shared))
    }

    pub fn input_sink(&self) -> Option<&dyn InputSink> {
        self.sink.as_deref()
    }

    /// ### English
    /// Whether the input layer held focus as of the last drain.
    ///
    /// ### 中文
    /// 截至上次 drain 输入层是否持有焦点。
    pub fn has_focus(&self) -> bool {
        self.published.focused
    }

    /// ### English
    /// Last position used as the delta anchor (`None` before the first drain with a sink).
    ///
    /// ### 中文
    /// 作为增量基准的上次记录位置（首次带 sink 的 drain 之前为 `None`）。
    pub fn last_recorded_position(&self) -> Option<PhysicalPosition<i32>> {
        self.published.last_recorded
    }

    /// ### English
    /// `(created, free)` counters of the key and touch pools.
    ///
    /// ### 中文
    /// 键盘池与触摸池的 `(已创建, 空闲)` 计数。
    pub fn pool_stats(&self) -> ((usize, usize), (usize, usize)) {
        let shared = self.shared.lock();
        (
            (shared.key_pool.created(), shared.key_pool.free_count()),
            (shared.touch_pool.created(), shared.touch_pool.free_count()),
        )
    }

    fn deliver(&mut self) {
        let Some(sink) = self.sink.as_deref_mut() else {
            return;
        };

        for event in &self.key_batch {
            self.published.current_event_time = event.timestamp;
            match event.kind {
                KeyEventKind::Down => sink.key_down(event.key_code),
                KeyEventKind::Up => sink.key_up(event.key_code),
                KeyEventKind::Typed => sink.key_typed(event.key_char),
            };
        }

        for event in &self.touch_batch {
            self.published.current_event_time = event.timestamp;
            match event.kind {
                TouchEventKind::Down => sink.touch_down(event.x, event.y, event.pointer, event.button),
                TouchEventKind::Up => sink.touch_up(event.x, event.y, event.pointer, event.button),
                TouchEventKind::Dragged => sink.touch_dragged(event.x, event.y, event.pointer),
                TouchEventKind::Moved => sink.mouse_moved(event.x, event.y),
                TouchEventKind::Scrolled => sink.scrolled(event.scroll_amount),
            };
        }
    }
}

impl PollInputSource for PollInput {
    fn x(&self) -> i32 {
        self.published.position.x
    }

    fn y(&self) -> i32 {
        self.published.position.y
    }

    fn delta_x(&self) -> i32 {
        self.published.delta.x
    }

    fn delta_y(&self) -> i32 {
        self.published.delta.y
    }

    fn is_touched(&self) -> bool {
        self.published.touched
    }

    fn just_touched(&self) -> bool {
        self.published.just_touched
    }

    fn is_button_pressed(&self, button: i32) -> bool {
        self.published.live.pressed_buttons.contains(button)
    }

    fn is_key_pressed(&self, key: i32) -> bool {
        if key == keys::ANY_KEY {
            return self.published.live.pressed_keys > 0;
        }
        self.published
            .live
            .last_key
            .is_some_and(|last| ui_key_to_key(last) == key)
    }

    fn current_event_time(&self) -> u64 {
        self.published.current_event_time
    }

    fn set_input_sink(&mut self, sink: Option<Box<dyn InputSink>>) {
        self.sink = sink;
    }

    fn drain(&mut self) {
        let (transition, live, touched_since_drain, presses, focused) = {
            let mut shared = self.shared.lock();
            let presses = shared.presses;
            let transition = shared.focus.update(presses, self.focus_loss);
            mem::swap(&mut shared.key_events, &mut self.key_batch);
            mem::swap(&mut shared.touch_events, &mut self.touch_batch);
            let touched = mem::take(&mut shared.touched_since_drain);
            (transition, shared.live, touched, presses, shared.focus.is_focused())
        };

        match transition {
            FocusTransition::Gained => {
                log::debug!("input focus gained");
                if let Some(requester) = &self.focus_requester
                    && !requester.request_focus()
                {
                    log::debug!("focus request dropped: presenter is gone");
                }
            }
            FocusTransition::Lost => log::debug!("input focus lost"),
            FocusTransition::None => {}
        }

        self.published.live = live;
        self.published.focused = focused;
        self.published.touched = presses.surface_pressed;

        if self.sink.is_some() {
            self.deliver();
            self.published.just_touched = touched_since_drain;
            if let Some(pointer) = live.pointer {
                let anchor = self
                    .published
                    .last_recorded
                    .or(live.first_pointer)
                    .unwrap_or(pointer);
                self.published.position = pointer;
                self.published.delta = PhysicalPosition::new(pointer.x - anchor.x, pointer.y - anchor.y);
                self.published.last_recorded = Some(pointer);
            }
        } else {
            self.published.just_touched = false;
        }

        let mut shared = self.shared.lock();
        shared.key_pool.free_all(self.key_batch.drain(..));
        shared.touch_pool.free_all(self.touch_batch.drain(..));
    }
}
