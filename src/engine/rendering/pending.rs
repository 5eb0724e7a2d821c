//! ### English
//! Pending reconfiguration queue: any thread enqueues, only the render thread applies.
//!
//! ### 中文
//! 待处理重配置队列：任意线程入队，仅渲染线程执行。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use crossbeam_channel as channel;

use super::stream::RenderStreamStrategy;

/// ### English
/// Spin budget before `close` starts yielding while producers finish publishing.
///
/// ### 中文
/// `close` 等待生产者完成发布时，开始 `yield` 之前的自旋次数预算。
const SPIN_LIMIT: u32 = 64;

/// ### English
/// Deferred action executed on the render thread before the next frame.
///
/// ### 中文
/// 在下一帧之前于渲染线程执行的延迟操作。
pub(crate) enum Reconfiguration {
    SampleCount(u32),
    TransferDepth(usize),
    Strategy(Box<dyn RenderStreamStrategy>),
}

impl std::fmt::Debug for Reconfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SampleCount(samples) => f.debug_tuple("SampleCount").field(samples).finish(),
            Self::TransferDepth(depth) => f.debug_tuple("TransferDepth").field(depth).finish(),
            Self::Strategy(strategy) => f.debug_tuple("Strategy").field(&strategy.name()).finish(),
        }
    }
}

/// ### English
/// Unbounded MPSC queue of [`Reconfiguration`] actions with a close flag.
///
/// ### 中文
/// 带关闭标记的 [`Reconfiguration`] 无界 MPSC 队列。
pub(crate) struct PendingReconfigQueue {
    tx: channel::Sender<Reconfiguration>,
    rx: channel::Receiver<Reconfiguration>,
    /// ### English
    /// Producers currently publishing into the queue.
    ///
    /// ### 中文
    /// 当前正在向队列发布的生产者数量。
    in_flight: AtomicUsize,
    closed: AtomicBool,
}

impl PendingReconfigQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = channel::unbounded();
        Self {
            tx,
            rx,
            in_flight: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// ### English
    /// Enqueues one action; returns `false` once the queue is closed.
    ///
    /// ### 中文
    /// 入队一个操作；队列关闭后返回 `false`。
    pub(crate) fn push(&self, action: Reconfiguration) -> bool {
        if self.closed.load(Ordering::Acquire) {
            return false;
        }
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        if self.closed.load(Ordering::Acquire) {
            self.in_flight.fetch_sub(1, Ordering::Release);
            return false;
        }

        let pushed = self.tx.send(action).is_ok();
        self.in_flight.fetch_sub(1, Ordering::Release);
        pushed
    }

    /// ### English
    /// Moves the actions enqueued so far into `out`, in enqueue order.
    ///
    /// Actions enqueued while the batch is being taken wait for the next call.
    ///
    /// ### 中文
    /// 将截至目前入队的操作按入队顺序移入 `out`。
    ///
    /// 取批过程中新入队的操作留待下一次调用。
    pub(crate) fn take_batch(&self, out: &mut Vec<Reconfiguration>) {
        let queued = self.rx.len();
        out.extend(self.rx.try_iter().take(queued));
    }

    pub(crate) fn len(&self) -> usize {
        self.rx.len()
    }

    /// ### English
    /// Closes the queue, waits for in-flight producers and drops whatever is left.
    ///
    /// ### 中文
    /// 关闭队列，等待正在发布的生产者，并丢弃剩余操作。
    pub(crate) fn close(&self) -> usize {
        self.closed.store(true, Ordering::Release);
        let mut spins = 0u32;
        while self.in_flight.load(Ordering::Acquire) != 0 {
            if spins < SPIN_LIMIT {
                std::hint::spin_loop();
            } else {
                thread::yield_now();
            }
            spins = spins.wrapping_add(1);
        }
        self.rx.try_iter().count()
    }
}
