//! ### English
//! Pixel transfer channel: the hand-off of recycled transfer slots from a render stream to the
//! presentation thread.
//!
//! Every stream of one bridge draws from the same [`SlotPool`], whose free list doubles as the
//! counting backpressure signal: the render thread blocks in [`TransferChannel::acquire`] while
//! `depth` slots are unreleased, and a slot only returns once the presentation thread drops its
//! [`SlotLease`]. The channel hand-off gives the happens-before edge between "presentation
//! finished reading slot N" and "render may reuse N".
//!
//! ### 中文
//! 像素传输通道：把可复用传输槽位从 render stream 交给呈现线程。
//!
//! 同一桥接层的所有 stream 都从同一个 [`SlotPool`] 取槽位，其空闲列表同时充当计数型背压信号：
//! 当 `depth` 个槽位都未释放时，渲染线程会阻塞在 [`TransferChannel::acquire`]；
//! 只有当呈现线程 drop 其 [`SlotLease`] 后槽位才会归还。
//! channel 交接建立了 “呈现线程读完槽位 N” 与 “渲染线程可复用 N” 之间的 happens-before 关系。

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel as channel;
use dpi::PhysicalSize;

use crate::engine::error::BridgeError;

use super::slot::{RowOrder, SlotLease, TransferSlot};
use super::slot_pool::SlotPool;
use super::surface_state::SharedSurfaceState;

/// ### English
/// How long [`TransferChannel::acquire`] may wait for a free slot.
///
/// ### 中文
/// [`TransferChannel::acquire`] 等待空闲槽位的方式。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotWait {
    /// ### English
    /// Block until a slot is released (backpressure).
    ///
    /// ### 中文
    /// 阻塞直到有槽位被释放（背压）。
    Blocking,
    /// ### English
    /// Fail with `WouldBlock` if every slot is in flight.
    ///
    /// ### 中文
    /// 若所有槽位都在途，则以 `WouldBlock` 失败。
    NonBlocking,
    /// ### English
    /// Block for at most the given duration.
    ///
    /// ### 中文
    /// 最多阻塞给定时长。
    Timeout(Duration),
}

/// ### English
/// Destination for completed frames: knows the target size, owns the shared slot pool and
/// forwards finished slots to the presentation thread.
///
/// Clones share one pool, so slots outstanding from a replaced stream still count.
///
/// ### 中文
/// 已完成帧的去向：提供目标尺寸，持有共享槽位池，并把完成的槽位转交给呈现线程。
///
/// 克隆体共享同一个池，因此被替换的 stream 遗留的在途槽位仍然计数。
#[derive(Clone)]
pub struct StreamHandler {
    surface: Arc<SharedSurfaceState>,
    frames: channel::Sender<SlotLease>,
    pool: Arc<SlotPool>,
}

impl StreamHandler {
    pub(crate) fn new(surface: Arc<SharedSurfaceState>, frames: channel::Sender<SlotLease>) -> Self {
        Self {
            surface,
            frames,
            pool: Arc::new(SlotPool::new()),
        }
    }

    /// ### English
    /// Size the next frame should be rendered at (latest published surface size, at least 1x1).
    ///
    /// ### 中文
    /// 下一帧应使用的渲染尺寸（最新发布的 surface 尺寸，至少 1x1）。
    pub fn size(&self) -> PhysicalSize<u32> {
        let size = self.surface.size();
        PhysicalSize::new(size.width.max(1), size.height.max(1))
    }

    /// ### English
    /// Hands a completed slot to the presentation thread.
    ///
    /// If the bridge stopped accepting frames, the last published visibility is hidden or the
    /// ready queue is saturated, the slot is released immediately instead.
    ///
    /// ### 中文
    /// 把已完成的槽位交给呈现线程。
    ///
    /// 若桥接已停止接收新帧、最近发布的可见性为隐藏或就绪队列已满，则立即释放该槽位。
    pub fn process(&self, lease: SlotLease) {
        if !self.surface.is_accepting() {
            return;
        }
        if !self.surface.is_visible() {
            log::trace!("surface hidden, releasing frame {}", lease.frame_seq());
            return;
        }
        if let Err(err) = self.frames.try_send(lease) {
            log::debug!("dropping completed frame: {err}");
        }
    }

    /// ### English
    /// Slots not in the free list, summed over every stream this handler fed.
    ///
    /// ### 中文
    /// 不在空闲列表中的槽位数量，涵盖本 handler 服务过的所有 stream。
    pub fn in_flight(&self) -> usize {
        self.pool.in_flight()
    }

    pub(crate) fn surface(&self) -> &Arc<SharedSurfaceState> {
        &self.surface
    }

    pub(crate) fn pool(&self) -> &SlotPool {
        &self.pool
    }
}

/// ### English
/// A render stream's view of the shared slot pool: binds at most one slot at a time, sized and
/// ordered the way that stream writes it.
///
/// Owned by a render stream on the render thread; rebuilt when the depth changes.
///
/// ### 中文
/// render stream 对共享槽位池的视图：同一时刻至多绑定一个槽位，其尺寸与行序符合该 stream 的写入方式。
///
/// 由渲染线程上的 render stream 持有；深度变化时重建。
pub struct TransferChannel {
    handler: StreamHandler,
    row_alignment: usize,
    row_order: RowOrder,
    bound: Option<SlotLease>,
}

impl TransferChannel {
    /// ### English
    /// Resizes the shared pool to `depth` slots (storage is allocated on first bind).
    ///
    /// #### Parameters
    /// - `handler`: Frame destination and slot pool.
    /// - `depth`: Number of slots (at least 1).
    /// - `row_alignment`: Row alignment in bytes for slot storage.
    ///
    /// ### 中文
    /// 将共享池调整为 `depth` 个槽位（存储在首次绑定时分配）。
    ///
    /// #### 参数
    /// - `handler`：帧的去向与槽位池。
    /// - `depth`：槽位数量（至少为 1）。
    /// - `row_alignment`：槽位存储的行对齐字节数。
    pub fn new(handler: StreamHandler, depth: usize, row_alignment: usize) -> Self {
        handler.pool().resize(depth);
        Self {
            handler,
            row_alignment,
            row_order: RowOrder::TopDown,
            bound: None,
        }
    }

    /// ### English
    /// Row order stamped on every slot this channel binds.
    ///
    /// ### 中文
    /// 本通道绑定的每个槽位所标记的行序。
    pub fn with_row_order(mut self, row_order: RowOrder) -> Self {
        self.row_order = row_order;
        self
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.handler.pool().depth()
    }

    #[inline]
    pub fn handler(&self) -> &StreamHandler {
        &self.handler
    }

    /// ### English
    /// Slots currently not in the free list (bound + queued + being presented), including those
    /// handed out before the last rebuild.
    ///
    /// ### 中文
    /// 当前不在空闲列表中的槽位数量（已绑定 + 排队中 + 呈现中），包括上次重建之前发出的槽位。
    pub fn in_flight(&self) -> usize {
        self.handler.in_flight()
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// ### English
    /// Binds a free slot sized to the current target, waiting according to `wait`.
    ///
    /// Returns the already-bound slot if one is bound.
    ///
    /// ### 中文
    /// 按 `wait` 策略等待并绑定一个空闲槽位，尺寸与当前目标一致。
    ///
    /// 若已有绑定的槽位，则直接返回该槽位。
    pub fn acquire(&mut self, wait: SlotWait) -> Result<&mut TransferSlot, BridgeError> {
        if self.bound.is_none() {
            let mut lease = self.handler.pool().acquire(wait)?;
            lease.set_row_order(self.row_order);
            if lease.ensure_layout(self.handler.size(), self.row_alignment) {
                log::trace!("transfer slot resized to {:?}", lease.size());
            }
            self.bound = Some(lease);
        }

        match self.bound.as_mut() {
            Some(lease) => Ok(&mut **lease),
            None => Err(BridgeError::NotBound),
        }
    }

    pub fn bound_mut(&mut self) -> Option<&mut TransferSlot> {
        self.bound.as_mut().map(|lease| &mut **lease)
    }

    /// ### English
    /// Stamps the bound slot with a frame sequence number and hands it to the handler.
    ///
    /// ### 中文
    /// 为已绑定槽位写入帧序号，并交给 handler。
    pub fn submit(&mut self) -> Result<u64, BridgeError> {
        let Some(mut lease) = self.bound.take() else {
            return Err(BridgeError::NotBound);
        };
        let frame_seq = self.handler.surface().next_frame_seq();
        lease.set_frame_seq(frame_seq);
        self.handler.process(lease);
        Ok(frame_seq)
    }

    /// ### English
    /// Releases the bound slot without presenting it.
    ///
    /// ### 中文
    /// 释放已绑定槽位而不呈现。
    pub fn abandon(&mut self) {
        self.bound = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(size: PhysicalSize<u32>) -> (StreamHandler, channel::Receiver<SlotLease>) {
        let (tx, rx) = channel::bounded(16);
        let surface = Arc::new(SharedSurfaceState::new(size));
        (StreamHandler::new(surface, tx), rx)
    }

    #[test]
    fn acquire_sizes_slot_to_surface() {
        let (handler, _rx) = handler(PhysicalSize::new(8, 4));
        let mut channel = TransferChannel::new(handler, 2, 1);
        let slot = channel.acquire(SlotWait::NonBlocking).unwrap();
        assert_eq!(slot.size(), PhysicalSize::new(8, 4));
        assert_eq!(slot.stride(), 32);
        assert_eq!(channel.in_flight(), 1);
    }

    #[test]
    fn never_more_than_depth_slots_in_flight() {
        let (handler, rx) = handler(PhysicalSize::new(2, 2));
        let mut channel = TransferChannel::new(handler, 2, 1);
        for _ in 0..2 {
            channel.acquire(SlotWait::NonBlocking).unwrap();
            channel.submit().unwrap();
        }
        assert_eq!(channel.in_flight(), 2);
        assert_eq!(
            channel.acquire(SlotWait::NonBlocking).unwrap_err(),
            BridgeError::WouldBlock
        );

        let lease = rx.recv().unwrap();
        drop(lease);
        assert_eq!(channel.in_flight(), 1);
        assert!(channel.acquire(SlotWait::NonBlocking).is_ok());
    }

    #[test]
    fn timeout_wait_reports_timeout() {
        let (handler, _rx) = handler(PhysicalSize::new(2, 2));
        let mut channel = TransferChannel::new(handler, 1, 1);
        channel.acquire(SlotWait::NonBlocking).unwrap();
        channel.submit().unwrap();
        let err = channel
            .acquire(SlotWait::Timeout(Duration::from_millis(5)))
            .unwrap_err();
        assert_eq!(err, BridgeError::Timeout);
    }

    #[test]
    fn submit_without_bind_fails() {
        let (handler, _rx) = handler(PhysicalSize::new(2, 2));
        let mut channel = TransferChannel::new(handler, 1, 1);
        assert_eq!(channel.submit().unwrap_err(), BridgeError::NotBound);
    }

    #[test]
    fn frames_are_dropped_once_closed() {
        let (handler, rx) = handler(PhysicalSize::new(2, 2));
        handler.surface().close();
        let mut channel = TransferChannel::new(handler, 1, 1);
        channel.acquire(SlotWait::NonBlocking).unwrap();
        channel.submit().unwrap();
        assert!(rx.is_empty());
        assert_eq!(channel.in_flight(), 0);
    }

    #[test]
    fn rebuilt_channel_counts_slots_from_previous_one() {
        let (handler, rx) = handler(PhysicalSize::new(2, 2));
        let mut old = TransferChannel::new(handler.clone(), 3, 1);
        for _ in 0..3 {
            old.acquire(SlotWait::NonBlocking).unwrap();
            old.submit().unwrap();
        }
        drop(old);

        let mut rebuilt = TransferChannel::new(handler, 1, 1);
        assert_eq!(rebuilt.in_flight(), 3);
        assert_eq!(
            rebuilt.acquire(SlotWait::NonBlocking).unwrap_err(),
            BridgeError::WouldBlock
        );

        let queued: Vec<_> = rx.try_iter().collect();
        assert_eq!(queued.len(), 3);
        drop(queued);
        assert!(rebuilt.acquire(SlotWait::NonBlocking).is_ok());
        assert_eq!(rebuilt.in_flight(), 1);
    }

    #[test]
    fn bound_slots_carry_channel_row_order() {
        let (handler, _rx) = handler(PhysicalSize::new(2, 2));
        let mut channel = TransferChannel::new(handler, 1, 1).with_row_order(RowOrder::BottomUp);
        let slot = channel.acquire(SlotWait::NonBlocking).unwrap();
        assert_eq!(slot.row_order(), RowOrder::BottomUp);
    }

    #[test]
    fn hidden_surface_releases_submitted_frame() {
        let (handler, rx) = handler(PhysicalSize::new(2, 2));
        handler.surface().set_visible(false);
        let mut channel = TransferChannel::new(handler, 1, 1);
        channel.acquire(SlotWait::NonBlocking).unwrap();
        channel.submit().unwrap();
        assert!(rx.is_empty());
        assert_eq!(channel.in_flight(), 0);
    }
}
