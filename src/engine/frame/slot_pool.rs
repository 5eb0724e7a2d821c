//! ### English
//! Counting pool of transfer slots shared by every render stream of one bridge.
//!
//! The pool outlives stream rebuilds and strategy swaps, so slots still queued for or held by the
//! presentation thread keep counting against the depth. Shrinking the depth retires surplus slots
//! as they come back instead of handing them out again.
//!
//! ### 中文
//! 同一桥接层所有 render stream 共享的传输槽位计数池。
//!
//! 该池在 stream 重建与策略切换之间保持存活，因此仍在排队或被呈现线程持有的槽位继续计入深度。
//! 缩小深度时，多余的槽位会在归还时被回收，而不会再次发放。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crossbeam_channel as channel;

use crate::engine::config::MAX_TRANSFER_DEPTH;
use crate::engine::error::BridgeError;

use super::channel::SlotWait;
use super::slot::{SlotLease, TransferSlot};

/// ### English
/// Free-slot channel plus the live/depth counters. Only the render thread resizes or acquires;
/// the presentation thread only returns slots by dropping leases.
///
/// ### 中文
/// 空闲槽位 channel 加上存活数/深度计数。只有渲染线程调整大小或获取槽位；
/// 呈现线程只通过 drop 租约归还槽位。
pub(crate) struct SlotPool {
    free_tx: channel::Sender<TransferSlot>,
    free_rx: channel::Receiver<TransferSlot>,
    /// ### English
    /// Slots in existence: free, bound, queued or being presented.
    ///
    /// ### 中文
    /// 当前存在的槽位：空闲、已绑定、排队中或呈现中。
    live: AtomicUsize,
    depth: AtomicUsize,
}

impl SlotPool {
    pub(crate) fn new() -> Self {
        let (free_tx, free_rx) = channel::bounded(MAX_TRANSFER_DEPTH);
        Self {
            free_tx,
            free_rx,
            live: AtomicUsize::new(0),
            depth: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.depth.load(Ordering::Acquire)
    }

    /// ### English
    /// Slots not in the free list, across every stream that used this pool.
    ///
    /// ### 中文
    /// 不在空闲列表中的槽位数量，涵盖所有使用过本池的 stream。
    pub(crate) fn in_flight(&self) -> usize {
        self.live
            .load(Ordering::Acquire)
            .saturating_sub(self.free_rx.len())
    }

    /// ### English
    /// Sets the depth. Growing adds empty slots now; shrinking retires free slots now and the
    /// rest as they return.
    ///
    /// ### 中文
    /// 设置深度。增大时立即补充空槽位；缩小时立即回收空闲槽位，其余在归还时回收。
    pub(crate) fn resize(&self, depth: usize) {
        let depth = depth.clamp(1, MAX_TRANSFER_DEPTH);
        self.depth.store(depth, Ordering::Release);

        while self.live.load(Ordering::Acquire) > depth {
            if self.free_rx.try_recv().is_err() {
                break;
            }
            self.live.fetch_sub(1, Ordering::AcqRel);
        }
        while self.live.load(Ordering::Acquire) < depth {
            if self.free_tx.try_send(TransferSlot::default()).is_err() {
                break;
            }
            self.live.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// ### English
    /// Takes a free slot, waiting per `wait`. Surplus slots returned after a shrink are retired
    /// on the way.
    ///
    /// ### 中文
    /// 按 `wait` 策略等待并取出一个空闲槽位。缩小深度后归还的多余槽位会在此过程中被回收。
    pub(crate) fn acquire(&self, wait: SlotWait) -> Result<SlotLease, BridgeError> {
        let deadline = match wait {
            SlotWait::Timeout(timeout) => Instant::now().checked_add(timeout),
            _ => None,
        };

        loop {
            let slot = match (wait, deadline) {
                (SlotWait::NonBlocking, _) => self.free_rx.try_recv().map_err(|err| match err {
                    channel::TryRecvError::Empty => BridgeError::WouldBlock,
                    channel::TryRecvError::Disconnected => BridgeError::Disposed,
                })?,
                (SlotWait::Timeout(_), Some(deadline)) => {
                    self.free_rx.recv_deadline(deadline).map_err(|err| match err {
                        channel::RecvTimeoutError::Timeout => BridgeError::Timeout,
                        channel::RecvTimeoutError::Disconnected => BridgeError::Disposed,
                    })?
                }
                _ => self.free_rx.recv().map_err(|_| BridgeError::Disposed)?,
            };

            if self.live.load(Ordering::Acquire) > self.depth() {
                self.live.fetch_sub(1, Ordering::AcqRel);
                log::trace!("retired surplus transfer slot");
                continue;
            }
            return Ok(SlotLease::new(slot, self.free_tx.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growing_adds_free_slots() {
        let pool = SlotPool::new();
        pool.resize(1);
        pool.resize(3);
        assert_eq!(pool.depth(), 3);
        assert_eq!(pool.in_flight(), 0);
        let leases: Vec<_> = (0..3)
            .map(|_| pool.acquire(SlotWait::NonBlocking).unwrap())
            .collect();
        assert_eq!(pool.in_flight(), 3);
        assert_eq!(pool.acquire(SlotWait::NonBlocking).unwrap_err(), BridgeError::WouldBlock);
        drop(leases);
        assert_eq!(pool.in_flight(), 0);
    }

    #[test]
    fn shrinking_waits_for_outstanding_slots() {
        let pool = SlotPool::new();
        pool.resize(3);
        let mut leases: Vec<_> = (0..3)
            .map(|_| pool.acquire(SlotWait::NonBlocking).unwrap())
            .collect();

        pool.resize(1);
        assert_eq!(pool.in_flight(), 3);
        assert_eq!(pool.acquire(SlotWait::NonBlocking).unwrap_err(), BridgeError::WouldBlock);

        leases.pop();
        assert_eq!(pool.acquire(SlotWait::NonBlocking).unwrap_err(), BridgeError::WouldBlock);
        leases.pop();
        assert_eq!(pool.acquire(SlotWait::NonBlocking).unwrap_err(), BridgeError::WouldBlock);
        assert_eq!(pool.in_flight(), 1);

        leases.pop();
        let lease = pool.acquire(SlotWait::NonBlocking).unwrap();
        assert_eq!(pool.in_flight(), 1);
        drop(lease);
        assert_eq!(pool.in_flight(), 0);
    }

    #[test]
    fn shrinking_retires_free_slots_immediately() {
        let pool = SlotPool::new();
        pool.resize(4);
        pool.resize(2);
        let first = pool.acquire(SlotWait::NonBlocking).unwrap();
        let second = pool.acquire(SlotWait::NonBlocking).unwrap();
        assert_eq!(pool.acquire(SlotWait::NonBlocking).unwrap_err(), BridgeError::WouldBlock);
        drop((first, second));
    }
}
