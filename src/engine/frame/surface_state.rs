//! ### English
//! Lock-free surface metadata shared between the presentation thread (writer) and the render
//! thread (reader). Latest-wins: only the most recent size is kept.
//!
//! ### 中文
//! 呈现线程（写）与渲染线程（读）共享的无锁 surface 元数据。
//! latest-wins：只保留最新的尺寸。

use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use dpi::PhysicalSize;

#[repr(C, align(64))]
/// ### English
/// Shared surface state: published size, visibility, accept flag and counters.
///
/// ### 中文
/// 共享 surface 状态：已发布尺寸、可见性、接收标记与计数器。
pub struct SharedSurfaceState {
    /// ### English
    /// Packed `(width, height)` as two `u32` values.
    ///
    /// ### 中文
    /// 将 `(width, height)` 以两个 `u32` 打包到一个 `u64` 中。
    packed_size: AtomicU64,
    /// ### English
    /// Visibility flag (non-zero = visible).
    ///
    /// ### 中文
    /// 可见标记（非 0 = 可见）。
    visible: AtomicU8,
    /// ### English
    /// Accept flag; cleared when the bridge stops accepting frames.
    ///
    /// ### 中文
    /// 接收标记；桥接停止接收新帧时清零。
    accepting: AtomicU8,
    _padding: [u8; 6],
    /// ### English
    /// Monotonic "re-render even if nothing changed" counter.
    ///
    /// ### 中文
    /// 单调递增的“即使无变化也重新渲染”计数器。
    snapshot_request: AtomicU64,
    /// ### English
    /// Frame sequence generator (0 is reserved).
    ///
    /// ### 中文
    /// 帧序号生成器（0 保留不用）。
    next_frame_seq: AtomicU64,
}

impl SharedSurfaceState {
    /// ### English
    /// Creates a visible, accepting state with `initial_size`.
    ///
    /// ### 中文
    /// 以 `initial_size` 创建一个可见、可接收帧的状态。
    pub fn new(initial_size: PhysicalSize<u32>) -> Self {
        Self {
            packed_size: AtomicU64::new(pack_u32x2(initial_size.width, initial_size.height)),
            visible: AtomicU8::new(1),
            accepting: AtomicU8::new(1),
            _padding: [0; 6],
            snapshot_request: AtomicU64::new(0),
            next_frame_seq: AtomicU64::new(1),
        }
    }

    /// ### English
    /// Publishes the latest surface size. Returns `true` if it differs from the previous one.
    ///
    /// ### 中文
    /// 发布最新的 surface 尺寸；若与之前不同则返回 `true`。
    pub fn publish_size(&self, size: PhysicalSize<u32>) -> bool {
        let packed = pack_u32x2(size.width, size.height);
        self.packed_size.swap(packed, Ordering::AcqRel) != packed
    }

    /// ### English
    /// Latest published surface size.
    ///
    /// ### 中文
    /// 最新发布的 surface 尺寸。
    pub fn size(&self) -> PhysicalSize<u32> {
        let (width, height) = unpack_u32x2(self.packed_size.load(Ordering::Acquire));
        PhysicalSize::new(width, height)
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.store(u8::from(visible), Ordering::Release);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire) != 0
    }

    /// ### English
    /// Stops accepting new frames (first step of disposal).
    ///
    /// ### 中文
    /// 停止接收新帧（释放流程的第一步）。
    pub fn close(&self) {
        self.accepting.store(0, Ordering::Release);
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting.load(Ordering::Acquire) != 0
    }

    /// ### English
    /// Bumps the snapshot counter and returns the new value.
    ///
    /// ### 中文
    /// 递增 snapshot 计数器并返回新值。
    pub fn request_snapshot(&self) -> u64 {
        self.snapshot_request.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn snapshot_request(&self) -> u64 {
        self.snapshot_request.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn next_frame_seq(&self) -> u64 {
        self.next_frame_seq.fetch_add(1, Ordering::Relaxed)
    }
}

#[inline]
fn pack_u32x2(width: u32, height: u32) -> u64 {
    (width as u64) | ((height as u64) << 32)
}

#[inline]
fn unpack_u32x2(packed: u64) -> (u32, u32) {
    (packed as u32, (packed >> 32) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_reports_changes_only() {
        let state = SharedSurfaceState::new(PhysicalSize::new(800, 600));
        assert!(!state.publish_size(PhysicalSize::new(800, 600)));
        assert!(state.publish_size(PhysicalSize::new(640, 480)));
        assert_eq!(state.size(), PhysicalSize::new(640, 480));
    }

    #[test]
    fn snapshot_counter_is_monotonic() {
        let state = SharedSurfaceState::new(PhysicalSize::new(1, 1));
        assert_eq!(state.request_snapshot(), 1);
        assert_eq!(state.request_snapshot(), 2);
        assert_eq!(state.snapshot_request(), 2);
    }

    #[test]
    fn close_stops_accepting() {
        let state = SharedSurfaceState::new(PhysicalSize::new(1, 1));
        assert!(state.is_accepting());
        state.close();
        assert!(!state.is_accepting());
    }
}
