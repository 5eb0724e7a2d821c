use std::ops::{Deref, DerefMut};

use crossbeam_channel as channel;
use dpi::PhysicalSize;

use super::BYTES_PER_PIXEL;

/// ### English
/// Vertical order of the rows stored in a transfer slot, set by the strategy that filled it.
///
/// ### 中文
/// 传输槽位中行的纵向顺序，由填充该槽位的策略设置。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowOrder {
    /// ### English
    /// Row 0 is the top of the image (CPU rasterizers).
    ///
    /// ### 中文
    /// 第 0 行为图像顶部（CPU 光栅化器）。
    #[default]
    TopDown,
    /// ### English
    /// Row 0 is the bottom of the image (GL read-back).
    ///
    /// ### 中文
    /// 第 0 行为图像底部（GL 回读）。
    BottomUp,
}

/// ### English
/// One buffered frame's worth of pixel data moving through the transfer pipeline.
///
/// Pixels are BGRA premultiplied, `stride` bytes per row (`stride >= width * 4`). The backing
/// storage is recycled and only reallocated when the frame layout changes.
///
/// ### 中文
/// 在传输管线中流动的一帧像素数据。
///
/// 像素为 BGRA 预乘格式，每行 `stride` 字节（`stride >= width * 4`）。底层存储会被复用，
/// 仅在帧布局变化时重新分配。
#[derive(Debug, Default)]
pub struct TransferSlot {
    pixels: Vec<u8>,
    size: PhysicalSize<u32>,
    stride: usize,
    row_order: RowOrder,
    frame_seq: u64,
}

impl TransferSlot {
    /// ### English
    /// Frame width in pixels.
    ///
    /// ### 中文
    /// 帧宽度（像素）。
    #[inline]
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// ### English
    /// Frame height in pixels.
    ///
    /// ### 中文
    /// 帧高度（像素）。
    #[inline]
    pub fn height(&self) -> u32 {
        self.size.height
    }

    #[inline]
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// ### English
    /// Producer-stated row stride in bytes.
    ///
    /// ### 中文
    /// 生产者声明的行跨度（字节）。
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn row_order(&self) -> RowOrder {
        self.row_order
    }

    #[inline]
    pub fn frame_seq(&self) -> u64 {
        self.frame_seq
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// ### English
    /// Ensures the slot matches `size` with rows padded to `row_alignment` bytes.
    ///
    /// Returns `true` if the backing storage was reallocated.
    ///
    /// #### Parameters
    /// - `size`: Frame size in device pixels.
    /// - `row_alignment`: Row alignment in bytes (`0`/`1` = tightly packed).
    ///
    /// ### 中文
    /// 确保槽位与 `size` 匹配，且每行按 `row_alignment` 字节对齐。
    ///
    /// 若底层存储被重新分配则返回 `true`。
    ///
    /// #### 参数
    /// - `size`：帧尺寸（设备像素）。
    /// - `row_alignment`：行对齐字节数（`0`/`1` 表示紧密排列）。
    pub(crate) fn ensure_layout(&mut self, size: PhysicalSize<u32>, row_alignment: usize) -> bool {
        let stride = row_stride(size.width, row_alignment);
        if self.size == size && self.stride == stride {
            return false;
        }

        let len = stride * size.height as usize;
        self.pixels.clear();
        self.pixels.resize(len, 0);
        self.size = size;
        self.stride = stride;
        true
    }

    #[inline]
    pub(crate) fn set_row_order(&mut self, row_order: RowOrder) {
        self.row_order = row_order;
    }

    #[inline]
    pub(crate) fn set_frame_seq(&mut self, frame_seq: u64) {
        self.frame_seq = frame_seq;
    }

    /// ### English
    /// Whether `stride`/`pixels` can hold `width x height` BGRA rows.
    ///
    /// ### 中文
    /// `stride`/`pixels` 是否足以容纳 `width x height` 的 BGRA 行数据。
    pub fn layout_is_consistent(&self) -> bool {
        let row_bytes = self.size.width as usize * BYTES_PER_PIXEL;
        if self.stride < row_bytes {
            return false;
        }
        if self.size.height == 0 {
            return true;
        }
        let needed = self.stride * (self.size.height as usize - 1) + row_bytes;
        self.pixels.len() >= needed
    }
}

/// ### English
/// Row stride for `width` pixels rounded up to `row_alignment` bytes.
///
/// ### 中文
/// 计算 `width` 像素的行跨度，并向上取整到 `row_alignment` 字节。
#[inline]
fn row_stride(width: u32, row_alignment: usize) -> usize {
    let tight = width as usize * BYTES_PER_PIXEL;
    let align = row_alignment.max(1);
    tight.div_ceil(align) * align
}

/// ### English
/// Exclusive ownership of one transfer slot.
///
/// Dropping the lease (or calling [`Self::release`]) hands the slot back to the pool it came from,
/// which is the backpressure release for the render thread. If that pool was already torn down the
/// slot is simply freed.
///
/// ### 中文
/// 对单个传输槽位的独占所有权。
///
/// drop 租约（或调用 [`Self::release`]）会把槽位归还给其来源池，即对渲染线程的背压释放。
/// 若该池已被销毁，则槽位直接释放内存。
pub struct SlotLease {
    slot: Option<TransferSlot>,
    release: channel::Sender<TransferSlot>,
}

impl SlotLease {
    pub(crate) fn new(slot: TransferSlot, release: channel::Sender<TransferSlot>) -> Self {
        Self {
            slot: Some(slot),
            release,
        }
    }

    /// ### English
    /// Releases the slot back to its pool.
    ///
    /// ### 中文
    /// 将槽位归还给其来源池。
    #[inline]
    pub fn release(self) {
        drop(self);
    }
}

impl Deref for SlotLease {
    type Target = TransferSlot;

    fn deref(&self) -> &TransferSlot {
        // Only `Drop` takes the slot.
        match &self.slot {
            Some(slot) => slot,
            None => unreachable!("slot lease accessed after release"),
        }
    }
}

impl DerefMut for SlotLease {
    fn deref_mut(&mut self) -> &mut TransferSlot {
        match &mut self.slot {
            Some(slot) => slot,
            None => unreachable!("slot lease accessed after release"),
        }
    }
}

impl Drop for SlotLease {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            let _ = self.release.try_send(slot);
        }
    }
}

impl std::fmt::Debug for SlotLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotLease").field("slot", &self.slot).finish()
    }
}
