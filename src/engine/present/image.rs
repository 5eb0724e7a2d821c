//! ### English
//! Presentation image: the tightly packed BGRA buffer bound to the surface target.
//!
//! ### 中文
//! 呈现图像：绑定到 surface target 的紧密排列 BGRA 缓冲。

use dpi::PhysicalSize;

use crate::engine::frame::{BYTES_PER_PIXEL, RowOrder, TransferSlot};

/// ### English
/// BGRA premultiplied image, `width * 4` bytes per row, top row first.
///
/// ### 中文
/// BGRA 预乘图像，每行 `width * 4` 字节，首行为顶部。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationImage {
    size: PhysicalSize<u32>,
    pixels: Vec<u8>,
}

impl PresentationImage {
    pub fn new(size: PhysicalSize<u32>) -> Self {
        let len = size.width as usize * BYTES_PER_PIXEL * size.height as usize;
        Self {
            size,
            pixels: vec![0; len],
        }
    }

    #[inline]
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.size.width as usize * BYTES_PER_PIXEL
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// ### English
    /// Pixel at `(x, y)` as `[b, g, r, a]`.
    ///
    /// ### 中文
    /// `(x, y)` 处的像素，格式为 `[b, g, r, a]`。
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let offset = y as usize * self.stride() + x as usize * BYTES_PER_PIXEL;
        let bytes = self.pixels.get(offset..offset + BYTES_PER_PIXEL)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// ### English
    /// Copies `slot` rows into the image honoring the slot stride and row order.
    ///
    /// The caller guarantees the sizes match and `slot.layout_is_consistent()`.
    ///
    /// #### Parameters
    /// - `slot`: Source frame.
    /// - `extra_flip`: Flip once more after normalizing to top row first.
    ///
    /// ### 中文
    /// 按槽位的行跨度与行序把 `slot` 的各行复制到图像中。
    ///
    /// 调用方需保证尺寸一致且 `slot.layout_is_consistent()` 成立。
    ///
    /// #### 参数
    /// - `slot`：源帧。
    /// - `extra_flip`：在规整为首行为顶部之后再额外翻转一次。
    pub(crate) fn upload(&mut self, slot: &TransferSlot, extra_flip: bool) {
        let row_bytes = self.stride();
        if row_bytes == 0 {
            return;
        }
        let height = self.size.height as usize;
        let stride = slot.stride();
        let source = slot.pixels();
        let flip_vertical = (slot.row_order() == RowOrder::BottomUp) != extra_flip;

        for (y, row) in self.pixels.chunks_exact_mut(row_bytes).enumerate() {
            let src_y = if flip_vertical { height - 1 - y } else { y };
            let start = src_y * stride;
            row.copy_from_slice(&source[start..start + row_bytes]);
        }
    }
}
