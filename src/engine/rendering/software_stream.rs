//! ### English
//! CPU render stream: the driver writes BGRA pixels straight into the bound slot.
//!
//! ### 中文
//! CPU render stream：驱动直接把 BGRA 像素写入已绑定槽位。

use crate::engine::error::BridgeError;
use crate::engine::frame::{RowOrder, SlotWait, StreamHandler, TransferSlot};

use super::context::OffscreenContext;
use super::stream::{RenderStreamStrategy, StreamCore};

const NAME: &str = "software";

/// ### English
/// Render stream without GPU resources. Sample count is accepted and ignored.
///
/// ### 中文
/// 不持有 GPU 资源的 render stream。接受采样数但不使用。
#[derive(Default)]
pub struct SoftwareStream {
    core: StreamCore,
    row_alignment: usize,
    samples: u32,
}

impl SoftwareStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// ### English
    /// Pads every slot row to `row_alignment` bytes.
    ///
    /// ### 中文
    /// 将每个槽位的行填充到 `row_alignment` 字节对齐。
    pub fn with_row_alignment(row_alignment: usize) -> Self {
        Self {
            row_alignment,
            ..Self::default()
        }
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }
}

impl RenderStreamStrategy for SoftwareStream {
    fn name(&self) -> &'static str {
        NAME
    }

    fn reconfigure(
        &mut self,
        _context: &mut dyn OffscreenContext,
        handler: StreamHandler,
        samples: u32,
        transfer_depth: usize,
    ) -> Result<(), BridgeError> {
        self.samples = samples;
        self.core.rebuild(handler, transfer_depth, self.row_alignment, RowOrder::TopDown);
        Ok(())
    }

    fn bind(&mut self, _context: &mut dyn OffscreenContext, wait: SlotWait) -> Result<(), BridgeError> {
        self.core.channel_mut(NAME)?.acquire(wait)?;
        Ok(())
    }

    fn bound_slot_mut(&mut self) -> Option<&mut TransferSlot> {
        self.core.bound_mut()
    }

    fn swap(&mut self, _context: &mut dyn OffscreenContext) -> Result<u64, BridgeError> {
        self.core.channel_mut(NAME)?.submit()
    }

    fn destroy(&mut self, _context: &mut dyn OffscreenContext) {
        self.core.clear();
    }
}
