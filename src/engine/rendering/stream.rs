//! ### English
//! Render stream strategy: the pluggable backend that binds transfer slots for rendering and
//! pushes finished frames into the pixel transfer channel.
//!
//! ### 中文
//! render stream 策略：可插拔的后端，负责为渲染绑定传输槽位，并把完成的帧推入像素传输通道。

use crate::engine::error::BridgeError;
use crate::engine::frame::{RowOrder, SlotWait, StreamHandler, TransferChannel, TransferSlot};

use super::context::OffscreenContext;

/// ### English
/// Pluggable transfer backend. Every method runs on the render thread with the context current.
///
/// A strategy starts without resources; [`Self::reconfigure`] (re)builds them and
/// [`Self::destroy`] releases them. A destroyed strategy may be reconfigured again.
///
/// ### 中文
/// 可插拔的传输后端。所有方法都在渲染线程、且上下文为 current 时调用。
///
/// 策略创建时不持有资源；[`Self::reconfigure`] （重新）构建资源，[`Self::destroy`] 释放资源。
/// 已销毁的策略可以再次 reconfigure。
pub trait RenderStreamStrategy: Send {
    fn name(&self) -> &'static str;

    /// ### English
    /// (Re)builds resources for `samples` MSAA samples and `transfer_depth` in-flight slots.
    ///
    /// #### Parameters
    /// - `context`: Current offscreen context.
    /// - `handler`: Destination for completed frames.
    /// - `samples`: Clamped MSAA sample count.
    /// - `transfer_depth`: Clamped number of in-flight transfer slots.
    ///
    /// ### 中文
    /// 按 `samples` 个 MSAA 采样与 `transfer_depth` 个在途槽位（重新）构建资源。
    ///
    /// #### 参数
    /// - `context`：当前离屏上下文。
    /// - `handler`：完成帧的去向。
    /// - `samples`：截断后的 MSAA 采样数。
    /// - `transfer_depth`：截断后的在途传输槽位数量。
    fn reconfigure(
        &mut self,
        context: &mut dyn OffscreenContext,
        handler: StreamHandler,
        samples: u32,
        transfer_depth: usize,
    ) -> Result<(), BridgeError>;

    /// ### English
    /// Binds a transfer slot as the render destination, waiting per `wait`.
    ///
    /// ### 中文
    /// 按 `wait` 策略等待并绑定一个传输槽位作为渲染目标。
    fn bind(&mut self, context: &mut dyn OffscreenContext, wait: SlotWait) -> Result<(), BridgeError>;

    /// ### English
    /// CPU view of the bound slot, for drivers that write pixels directly.
    ///
    /// ### 中文
    /// 已绑定槽位的 CPU 视图，供直接写像素的驱动使用。
    fn bound_slot_mut(&mut self) -> Option<&mut TransferSlot>;

    /// ### English
    /// Finishes the bound frame and hands it to the presentation thread. Returns its sequence.
    ///
    /// ### 中文
    /// 完成已绑定的帧并交给呈现线程，返回其帧序号。
    fn swap(&mut self, context: &mut dyn OffscreenContext) -> Result<u64, BridgeError>;

    /// ### English
    /// Releases every resource. Slots still held by the presentation thread are freed when their
    /// leases drop.
    ///
    /// ### 中文
    /// 释放全部资源。仍被呈现线程持有的槽位会在其租约 drop 时释放。
    fn destroy(&mut self, context: &mut dyn OffscreenContext);
}

/// ### English
/// Produces frame contents on demand for [`super::FrameBridge::render_frame`].
///
/// GL drivers issue draw calls into the bound framebuffer and may ignore `slot`'s pixels; CPU
/// drivers write BGRA rows directly using `slot.stride()`.
///
/// ### 中文
/// 为 [`super::FrameBridge::render_frame`] 按需生成帧内容。
///
/// GL 驱动向已绑定的帧缓冲发出绘制调用，可以忽略 `slot` 的像素；
/// CPU 驱动按 `slot.stride()` 直接写入 BGRA 行。
pub trait RenderDriver {
    fn render(&mut self, slot: &mut TransferSlot);
}

impl<F: FnMut(&mut TransferSlot)> RenderDriver for F {
    fn render(&mut self, slot: &mut TransferSlot) {
        self(slot)
    }
}

/// ### English
/// Transfer-channel bookkeeping shared by the built-in strategies.
///
/// ### 中文
/// 内置策略共享的传输通道簿记。
#[derive(Default)]
pub(crate) struct StreamCore {
    channel: Option<TransferChannel>,
}

impl StreamCore {
    pub(crate) fn rebuild(
        &mut self,
        handler: StreamHandler,
        transfer_depth: usize,
        row_alignment: usize,
        row_order: RowOrder,
    ) {
        self.channel = Some(TransferChannel::new(handler, transfer_depth, row_alignment).with_row_order(row_order));
    }

    pub(crate) fn channel_mut(&mut self, strategy: &'static str) -> Result<&mut TransferChannel, BridgeError> {
        self.channel
            .as_mut()
            .ok_or_else(|| BridgeError::StreamReconfigure {
                strategy,
                reason: "stream used before reconfigure".to_owned(),
            })
    }

    pub(crate) fn bound_mut(&mut self) -> Option<&mut TransferSlot> {
        self.channel.as_mut()?.bound_mut()
    }

    pub(crate) fn clear(&mut self) {
        self.channel = None;
    }
}
