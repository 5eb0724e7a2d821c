use std::time::Duration;

use crate::engine::error::BridgeError;
use crate::engine::frame::{SlotWait, TransferSlot};

use super::super::stream::RenderDriver;
use super::FrameBridge;

impl FrameBridge {
    /// ### English
    /// Applies queued reconfigurations, then binds a transfer slot, blocking while every slot is
    /// in flight (backpressure).
    ///
    /// ### 中文
    /// 执行排队的重配置，然后绑定一个传输槽位；所有槽位都在途时阻塞（背压）。
    pub fn begin_frame(&mut self) -> Result<(), BridgeError> {
        self.begin_frame_with(SlotWait::Blocking)
    }

    /// ### English
    /// Like [`Self::begin_frame`] but fails with `WouldBlock` instead of waiting.
    ///
    /// ### 中文
    /// 与 [`Self::begin_frame`] 相同，但不等待，而是以 `WouldBlock` 失败。
    pub fn try_begin_frame(&mut self) -> Result<(), BridgeError> {
        self.begin_frame_with(SlotWait::NonBlocking)
    }

    /// ### English
    /// Like [`Self::begin_frame`] but waits at most `timeout` for a free slot.
    ///
    /// ### 中文
    /// 与 [`Self::begin_frame`] 相同，但最多等待 `timeout` 以获取空闲槽位。
    pub fn begin_frame_timeout(&mut self, timeout: Duration) -> Result<(), BridgeError> {
        self.begin_frame_with(SlotWait::Timeout(timeout))
    }

    fn begin_frame_with(&mut self, wait: SlotWait) -> Result<(), BridgeError> {
        if self.disposed {
            return Err(BridgeError::Disposed);
        }
        self.apply_pending()?;

        let (Some(context), Some(stream)) = (self.context.as_deref_mut(), self.stream.as_mut()) else {
            return Err(BridgeError::NoActiveStream);
        };
        stream.bind(context, wait)
    }

    /// ### English
    /// CPU view of the slot bound by the last `begin_frame`.
    ///
    /// ### 中文
    /// 上一次 `begin_frame` 绑定的槽位的 CPU 视图。
    pub fn frame_mut(&mut self) -> Option<&mut TransferSlot> {
        self.stream.as_mut()?.bound_slot_mut()
    }

    /// ### English
    /// Swaps the bound slot into the transfer pipeline. Returns the frame sequence number.
    ///
    /// ### 中文
    /// 将已绑定槽位交换进传输管线，返回帧序号。
    pub fn end_frame(&mut self) -> Result<u64, BridgeError> {
        if self.disposed {
            return Err(BridgeError::Disposed);
        }
        let (Some(context), Some(stream)) = (self.context.as_deref_mut(), self.stream.as_mut()) else {
            return Err(BridgeError::NoActiveStream);
        };
        stream.swap(context)
    }

    /// ### English
    /// `begin_frame`, let `driver` fill the bound slot, then `end_frame`.
    ///
    /// ### 中文
    /// 执行 `begin_frame`，由 `driver` 填充已绑定槽位，然后执行 `end_frame`。
    pub fn render_frame(&mut self, driver: &mut dyn RenderDriver) -> Result<u64, BridgeError> {
        self.begin_frame()?;
        let slot = self.frame_mut().ok_or(BridgeError::NotBound)?;
        driver.render(slot);
        self.end_frame()
    }
}
