use crate::engine::error::BridgeError;

use super::FrameBridge;

impl FrameBridge {
    /// ### English
    /// Releases the render stream and the offscreen context. A second call returns
    /// `AlreadyDisposed`.
    ///
    /// Order: stop accepting frames and reconfigurations, discard queued frames, destroy the
    /// stream, then destroy the context. Slots the presentation thread still holds are freed when
    /// their leases drop; presentation never touches the context.
    ///
    /// ### 中文
    /// 释放 render stream 与离屏上下文。第二次调用返回 `AlreadyDisposed`。
    ///
    /// 顺序：停止接收帧与重配置、丢弃排队中的帧、销毁 stream，最后销毁上下文。
    /// 呈现线程仍持有的槽位会在其租约 drop 时释放；呈现过程从不访问上下文。
    pub fn dispose(&mut self) -> Result<(), BridgeError> {
        if self.disposed {
            return Err(BridgeError::AlreadyDisposed);
        }
        self.disposed = true;

        self.controller.surface().close();
        let dropped_actions = self.controller.close();
        self.batch.clear();

        let dropped_frames = self.controller.link().discard_ready_frames();

        if let Some(mut context) = self.context.take() {
            if let Err(err) = context.make_current() {
                log::warn!("make_current failed during dispose: {err}");
            }
            if let Some(mut stream) = self.stream.take() {
                stream.destroy(&mut *context);
            }
            context.destroy();
        }

        log::info!(
            "frame bridge disposed ({dropped_frames} queued frames, {dropped_actions} pending reconfigurations dropped)"
        );
        Ok(())
    }
}

impl Drop for FrameBridge {
    fn drop(&mut self) {
        if !self.disposed {
            let _ = self.dispose();
        }
    }
}
