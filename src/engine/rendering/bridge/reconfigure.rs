use std::mem;

use crate::engine::config::{clamp_samples, clamp_transfer_depth};
use crate::engine::error::BridgeError;

use super::super::pending::Reconfiguration;
use super::super::stream::RenderStreamStrategy;
use super::FrameBridge;

impl FrameBridge {
    /// ### English
    /// Applies every reconfiguration enqueued so far, in order, each exactly once.
    ///
    /// A failing action does not stop the rest of the batch; the first error is returned after
    /// the batch finishes.
    ///
    /// ### 中文
    /// 按顺序执行截至目前入队的所有重配置，每个恰好执行一次。
    ///
    /// 某个操作失败不会中断本批剩余操作；整批执行完后返回第一个错误。
    pub(super) fn apply_pending(&mut self) -> Result<(), BridgeError> {
        let mut batch = mem::take(&mut self.batch);
        self.controller.take_batch(&mut batch);

        let mut result = Ok(());
        for action in batch.drain(..) {
            log::debug!("applying {action:?}");
            let applied = match action {
                Reconfiguration::SampleCount(samples) => self.apply_samples(samples),
                Reconfiguration::TransferDepth(depth) => self.apply_transfer_depth(depth),
                Reconfiguration::Strategy(strategy) => self.install_strategy(strategy),
            };
            if let Err(err) = applied
                && result.is_ok()
            {
                result = Err(err);
            }
        }

        self.batch = batch;
        result
    }

    fn apply_samples(&mut self, samples: u32) -> Result<(), BridgeError> {
        let samples = clamp_samples(samples, self.max_samples);
        if samples == self.samples {
            return Ok(());
        }
        self.samples = samples;
        self.rebuild_stream()?;
        self.controller.surface().request_snapshot();
        Ok(())
    }

    fn apply_transfer_depth(&mut self, transfer_depth: usize) -> Result<(), BridgeError> {
        let transfer_depth = clamp_transfer_depth(transfer_depth);
        if transfer_depth == self.transfer_depth {
            return Ok(());
        }
        self.transfer_depth = transfer_depth;
        self.rebuild_stream()?;
        self.controller.surface().request_snapshot();
        Ok(())
    }

    /// ### English
    /// Destroys and reconfigures the active stream with the current samples/depth.
    ///
    /// ### 中文
    /// 以当前采样数/深度销毁并重新配置当前 stream。
    fn rebuild_stream(&mut self) -> Result<(), BridgeError> {
        let (Some(context), Some(stream)) = (self.context.as_deref_mut(), self.stream.as_mut()) else {
            return Ok(());
        };
        context.make_current()?;
        stream.destroy(context);
        if let Err(err) = stream.reconfigure(
            context,
            self.handler.clone(),
            self.samples,
            self.transfer_depth,
        ) {
            log::warn!("render stream {} failed to rebuild: {err}", stream.name());
            self.stream = None;
            return Err(err);
        }
        Ok(())
    }

    /// ### English
    /// Destroys the active stream, then configures `strategy`. On failure no stream is active
    /// until another strategy is installed.
    ///
    /// ### 中文
    /// 先销毁当前 stream，再配置 `strategy`。失败时在安装新策略之前没有可用 stream。
    fn install_strategy(&mut self, mut strategy: Box<dyn RenderStreamStrategy>) -> Result<(), BridgeError> {
        let Some(context) = self.context.as_deref_mut() else {
            return Err(BridgeError::Disposed);
        };
        context.make_current()?;
        if let Some(mut previous) = self.stream.take() {
            previous.destroy(context);
        }

        if let Err(err) = strategy.reconfigure(
            context,
            self.handler.clone(),
            self.samples,
            self.transfer_depth,
        ) {
            log::warn!("render stream swap to {} failed: {err}", strategy.name());
            strategy.destroy(context);
            return Err(err);
        }

        log::debug!("render stream switched to {}", strategy.name());
        self.stream = Some(strategy);
        Ok(())
    }
}
