use std::sync::Arc;

use crate::engine::config::{clamp_samples, clamp_transfer_depth};
use crate::engine::error::BridgeError;

use super::super::context::{DebugCallback, DebugMessage, OffscreenContext};
use super::super::controller::BridgeController;
use super::super::gl_stream::GlReadbackStream;
use super::super::software_stream::SoftwareStream;
use super::super::stream::RenderStreamStrategy;
use super::{FrameBridge, FrameBridgeInit};

fn log_debug_message(message: DebugMessage) {
    log::warn!(
        "GL debug [source 0x{:x}, type 0x{:x}, id {}, severity 0x{:x}]: {}",
        message.source,
        message.kind,
        message.id,
        message.severity,
        message.message
    );
}

fn default_strategy(context: &dyn OffscreenContext) -> Box<dyn RenderStreamStrategy> {
    if context.gl().is_some() {
        Box::new(GlReadbackStream::new())
    } else {
        Box::new(SoftwareStream::new())
    }
}

impl FrameBridge {
    /// ### English
    /// Creates the offscreen context, queries its limits and configures the initial render stream.
    ///
    /// Must run on the render thread. Context or resource failures are fatal: the partially
    /// created context is destroyed and the error returned, with no fallback.
    ///
    /// #### Parameters
    /// - `init`: Provider, presentation link, configuration and optional initial strategy.
    ///
    /// ### 中文
    /// 创建离屏上下文、查询其限制，并配置初始 render stream。
    ///
    /// 必须在渲染线程调用。上下文或资源创建失败是致命错误：会销毁已部分创建的上下文并返回错误，
    /// 没有降级方案。
    ///
    /// #### 参数
    /// - `init`：提供者、呈现链接、配置以及可选的初始策略。
    pub fn initialize(init: FrameBridgeInit<'_>) -> Result<Self, BridgeError> {
        let FrameBridgeInit {
            provider,
            link,
            config,
            strategy,
        } = init;

        if !provider.supports_offscreen() {
            return Err(BridgeError::OffscreenUnsupported);
        }

        let mut context = provider.create_offscreen_context(config.pixel_format, config.debug_context)?;
        if let Err(err) = context.make_current() {
            context.destroy();
            return Err(err);
        }

        let capabilities = context.capabilities();
        if !capabilities.offscreen_buffers {
            context.destroy();
            return Err(BridgeError::OffscreenUnsupported);
        }

        if config.debug_context {
            let callback: DebugCallback = Arc::new(log_debug_message);
            if !context.install_debug_callback(callback) {
                log::debug!("debug output unavailable on this context");
            }
        }

        let max_samples = capabilities.max_samples.max(1);
        let samples = clamp_samples(config.sample_count, max_samples);
        let transfer_depth = clamp_transfer_depth(config.transfer_depth);
        let handler = link.stream_handler();

        let mut stream = strategy.unwrap_or_else(|| default_strategy(&*context));
        if let Err(err) = stream.reconfigure(&mut *context, handler.clone(), samples, transfer_depth) {
            stream.destroy(&mut *context);
            context.destroy();
            return Err(err);
        }

        log::info!(
            "frame bridge ready: strategy {}, {samples}/{max_samples} samples, transfer depth {transfer_depth}",
            stream.name()
        );

        let seen_snapshot = handler.surface().snapshot_request();

        Ok(Self {
            context: Some(context),
            stream: Some(stream),
            controller: BridgeController::new(link, max_samples, samples, transfer_depth),
            handler,
            samples,
            transfer_depth,
            max_samples,
            seen_snapshot,
            batch: Vec::new(),
            disposed: false,
        })
    }
}
