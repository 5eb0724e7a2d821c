//! ### English
//! Frame bridge: owns the offscreen GPU context and the active render stream on the render thread,
//! applies queued reconfigurations between frames and marshals completed frames to the
//! presentation thread.
//!
//! ### 中文
//! 帧桥接层：在渲染线程上持有离屏 GPU 上下文与当前 render stream，
//! 在帧之间执行排队的重配置，并把完成的帧转交给呈现线程。

use crate::engine::config::FrameBridgeConfig;
use crate::engine::frame::StreamHandler;
use crate::engine::present::SurfaceLink;

use super::context::{GpuContextProvider, OffscreenContext};
use super::controller::BridgeController;
use super::pending::Reconfiguration;
use super::stream::RenderStreamStrategy;

mod frame_ops;
mod init;
mod reconfigure;
mod teardown;

/// ### English
/// Initialization parameters for [`FrameBridge`].
///
/// ### 中文
/// [`FrameBridge`] 的初始化参数。
pub struct FrameBridgeInit<'a> {
    /// ### English
    /// Platform hook creating the offscreen context.
    ///
    /// ### 中文
    /// 创建离屏上下文的平台钩子。
    pub provider: &'a dyn GpuContextProvider,
    /// ### English
    /// Link to the presentation thread (from `Presenter::new`).
    ///
    /// ### 中文
    /// 通往呈现线程的链接（来自 `Presenter::new`）。
    pub link: SurfaceLink,
    pub config: FrameBridgeConfig,
    /// ### English
    /// Initial strategy; `None` picks GL read-back when the context exposes GL, software otherwise.
    ///
    /// ### 中文
    /// 初始策略；为 `None` 时，若上下文提供 GL 则选择 GL 回读，否则选择软件实现。
    pub strategy: Option<Box<dyn RenderStreamStrategy>>,
}

/// ### English
/// Render-thread owner of the offscreen context and the active render stream.
///
/// Not `Send`: the context is bound to the thread that initialized the bridge. Other threads talk
/// to it through [`BridgeController`].
///
/// ### 中文
/// 渲染线程上离屏上下文与当前 render stream 的持有者。
///
/// 不是 `Send`：上下文绑定在初始化桥接层的线程上。其它线程通过 [`BridgeController`] 与其交互。
pub struct FrameBridge {
    /// ### English
    /// Offscreen context; `None` once disposed.
    ///
    /// ### 中文
    /// 离屏上下文；释放后为 `None`。
    context: Option<Box<dyn OffscreenContext>>,
    /// ### English
    /// Active render stream; `None` after a failed strategy swap until a new one is installed.
    ///
    /// ### 中文
    /// 当前 render stream；策略切换失败后为 `None`，直到安装新策略。
    stream: Option<Box<dyn RenderStreamStrategy>>,
    controller: BridgeController,
    handler: StreamHandler,
    samples: u32,
    transfer_depth: usize,
    max_samples: u32,
    /// ### English
    /// Snapshot counter value observed by the last [`Self::snapshot_pending`] call.
    ///
    /// ### 中文
    /// 上一次 [`Self::snapshot_pending`] 调用观察到的 snapshot 计数值。
    seen_snapshot: u64,
    /// ### English
    /// Scratch buffer reused for each reconfiguration batch.
    ///
    /// ### 中文
    /// 每批重配置复用的暂存缓冲。
    batch: Vec<Reconfiguration>,
    disposed: bool,
}

impl FrameBridge {
    /// ### English
    /// Thread-safe handle for reconfiguring this bridge.
    ///
    /// ### 中文
    /// 用于重新配置本桥接层的线程安全句柄。
    pub fn controller(&self) -> BridgeController {
        self.controller.clone()
    }

    #[inline]
    pub fn max_samples(&self) -> u32 {
        self.max_samples
    }

    /// ### English
    /// Currently applied MSAA sample count.
    ///
    /// ### 中文
    /// 当前生效的 MSAA 采样数。
    #[inline]
    pub fn sample_count(&self) -> u32 {
        self.samples
    }

    /// ### English
    /// Currently applied transfer depth.
    ///
    /// ### 中文
    /// 当前生效的传输深度。
    #[inline]
    pub fn transfer_depth(&self) -> usize {
        self.transfer_depth
    }

    pub fn strategy_name(&self) -> Option<&'static str> {
        self.stream.as_ref().map(|stream| stream.name())
    }

    /// ### English
    /// Transfer slots not in the free pool, including those handed out before the last stream
    /// rebuild or strategy swap.
    ///
    /// ### 中文
    /// 不在空闲池中的传输槽位数量，包括上次 stream 重建或策略切换之前发出的槽位。
    pub fn in_flight(&self) -> usize {
        self.handler.in_flight()
    }

    /// ### English
    /// Whether a snapshot refresh was requested since the previous call, either explicitly or by
    /// an applied sample-count or depth change. Consumes the request.
    ///
    /// Render loops that only draw on change should draw a frame when this returns `true`.
    ///
    /// ### 中文
    /// 自上次调用以来是否请求过 snapshot 刷新（显式请求，或已生效的采样数/深度变更）。
    /// 调用会消费该请求。
    ///
    /// 仅在变化时绘制的渲染循环应在返回 `true` 时绘制一帧。
    pub fn snapshot_pending(&mut self) -> bool {
        let current = self.handler.surface().snapshot_request();
        let pending = current != self.seen_snapshot;
        self.seen_snapshot = current;
        pending
    }

    /// ### English
    /// Last visibility published by the presentation thread. Frames completed while hidden are
    /// released without reaching the presenter.
    ///
    /// ### 中文
    /// 呈现线程最近发布的可见性。隐藏期间完成的帧会直接释放，不会送达呈现端。
    pub fn is_surface_visible(&self) -> bool {
        self.handler.surface().is_visible()
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn set_sample_count(&self, samples: u32) -> bool {
        self.controller.set_sample_count(samples)
    }

    pub fn set_transfer_depth(&self, transfer_depth: usize) -> bool {
        self.controller.set_transfer_depth(transfer_depth)
    }

    pub fn set_render_stream_strategy(&self, strategy: Box<dyn RenderStreamStrategy>) -> bool {
        self.controller.set_render_stream_strategy(strategy)
    }

    pub fn request_snapshot_refresh(&self) -> u64 {
        self.controller.request_snapshot_refresh()
    }

    pub fn set_presentation_label(&self, label: impl Into<String>) -> bool {
        self.controller.set_presentation_label(label)
    }
}
