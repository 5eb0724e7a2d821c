//! ### English
//! Thread-safe handle for reconfiguring a frame bridge from outside the render thread.
//!
//! ### 中文
//! 用于在渲染线程之外重新配置帧桥接层的线程安全句柄。

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crate::engine::config::{clamp_samples, clamp_transfer_depth};
use crate::engine::frame::SharedSurfaceState;
use crate::engine::present::SurfaceLink;

use super::pending::{PendingReconfigQueue, Reconfiguration};
use super::stream::RenderStreamStrategy;

struct ControllerShared {
    queue: PendingReconfigQueue,
    link: SurfaceLink,
    max_samples: u32,
    /// ### English
    /// Last requested (not necessarily applied) values, used to drop redundant requests.
    ///
    /// ### 中文
    /// 最近一次请求的值（不一定已生效），用于丢弃重复请求。
    requested_samples: AtomicU32,
    requested_depth: AtomicUsize,
}

/// ### English
/// Cloneable, `Send + Sync` handle queueing reconfigurations for the render thread.
///
/// Requests are never applied synchronously; the render thread applies them, in enqueue order,
/// at the next `begin_frame`.
///
/// ### 中文
/// 可克隆、`Send + Sync` 的句柄，为渲染线程排队重配置请求。
///
/// 请求不会同步生效；渲染线程会在下一次 `begin_frame` 时按入队顺序执行。
#[derive(Clone)]
pub struct BridgeController {
    shared: Arc<ControllerShared>,
}

impl BridgeController {
    pub(crate) fn new(link: SurfaceLink, max_samples: u32, samples: u32, transfer_depth: usize) -> Self {
        Self {
            shared: Arc::new(ControllerShared {
                queue: PendingReconfigQueue::new(),
                link,
                max_samples,
                requested_samples: AtomicU32::new(samples),
                requested_depth: AtomicUsize::new(transfer_depth),
            }),
        }
    }

    /// ### English
    /// Maximum MSAA sample count reported by the context at initialization.
    ///
    /// ### 中文
    /// 初始化时上下文报告的最大 MSAA 采样数。
    #[inline]
    pub fn max_samples(&self) -> u32 {
        self.shared.max_samples
    }

    /// ### English
    /// Requests a new MSAA sample count (clamped to `1..=max_samples`).
    ///
    /// Returns `false` if the value equals the last request or the bridge is disposed.
    ///
    /// ### 中文
    /// 请求新的 MSAA 采样数（截断到 `1..=max_samples`）。
    ///
    /// 若与上一次请求相同或桥接层已释放，则返回 `false`。
    pub fn set_sample_count(&self, samples: u32) -> bool {
        let samples = clamp_samples(samples, self.shared.max_samples);
        if self.shared.requested_samples.swap(samples, Ordering::AcqRel) == samples {
            return false;
        }
        self.shared.queue.push(Reconfiguration::SampleCount(samples))
    }

    /// ### English
    /// Requests a new transfer depth (clamped to `1..=MAX_TRANSFER_DEPTH`).
    ///
    /// Returns `false` if the value equals the last request or the bridge is disposed.
    ///
    /// ### 中文
    /// 请求新的传输深度（截断到 `1..=MAX_TRANSFER_DEPTH`）。
    ///
    /// 若与上一次请求相同或桥接层已释放，则返回 `false`。
    pub fn set_transfer_depth(&self, transfer_depth: usize) -> bool {
        let transfer_depth = clamp_transfer_depth(transfer_depth);
        if self
            .shared
            .requested_depth
            .swap(transfer_depth, Ordering::AcqRel)
            == transfer_depth
        {
            return false;
        }
        self.shared
            .queue
            .push(Reconfiguration::TransferDepth(transfer_depth))
    }

    /// ### English
    /// Requests a render stream strategy swap. The current strategy is destroyed before the new
    /// one is configured.
    ///
    /// ### 中文
    /// 请求切换 render stream 策略。新策略配置之前会先销毁当前策略。
    pub fn set_render_stream_strategy(&self, strategy: Box<dyn RenderStreamStrategy>) -> bool {
        self.shared.queue.push(Reconfiguration::Strategy(strategy))
    }

    /// ### English
    /// Bumps the snapshot counter ("re-render even if nothing changed"). Returns the new value.
    ///
    /// ### 中文
    /// 递增 snapshot 计数器（“即使无变化也重新渲染”），返回新值。
    pub fn request_snapshot_refresh(&self) -> u64 {
        self.shared.link.surface().request_snapshot()
    }

    pub fn snapshot_request(&self) -> u64 {
        self.shared.link.surface().snapshot_request()
    }

    /// ### English
    /// Applies `label` to the surface target on the presentation thread.
    ///
    /// ### 中文
    /// 在呈现线程上把 `label` 应用到 surface target。
    pub fn set_presentation_label(&self, label: impl Into<String>) -> bool {
        self.shared.link.set_presentation_label(label)
    }

    /// ### English
    /// Reconfigurations waiting for the next `begin_frame`.
    ///
    /// ### 中文
    /// 等待下一次 `begin_frame` 的重配置数量。
    pub fn pending(&self) -> usize {
        self.shared.queue.len()
    }

    pub(crate) fn surface(&self) -> &Arc<SharedSurfaceState> {
        self.shared.link.surface()
    }

    pub(crate) fn link(&self) -> &SurfaceLink {
        &self.shared.link
    }

    pub(crate) fn take_batch(&self, out: &mut Vec<Reconfiguration>) {
        self.shared.queue.take_batch(out);
    }

    pub(crate) fn close(&self) -> usize {
        self.shared.queue.close()
    }
}
