//! ### English
//! Handles connecting the render and tick threads to the presentation thread.
//!
//! ### 中文
//! 将渲染线程、tick 线程与呈现线程连接起来的句柄。

use std::sync::Arc;

use crossbeam_channel as channel;

use crate::engine::frame::{SharedSurfaceState, SlotLease, StreamHandler};

use super::target::SurfaceTarget;

/// ### English
/// Closure executed on the presentation thread with the surface target.
///
/// ### 中文
/// 在呈现线程上、以 surface target 为参数执行的闭包。
pub type PresentationTask = Box<dyn FnOnce(&mut dyn SurfaceTarget) + Send>;

/// ### English
/// Everything the frame bridge needs from the presentation side: shared surface metadata, the
/// ready-frame queue and the presentation task queue.
///
/// ### 中文
/// 帧桥接层需要的全部呈现侧资源：共享 surface 元数据、就绪帧队列与呈现任务队列。
#[derive(Clone)]
pub struct SurfaceLink {
    surface: Arc<SharedSurfaceState>,
    frames_tx: channel::Sender<SlotLease>,
    frames_rx: channel::Receiver<SlotLease>,
    tasks: channel::Sender<PresentationTask>,
}

impl SurfaceLink {
    pub(crate) fn new(
        surface: Arc<SharedSurfaceState>,
        frames_tx: channel::Sender<SlotLease>,
        frames_rx: channel::Receiver<SlotLease>,
        tasks: channel::Sender<PresentationTask>,
    ) -> Self {
        Self {
            surface,
            frames_tx,
            frames_rx,
            tasks,
        }
    }

    #[inline]
    pub fn surface(&self) -> &Arc<SharedSurfaceState> {
        &self.surface
    }

    /// ### English
    /// Frame destination handed to render stream strategies.
    ///
    /// Each call starts a fresh slot pool; clone the returned handler to share it.
    ///
    /// ### 中文
    /// 交给 render stream 策略的帧去向。
    ///
    /// 每次调用都会新建一个槽位池；需要共享时请克隆返回的 handler。
    pub fn stream_handler(&self) -> StreamHandler {
        StreamHandler::new(Arc::clone(&self.surface), self.frames_tx.clone())
    }

    /// ### English
    /// Completed frames waiting for the presenter.
    ///
    /// ### 中文
    /// 等待呈现器处理的已完成帧数量。
    pub fn ready_frames(&self) -> usize {
        self.frames_rx.len()
    }

    /// ### English
    /// Releases every queued frame without presenting it. Returns how many were dropped.
    ///
    /// ### 中文
    /// 释放所有排队中的帧而不呈现，返回被丢弃的数量。
    pub(crate) fn discard_ready_frames(&self) -> usize {
        self.frames_rx.try_iter().map(SlotLease::release).count()
    }

    /// ### English
    /// Schedules `task` on the presentation thread. Returns `false` if the presenter is gone.
    ///
    /// ### 中文
    /// 将 `task` 调度到呈现线程执行；若呈现器已不存在则返回 `false`。
    pub fn run_later<F>(&self, task: F) -> bool
    where
        F: FnOnce(&mut dyn SurfaceTarget) + Send + 'static,
    {
        self.tasks.send(Box::new(task)).is_ok()
    }

    /// ### English
    /// Applies `label` to the surface target asynchronously.
    ///
    /// ### 中文
    /// 异步地将 `label` 应用到 surface target。
    pub fn set_presentation_label(&self, label: impl Into<String>) -> bool {
        let label = label.into();
        self.run_later(move |target| target.set_label(&label))
    }

    pub fn focus_requester(&self) -> FocusRequester {
        FocusRequester {
            tasks: self.tasks.clone(),
        }
    }
}

/// ### English
/// Asks the presentation thread to focus the surface.
///
/// ### 中文
/// 请求呈现线程让 surface 获得焦点。
#[derive(Clone)]
pub struct FocusRequester {
    tasks: channel::Sender<PresentationTask>,
}

impl FocusRequester {
    /// ### English
    /// Returns `false` if the presenter is gone.
    ///
    /// ### 中文
    /// 若呈现器已不存在则返回 `false`。
    pub fn request_focus(&self) -> bool {
        self.tasks
            .send(Box::new(|target: &mut dyn SurfaceTarget| target.request_focus()))
            .is_ok()
    }
}
