//! ### English
//! Presentation-thread consumer of the pixel transfer channel.
//!
//! For every completed frame: discard it while the surface is hidden, reallocate the presentation
//! image when the frame size changes, upload with the producer stride, then release the slot.
//!
//! ### 中文
//! 像素传输通道在呈现线程上的消费者。
//!
//! 对每个完成的帧：surface 不可见时丢弃；帧尺寸变化时重新分配呈现图像；
//! 按生产者声明的行跨度上传；最后释放槽位。

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel as channel;

use crate::engine::config::{MAX_TRANSFER_DEPTH, PresenterConfig};
use crate::engine::frame::{SharedSurfaceState, SlotLease};

use super::image::PresentationImage;
use super::link::{PresentationTask, SurfaceLink};
use super::target::SurfaceTarget;

/// ### English
/// What happened to one completed frame.
///
/// ### 中文
/// 单个完成帧的处理结果。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentOutcome {
    /// ### English
    /// Uploaded; `reallocated` is set when a new presentation image was bound first.
    ///
    /// ### 中文
    /// 已上传；若先绑定了新的呈现图像则 `reallocated` 为真。
    Presented { frame_seq: u64, reallocated: bool },
    /// ### English
    /// Discarded because the surface is not visible.
    ///
    /// ### 中文
    /// 因 surface 不可见而被丢弃。
    Hidden { frame_seq: u64 },
    /// ### English
    /// Discarded because stride and pixel length disagree with the frame size.
    ///
    /// ### 中文
    /// 因行跨度与像素长度和帧尺寸不符而被丢弃。
    Rejected { frame_seq: u64 },
}

/// ### English
/// Owns the surface target and the presentation image on the presentation thread.
///
/// ### 中文
/// 在呈现线程上持有 surface target 与呈现图像。
pub struct Presenter<T: SurfaceTarget> {
    target: T,
    config: PresenterConfig,
    surface: Arc<SharedSurfaceState>,
    frames: channel::Receiver<SlotLease>,
    tasks: channel::Receiver<PresentationTask>,
    image: Option<PresentationImage>,
    allocations: u64,
}

impl<T: SurfaceTarget> Presenter<T> {
    /// ### English
    /// Creates the presenter and the [`SurfaceLink`] the frame bridge is initialized with.
    ///
    /// The target's current size and visibility are published immediately.
    ///
    /// ### 中文
    /// 创建呈现器，以及用于初始化帧桥接层的 [`SurfaceLink`]。
    ///
    /// target 的当前尺寸与可见性会立即发布。
    pub fn new(target: T, config: PresenterConfig) -> (Self, SurfaceLink) {
        let surface = Arc::new(SharedSurfaceState::new(target.current_size()));
        surface.set_visible(target.is_visible());

        let (frames_tx, frames_rx) = channel::bounded(MAX_TRANSFER_DEPTH);
        let (tasks_tx, tasks_rx) = channel::unbounded();
        let link = SurfaceLink::new(Arc::clone(&surface), frames_tx, frames_rx.clone(), tasks_tx);

        let presenter = Self {
            target,
            config,
            surface,
            frames: frames_rx,
            tasks: tasks_rx,
            image: None,
            allocations: 0,
        };
        (presenter, link)
    }

    #[inline]
    pub fn target(&self) -> &T {
        &self.target
    }

    #[inline]
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    #[inline]
    pub fn image(&self) -> Option<&PresentationImage> {
        self.image.as_ref()
    }

    /// ### English
    /// Images replaced because the frame size changed (the first allocation is not counted).
    ///
    /// ### 中文
    /// 因帧尺寸变化而被替换的图像数量（首次分配不计入）。
    pub fn reallocations(&self) -> u64 {
        self.allocations.saturating_sub(1)
    }

    /// ### English
    /// Publishes the target's size and visibility for the render thread. Returns `true` if the
    /// size changed.
    ///
    /// ### 中文
    /// 为渲染线程发布 target 的尺寸与可见性；尺寸变化时返回 `true`。
    pub fn sync_surface(&self) -> bool {
        self.surface.set_visible(self.target.is_visible());
        self.surface.publish_size(self.target.current_size())
    }

    /// ### English
    /// Runs every queued presentation task. Returns how many ran.
    ///
    /// ### 中文
    /// 执行所有排队的呈现任务，返回执行数量。
    pub fn run_tasks(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.tasks.try_recv() {
            task(&mut self.target);
            ran += 1;
        }
        ran
    }

    /// ### English
    /// Consumes one completed frame; the slot is released before returning.
    ///
    /// ### 中文
    /// 消费一个完成的帧；返回前槽位已被释放。
    pub fn present_frame(&mut self, lease: SlotLease) -> PresentOutcome {
        let frame_seq = lease.frame_seq();

        if !self.target.is_visible() {
            return PresentOutcome::Hidden { frame_seq };
        }

        if !lease.layout_is_consistent() {
            log::warn!(
                "rejecting frame {frame_seq}: stride {} does not fit {:?} in {} bytes",
                lease.stride(),
                lease.size(),
                lease.pixels().len()
            );
            return PresentOutcome::Rejected { frame_seq };
        }

        let size = lease.size();
        let reallocated = self.image.as_ref().is_none_or(|image| image.size() != size);
        if reallocated {
            let image = self.image.insert(PresentationImage::new(size));
            self.target.set_image(image);
            self.allocations += 1;
            log::debug!("presentation image allocated at {}x{}", size.width, size.height);
        }

        if let Some(image) = self.image.as_mut() {
            image.upload(&lease, self.config.flip_vertical);
            self.target.image_updated(image);
        }
        lease.release();

        PresentOutcome::Presented {
            frame_seq,
            reallocated,
        }
    }

    /// ### English
    /// Presents the next queued frame, if any.
    ///
    /// ### 中文
    /// 呈现下一个排队中的帧（如果有）。
    pub fn present_next(&mut self) -> Option<PresentOutcome> {
        let lease = self.frames.try_recv().ok()?;
        Some(self.present_frame(lease))
    }

    /// ### English
    /// Waits up to `timeout` for a frame and presents it.
    ///
    /// ### 中文
    /// 最多等待 `timeout` 以获取一帧并呈现。
    pub fn wait_and_present(&mut self, timeout: Duration) -> Option<PresentOutcome> {
        let lease = self.frames.recv_timeout(timeout).ok()?;
        Some(self.present_frame(lease))
    }

    /// ### English
    /// One presentation-thread turn: run tasks, publish surface state, then present every queued
    /// frame in order. Returns the number of frames handled.
    ///
    /// ### 中文
    /// 呈现线程的一轮处理：执行任务、发布 surface 状态，然后按顺序呈现所有排队帧。
    /// 返回处理的帧数。
    pub fn pump(&mut self) -> usize {
        self.run_tasks();
        self.sync_surface();
        let mut handled = 0;
        while self.present_next().is_some() {
            handled += 1;
        }
        handled
    }
}
