//! ### English
//! Configuration bundles for the frame bridge, the presenter and the input layer.
//!
//! ### 中文
//! 帧桥接、呈现器与输入层的配置参数包。

use crate::engine::input::FocusLossPolicy;
use crate::engine::rendering::PixelFormat;

/// ### English
/// Default number of in-flight transfer slots.
///
/// ### 中文
/// 默认同时在途的传输槽位数量。
pub const DEFAULT_TRANSFER_DEPTH: usize = 3;

/// ### English
/// Upper bound for the transfer depth (also the ready-queue capacity).
///
/// ### 中文
/// 传输深度上限（同时也是就绪队列容量）。
pub const MAX_TRANSFER_DEPTH: usize = 16;

/// ### English
/// Default initial capacity of each input event pool.
///
/// ### 中文
/// 每个输入事件池的默认初始容量。
pub const DEFAULT_POOL_CAPACITY: usize = 16;

/// ### English
/// Default soft ceiling of free events kept by a pool before it shrinks back.
///
/// ### 中文
/// 事件池保留空闲事件的默认软上限，超出后回收收缩。
pub const DEFAULT_POOL_MAX_FREE: usize = 1000;

/// ### English
/// Initialization knobs for `FrameBridge`.
///
/// ### 中文
/// `FrameBridge` 的初始化参数。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameBridgeConfig {
    /// ### English
    /// Requested MSAA sample count (clamped to the context maximum at init).
    ///
    /// ### 中文
    /// 请求的 MSAA 采样数（初始化时按上下文最大值截断）。
    pub sample_count: u32,
    /// ### English
    /// Number of transfer slots allowed in flight at once.
    ///
    /// ### 中文
    /// 同时允许在途的传输槽位数量。
    pub transfer_depth: usize,
    /// ### English
    /// Requests a debug context and installs a debug-output callback when supported.
    ///
    /// ### 中文
    /// 请求调试上下文，并在支持时安装调试输出回调。
    pub debug_context: bool,
    /// ### English
    /// Pixel format requested from the context provider.
    ///
    /// ### 中文
    /// 向上下文提供者请求的像素格式。
    pub pixel_format: PixelFormat,
}

impl Default for FrameBridgeConfig {
    fn default() -> Self {
        Self {
            sample_count: 1,
            transfer_depth: DEFAULT_TRANSFER_DEPTH,
            debug_context: true,
            pixel_format: PixelFormat::default(),
        }
    }
}

/// ### English
/// Presenter behavior.
///
/// ### 中文
/// 呈现器行为配置。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PresenterConfig {
    /// ### English
    /// Extra vertical flip on top of each frame's own row order, for targets whose origin is the
    /// bottom-left corner. Off by default: uploaded images are always top row first.
    ///
    /// ### 中文
    /// 在每帧自身行序之外额外的纵向翻转，用于原点在左下角的目标。默认关闭：上传后的图像总是首行为顶部。
    pub flip_vertical: bool,
}

/// ### English
/// Input layer knobs.
///
/// ### 中文
/// 输入层参数。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputConfig {
    /// ### English
    /// Events preallocated per pool.
    ///
    /// ### 中文
    /// 每个事件池预分配的事件数。
    pub pool_initial_capacity: usize,
    /// ### English
    /// Soft ceiling of free events kept per pool.
    ///
    /// ### 中文
    /// 每个事件池保留空闲事件的软上限。
    pub pool_max_free: usize,
    /// ### English
    /// Predicate deciding when held focus is dropped.
    ///
    /// ### 中文
    /// 决定何时失去焦点的判定策略。
    pub focus_loss: FocusLossPolicy,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pool_initial_capacity: DEFAULT_POOL_CAPACITY,
            pool_max_free: DEFAULT_POOL_MAX_FREE,
            focus_loss: FocusLossPolicy::default(),
        }
    }
}

/// ### English
/// Clamps a requested transfer depth into `1..=MAX_TRANSFER_DEPTH`.
///
/// ### 中文
/// 将请求的传输深度截断到 `1..=MAX_TRANSFER_DEPTH`。
#[inline]
pub(crate) fn clamp_transfer_depth(depth: usize) -> usize {
    depth.clamp(1, MAX_TRANSFER_DEPTH)
}

/// ### English
/// Clamps a requested sample count into `1..=max_samples`.
///
/// ### 中文
/// 将请求的采样数截断到 `1..=max_samples`。
#[inline]
pub(crate) fn clamp_samples(samples: u32, max_samples: u32) -> u32 {
    samples.clamp(1, max_samples.max(1))
}
