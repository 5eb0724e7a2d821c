//! ### English
//! Error kinds surfaced by the frame bridge and the poll input layer.
//!
//! ### 中文
//! 帧桥接层与轮询输入层对外暴露的错误类型。

use thiserror::Error;

/// ### English
/// Errors produced by the render-thread side of the bridge.
///
/// Context/resource creation failures are fatal at initialization; there is no retry and no
/// degraded mode.
///
/// ### 中文
/// 桥接层渲染线程侧产生的错误。
///
/// 上下文/资源创建失败在初始化阶段即为致命错误：不重试，也没有降级模式。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// ### English
    /// The platform cannot provide an offscreen-buffer-capable context.
    ///
    /// ### 中文
    /// 平台无法提供支持离屏缓冲的上下文。
    #[error("support for offscreen buffers is required")]
    OffscreenUnsupported,

    /// ### English
    /// The GPU context provider failed to create the offscreen context.
    ///
    /// ### 中文
    /// GPU 上下文提供者创建离屏上下文失败。
    #[error("failed to create offscreen context: {0}")]
    ContextCreation(String),

    /// ### English
    /// The requested pixel format is not available on this platform.
    ///
    /// ### 中文
    /// 请求的像素格式在当前平台不可用。
    #[error("pixel format unavailable: {0}")]
    PixelFormatUnavailable(String),

    /// ### English
    /// `dispose` was called on a bridge that is already disposed.
    ///
    /// ### 中文
    /// 对已释放的桥接对象再次调用 `dispose`。
    #[error("frame bridge already disposed")]
    AlreadyDisposed,

    /// ### English
    /// A frame operation was attempted after disposal.
    ///
    /// ### 中文
    /// 在释放之后尝试帧操作。
    #[error("frame bridge is disposed")]
    Disposed,

    /// ### English
    /// No render stream is installed (a previous strategy swap failed).
    ///
    /// ### 中文
    /// 当前没有可用的 render stream（之前的策略切换失败）。
    #[error("no active render stream")]
    NoActiveStream,

    /// ### English
    /// A render stream strategy failed to (re)build its resources.
    ///
    /// ### 中文
    /// render stream 策略（重新）构建资源失败。
    #[error("render stream `{strategy}` failed to reconfigure: {reason}")]
    StreamReconfigure {
        /// ### English
        /// Name of the failing strategy.
        ///
        /// ### 中文
        /// 失败策略的名称。
        strategy: &'static str,
        /// ### English
        /// Backend-provided failure description.
        ///
        /// ### 中文
        /// 后端提供的失败描述。
        reason: String,
    },

    /// ### English
    /// A GL call reported an error.
    ///
    /// ### 中文
    /// GL 调用返回错误。
    #[error("GL error: {0}")]
    Gl(String),

    /// ### English
    /// Non-blocking frame begin found every transfer slot in flight.
    ///
    /// ### 中文
    /// 非阻塞 begin 时所有传输槽位都在使用中。
    #[error("all transfer slots are in flight")]
    WouldBlock,

    /// ### English
    /// Timed out waiting for a transfer slot to be released.
    ///
    /// ### 中文
    /// 等待传输槽位释放超时。
    #[error("timed out waiting for a free transfer slot")]
    Timeout,

    /// ### English
    /// `end_frame` was called without a bound slot.
    ///
    /// ### 中文
    /// 未绑定槽位时调用了 `end_frame`。
    #[error("no transfer slot is bound")]
    NotBound,
}

/// ### English
/// Errors produced by the poll input capability set.
///
/// ### 中文
/// 轮询输入能力集产生的错误。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// ### English
    /// The capability is not supported by this input source.
    ///
    /// ### 中文
    /// 该输入源不支持此能力。
    #[error("{0} is not supported")]
    Unsupported(&'static str),
}
