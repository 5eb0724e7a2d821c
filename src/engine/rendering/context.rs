//! ### English
//! Offscreen GPU context abstraction.
//!
//! The context is an explicitly owned handle: the frame bridge holds it and passes it to every
//! render stream call that issues GPU work. There is no global "current drawable".
//!
//! ### 中文
//! 离屏 GPU 上下文抽象。
//!
//! 上下文是显式持有的句柄：帧桥接层持有它，并传给每一个发出 GPU 操作的 render stream 调用。
//! 不存在全局的“当前 drawable”。

use std::sync::Arc;

use crate::engine::error::BridgeError;

/// ### English
/// Framebuffer format requested from the context provider.
///
/// ### 中文
/// 向上下文提供者请求的帧缓冲格式。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelFormat {
    pub alpha_bits: u8,
    pub depth_bits: u8,
    pub stencil_bits: u8,
}

impl Default for PixelFormat {
    fn default() -> Self {
        Self {
            alpha_bits: 8,
            depth_bits: 24,
            stencil_bits: 8,
        }
    }
}

/// ### English
/// Capabilities queried from a freshly created context.
///
/// ### 中文
/// 从新创建的上下文查询到的能力。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContextCapabilities {
    /// ### English
    /// Offscreen render targets are usable (hard prerequisite).
    ///
    /// ### 中文
    /// 是否可以使用离屏渲染目标（硬性前提）。
    pub offscreen_buffers: bool,
    /// ### English
    /// Maximum MSAA sample count (`GL_MAX_SAMPLES`).
    ///
    /// ### 中文
    /// 最大 MSAA 采样数（`GL_MAX_SAMPLES`）。
    pub max_samples: u32,
    pub debug_output: bool,
}

/// ### English
/// One message reported through the context's debug output.
///
/// ### 中文
/// 通过上下文调试输出上报的一条消息。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugMessage {
    pub source: u32,
    pub kind: u32,
    pub id: u32,
    pub severity: u32,
    pub message: String,
}

/// ### English
/// Debug-output callback installed on a context.
///
/// ### 中文
/// 安装在上下文上的调试输出回调。
pub type DebugCallback = Arc<dyn Fn(DebugMessage) + Send + Sync>;

/// ### English
/// Offscreen rendering context bound to the render thread for its lifetime.
///
/// ### 中文
/// 在其生命周期内绑定到渲染线程的离屏渲染上下文。
pub trait OffscreenContext {
    /// ### English
    /// Makes the context current on the calling (render) thread.
    ///
    /// ### 中文
    /// 使上下文在调用方（渲染）线程上成为 current。
    fn make_current(&mut self) -> Result<(), BridgeError>;

    fn capabilities(&self) -> ContextCapabilities;

    /// ### English
    /// Installs a debug-output callback. Returns `false` if the context cannot report debug output.
    ///
    /// ### 中文
    /// 安装调试输出回调；若上下文不支持调试输出则返回 `false`。
    fn install_debug_callback(&mut self, _callback: DebugCallback) -> bool {
        false
    }

    /// ### English
    /// GL entry points, for strategies that render through OpenGL.
    ///
    /// ### 中文
    /// GL 入口，供通过 OpenGL 渲染的策略使用。
    fn gl(&self) -> Option<&glow::Context> {
        None
    }

    /// ### English
    /// Releases the context. Called exactly once, after every stream resource is gone.
    ///
    /// ### 中文
    /// 释放上下文。在所有 stream 资源释放之后恰好调用一次。
    fn destroy(&mut self);
}

/// ### English
/// Platform hook creating offscreen contexts.
///
/// ### 中文
/// 创建离屏上下文的平台钩子。
pub trait GpuContextProvider {
    /// ### English
    /// Whether offscreen buffers are available at all; checked before any context is created.
    ///
    /// ### 中文
    /// 平台是否支持离屏缓冲；在创建任何上下文之前检查。
    fn supports_offscreen(&self) -> bool {
        true
    }

    /// ### English
    /// Creates an offscreen context.
    ///
    /// #### Parameters
    /// - `pixel_format`: Requested framebuffer format.
    /// - `debug`: Request a debug context.
    ///
    /// ### 中文
    /// 创建离屏上下文。
    ///
    /// #### 参数
    /// - `pixel_format`：请求的帧缓冲格式。
    /// - `debug`：是否请求调试上下文。
    fn create_offscreen_context(
        &self,
        pixel_format: PixelFormat,
        debug: bool,
    ) -> Result<Box<dyn OffscreenContext>, BridgeError>;
}
