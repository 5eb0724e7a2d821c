//! ### English
//! [`OffscreenContext`] over an embedder-created OpenGL context loaded through `glow`.
//!
//! Window-system setup (pbuffer, hidden window, surfaceless display) stays with the embedder; this
//! wrapper only needs the loaded entry points and a way to make the context current.
//!
//! ### 中文
//! 基于宿主创建、并通过 `glow` 加载的 OpenGL 上下文实现的 [`OffscreenContext`]。
//!
//! 窗口系统相关的准备（pbuffer、隐藏窗口、surfaceless display）由宿主负责；
//! 该封装只需要已加载的函数入口以及使上下文 current 的方法。

use glow::HasContext as _;

use crate::engine::error::BridgeError;

use super::context::{ContextCapabilities, DebugCallback, DebugMessage, OffscreenContext};

type MakeCurrentFn = Box<dyn FnMut() -> Result<(), String>>;
type ReleaseFn = Box<dyn FnOnce()>;

/// ### English
/// Offscreen OpenGL context driven through `glow`.
///
/// ### 中文
/// 通过 `glow` 驱动的离屏 OpenGL 上下文。
pub struct GlowOffscreenContext {
    gl: glow::Context,
    make_current: MakeCurrentFn,
    release: Option<ReleaseFn>,
    capabilities: ContextCapabilities,
}

impl GlowOffscreenContext {
    /// ### English
    /// Wraps a loaded context and queries its capabilities.
    ///
    /// #### Parameters
    /// - `gl`: Entry points loaded for the context `make_current` activates.
    /// - `make_current`: Makes the offscreen context current on the calling thread.
    /// - `release`: Destroys the platform context; runs once from [`OffscreenContext::destroy`].
    ///
    /// ### 中文
    /// 封装已加载的上下文并查询其能力。
    ///
    /// #### 参数
    /// - `gl`：为 `make_current` 所激活的上下文加载的函数入口。
    /// - `make_current`：使离屏上下文在调用线程上成为 current。
    /// - `release`：销毁平台上下文；由 [`OffscreenContext::destroy`] 调用一次。
    pub fn new(
        gl: glow::Context,
        mut make_current: impl FnMut() -> Result<(), String> + 'static,
        release: impl FnOnce() + 'static,
    ) -> Result<Self, BridgeError> {
        make_current().map_err(BridgeError::ContextCreation)?;

        let version = gl.version();
        let offscreen_buffers = version.major >= 3
            || gl
                .supported_extensions()
                .contains("GL_ARB_framebuffer_object");
        let max_samples = unsafe { gl.get_parameter_i32(glow::MAX_SAMPLES) };
        let capabilities = ContextCapabilities {
            offscreen_buffers,
            max_samples: u32::try_from(max_samples).unwrap_or(0).max(1),
            debug_output: gl.supports_debug(),
        };
        log::debug!(
            "GL {}.{} context: {capabilities:?}",
            version.major,
            version.minor
        );

        Ok(Self {
            gl,
            make_current: Box::new(make_current),
            release: Some(Box::new(release)),
            capabilities,
        })
    }
}

impl OffscreenContext for GlowOffscreenContext {
    fn make_current(&mut self) -> Result<(), BridgeError> {
        (self.make_current)().map_err(BridgeError::Gl)
    }

    fn capabilities(&self) -> ContextCapabilities {
        self.capabilities
    }

    fn install_debug_callback(&mut self, callback: DebugCallback) -> bool {
        if !self.capabilities.debug_output {
            return false;
        }
        unsafe {
            self.gl.enable(glow::DEBUG_OUTPUT);
            self.gl.debug_message_callback(
                move |source: u32, kind: u32, id: u32, severity: u32, message: &str| {
                    callback(DebugMessage {
                        source,
                        kind,
                        id,
                        severity,
                        message: message.to_owned(),
                    });
                },
            );
        }
        true
    }

    fn gl(&self) -> Option<&glow::Context> {
        Some(&self.gl)
    }

    fn destroy(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}
