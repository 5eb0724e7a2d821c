//! ### English
//! Render-thread side: offscreen context abstraction, render stream strategies and the frame
//! bridge that drives them.
//!
//! ### 中文
//! 渲染线程侧：离屏上下文抽象、render stream 策略，以及驱动它们的帧桥接层。

mod bridge;
mod context;
mod controller;
mod gl_stream;
mod glow_context;
mod pending;
mod software_stream;
mod stream;

pub use bridge::{FrameBridge, FrameBridgeInit};
pub use context::{
    ContextCapabilities, DebugCallback, DebugMessage, GpuContextProvider, OffscreenContext,
    PixelFormat,
};
pub use controller::BridgeController;
pub use gl_stream::GlReadbackStream;
pub use glow_context::GlowOffscreenContext;
pub use software_stream::SoftwareStream;
pub use stream::{RenderDriver, RenderStreamStrategy};
