/// ### English
/// `fx_frame_bridge` crate root.
/// Bridges an offscreen render thread to a retained-mode UI surface: frames flow render thread to
/// presentation thread, input flows UI thread to a polling consumer.
///
/// ### 中文
/// `fx_frame_bridge` 的 crate 根。
/// 连接离屏渲染线程与保留模式 UI surface：帧从渲染线程流向呈现线程，
/// 输入从 UI 线程流向轮询消费者。
pub mod engine;

pub use engine::config::{FrameBridgeConfig, InputConfig, PresenterConfig};
pub use engine::error::{BridgeError, InputError};
pub use engine::frame::{RowOrder, SlotLease, SlotWait, TransferSlot};
pub use engine::input::{InputCapture, InputSink, PollInput, PollInputSource};
pub use engine::present::{PresentOutcome, PresentationImage, Presenter, SurfaceLink, SurfaceTarget};
pub use engine::rendering::{
    BridgeController, FrameBridge, FrameBridgeInit, GpuContextProvider, OffscreenContext,
    RenderDriver, RenderStreamStrategy,
};
