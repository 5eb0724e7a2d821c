/// ### English
/// Engine modules (frame transfer, rendering, presentation, input).
///
/// ### 中文
/// 引擎模块（帧传输、渲染、呈现、输入）。
pub mod config;
pub mod error;
pub mod frame;
pub mod input;
pub mod present;
pub mod rendering;
