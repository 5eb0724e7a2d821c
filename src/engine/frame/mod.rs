//! ### English
//! Pixel transfer channel between the render thread (producer) and the presentation thread
//! (consumer): recycled transfer slots, the backpressure pool and shared surface metadata.
//!
//! ### 中文
//! 渲染线程（生产者）与呈现线程（消费者）之间的像素传输通道：
//! 可复用传输槽位、背压池以及共享 surface 元数据。
mod channel;
mod slot;
mod slot_pool;
mod surface_state;

pub use channel::{SlotWait, StreamHandler, TransferChannel};
pub use slot::{RowOrder, SlotLease, TransferSlot};
pub use surface_state::SharedSurfaceState;

/// ### English
/// Bytes per pixel of the transfer format (BGRA premultiplied).
///
/// ### 中文
/// 传输格式每像素字节数（BGRA 预乘）。
pub const BYTES_PER_PIXEL: usize = 4;
