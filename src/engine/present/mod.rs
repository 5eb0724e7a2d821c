//! ### English
//! Presentation side: the surface target contract, the presentation image and the presenter that
//! drains the pixel transfer channel on the presentation thread.
//!
//! ### 中文
//! 呈现侧：surface target 约定、呈现图像，以及在呈现线程上消费像素传输通道的呈现器。
mod image;
mod link;
mod presenter;
mod target;

pub use image::PresentationImage;
pub use link::{FocusRequester, PresentationTask, SurfaceLink};
pub use presenter::{PresentOutcome, Presenter};
pub use target::SurfaceTarget;
