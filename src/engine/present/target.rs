use dpi::PhysicalSize;

use super::image::PresentationImage;

/// ### English
/// The UI surface frames are presented into. Owned and called only on the presentation thread.
///
/// ### 中文
/// 帧被呈现到的 UI surface。仅由呈现线程持有与调用。
pub trait SurfaceTarget {
    /// ### English
    /// Current surface size in device pixels.
    ///
    /// ### 中文
    /// 当前 surface 尺寸（设备像素）。
    fn current_size(&self) -> PhysicalSize<u32>;

    fn is_visible(&self) -> bool;

    /// ### English
    /// Binds a newly allocated presentation image; called exactly once per reallocation.
    ///
    /// ### 中文
    /// 绑定新分配的呈现图像；每次重新分配恰好调用一次。
    fn set_image(&mut self, image: &PresentationImage);

    /// ### English
    /// Called after new pixels were uploaded into the bound image.
    ///
    /// ### 中文
    /// 新像素上传到已绑定图像之后调用。
    fn image_updated(&mut self, _image: &PresentationImage) {}

    fn request_focus(&mut self);

    /// ### English
    /// Title/metadata passthrough.
    ///
    /// ### 中文
    /// 标题/元数据透传。
    fn set_label(&mut self, _label: &str) {}
}
