//! ### English
//! OpenGL read-back render stream.
//!
//! Frames render into an offscreen framebuffer (multisampled when `samples > 1`). `swap` resolves
//! the multisampled color buffer with a blit, reads it back as BGRA into the bound transfer slot
//! and submits the slot. Read-back rows are bottom-up.
//!
//! ### 中文
//! OpenGL 回读 render stream。
//!
//! 帧渲染到离屏帧缓冲（`samples > 1` 时为多重采样）。`swap` 通过 blit 解析多重采样颜色缓冲，
//! 以 BGRA 回读到已绑定传输槽位并提交。回读的行顺序为自底向上。

use dpi::PhysicalSize;
use glow::HasContext as _;

use crate::engine::error::BridgeError;
use crate::engine::frame::{BYTES_PER_PIXEL, RowOrder, SlotWait, StreamHandler, TransferSlot};

use super::context::OffscreenContext;
use super::stream::{RenderStreamStrategy, StreamCore};

const NAME: &str = "gl-readback";

type Framebuffer = <glow::Context as glow::HasContext>::Framebuffer;
type Renderbuffer = <glow::Context as glow::HasContext>::Renderbuffer;

fn missing_gl() -> BridgeError {
    BridgeError::StreamReconfigure {
        strategy: NAME,
        reason: "offscreen context exposes no GL entry points".to_owned(),
    }
}

/// ### English
/// GL objects sized for one frame layout. Fields stay `None` until created.
///
/// ### 中文
/// 按某一帧布局创建的 GL 对象。创建前字段保持为 `None`。
struct GlTargets {
    size: PhysicalSize<u32>,
    samples: u32,
    draw_fbo: Option<Framebuffer>,
    color: Option<Renderbuffer>,
    depth_stencil: Option<Renderbuffer>,
    resolve_fbo: Option<Framebuffer>,
    resolve_color: Option<Renderbuffer>,
}

impl GlTargets {
    fn new(size: PhysicalSize<u32>, samples: u32) -> Self {
        Self {
            size,
            samples,
            draw_fbo: None,
            color: None,
            depth_stencil: None,
            resolve_fbo: None,
            resolve_color: None,
        }
    }

    /// ### English
    /// Creates every object; on error the caller must still call [`Self::delete`].
    ///
    /// ### 中文
    /// 创建全部对象；出错时调用方仍需调用 [`Self::delete`]。
    fn build(&mut self, gl: &glow::Context) -> Result<(), BridgeError> {
        let width = i32::try_from(self.size.width).map_err(|err| BridgeError::Gl(err.to_string()))?;
        let height = i32::try_from(self.size.height).map_err(|err| BridgeError::Gl(err.to_string()))?;
        let samples = i32::try_from(self.samples).map_err(|err| BridgeError::Gl(err.to_string()))?;

        unsafe {
            let draw_fbo = *self
                .draw_fbo
                .insert(gl.create_framebuffer().map_err(BridgeError::Gl)?);
            let color = *self
                .color
                .insert(gl.create_renderbuffer().map_err(BridgeError::Gl)?);
            let depth_stencil = *self
                .depth_stencil
                .insert(gl.create_renderbuffer().map_err(BridgeError::Gl)?);

            let storage = |format: u32| {
                if samples > 1 {
                    gl.renderbuffer_storage_multisample(glow::RENDERBUFFER, samples, format, width, height);
                } else {
                    gl.renderbuffer_storage(glow::RENDERBUFFER, format, width, height);
                }
            };
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(color));
            storage(glow::RGBA8);
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(depth_stencil));
            storage(glow::DEPTH24_STENCIL8);

            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(draw_fbo));
            gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::RENDERBUFFER,
                Some(color),
            );
            gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::DEPTH_STENCIL_ATTACHMENT,
                glow::RENDERBUFFER,
                Some(depth_stencil),
            );
            check_framebuffer(gl, "draw")?;

            if samples > 1 {
                let resolve_fbo = *self
                    .resolve_fbo
                    .insert(gl.create_framebuffer().map_err(BridgeError::Gl)?);
                let resolve_color = *self
                    .resolve_color
                    .insert(gl.create_renderbuffer().map_err(BridgeError::Gl)?);
                gl.bind_renderbuffer(glow::RENDERBUFFER, Some(resolve_color));
                gl.renderbuffer_storage(glow::RENDERBUFFER, glow::RGBA8, width, height);
                gl.bind_framebuffer(glow::FRAMEBUFFER, Some(resolve_fbo));
                gl.framebuffer_renderbuffer(
                    glow::FRAMEBUFFER,
                    glow::COLOR_ATTACHMENT0,
                    glow::RENDERBUFFER,
                    Some(resolve_color),
                );
                check_framebuffer(gl, "resolve")?;
            }

            gl.bind_renderbuffer(glow::RENDERBUFFER, None);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
        Ok(())
    }

    fn delete(self, gl: &glow::Context) {
        unsafe {
            for framebuffer in [self.draw_fbo, self.resolve_fbo].into_iter().flatten() {
                gl.delete_framebuffer(framebuffer);
            }
            for renderbuffer in [self.color, self.depth_stencil, self.resolve_color]
                .into_iter()
                .flatten()
            {
                gl.delete_renderbuffer(renderbuffer);
            }
        }
    }
}

unsafe fn check_framebuffer(gl: &glow::Context, which: &str) -> Result<(), BridgeError> {
    let status = unsafe { gl.check_framebuffer_status(glow::FRAMEBUFFER) };
    if status == glow::FRAMEBUFFER_COMPLETE {
        Ok(())
    } else {
        Err(BridgeError::Gl(format!(
            "{which} framebuffer incomplete (status 0x{status:x})"
        )))
    }
}

/// ### English
/// Render stream reading frames back from an offscreen GL framebuffer.
///
/// ### 中文
/// 从离屏 GL 帧缓冲回读帧的 render stream。
#[derive(Default)]
pub struct GlReadbackStream {
    core: StreamCore,
    samples: u32,
    targets: Option<GlTargets>,
}

impl GlReadbackStream {
    pub fn new() -> Self {
        Self::default()
    }

    fn release_targets(&mut self, gl: &glow::Context) {
        if let Some(targets) = self.targets.take() {
            targets.delete(gl);
        }
    }

    /// ### English
    /// (Re)creates the GL targets if the frame layout changed.
    ///
    /// ### 中文
    /// 若帧布局变化则（重新）创建 GL 目标。
    fn ensure_targets(&mut self, gl: &glow::Context, size: PhysicalSize<u32>) -> Result<(), BridgeError> {
        if self
            .targets
            .as_ref()
            .is_some_and(|targets| targets.size == size && targets.samples == self.samples)
        {
            return Ok(());
        }

        self.release_targets(gl);
        let mut targets = GlTargets::new(size, self.samples);
        if let Err(err) = targets.build(gl) {
            targets.delete(gl);
            return Err(err);
        }
        log::debug!(
            "GL read-back targets rebuilt at {}x{} with {} samples",
            size.width,
            size.height,
            self.samples
        );
        self.targets = Some(targets);
        Ok(())
    }

    fn read_back(
        gl: &glow::Context,
        targets: &GlTargets,
        slot: &mut TransferSlot,
    ) -> Result<(), BridgeError> {
        if slot.size() != targets.size {
            return Err(BridgeError::Gl(format!(
                "bound slot {:?} does not match framebuffer {:?}",
                slot.size(),
                targets.size
            )));
        }
        let (width, height) = (targets.size.width as i32, targets.size.height as i32);
        let row_length = (slot.stride() / BYTES_PER_PIXEL) as i32;

        unsafe {
            let read_fbo = match targets.resolve_fbo {
                Some(resolve_fbo) => {
                    gl.bind_framebuffer(glow::READ_FRAMEBUFFER, targets.draw_fbo);
                    gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, Some(resolve_fbo));
                    gl.blit_framebuffer(
                        0,
                        0,
                        width,
                        height,
                        0,
                        0,
                        width,
                        height,
                        glow::COLOR_BUFFER_BIT,
                        glow::NEAREST,
                    );
                    Some(resolve_fbo)
                }
                None => targets.draw_fbo,
            };

            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, read_fbo);
            gl.pixel_store_i32(glow::PACK_ALIGNMENT, BYTES_PER_PIXEL as i32);
            gl.pixel_store_i32(glow::PACK_ROW_LENGTH, row_length);
            gl.read_pixels(
                0,
                0,
                width,
                height,
                glow::BGRA,
                glow::UNSIGNED_BYTE,
                glow::PixelPackData::Slice(Some(slot.pixels_mut())),
            );
            gl.pixel_store_i32(glow::PACK_ROW_LENGTH, 0);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);

            let error = gl.get_error();
            if error != glow::NO_ERROR {
                return Err(BridgeError::Gl(format!("read-back failed (0x{error:x})")));
            }
        }
        Ok(())
    }
}

impl RenderStreamStrategy for GlReadbackStream {
    fn name(&self) -> &'static str {
        NAME
    }

    fn reconfigure(
        &mut self,
        context: &mut dyn OffscreenContext,
        handler: StreamHandler,
        samples: u32,
        transfer_depth: usize,
    ) -> Result<(), BridgeError> {
        let gl = context.gl().ok_or_else(missing_gl)?;
        self.release_targets(gl);
        self.samples = samples;
        self.core.rebuild(handler, transfer_depth, BYTES_PER_PIXEL, RowOrder::BottomUp);
        Ok(())
    }

    fn bind(&mut self, context: &mut dyn OffscreenContext, wait: SlotWait) -> Result<(), BridgeError> {
        context.make_current()?;
        let gl = context.gl().ok_or_else(missing_gl)?;
        let size = self.core.channel_mut(NAME)?.acquire(wait)?.size();
        if let Err(err) = self.ensure_targets(gl, size) {
            self.core.channel_mut(NAME)?.abandon();
            return Err(err);
        }

        if let Some(targets) = &self.targets {
            unsafe {
                gl.bind_framebuffer(glow::FRAMEBUFFER, targets.draw_fbo);
                gl.viewport(0, 0, size.width as i32, size.height as i32);
            }
        }
        Ok(())
    }

    fn bound_slot_mut(&mut self) -> Option<&mut TransferSlot> {
        self.core.bound_mut()
    }

    fn swap(&mut self, context: &mut dyn OffscreenContext) -> Result<u64, BridgeError> {
        context.make_current()?;
        let gl = context.gl().ok_or_else(missing_gl)?;
        let channel = self.core.channel_mut(NAME)?;
        let (Some(targets), Some(slot)) = (self.targets.as_ref(), channel.bound_mut()) else {
            return Err(BridgeError::NotBound);
        };

        if let Err(err) = Self::read_back(gl, targets, slot) {
            channel.abandon();
            return Err(err);
        }
        channel.submit()
    }

    fn destroy(&mut self, context: &mut dyn OffscreenContext) {
        if let Some(gl) = context.gl() {
            self.release_targets(gl);
        }
        self.core.clear();
    }
}
