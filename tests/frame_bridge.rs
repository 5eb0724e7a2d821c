use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use dpi::PhysicalSize;
use parking_lot::Mutex;

use fx_frame_bridge::engine::frame::{SlotWait, StreamHandler};
use fx_frame_bridge::engine::rendering::{ContextCapabilities, PixelFormat, SoftwareStream};
use fx_frame_bridge::{
    BridgeError, FrameBridge, FrameBridgeConfig, FrameBridgeInit, GpuContextProvider, OffscreenContext,
    PresentOutcome, PresentationImage, Presenter, PresenterConfig, RenderStreamStrategy, SurfaceLink,
    SurfaceTarget, TransferSlot,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct MockContext {
    capabilities: ContextCapabilities,
    destroyed: Arc<AtomicUsize>,
}

impl OffscreenContext for MockContext {
    fn make_current(&mut self) -> Result<(), BridgeError> {
        Ok(())
    }

    fn capabilities(&self) -> ContextCapabilities {
        self.capabilities
    }

    fn destroy(&mut self) {
        self.destroyed.fetch_add(1, Ordering::SeqCst);
    }
}

struct MockProvider {
    offscreen: bool,
    offscreen_buffers: bool,
    destroyed: Arc<AtomicUsize>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            offscreen: true,
            offscreen_buffers: true,
            destroyed: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MockProvider {
    fn destroyed(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }
}

impl GpuContextProvider for MockProvider {
    fn supports_offscreen(&self) -> bool {
        self.offscreen
    }

    fn create_offscreen_context(
        &self,
        _pixel_format: PixelFormat,
        _debug: bool,
    ) -> Result<Box<dyn OffscreenContext>, BridgeError> {
        Ok(Box::new(MockContext {
            capabilities: ContextCapabilities {
                offscreen_buffers: self.offscreen_buffers,
                max_samples: 4,
                debug_output: false,
            },
            destroyed: Arc::clone(&self.destroyed),
        }))
    }
}

struct Surface {
    size: PhysicalSize<u32>,
    visible: bool,
    images_bound: usize,
    updates: usize,
    label: String,
}

impl Surface {
    fn new(width: u32, height: u32) -> Self {
        Self {
            size: PhysicalSize::new(width, height),
            visible: true,
            images_bound: 0,
            updates: 0,
            label: String::new(),
        }
    }
}

impl SurfaceTarget for Surface {
    fn current_size(&self) -> PhysicalSize<u32> {
        self.size
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_image(&mut self, _image: &PresentationImage) {
        self.images_bound += 1;
    }

    fn image_updated(&mut self, _image: &PresentationImage) {
        self.updates += 1;
    }

    fn request_focus(&mut self) {}

    fn set_label(&mut self, label: &str) {
        self.label = label.to_owned();
    }
}

/// Software stream that records every (samples, depth) it is configured with.
struct RecordingStream {
    inner: SoftwareStream,
    configured: Arc<Mutex<Vec<(u32, usize)>>>,
}

impl RenderStreamStrategy for RecordingStream {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn reconfigure(
        &mut self,
        context: &mut dyn OffscreenContext,
        handler: StreamHandler,
        samples: u32,
        transfer_depth: usize,
    ) -> Result<(), BridgeError> {
        self.configured.lock().push((samples, transfer_depth));
        self.inner.reconfigure(context, handler, samples, transfer_depth)
    }

    fn bind(&mut self, context: &mut dyn OffscreenContext, wait: SlotWait) -> Result<(), BridgeError> {
        self.inner.bind(context, wait)
    }

    fn bound_slot_mut(&mut self) -> Option<&mut TransferSlot> {
        self.inner.bound_slot_mut()
    }

    fn swap(&mut self, context: &mut dyn OffscreenContext) -> Result<u64, BridgeError> {
        self.inner.swap(context)
    }

    fn destroy(&mut self, context: &mut dyn OffscreenContext) {
        self.inner.destroy(context);
    }
}

struct FailingStream;

impl RenderStreamStrategy for FailingStream {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn reconfigure(
        &mut self,
        _context: &mut dyn OffscreenContext,
        _handler: StreamHandler,
        _samples: u32,
        _transfer_depth: usize,
    ) -> Result<(), BridgeError> {
        Err(BridgeError::StreamReconfigure {
            strategy: "failing",
            reason: "framebuffer incomplete".to_owned(),
        })
    }

    fn bind(&mut self, _context: &mut dyn OffscreenContext, _wait: SlotWait) -> Result<(), BridgeError> {
        Err(BridgeError::NotBound)
    }

    fn bound_slot_mut(&mut self) -> Option<&mut TransferSlot> {
        None
    }

    fn swap(&mut self, _context: &mut dyn OffscreenContext) -> Result<u64, BridgeError> {
        Err(BridgeError::NotBound)
    }

    fn destroy(&mut self, _context: &mut dyn OffscreenContext) {}
}

fn cpu_presenter(width: u32, height: u32) -> (Presenter<Surface>, SurfaceLink) {
    Presenter::new(Surface::new(width, height), PresenterConfig::default())
}

fn bridge(
    provider: &MockProvider,
    link: SurfaceLink,
    config: FrameBridgeConfig,
    strategy: Option<Box<dyn RenderStreamStrategy>>,
) -> FrameBridge {
    FrameBridge::initialize(FrameBridgeInit {
        provider,
        link,
        config,
        strategy,
    })
    .unwrap()
}

fn fill(value: u8) -> impl FnMut(&mut TransferSlot) {
    move |slot: &mut TransferSlot| slot.pixels_mut().fill(value)
}

#[test]
fn default_strategy_without_gl_is_software() {
    init_logging();
    let provider = MockProvider::default();
    let (_presenter, link) = cpu_presenter(4, 4);
    let bridge = bridge(&provider, link, FrameBridgeConfig::default(), None);
    assert_eq!(bridge.strategy_name(), Some("software"));
    assert_eq!(bridge.max_samples(), 4);
    assert_eq!(bridge.sample_count(), 1);
    assert_eq!(bridge.transfer_depth(), 3);
}

#[test]
fn resize_reallocates_presentation_image_once() {
    init_logging();
    let provider = MockProvider::default();
    let (mut presenter, link) = cpu_presenter(800, 600);
    let mut bridge = bridge(&provider, link, FrameBridgeConfig::default(), None);

    let mut driver = fill(0x40);
    bridge.render_frame(&mut driver).unwrap();
    assert_eq!(presenter.pump(), 1);
    assert_eq!(presenter.image().map(PresentationImage::size), Some(PhysicalSize::new(800, 600)));

    presenter.target_mut().size = PhysicalSize::new(640, 480);
    assert!(presenter.sync_surface());

    bridge.render_frame(&mut driver).unwrap();
    bridge.render_frame(&mut driver).unwrap();
    assert_eq!(presenter.pump(), 2);

    assert_eq!(presenter.reallocations(), 1);
    assert_eq!(presenter.target().images_bound, 2);
    assert_eq!(presenter.target().updates, 3);
    let image = presenter.image().unwrap();
    assert_eq!(image.size(), PhysicalSize::new(640, 480));
    assert_eq!(image.pixel(639, 479), Some([0x40; 4]));
}

#[test]
fn software_frames_keep_top_row_on_top() {
    init_logging();
    let provider = MockProvider::default();
    let (mut presenter, link) = cpu_presenter(2, 3);
    let mut bridge = bridge(&provider, link, FrameBridgeConfig::default(), None);

    let mut driver = |slot: &mut TransferSlot| {
        let stride = slot.stride();
        for (y, row) in slot.pixels_mut().chunks_exact_mut(stride).enumerate() {
            row.fill(y as u8 + 1);
        }
    };
    bridge.render_frame(&mut driver).unwrap();
    assert_eq!(presenter.pump(), 1);

    let image = presenter.image().unwrap();
    assert_eq!(image.pixel(0, 0), Some([1; 4]));
    assert_eq!(image.pixel(1, 2), Some([3; 4]));
}

#[test]
fn hidden_surface_discards_frames_without_upload() {
    init_logging();
    let provider = MockProvider::default();
    let (mut presenter, link) = cpu_presenter(8, 8);
    let mut bridge = bridge(&provider, link, FrameBridgeConfig::default(), None);
    assert!(bridge.is_surface_visible());

    presenter.target_mut().visible = false;
    presenter.sync_surface();
    assert!(!bridge.is_surface_visible());

    bridge.render_frame(&mut fill(1)).unwrap();
    assert_eq!(bridge.in_flight(), 0);
    assert_eq!(presenter.present_next(), None);
    assert!(presenter.image().is_none());

    presenter.target_mut().visible = true;
    presenter.sync_surface();
    let seq = bridge.render_frame(&mut fill(2)).unwrap();
    assert_eq!(
        presenter.present_next(),
        Some(PresentOutcome::Presented {
            frame_seq: seq,
            reallocated: true
        })
    );
}

#[test]
fn lowering_transfer_depth_limits_outstanding_frames() {
    init_logging();
    let provider = MockProvider::default();
    let (mut presenter, link) = cpu_presenter(16, 16);
    let mut bridge = bridge(&provider, link, FrameBridgeConfig::default(), None);
    let snapshot = bridge.controller().snapshot_request();

    bridge.render_frame(&mut fill(1)).unwrap();
    assert!(bridge.set_transfer_depth(1));
    assert!(!bridge.set_transfer_depth(1));

    // The queued frame still holds the only slot.
    assert_eq!(bridge.try_begin_frame(), Err(BridgeError::WouldBlock));
    assert_eq!(bridge.transfer_depth(), 1);
    assert_eq!(bridge.in_flight(), 1);
    assert_eq!(bridge.controller().snapshot_request(), snapshot + 1);
    assert_eq!(
        bridge.begin_frame_timeout(Duration::from_millis(10)),
        Err(BridgeError::Timeout)
    );

    assert_eq!(presenter.pump(), 1);
    assert_eq!(bridge.in_flight(), 0);
    assert_eq!(bridge.try_begin_frame(), Ok(()));
    assert_eq!(bridge.in_flight(), 1);
    bridge.end_frame().unwrap();
    assert_eq!(bridge.try_begin_frame(), Err(BridgeError::WouldBlock));
    assert!(bridge.in_flight() <= 1);

    assert_eq!(presenter.pump(), 1);
    assert_eq!(bridge.try_begin_frame(), Ok(()));
}

#[test]
fn sample_change_keeps_outstanding_frames_counted() {
    init_logging();
    let provider = MockProvider::default();
    let (mut presenter, link) = cpu_presenter(16, 16);
    let mut bridge = bridge(&provider, link, FrameBridgeConfig::default(), None);
    assert_eq!(bridge.transfer_depth(), 3);

    for value in 0..3 {
        bridge.render_frame(&mut fill(value)).unwrap();
    }
    assert!(bridge.set_sample_count(2));

    assert_eq!(bridge.try_begin_frame(), Err(BridgeError::WouldBlock));
    assert_eq!(bridge.sample_count(), 2);
    assert_eq!(bridge.in_flight(), 3);

    assert_eq!(presenter.pump(), 3);
    assert_eq!(bridge.in_flight(), 0);
    for value in 0..3 {
        assert_eq!(bridge.try_begin_frame(), Ok(()));
        bridge.frame_mut().unwrap().pixels_mut().fill(value);
        bridge.end_frame().unwrap();
    }
    assert_eq!(bridge.try_begin_frame(), Err(BridgeError::WouldBlock));
    assert_eq!(bridge.in_flight(), 3);
}

#[test]
fn strategy_swap_keeps_outstanding_frames_counted() {
    init_logging();
    let provider = MockProvider::default();
    let (mut presenter, link) = cpu_presenter(8, 8);
    let config = FrameBridgeConfig {
        transfer_depth: 2,
        ..FrameBridgeConfig::default()
    };
    let mut bridge = bridge(&provider, link, config, None);

    bridge.render_frame(&mut fill(1)).unwrap();
    bridge.render_frame(&mut fill(2)).unwrap();
    assert!(bridge.set_render_stream_strategy(Box::new(SoftwareStream::new())));

    assert_eq!(bridge.try_begin_frame(), Err(BridgeError::WouldBlock));
    assert_eq!(bridge.in_flight(), 2);
    assert_eq!(presenter.pump(), 2);
    assert_eq!(bridge.try_begin_frame(), Ok(()));
}

#[test]
fn snapshot_requests_are_consumed_once() {
    init_logging();
    let provider = MockProvider::default();
    let (_presenter, link) = cpu_presenter(4, 4);
    let mut bridge = bridge(&provider, link, FrameBridgeConfig::default(), None);
    assert!(!bridge.snapshot_pending());

    assert!(bridge.set_sample_count(2));
    assert!(!bridge.snapshot_pending());
    bridge.begin_frame().unwrap();
    bridge.end_frame().unwrap();
    assert!(bridge.snapshot_pending());
    assert!(!bridge.snapshot_pending());

    bridge.request_snapshot_refresh();
    assert!(bridge.snapshot_pending());
    assert!(!bridge.snapshot_pending());
}

#[test]
fn render_thread_blocks_on_slow_presenter() {
    init_logging();
    const FRAMES: usize = 20;
    let provider = MockProvider::default();
    let (mut presenter, link) = cpu_presenter(32, 32);
    let config = FrameBridgeConfig {
        transfer_depth: 2,
        ..FrameBridgeConfig::default()
    };
    let mut bridge = bridge(&provider, link, config, None);

    let consumer = thread::spawn(move || {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut seqs = Vec::new();
        while seqs.len() < FRAMES && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
            if let Some(PresentOutcome::Presented { frame_seq, .. }) =
                presenter.wait_and_present(Duration::from_millis(50))
            {
                seqs.push(frame_seq);
            }
        }
        seqs
    });

    let mut max_in_flight = 0;
    for value in 0..FRAMES {
        bridge.begin_frame().unwrap();
        max_in_flight = max_in_flight.max(bridge.in_flight());
        bridge.frame_mut().unwrap().pixels_mut().fill(value as u8);
        bridge.end_frame().unwrap();
    }

    let seqs = consumer.join().unwrap();
    assert_eq!(seqs.len(), FRAMES);
    assert!(seqs.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(max_in_flight <= 2);
}

#[test]
fn reconfigurations_apply_in_enqueue_order() {
    init_logging();
    let provider = MockProvider::default();
    let (_presenter, link) = cpu_presenter(4, 4);
    let configured = Arc::new(Mutex::new(Vec::new()));
    let strategy = RecordingStream {
        inner: SoftwareStream::new(),
        configured: Arc::clone(&configured),
    };
    let mut bridge = bridge(&provider, link, FrameBridgeConfig::default(), Some(Box::new(strategy)));

    let controller = bridge.controller();
    let requester = thread::spawn(move || {
        assert!(controller.set_sample_count(64));
        assert!(controller.set_transfer_depth(2));
        assert!(controller.set_sample_count(2));
        controller.pending()
    });
    assert_eq!(requester.join().unwrap(), 3);
    assert_eq!(bridge.sample_count(), 1);

    bridge.begin_frame().unwrap();
    assert_eq!(bridge.controller().pending(), 0);
    assert_eq!(bridge.sample_count(), 2);
    assert_eq!(bridge.transfer_depth(), 2);
    assert_eq!(*configured.lock(), vec![(1, 3), (4, 3), (4, 2), (2, 2)]);
}

#[test]
fn failed_strategy_swap_leaves_no_active_stream() {
    init_logging();
    let provider = MockProvider::default();
    let (_presenter, link) = cpu_presenter(4, 4);
    let mut bridge = bridge(&provider, link, FrameBridgeConfig::default(), None);

    assert!(bridge.set_render_stream_strategy(Box::new(FailingStream)));
    assert!(matches!(
        bridge.begin_frame(),
        Err(BridgeError::StreamReconfigure { strategy: "failing", .. })
    ));
    assert_eq!(bridge.strategy_name(), None);
    assert_eq!(bridge.begin_frame(), Err(BridgeError::NoActiveStream));
    assert_eq!(bridge.end_frame(), Err(BridgeError::NoActiveStream));

    assert!(bridge.set_render_stream_strategy(Box::new(SoftwareStream::new())));
    assert_eq!(bridge.begin_frame(), Ok(()));
    assert_eq!(bridge.strategy_name(), Some("software"));
}

#[test]
fn dispose_releases_context_once() {
    init_logging();
    let provider = MockProvider::default();
    let (mut presenter, link) = cpu_presenter(4, 4);
    let mut bridge = bridge(&provider, link, FrameBridgeConfig::default(), None);
    let controller = bridge.controller();

    bridge.render_frame(&mut fill(9)).unwrap();
    bridge.begin_frame().unwrap();

    assert_eq!(bridge.dispose(), Ok(()));
    assert_eq!(bridge.dispose(), Err(BridgeError::AlreadyDisposed));
    assert!(bridge.is_disposed());
    assert_eq!(provider.destroyed(), 1);

    assert_eq!(bridge.begin_frame(), Err(BridgeError::Disposed));
    assert!(!controller.set_sample_count(4));
    assert_eq!(presenter.present_next(), None);

    drop(bridge);
    assert_eq!(provider.destroyed(), 1);
}

#[test]
fn drop_disposes_bridge() {
    init_logging();
    let provider = MockProvider::default();
    let (_presenter, link) = cpu_presenter(4, 4);
    drop(bridge(&provider, link, FrameBridgeConfig::default(), None));
    assert_eq!(provider.destroyed(), 1);
}

#[test]
fn missing_offscreen_support_is_fatal() {
    init_logging();
    let provider = MockProvider {
        offscreen: false,
        ..MockProvider::default()
    };
    let (_presenter, link) = cpu_presenter(4, 4);
    let result = FrameBridge::initialize(FrameBridgeInit {
        provider: &provider,
        link,
        config: FrameBridgeConfig::default(),
        strategy: None,
    });
    assert_eq!(result.err(), Some(BridgeError::OffscreenUnsupported));

    let provider = MockProvider {
        offscreen_buffers: false,
        ..MockProvider::default()
    };
    let (_presenter, link) = cpu_presenter(4, 4);
    let result = FrameBridge::initialize(FrameBridgeInit {
        provider: &provider,
        link,
        config: FrameBridgeConfig::default(),
        strategy: None,
    });
    assert_eq!(result.err(), Some(BridgeError::OffscreenUnsupported));
    assert_eq!(provider.destroyed(), 1);
}

#[test]
fn presentation_label_runs_on_presenter() {
    init_logging();
    let provider = MockProvider::default();
    let (mut presenter, link) = cpu_presenter(4, 4);
    let bridge = bridge(&provider, link, FrameBridgeConfig::default(), None);

    assert!(bridge.set_presentation_label("minimap"));
    assert!(presenter.target().label.is_empty());
    presenter.pump();
    assert_eq!(presenter.target().label, "minimap");
}
