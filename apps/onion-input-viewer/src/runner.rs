//! Viewer runner and event loop.

use std::thread;
use std::time::{Duration, Instant};

use onion_input::InputCoordinator;
use onion_platform::{create_window, PlatformConfig, PlatformError, WinitInputSource};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::app::Bindings;

/// Viewer configuration.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Window configuration.
    pub platform: PlatformConfig,
    /// Target frames per second (None for unlimited).
    pub target_fps: Option<u32>,
    /// Start with the mouse captured.
    pub capture: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            platform: PlatformConfig::new("Onion Input Viewer").with_size(1280, 720),
            target_fps: Some(60),
            capture: false,
        }
    }
}

impl ViewerConfig {
    /// Parse configuration from command line arguments.
    pub fn from_args() -> Self {
        let mut config = Self::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1).and_then(|v| v.parse::<u32>().ok());
            match (args[i].as_str(), value) {
                ("--width", Some(width)) => {
                    config.platform.width = width;
                    i += 1;
                }
                ("--height", Some(height)) => {
                    config.platform.height = height;
                    i += 1;
                }
                ("--fps", Some(fps)) => {
                    config.target_fps = (fps > 0).then_some(fps);
                    i += 1;
                }
                ("--capture", _) => config.capture = true,
                (arg, _) => eprintln!("Ignoring argument: {arg}"),
            }
            i += 1;
        }

        config
    }
}

/// Run the viewer until its window is closed.
pub fn run(config: ViewerConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("{} starting...", config.platform.title);

    let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut runner = ViewerRunner {
        config,
        state: None,
    };

    event_loop
        .run_app(&mut runner)
        .map_err(|e| PlatformError::EventLoop(e.to_string()))?;

    Ok(())
}

struct ViewerRunner {
    config: ViewerConfig,
    state: Option<ViewerState>,
}

struct ViewerState {
    input: InputCoordinator<WinitInputSource>,
    bindings: Bindings,
    target_frame_time: Option<Duration>,
}

impl ApplicationHandler for ViewerRunner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.create_state(event_loop) {
            Ok(state) => {
                self.state = Some(state);
                info!("Viewer ready");
            }
            Err(e) => {
                error!("Failed to initialize viewer: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(state) = &self.state else {
            return;
        };

        if state.input.platform().process_window_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested");
                if let Some(state) = self.state.take() {
                    state.finish();
                }
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = state.frame() {
                    error!("Frame error: {e}");
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(state) = &self.state {
            state.input.platform().process_device_event(&event);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self
            .state
            .as_ref()
            .and_then(|state| state.input.platform().window())
        {
            window.request_redraw();
        }
    }
}

impl ViewerRunner {
    fn create_state(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<ViewerState> {
        let window = create_window(event_loop, &self.config.platform)?;
        let input = InputCoordinator::init(WinitInputSource::new(window))?;
        input.set_capture_enabled(self.config.capture);

        let bindings = Bindings::register(&input);

        let target_frame_time = self
            .config
            .target_fps
            .map(|fps| Duration::from_nanos(1_000_000_000 / u64::from(fps)));

        Ok(ViewerState {
            input,
            bindings,
            target_frame_time,
        })
    }
}

impl ViewerState {
    fn frame(&self) -> anyhow::Result<()> {
        let frame_start = Instant::now();

        self.input.poll()?;
        let snapshot = self.input.get_snapshot()?;
        self.bindings.process(&self.input, &snapshot)?;

        if let Some(target) = self.target_frame_time {
            let elapsed = frame_start.elapsed();
            if elapsed < target {
                thread::sleep(target - elapsed);
            }
        }

        Ok(())
    }

    fn finish(self) {
        self.input.set_capture_enabled(false);
        match self.input.get_snapshot() {
            Ok(snapshot) => info!("Total frames: {}", snapshot.frame()),
            Err(_) => info!("No frames polled"),
        }
    }
}
