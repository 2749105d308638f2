use super::{
    DecodingBackend, HostError, InputAction, NativeMedia, NativeSceneSource, SharedStatus,
    TapGate, TitleErrors, TitleLoading, TitleOverlay, ViewerConfig,
};
use crate::app::{Collaborators, Controller, HostEvent, LoopControl, Startup};
use crate::capability::{Capabilities, StaticProbe, DEBUG_PARAM};
use crate::ui::StatusBridge;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Window, WindowAttributes, WindowId},
};

const WINDOW_TITLE: &str = "Photosphere Viewer";

/// Runs the viewer until the window closes.
pub fn run(config: ViewerConfig) -> Result<(), HostError> {
    let event_loop = EventLoop::<HostEvent>::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let proxy = event_loop.create_proxy();
    let mut app = ViewerApp::new(config, proxy);
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct ViewerApp {
    config: ViewerConfig,
    proxy: EventLoopProxy<HostEvent>,
    window: Option<Arc<Window>>,
    controller: Option<Controller>,
    status: SharedStatus,
    gate: TapGate,
    origin: Instant,
    title: String,
    started: bool,
}

impl ViewerApp {
    fn new(config: ViewerConfig, proxy: EventLoopProxy<HostEvent>) -> Self {
        Self {
            config,
            proxy,
            window: None,
            controller: None,
            status: SharedStatus::default(),
            gate: TapGate::new(),
            origin: Instant::now(),
            title: String::new(),
            started: false,
        }
    }

    fn probe(&self, graphics: bool) -> StaticProbe {
        let mut probe = StaticProbe {
            graphics,
            quirky_mobile: cfg!(target_os = "ios"),
            mobile: cfg!(any(target_os = "ios", target_os = "android")),
            ..StaticProbe::default()
        };
        if self.config.debug {
            probe = probe.with_param(DEBUG_PARAM, "1");
        }
        probe
    }

    fn collaborators(&self) -> Collaborators {
        Collaborators {
            scene_source: Box::new(NativeSceneSource::new(
                self.config.scene.clone(),
                self.proxy.clone(),
            )),
            renderer: Box::new(DecodingBackend::new(self.proxy.clone())),
            media: Box::new(NativeMedia::new(self.proxy.clone())),
            status: StatusBridge::new(
                Box::new(TitleLoading(self.status.clone())),
                Box::new(TitleErrors(self.status.clone())),
            ),
            gestures: Box::new(self.gate.clone()),
            overlay: Box::new(TitleOverlay::new(self.status.clone(), self.origin)),
        }
    }

    fn deliver(&mut self, event_loop: &ActiveEventLoop, event: HostEvent) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        if controller.handle(event) == LoopControl::Stop {
            log::info!("Render loop stopped, shutting down...");
            event_loop.exit();
        }
        self.refresh_title();
    }

    fn refresh_title(&mut self) {
        let title = self.status.borrow().compose(WINDOW_TITLE);
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }

    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

impl ApplicationHandler<HostEvent> for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        log::info!("Creating window...");
        let window_attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(1280u32, 720u32))
            .with_resizable(true);
        self.window = match event_loop.create_window(window_attrs) {
            Ok(window) => {
                log::info!(
                    "Window created: {}x{}",
                    window.inner_size().width,
                    window.inner_size().height
                );
                Some(Arc::new(window))
            }
            Err(err) => {
                log::error!("Failed to create window: {}", err);
                None
            }
        };

        let caps = Capabilities::resolve(&self.probe(self.window.is_some()));
        let mut controller = Controller::new(caps, self.collaborators());
        let startup = controller.start();
        self.controller = Some(controller);
        self.refresh_title();

        if startup == Startup::Aborted {
            log::error!("{}", self.status.borrow().compose(WINDOW_TITLE));
            event_loop.exit();
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: HostEvent) {
        self.deliver(event_loop, event);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, shutting down...");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::debug!("Window resized to {}x{}", new_size.width, new_size.height);
            }
            WindowEvent::RedrawRequested => {
                let now = self.now_ms();
                self.deliver(event_loop, HostEvent::Frame(now));
            }
            other => match InputAction::classify(&other) {
                Some(InputAction::Quit) => {
                    log::info!("Escape pressed, shutting down...");
                    event_loop.exit();
                }
                Some(InputAction::Tap) if self.gate.is_armed() => {
                    self.deliver(event_loop, HostEvent::Tap);
                }
                _ => {}
            },
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let running = self
            .controller
            .as_ref()
            .is_some_and(|controller| controller.loop_handle().is_running());
        if running {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}
