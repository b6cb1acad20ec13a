use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use tetra_orbit::config::Config;
use tetra_orbit::error::DemoError;
use tetra_orbit::input::{InputEvent, PointerInput};
use tetra_orbit::session::Session;
use tetra_orbit::time::Time;

const TITLE: &str = "tetra-orbit";
const TITLE_INTERVAL: Duration = Duration::from_millis(250);

pub struct App {
    config: Config,
    size: PhysicalSize<u32>,
    window: Option<Arc<Window>>,
    session: Option<Session<Time>>,
    input: PointerInput,
    last_title: Instant,
    error: Option<DemoError>,
}

impl App {
    pub fn new(config: Config, width: u32, height: u32) -> Self {
        Self {
            config,
            size: PhysicalSize::new(width, height),
            window: None,
            session: None,
            input: PointerInput::new(width, height),
            last_title: Instant::now(),
            error: None,
        }
    }

    /// Error that stopped the event loop, if any.
    pub fn finish(self) -> Result<(), DemoError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), DemoError> {
        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(self.size);
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let mut session = Session::new(self.config.clone(), Time::new())?;
        let size = window.inner_size();
        session.resize(size.width, size.height);
        self.input.sync_window_size(size.width, size.height);

        window.request_redraw();
        self.window = Some(window);
        self.session = Some(session);
        Ok(())
    }

    fn update_title(&mut self) {
        if self.last_title.elapsed() < TITLE_INTERVAL {
            return;
        }
        let (Some(window), Some(session)) = (&self.window, &self.session) else {
            return;
        };
        self.last_title = Instant::now();

        let phases: Vec<String> = session
            .registry()
            .iter()
            .map(|object| format!("{} {}", object.id().index(), object.phase().as_str()))
            .collect();
        let paused = if session.clock().is_paused() { " | paused" } else { "" };
        window.set_title(&format!(
            "{TITLE} | {:.0} fps | {}{paused}",
            session.clock().fps(),
            phases.join(", ")
        ));
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.start(event_loop) {
                log::error!("failed to start: {err}");
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::CloseRequested = event {
            event_loop.exit();
            return;
        }

        let Some(session) = &mut self.session else {
            return;
        };

        match self.input.handle_event(&event) {
            Some(InputEvent::PointerMoved(position)) => {
                let outcome = session.pointer_moved(position);
                for trigger in &outcome.triggers {
                    log::info!("{:?} {}", trigger.kind, trigger.id);
                }
            }
            Some(InputEvent::Resized { width, height }) => session.resize(width, height),
            Some(InputEvent::TogglePause) => session.clock_mut().toggle_pause(),
            None => {}
        }

        if let WindowEvent::RedrawRequested = event {
            session.tick();
            self.update_title();
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}
