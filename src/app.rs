// =============================================================================
// APPLICATION - window, event loop and the lesson's Vulkan session
// =============================================================================

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowAttributes},
};

use crate::backend::{vulkan, InstanceRequest, Session, SessionOptions, VulkanBackend};
use crate::config::{Config, Lesson};
use crate::error::{SetupError, SetupResult};

/// Window plus whatever the lesson set up on top of it.
///
/// The session is released before the window, see Drop.
pub struct App {
    config: Config,
    session: Option<Session<VulkanBackend>>,
    window: Option<Window>,
    /// First fatal setup error, reported once the event loop returns
    failure: Option<SetupError>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session: None,
            window: None,
            failure: None,
        }
    }

    /// Tear everything down and report how setup went.
    pub fn finish(mut self) -> SetupResult<()> {
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn init_vulkan(&self, window: &Window) -> SetupResult<Session<VulkanBackend>> {
        log::info!("Initializing Vulkan...");

        let backend = VulkanBackend::load()?;
        let window_extensions = vulkan::window_extensions(window)?;
        let enable_validation = self.config.debug.validation_layers;

        let request =
            InstanceRequest::new(&self.config.app.name, &window_extensions, enable_validation)?;

        let options = SessionOptions {
            debug_messenger: request.validation_enabled(),
            device_preference: self.config.graphics.device_preference,
        };

        let session = Session::open(backend, &request, options)?;

        if let (Some(selection), Some(device)) = (session.selection(), session.device()) {
            log::info!(
                "Physical device {:?}, graphics queue {:?} (family {})",
                selection.physical_device,
                device.graphics_queue,
                device.graphics_queue_family
            );
        }

        log::info!("Vulkan initialized successfully!");
        Ok(session)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: SetupError) {
        self.failure.get_or_insert(err);
        event_loop.exit();
    }
}

// =============================================================================
// EVENT HANDLING
// =============================================================================

impl ApplicationHandler for App {
    /// Called when the application is ready to create windows.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.failure.is_some() {
            return;
        }

        let window_attributes = WindowAttributes::default()
            .with_title(&self.config.window.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(w) => w,
            Err(e) => {
                self.fail(event_loop, SetupError::WindowCreateFailed(e));
                return;
            }
        };

        if self.config.app.lesson == Lesson::Device {
            match self.init_vulkan(&window) {
                Ok(session) => self.session = Some(session),
                Err(e) => self.fail(event_loop, e),
            }
        }

        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, shutting down...");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                use winit::keyboard::{KeyCode, PhysicalKey};

                if event.state.is_pressed() && event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                    log::info!("ESC pressed, exiting...");
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}

// =============================================================================
// CLEANUP
// =============================================================================

impl Drop for App {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!("Cleaning up Vulkan resources...");
            drop(session);
        }

        if self.window.take().is_some() {
            log::info!("Window closed");
        }
    }
}
