// Session - scoped ownership of the Vulkan objects a lesson creates
//
// Objects are acquired in order (instance, debug messenger, logical device)
// and stored as they succeed. Drop releases whatever was acquired, in
// reverse order, so a failure at any step unwinds exactly the steps before it.

use super::selection::{select_graphics_device, DevicePreference, Selection};
use super::{Backend, DeviceRequest, InstanceRequest, PhysicalDevice};
use crate::error::SetupResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub debug_messenger: bool,
    pub device_preference: DevicePreference,
}

pub struct Session<B: Backend> {
    device: Option<B::Device>,
    messenger: Option<B::Messenger>,
    instance: Option<B::Instance>,
    selection: Option<Selection<PhysicalDevice<B>>>,
    backend: B,
}

impl<B: Backend> Session<B> {
    /// Run the setup sequence up to a live logical device.
    pub fn open(
        backend: B,
        instance_request: &InstanceRequest,
        options: SessionOptions,
    ) -> SetupResult<Self> {
        let mut session = Self {
            device: None,
            messenger: None,
            instance: None,
            selection: None,
            backend,
        };

        let instance = session
            .instance
            .insert(session.backend.create_instance(instance_request)?);
        log::info!("Vulkan instance created");

        if options.debug_messenger {
            session.messenger = Some(session.backend.create_debug_messenger(instance)?);
            log::info!("Debug messenger registered");
        }

        let selection = select_graphics_device(&*instance, options.device_preference)?;
        log::info!(
            "Selected queue family {} for graphics",
            selection.queue_family_index
        );
        session.selection = Some(selection);

        let request = DeviceRequest::single_queue(selection.queue_family_index);
        session.device = Some(session.backend.create_device(
            instance,
            selection.physical_device,
            &request,
        )?);
        log::info!("Logical device created");

        Ok(session)
    }

    pub fn device(&self) -> Option<&B::Device> {
        self.device.as_ref()
    }

    pub fn selection(&self) -> Option<Selection<PhysicalDevice<B>>> {
        self.selection
    }
}

impl<B: Backend> Drop for Session<B> {
    fn drop(&mut self) {
        if let Some(device) = self.device.take() {
            self.backend.destroy_device(device);
        }

        if let Some(instance) = self.instance.take() {
            if let Some(messenger) = self.messenger.take() {
                self.backend.destroy_debug_messenger(&instance, messenger);
            }
            self.backend.destroy_instance(instance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::catalog::fake::{FakeCatalog, FakeDevice};
    use crate::error::SetupError;
    use ash::vk;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Step {
        Instance,
        Messenger,
        Device,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        CreateInstance,
        CreateMessenger,
        CreateDevice {
            physical_device: usize,
            queue_family_index: u32,
            queue_count: u32,
            priorities: Vec<f32>,
        },
        DestroyDevice,
        DestroyMessenger,
        DestroyInstance,
    }

    struct FakeBackend {
        journal: Rc<RefCell<Vec<Event>>>,
        catalog: FakeCatalog,
        fail_at: Option<Step>,
    }

    impl FakeBackend {
        fn new(catalog: FakeCatalog, fail_at: Option<Step>) -> (Self, Rc<RefCell<Vec<Event>>>) {
            let journal = Rc::new(RefCell::new(Vec::new()));
            let backend = Self {
                journal: journal.clone(),
                catalog,
                fail_at,
            };
            (backend, journal)
        }

        fn record(&self, event: Event) {
            self.journal.borrow_mut().push(event);
        }
    }

    impl Backend for FakeBackend {
        type Instance = FakeCatalog;
        type Messenger = ();
        type Device = ();

        fn create_instance(&self, _request: &InstanceRequest) -> SetupResult<FakeCatalog> {
            if self.fail_at == Some(Step::Instance) {
                return Err(SetupError::InstanceCreateFailed("ERROR_INCOMPATIBLE_DRIVER".into()));
            }
            self.record(Event::CreateInstance);
            Ok(self.catalog.clone())
        }

        fn create_debug_messenger(&self, _instance: &FakeCatalog) -> SetupResult<()> {
            if self.fail_at == Some(Step::Messenger) {
                return Err(SetupError::DebugMessengerSetupFailed(
                    vk::Result::ERROR_EXTENSION_NOT_PRESENT,
                ));
            }
            self.record(Event::CreateMessenger);
            Ok(())
        }

        fn create_device(
            &self,
            _instance: &FakeCatalog,
            physical_device: usize,
            request: &DeviceRequest,
        ) -> SetupResult<()> {
            if self.fail_at == Some(Step::Device) {
                return Err(SetupError::DeviceCreationFailed(
                    vk::Result::ERROR_INITIALIZATION_FAILED,
                ));
            }
            self.record(Event::CreateDevice {
                physical_device,
                queue_family_index: request.queue_family_index,
                queue_count: request.queue_count(),
                priorities: request.queue_priorities.clone(),
            });
            Ok(())
        }

        fn destroy_device(&self, _device: ()) {
            self.record(Event::DestroyDevice);
        }

        fn destroy_debug_messenger(&self, _instance: &FakeCatalog, _messenger: ()) {
            self.record(Event::DestroyMessenger);
        }

        fn destroy_instance(&self, _instance: FakeCatalog) {
            self.record(Event::DestroyInstance);
        }
    }

    fn gpu_catalog() -> FakeCatalog {
        FakeCatalog::with_devices(vec![
            FakeDevice::new(vk::PhysicalDeviceType::CPU, &[vk::QueueFlags::TRANSFER]),
            FakeDevice::new(
                vk::PhysicalDeviceType::INTEGRATED_GPU,
                &[vk::QueueFlags::COMPUTE, vk::QueueFlags::GRAPHICS],
            ),
        ])
    }

    fn request() -> InstanceRequest {
        InstanceRequest::new("Lesson", &[], true).unwrap()
    }

    fn with_messenger() -> SessionOptions {
        SessionOptions {
            debug_messenger: true,
            device_preference: DevicePreference::First,
        }
    }

    fn open(catalog: FakeCatalog, fail_at: Option<Step>) -> (SetupResult<Session<FakeBackend>>, Rc<RefCell<Vec<Event>>>) {
        let (backend, journal) = FakeBackend::new(catalog, fail_at);
        (Session::open(backend, &request(), with_messenger()), journal)
    }

    #[test]
    fn full_setup_then_reverse_teardown() {
        let (session, journal) = open(gpu_catalog(), None);
        let session = session.unwrap();

        assert_eq!(
            session.selection(),
            Some(Selection {
                physical_device: 1,
                queue_family_index: 1,
            })
        );
        assert!(session.device().is_some());
        drop(session);

        assert_eq!(
            *journal.borrow(),
            vec![
                Event::CreateInstance,
                Event::CreateMessenger,
                Event::CreateDevice {
                    physical_device: 1,
                    queue_family_index: 1,
                    queue_count: 1,
                    priorities: vec![1.0],
                },
                Event::DestroyDevice,
                Event::DestroyMessenger,
                Event::DestroyInstance,
            ]
        );
    }

    #[test]
    fn instance_failure_releases_nothing() {
        let (session, journal) = open(gpu_catalog(), Some(Step::Instance));

        assert!(matches!(session, Err(SetupError::InstanceCreateFailed(_))));
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn messenger_failure_releases_instance() {
        let (session, journal) = open(gpu_catalog(), Some(Step::Messenger));

        assert!(matches!(session, Err(SetupError::DebugMessengerSetupFailed(_))));
        assert_eq!(
            *journal.borrow(),
            vec![Event::CreateInstance, Event::DestroyInstance]
        );
    }

    #[test]
    fn enumeration_failure_releases_messenger_then_instance() {
        let (session, journal) = open(FakeCatalog::default(), None);

        assert!(matches!(session, Err(SetupError::NoDevicesAvailable)));
        assert_eq!(
            *journal.borrow(),
            vec![
                Event::CreateInstance,
                Event::CreateMessenger,
                Event::DestroyMessenger,
                Event::DestroyInstance,
            ]
        );
    }

    #[test]
    fn no_graphics_queue_releases_messenger_then_instance() {
        let catalog = FakeCatalog::with_devices(vec![FakeDevice::new(
            vk::PhysicalDeviceType::DISCRETE_GPU,
            &[vk::QueueFlags::COMPUTE],
        )]);
        let (session, journal) = open(catalog, None);

        assert!(matches!(session, Err(SetupError::NoSuitableQueueFamily)));
        assert_eq!(
            *journal.borrow(),
            vec![
                Event::CreateInstance,
                Event::CreateMessenger,
                Event::DestroyMessenger,
                Event::DestroyInstance,
            ]
        );
    }

    #[test]
    fn device_failure_releases_messenger_then_instance() {
        let (session, journal) = open(gpu_catalog(), Some(Step::Device));

        assert!(matches!(session, Err(SetupError::DeviceCreationFailed(_))));
        assert_eq!(
            *journal.borrow(),
            vec![
                Event::CreateInstance,
                Event::CreateMessenger,
                Event::DestroyMessenger,
                Event::DestroyInstance,
            ]
        );
    }

    #[test]
    fn messenger_is_optional() {
        let (backend, journal) = FakeBackend::new(gpu_catalog(), None);
        let options = SessionOptions {
            debug_messenger: false,
            ..Default::default()
        };

        drop(Session::open(backend, &request(), options).unwrap());

        let journal = journal.borrow();
        assert!(!journal.contains(&Event::CreateMessenger));
        assert!(!journal.contains(&Event::DestroyMessenger));
        assert_eq!(journal.first(), Some(&Event::CreateInstance));
        assert_eq!(journal.last(), Some(&Event::DestroyInstance));
    }
}
