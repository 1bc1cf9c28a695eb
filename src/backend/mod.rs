// Backend module - Vulkan setup for the lessons
//
// Design: the lesson's control flow (Session) only sees the Backend trait;
// VulkanBackend is the ash implementation.

pub mod catalog;
pub mod debug;
pub mod instance;
pub mod request;
pub mod selection;
pub mod session;
pub mod vulkan;

pub use catalog::DeviceCatalog;
pub use instance::InstanceRequest;
pub use request::DeviceRequest;
pub use selection::DevicePreference;
pub use session::{Session, SessionOptions};
pub use vulkan::VulkanBackend;

use crate::error::SetupResult;

/// Physical device handle type of a backend.
pub type PhysicalDevice<B> = <<B as Backend>::Instance as DeviceCatalog>::Device;

/// Create/destroy entry points of the graphics API.
///
/// Every `create_*` that succeeds is matched by exactly one `destroy_*`,
/// which Session guarantees.
pub trait Backend {
    type Instance: DeviceCatalog;
    type Messenger;
    type Device;

    fn create_instance(&self, request: &InstanceRequest) -> SetupResult<Self::Instance>;

    fn create_debug_messenger(&self, instance: &Self::Instance) -> SetupResult<Self::Messenger>;

    fn create_device(
        &self,
        instance: &Self::Instance,
        physical_device: PhysicalDevice<Self>,
        request: &DeviceRequest,
    ) -> SetupResult<Self::Device>;

    fn destroy_device(&self, device: Self::Device);

    fn destroy_debug_messenger(&self, instance: &Self::Instance, messenger: Self::Messenger);

    fn destroy_instance(&self, instance: Self::Instance);
}
