// Setup errors
//
// Every variant is fatal to the running lesson. The session releases what
// was already acquired, then main turns the error into an exit code.

use ash::vk;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to initialise the windowing system: {0}")]
    WindowInitFailed(#[source] winit::error::EventLoopError),
    #[error("Failed to create window: {0}")]
    WindowCreateFailed(#[source] winit::error::OsError),
    #[error("Failed to create Vulkan instance: {0}")]
    InstanceCreateFailed(String),
    #[error("Failed to set up debug messenger: {0}")]
    DebugMessengerSetupFailed(vk::Result),
    #[error("No Vulkan physical devices available")]
    NoDevicesAvailable,
    #[error("No physical device exposes a graphics-capable queue family")]
    NoSuitableQueueFamily,
    #[error("Failed to create logical device: {0}")]
    DeviceCreationFailed(vk::Result),
}

impl SetupError {
    /// Process exit code reported for this failure.
    ///
    /// Window and instance failures keep the `-1` (255) of the classic
    /// lessons; everything after instance creation gets its own code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::WindowInitFailed(_) | Self::WindowCreateFailed(_) | Self::InstanceCreateFailed(_) => {
                255
            }
            Self::DebugMessengerSetupFailed(_) => 3,
            Self::NoDevicesAvailable => 4,
            Self::NoSuitableQueueFamily => 5,
            Self::DeviceCreationFailed(_) => 6,
        }
    }
}

impl From<&SetupError> for ExitCode {
    fn from(error: &SetupError) -> Self {
        ExitCode::from(error.exit_code())
    }
}

pub type SetupResult<T> = std::result::Result<T, SetupError>;
