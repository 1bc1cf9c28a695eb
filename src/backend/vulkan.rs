// Vulkan backend - ash implementation of Backend
//
// Responsibilities:
// - Loading the Vulkan library
// - Instance creation from an InstanceRequest
// - Debug messenger registration
// - Logical device + graphics queue creation

use ash::extensions::ext::DebugUtils;
use ash::{vk, Entry};
use raw_window_handle::HasRawDisplayHandle;
use std::ffi::CStr;

use super::{debug, Backend, DeviceRequest, InstanceRequest};
use crate::error::{SetupError, SetupResult};

pub struct VulkanBackend {
    entry: Entry,
}

/// Debug messenger handle together with the loader that destroys it.
pub struct DebugMessenger {
    loader: DebugUtils,
    handle: vk::DebugUtilsMessengerEXT,
}

/// Logical device and the single graphics queue it owns.
pub struct LogicalDevice {
    pub device: ash::Device,
    pub graphics_queue: vk::Queue,
    pub graphics_queue_family: u32,
}

impl VulkanBackend {
    pub fn load() -> SetupResult<Self> {
        let entry = unsafe { Entry::load() }.map_err(|e| {
            SetupError::InstanceCreateFailed(format!(
                "failed to load Vulkan library ({e}). Is Vulkan installed?"
            ))
        })?;
        Ok(Self { entry })
    }
}

/// Surface extensions the window system needs on the instance.
pub fn window_extensions(window: &impl HasRawDisplayHandle) -> SetupResult<Vec<&'static CStr>> {
    let names = ash_window::enumerate_required_extensions(window.raw_display_handle())
        .map_err(|e| {
            SetupError::InstanceCreateFailed(format!("window extensions unavailable: {e}"))
        })?;

    // ash_window hands out static, nul-terminated extension names
    Ok(names
        .iter()
        .map(|&name| unsafe { CStr::from_ptr(name) })
        .collect())
}

impl Backend for VulkanBackend {
    type Instance = ash::Instance;
    type Messenger = DebugMessenger;
    type Device = LogicalDevice;

    fn create_instance(&self, request: &InstanceRequest) -> SetupResult<ash::Instance> {
        for ext in &request.extensions {
            log::debug!("Instance extension: {}", ext.to_string_lossy());
        }

        let app_info = vk::ApplicationInfo::builder()
            .application_name(&request.app_name)
            .application_version(request.app_version)
            .engine_name(&request.engine_name)
            .engine_version(request.engine_version)
            .api_version(request.api_version);

        let extensions = request.extension_names();
        let layers = request.layer_names();

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_extension_names(&extensions)
            .enabled_layer_names(&layers)
            .flags(request.flags);

        unsafe { self.entry.create_instance(&create_info, None) }
            .map_err(|e| SetupError::InstanceCreateFailed(e.to_string()))
    }

    fn create_debug_messenger(&self, instance: &ash::Instance) -> SetupResult<DebugMessenger> {
        let loader = DebugUtils::new(&self.entry, instance);
        let create_info = debug::messenger_create_info();

        let handle = unsafe { loader.create_debug_utils_messenger(&create_info, None) }
            .map_err(SetupError::DebugMessengerSetupFailed)?;

        Ok(DebugMessenger { loader, handle })
    }

    fn create_device(
        &self,
        instance: &ash::Instance,
        physical_device: vk::PhysicalDevice,
        request: &DeviceRequest,
    ) -> SetupResult<LogicalDevice> {
        let properties = unsafe { instance.get_physical_device_properties(physical_device) };
        log::info!(
            "Selected GPU: {}",
            unsafe { CStr::from_ptr(properties.device_name.as_ptr()) }.to_string_lossy()
        );
        log::info!(
            "API Version: {}.{}.{}",
            vk::api_version_major(properties.api_version),
            vk::api_version_minor(properties.api_version),
            vk::api_version_patch(properties.api_version)
        );

        log::debug!(
            "Requesting {} queue(s) from family {}",
            request.queue_count(),
            request.queue_family_index
        );

        let queue_create_infos = request.queue_create_infos();
        let extensions = request.extension_names();

        let create_info = vk::DeviceCreateInfo::builder()
            .queue_create_infos(&queue_create_infos)
            .enabled_extension_names(&extensions)
            .enabled_features(&request.features);

        let device = unsafe { instance.create_device(physical_device, &create_info, None) }
            .map_err(SetupError::DeviceCreationFailed)?;

        let graphics_queue = unsafe { device.get_device_queue(request.queue_family_index, 0) };

        Ok(LogicalDevice {
            device,
            graphics_queue,
            graphics_queue_family: request.queue_family_index,
        })
    }

    fn destroy_device(&self, device: LogicalDevice) {
        log::info!("Destroying logical device");
        unsafe {
            let _ = device.device.device_wait_idle();
            device.device.destroy_device(None);
        }
    }

    fn destroy_debug_messenger(&self, _instance: &ash::Instance, messenger: DebugMessenger) {
        log::info!("Destroying debug messenger");
        unsafe {
            messenger
                .loader
                .destroy_debug_utils_messenger(messenger.handle, None);
        }
    }

    fn destroy_instance(&self, instance: ash::Instance) {
        log::info!("Destroying Vulkan instance");
        unsafe { instance.destroy_instance(None) };
    }
}
