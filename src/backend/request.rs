// Logical device request
//
// Plain description of what the logical device asks the driver for. The
// Vulkan backend turns it into a vk::DeviceCreateInfo; keeping it separate
// lets the request be checked without hardware.

use ash::vk;
use std::ffi::{c_char, CStr};

/// Top of the queue priority range.
pub const QUEUE_PRIORITY: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct DeviceRequest {
    pub queue_family_index: u32,
    /// One entry per requested queue.
    pub queue_priorities: Vec<f32>,
    /// Optional device features; all disabled.
    pub features: vk::PhysicalDeviceFeatures,
    pub extensions: Vec<&'static CStr>,
}

impl DeviceRequest {
    /// One queue at maximum priority from `queue_family_index`, no features.
    pub fn single_queue(queue_family_index: u32) -> Self {
        Self {
            queue_family_index,
            queue_priorities: vec![QUEUE_PRIORITY],
            features: vk::PhysicalDeviceFeatures::default(),
            extensions: platform_device_extensions(),
        }
    }

    pub fn queue_count(&self) -> u32 {
        self.queue_priorities.len() as u32
    }

    /// Queue create infos pointing into this request; valid while `self` is.
    pub fn queue_create_infos(&self) -> [vk::DeviceQueueCreateInfo; 1] {
        [vk::DeviceQueueCreateInfo::builder()
            .queue_family_index(self.queue_family_index)
            .queue_priorities(&self.queue_priorities)
            .build()]
    }

    pub fn extension_names(&self) -> Vec<*const c_char> {
        self.extensions.iter().map(|name| name.as_ptr()).collect()
    }
}

/// Device extensions the platform needs regardless of what the device reports.
fn platform_device_extensions() -> Vec<&'static CStr> {
    #[allow(unused_mut)]
    let mut extensions = Vec::new();

    #[cfg(any(target_os = "macos", target_os = "ios"))]
    extensions.push(vk::KhrPortabilitySubsetFn::name());

    extensions
}
