// Instance request
//
// Application info, extensions and layers for vkCreateInstance. The window
// supplies its surface extensions; debug and portability extensions are
// appended here.

use ash::vk;
use std::ffi::{c_char, CStr, CString};

use crate::error::{SetupError, SetupResult};

pub const VALIDATION_LAYER: &CStr = c"VK_LAYER_KHRONOS_validation";
pub const ENGINE_NAME: &str = "Custom engine";

#[derive(Debug, Clone)]
pub struct InstanceRequest {
    pub app_name: CString,
    pub engine_name: CString,
    pub app_version: u32,
    pub engine_version: u32,
    pub api_version: u32,
    pub extensions: Vec<&'static CStr>,
    pub layers: Vec<&'static CStr>,
    pub flags: vk::InstanceCreateFlags,
}

impl InstanceRequest {
    pub fn new(
        app_name: &str,
        window_extensions: &[&'static CStr],
        enable_validation: bool,
    ) -> SetupResult<Self> {
        let app_name = CString::new(app_name)
            .map_err(|e| SetupError::InstanceCreateFailed(format!("invalid application name: {e}")))?;
        let engine_name = CString::new(ENGINE_NAME)
            .map_err(|e| SetupError::InstanceCreateFailed(e.to_string()))?;

        let mut extensions = window_extensions.to_vec();

        if enable_validation {
            extensions.push(vk::ExtDebugReportFn::name());
            extensions.push(vk::ExtDebugUtilsFn::name());
        }

        #[allow(unused_mut)]
        let mut flags = vk::InstanceCreateFlags::empty();

        #[cfg(any(target_os = "macos", target_os = "ios"))]
        {
            extensions.push(vk::KhrPortabilityEnumerationFn::name());
            // Needed by VK_KHR_portability_subset on the device
            extensions.push(vk::KhrGetPhysicalDeviceProperties2Fn::name());
            flags |= vk::InstanceCreateFlags::ENUMERATE_PORTABILITY_KHR;
        }

        let mut unique = Vec::with_capacity(extensions.len());
        for ext in extensions {
            if !unique.contains(&ext) {
                unique.push(ext);
            }
        }

        let layers = if enable_validation {
            vec![VALIDATION_LAYER]
        } else {
            vec![]
        };

        Ok(Self {
            app_name,
            engine_name,
            app_version: vk::make_api_version(0, 0, 0, 1),
            engine_version: vk::make_api_version(0, 0, 0, 1),
            api_version: vk::API_VERSION_1_0,
            extensions: unique,
            layers,
            flags,
        })
    }

    pub fn validation_enabled(&self) -> bool {
        self.layers.contains(&VALIDATION_LAYER)
    }

    pub fn extension_names(&self) -> Vec<*const c_char> {
        self.extensions.iter().map(|name| name.as_ptr()).collect()
    }

    pub fn layer_names(&self) -> Vec<*const c_char> {
        self.layers.iter().map(|name| name.as_ptr()).collect()
    }
}
