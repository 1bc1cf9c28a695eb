// Physical device catalog
//
// Read-only view of the hardware the instance can see. The selector only
// talks to this trait, so it runs unchanged against a real ash::Instance or
// an in-memory catalog.

use ash::vk;

pub trait DeviceCatalog {
    type Device: Copy;

    /// Physical devices in the order the driver reports them.
    fn enumerate_devices(&self) -> Result<Vec<Self::Device>, vk::Result>;

    /// Queue families of `device`, indexed by family index.
    fn queue_families(&self, device: Self::Device) -> Vec<vk::QueueFamilyProperties>;

    fn device_type(&self, device: Self::Device) -> vk::PhysicalDeviceType;
}

impl DeviceCatalog for ash::Instance {
    type Device = vk::PhysicalDevice;

    fn enumerate_devices(&self) -> Result<Vec<vk::PhysicalDevice>, vk::Result> {
        unsafe { self.enumerate_physical_devices() }
    }

    fn queue_families(&self, device: vk::PhysicalDevice) -> Vec<vk::QueueFamilyProperties> {
        unsafe { self.get_physical_device_queue_family_properties(device) }
    }

    fn device_type(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceType {
        unsafe { self.get_physical_device_properties(device) }.device_type
    }
}
