// Device selection
//
// Walks the catalog in enumeration order and picks a physical device plus
// the first queue family on it that can do graphics. The default policy is
// plain first-match; `DevicePreference::Discrete` ranks candidates by device
// type instead, still letting the earliest device win a tie.

use ash::vk;
use serde::Deserialize;

use super::catalog::DeviceCatalog;
use crate::error::{SetupError, SetupResult};

/// A physical device and the queue family the logical device will use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<D> {
    pub physical_device: D,
    pub queue_family_index: u32,
}

/// How to choose between several devices that all have a graphics queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePreference {
    /// First device in enumeration order.
    #[default]
    First,
    /// Discrete GPU over integrated GPU over everything else.
    Discrete,
}

impl DevicePreference {
    /// Score for a candidate; higher wins.
    pub fn rank(&self, device_type: vk::PhysicalDeviceType) -> u32 {
        match self {
            Self::First => 0,
            Self::Discrete => match device_type {
                vk::PhysicalDeviceType::DISCRETE_GPU => 1000,
                vk::PhysicalDeviceType::INTEGRATED_GPU => 100,
                _ => 1,
            },
        }
    }
}

/// Index of the first queue family that supports graphics.
pub fn first_graphics_family(families: &[vk::QueueFamilyProperties]) -> Option<u32> {
    families
        .iter()
        .position(|family| family.queue_flags.contains(vk::QueueFlags::GRAPHICS))
        .map(|index| index as u32)
}

/// Pick the device and queue family the logical device is created from.
pub fn select_graphics_device<C: DeviceCatalog>(
    catalog: &C,
    preference: DevicePreference,
) -> SetupResult<Selection<C::Device>> {
    let devices = match catalog.enumerate_devices() {
        Ok(devices) if !devices.is_empty() => devices,
        Ok(_) => return Err(SetupError::NoDevicesAvailable),
        Err(err) => {
            log::error!("Physical device enumeration failed: {}", err);
            return Err(SetupError::NoDevicesAvailable);
        }
    };

    log::debug!("Found {} physical device(s)", devices.len());

    let mut best: Option<(u32, Selection<C::Device>)> = None;

    for device in devices {
        let families = catalog.queue_families(device);
        let Some(queue_family_index) = first_graphics_family(&families) else {
            continue;
        };

        let selection = Selection {
            physical_device: device,
            queue_family_index,
        };

        if preference == DevicePreference::First {
            return Ok(selection);
        }

        let score = preference.rank(catalog.device_type(device));
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, selection));
        }
    }

    best.map(|(_, selection)| selection)
        .ok_or(SetupError::NoSuitableQueueFamily)
}
