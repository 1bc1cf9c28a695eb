// Debug messenger
//
// Passive observer for validation output. The callback turns severity and
// type bits into labels and forwards the message to the logger; it never
// aborts the call that triggered it.

use ash::vk;
use std::borrow::Cow;
use std::ffi::CStr;

type Severity = vk::DebugUtilsMessageSeverityFlagsEXT;
type MessageType = vk::DebugUtilsMessageTypeFlagsEXT;

/// Severities and categories the messenger subscribes to.
pub fn messenger_create_info() -> vk::DebugUtilsMessengerCreateInfoEXT {
    vk::DebugUtilsMessengerCreateInfoEXT::builder()
        .message_severity(Severity::VERBOSE | Severity::WARNING | Severity::ERROR)
        .message_type(MessageType::GENERAL | MessageType::VALIDATION | MessageType::PERFORMANCE)
        .pfn_user_callback(Some(debug_callback))
        .build()
}

pub fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::VERBOSE => "VERBOSE",
        Severity::INFO => "INFO",
        Severity::WARNING => "WARNING",
        Severity::ERROR => "ERROR",
        _ => "UNKNOWN",
    }
}

pub fn message_type_label(message_type: MessageType) -> String {
    let labels: Vec<&str> = [
        (MessageType::GENERAL, "General"),
        (MessageType::VALIDATION, "Validation"),
        (MessageType::PERFORMANCE, "Performance"),
    ]
    .into_iter()
    .filter(|(bit, _)| message_type.contains(*bit))
    .map(|(_, label)| label)
    .collect();

    if labels.is_empty() {
        "Unknown".to_string()
    } else {
        labels.join(" | ")
    }
}

/// Log level for a messenger severity.
///
/// Every subscribed severity, VERBOSE included, lands at `info` or above so
/// the default filter prints it.
pub fn message_level(severity: Severity) -> log::Level {
    match severity {
        Severity::ERROR => log::Level::Error,
        Severity::WARNING => log::Level::Warn,
        _ => log::Level::Info,
    }
}

pub fn format_message(severity: Severity, message_type: MessageType, message: &str) -> String {
    format!(
        "[{}: {}]\n{}",
        severity_label(severity),
        message_type_label(message_type),
        message
    )
}

unsafe extern "system" fn debug_callback(
    message_severity: Severity,
    message_type: MessageType,
    p_callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _p_user_data: *mut std::ffi::c_void,
) -> vk::Bool32 {
    let message: Cow<str> = if p_callback_data.is_null() || (*p_callback_data).p_message.is_null() {
        "<no message>".into()
    } else {
        CStr::from_ptr((*p_callback_data).p_message).to_string_lossy()
    };

    let line = format_message(message_severity, message_type, &message);

    log::log!(message_level(message_severity), "{}", line);

    vk::FALSE
}
