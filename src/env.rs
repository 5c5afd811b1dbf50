//! Configuration read from environment variables.

/// Interpret a string value such as "1" or "no" as a boolean.
pub fn str_as_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" => Some(true),
        "0" | "false" | "f" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Return whether a flag controlled by an environment variable is enabled.
///
/// Unrecognized values are logged and treated as `default`.
pub fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => str_as_bool(&value).unwrap_or_else(|| {
            log::warn!("Unrecognized boolean value \"{}\" for {}", value, name);
            default
        }),
        Err(_) => default,
    }
}

/// Return the non-negative integer value of an environment variable, or
/// `default` if it is unset or invalid.
pub fn env_usize(name: &str, default: usize) -> usize {
    match std::env::var(name) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("Unrecognized integer value \"{}\" for {}", value, name);
            default
        }),
        Err(_) => default,
    }
}
