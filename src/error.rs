pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create error for input exceeding the configured size budget
pub fn input_too_large_error(source: &str, size: usize, limit: usize) -> AppError {
    AppError::bad_request(format!(
        "Input '{}' is {} bytes, exceeding the limit of {} (see max_input_bytes)",
        source,
        size,
        human_limit(limit)
    ))
}

/// Create error for missing SQL input
pub fn missing_input_error() -> AppError {
    AppError::bad_request("No SQL input given: pass file paths, '-' for stdin, or --sql")
}

fn human_limit(limit: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = KIB * 1024;
    if limit >= MIB && limit % MIB == 0 {
        format!("{} bytes ({} MiB)", limit, limit / MIB)
    } else if limit >= KIB && limit % KIB == 0 {
        format!("{} bytes ({} KiB)", limit, limit / KIB)
    } else {
        format!("{} bytes", limit)
    }
}
