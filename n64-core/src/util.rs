/// Format `value` as eight uppercase hex digits after `prefix`.
pub fn format_hex(value: u32, prefix: &str) -> String {
    format!("{}{:08X}", prefix, value)
}

const SIZE_UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

/// Human readable size in binary units, two decimals.
pub fn format_file_size(size: u64) -> String {
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, SIZE_UNITS[unit])
}
