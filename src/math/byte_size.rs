use std::fmt;

/// Units for multiples of 1024.
pub const BINARY_UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Units for multiples of 1000.
pub const DECIMAL_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// A number of bytes that displays in a human readable way.
///
/// `Display` uses binary units; [`ByteSize::as_decimal`] uses decimal ones.
///
/// # Examples
///
/// ```
/// use utilbelt::math::ByteSize;
///
/// assert_eq!(ByteSize(1424.0).to_string(), "1.4KiB");
/// assert_eq!(ByteSize(1424.0).as_decimal(), "1.4KB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ByteSize(pub f64);

impl ByteSize {
    /// Format with multiples of 1000.
    pub fn as_decimal(self) -> String {
        self.human_readable(1000.0, &DECIMAL_UNITS)
    }

    /// Format with an arbitrary step between units. Values beyond the last
    /// unit stay in that unit.
    pub fn human_readable(self, measurement: f64, units: &[&str]) -> String {
        let Some(last) = units.last() else {
            return format!("{:.1}", self.0);
        };

        let mut value = self.0;
        for unit in units {
            if value < measurement {
                return format!("{value:.1}{unit}");
            }
            value /= measurement;
        }
        format!("{:.1}{last}", value * measurement)
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.human_readable(1024.0, &BINARY_UNITS))
    }
}

impl From<u64> for ByteSize {
    fn from(bytes: u64) -> Self {
        Self(bytes as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_units() {
        let cases = [
            (500.0, "500.0B"),
            (1023.0, "1023.0B"),
            (1024.0, "1.0KiB"),
            (1424.0, "1.4KiB"),
            (152310.0, "148.7KiB"),
            (1024.0 * 1190.0, "1.2MiB"),
            (1024f64.powi(5) * 3.0 + 1024f64.powi(4) * 400.0, "3.4PiB"),
            (1024f64.powi(6) * 3.0 + 1024f64.powi(5) * 400.0, "3472.0PiB"),
        ];
        for (input, want) in cases {
            assert_eq!(ByteSize(input).to_string(), want, "input {input}");
        }
    }

    #[test]
    fn test_decimal_units() {
        let cases = [
            (500.0, "500.0B"),
            (1023.0, "1.0KB"),
            (1000.0, "1.0KB"),
            (1424.0, "1.4KB"),
            (152310.0, "152.3KB"),
            (1024.0 * 1190.0, "1.2MB"),
            (1024f64.powi(5) * 3.0 + 1024f64.powi(4) * 400.0, "3.8PB"),
            (1024f64.powi(6) * 3.0 + 1024f64.powi(5) * 400.0, "3909.1PB"),
        ];
        for (input, want) in cases {
            assert_eq!(ByteSize(input).as_decimal(), want, "input {input}");
        }
    }

    #[test]
    fn test_from_u64() {
        assert_eq!(ByteSize::from(2048).to_string(), "2.0KiB");
    }

    #[test]
    fn test_no_units() {
        assert_eq!(ByteSize(12.0).human_readable(10.0, &[]), "12.0");
    }
}
