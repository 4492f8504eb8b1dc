//! Fallbacks for optional references and zero values.

/// Clone the referenced value, or produce `T::default()` for `None`.
pub fn deref_or_default<T: Clone + Default>(value: Option<&T>) -> T {
    value.cloned().unwrap_or_default()
}

/// Clone the referenced value, or return `fallback` for `None`.
pub fn deref_or<T: Clone>(value: Option<&T>, fallback: T) -> T {
    value.cloned().unwrap_or(fallback)
}

/// Return `fallback` when `value` equals the type's default ("zero") value.
///
/// # Examples
///
/// ```
/// use utilbelt::options::default_if_zero;
///
/// assert_eq!(default_if_zero("", "hello"), "hello");
/// assert_eq!(default_if_zero("world", "hello"), "world");
/// assert_eq!(default_if_zero(0, 7), 7);
/// ```
pub fn default_if_zero<T: Default + PartialEq>(value: T, fallback: T) -> T {
    if value == T::default() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deref_or_default() {
        let n = 42;
        assert_eq!(deref_or_default(Some(&n)), 42);
        assert_eq!(deref_or_default::<i32>(None), 0);
        assert_eq!(deref_or_default::<String>(None), "");
    }

    #[test]
    fn test_deref_or() {
        let s = String::from("set");
        assert_eq!(deref_or(Some(&s), "unset".to_string()), "set");
        assert_eq!(deref_or(None, "unset".to_string()), "unset");
    }

    #[test]
    fn test_default_if_zero() {
        assert_eq!(default_if_zero("", "default value"), "default value");
        assert_eq!(default_if_zero("hello there", "default value"), "hello there");
        assert_eq!(default_if_zero(0.0, 1.5), 1.5);
        assert_eq!(default_if_zero(Some(3), Some(4)), Some(3));
        assert_eq!(default_if_zero(None, Some(4)), Some(4));
    }
}
