//! Call-site descriptors threaded from the public API down to the formatter

use std::panic::Location;

/// Placeholder used when the enclosing function cannot be named
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

/// Where a log call was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerInfo {
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl CallerInfo {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            function: function.into(),
        }
    }

    /// Build from a `#[track_caller]` location. Function names are not
    /// available this way; the logging macros supply them.
    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line(), UNKNOWN_FUNCTION)
    }

    /// Capture the location of the caller of the current `#[track_caller]` function
    #[track_caller]
    pub fn here() -> Self {
        Self::from_location(Location::caller())
    }
}

/// Name of the enclosing function, without its module path.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let path = __type_name_of(__here);
        let path = path.strip_suffix("::__here").unwrap_or(path);
        path.rsplit("::")
            .find(|segment| *segment != "{{closure}}")
            .unwrap_or(path)
    }};
}

/// Capture a [`CallerInfo`](crate::core::CallerInfo) for the current source location.
#[macro_export]
macro_rules! caller {
    () => {
        $crate::core::CallerInfo::new(file!(), line!(), $crate::function_name!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_here_points_at_call_site() {
        let expected_line = line!() + 1;
        let caller = CallerInfo::here();
        assert_eq!(caller.line, expected_line);
        assert!(caller.file.ends_with("caller.rs"));
        assert_eq!(caller.function, UNKNOWN_FUNCTION);
    }

    #[test]
    fn test_caller_macro_names_function() {
        let caller = crate::caller!();
        assert_eq!(caller.function, "test_caller_macro_names_function");
        assert!(caller.file.ends_with("caller.rs"));
    }

    #[test]
    fn test_function_name_inside_closure() {
        let name = (|| crate::function_name!())();
        assert_eq!(name, "test_function_name_inside_closure");
    }
}
