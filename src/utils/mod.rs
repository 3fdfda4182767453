pub mod format_utils;
