pub mod paths;
pub mod terminal;

pub use paths::{expand_tilde, format_path_with_tilde, safe_open_file, validate_file_size};
pub use terminal::sanitize_for_terminal;
