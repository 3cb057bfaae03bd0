pub mod checks;
pub mod json_assert;
pub mod probe;
