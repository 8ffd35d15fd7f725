/// Checks on the state of a packed layout, used in `debug_assert!()` blocks
pub mod assertions;
