pub mod components;
pub mod key_input;
pub mod layout;
pub mod theme;
