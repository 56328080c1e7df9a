pub mod cell;
pub mod error;
pub mod field_group;
pub mod style;

pub use cell::{Cell, MaskPolicy};
pub use error::OtpError;
pub use field_group::{EditOutcome, FieldConfig, FieldGroup, PasteMode};
pub use style::{FieldStyle, ShadowStyle};
