pub mod code_label;
pub mod otp_row;
