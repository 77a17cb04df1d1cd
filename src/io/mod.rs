//! Workbook adapters: calamine-backed value reading and the
//! rust_xlsxwriter-backed analysis output writer. The style-capable
//! backend used by the styled merge lives in [`crate::transcribe`].

pub mod excel_read;
pub mod excel_write;
