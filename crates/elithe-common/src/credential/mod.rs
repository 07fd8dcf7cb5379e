//! Check-in credential rendering

mod qr;

pub use qr::{png_data_url, QrCredentialIssuer};
