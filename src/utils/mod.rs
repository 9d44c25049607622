//! Utilities
//!
//! Constants, txid generation, document and key validators, date helpers
//! and QR code rendering.

pub mod constants;
pub mod date;
pub mod qrcode;
pub mod txid;
pub mod validators;

pub use date::{
    create_date_range, default_date_range, format_date_only, parse_date, to_iso_string, DateRange,
};
pub use self::qrcode::{
    encode_qr_code, generate_qr_code_data_url, generate_qr_code_svg, QrCodeOptions,
};
pub use txid::{ensure_txid, generate_txid, generate_txid_with_length, is_valid_txid};
pub use validators::{
    detect_pix_key_type, is_valid_cnpj, is_valid_cpf, is_valid_monetary_value, is_valid_pix_key,
    PixKeyType,
};
