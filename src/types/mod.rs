//! PIX Types
//!
//! Configuration, token and wire payload definitions.

pub mod cob;
pub mod cobv;
pub mod common;
pub mod config;
pub mod loc;
pub mod lotecobv;
pub mod pix;
pub mod problem;
pub mod token;
pub mod webhook;

pub use cob::*;
pub use cobv::*;
pub use common::*;
pub use config::{CertificateOptions, Environment, PixConfig};
pub use loc::*;
pub use lotecobv::*;
pub use pix::*;
pub use problem::*;
pub use token::*;
pub use webhook::*;
