//! PIX Core Components
//!
//! mTLS certificate resolution and HTTP transport.

pub mod certificate;
pub mod transport;

pub use certificate::*;
pub use transport::*;
