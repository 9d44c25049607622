//! PIX API resource services.
//!
//! Each service is a borrowed handle on [`PixClient`](crate::PixClient) that
//! maps method calls onto a verb, a versioned path and a query or JSON body.

mod cob;
mod cobv;
mod loc;
mod lotecobv;
mod pix;
mod webhook;

pub use cob::CobService;
pub use cobv::CobvService;
pub use loc::LocService;
pub use lotecobv::LoteCobvService;
pub use pix::PixService;
pub use webhook::WebhookService;
