//! API Constants
//!
//! Base URLs, endpoint paths and tuning defaults for the Sicredi PIX API.

use std::time::Duration;

/// Production API base URL.
pub const PRODUCTION_BASE_URL: &str = "https://api-pix.sicredi.com.br";

/// Homologation (sandbox) API base URL.
pub const SANDBOX_BASE_URL: &str = "https://api-pix-h.sicredi.com.br";

/// OAuth2 token endpoint, relative to the base URL.
pub const TOKEN_ENDPOINT: &str = "/oauth/token";

/// Scopes requested on every client-credentials grant.
pub const OAUTH_SCOPES: &str =
    "cob.write cob.read cobv.write cobv.read pix.read webhook.read webhook.write lotecobv.write lotecobv.read";

/// Tokens are treated as stale this long before their real expiry.
pub const TOKEN_REFRESH_BUFFER: Duration = Duration::from_secs(5 * 60);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(15);

/// Resource paths.
pub mod endpoints {
    pub const COB_CREATE: &str = "/api/v2/cob";
    pub const COB_GET: &str = "/api/v3/cob";
    pub const COB_LIST: &str = "/api/v2/cob";
    pub const COBV: &str = "/api/v2/cobv";
    pub const PIX: &str = "/api/v2/pix";
    pub const LOTECOBV: &str = "/api/v2/lotecobv";
    pub const LOC: &str = "/api/v2/loc";
    pub const WEBHOOK: &str = "/api/v2/webhook";
}

pub const TXID_MIN_LENGTH: usize = 26;
pub const TXID_MAX_LENGTH: usize = 35;
pub const TXID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
