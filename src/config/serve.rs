//! `[serve]`: the local preview server behind `folio serve`.

use super::{ConfigError, defaults};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Where the preview server listens, and whether edits trigger a rebuild.
///
/// ```toml
/// [serve]
/// interface = "0.0.0.0"   # preview from a phone on the same network
/// port = 3000             # the following ports are tried when taken
/// watch = false           # build once, then only serve
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// IP address to bind; hostnames are rejected by [`ServeConfig::ip`].
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// First port tried.
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// Re-render the page when folio.toml or content changes, and copy
    /// changed assets.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub watch: bool,
}

impl ServeConfig {
    /// `interface` as an address the server can bind.
    pub fn ip(&self) -> Result<IpAddr, ConfigError> {
        self.interface
            .parse()
            .map_err(|_| ConfigError::invalid("serve.interface", format!("`{}` is not an IP address", self.interface)))
    }
}
