//! `[base]` section configuration.
//!
//! Who the portfolio belongs to and where it is published.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in folio.toml - site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Alex Chen"
/// description = "Software engineer crafting human-first tech"
/// email = "alex@chen.dev"
/// url = "https://chen.dev"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Page title shown in the browser tab.
    pub title: String,

    /// Meta description for search engines and link previews.
    pub description: String,

    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Address behind the "copy my email" button.
    #[serde(default = "defaults::base::email")]
    #[educe(Default = defaults::base::email())]
    pub email: String,

    /// Public URL, used for the canonical link.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// BCP 47 language code for `<html lang>`.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,
}
