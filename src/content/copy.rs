//! Copy of the decorative sections (`site.toml`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteCopy {
    pub intro: IntroCopy,
    pub craft: CraftCopy,
    pub workshop: WorkshopCopy,
    pub personal: PersonalCopy,
    pub contact: ContactCopy,
}

/// "Hi, I'm <name>" followed by the tagline with one highlighted word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntroCopy {
    pub greeting: String,
    pub name: String,
    pub tagline: String,
    pub highlight: String,
    #[serde(default)]
    pub tagline_end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CraftCopy {
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub pillars: Vec<Pillar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pillar {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkshopCopy {
    pub title: String,
    pub subtitle: String,
    pub wip_title: String,
    pub wip_description: String,
    #[serde(default)]
    pub wip_status: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonalCopy {
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub insights: Vec<Insight>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insight {
    pub title: String,
    pub content: String,
}

/// Call to action. The address itself is `[base] email` in folio.toml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactCopy {
    pub heading: String,
    pub highlight: String,
    pub blurb: String,
    pub copied: String,
    pub footer: String,
}
