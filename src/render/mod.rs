//! Rendering the single page.
//!
//! ```text
//! <head>     title, description, canonical url, inline style
//! <body>     panel launcher + panel
//!            hero → intro → craft → workshop → personal → contact
//!            inline script
//! ```
//!
//! Everything is plain string building. Text from config and content is
//! escaped at the point it is interpolated.

mod hero;
mod panel;
mod sections;

use crate::{config::SiteConfig, content::SiteContent, utils::html::escape};
use folio_core::{ExplorationTopic, Project, ReadingItem, WorkshopProject};
use serde::Serialize;

const STYLE: &str = include_str!("../embed/page/style.css");
const SCRIPT: &str = include_str!("../embed/page/folio.js");

pub fn render_page(config: &SiteConfig, content: &SiteContent) -> String {
    let base = &config.base;
    let canonical = base
        .url
        .as_deref()
        .map(|url| format!(r#"<link rel="canonical" href="{}/">"#, escape(url)))
        .unwrap_or_default();
    let copy = &content.copy;

    format!(
        r#"<!DOCTYPE html><html lang="{lang}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title}</title><meta name="description" content="{description}"><meta name="author" content="{author}">{canonical}<style>{STYLE}</style></head><body>{panel}<main>{hero}{intro}{craft}{workshop}{personal}{contact}</main><script>{SCRIPT}</script></body></html>"#,
        lang = escape(&base.language),
        title = escape(&base.title),
        description = escape(&base.description),
        author = escape(&base.author),
        panel = panel::render(config, &content.catalog),
        hero = hero::render(config),
        intro = sections::intro(&copy.intro),
        craft = sections::craft(&copy.craft),
        workshop = sections::workshop(&copy.workshop, &content.workshop),
        personal = sections::personal(&copy.personal),
        contact = sections::contact(&copy.contact, &base.email),
    )
}

/// Machine-readable copy of the content, written to `_data/catalog.json`.
#[derive(Serialize)]
struct DataExport<'a> {
    projects: &'a [Project],
    reading: &'a [ReadingItem],
    exploration: &'a [ExplorationTopic],
    workshop: &'a [WorkshopProject],
}

pub fn catalog_json(content: &SiteContent, pretty: bool) -> serde_json::Result<Vec<u8>> {
    let data = DataExport {
        projects: &content.catalog.projects,
        reading: &content.catalog.reading,
        exploration: &content.catalog.exploration,
        workshop: &content.workshop,
    };
    if pretty {
        serde_json::to_vec_pretty(&data)
    } else {
        serde_json::to_vec(&data)
    }
}
