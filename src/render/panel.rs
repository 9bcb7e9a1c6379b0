//! The slide-in navigation panel.
//!
//! Sections and items are `<details>` elements keyed by their composite
//! key (`project-1`, `reading-2`, ...), so expansion works without the
//! script. The reading list is emitted in the configured default order;
//! every item also carries its rank under each sort key and a lowercased
//! search haystack, so the script only has to reorder and hide.

use crate::{config::SiteConfig, utils::html::escape};
use folio_core::{
    Catalog, ExplorationTopic, ItemKey, Project, ReadingItem, ReadingQuery, Section, SortKey,
    reading_view,
};
use rustc_hash::FxHashMap;

pub fn render(config: &SiteConfig, catalog: &Catalog) -> String {
    let panel = &config.panel;
    let sections: String = Section::ALL
        .into_iter()
        .map(|section| render_section(section, catalog, panel.sort))
        .collect();

    format!(
        r#"<button id="panel-launcher" class="panel-launcher" aria-label="Open navigation panel" aria-expanded="false"><span></span><span></span><span></span></button><aside id="panel" class="panel" hidden data-entry-delay="{entry}" data-clock-interval="{interval}"><header class="panel-header"><div class="panel-title"><h3>Navigation</h3><span class="panel-live"></span><button class="panel-close" aria-label="Close navigation panel">&times;</button></div><p class="panel-clock">Local time: <time id="panel-time"></time></p></header><div class="panel-body">{sections}</div></aside>"#,
        entry = panel.entry_delay_ms,
        interval = panel.clock_interval_ms,
    )
}

fn render_section(section: Section, catalog: &Catalog, sort: SortKey) -> String {
    let body = match section {
        Section::Projects => catalog.projects.iter().map(project_item).collect(),
        Section::Reading => reading_body(&catalog.reading, sort),
        Section::Exploration => catalog.exploration.iter().map(exploration_item).collect(),
    };

    format!(
        r#"<details class="panel-section" data-section="{name}"><summary>{title}</summary><div class="section-body">{body}</div></details>"#,
        name = section.name(),
        title = section.title(),
    )
}

fn project_item(project: &Project) -> String {
    let (shown, hidden) = project.tech_preview();
    let mut chips: String = shown
        .iter()
        .map(|tech| format!(r#"<span class="chip">{}</span>"#, escape(tech)))
        .collect();
    if hidden > 0 {
        chips.push_str(&format!(r#"<span class="chip chip-more">+{hidden}</span>"#));
    }

    let completed = project
        .completed_on()
        .map(|date| {
            format!(
                r#"<span>Completed: <time datetime="{date}">{short}</time></span>"#,
                date = project.completion_date,
                short = date.to_short_us(),
            )
        })
        .unwrap_or_default();

    format!(
        r#"<details class="panel-item" data-key="{key}"><summary><h4>{title}</h4><span class="dot status-{status}"></span></summary><div class="chips">{chips}</div><div class="item-body"><p>{description}</p><div class="item-meta">{completed}<span class="badge status-{status}">{status}</span></div></div></details>"#,
        key = ItemKey::project(&project.id),
        title = escape(&project.title),
        status = project.status,
        description = escape(&project.description),
    )
}

fn reading_body(reading: &[ReadingItem], sort: SortKey) -> String {
    // Rank of every item under each key, by catalog index.
    let ranks: Vec<FxHashMap<&str, usize>> = SortKey::ALL
        .into_iter()
        .map(|key| {
            reading_view(reading, &ReadingQuery::new("", key))
                .into_iter()
                .enumerate()
                .map(|(rank, item)| (item.id.as_str(), rank))
                .collect()
        })
        .collect();

    let options: String = SortKey::ALL
        .into_iter()
        .map(|key| {
            let selected = if key == sort { " selected" } else { "" };
            format!(r#"<option value="{key}"{selected}>{}</option>"#, key.label())
        })
        .collect();

    let items: String = reading_view(reading, &ReadingQuery::new("", sort))
        .into_iter()
        .map(|item| {
            let rank = |i: usize| ranks[i].get(item.id.as_str()).copied().unwrap_or_default();
            reading_item(item, [rank(0), rank(1), rank(2)])
        })
        .collect();

    format!(
        r#"<div class="reading-controls"><input type="search" class="reading-search" placeholder="Search books..." aria-label="Search books"><select class="reading-sort" aria-label="Sort reading list">{options}</select></div><div class="reading-list">{items}</div><p class="reading-empty" hidden>No matching books</p>"#
    )
}

fn reading_item(item: &ReadingItem, [by_date, by_category, by_status]: [usize; 3]) -> String {
    let haystack = [&item.title, &item.author, &item.category]
        .map(|field| field.to_lowercase())
        .join("\n");

    format!(
        r#"<details class="panel-item reading-item" data-key="{key}" data-search="{haystack}" data-rank-date="{by_date}" data-rank-category="{by_category}" data-rank-status="{by_status}"><summary><h4>{title}</h4></summary><div class="item-meta"><span>by {author}</span><span class="badge status-{status}">{label}</span></div><span class="chip chip-category">{category}</span><div class="item-body"><p>{summary}</p></div></details>"#,
        key = ItemKey::reading(&item.id),
        haystack = escape(&haystack),
        title = escape(&item.title),
        author = escape(&item.author),
        status = item.status,
        label = item.status.label(),
        category = escape(&item.category),
        summary = escape(&item.summary),
    )
}

fn exploration_item(topic: &ExplorationTopic) -> String {
    let progress = topic
        .progress
        .as_deref()
        .map(|p| format!(r#"<p class="progress">{}</p>"#, escape(p)))
        .unwrap_or_default();

    format!(
        r#"<details class="panel-item" data-key="{key}"><summary><span class="topic-icon topic-{kind}"></span><h4>{title}</h4></summary><span class="chip chip-topic">{kind}</span><div class="item-body"><p>{description}</p>{progress}</div></details>"#,
        key = ItemKey::exploration(&topic.id),
        kind = topic.kind,
        title = escape(&topic.title),
        description = escape(&topic.description),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SiteContent;

    fn page(sort: SortKey) -> String {
        let mut config = SiteConfig::default();
        config.panel.sort = sort;
        render(&config, &SiteContent::embedded().unwrap().catalog)
    }

    fn position(html: &str, needle: &str) -> usize {
        html.find(needle).unwrap_or_else(|| panic!("missing {needle}"))
    }

    #[test]
    fn test_sections_and_keys() {
        let html = page(SortKey::Date);
        for section in ["projects", "reading", "exploration"] {
            assert!(html.contains(&format!(r#"data-section="{section}""#)));
        }
        assert!(html.contains(r#"data-key="project-4""#));
        assert!(html.contains(r#"data-key="reading-2""#));
        assert!(html.contains(r#"data-key="exploration-3""#));
        // Collapsed on first render.
        assert!(!html.contains("<details open"));
    }

    #[test]
    fn test_reading_in_default_order() {
        let html = page(SortKey::Date);
        let newest = position(&html, "Designing for the Mind");
        let middle = position(&html, "Clean Architecture");
        let oldest = position(&html, "The Art of Readable Code");
        assert!(newest < middle && middle < oldest);
        assert!(html.contains(r#"<option value="date" selected>Sort by Date</option>"#));
    }

    #[test]
    fn test_reading_in_category_order() {
        let html = page(SortKey::Category);
        let programming = position(&html, "The Art of Readable Code");
        let software = position(&html, "Clean Architecture");
        let ux = position(&html, "Designing for the Mind");
        assert!(programming < software && software < ux);
    }

    #[test]
    fn test_reading_ranks() {
        let html = page(SortKey::Date);
        // Clean Architecture: 2nd newest, 2nd by category, 1st by status.
        assert!(html.contains(
            r#"data-rank-date="1" data-rank-category="1" data-rank-status="0""#
        ));
        assert!(html.contains("data-search=\"clean architecture\nrobert c. martin\nsoftware engineering\""));
    }

    #[test]
    fn test_tech_chip_overflow() {
        let html = page(SortKey::Date);
        // 5 technologies on the editor project: two chips plus +3.
        assert!(html.contains(r#"<span class="chip chip-more">+3</span>"#));
        assert!(html.contains(r#"<span class="chip chip-more">+2</span>"#));
        assert!(html.contains(r#"<span class="chip chip-more">+1</span>"#));
    }

    #[test]
    fn test_completion_date_only_when_dated() {
        let html = page(SortKey::Date);
        assert!(html.contains(r#"<time datetime="2024-04-10">4/10/2024</time>"#));
        assert_eq!(html.matches("Completed: ").count(), 3);
    }

    #[test]
    fn test_panel_timings() {
        let html = page(SortKey::Date);
        assert!(html.contains(r#"data-entry-delay="10" data-clock-interval="1000""#));
        assert!(html.contains("Local time: "));
    }
}
