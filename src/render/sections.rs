//! The decorative sections between the hero and the footer.

use crate::{
    content::{ContactCopy, CraftCopy, IntroCopy, PersonalCopy, WorkshopCopy},
    utils::html::{escape, thousands},
};
use folio_core::{
    CategoryFilter, PreviewKind, ProjectStats, WorkshopProject, counter,
    showcase::PREVIEW_CHAR_DELAY_MS,
};

pub fn intro(copy: &IntroCopy) -> String {
    format!(
        r#"<section id="intro" class="intro reveal"><h1>{greeting} <span class="gradient">{name}</span></h1><p class="tagline">{tagline} <span class="accent">{highlight}</span> {end}</p><div class="orb"><div></div><div></div><div></div></div></section>"#,
        greeting = escape(&copy.greeting),
        name = escape(&copy.name),
        tagline = escape(&copy.tagline),
        highlight = escape(&copy.highlight),
        end = escape(&copy.tagline_end),
    )
}

pub fn craft(copy: &CraftCopy) -> String {
    let pillars: String = copy
        .pillars
        .iter()
        .map(|pillar| {
            format!(
                r#"<div class="pillar"><h3>{}</h3><p>{}</p></div>"#,
                escape(&pillar.title),
                escape(&pillar.description)
            )
        })
        .collect();

    format!(
        r#"<section id="craft" class="craft reveal"><h2>{title}</h2><p class="subtitle">{subtitle}</p><div class="pillars">{pillars}</div></section>"#,
        title = escape(&copy.title),
        subtitle = escape(&copy.subtitle),
    )
}

// ============================================================================
// Workshop
// ============================================================================

pub fn workshop(copy: &WorkshopCopy, projects: &[WorkshopProject]) -> String {
    let filters: String = CategoryFilter::ALL
        .into_iter()
        .map(|filter| {
            let pressed = filter == CategoryFilter::All;
            format!(
                r#"<button class="filter" data-filter="{filter}" aria-pressed="{pressed}">{filter}</button>"#
            )
        })
        .collect();
    let cards: String = projects.iter().map(card).collect();
    let modals: String = projects.iter().map(modal).collect();
    let wip: String = copy
        .wip_status
        .iter()
        .map(|line| format!("<li>{}</li>", escape(line)))
        .collect();

    format!(
        r#"<section id="workshop" class="workshop reveal"><h2>{title}</h2><p class="subtitle">{subtitle}</p><div class="filters">{filters}</div><div class="cards">{cards}</div><div class="wip"><h3>{wip_title}</h3><p>{wip_description}</p><ul>{wip}</ul></div>{modals}</section>"#,
        title = escape(&copy.title),
        subtitle = escape(&copy.subtitle),
        wip_title = escape(&copy.wip_title),
        wip_description = escape(&copy.wip_description),
    )
}

/// An animated number. Renders the final value; the script counts up to
/// `data-target` once the element is half visible.
fn counter_span(value: u64) -> String {
    format!(
        r#"<span class="counter" data-target="{value}" data-duration="{duration}">{shown}</span>"#,
        duration = counter::DEFAULT_DURATION_MS,
        shown = thousands(value),
    )
}

fn card(project: &WorkshopProject) -> String {
    let badges: String = project
        .tech_stack
        .iter()
        .map(|tech| format!(r#"<span class="tech">{}</span>"#, escape(tech)))
        .collect();

    let preview = match project.preview_type {
        PreviewKind::Terminal => format!(
            r#"<div class="preview preview-terminal" data-preview="{content}" data-speed="{PREVIEW_CHAR_DELAY_MS}"><div class="lights"><i></i><i></i><i></i></div><code>$ <span class="typed"></span><span class="cursor">|</span></code></div>"#,
            content = escape(&project.preview_content),
        ),
        kind => format!(r#"<div class="preview preview-{kind}"></div>"#),
    };

    format!(
        r#"<article class="card" data-id="{id}" data-category="{category}" tabindex="0"><span class="dot status-{status}"></span><h3>{title}</h3><div class="techs">{badges}</div><div class="preview-box">{preview}<div class="overlay">Click to explore</div></div><p>{synopsis}</p><blockquote>"{challenge}"</blockquote>{stats}<div class="actions">{links}</div></article>"#,
        id = escape(&project.id),
        category = project.category,
        status = project.status,
        title = escape(&project.title),
        synopsis = escape(&project.synopsis),
        challenge = escape(&project.challenge),
        stats = card_stats(&project.stats),
        links = links(project, "Code", "Live"),
    )
}

fn card_stats(stats: &ProjectStats) -> String {
    format!(
        r#"<dl class="stats"><div><dt>Lines</dt><dd>{lines}</dd></div><div><dt>Features</dt><dd>{features}</dd></div><div><dt>Time</dt><dd>{time}</dd></div><div><dt>Bugs</dt><dd>{bugs}</dd></div></dl>"#,
        lines = counter_span(stats.lines_of_code),
        features = counter_span(stats.features),
        time = escape(&stats.time_to_build),
        bugs = counter_span(stats.bugs_squashed),
    )
}

fn links(project: &WorkshopProject, code: &str, live: &str) -> String {
    let mut out = String::new();
    if let Some(url) = &project.github_url {
        out.push_str(&format!(
            r#"<a class="link-code" href="{}" target="_blank" rel="noopener">{code}</a>"#,
            escape(url)
        ));
    }
    if let Some(url) = &project.live_url {
        out.push_str(&format!(
            r#"<a class="link-live" href="{}" target="_blank" rel="noopener">{live}</a>"#,
            escape(url)
        ));
    }
    out
}

fn modal(project: &WorkshopProject) -> String {
    let stats = &project.stats;
    let users = stats
        .users_impacted
        .map(|n| format!("<div><dt>Users Impacted</dt><dd>{}</dd></div>", thousands(n)))
        .unwrap_or_default();
    let techs: String = project
        .tech_stack
        .iter()
        .map(|tech| format!(r#"<span class="tech">{}</span>"#, escape(tech)))
        .collect();

    format!(
        r#"<dialog class="project-modal" id="modal-{id}" aria-labelledby="modal-{id}-title"><button class="modal-close" aria-label="Close">&times;</button><h2 id="modal-{id}-title">{title}</h2><div class="techs">{techs}</div><dl class="stats"><div><dt>Lines of Code</dt><dd>{lines}</dd></div><div><dt>Features</dt><dd>{features}</dd></div><div><dt>Build Time</dt><dd>{time}</dd></div><div><dt>Bugs Squashed</dt><dd>{bugs}</dd></div>{users}</dl><h3>The Problem</h3><p>{problem}</p><h3>My Approach</h3><p>{approach}</p><h3>Technical Challenges</h3><p>{challenges}</p><h3>Outcome &amp; Impact</h3><p>{outcome}</p><div class="actions">{links}</div></dialog>"#,
        id = escape(&project.id),
        title = escape(&project.title),
        lines = thousands(stats.lines_of_code),
        features = stats.features,
        time = escape(&stats.time_to_build),
        bugs = stats.bugs_squashed,
        problem = escape(project.problem()),
        approach = escape(project.approach()),
        challenges = escape(project.challenges()),
        outcome = escape(project.outcome()),
        links = links(project, "View Code", "Live Demo"),
    )
}

// ============================================================================
// Personal & Contact
// ============================================================================

pub fn personal(copy: &PersonalCopy) -> String {
    let insights: String = copy
        .insights
        .iter()
        .enumerate()
        .map(|(i, insight)| {
            format!(
                r#"<div class="insight" data-index="{i}"><h3>{}</h3><p>{}</p></div>"#,
                escape(&insight.title),
                escape(&insight.content)
            )
        })
        .collect();

    format!(
        r#"<section id="personal" class="personal reveal"><h2>{title}</h2><p class="subtitle">{subtitle}</p><div class="insights">{insights}</div></section>"#,
        title = escape(&copy.title),
        subtitle = escape(&copy.subtitle),
    )
}

pub fn contact(copy: &ContactCopy, email: &str) -> String {
    format!(
        r#"<section id="contact" class="contact reveal"><h2>{heading} <span class="gradient">{highlight}</span>?</h2><p>{blurb}</p><button class="copy-email" data-email="{email}" data-reset="{reset}"><span>{email}</span><i class="copy-icon"></i></button><p class="copied" hidden>{copied}</p><div class="footer"><p>{footer}</p><div class="footer-line"></div></div></section>"#,
        heading = escape(&copy.heading),
        highlight = escape(&copy.highlight),
        blurb = escape(&copy.blurb),
        email = escape(email),
        reset = folio_core::contact::COPIED_RESET_MS,
        copied = escape(&copy.copied),
        footer = escape(&copy.footer),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SiteContent;

    fn content() -> SiteContent {
        SiteContent::embedded().unwrap()
    }

    #[test]
    fn test_intro() {
        let html = intro(&content().copy.intro);
        assert!(html.contains(r#"Hi, I&#39;m <span class="gradient">Alex Chen</span>"#));
        assert!(html.contains(r#"<span class="accent">human-first</span> tech"#));
    }

    #[test]
    fn test_craft_pillars() {
        let html = craft(&content().copy.craft);
        assert!(html.contains("Craft &gt; Code"));
        assert_eq!(html.matches(r#"class="pillar""#).count(), 3);
    }

    #[test]
    fn test_workshop_filters_and_cards() {
        let content = content();
        let html = workshop(&content.copy.workshop, &content.workshop);

        for filter in ["all", "frontend", "backend", "fullstack"] {
            assert!(html.contains(&format!(r#"data-filter="{filter}""#)));
        }
        assert!(html.contains(r#"data-filter="all" aria-pressed="true""#));
        assert_eq!(html.matches(r#"<article class="card""#).count(), 4);
        assert_eq!(html.matches(r#"<dialog class="project-modal""#).count(), 4);
        assert_eq!(html.matches("<li>").count(), 4);
    }

    #[test]
    fn test_card_counters() {
        let content = content();
        let html = card(&content.workshop[0]);
        assert!(html.contains(r#"data-target="8200" data-duration="2000">8,200</span>"#));
        assert!(html.contains("<dd>1 month</dd>"));
        assert!(html.contains(r#"data-speed="50""#));
        assert!(html.contains("link-live"));
    }

    #[test]
    fn test_card_without_live_url() {
        let content = content();
        let html = card(&content.workshop[1]);
        assert!(html.contains("link-code"));
        assert!(!html.contains("link-live"));
    }

    #[test]
    fn test_non_terminal_preview_is_static() {
        let mut project = content().workshop[0].clone();
        project.preview_type = PreviewKind::Image;
        let html = card(&project);
        assert!(html.contains(r#"class="preview preview-image""#));
        assert!(!html.contains("data-preview="));
    }

    #[test]
    fn test_modal_default_texts() {
        let content = content();
        let project = &content.workshop[0];
        let html = modal(project);
        assert!(html.contains(&escape(project.problem())));
        assert!(html.contains("<dt>Users Impacted</dt><dd>500</dd>"));
        assert!(!modal(&content.workshop[1]).contains("Users Impacted"));
    }

    #[test]
    fn test_personal_insights() {
        let html = personal(&content().copy.personal);
        assert!(html.contains(r#"data-index="2""#));
        assert!(html.contains("How I Collaborate"));
    }

    #[test]
    fn test_contact() {
        let html = contact(&content().copy.contact, "alex@chen.dev");
        assert!(html.contains(r#"data-email="alex@chen.dev" data-reset="2000""#));
        assert!(html.contains("Email copied to clipboard!"));
        assert!(html.contains("Still scrolling?"));
    }
}
