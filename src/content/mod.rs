//! Loading the page content from `content/*.toml`.
//!
//! | File               | Holds                                  |
//! |--------------------|----------------------------------------|
//! | `projects.toml`    | `[[projects]]` of the navigation panel |
//! | `reading.toml`     | `[[reading]]` list                     |
//! | `exploration.toml` | `[[exploration]]` topics               |
//! | `workshop.toml`    | `[[projects]]` showcase cards          |
//! | `site.toml`        | section copy, see [`SiteCopy`]         |
//!
//! A missing file falls back to the copy embedded in the binary, which is
//! also what `folio init` writes out.

mod copy;

pub use copy::{ContactCopy, CraftCopy, Insight, IntroCopy, PersonalCopy, Pillar, SiteCopy, WorkshopCopy};

use folio_core::{Catalog, ExplorationTopic, Project, ReadingItem, WorkshopProject};
use rustc_hash::FxHashSet;
use serde::{Deserialize, de::DeserializeOwned};
use std::{
    borrow::Cow,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid content in `{path}`")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate id `{id}` in {collection}")]
    DuplicateId { collection: &'static str, id: String },
}

/// A content file and its embedded fallback.
pub struct ContentFile {
    pub name: &'static str,
    pub default: &'static str,
}

pub const PROJECTS: ContentFile = ContentFile {
    name: "projects.toml",
    default: include_str!("../embed/content/projects.toml"),
};
pub const READING: ContentFile = ContentFile {
    name: "reading.toml",
    default: include_str!("../embed/content/reading.toml"),
};
pub const EXPLORATION: ContentFile = ContentFile {
    name: "exploration.toml",
    default: include_str!("../embed/content/exploration.toml"),
};
pub const WORKSHOP: ContentFile = ContentFile {
    name: "workshop.toml",
    default: include_str!("../embed/content/workshop.toml"),
};
pub const SITE: ContentFile = ContentFile {
    name: "site.toml",
    default: include_str!("../embed/content/site.toml"),
};

pub const CONTENT_FILES: [&ContentFile; 5] = [&PROJECTS, &READING, &EXPLORATION, &WORKSHOP, &SITE];

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectsFile {
    #[serde(default)]
    projects: Vec<Project>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ReadingFile {
    #[serde(default)]
    reading: Vec<ReadingItem>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExplorationFile {
    #[serde(default)]
    exploration: Vec<ExplorationTopic>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkshopFile {
    #[serde(default)]
    projects: Vec<WorkshopProject>,
}

/// Everything the page renders besides `folio.toml`.
#[derive(Debug, Clone)]
pub struct SiteContent {
    pub catalog: Catalog,
    pub workshop: Vec<WorkshopProject>,
    pub copy: SiteCopy,
}

impl SiteContent {
    pub fn load(dir: &Path) -> Result<Self, ContentError> {
        let ProjectsFile { projects } = read(dir, &PROJECTS)?;
        let ReadingFile { reading } = read(dir, &READING)?;
        let ExplorationFile { exploration } = read(dir, &EXPLORATION)?;
        let WorkshopFile { projects: workshop } = read(dir, &WORKSHOP)?;
        let copy: SiteCopy = read(dir, &SITE)?;

        ensure_unique("projects", projects.iter().map(|p| p.id.as_str()))?;
        ensure_unique("reading", reading.iter().map(|r| r.id.as_str()))?;
        ensure_unique("exploration", exploration.iter().map(|t| t.id.as_str()))?;
        ensure_unique("workshop", workshop.iter().map(|w| w.id.as_str()))?;

        Ok(Self {
            catalog: Catalog {
                projects,
                reading,
                exploration,
            },
            workshop,
            copy,
        })
    }

    /// The embedded content alone.
    pub fn embedded() -> Result<Self, ContentError> {
        Self::load(Path::new(""))
    }
}

fn read<T: DeserializeOwned>(dir: &Path, file: &ContentFile) -> Result<T, ContentError> {
    let path = dir.join(file.name);
    let text = if dir.as_os_str().is_empty() {
        Cow::Borrowed(file.default)
    } else {
        match fs::read_to_string(&path) {
            Ok(text) => Cow::Owned(text),
            Err(err) if err.kind() == ErrorKind::NotFound => Cow::Borrowed(file.default),
            Err(err) => return Err(ContentError::Io(path, err)),
        }
    };
    toml::from_str(&text).map_err(|source| ContentError::Toml { path, source })
}

fn ensure_unique<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ContentError> {
    let mut seen = FxHashSet::default();
    for id in ids {
        if !seen.insert(id) {
            return Err(ContentError::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
