//! Classifying changed paths for watch mode.
//!
//! | Category | Rebuild                         | Example                 |
//! |----------|---------------------------------|-------------------------|
//! | Config   | reload `folio.toml`, then page  | `folio.toml`            |
//! | Content  | page                            | `content/reading.toml`  |
//! | Asset    | copy the single file            | `assets/avatar.png`     |
//! | Unknown  | ignored                         | `public/index.html`     |

use crate::config::SiteConfig;
use std::{
    env,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Config,
    Content,
    Asset,
    Unknown,
}

impl FileCategory {
    /// Short name used in watch logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Content => "content",
            Self::Asset => "assets",
            Self::Unknown => "unknown",
        }
    }

    /// Whether a change means re-rendering the page.
    pub const fn rerenders(self) -> bool {
        matches!(self, Self::Config | Self::Content)
    }
}

pub fn categorize_path(path: &Path, config: &SiteConfig) -> FileCategory {
    let path = normalize_path(path);

    // Output may live inside the root; never react to our own writes.
    if path.starts_with(&config.build.output) {
        FileCategory::Unknown
    } else if path == config.config_path {
        FileCategory::Config
    } else if path.starts_with(&config.build.content) {
        FileCategory::Content
    } else if path.starts_with(&config.build.assets) {
        FileCategory::Asset
    } else {
        FileCategory::Unknown
    }
}

/// Absolute form of `path`; canonical when it exists.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.config_path = PathBuf::from("/site/folio.toml");
        config.build.content = PathBuf::from("/site/content");
        config.build.assets = PathBuf::from("/site/assets");
        config.build.output = PathBuf::from("/site/public");
        config
    }

    #[test]
    fn test_categorize_path() {
        let config = config();
        let cases = [
            ("/site/folio.toml", FileCategory::Config),
            ("/site/content/reading.toml", FileCategory::Content),
            ("/site/assets/img/avatar.png", FileCategory::Asset),
            ("/site/public/index.html", FileCategory::Unknown),
            ("/elsewhere/notes.md", FileCategory::Unknown),
        ];
        for (path, expected) in cases {
            assert_eq!(categorize_path(Path::new(path), &config), expected, "{path}");
        }
    }

    #[test]
    fn test_rerenders() {
        assert!(FileCategory::Config.rerenders());
        assert!(FileCategory::Content.rerenders());
        assert!(!FileCategory::Asset.rerenders());
        assert!(!FileCategory::Unknown.rerenders());
        assert_eq!(FileCategory::Asset.name(), "assets");
    }

    #[test]
    fn test_normalize_path_is_absolute() {
        assert!(normalize_path(Path::new("relative/file.txt")).is_absolute());
        assert_eq!(
            normalize_path(Path::new("/no/such/file.txt")),
            PathBuf::from("/no/such/file.txt")
        );
    }
}
