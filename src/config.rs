//! Resolves the run configuration from an optional `rockday.yaml` project
//! file, the command-line base URL and built-in defaults.

use crate::catalog::{Catalog, Specimen};
use crate::feed::FeedMode;
use crate::url::BaseUrl;
use crate::util::read_yaml;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The project file looked up in the working directory and its ancestors.
pub const PROJECT_FILE: &str = "rockday.yaml";

/// The feed's file name, relative to the output directory and the base URL.
pub const FEED_FILE: &str = "feed.xml";

/// The index page's file name, relative to the output directory and the base
/// URL.
pub const INDEX_FILE: &str = "index.html";

/// The longest window `days` may ask for.
pub const MAX_DAYS: usize = 366;

const DEFAULT_TITLE: &str = "Rock & Mineral of the Day";
const DEFAULT_DESCRIPTION: &str =
    "Daily geology education featuring a different rock and mineral each day from Wikipedia";

#[derive(Deserialize)]
struct Days(usize);
impl Default for Days {
    fn default() -> Self {
        Days(30)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Project {
    #[serde(default)]
    base_url: Option<BaseUrl>,

    #[serde(default)]
    mode: FeedMode,

    #[serde(default)]
    days: Days,

    #[serde(default)]
    output_directory: Option<PathBuf>,

    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    catalog: Option<PathBuf>,

    #[serde(default)]
    theme: Theme,
}

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Theme {
    #[serde(default)]
    day_template: Option<PathBuf>,

    #[serde(default)]
    index_template: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    rocks: Vec<Specimen>,
    minerals: Vec<Specimen>,
}

/// Site-wide metadata shared by the pages and the feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Site {
    pub base_url: BaseUrl,
    pub title: String,
    pub description: String,
}

impl Site {
    pub fn feed_url(&self) -> String {
        self.base_url.join(FEED_FILE)
    }
}

impl Default for Site {
    fn default() -> Self {
        Site {
            base_url: BaseUrl::default(),
            title: DEFAULT_TITLE.to_owned(),
            description: DEFAULT_DESCRIPTION.to_owned(),
        }
    }
}

/// Everything a run needs, fully resolved.
pub struct Config {
    pub site: Site,
    pub mode: FeedMode,

    /// The number of days covered by the multi-day outputs.
    pub days: usize,

    pub output_directory: PathBuf,
    pub catalog: Catalog,
    pub day_template: Option<PathBuf>,
    pub index_template: Option<PathBuf>,
}

impl Config {
    /// The configuration used when there is no project file: built-in catalog
    /// and templates, multi-day mode, output into `output_directory`.
    pub fn defaults(output_directory: &Path, base_url: Option<BaseUrl>) -> Config {
        Config {
            site: Site {
                base_url: base_url.unwrap_or_default(),
                ..Site::default()
            },
            mode: FeedMode::default(),
            days: Days::default().0,
            output_directory: output_directory.to_owned(),
            catalog: Catalog::builtin(),
            day_template: None,
            index_template: None,
        }
    }

    /// Looks for [`PROJECT_FILE`] in `dir` and then in each of its ancestors.
    /// Without one, [`Config::defaults`] applies with `dir` as the output
    /// directory. A `base_url` given here takes precedence over the project
    /// file's.
    pub fn from_directory(dir: &Path, base_url: Option<BaseUrl>) -> Result<Config> {
        let mut current = Some(dir);
        while let Some(candidate) = current {
            let path = candidate.join(PROJECT_FILE);
            if path.is_file() {
                debug!(path = %path.display(), "found project file");
                return Config::from_project_file(&path, dir, base_url)
                    .with_context(|| format!("Loading configuration `{}`", path.display()));
            }
            current = candidate.parent();
        }
        debug!(dir = %dir.display(), "no project file, using defaults");
        Ok(Config::defaults(dir, base_url))
    }

    /// Loads a specific project file. Relative paths inside it are resolved
    /// against the file's directory, except that a missing
    /// `output_directory` means `working_directory`.
    pub fn from_project_file(
        path: &Path,
        working_directory: &Path,
        base_url: Option<BaseUrl>,
    ) -> Result<Config> {
        let project: Project = read_yaml(path, "project")?;
        let project_root = path.parent().ok_or_else(|| {
            anyhow!(
                "Can't get parent directory for provided project file path '{}'",
                path.display()
            )
        })?;

        if project.days.0 < 1 || project.days.0 > MAX_DAYS {
            return Err(anyhow!(
                "`days` must be between 1 and {}, got {}",
                MAX_DAYS,
                project.days.0
            ));
        }

        let catalog = match &project.catalog {
            None => Catalog::builtin(),
            Some(relpath) => load_catalog(&project_root.join(relpath))?,
        };

        let defaults = Site::default();
        Ok(Config {
            site: Site {
                base_url: base_url.or(project.base_url).unwrap_or_default(),
                title: project.title.unwrap_or(defaults.title),
                description: project.description.unwrap_or(defaults.description),
            },
            mode: project.mode,
            days: project.days.0,
            output_directory: match project.output_directory {
                Some(relpath) => project_root.join(relpath),
                None => working_directory.to_owned(),
            },
            catalog,
            day_template: project.theme.day_template.map(|p| project_root.join(p)),
            index_template: project.theme.index_template.map(|p| project_root.join(p)),
        })
    }
}

/// Loads a catalog file (`rocks` and `minerals` lists of `name` and
/// `description`), rejecting empty lists.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let file: CatalogFile = read_yaml(path, "catalog")?;
    Catalog::new(file.rocks, file.minerals)
        .with_context(|| format!("Loading catalog `{}`", path.display()))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_project_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = Config::from_directory(dir.path(), None)?;
        assert_eq!(crate::url::DEFAULT_BASE_URL, config.site.base_url.as_str());
        assert_eq!(FeedMode::Multi, config.mode);
        assert_eq!(30, config.days);
        assert_eq!(dir.path(), config.output_directory);
        assert_eq!("Rock & Mineral of the Day", config.site.title);
        assert_eq!(30, config.catalog.rocks().len());
        Ok(())
    }

    #[test]
    fn test_cli_base_url_wins() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), PROJECT_FILE, "base_url: https://from-file.example\n");
        let config =
            Config::from_directory(dir.path(), Some(BaseUrl::parse("https://cli.example")?))?;
        assert_eq!("https://cli.example", config.site.base_url.as_str());

        let config = Config::from_directory(dir.path(), None)?;
        assert_eq!("https://from-file.example", config.site.base_url.as_str());
        Ok(())
    }

    #[test]
    fn test_project_file_in_ancestor() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(
            dir.path(),
            PROJECT_FILE,
            "mode: single\ntitle: Rocks\noutput_directory: public\ntheme:\n  day_template: theme/day.html\n",
        );
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested)?;

        let config = Config::from_directory(&nested, None)?;
        assert_eq!(FeedMode::Single, config.mode);
        assert_eq!("Rocks", config.site.title);
        assert_eq!(dir.path().join("public"), config.output_directory);
        assert_eq!(Some(dir.path().join("theme/day.html")), config.day_template);
        assert_eq!(None, config.index_template);
        Ok(())
    }

    #[test]
    fn test_empty_project_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), PROJECT_FILE, "");
        let config = Config::from_directory(dir.path(), None)?;
        assert_eq!(FeedMode::Multi, config.mode);
        assert_eq!(dir.path(), config.output_directory);
        Ok(())
    }

    #[test]
    fn test_invalid_project_files() -> Result<()> {
        for contents in &[
            "days: 0\n",
            "days: 367\n",
            "days: 400000000\n",
            "mode: weekly\n",
            "base_url: not-a-url\n",
            "colour: blue\n",
        ] {
            let dir = tempfile::tempdir()?;
            write(dir.path(), PROJECT_FILE, contents);
            assert!(
                Config::from_directory(dir.path(), None).is_err(),
                "accepted {:?}",
                contents
            );
        }
        Ok(())
    }

    #[test]
    fn test_custom_catalog() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), PROJECT_FILE, "catalog: specimens.yaml\ndays: 7\n");
        write(
            dir.path(),
            "specimens.yaml",
            "rocks:\n  - name: Tuff\n    description: Ash.\nminerals:\n  - name: Talc\n    description: Soft.\n",
        );
        let config = Config::from_directory(dir.path(), None)?;
        assert_eq!(7, config.days);
        assert_eq!(vec![Specimen::new("Tuff", "Ash.")], config.catalog.rocks());
        assert_eq!("Talc", config.catalog.minerals()[0].name);
        Ok(())
    }

    #[test]
    fn test_empty_catalog_is_fatal() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), PROJECT_FILE, "catalog: specimens.yaml\n");
        write(
            dir.path(),
            "specimens.yaml",
            "rocks: []\nminerals:\n  - name: Talc\n    description: Soft.\n",
        );
        let err = Config::from_directory(dir.path(), None).err().unwrap();
        assert!(format!("{:#}", err).contains("Catalog has no rocks"));
        Ok(())
    }
}
