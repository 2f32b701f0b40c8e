//! Exports the [`build_site`] function which stitches together the high-level
//! steps of a run: selecting the specimens for each date of interest
//! ([`crate::catalog`]), rendering the day and index pages ([`crate::page`])
//! and the feed ([`crate::feed`]), and writing everything to disk
//! ([`crate::write`]).

use crate::catalog::{recent_dates, DaySelection};
use crate::config::{Config, FEED_FILE, INDEX_FILE};
use crate::feed::{render_feed, Error as FeedError, FeedMode};
use crate::page::{page_file_name, Error as PageError, Theme};
use crate::write::{write_outputs, Error as WriteError, OutputFile};
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// What a run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    /// Today's rock.
    pub rock: String,

    /// Today's mineral.
    pub mineral: String,

    /// Every file written, in write order.
    pub written: Vec<PathBuf>,
}

/// Builds every output for the run described by `config`. All dates derive
/// from `now`, so two runs with the same `now` write byte-identical files.
///
/// In [`FeedMode::Single`] only `feed.xml` is written. In [`FeedMode::Multi`]
/// the last `config.days` days (today included) each get a page, and the
/// index page and the feed list the same days.
pub fn build_site(config: &Config, now: DateTime<Utc>) -> Result<Report> {
    let today = now.date_naive();
    let dates = match config.mode {
        FeedMode::Single => vec![today],
        FeedMode::Multi => recent_dates(today, config.days),
    };
    let selections = config.catalog.select_all(&dates);
    let todays = config.catalog.select(today);
    info!(
        date = %today,
        rock = %todays.rock.name,
        mineral = %todays.mineral.name,
        "selected today's specimens"
    );

    let mut outputs = match config.mode {
        FeedMode::Single => Vec::with_capacity(1),
        FeedMode::Multi => pages(config, &selections)?,
    };
    outputs.push(OutputFile::new(
        FEED_FILE,
        render_feed(&selections, &config.site, config.mode, now)?,
    ));

    let written = write_outputs(&config.output_directory, &outputs)?;
    info!(
        files = written.len(),
        directory = %config.output_directory.display(),
        "build finished"
    );

    Ok(Report {
        rock: todays.rock.name.clone(),
        mineral: todays.mineral.name.clone(),
        written,
    })
}

// One page per selection followed by the index page.
fn pages(config: &Config, selections: &[DaySelection]) -> Result<Vec<OutputFile>> {
    let theme = Theme::load(
        config.day_template.as_deref(),
        config.index_template.as_deref(),
    )?;

    let mut outputs = Vec::with_capacity(selections.len() + 2);
    for selection in selections {
        outputs.push(OutputFile::new(
            page_file_name(selection.date),
            theme.render_day_page(&config.site, selection)?,
        ));
    }
    outputs.push(OutputFile::new(
        INDEX_FILE,
        theme.render_index(&config.site, selections)?,
    ));
    Ok(outputs)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for a run. Errors can come from rendering pages, building
/// the feed, or writing files.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors loading templates or rendering pages.
    Page(PageError),

    /// Returned for errors building the feed.
    Feed(FeedError),

    /// Returned for errors writing output files.
    Write(WriteError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Page(err) => err.fmt(f),
            Error::Feed(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Page(err) => Some(err),
            Error::Feed(err) => Some(err),
            Error::Write(err) => Some(err),
        }
    }
}

impl From<PageError> for Error {
    /// Converts [`PageError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: PageError) -> Error {
        Error::Page(err)
    }
}

impl From<FeedError> for Error {
    /// Converts [`FeedError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: FeedError) -> Error {
        Error::Feed(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_single_mode_writes_feed_only() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::defaults(dir.path(), None);
        config.mode = FeedMode::Single;

        let report = build_site(&config, now())?;
        assert_eq!("Slate", report.rock);
        assert_eq!("Chlorite", report.mineral);
        assert_eq!(vec![dir.path().join("feed.xml")], report.written);
        assert!(!dir.path().join("index.html").exists());
        Ok(())
    }

    #[test]
    fn test_multi_mode_respects_days() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::defaults(dir.path(), None);
        config.days = 3;

        let report = build_site(&config, now())?;
        let names: Vec<String> = report
            .written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            vec![
                "2024-03-05.html",
                "2024-03-04.html",
                "2024-03-03.html",
                "index.html",
                "feed.xml"
            ],
            names
        );
        Ok(())
    }

    #[test]
    fn test_missing_template_aborts_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::defaults(dir.path(), None);
        config.day_template = Some(dir.path().join("missing.html"));

        match build_site(&config, now()) {
            Err(Error::Page(PageError::OpenTemplateFile { .. })) => {}
            other => panic!("expected a template error, got {:?}", other),
        }
        assert!(!dir.path().join("feed.xml").exists());
    }
}
