//! Renders the HTML pages: one page per day ([`Theme::render_day_page`]) and
//! the index listing the most recent days ([`Theme::render_index`]).
//!
//! Pages are rendered with [`gtmpl`] (Go template syntax). Templates never
//! escape anything themselves; every value handed to them is pre-escaped for
//! its context and exposed under a suffixed key: `_html` for markup and
//! attributes, `_js` for single-quoted strings inside the embedded scripts.

use crate::catalog::{DaySelection, Specimen};
use crate::config::{Site, INDEX_FILE};
use crate::escape::{escape_html, escape_js_string, truncate, wikipedia_url, SUMMARY_LENGTH};
use chrono::NaiveDate;
use gtmpl::{Context, Template, Value};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

const DAY_TEMPLATE: &str = include_str!("../templates/day.html");
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Human-readable date, e.g. `March 05, 2024`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// The output file name of a day's page, e.g. `2024-03-05.html`.
pub fn page_file_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d.html").to_string()
}

/// The parsed page templates.
pub struct Theme {
    day_template: Template,
    index_template: Template,
}

impl Theme {
    /// The templates bundled with the binary.
    pub fn builtin() -> Result<Theme> {
        Ok(Theme {
            day_template: parse_template("day", DAY_TEMPLATE)?,
            index_template: parse_template("index", INDEX_TEMPLATE)?,
        })
    }

    /// Loads templates from disk, falling back to the bundled template for
    /// each one that isn't given.
    pub fn load(day_template: Option<&Path>, index_template: Option<&Path>) -> Result<Theme> {
        Ok(Theme {
            day_template: match day_template {
                Some(path) => parse_template_file(path)?,
                None => parse_template("day", DAY_TEMPLATE)?,
            },
            index_template: match index_template {
                Some(path) => parse_template_file(path)?,
                None => parse_template("index", INDEX_TEMPLATE)?,
            },
        })
    }

    /// Renders the page for a single day. The page shows the bundled
    /// descriptions and, when viewed in a browser, tries to replace them with
    /// the Wikipedia extract and thumbnail for each specimen.
    pub fn render_day_page(&self, site: &Site, selection: &DaySelection) -> Result<String> {
        let date = display_date(selection.date);
        let mut m = site_values(site);
        m.insert("date_html".to_owned(), Value::String(escape_html(&date)));
        m.insert("date_js".to_owned(), Value::String(escape_js_string(&date)));
        m.insert("rock".to_owned(), selection.rock.into());
        m.insert("mineral".to_owned(), selection.mineral.into());
        render(&self.day_template, Value::Object(m))
    }

    /// Renders the index page with one card per selection, in the order
    /// given.
    pub fn render_index(&self, site: &Site, selections: &[DaySelection]) -> Result<String> {
        let mut m = site_values(site);
        m.insert(
            "days".to_owned(),
            Value::Array(
                selections
                    .iter()
                    .map(|selection| summary_value(site, selection))
                    .collect(),
            ),
        );
        render(&self.index_template, Value::Object(m))
    }
}

impl From<&Specimen> for Value {
    /// Converts a [`Specimen`] into a [`Value`] for templating, with its name,
    /// description and Wikipedia URL escaped for both HTML and script use.
    fn from(s: &Specimen) -> Value {
        let url = wikipedia_url(&s.name);
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("name_html".to_owned(), Value::String(escape_html(&s.name)));
        m.insert("name_js".to_owned(), Value::String(escape_js_string(&s.name)));
        m.insert(
            "description_html".to_owned(),
            Value::String(escape_html(&s.description)),
        );
        m.insert(
            "description_js".to_owned(),
            Value::String(escape_js_string(&s.description)),
        );
        m.insert("url_html".to_owned(), Value::String(escape_html(&url)));
        m.insert("url_js".to_owned(), Value::String(escape_js_string(&url)));
        Value::Object(m)
    }
}

// Values shared by every page: site title and description plus the index and
// feed URLs.
fn site_values(site: &Site) -> HashMap<String, Value> {
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert("title_html".to_owned(), Value::String(escape_html(&site.title)));
    m.insert(
        "description_html".to_owned(),
        Value::String(escape_html(&site.description)),
    );
    m.insert(
        "index_url_html".to_owned(),
        Value::String(escape_html(&site.base_url.join(INDEX_FILE))),
    );
    m.insert(
        "feed_url_html".to_owned(),
        Value::String(escape_html(&site.feed_url())),
    );
    m
}

// An index card: title, date, truncated descriptions and the day's page URL.
// Descriptions are cut before escaping so an escape sequence is never split.
fn summary_value(site: &Site, selection: &DaySelection) -> Value {
    let title = format!("{} & {}", selection.rock.name, selection.mineral.name);
    let date = display_date(selection.date);
    let url = site.base_url.join(&page_file_name(selection.date));
    let rock = truncate(&selection.rock.description, SUMMARY_LENGTH);
    let mineral = truncate(&selection.mineral.description, SUMMARY_LENGTH);

    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert("title_html".to_owned(), Value::String(escape_html(&title)));
    m.insert("title_js".to_owned(), Value::String(escape_js_string(&title)));
    m.insert("date_html".to_owned(), Value::String(escape_html(&date)));
    m.insert("date_js".to_owned(), Value::String(escape_js_string(&date)));
    m.insert("rock_js".to_owned(), Value::String(escape_js_string(&rock)));
    m.insert("mineral_js".to_owned(), Value::String(escape_js_string(&mineral)));
    m.insert("url_html".to_owned(), Value::String(escape_html(&url)));
    m.insert("url_js".to_owned(), Value::String(escape_js_string(&url)));
    Value::Object(m)
}

fn render(template: &Template, value: Value) -> Result<String> {
    let context = Context::from(value).map_err(Error::Render)?;
    template.render(&context).map_err(Error::Render)
}

fn parse_template(name: &str, contents: &str) -> Result<Template> {
    let mut template = Template::default();
    template
        .parse(contents)
        .map_err(|err| Error::ParseTemplate {
            name: name.to_owned(),
            err,
        })?;
    Ok(template)
}

fn parse_template_file(path: &Path) -> Result<Template> {
    use std::io::Read;
    let mut contents = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut contents))
        .map_err(|err| Error::OpenTemplateFile {
            path: path.to_owned(),
            err,
        })?;
    parse_template(&path.display().to_string(), &contents)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for rendering pages: loading and parsing templates, and
/// executing them.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems while opening template files.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing a template.
    ParseTemplate { name: String, err: String },

    /// Returned for errors executing a template.
    Render(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate { name, err } => {
                write!(f, "Parsing template '{}': {}", name, err)
            }
            Error::Render(err) => write!(f, "Rendering page: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate { .. } => None,
            Error::Render(_) => None,
        }
    }
}
