//! Support for creating the RSS 2.0 feed from a list of day selections.

use crate::catalog::{DaySelection, Specimen};
use crate::config::Site;
use crate::escape::wikipedia_url;
use crate::page::{display_date, page_file_name};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rss::extension::atom::{AtomExtension, Link};
use rss::{Channel, Error as RssError, Guid, Item};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

const RFC822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";
const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

/// Which variant of the feed to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    /// A single item for today, pointing at the site root.
    Single,

    /// One item per day in a rolling window, each pointing at that day's
    /// page.
    Multi,
}

impl Default for FeedMode {
    fn default() -> Self {
        FeedMode::Multi
    }
}

/// Renders the feed as pretty-printed XML (2-space indent).
///
/// In [`FeedMode::Single`] only the first selection is used and its
/// publication date is `now`. In [`FeedMode::Multi`] every selection becomes
/// an item, in the order given, published at 06:00 UTC on its date.
pub fn render_feed(
    selections: &[DaySelection],
    site: &Site,
    mode: FeedMode,
    now: DateTime<Utc>,
) -> Result<String> {
    let items = match mode {
        FeedMode::Single => match selections.first() {
            Some(selection) => vec![single_item(site, selection, now)],
            None => Vec::new(),
        },
        FeedMode::Multi => selections.iter().map(|s| multi_item(site, s)).collect(),
    };
    if items.is_empty() {
        return Err(Error::NoSelections);
    }

    let buf = channel(site, items, now).pretty_write_to(Vec::new(), b' ', 2)?;
    Ok(String::from_utf8(buf)?)
}

fn channel(site: &Site, items: Vec<Item>, now: DateTime<Utc>) -> Channel {
    let mut self_link = Link::default();
    self_link.set_href(site.feed_url());
    self_link.set_rel("self");
    self_link.set_mime_type(Some("application/rss+xml".to_owned()));

    let mut atom = AtomExtension::default();
    atom.set_links(vec![self_link]);

    let mut channel = Channel::default();
    channel.set_title(site.title.clone());
    channel.set_link(site.base_url.to_string());
    channel.set_description(site.description.clone());
    channel.set_language(Some("en-us".to_owned()));
    channel.set_last_build_date(Some(now.format(RFC822_FORMAT).to_string()));
    channel.set_namespaces(
        vec![
            ("atom".to_owned(), ATOM_NAMESPACE.to_owned()),
            ("dc".to_owned(), DC_NAMESPACE.to_owned()),
        ]
        .into_iter()
        .collect::<BTreeMap<String, String>>(),
    );
    channel.set_atom_ext(Some(atom));
    channel.set_items(items);
    channel
}

fn single_item(site: &Site, selection: &DaySelection, now: DateTime<Utc>) -> Item {
    let home_page = site.base_url.to_string();
    let closing = format!(
        "<p><em>Visit the <a href=\"{}\">{}</a> page for images and full Wikipedia articles.</em></p>",
        home_page, site.title
    );

    let mut guid = Guid::default();
    guid.set_value(format!("rockmineral-{}", selection.date.format("%Y%m%d")));
    guid.set_permalink(false);

    let mut item = Item::default();
    item.set_title(item_title(selection));
    item.set_link(home_page);
    item.set_description(item_description(selection, "Today's ", &closing));
    item.set_guid(Some(guid));
    item.set_pub_date(Some(now.format(RFC822_FORMAT).to_string()));
    item
}

fn multi_item(site: &Site, selection: &DaySelection) -> Item {
    let page_url = site.base_url.join(&page_file_name(selection.date));
    let closing = format!(
        "<p><em>See the <a href=\"{}\">full page</a> for images and full Wikipedia articles.</em></p>",
        page_url
    );

    let mut guid = Guid::default();
    guid.set_value(page_url.clone());
    guid.set_permalink(true);

    let mut item = Item::default();
    item.set_title(item_title(selection));
    item.set_link(page_url);
    item.set_description(item_description(selection, "", &closing));
    item.set_guid(Some(guid));
    item.set_pub_date(Some(morning_of(selection.date).format(RFC822_FORMAT).to_string()));
    item
}

/// `"{rock} & {mineral} - {Month DD, YYYY}"`
fn item_title(selection: &DaySelection) -> String {
    format!(
        "{} & {} - {}",
        selection.rock.name,
        selection.mineral.name,
        display_date(selection.date)
    )
}

// The item body: a section per specimen followed by `closing`. `prefix` goes
// in front of the "Rock"/"Mineral" headings.
fn item_description(selection: &DaySelection, prefix: &str, closing: &str) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        specimen_section(selection.rock, &format!("\u{1FAA8} {}Rock", prefix)),
        specimen_section(selection.mineral, &format!("\u{1F48E} {}Mineral", prefix)),
        closing
    )
}

fn specimen_section(specimen: &Specimen, heading: &str) -> String {
    format!(
        "<h2>{}: {}</h2>\n<p>{}</p>\n<p><a href=\"{}\">Learn more about {} on Wikipedia</a></p>",
        heading,
        specimen.name,
        specimen.description,
        wikipedia_url(&specimen.name),
        specimen.name
    )
}

fn morning_of(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&(date.and_time(NaiveTime::default()) + Duration::hours(6)))
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem creating the feed.
#[derive(Debug)]
pub enum Error {
    /// Returned when there is nothing to put in the feed.
    NoSelections,

    /// Returned when the channel can't be serialized.
    Rss(RssError),

    /// Returned when the serialized feed isn't valid UTF-8.
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NoSelections => f.write_str("Feed needs at least one day"),
            Error::Rss(err) => err.fmt(f),
            Error::Utf8(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NoSelections => None,
            Error::Rss(err) => Some(err),
            Error::Utf8(err) => Some(err),
        }
    }
}

impl From<RssError> for Error {
    /// Converts [`RssError`]s into [`Error`]. This allows us to use the `?`
    /// operator when serializing the channel.
    fn from(err: RssError) -> Error {
        Error::Rss(err)
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Error {
        Error::Utf8(err)
    }
}
