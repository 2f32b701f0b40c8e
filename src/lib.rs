//! The library code for the `rockday` generator, which publishes a "rock and
//! mineral of the day" as static HTML pages and an RSS feed. A run breaks down
//! into three steps:
//!
//! 1. Selecting specimens: every date maps onto one rock and one mineral of
//!    the [`catalog::Catalog`] by its day of the year
//! 2. Rendering documents: a page per day and an index page
//!    ([`crate::page`]) and the feed ([`crate::feed`])
//! 3. Writing the documents to disk ([`crate::write`])
//!
//! [`build::build_site`] runs all three for a resolved [`config::Config`].
//! The generator runs in one of two modes ([`feed::FeedMode`]): a single-item
//! feed for today, or a rolling window of days with a page for each.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod catalog;
pub mod config;
pub mod escape;
pub mod feed;
pub mod logging;
pub mod page;
pub mod url;
pub mod util;
pub mod write;
