//! # locserver-i18n
//!
//! Localization catalog core for locserver. This crate loads translated
//! message catalogs from a directory tree, keeps them current as files change
//! on disk, and resolves a client's language preferences to the best
//! available catalog.
//!
//! Three on-disk formats are supported:
//!
//! - gotext-style JSON message lists (`.json`, language tag embedded)
//! - gettext PO text (`.po`, tag taken from the parent directory name)
//! - XLIFF 2.0 (`.xlf`/`.xliff`, tag taken from the `trgLang` attribute)
//!
//! The serving layer consumes the core through two narrow entry points:
//! resolve the best tag for a preference list, and fetch the catalog for a
//! tag.
//!
//! # Example
//!
//! ```no_run
//! use locserver_i18n::StringTable;
//!
//! # fn example() -> Result<(), locserver_i18n::CatalogError> {
//! let table = StringTable::load("./locales", true)?;
//!
//! let tag = table.resolve(&["en-GB", "fr"]);
//! let catalog = table.catalog_for(&tag)?;
//! println!("{:?}", catalog.get("greeting"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod error;
pub mod format;
pub mod gotext;
pub mod matcher;
pub mod po;
mod scanner;
pub mod table;
pub mod tag;
mod watcher;
pub mod xliff;

pub use catalog::{Catalog, CatalogStore};
pub use error::{CatalogError, ScanError};
pub use format::{format_for_path, MessageFormat, ParsedFile};
pub use gotext::GoTextJsonFormat;
pub use matcher::TagMatcher;
pub use po::PoFormat;
pub use table::StringTable;
pub use tag::LanguageTag;
pub use xliff::Xliff2Format;
