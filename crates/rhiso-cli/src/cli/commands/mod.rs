//! CLI command handlers, one file per command.

mod checksum;
mod download;
mod list;
mod versions;

pub use checksum::run_checksum;
pub use download::run_download;
pub use list::{run_list, ListTarget};
pub use versions::run_versions;

#[cfg(test)]
pub(crate) use download::render_result;
#[cfg(test)]
pub(crate) use list::{render_content_set, render_latest, render_release};
