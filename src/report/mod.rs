//! Run aggregate plus the presentation layer that turns it into output.
mod render;
mod status;
mod types;


pub use render::{banner_lines, print_banner, print_report, render_json, report_lines};
pub use status::{
    CategoryGroup, StatusCategory, UNKNOWN_STATUS_DESCRIPTION, group_by_category,
    status_description,
};
pub use types::Report;
