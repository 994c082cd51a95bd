pub mod errors;
pub mod html;
pub mod json;
pub mod static_files;

pub use errors::ResultResp;

pub use html::{html_response, html_with_status, signed_out_redirect};
pub use json::{json_response, json_with_status, no_content};
pub use static_files::static_file;
