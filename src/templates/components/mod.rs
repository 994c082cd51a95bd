pub mod card;
pub mod case_list;
pub mod error;
pub mod popup;
pub mod toast;

pub use card::blocking_card;
pub use case_list::case_list;
pub use error::html_error_response;
pub use toast::{toast, toasts_oob};
