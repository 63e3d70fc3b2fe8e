//! HTTP endpoint implementations for the users, items, and diagnostics
//! surfaces.

mod diag;
mod items;
mod request;
mod response;
mod users;

pub use diag::{echo, echo_usage, health, home, stats};
pub use items::{create_item, delete_item, get_item, list_items, update_item};
pub use request::{parse_list_query, parse_object, read_body_with_timeout, ListQuery};
pub use response::json_response;
pub use users::{create_user, list_users};
