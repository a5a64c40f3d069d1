pub mod api;
pub mod cli;
pub mod collection;
pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod gateway;
pub mod macros;
pub mod notice;
pub mod session;

#[cfg(test)]
pub(crate) mod test_guards;

pub use api::Api;
pub use api::models::{Category, Food, Order, OrderStatus, Restaurant, Review, Voucher};
pub use collection::{CollectionView, Filters, Slice, SortKey, ViewStatus, process};
pub use config::Config;
pub use error::{ApiError, ErrorClass, Result};
pub use gateway::{Gateway, HttpTransport, Navigator, Transport};
pub use notice::{Notice, NoticeLevel};
pub use session::{Role, Session, SessionEvent, SessionStore, UserRecord};
