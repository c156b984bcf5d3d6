pub mod engine;
pub mod normalizer;
pub mod output;
pub mod page;
pub mod request;
pub mod sources;
pub mod table;
pub mod thumbnail;

pub use crate::domain::model::{Cell, Column, DisplayGrid, Record};
pub use crate::domain::ports::{BackendApi, ConfigProvider, ScrapeSource, Storage};
pub use crate::utils::error::Result;
