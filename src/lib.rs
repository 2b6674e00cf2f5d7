pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ReqwestTransport, TracingRequestLogger};
pub use app::services::{CategoriesService, CrossborderService, ProductService, ServiceCore, WarehouseService};
pub use config::ServiceConfig;
pub use core::request::{OffsetPagination, Pagination, Sort};
pub use domain::enums::SortDirection;
pub use utils::error::{Result, SellerError};
