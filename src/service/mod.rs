//! Resource operations
//!
//! - [`product`] - verbs shared by every product family
//! - [`port`] - port ordering and lifecycle

pub mod port;
pub mod product;

pub use port::{BuyLagPortRequest, BuyPortRequest, BuySinglePortRequest, ModifyPortRequest, PortService};
pub use product::{
    cancel_path, CancelMode, ModifyProductRequest, ModifyProductResponse, ProductService,
};
