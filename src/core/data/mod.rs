//! Core data types shared by the catalog cache, the call-site index and extraction.
//!
//! ## Module Structure
//!
//! - `message`: Catalog-side types (Template, Catalog, CatalogLocation)
//! - `call_site`: Source-side types (CallSite, CallArgument)

pub mod call_site;
pub mod message;

pub use call_site::{CallArgument, CallSite};
pub use message::{Catalog, CatalogLocation, OTHER_CASE, Template};
