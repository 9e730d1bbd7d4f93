//! Request and response types for the LEO live book HTTP API.
//!
//! Shared by `leobook-server` (which produces them) and the CLI and
//! conformance suite (which consume them).
//!
//! # Endpoints covered
//!
//! | Method | Path | Type |
//! |--------|------|------|
//! | GET | `<document endpoint>` | → [`leobook::BookDocument`] (raw JSON as loaded) |
//! | GET | `/v1/book` | → [`BookInfo`] |
//! | GET | `/v1/graph` | → [`leobook::GraphModel`] |
//! | GET | `/v1/graph/elements` | → Cytoscape element array |
//! | GET | `/v1/route` | [`RouteQuery`] → [`RouteResponse`] |
//! | GET | `/v1/link/{section_id}` | → [`LinkResponse`] |
//! | GET | `/v1/read` | [`RouteQuery`] → [`ReadResponse`] |
//! | POST | `/v1/reload` | → [`BookInfo`] |

pub mod book;
pub mod error;
pub mod route;

pub use book::BookInfo;
pub use error::ErrorResponse;
pub use route::{LinkResponse, ReadResponse, RouteQuery, RouteResponse};
