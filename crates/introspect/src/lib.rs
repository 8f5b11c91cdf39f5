//! Schema loading for the GraphiQL workbench.
//!
//! The workbench never talks HTTP directly. Requests go through a
//! [`Transport`], and [`load_schema`] turns the introspection result into a
//! [`ClientSchema`] that the editor and the explorer share.
//!
//! # Examples
//!
//! ```no_run
//! use graphiql_introspect::{load_schema, HttpTransport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new("https://example.com/graphql")
//!         .with_header("Authorization", "Bearer my-token");
//!     let schema = load_schema(&transport).await?;
//!     println!("{}", schema.sdl());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod query;
mod schema;
mod sdl;
mod transport;
mod types;

pub use apollo_compiler::ast::OperationType;
pub use client::load_schema;
pub use error::{FetchError, Result};
pub use query::INTROSPECTION_QUERY;
pub use schema::ClientSchema;
pub use sdl::introspection_to_sdl;
pub use transport::{HttpTransport, Transport, NONCE_HEADER};
pub use types::*;
