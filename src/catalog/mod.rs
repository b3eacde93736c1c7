//! Movie/series catalog: GraphQL client and playable-URL resolution.

pub mod client;
pub mod types;

pub use client::{CatalogProvider, GraphqlCatalog};
pub use types::{Movie, PlayableMovie, ResolvedShow, Show};
