//! Application services built on the ports.

mod admin;
mod query;

#[cfg(test)]
pub(crate) mod testing;

pub use admin::AdminPostService;
pub use query::PostQueryService;
