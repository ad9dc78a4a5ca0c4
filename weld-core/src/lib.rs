mod argument;
mod as_value;
mod assembler;
mod destination;
mod driver;
mod error;
mod executor;
mod fts;
mod jsonb;
mod literal;
mod named;
mod nullable;
mod positional;
mod query;
mod record;
mod sql_writer;
mod statement;
mod util;
mod value;

pub use ::anyhow::Context;
pub use argument::*;
pub use as_value::*;
pub use assembler::*;
pub use destination::*;
pub use driver::*;
pub use error::*;
pub use executor::*;
pub use fts::*;
pub use jsonb::*;
pub use literal::*;
pub use named::*;
pub use nullable::*;
pub use positional::*;
pub use query::*;
pub use record::*;
pub use sql_writer::*;
pub use statement::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;
pub mod json {
    pub use ::serde_json::*;
}

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
