//! Core types and trait definitions for the duo entity service.
//!
//! Two entity types live here: [`Subject`](subject::Subject) and
//! [`Object`](object::Object). An object points at a subject by value, through
//! the subject's binding category (`ctgr_b`), never through its primary key.
//! Keeping that relationship intact is the job of the [`rules`] module; the
//! [`registry`] sequences rules, persistence and [`view`] projection into one
//! operation per request.
//!
//! This crate is free of HTTP and database dependencies. Storage backends
//! implement [`store::EntityStore`].

// Native `async fn` in traits; the store trait spells out its `Send` bounds.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod kind;
pub mod object;
pub mod registry;
pub mod rules;
pub mod store;
pub mod subject;
pub mod view;

pub use error::{Error, Result};
pub use kind::EntityKind;
pub use registry::Registry;

#[cfg(test)]
mod fixture;
