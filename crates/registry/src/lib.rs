//! Registration of genre rows with a home screen section registry.
//!
//! Two interchangeable [`SectionRegistrar`] strategies exist: an in-process
//! call into a [`SectionRegistry`](genrerows_core::section_table::SectionRegistry)
//! handle, and an HTTP call to the registry plugin's REST endpoint. The
//! [`runner`] drives either one over every configured genre after a startup
//! delay. [`transformation`] registers the index page script injection with
//! the host's file transformation facility.

pub mod http;
pub mod in_process;
pub mod registrar;
pub mod runner;
pub mod transformation;

pub use http::HttpRegistrar;
pub use in_process::InProcessRegistrar;
pub use registrar::{RegistrationError, RegistrationMode, SectionRegistrar};
pub use runner::{RegistrationReport, RegistrationRunner};
pub use transformation::TransformationRegistrar;

/// Identifier this service registers under with host facilities.
pub const PLUGIN_ID: uuid::Uuid = uuid::uuid!("014df46b-ffdc-414f-b841-e7fb5546b8e5");
