//! Studyhall: note, test and submission pages over a document database.
//!
//! The components here are shared by the web client (`studyhall`, feature
//! `web`) and the server (`studyhall-server`, feature `server`), which renders
//! the same pages ahead of the client and serves its bundle. Database access,
//! configuration and migrations only exist on the server side.

pub mod counter;
pub mod editor;
pub mod error;
pub mod params;
pub mod views;

#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod migrations;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod shell;
#[cfg(feature = "server")]
pub mod state;
#[cfg(feature = "server")]
pub mod store;
