//! Team-scoped PDF and spreadsheet link manager.
//!
//! Users log in, belong to exactly one team, and only ever see their team's
//! uploads and sheet links. Records live in a JSON store file, uploaded files in a
//! local directory.

pub mod config;
pub mod error;
pub mod services;
pub mod session;
pub mod state;
pub mod store;
pub mod uploads;
pub mod users;
pub mod views;
