//! Client for the Pokémon catalog service and the view-models built on it.
//!
//! The service owns every record; the screens here hold transient state
//! only and talk to the service through [`api::CatalogApi`].

pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod screens;
pub mod utils;
pub mod widgets;
