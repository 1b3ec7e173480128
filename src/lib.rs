//! Markerpick - click a pixel, get the closest marker colors
//!
//! Web service and CLI around the `lab-match` ranker: loads an image from a
//! URL, samples the clicked pixel and lists the closest entries of a Copic
//! marker catalog by CIEDE2000.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
