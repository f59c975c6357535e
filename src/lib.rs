//! Backend for the screenshot capture-and-gallery web app: a file-backed
//! record store served over a small actix-web JSON API.

pub mod api;
pub mod store;
pub mod utils;
