//! HTTP request handlers.

pub(crate) mod license;
pub(crate) mod pages;
