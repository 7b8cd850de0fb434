// Typed API clients layered over the request pipeline.

pub mod auth;
pub mod files;
pub mod notes;
