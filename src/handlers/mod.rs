// handlers/mod.rs - Route handlers
//
// Public (no auth): service info and health
// Blog (auth gate): post CRUD, mounted under the configured base path

pub mod blog;
pub mod public;
