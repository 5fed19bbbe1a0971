mod config;
mod resources;
mod token_store;
