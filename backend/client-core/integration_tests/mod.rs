mod api_client;
mod auth;
mod helpers;
mod resources;
mod verbs;
