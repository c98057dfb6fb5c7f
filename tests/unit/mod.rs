mod booking;
mod config;
mod content;
mod roles;
mod tokens;
