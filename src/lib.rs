// Game state machine, role dealing and session hosting
pub mod core;

// Device authentication
pub mod auth;

// Middleware
pub mod middleware;

// Services (business logic)
pub mod services;

// API models (requests/responses)
pub mod models;

// HTTP routes
pub mod routes;

// Router assembly
pub mod app;

// Environment configuration
pub mod config;

// Application state
pub mod state;
