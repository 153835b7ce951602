//! Membership platform backend.
//!
//! Axum serves the JSON API, SeaORM stores everything in Sqlite and Serenity runs the
//! optional Discord bot. Requests pass through four layers:
//!
//! - `controller/` checks access with `AuthGuard` and maps DTOs to operation params
//! - `service/` applies business rules and calls the hosted integrations
//! - `data/` holds the repositories, which convert entities into domain models
//! - `model/` defines those domain models and params
//!
//! Around them sit `config` (environment), `startup` (database, sessions, clients),
//! `state`, `router` (routes, OpenAPI, CORS), `integration/` (Stripe, calendar, email,
//! blob storage, Discord), `scheduler/` (the five-minute maintenance job) and `bot/`
//! (gateway handlers that restore tier roles when members rejoin).

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod integration;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
