//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness and database probe
//! - [`auth`] - register / login / me / logout
//! - [`categories`] - category management
//! - [`products`] - product management
//! - [`orders`] - order submission, listing and status changes
//! - [`dashboard`] - revenue and status statistics
//! - [`users`] - account administration (manager only)

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;

// Account policy shared by self-registration and manager-side creation.
pub(crate) const MIN_USERNAME_LEN: usize = 3;
pub(crate) const MIN_PASSWORD_LEN: usize = 6;
