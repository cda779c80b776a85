//! Helper functions used across the application.
//!
//! - [`db_error`] - Classification of PostgreSQL constraint violations

pub mod db_error;
