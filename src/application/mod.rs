//! Application layer orchestrating the domain.
//!
//! - [`services`] - Invariant-owning services over the repository traits
//! - [`dispatch`] - Command-to-handler mapping with role gating

pub mod dispatch;
pub mod services;
