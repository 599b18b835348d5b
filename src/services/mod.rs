//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle database transactions, validation, and complex operations.

pub mod categoria_service;
pub mod conta_service;
pub mod transacao_service;
pub mod usuario_service;
