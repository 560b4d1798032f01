//! Domain Layer
//!
//! Pure reconciliation logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Module set and the two registries
//! - `value_objects/` - Immutable value types (Tier, Payload)
//! - `services/` - Change detection, drift classification, cascade
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
