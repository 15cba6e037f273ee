//! router_core: simulated home WiFi router.
//!
//! One mutable [`state::RouterState`] exposed through three fixed operation
//! sets: resources (pure reads), tools (validated mutations), and prompts
//! (state rendered into guidance text). Transports live elsewhere and talk to
//! [`service::RouterService`] only.

pub mod error;
pub mod prompts;
pub mod resources;
pub mod service;
pub mod state;
pub mod tools;

pub use error::RouterError;
pub use resources::{ResourceContent, ResourceId};
pub use service::RouterService;
pub use state::RouterState;
pub use tools::{ToolOutcome, ToolStatus};
