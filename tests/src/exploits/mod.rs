//! # Exploit Simulations
//!
//! Each module attacks one trust boundary and asserts that the destination
//! mirror is left untouched.
//!
//! | Module | Boundary |
//! |--------|----------|
//! | `spoofed_origin` | Relay log validation |
//! | `callback_replay` | Proxy identity and domain checks |
//! | `unauthorized_callers` | Sender checks on every privileged entry point |
//! | `delivery_ordering` | Proxy monotonic round guard |

pub mod callback_replay;
pub mod spoofed_origin;
pub mod unauthorized_callers;
