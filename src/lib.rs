#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod agent;
pub mod core;
pub mod protocol;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod node;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub use agent::{Agent, AgentError, AgentState, NullScreen, Screen, Turn};
pub use crate::core::*;
pub use protocol::{
    Message, NegotiationData, ParseError, Parser, ParserStatus, TurnOrder,
};
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use node::{AgentNode, NodeConfig};
#[cfg(feature = "std")]
pub use ui::ConsoleScreen;
