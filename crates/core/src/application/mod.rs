// Application Layer - Repair workflow and its sequential lane

pub mod lane;
pub mod repair;

// Re-exports
pub use lane::{shutdown_channel, RepairLane, RepairTicket, ShutdownSender, ShutdownToken};
pub use repair::RepairEngine;
