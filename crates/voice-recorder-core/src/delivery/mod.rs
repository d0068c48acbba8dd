mod client_link;
mod command;
mod command_outcome;
mod delivery_router;

pub use {
    client_link::{Attachment, ClientLink},
    command::Command,
    command_outcome::{CommandOutcome, IgnoreReason},
    delivery_router::DeliveryRouter,
};
