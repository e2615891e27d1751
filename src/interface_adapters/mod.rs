// Interface adapters: wire protocol, upstream clients, and host handles.

pub mod clients;
pub mod protocol;
pub mod state;
