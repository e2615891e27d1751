// Clients for upstream services the viewer consumes.

pub mod sim;
