// Per-tick simulation math, free of channel and I/O concerns.

pub mod steering;
