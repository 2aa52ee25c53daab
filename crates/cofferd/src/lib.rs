//! cofferd library surface: the HTTP server, exported for integration
//! tests and the binary.

pub mod server;
