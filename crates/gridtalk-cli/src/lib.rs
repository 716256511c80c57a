//! Library surface of the GridTalk CLI: logging setup shared by the
//! binary and by tests.

pub mod logging;
