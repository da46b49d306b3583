mod ptr_server_mock;

pub use ptr_server_mock::*;
