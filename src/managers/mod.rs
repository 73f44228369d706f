// WebShell controllers
// Single-threaded state machines driven by the UI event loop: splash, page host,
// retry timer bookkeeping and exit confirmation. They never perform I/O and
// return the effects they want executed.

pub mod exit_confirmation;
pub mod page_host;
pub mod retry_timer;
pub mod splash;
