// WebShell shared type definitions
// Each submodule defines types passed between the controllers, services and the UI layer.

pub mod connectivity;
pub mod effect;
pub mod errors;
pub mod load;
pub mod settings;
