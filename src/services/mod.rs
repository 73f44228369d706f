// WebShell services
// Collaborators of the controllers: settings, connectivity probing and deep-link resolution.

pub mod connectivity_probe;
pub mod deep_link;
pub mod settings_engine;
