//! Default values for configuration parameters
//!
//! This module centralizes all default value functions used by the configuration
//! structures. These functions are used by serde when deserializing configuration
//! files that don't specify certain optional fields.

// Daemon configuration defaults

/// Default websocket listen port for frontend connections
pub fn default_websocket_port() -> u16 {
    8765
}

/// Default port for the remote drive link between daemons
pub fn default_remote_port() -> u16 {
    56567
}

/// Default CouchDB server port
pub fn default_couchdb_port() -> u16 {
    5984
}

// Task queue defaults

/// Default maximum number of queued tasks per drive
pub fn default_maxqueue() -> usize {
    8
}
