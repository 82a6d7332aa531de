use track_recorder_core::PermissionGate;

use std::{cell::Cell, rc::Rc};

use tracing::{info, warn};

/// Location permission switch, flipped by `allow` / `deny` commands.
#[derive(Debug, Clone)]
pub struct LocationPermission {
    granted: Rc<Cell<bool>>,
}

impl LocationPermission {
    /// Create the switch in the given position.
    pub fn new(granted: bool) -> Self {
        Self {
            granted: Rc::new(Cell::new(granted)),
        }
    }

    /// Grant or revoke location access.
    pub fn set_granted(&self, granted: bool) {
        self.granted.set(granted);
        info!(granted, "Location permission changed");
    }

    /// Whether location access is granted.
    pub fn is_granted(&self) -> bool {
        self.granted.get()
    }
}

impl PermissionGate for LocationPermission {
    fn is_prohibited(&self) -> bool {
        !self.granted.get()
    }

    fn prompt_user_to_enable(&self) {
        warn!("Recording needs location access");
        println!("Location access is off. Type `allow` to turn it on, then `toggle` again.");
    }
}
