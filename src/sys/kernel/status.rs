use core::fmt;

use spin::Mutex;

const MAX_COMPONENTS: usize = 8;

/// Kernel initialization status tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    NotStarted,
    InProgress,
    Completed,
    Failed(&'static str),
}

/// Kernel component status
#[derive(Debug, Clone, Copy)]
pub struct ComponentStatus {
    pub name: &'static str,
    pub status: InitStatus,
}

impl ComponentStatus {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            status: InitStatus::NotStarted,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status, InitStatus::Completed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, InitStatus::Failed(_))
    }
}

pub struct StatusBoard {
    components: [Option<ComponentStatus>; MAX_COMPONENTS],
}

impl StatusBoard {
    pub const fn new() -> Self {
        Self {
            components: [None; MAX_COMPONENTS],
        }
    }

    /// Returns false when the board is full or the name is already tracked.
    pub fn register(&mut self, name: &'static str) -> bool {
        if self.get(name).is_some() {
            return false;
        }
        match self.components.iter_mut().find(|c| c.is_none()) {
            Some(free) => {
                *free = Some(ComponentStatus::new(name));
                true
            }
            None => false,
        }
    }

    pub fn update(&mut self, name: &'static str, status: InitStatus) {
        if let Some(comp) = self.components.iter_mut().flatten().find(|c| c.name == name) {
            comp.status = status;
        }
    }

    pub fn get(&self, name: &str) -> Option<ComponentStatus> {
        self.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = ComponentStatus> + '_ {
        self.components.iter().flatten().copied()
    }

    pub fn all_ready(&self) -> bool {
        let mut any = false;
        for comp in self.iter() {
            if !comp.is_complete() {
                return false;
            }
            any = true;
        }
        any
    }
}

static INIT_STATUS: Mutex<StatusBoard> = Mutex::new(StatusBoard::new());

/// Track kernel component initialization
pub fn register_component(name: &'static str) {
    if !INIT_STATUS.lock().register(name) {
        crate::log_warn!("boot", "cannot track component {}", name);
    }
}

pub fn update_component_status(name: &'static str, status: InitStatus) {
    INIT_STATUS.lock().update(name, status);
}

/// Check if all components are initialized
pub fn all_components_ready() -> bool {
    INIT_STATUS.lock().all_ready()
}

impl fmt::Display for InitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitStatus::NotStarted => write!(f, "Not Started"),
            InitStatus::InProgress => write!(f, "In Progress"),
            InitStatus::Completed => write!(f, "Completed"),
            InitStatus::Failed(err) => write!(f, "Failed: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_phase_transitions() {
        let mut board = StatusBoard::new();
        assert!(!board.all_ready());
        assert!(board.register("Interrupt System"));
        assert!(!board.register("Interrupt System"));
        board.update("Interrupt System", InitStatus::InProgress);
        assert!(!board.all_ready());
        board.update("Interrupt System", InitStatus::Completed);
        assert!(board.all_ready());
    }

    #[test]
    fn failure_is_reported() {
        let mut board = StatusBoard::new();
        board.register("Serial");
        board.update("Serial", InitStatus::Failed("no UART"));
        let comp = board.get("Serial").unwrap();
        assert!(comp.is_failed());
        assert_eq!(comp.status.to_string(), "Failed: no UART");
    }

    #[test]
    fn board_capacity() {
        let mut board = StatusBoard::new();
        let names = ["a", "b", "c", "d", "e", "f", "g", "h"];
        for name in names {
            assert!(board.register(name));
        }
        assert!(!board.register("i"));
    }
}
