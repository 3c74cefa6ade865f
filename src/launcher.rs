use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// Opens a folder in the platform file manager
pub trait Launcher {
    fn open(&self, path: &str) -> io::Result<()>;
}

/// Hands folders to the system file manager
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn open(&self, path: &str) -> io::Result<()> {
        log::info!("Opening {:?} in the file manager", path);
        open::that_detached(path)
    }
}

/// Records requested folders instead of opening them. Clones share the record.
#[derive(Debug, Default, Clone)]
pub struct RecordingLauncher {
    opened: Rc<RefCell<Vec<String>>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn open(&self, path: &str) -> io::Result<()> {
        self.opened.borrow_mut().push(path.to_string());
        Ok(())
    }
}
