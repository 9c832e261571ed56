use crate::env::{self, EnvironmentAccessor};
use crate::error::AccessError;
use crate::validator::{JAVA_EXE, JAVAC_EXE};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// In-process stand-in for the machine environment.
#[derive(Default)]
pub(crate) struct MemoryEnvironment {
    pub vars: RefCell<BTreeMap<String, String>>,
    pub writes: RefCell<Vec<String>>,
    pub broadcasts: RefCell<usize>,
    pub fail_write: Option<&'static str>,
    pub fail_read: Option<&'static str>,
    /// Fails only the nth (1-based) read of the named variable.
    pub fail_nth_read: Option<(&'static str, usize)>,
    pub reads: RefCell<BTreeMap<String, usize>>,
    pub fail_broadcast: bool,
}

impl MemoryEnvironment {
    pub fn with_path(path: &str) -> Self {
        let env = Self::default();
        env.vars
            .borrow_mut()
            .insert(env::PATH.to_string(), path.to_string());
        env
    }

    pub fn var(&self, name: &str) -> Option<String> {
        self.vars.borrow().get(name).cloned()
    }
}

impl EnvironmentAccessor for MemoryEnvironment {
    fn get_var(&self, name: &str) -> Result<String, AccessError> {
        let count = {
            let mut reads = self.reads.borrow_mut();
            let count = reads.entry(name.to_string()).or_default();
            *count += 1;
            *count
        };
        let nth_fails = self
            .fail_nth_read
            .is_some_and(|(target, nth)| target == name && nth == count);
        if self.fail_read == Some(name) || nth_fails {
            return Err(AccessError::Read {
                name: name.to_string(),
                code: 5,
            });
        }
        Ok(self.var(name).unwrap_or_default())
    }

    fn set_var(&self, name: &str, value: &str) -> Result<(), AccessError> {
        if self.fail_write == Some(name) {
            return Err(AccessError::Write {
                name: name.to_string(),
                code: 5,
            });
        }
        self.writes.borrow_mut().push(name.to_string());
        self.vars
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn broadcast_change(&self) -> Result<(), AccessError> {
        *self.broadcasts.borrow_mut() += 1;
        if self.fail_broadcast {
            return Err(AccessError::Broadcast {
                reason: "timed out".to_string(),
            });
        }
        Ok(())
    }
}

/// Lays out `bin\java.exe`, `bin\javac.exe`, `lib\dt.jar` and `lib\tools.jar`.
pub(crate) fn fake_jdk(root: &Path) {
    let bin = root.join("bin");
    let lib = root.join("lib");
    fs::create_dir_all(&bin).unwrap();
    fs::create_dir_all(&lib).unwrap();
    fs::write(bin.join(JAVA_EXE), b"").unwrap();
    fs::write(bin.join(JAVAC_EXE), b"").unwrap();
    fs::write(lib.join("dt.jar"), b"").unwrap();
    fs::write(lib.join("tools.jar"), b"").unwrap();
}
