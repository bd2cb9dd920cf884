//! Shared test fixtures for interface tests.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use super::command::{CommandError, CommandOutput, CommandRunner};
use super::registry::{InterfaceRegistry, OperState, RegistryError};
use crate::time::Sleeper;

/// A single fake interface entry.
#[derive(Debug, Clone)]
pub struct FakeInterface {
    pub wireless: bool,
    pub state: Result<OperState, ()>,
    pub address: String,
}

/// Mock registry with a fixed set of interfaces.
///
/// Operational state readbacks can be scripted per name; once the script
/// is exhausted the configured state is returned.
#[derive(Default)]
pub struct MockRegistry {
    interfaces: Vec<(String, FakeInterface)>,
    state_script: Mutex<HashMap<String, VecDeque<OperState>>>,
    broken_markers: Vec<String>,
    unreadable: bool,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wireless(self, name: &str, state: OperState) -> Self {
        self.with(name, true, Ok(state))
    }

    pub fn wired(self, name: &str, state: OperState) -> Self {
        self.with(name, false, Ok(state))
    }

    /// Adds a wireless interface whose operstate cannot be read.
    pub fn broken_state(self, name: &str) -> Self {
        self.with(name, true, Err(()))
    }

    /// Makes the wireless-marker check for `name` fail.
    pub fn broken_marker(mut self, name: &str) -> Self {
        self.broken_markers.push(name.to_string());
        self
    }

    /// Makes every query fail as if the registry were unreadable.
    pub fn unreadable(mut self) -> Self {
        self.unreadable = true;
        self
    }

    /// Queues states returned by successive readbacks of `name`.
    pub fn script_states(self, name: &str, states: Vec<OperState>) -> Self {
        self.state_script
            .lock()
            .unwrap()
            .insert(name.to_string(), states.into());
        self
    }

    fn with(mut self, name: &str, wireless: bool, state: Result<OperState, ()>) -> Self {
        self.interfaces.push((
            name.to_string(),
            FakeInterface {
                wireless,
                state,
                address: "00:11:22:33:44:55".to_string(),
            },
        ));
        self
    }

    fn lookup(&self, name: &str) -> Option<&FakeInterface> {
        self.interfaces
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, iface)| iface)
    }

    fn fail(name: &str) -> RegistryError {
        RegistryError::Read {
            path: PathBuf::from(format!("/fake/{name}")),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "fake failure"),
        }
    }

    fn check_readable(&self, name: &str) -> Result<(), RegistryError> {
        if self.unreadable {
            Err(Self::fail(name))
        } else {
            Ok(())
        }
    }
}

impl InterfaceRegistry for MockRegistry {
    fn exists(&self, name: &str) -> Result<bool, RegistryError> {
        self.check_readable(name)?;
        Ok(self.lookup(name).is_some())
    }

    fn is_wireless(&self, name: &str) -> Result<bool, RegistryError> {
        self.check_readable(name)?;
        if self.broken_markers.iter().any(|n| n == name) {
            return Err(Self::fail(name));
        }
        Ok(self.lookup(name).is_some_and(|i| i.wireless))
    }

    fn operational_state(&self, name: &str) -> Result<OperState, RegistryError> {
        self.check_readable(name)?;
        if let Some(state) = self
            .state_script
            .lock()
            .unwrap()
            .get_mut(name)
            .and_then(VecDeque::pop_front)
        {
            return Ok(state);
        }
        match self.lookup(name).map(|i| i.state.clone()) {
            Some(Ok(state)) => Ok(state),
            _ => Err(Self::fail(name)),
        }
    }

    fn hardware_address(&self, name: &str) -> Result<String, RegistryError> {
        self.check_readable(name)?;
        self.lookup(name)
            .map(|i| i.address.clone())
            .ok_or_else(|| Self::fail(name))
    }

    fn interfaces(&self) -> Result<Vec<String>, RegistryError> {
        self.check_readable("")?;
        Ok(self.interfaces.iter().map(|(n, _)| n.clone()).collect())
    }
}

/// Scripted outcome for one program.
#[derive(Debug, Clone)]
enum Scripted {
    Exit(i32, String),
    SpawnFailure,
}

/// Spy runner recording every invocation.
///
/// Programs without a scripted outcome behave as if not installed.
#[derive(Default)]
pub struct SpyRunner {
    outcomes: HashMap<String, Scripted>,
    calls: Mutex<Vec<String>>,
}

impl SpyRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exits(self, program: &str, code: i32) -> Self {
        self.prints(program, code, "")
    }

    pub fn prints(mut self, program: &str, code: i32, output: &str) -> Self {
        self.outcomes
            .insert(program.to_string(), Scripted::Exit(code, output.to_string()));
        self
    }

    pub fn spawn_fails(mut self, program: &str) -> Self {
        self.outcomes
            .insert(program.to_string(), Scripted::SpawnFailure);
        self
    }

    /// Returns every invocation as `program arg1 arg2 ...`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CommandRunner for SpyRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().unwrap().push(line);

        match self.outcomes.get(program) {
            Some(Scripted::Exit(code, output)) => Ok(CommandOutput::new(Some(*code), output.clone())),
            Some(Scripted::SpawnFailure) => Err(CommandError::Spawn {
                program: program.to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "fake spawn failure"),
            }),
            None => Err(CommandError::NotFound {
                program: program.to_string(),
            }),
        }
    }
}

/// Sleeper that records requested durations instead of blocking.
#[derive(Default)]
pub struct RecordingSleeper {
    requests: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<Duration> {
        self.requests.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.requests.lock().unwrap().push(duration);
    }
}
