//! Wireless interface discovery and selection.

use std::io::{self, BufRead, Write};
use std::sync::LazyLock;

use regex::Regex;

use super::command::CommandRunner;
use super::registry::{InterfaceRegistry, RegistryError};

/// Default listing tool.
pub const DEFAULT_LIST_TOOL: &str = "iwconfig";

/// A word token followed by the literal `IEEE`, as in `wlan0     IEEE 802.11  ESSID:off/any`.
static IEEE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s+IEEE").expect("IEEE marker pattern is valid"));

/// Extracts wireless interface names from listing-tool output, in output order.
#[must_use]
pub fn parse_listing(output: &str) -> Vec<String> {
    IEEE_MARKER
        .captures_iter(output)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Finds wireless-capable interfaces and picks one of them.
///
/// # Discovery order
///
/// 1. Run the listing tool (`iwconfig` by default) and collect every
///    interface it reports as IEEE 802.11.
/// 2. If the tool is missing or exits non-zero, scan the registry for
///    interfaces carrying the wireless marker.
/// 3. If the registry is unreadable, report no interfaces.
///
/// The order follows the tool output (or sorted registry names) and is not
/// guaranteed to be stable across OS or driver versions.
pub struct InterfaceDiscovery<R, C> {
    registry: R,
    runner: C,
    list_tool: String,
}

impl<R, C> InterfaceDiscovery<R, C>
where
    R: InterfaceRegistry,
    C: CommandRunner,
{
    /// Creates a discovery using the default listing tool.
    #[must_use]
    pub fn new(registry: R, runner: C) -> Self {
        Self {
            registry,
            runner,
            list_tool: DEFAULT_LIST_TOOL.to_string(),
        }
    }

    /// Overrides the listing tool program.
    #[must_use]
    pub fn with_list_tool(mut self, program: impl Into<String>) -> Self {
        self.list_tool = program.into();
        self
    }

    /// Returns the listing tool program.
    #[must_use]
    pub fn list_tool(&self) -> &str {
        &self.list_tool
    }

    /// Lists wireless interfaces in discovery order.
    ///
    /// Never fails; an empty list means nothing usable was found.
    #[must_use]
    pub fn list_wireless_interfaces(&self) -> Vec<String> {
        if let Some(names) = self.list_from_tool() {
            return names;
        }

        match self.list_from_registry() {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("Wireless interface scan failed: {e}");
                Vec::new()
            }
        }
    }

    /// Returns `None` when the tool is unavailable or fails.
    fn list_from_tool(&self) -> Option<Vec<String>> {
        match self.runner.run(&self.list_tool, &[]) {
            Ok(output) if output.success() => {
                let names = parse_listing(&output.output);
                tracing::debug!("{} reported {} wireless interface(s)", self.list_tool, names.len());
                Some(names)
            }
            Ok(output) => {
                tracing::debug!(
                    "{} exited with {:?}, scanning registry instead",
                    self.list_tool,
                    output.code
                );
                None
            }
            Err(e) => {
                tracing::debug!("{e}, scanning registry instead");
                None
            }
        }
    }

    fn list_from_registry(&self) -> Result<Vec<String>, RegistryError> {
        let mut wireless = Vec::new();
        for name in self.registry.interfaces()? {
            match self.registry.is_wireless(&name) {
                Ok(true) => wireless.push(name),
                Ok(false) => {}
                Err(e) => tracing::debug!("Skipping {name}: {e}"),
            }
        }
        tracing::debug!("Registry scan found {} wireless interface(s)", wireless.len());
        Ok(wireless)
    }

    /// Discovers interfaces and picks one, prompting on the terminal if asked.
    ///
    /// See [`select_from`] for the selection rules.
    #[must_use]
    pub fn select_interface(&self, interactive: bool) -> Option<String> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        self.select_interface_with(interactive, &mut input, &mut output)
    }

    /// Like [`Self::select_interface`] with explicit input and output streams.
    #[must_use]
    pub fn select_interface_with<I: BufRead, W: Write>(
        &self,
        interactive: bool,
        input: &mut I,
        output: &mut W,
    ) -> Option<String> {
        let candidates = self.list_wireless_interfaces();
        select_from(candidates, interactive, input, output)
    }
}

/// Picks one interface from `candidates`.
///
/// - No candidates: `None`.
/// - One candidate: returned without prompting.
/// - Several, non-interactive: the first.
/// - Several, interactive: a 1-based numbered list is written to `output`
///   and one line is read from `input`. A valid number selects that entry;
///   anything else (including read errors) selects the first. There is no
///   re-prompt.
pub fn select_from<I: BufRead, W: Write>(
    mut candidates: Vec<String>,
    interactive: bool,
    input: &mut I,
    output: &mut W,
) -> Option<String> {
    match candidates.len() {
        0 => return None,
        1 => return candidates.pop(),
        _ => {}
    }

    if interactive {
        if let Err(e) = write_menu(&candidates, output) {
            tracing::debug!("Failed to write interface menu: {e}");
        }
        if let Some(index) = read_choice(input, candidates.len()) {
            return Some(candidates.swap_remove(index));
        }
        tracing::debug!("No valid selection, using {}", candidates[0]);
    }

    Some(candidates.swap_remove(0))
}

fn write_menu<W: Write>(candidates: &[String], output: &mut W) -> io::Result<()> {
    writeln!(output, "\nAvailable wireless interfaces:")?;
    for (number, name) in candidates.iter().enumerate() {
        writeln!(output, "{}. {name}", number + 1)?;
    }
    write!(output, "\nSelect interface number: ")?;
    output.flush()
}

/// Reads one line and returns the zero-based index it selects, if valid.
fn read_choice<I: BufRead>(input: &mut I, count: usize) -> Option<usize> {
    let mut line = String::new();
    input.read_line(&mut line).ok()?;
    let choice: usize = line.trim().parse().ok()?;
    (1..=count).contains(&choice).then(|| choice - 1)
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
