//! Subcommand execution.
//!
//! Each subcommand is a small function over the library's trait seams so the
//! behavior can be exercised against a fake registry and command runner.

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use wlan_iface::config::{Command, ValidatedConfig};
use wlan_iface::interface::{
    CommandRunner, InterfaceController, InterfaceDiscovery, InterfaceRegistry,
    InterfaceStateChecker, InterfaceStatus, LinkAction, LinkError, RegistryError, SysfsRegistry,
    SystemRunner,
};
use wlan_iface::network::{AddressError, NetworkAddress};
use wlan_iface::system::{PlatformReport, SetupError, Workspace};
use wlan_iface::time::Sleeper;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Discovery found nothing to select.
    #[error("No wireless interfaces found")]
    NoInterfaces,

    /// The named interface is not in the registry.
    #[error("Interface '{name}' not found")]
    UnknownInterface {
        /// Requested interface name
        name: String,
    },

    /// A lifecycle operation failed.
    #[error("Failed to bring {name} {action}: {source}")]
    Link {
        /// Interface name
        name: String,
        /// Requested transition
        action: LinkAction,
        /// Underlying failure
        #[source]
        source: LinkError,
    },

    /// The registry could not be read.
    #[error("Failed to read interface state: {0}")]
    Registry(#[from] RegistryError),

    /// The hardware address argument is malformed.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Workspace directories could not be created.
    #[error("Failed to set up workspace: {0}")]
    Setup(#[from] SetupError),

    /// Missing privileges or tools.
    #[error("Host is not ready (root: {root}, missing tools: {missing})")]
    NotReady {
        /// Whether the process runs as root
        root: bool,
        /// Comma-separated missing tools, or "none"
        missing: String,
    },

    /// Failed to serialize output.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write output.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Executes the configured subcommand against the real host.
///
/// # Errors
///
/// Returns the first failure of the subcommand; see [`RunError`].
#[cfg(not(tarpaulin_include))]
pub fn execute(config: &ValidatedConfig) -> Result<(), RunError> {
    let registry = SysfsRegistry::new(config.sysfs_root.clone());
    let runner = SystemRunner;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &config.command {
        // Handled before configuration is loaded
        Command::Init { .. } => Ok(()),
        Command::List => list(&discovery(config, &registry, runner), &mut out),
        Command::Select { interactive } => {
            let stdin = io::stdin();
            select(
                &discovery(config, &registry, runner),
                *interactive,
                &mut stdin.lock(),
                &mut out,
            )
        }
        Command::Up { interface } => {
            bring_up(&controller(config, &registry, runner), interface, &mut out)
        }
        Command::Down { interface } => {
            bring_down(&controller(config, &registry, runner), interface, &mut out)
        }
        Command::Status { interface, json } => status(
            &InterfaceStateChecker::new(&registry),
            interface,
            *json,
            &mut out,
        ),
        Command::Mac { address } => mac(address, &mut out),
        Command::Check { json } => check(&PlatformReport::probe(), *json, &mut out),
        Command::Setup => setup(&config.data_dir, &mut out),
    }
}

fn discovery<R, C>(config: &ValidatedConfig, registry: R, runner: C) -> InterfaceDiscovery<R, C>
where
    R: InterfaceRegistry,
    C: CommandRunner,
{
    InterfaceDiscovery::new(registry, runner).with_list_tool(config.list_tool.clone())
}

fn controller<R, C>(config: &ValidatedConfig, registry: R, runner: C) -> InterfaceController<R, C>
where
    R: InterfaceRegistry,
    C: CommandRunner,
{
    InterfaceController::new(registry, runner)
        .with_backends(config.backends.iter().copied())
        .with_grace_period(config.grace_period)
}

/// Prints one wireless interface per line.
fn list<R, C, W>(discovery: &InterfaceDiscovery<R, C>, out: &mut W) -> Result<(), RunError>
where
    R: InterfaceRegistry,
    C: CommandRunner,
    W: Write,
{
    let interfaces = discovery.list_wireless_interfaces();
    if interfaces.is_empty() {
        tracing::warn!("No wireless interfaces found");
    }
    for name in interfaces {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn select<R, C, I, W>(
    discovery: &InterfaceDiscovery<R, C>,
    interactive: bool,
    input: &mut I,
    out: &mut W,
) -> Result<(), RunError>
where
    R: InterfaceRegistry,
    C: CommandRunner,
    I: BufRead,
    W: Write,
{
    let name = discovery
        .select_interface_with(interactive, input, out)
        .ok_or(RunError::NoInterfaces)?;
    writeln!(out, "{name}")?;
    Ok(())
}

fn bring_up<R, C, S, W>(
    controller: &InterfaceController<R, C, S>,
    name: &str,
    out: &mut W,
) -> Result<(), RunError>
where
    R: InterfaceRegistry,
    C: CommandRunner,
    S: Sleeper,
    W: Write,
{
    controller
        .try_bring_up(name)
        .map_err(|source| RunError::Link {
            name: name.to_string(),
            action: LinkAction::Up,
            source,
        })?;
    tracing::info!("{name} is up");
    writeln!(out, "{name}: up")?;
    Ok(())
}

fn bring_down<R, C, S, W>(
    controller: &InterfaceController<R, C, S>,
    name: &str,
    out: &mut W,
) -> Result<(), RunError>
where
    R: InterfaceRegistry,
    C: CommandRunner,
    S: Sleeper,
    W: Write,
{
    controller
        .try_bring_down(name)
        .map_err(|source| RunError::Link {
            name: name.to_string(),
            action: LinkAction::Down,
            source,
        })?;
    tracing::info!("{name} is down");
    writeln!(out, "{name}: down")?;
    Ok(())
}

/// JSON shape of `status --json`.
#[derive(Serialize)]
struct StatusView<'a> {
    #[serde(flatten)]
    status: &'a InterfaceStatus,
    usable: bool,
}

fn status<R, W>(
    checker: &InterfaceStateChecker<R>,
    name: &str,
    json: bool,
    out: &mut W,
) -> Result<(), RunError>
where
    R: InterfaceRegistry,
    W: Write,
{
    let status = checker
        .status(name)?
        .ok_or_else(|| RunError::UnknownInterface {
            name: name.to_string(),
        })?;

    if json {
        let view = StatusView {
            status: &status,
            usable: status.is_usable(),
        };
        serde_json::to_writer_pretty(&mut *out, &view)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "name:     {}", status.name)?;
    writeln!(out, "wireless: {}", yes_no(status.wireless))?;
    writeln!(out, "state:    {}", status.state)?;
    match &status.hardware_address {
        Some(address) => writeln!(out, "address:  {address} ({})", address.integer())?,
        None => writeln!(out, "address:  unknown")?,
    }
    writeln!(out, "usable:   {}", yes_no(status.is_usable()))?;
    Ok(())
}

fn mac<W: Write>(input: &str, out: &mut W) -> Result<(), RunError> {
    let address = NetworkAddress::new(input)?;
    writeln!(out, "{address}")?;
    writeln!(out, "{}", address.integer())?;
    Ok(())
}

fn check<W: Write>(report: &PlatformReport, json: bool, out: &mut W) -> Result<(), RunError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "android:       {}", yes_no(report.android))?;
        if let Some(arch) = report.arch {
            writeln!(out, "arch:          {arch}")?;
        }
        writeln!(out, "root:          {}", yes_no(report.root))?;
        writeln!(out, "missing tools: {}", missing_list(report))?;
    }

    if report.is_ready() {
        Ok(())
    } else {
        Err(RunError::NotReady {
            root: report.root,
            missing: missing_list(report),
        })
    }
}

fn setup<W: Write>(data_dir: &Path, out: &mut W) -> Result<(), RunError> {
    let workspace = Workspace::init(data_dir)?;
    for dir in workspace.directories() {
        writeln!(out, "{}", dir.display())?;
    }
    Ok(())
}

fn missing_list(report: &PlatformReport) -> String {
    if report.missing_tools.is_empty() {
        "none".to_string()
    } else {
        report.missing_tools.join(", ")
    }
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
