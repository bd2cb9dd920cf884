//! Host platform probes: Android detection, privileges, and required tools.

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Tools the auditing workflow shells out to.
pub const REQUIRED_TOOLS: &[&str] = &["iwconfig", "ifconfig", "ip", "wpa_supplicant", "wpa_cli"];

/// Additional tools needed on Android (Termux) hosts.
pub const ANDROID_TOOLS: &[&str] = &["su", "tsu"];

/// Filesystem paths whose presence indicates an Android host.
const ANDROID_PATHS: &[&str] = &["system/app", "data/data/com.termux"];

/// Environment variables set on Android hosts.
const ANDROID_ENV: &[&str] = &["ANDROID_ROOT", "ANDROID_DATA"];

/// CPU architecture family of an Android host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AndroidArch {
    /// 64-bit ARM.
    Arm64,
    /// 32-bit ARM.
    Arm,
    /// 64-bit x86.
    X86_64,
    /// 32-bit x86.
    X86,
}

impl AndroidArch {
    /// Maps a machine name (`aarch64`, `armv7l`, `amd64`, ...) to an architecture.
    #[must_use]
    pub fn from_machine(machine: &str) -> Option<Self> {
        let machine = machine.to_lowercase();
        match machine.as_str() {
            "aarch64" | "arm64" => Some(Self::Arm64),
            m if m.starts_with("arm") => Some(Self::Arm),
            "x86_64" | "amd64" => Some(Self::X86_64),
            "i686" | "x86" => Some(Self::X86),
            _ => None,
        }
    }
}

impl fmt::Display for AndroidArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arm64 => write!(f, "arm64"),
            Self::Arm => write!(f, "arm"),
            Self::X86_64 => write!(f, "x86_64"),
            Self::X86 => write!(f, "x86"),
        }
    }
}

/// Returns true if the process runs on Android.
///
/// Any one indicator suffices: Android system directories, a Termux
/// install, Android environment variables, or the target OS itself.
#[must_use]
pub fn is_android() -> bool {
    android_indicators(
        Path::new("/"),
        |key| std::env::var_os(key).is_some(),
        std::env::consts::OS,
    )
}

fn android_indicators(root: &Path, has_env: impl Fn(&str) -> bool, os: &str) -> bool {
    ANDROID_PATHS.iter().any(|p| root.join(p).exists())
        || ANDROID_ENV.iter().any(|key| has_env(key))
        || os.eq_ignore_ascii_case("android")
}

/// Returns the Android architecture, or `None` off Android or for unknown CPUs.
#[must_use]
pub fn android_arch() -> Option<AndroidArch> {
    if !is_android() {
        return None;
    }
    AndroidArch::from_machine(&machine_name())
}

/// Returns the running kernel's machine name (`uname -m`), which may differ
/// from the architecture this binary was built for.
#[cfg(unix)]
#[must_use]
pub fn machine_name() -> String {
    let mut uts = std::mem::MaybeUninit::<libc::utsname>::uninit();
    // SAFETY: uname only writes into the provided buffer.
    if unsafe { libc::uname(uts.as_mut_ptr()) } != 0 {
        return std::env::consts::ARCH.to_string();
    }
    // SAFETY: uname returned 0, so the struct is initialized and every
    // field is NUL-terminated.
    let uts = unsafe { uts.assume_init() };
    let machine = unsafe { std::ffi::CStr::from_ptr(uts.machine.as_ptr()) };
    machine.to_string_lossy().into_owned()
}

/// Returns the architecture this binary was built for.
#[cfg(not(unix))]
#[must_use]
pub fn machine_name() -> String {
    std::env::consts::ARCH.to_string()
}

/// Returns true if the process has root privileges.
///
/// On Android a writable `/system` also counts, as `su` shells may keep a
/// non-zero uid.
#[cfg(unix)]
#[must_use]
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    if unsafe { libc::geteuid() } == 0 {
        return true;
    }
    // SAFETY: the path is a valid NUL-terminated C string literal.
    is_android() && unsafe { libc::access(c"/system".as_ptr(), libc::W_OK) } == 0
}

/// Returns true if the process has root privileges.
#[cfg(not(unix))]
#[must_use]
pub const fn is_root() -> bool {
    false
}

/// Returns the tools required on this kind of host.
#[must_use]
pub fn required_tools(android: bool) -> Vec<&'static str> {
    let mut tools = REQUIRED_TOOLS.to_vec();
    if android {
        tools.extend_from_slice(ANDROID_TOOLS);
    }
    tools
}

/// Returns the subset of `tools` not found in any directory of `path_var`.
///
/// `path_var` uses the platform `PATH` syntax; `None` means every tool is missing.
#[must_use]
pub fn missing_tools<'a>(tools: &[&'a str], path_var: Option<&OsStr>) -> Vec<&'a str> {
    let dirs: Vec<_> = path_var
        .map(|p| std::env::split_paths(p).collect())
        .unwrap_or_default();

    tools
        .iter()
        .copied()
        .filter(|tool| !dirs.iter().any(|dir| dir.join(tool).exists()))
        .collect()
}

/// Returns true if every required tool is on `PATH`.
#[must_use]
pub fn check_dependencies() -> bool {
    PlatformReport::probe().missing_tools.is_empty()
}

/// Summary of the host probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformReport {
    /// Running on Android.
    pub android: bool,
    /// Android architecture, if known.
    pub arch: Option<AndroidArch>,
    /// Running with root privileges.
    pub root: bool,
    /// Required tools missing from `PATH`.
    pub missing_tools: Vec<&'static str>,
}

impl PlatformReport {
    /// Probes the current host.
    #[must_use]
    pub fn probe() -> Self {
        let android = is_android();
        let path = std::env::var_os("PATH");
        Self {
            android,
            arch: android_arch(),
            root: is_root(),
            missing_tools: missing_tools(&required_tools(android), path.as_deref()),
        }
    }

    /// Returns true if the host can run the auditing workflow.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.root && self.missing_tools.is_empty()
    }
}
