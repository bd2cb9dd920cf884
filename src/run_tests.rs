//! Tests for the run module.

use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;

use tempfile::TempDir;

use wlan_iface::config::Cli;
use wlan_iface::interface::{CommandError, CommandOutput, LinkBackend};

use super::*;

/// Runner with a fixed exit code and output per program. Unknown programs
/// are reported as not installed.
#[derive(Default)]
struct FakeRunner {
    programs: HashMap<String, (i32, String)>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    fn with(mut self, program: &str, code: i32, output: &str) -> Self {
        self.programs
            .insert(program.to_string(), (code, output.to_string()));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{program} {}", args.join(" ")));
        match self.programs.get(program) {
            Some((code, output)) => Ok(CommandOutput::new(Some(*code), output.clone())),
            None => Err(CommandError::NotFound {
                program: program.to_string(),
            }),
        }
    }
}

fn add_interface(root: &Path, name: &str, wireless: bool, operstate: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("operstate"), format!("{operstate}\n")).unwrap();
    fs::write(dir.join("address"), "aa:bb:cc:dd:ee:ff\n").unwrap();
    if wireless {
        fs::create_dir(dir.join("wireless")).unwrap();
    }
}

fn fake_sysfs() -> (TempDir, SysfsRegistry) {
    let dir = tempfile::tempdir().unwrap();
    add_interface(dir.path(), "wlan0", true, "up");
    add_interface(dir.path(), "eth0", false, "down");
    let registry = SysfsRegistry::new(dir.path());
    (dir, registry)
}

fn config(args: &[&str]) -> ValidatedConfig {
    let mut full_args = vec!["wlan-iface", "--grace-period-ms", "0"];
    full_args.extend(args);
    ValidatedConfig::from_raw(&Cli::parse_from_iter(full_args), None).unwrap()
}

fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).unwrap()
}

mod run_error {
    use super::*;

    #[test]
    fn no_interfaces_displays_message() {
        assert_eq!(
            RunError::NoInterfaces.to_string(),
            "No wireless interfaces found"
        );
    }

    #[test]
    fn link_error_names_interface_and_action() {
        let error = RunError::Link {
            name: "wlan0".to_string(),
            action: LinkAction::Up,
            source: LinkError::NoBackends,
        };

        assert_eq!(
            error.to_string(),
            "Failed to bring wlan0 up: No link backends configured"
        );
    }

    #[test]
    fn not_ready_lists_missing_tools() {
        let error = RunError::NotReady {
            root: false,
            missing: "iwconfig, ip".to_string(),
        };

        assert!(error.to_string().contains("root: false"));
        assert!(error.to_string().contains("iwconfig, ip"));
    }
}

mod listing {
    use super::*;

    #[test]
    fn list_prints_tool_results() {
        let (_dir, registry) = fake_sysfs();
        let runner = FakeRunner::default().with(
            "iwconfig",
            0,
            "wlan1     IEEE 802.11  ESSID:off/any\nlo        no wireless extensions.\n",
        );
        let mut out = Vec::new();

        list(&discovery(&config(&["list"]), &registry, &runner), &mut out).unwrap();

        assert_eq!(output(out), "wlan1\n");
    }

    #[test]
    fn list_falls_back_to_registry() {
        let (_dir, registry) = fake_sysfs();
        let runner = FakeRunner::default();
        let mut out = Vec::new();

        list(&discovery(&config(&["list"]), &registry, &runner), &mut out).unwrap();

        assert_eq!(output(out), "wlan0\n");
    }

    #[test]
    fn list_uses_configured_tool() {
        let (_dir, registry) = fake_sysfs();
        let runner = FakeRunner::default();
        let mut out = Vec::new();

        let cfg = config(&["--list-tool", "iw", "list"]);
        list(&discovery(&cfg, &registry, &runner), &mut out).unwrap();

        assert_eq!(runner.calls(), vec!["iw ".to_string()]);
    }

    #[test]
    fn select_without_interfaces_fails() {
        let dir = tempfile::tempdir().unwrap();
        let registry = SysfsRegistry::new(dir.path());
        let runner = FakeRunner::default();
        let mut out = Vec::new();

        let result = select(
            &discovery(&config(&["select"]), &registry, &runner),
            false,
            &mut io::empty(),
            &mut out,
        );

        assert!(matches!(result, Err(RunError::NoInterfaces)));
    }

    #[test]
    fn interactive_select_prints_choice() {
        let (_dir, registry) = fake_sysfs();
        let runner = FakeRunner::default().with(
            "iwconfig",
            0,
            "wlan0     IEEE 802.11\nwlan1     IEEE 802.11\n",
        );
        let mut input = "2\n".as_bytes();
        let mut out = Vec::new();

        select(
            &discovery(&config(&["select"]), &registry, &runner),
            true,
            &mut input,
            &mut out,
        )
        .unwrap();

        let text = output(out);
        assert!(text.contains("1. wlan0"));
        assert!(text.ends_with("wlan1\n"));
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn bring_up_reports_success() {
        let (_dir, registry) = fake_sysfs();
        let runner = FakeRunner::default().with("ip", 0, "");
        let mut out = Vec::new();

        bring_up(
            &controller(&config(&["up", "wlan0"]), &registry, &runner),
            "wlan0",
            &mut out,
        )
        .unwrap();

        assert_eq!(output(out), "wlan0: up\n");
        assert_eq!(runner.calls(), vec!["ip link set wlan0 up".to_string()]);
    }

    #[test]
    fn bring_up_unknown_interface_fails() {
        let (_dir, registry) = fake_sysfs();
        let runner = FakeRunner::default().with("ip", 0, "");
        let mut out = Vec::new();

        let result = bring_up(
            &controller(&config(&["up", "wlan9"]), &registry, &runner),
            "wlan9",
            &mut out,
        );

        assert!(matches!(
            result,
            Err(RunError::Link {
                action: LinkAction::Up,
                source: LinkError::NotFound { .. },
                ..
            })
        ));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn bring_down_uses_configured_backends() {
        let (_dir, registry) = fake_sysfs();
        let runner = FakeRunner::default()
            .with("ip", 0, "")
            .with("ifconfig", 0, "");
        let mut out = Vec::new();

        let cfg = config(&["--backend", "ifconfig", "down", "wlan0"]);
        assert_eq!(cfg.backends, vec![LinkBackend::Ifconfig]);
        bring_down(&controller(&cfg, &registry, &runner), "wlan0", &mut out).unwrap();

        assert_eq!(output(out), "wlan0: down\n");
        assert_eq!(runner.calls(), vec!["ifconfig wlan0 down".to_string()]);
    }

    #[test]
    fn bring_down_reports_last_backend_failure() {
        let (_dir, registry) = fake_sysfs();
        let runner = FakeRunner::default().with("ip", 2, "RTNETLINK answers");
        let mut out = Vec::new();

        let result = bring_down(
            &controller(&config(&["down", "wlan0"]), &registry, &runner),
            "wlan0",
            &mut out,
        );

        assert!(matches!(
            result,
            Err(RunError::Link {
                action: LinkAction::Down,
                source: LinkError::BackendUnavailable {
                    backend: LinkBackend::Ifconfig
                },
                ..
            })
        ));
        assert!(out.is_empty());
    }
}

mod status_output {
    use super::*;

    #[test]
    fn status_prints_fields() {
        let (_dir, registry) = fake_sysfs();
        let mut out = Vec::new();

        status(
            &InterfaceStateChecker::new(&registry),
            "wlan0",
            false,
            &mut out,
        )
        .unwrap();

        let text = output(out);
        assert!(text.contains("wireless: yes"));
        assert!(text.contains("state:    up"));
        assert!(text.contains("AABBCCDDEEFF (187723572702975)"));
        assert!(text.contains("usable:   yes"));
    }

    #[test]
    fn status_json_includes_usable_flag() {
        let (_dir, registry) = fake_sysfs();
        let mut out = Vec::new();

        status(&InterfaceStateChecker::new(&registry), "eth0", true, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["name"], "eth0");
        assert_eq!(value["wireless"], false);
        assert_eq!(value["state"], "down");
        assert_eq!(value["hardware_address"], "AABBCCDDEEFF");
        assert_eq!(value["usable"], false);
    }

    #[test]
    fn status_unknown_interface_fails() {
        let (_dir, registry) = fake_sysfs();
        let mut out = Vec::new();

        let result = status(&InterfaceStateChecker::new(&registry), "wlan9", false, &mut out);

        assert!(matches!(
            result,
            Err(RunError::UnknownInterface { ref name }) if name == "wlan9"
        ));
    }
}

mod mac_output {
    use super::*;

    #[test]
    fn mac_prints_canonical_and_integer() {
        let mut out = Vec::new();

        mac("aa:bb:cc:dd:ee:ff", &mut out).unwrap();

        assert_eq!(output(out), "AABBCCDDEEFF\n187723572702975\n");
    }

    #[test]
    fn mac_rejects_malformed_input() {
        let mut out = Vec::new();

        let result = mac("aa:bb:cc", &mut out);

        assert!(matches!(result, Err(RunError::Address(_))));
        assert!(out.is_empty());
    }
}

mod host {
    use super::*;

    fn report(root: bool, missing_tools: Vec<&'static str>) -> PlatformReport {
        PlatformReport {
            android: false,
            arch: None,
            root,
            missing_tools,
        }
    }

    #[test]
    fn check_ready_host_succeeds() {
        let mut out = Vec::new();

        check(&report(true, Vec::new()), false, &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("root:          yes"));
        assert!(text.contains("missing tools: none"));
    }

    #[test]
    fn check_missing_tools_fails_after_printing() {
        let mut out = Vec::new();

        let result = check(&report(true, vec!["iwconfig", "wpa_cli"]), true, &mut out);

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["missing_tools"][1], "wpa_cli");
        assert!(matches!(
            result,
            Err(RunError::NotReady { root: true, ref missing }) if missing == "iwconfig, wpa_cli"
        ));
    }

    #[test]
    fn setup_creates_and_prints_directories() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let mut out = Vec::new();

        setup(&data_dir, &mut out).unwrap();

        let text = output(out);
        assert_eq!(text.lines().count(), 5);
        assert!(data_dir.join("handshakes").is_dir());
        assert!(text.contains("pixiewps"));
    }
}
