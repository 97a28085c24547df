fn main() {
    println!("Run `cargo test -p output-compat` to execute output compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use headsup_protocol::{BatteryReading, Capabilities, Capability, ChatMix, ControlOutput};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture captured from real HeadsetControl output and parses
    /// it through the schema the indicator uses.
    fn load_fixture(name: &str) -> ControlOutput {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    #[test]
    fn battery_available_maps_to_percent() {
        let output = load_fixture("battery_available.json");
        assert_eq!(
            BatteryReading::from_output(&output),
            BatteryReading::Percent(85)
        );

        let caps = Capabilities::from_output(&output);
        assert!(caps.supports(Capability::Battery));
        assert!(caps.supports(Capability::Sidetone));
        assert!(caps.supports(Capability::ChatMix));
        assert!(caps.supports(Capability::InactiveTime));
        assert!(!caps.supports(Capability::Led));

        assert_eq!(ChatMix::from_output(&output), ChatMix::Level(64));
    }

    #[test]
    fn battery_charging_maps_to_charging() {
        let output = load_fixture("battery_charging.json");
        assert_eq!(BatteryReading::from_output(&output), BatteryReading::Charging);
        assert!(Capabilities::from_output(&output).supports(Capability::Led));
    }

    #[test]
    fn battery_unavailable_ignores_sentinel_level() {
        // The tool reports level -1 alongside the unavailable status; the
        // status must win.
        let output = load_fixture("battery_unavailable.json");
        assert_eq!(
            BatteryReading::from_output(&output),
            BatteryReading::Unavailable
        );
    }

    #[test]
    fn no_device_is_unavailable() {
        let output = load_fixture("no_device.json");
        assert_eq!(
            BatteryReading::from_output(&output),
            BatteryReading::Unavailable
        );
        assert!(Capabilities::from_output(&output).is_empty());
        assert_eq!(ChatMix::from_output(&output), ChatMix::NoDevice);
    }

    #[test]
    fn chatmix_error_string_surfaces() {
        let output = load_fixture("chatmix_error.json");
        assert_eq!(
            ChatMix::from_output(&output),
            ChatMix::Fault("failed to read chatmix state".into())
        );
        // Battery data in the same document is unaffected.
        assert_eq!(
            BatteryReading::from_output(&output),
            BatteryReading::Percent(40)
        );
    }

    #[test]
    fn unknown_capability_strings_are_skipped() {
        let output = load_fixture("capabilities_probe.json");
        let caps = Capabilities::from_output(&output);
        assert!(caps.supports(Capability::Battery));
        assert!(caps.supports(Capability::Sidetone));
        assert!(caps.supports(Capability::Led));
        // CAP_NOTIFICATION_SOUND is not a feature the indicator drives.
        assert!(!caps.supports(Capability::ChatMix));
        assert!(!caps.supports(Capability::InactiveTime));
    }

    #[test]
    fn all_fixtures_parse() {
        for entry in fs::read_dir(fixtures_dir()).unwrap() {
            let path = entry.unwrap().path();
            if path.extension().is_some_and(|e| e == "json") {
                let name = path.file_name().unwrap().to_str().unwrap();
                load_fixture(name);
            }
        }
    }
}
