#![cfg(all(unix, feature = "cli"))]

use std::process::{Command, Output};

fn archon(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_archon"))
        .env_remove("ARCHON_PORT")
        .env_remove("ARCHON_BAUD")
        .arg("--log-level")
        .arg("error")
        .args(args)
        .output()
        .expect("archon should run")
}

#[test]
fn colors_raw_output_is_wire_bytes() {
    let output = archon(&["--dry-run", "--format", "raw", "colors", "RGB"]);

    assert!(output.status.success());
    let payload: [u8; 12] = [0, 255, 0, 0, 1, 0, 255, 0, 2, 0, 0, 255];
    let checksum = payload.iter().fold(12u8 ^ 0x04, |acc, b| acc ^ b);
    let mut expected = vec![0x15, 0x04, 12];
    expected.extend_from_slice(&payload);
    expected.push(checksum);
    assert_eq!(output.stdout, expected);
}

#[test]
fn colors_split_into_batches() {
    let output = archon(&["--dry-run", "--format", "json", "colors", "RRRRR"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lengths: Vec<u64> = stdout
        .lines()
        .map(|line| {
            let packet: serde_json::Value =
                serde_json::from_str(line).expect("each line should be json");
            assert_eq!(packet["type_name"], "LED_DATA");
            packet["length"].as_u64().expect("length should be a number")
        })
        .collect();
    assert_eq!(lengths, vec![16, 4]);
}

#[test]
fn send_json_reports_checksum() {
    let output = archon(&["--dry-run", "--format", "json", "send", "1", "0x10", "0x20", "0x30"]);

    assert!(output.status.success());
    let packet: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("send should emit json");
    assert_eq!(packet["packet_type"], 1);
    assert_eq!(packet["length"], 3);
    assert_eq!(packet["checksum"], 2);
    assert_eq!(packet["wire"], "15 01 03 10 20 30 02");
}

#[test]
fn pretty_output_lists_fields() {
    let output = archon(&["--dry-run", "--format", "pretty", "send", "1", "10", "255"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("SOM:\t0x15"));
    assert!(stdout.contains("DATA:\t0x0a:0xff"));
    assert!(stdout.contains("CHKSM:\t0xf6"));
}

#[test]
fn ctrl_copy_payload() {
    let output = archon(&["--dry-run", "--format", "raw", "ctrl", "copy", "1", "2", "3"]);

    assert!(output.status.success());
    let checksum = 4 ^ 0x03 ^ 0x43 ^ 1 ^ 2 ^ 3;
    assert_eq!(output.stdout, vec![0x15, 0x03, 4, 0x43, 1, 2, 3, checksum]);
}

#[test]
fn custom_code_is_usable() {
    let output = archon(&[
        "--dry-run", "--format", "raw", "colors", "P", "--code", "P=010203",
    ]);

    assert!(output.status.success());
    assert_eq!(&output.stdout[3..7], &[0, 1, 2, 3]);
}

#[test]
fn unknown_color_code_is_data_invalid() {
    let output = archon(&["--dry-run", "colors", "Z"]);

    assert_eq!(output.status.code(), Some(60));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown color code"));
}

#[test]
fn truncated_escape_is_data_invalid() {
    let output = archon(&["--dry-run", "colors", "#FF00"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn escape_code_registration_rejected() {
    let output = archon(&[
        "--dry-run", "colors", "R", "--code", "#=FFFFFF", "--overwrite",
    ]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn decode_prints_led_data_packet() {
    let output = archon(&["--dry-run", "--format", "json", "decode", "15 04 04 00 ff 00 ff 00"]);

    assert!(output.status.success());
    let packet: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("decode should emit json");
    assert_eq!(packet["type_name"], "LED_DATA");
    assert_eq!(packet["advisory"], false);
    assert_eq!(packet["payload"], "00:ff:00:ff");
}

#[test]
fn busy_packet_is_advisory() {
    let output = archon(&["--dry-run", "--format", "json", "send", "2"]);

    assert!(output.status.success());
    let packet: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("send should emit json");
    assert_eq!(packet["type_name"], "BUSY");
    assert_eq!(packet["advisory"], true);
}

#[test]
fn missing_serial_device_is_transport_error() {
    let port = format!("/dev/archon-missing-{}", std::process::id());
    let output = archon(&["--port", port.as_str(), "ctrl", "push"]);

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&port));
}

#[test]
fn version_prints_package_version() {
    let output = archon(&["version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
