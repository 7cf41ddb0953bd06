use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing_test::traced_test;

use super::*;

fn snapshot(
    hex: &str,
    text: &str,
    stdout: &str,
    regs: &[(&str, i64)],
    mem: &[(&str, i64)],
) -> Snapshot {
    Snapshot {
        hex: hex.to_string(),
        text: text.to_string(),
        stdout: stdout.to_string(),
        regs: regs
            .iter()
            .map(|&(k, v)| (k.to_string(), v))
            .collect::<BTreeMap<_, _>>(),
        mem: mem.iter().map(|&(k, v)| (k.to_string(), v)).collect(),
    }
}

#[test]
fn text_segment_bounds_are_inclusive() {
    assert!(!is_text_address(TEXT_BEGIN - 4));
    assert!(is_text_address(TEXT_BEGIN));
    assert!(is_text_address(TEXT_END));
    assert!(!is_text_address(TEXT_END + 4));

    // MARS static data segment starts above the text segment.
    assert!(!is_text_address(0x1001_0000));
    // Kernel addresses (negative as i32) are data.
    assert!(!is_text_address(0x9000_0000));
}

#[test]
fn word_hex_pads_to_eight_digits() {
    assert_eq!(word_hex(0x0040_0000), "0x00400000");
    assert_eq!(word_hex(0xc), "0x0000000c");
    assert_eq!(word_hex(0xdead_beef), "0xdeadbeef");
    assert_eq!(word_hex(0), "0x00000000");
}

#[test]
fn parse_word_hex_accepts_unpadded_encodings() {
    // The simulator writes Integer.toHexString output, which drops
    // leading zeros.
    assert_eq!(parse_word_hex("0xc"), Some(0xc));
    assert_eq!(parse_word_hex("0x0000000c"), Some(0xc));
    assert_eq!(parse_word_hex("0x20090005"), Some(0x2009_0005));
    assert_eq!(parse_word_hex("20090005"), None);
    assert_eq!(parse_word_hex("0xzz"), None);
}

#[test]
fn parse_address_handles_signed_keys() {
    assert_eq!(parse_address("4194304"), Some(0x0040_0000));
    assert_eq!(parse_address("268501008"), Some(0x1001_0010));
    // Addresses above 0x7fffffff serialize negative through a Java int.
    assert_eq!(parse_address("-1879048192"), Some(0x9000_0000));
    assert_eq!(parse_address("pc"), None);
}

#[traced_test]
#[test]
fn snapshot_deserializes_with_defaults() {
    let raw = r#"{
        "hex": "0x20090005",
        "text": "addi $9, $0, 5",
        "stdout": "",
        "regs": {"$9": 5, "pc": 4194308},
        "mem": {"4194304": 537460741, "268501008": 99}
    }"#;
    let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
    assert_eq!(snapshot.hex, "0x20090005");
    assert_eq!(snapshot.regs["pc"], 4194308);
    assert_eq!(snapshot.mem["268501008"], 99);

    // The initial snapshot may carry nothing but state.
    let bare: Snapshot = serde_json::from_str(r#"{"regs": {}, "mem": {}}"#).unwrap();
    assert!(bare.hex.is_empty());
    assert!(bare.text.is_empty());
    assert!(bare.stdout.is_empty());

    let empty: Snapshot = serde_json::from_str("{}").unwrap();
    assert!(empty.regs.is_empty());
}

#[traced_test]
#[test]
fn session_partitions_memory_and_associates_assembly() {
    let steps = vec![
        snapshot(
            "",
            "",
            "",
            &[("pc", 0x0040_0000)],
            &[
                ("4194304", 0x2009_0005), // text: addi $9, $0, 5
                ("4194308", 0x0000_000c), // text: syscall
                ("268501008", 7),         // data
            ],
        ),
        snapshot(
            "0x20090005",
            "addi $9, $0, 5",
            "",
            &[("$9", 5), ("pc", 0x0040_0004)],
            &[("268501008", 42)],
        ),
    ];

    let mut session = Session::new(steps);
    assert_eq!(session.step(), 0);
    assert_eq!(session.instruction_count(), 2);
    assert_eq!(session.data().collect::<Vec<_>>(), vec![(0x1001_0010, 7)]);
    // Before any step executes, the highlight sits on the entry pc.
    assert_eq!(session.highlight(), 0x0040_0000);
    // No assembly known yet.
    assert!(session.instructions().all(|row| row.assembly.is_empty()));

    assert_eq!(session.advance(), StepOutcome::Advanced);
    assert_eq!(session.step(), 1);
    assert_eq!(session.registers().gpr[9], 5);
    assert_eq!(session.registers().pc, 0x0040_0004);
    // The executed instruction is highlighted at its own address, the
    // pre-step pc.
    assert_eq!(session.highlight(), 0x0040_0000);
    // Data rows show the latest value, in discovery order.
    assert_eq!(session.data().collect::<Vec<_>>(), vec![(0x1001_0010, 42)]);

    let first = session.instructions().next().unwrap();
    assert_eq!(first.address, 0x0040_0000);
    assert_eq!(first.assembly, "addi $9, $0, 5");
}

#[traced_test]
#[test]
fn session_assembly_is_sticky_and_registers_carry_over() {
    let steps = vec![
        snapshot(
            "",
            "",
            "",
            &[("$9", 5), ("pc", 0x0040_0000)],
            &[("4194304", 0x2009_0005), ("4194308", 0x0000_000c)],
        ),
        snapshot(
            "0x20090005",
            "addi $9, $0, 5",
            "",
            &[("pc", 0x0040_0004)],
            &[],
        ),
        // Unpadded encoding, the way the simulator writes small words.
        snapshot("0xc", "syscall", "5", &[("pc", 0x0040_0008)], &[]),
    ];

    let mut session = Session::new(steps);
    session.advance();
    session.advance();

    let rows: Vec<_> = session.instructions().collect();
    // A later step naming a different encoding does not clear earlier
    // associations.
    assert_eq!(rows[0].assembly, "addi $9, $0, 5");
    assert_eq!(rows[1].assembly, "syscall");

    // $9 was only present in the first snapshot; it keeps its value.
    assert_eq!(session.registers().gpr[9], 5);
    assert_eq!(session.transcript(), "5");
}

#[traced_test]
#[test]
fn session_advance_past_end_is_idempotent() {
    let steps = vec![snapshot("", "", "", &[("pc", 0x0040_0000)], &[])];
    let mut session = Session::new(steps);

    assert!(session.at_end());
    assert_eq!(session.advance(), StepOutcome::EndOfTrace);
    assert_eq!(session.advance(), StepOutcome::EndOfTrace);
    assert_eq!(session.step(), 0);
    assert_eq!(session.len(), 1);
}

#[test]
fn session_ignores_hex_matching_no_instruction() {
    let steps = vec![
        snapshot("", "", "", &[("pc", 0x0040_0000)], &[("4194304", 0x2009_0005)]),
        snapshot("0xffffffff", "???", "", &[("pc", 0x0040_0004)], &[]),
    ];
    let mut session = Session::new(steps);
    session.advance();
    assert!(session.instructions().all(|row| row.assembly.is_empty()));
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "mips-trace-viewer-{}-{}",
        name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[traced_test]
#[test]
fn load_trace_reads_numbered_files_in_order() {
    let dir = scratch_dir("ordered");
    for (i, pc) in [4194304i64, 4194308, 4194312].iter().enumerate() {
        fs::write(
            dir.join(format!("{i}.json")),
            format!(r#"{{"regs": {{"pc": {pc}}}, "mem": {{}}}}"#),
        )
        .unwrap();
    }

    let steps = load_trace(&dir).unwrap();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[2].regs["pc"], 4194312);

    let _ = fs::remove_dir_all(&dir);
}

#[traced_test]
#[test]
fn load_trace_stops_at_first_missing_index() {
    let dir = scratch_dir("gap");
    fs::write(dir.join("0.json"), r#"{"regs": {}, "mem": {}}"#).unwrap();
    // 1.json missing; 2.json must not be picked up.
    fs::write(dir.join("2.json"), r#"{"regs": {}, "mem": {}}"#).unwrap();

    let steps = load_trace(&dir).unwrap();
    assert_eq!(steps.len(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[traced_test]
#[test]
fn load_trace_rejects_empty_directory() {
    let dir = scratch_dir("empty");
    assert!(matches!(load_trace(&dir), Err(TraceError::Empty(_))));
    let _ = fs::remove_dir_all(&dir);
}

#[traced_test]
#[test]
fn load_trace_rejects_malformed_snapshot() {
    let dir = scratch_dir("malformed");
    fs::write(dir.join("0.json"), "{ not json").unwrap();
    assert!(matches!(
        load_trace(&dir),
        Err(TraceError::Malformed { .. })
    ));
    let _ = fs::remove_dir_all(&dir);
}
