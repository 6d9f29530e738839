use std::{fs, path::Path, process::Command};

fn binslot(dir: &Path) -> std::process::Output {
	Command::new(env!("CARGO_BIN_EXE_binslot"))
		.arg(dir)
		.env_remove("RUST_LOG")
		.output()
		.unwrap()
}

#[test]
fn missing_metadata_exits_with_two() {
	let dir = tempfile::tempdir().unwrap();
	fs::write(dir.path().join("system.bin"), b"system").unwrap();

	let output = binslot(dir.path());
	assert_eq!(output.status.code(), Some(2));
	assert!(!dir.path().join("system.binslot").exists());
}

#[test]
fn prints_status_per_slot() {
	let dir = tempfile::tempdir().unwrap();
	let mut meta = vec![0; 0x4800];
	meta[0x200] = 1;
	meta[0x202] = 1;
	fs::create_dir(dir.path().join("sce_sys")).unwrap();
	fs::write(dir.path().join("sce_sys").join("sdslot.dat"), meta).unwrap();
	fs::write(dir.path().join("system.bin"), b"system").unwrap();

	let output = binslot(dir.path());
	assert!(output.status.success());

	let stdout = String::from_utf8(output.stdout).unwrap();
	assert!(stdout.contains("Found 1 save slots (including system data)"));
	assert!(stdout.contains("Importing system.bin... ok"));
	assert!(stdout.contains("Skipping data0001.bin"));
	assert!(stdout.contains("Skipping data0002.bin"));
	assert!(stdout.contains("Skipping data0016.bin"));
	assert!(stdout.trim_end().ends_with("Done"));

	assert_eq!(
		fs::metadata(dir.path().join("system.binslot")).unwrap().len(),
		884
	);
}
