use std::{fs, path::Path};

use binslot::{
	format::{Digest as SlotDigest, CONTAINER_LEN, PAYLOAD_LEN},
	ConverterConfig, Error, Session, SlotIndex,
};
use md5::{Digest, Md5};

/// Build a save directory. `slots` lists (index, presence flag, payload fill byte).
fn save_dir(dir: &Path, slots: &[(u8, u8, u8)]) {
	let mut meta = vec![0; 0x4800];
	for &(index, flag, fill) in slots {
		meta[0x200 + index as usize] = flag;
		let start = 0x400 * (index as usize + 1);
		meta[start..start + PAYLOAD_LEN].fill(fill);
	}

	fs::create_dir_all(dir.join("sce_sys")).unwrap();
	fs::write(dir.join("sce_sys").join("sdslot.dat"), meta).unwrap();
}

fn md5_of(parts: &[&[u8]]) -> Vec<u8> {
	let mut hasher = Md5::new();
	for part in parts {
		hasher.update(part);
	}
	hasher.finalize().to_vec()
}

fn run(dir: &Path) -> binslot::Report {
	Session::open(dir, ConverterConfig::default())
		.unwrap()
		.run(&mut ())
		.unwrap()
}

#[test]
fn converts_data_slot_one() {
	let dir = tempfile::tempdir().unwrap();
	save_dir(dir.path(), &[(1, 1, 0xAA)]);
	let raw = b"the raw contents of data0001.bin".repeat(40);
	fs::write(dir.path().join("data0001.bin"), &raw).unwrap();

	let report = run(dir.path());
	assert_eq!(report.converted().count(), 1);

	let bytes = fs::read(dir.path().join("data0001.binslot")).unwrap();
	assert_eq!(bytes.len(), 884);
	assert_eq!(&bytes[0..8], b"SAVE0001");
	assert_eq!(bytes[8..24], md5_of(&[&[0xAA; 844][..], &b"P4GOLDEN"[..]])[..]);
	assert_eq!(bytes[24..40], md5_of(&[raw.as_slice()])[..]);
	assert!(bytes[40..884].iter().all(|b| *b == 0xAA));
}

#[test]
fn converts_every_slot_including_system() {
	let dir = tempfile::tempdir().unwrap();
	let slots: Vec<(u8, u8, u8)> = (0..17).map(|i| (i, 1, i + 0x10)).collect();
	save_dir(dir.path(), &slots);
	for slot in SlotIndex::all() {
		fs::write(slot.raw_path(dir.path()), [slot.get(); 100]).unwrap();
	}

	let report = run(dir.path());
	assert_eq!(report.converted().count(), 17);
	assert_eq!(report.skipped(), 0);
	for slot in SlotIndex::all() {
		let bytes = fs::read(slot.container_path(dir.path())).unwrap();
		assert_eq!(bytes.len(), CONTAINER_LEN);
		assert_eq!(bytes[40], slot.get() + 0x10);
	}
	assert!(dir.path().join("system.binslot").exists());
}

#[test]
fn unflagged_slots_produce_nothing() {
	let dir = tempfile::tempdir().unwrap();
	let slots: Vec<(u8, u8, u8)> = (0..17)
		.map(|i| (i, [0, 2, 0xFF][i as usize % 3], 0x55))
		.collect();
	save_dir(dir.path(), &slots);
	for slot in SlotIndex::all() {
		fs::write(slot.raw_path(dir.path()), b"raw").unwrap();
	}

	let report = run(dir.path());
	assert_eq!(report.converted().count(), 0);
	for slot in SlotIndex::all() {
		assert!(!slot.container_path(dir.path()).exists());
	}
}

#[test]
fn flagged_slots_without_raw_file_are_skipped() {
	let dir = tempfile::tempdir().unwrap();
	let slots: Vec<(u8, u8, u8)> = (0..17).map(|i| (i, 1, 0x55)).collect();
	save_dir(dir.path(), &slots);

	let report = run(dir.path());
	assert_eq!(report.skipped(), 17);
	for slot in SlotIndex::all() {
		assert!(!slot.container_path(dir.path()).exists());
	}
}

#[test]
fn reruns_are_byte_identical() {
	let dir = tempfile::tempdir().unwrap();
	save_dir(dir.path(), &[(0, 1, 0x01), (9, 1, 0x09)]);
	fs::write(dir.path().join("system.bin"), b"system").unwrap();
	fs::write(dir.path().join("data0009.bin"), b"nine").unwrap();

	run(dir.path());
	let first = (
		fs::read(dir.path().join("system.binslot")).unwrap(),
		fs::read(dir.path().join("data0009.binslot")).unwrap(),
	);

	run(dir.path());
	let second = (
		fs::read(dir.path().join("system.binslot")).unwrap(),
		fs::read(dir.path().join("data0009.binslot")).unwrap(),
	);

	assert_eq!(first, second);
}

#[test]
fn rerun_replaces_stale_container() {
	let dir = tempfile::tempdir().unwrap();
	save_dir(dir.path(), &[(4, 1, 0x44)]);
	fs::write(dir.path().join("data0004.bin"), b"four").unwrap();
	fs::write(dir.path().join("data0004.binslot"), vec![0; 5000]).unwrap();

	run(dir.path());
	assert_eq!(
		fs::read(dir.path().join("data0004.binslot")).unwrap().len(),
		CONTAINER_LEN
	);
}

#[test]
fn meta_digest_ignores_raw_file_and_data_digest_ignores_payload() {
	let a = tempfile::tempdir().unwrap();
	save_dir(a.path(), &[(2, 1, 0x20)]);
	fs::write(a.path().join("data0002.bin"), b"first raw").unwrap();

	let b = tempfile::tempdir().unwrap();
	save_dir(b.path(), &[(2, 1, 0x20)]);
	fs::write(b.path().join("data0002.bin"), b"second raw").unwrap();

	let c = tempfile::tempdir().unwrap();
	save_dir(c.path(), &[(2, 1, 0x21)]);
	fs::write(c.path().join("data0002.bin"), b"first raw").unwrap();

	let read = |dir: &Path| fs::read(dir.join("data0002.binslot")).unwrap();
	run(a.path());
	run(b.path());
	run(c.path());
	let (a, b, c) = (read(a.path()), read(b.path()), read(c.path()));

	// payload digest
	assert_eq!(a[8..24], b[8..24]);
	assert_ne!(a[8..24], c[8..24]);

	// raw file digest
	assert_ne!(a[24..40], b[24..40]);
	assert_eq!(a[24..40], c[24..40]);
	assert_eq!(a[24..40], md5_of(&[&b"first raw"[..]])[..]);
}

#[test]
fn report_digests_match_written_containers() {
	let dir = tempfile::tempdir().unwrap();
	save_dir(dir.path(), &[(3, 1, 0x33)]);
	fs::write(dir.path().join("data0003.bin"), b"three").unwrap();

	let mut session = Session::open(
		dir.path(),
		ConverterConfig {
			verify: true,
			..Default::default()
		},
	)
	.unwrap();
	let report = session.run(&mut ()).unwrap();
	let converted = report.converted().next().unwrap();

	let bytes = fs::read(&converted.output).unwrap();
	assert_eq!(
		SlotDigest::of_payload(&[0x33; PAYLOAD_LEN], b"P4GOLDEN"),
		converted.meta_digest
	);
	assert_eq!(&bytes[8..24], converted.meta_digest.as_bytes());
	assert_eq!(&bytes[24..40], converted.data_digest.as_bytes());
}

#[test]
fn missing_metadata_aborts_before_any_slot() {
	let dir = tempfile::tempdir().unwrap();
	fs::write(dir.path().join("system.bin"), b"system").unwrap();

	let err = Session::open(dir.path(), ConverterConfig::default()).unwrap_err();
	assert!(matches!(err, Error::MissingMetadata { .. }));
	assert!(!dir.path().join("system.binslot").exists());
}
