/// Number of slots in a save directory: the system slot and 16 data slots.
pub const SLOT_COUNT: usize = 17;

/// Offset of the first presence flag in the slot metadata file.
pub const PRESENCE_OFFSET: u64 = 0x200;

/// Presence flag value marking a populated slot.
///
/// Any other value means the slot is absent.
pub const PRESENT_FLAG: u8 = 1;

/// Distance between two payload regions in the slot metadata file.
///
/// Slot `i` has its payload at `PAYLOAD_STRIDE * (i + 1)`.
pub const PAYLOAD_STRIDE: u64 = 0x400;

/// Length in bytes of a slot payload.
pub const PAYLOAD_LEN: usize = 0x34C;

/// Length in bytes of the container magic.
pub const MAGIC_LEN: usize = 8;

/// Container magic
///
/// In a valid binslot file, the first 8 bytes will match exactly.
pub const CONTAINER_MAGIC: [u8; MAGIC_LEN] = *b"SAVE0001";

/// Length in bytes of the metadata digest salt.
pub const SALT_LEN: usize = 8;

/// Salt appended to the payload when computing the metadata digest.
pub const META_SALT: [u8; SALT_LEN] = *b"P4GOLDEN";

/// Length in bytes of a digest (MD5).
pub const DIGEST_LEN: usize = 16;

/// Total length in bytes of a container file.
pub const CONTAINER_LEN: usize = MAGIC_LEN + DIGEST_LEN * 2 + PAYLOAD_LEN;

/// Path of the slot metadata file, relative to the import directory.
pub const METADATA_PATH: [&str; 2] = ["sce_sys", "sdslot.dat"];

/// Suffix appended to a raw slot file name to get its container name.
pub const CONTAINER_SUFFIX: &str = "slot";
