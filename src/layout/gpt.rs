// References:
// [1] https://uefi.org/specs/UEFI/2.10/05_GUID_Partition_Table_Format.html

/// The GPT header lives in LBA 1 and opens with this signature. Only its
/// presence is checked, no header field is parsed.
pub const SIGNATURE: &[u8; 8] = b"EFI PART";
pub const HEADER_OFF: u64 = 512;

pub fn has_signature(buf: &[u8; 8]) -> bool {
    buf == SIGNATURE
}
