use std::fmt;

use crate::device::Device;
use crate::error::Result;
use crate::layout::gpt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskLabel {
    Dos,
    Gpt,
}

impl fmt::Display for DiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiskLabel::Dos => write!(f, "dos"),
            DiskLabel::Gpt => write!(f, "gpt"),
        }
    }
}

impl From<&[u8; 8]> for DiskLabel {
    fn from(head: &[u8; 8]) -> Self {
        if gpt::has_signature(head) {
            DiskLabel::Gpt
        } else {
            DiskLabel::Dos
        }
    }
}

/// Looks for the GPT signature at the start of the second sector.
///
/// Leaves the device cursor past the signature.
pub(crate) fn classify(device: &mut impl Device) -> Result<DiskLabel> {
    let mut head = [0u8; 8];
    device.read_at(gpt::HEADER_OFF, &mut head)?;
    Ok(DiskLabel::from(&head))
}
