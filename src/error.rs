use std::{io, path::PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("can't open `{}`: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("short read: wanted {wanted} bytes at offset {offset}")]
    ShortRead { offset: u64, wanted: usize },
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid MBR signature {:02X} {:02X}", .0[0], .0[1])]
    InvalidSignature([u8; 2]),
    #[error("layout read failed")]
    Layout(#[from] scroll::Error),
}
