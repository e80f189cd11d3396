use std::{
    fs::File,
    io::{self, Cursor, Read, Seek, SeekFrom},
    path::Path,
};

use crate::error::{Error, Result};

pub const SEC_SZ: usize = 512;
pub type Sec = [u8; SEC_SZ];

/// A seekable byte source: a disk image, a block device, or an in-memory buffer.
///
/// Reads are always positioned with an absolute seek first, so the cursor
/// left behind by an earlier read never leaks into a later one.
pub(crate) trait Device: Seek + Read {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let wanted = buf.len();
        self.seek(SeekFrom::Start(offset))?;
        self.read_exact(buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::ShortRead { offset, wanted },
            _ => Error::Io(e),
        })
    }

    fn read_sec(&mut self, sec_no: u64) -> Result<Sec> {
        let mut buf: Sec = [0u8; SEC_SZ];
        self.read_at(sec_no * SEC_SZ as u64, &mut buf)?;
        Ok(buf)
    }
}

impl Device for File {}

impl<T: AsRef<[u8]>> Device for Cursor<T> {}

/// Opens `path` read-only. The handle is closed when the returned `File` drops.
pub fn open(path: &Path) -> Result<File> {
    File::options()
        .create(false)
        .write(false)
        .truncate(false)
        .read(true)
        .open(path)
        .map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })
}
