#[cfg(unix)]
mod local_channel;
mod net_channel;

#[cfg(unix)]
pub use local_channel::{local_channel_pair, LocalChannel};
pub use net_channel::{net_channel_connect, net_channel_listen, CommandLineOpt, NetChannel};

use std::io::{Read, Result, Write};

use crate::Block;

/// A trait for the duplex byte stream linking two parties.
///
/// Multi-byte primitives are normalized to little-endian on the wire, so
/// both endpoints agree on the framing regardless of host byte order.
pub trait AbstractChannel {
    /// Write a byte slice to the channel.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;
    /// Read exactly `bytes.len()` bytes from the channel.
    fn read_bytes(&mut self, bytes: &mut [u8]) -> Result<()>;
    /// Flush the channel.
    fn flush(&mut self) -> Result<()>;

    /// Read `nbytes` from the channel, returning them as a `Vec`.
    fn read_vec(&mut self, nbytes: usize) -> Result<Vec<u8>> {
        let mut data = vec![0u8; nbytes];
        self.read_bytes(&mut data)?;
        Ok(data)
    }

    /// Write a `bool` to the channel.
    #[inline(always)]
    fn write_bool(&mut self, b: bool) -> Result<()> {
        self.write_bytes(&[b as u8])
    }

    /// Read a `bool` from the channel.
    #[inline(always)]
    fn read_bool(&mut self) -> Result<bool> {
        let mut data = [0u8; 1];
        self.read_bytes(&mut data)?;
        Ok(data[0] != 0)
    }

    /// Write a `u64` to the channel.
    #[inline(always)]
    fn write_u64(&mut self, s: u64) -> Result<()> {
        self.write_bytes(&s.to_le_bytes())
    }

    /// Read a `u64` from the channel.
    #[inline(always)]
    fn read_u64(&mut self) -> Result<u64> {
        let mut data = [0u8; 8];
        self.read_bytes(&mut data)?;
        Ok(u64::from_le_bytes(data))
    }

    /// Write a `Block` to the channel.
    #[inline(always)]
    fn write_block(&mut self, blk: &Block) -> Result<()> {
        self.write_bytes(blk.as_ref())
    }

    /// Read a `Block` from the channel.
    #[inline(always)]
    fn read_block(&mut self) -> Result<Block> {
        let mut blk = Block::default();
        self.read_bytes(blk.as_mut())?;
        Ok(blk)
    }
}

/// A standard channel over any `Read`/`Write` pair, with byte counters.
pub struct StdChannel<R, W> {
    reader: R,
    writer: W,

    nread: usize,
    nwritten: usize,
}

impl<R: Read, W: Write> StdChannel<R, W> {
    /// New a `StdChannel`.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            nread: 0,
            nwritten: 0,
        }
    }

    /// Number of bytes read so far.
    pub fn read_count(&self) -> usize {
        self.nread
    }

    /// Number of bytes written so far.
    pub fn write_count(&self) -> usize {
        self.nwritten
    }
}

impl<R: Read, W: Write> AbstractChannel for StdChannel<R, W> {
    #[inline(always)]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.nwritten += bytes.len();
        Ok(())
    }

    #[inline(always)]
    fn read_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        self.reader.read_exact(bytes)?;
        self.nread += bytes.len();
        Ok(())
    }

    #[inline(always)]
    fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }
}
