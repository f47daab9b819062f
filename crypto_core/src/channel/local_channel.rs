use std::{
    io::{BufReader, BufWriter},
    os::unix::net::UnixStream,
};

use crate::StdChannel;

/// A channel over a buffered unix socket pair, for same-host sessions and
/// tests.
pub type LocalChannel = StdChannel<BufReader<UnixStream>, BufWriter<UnixStream>>;

/// Create both endpoints of a connected `LocalChannel`.
pub fn local_channel_pair() -> (LocalChannel, LocalChannel) {
    let (left, right) = UnixStream::pair().unwrap();
    (buffered_channel(left), buffered_channel(right))
}

fn buffered_channel(stream: UnixStream) -> LocalChannel {
    let reader = BufReader::new(stream.try_clone().unwrap());
    StdChannel::new(reader, BufWriter::new(stream))
}
