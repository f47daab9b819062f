use std::{
    io::{BufReader, BufWriter, Result},
    net::{TcpListener, TcpStream, ToSocketAddrs},
};

use structopt::StructOpt;
use tracing::debug;

use crate::StdChannel;

/// A channel over a buffered TCP stream. One endpoint listens, the other
/// connects; once established both sides are symmetric.
pub type NetChannel = StdChannel<BufReader<TcpStream>, BufWriter<TcpStream>>;

/// Accept a single peer on `addr` and wrap the connection in a channel.
pub fn net_channel_listen<A: ToSocketAddrs>(addr: A) -> Result<NetChannel> {
    let (socket, peer) = TcpListener::bind(addr)?.accept()?;
    debug!(?peer, "accepted connection");
    buffered_channel(socket)
}

/// Connect to the listening peer at `addr`.
pub fn net_channel_connect<A: ToSocketAddrs>(addr: A) -> Result<NetChannel> {
    let socket = TcpStream::connect(addr)?;
    debug!("connected");
    buffered_channel(socket)
}

fn buffered_channel(socket: TcpStream) -> Result<NetChannel> {
    let reader = BufReader::new(socket.try_clone()?);
    Ok(StdChannel::new(reader, BufWriter::new(socket)))
}

#[derive(StructOpt, Debug)]
pub struct CommandLineOpt {
    #[structopt(short, long, default_value = "0")]
    pub is_server: u32,
}
