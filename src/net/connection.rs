//! Line-oriented framing over a TCP stream.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::{SocketAddr, TcpStream};

use tracing::trace;

use crate::error::Result;

/// Buffered reader and writer halves of one TCP connection.
///
/// Every written line is flushed immediately: the protocol is strictly
/// request/response so nothing is gained by batching.
#[derive(Debug)]
pub struct Connection {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    peer: SocketAddr,
}

impl Connection {
    pub fn new(stream: TcpStream) -> Result<Self> {
        stream.set_nodelay(true)?;
        let peer = stream.peer_addr()?;
        Ok(Self {
            reader: BufReader::new(stream.try_clone()?),
            writer: BufWriter::new(stream),
            peer,
        })
    }

    #[must_use]
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Send `line` followed by a newline.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        trace!("{} <- {}", self.peer, line);
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Next line without its terminator, or `None` once the peer closed.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            trace!("{} closed", self.peer);
            return Ok(None);
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        trace!("{} -> {}", self.peer, line);
        Ok(Some(line))
    }
}
