//! Pluggable send/receive strategies.
//!
//! Every connection handle carries a strategy pair so the layers above can
//! swap transport behavior (e.g., TLS) without touching the handle itself.
//! This core wires only the raw-socket default; it is a small closed
//! capability interface, not an open-ended hierarchy.

use std::io::{Read, Write};

use socket2::Socket;

/// Transport-level send/receive capability installed on every handle.
pub trait SocketIo: Send + Sync {
    /// Write bytes to the socket. Returns the number of bytes written.
    fn send(&self, socket: &Socket, data: &[u8]) -> std::io::Result<usize>;

    /// Read bytes from the socket into `buf`. Returns the number of bytes
    /// read; zero means the peer closed the connection.
    fn receive(&self, socket: &Socket, buf: &mut [u8]) -> std::io::Result<usize>;
}

/// Default strategy: plain blocking reads and writes on the socket.
#[derive(Debug, Default)]
pub struct RawSocketIo;

impl SocketIo for RawSocketIo {
    fn send(&self, mut socket: &Socket, data: &[u8]) -> std::io::Result<usize> {
        socket.write(data)
    }

    fn receive(&self, mut socket: &Socket, buf: &mut [u8]) -> std::io::Result<usize> {
        socket.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socket2::{Domain, Protocol, Type};
    use std::net::SocketAddr;

    #[test]
    fn raw_strategy_round_trips_bytes() {
        let listener = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP)).unwrap();
        listener
            .bind(&"127.0.0.1:0".parse::<SocketAddr>().unwrap().into())
            .unwrap();
        listener.listen(1).unwrap();
        let addr = listener.local_addr().unwrap();

        let client = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP)).unwrap();
        client.connect(&addr).unwrap();
        let (server, _) = listener.accept().unwrap();

        let io = RawSocketIo;
        assert_eq!(io.send(&client, b"ping").unwrap(), 4);

        let mut buf = [0u8; 16];
        let n = io.receive(&server, &mut buf).unwrap();
        assert_eq!(&buf[..n], b"ping");
    }
}
