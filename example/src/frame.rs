//! Reading and writing raw message frames.
use std::io;

use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Read one message, returns `None` on clean end of stream.
pub async fn read_frame<R: AsyncRead + Unpin>(io: &mut R) -> io::Result<Option<Bytes>> {
    let mut header = [0u8; 5];
    match io.read_exact(&mut header).await {
        Ok(_) => {},
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(err) => return Err(err),
    }

    let len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]) as usize;
    if len < 4 {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "message length less than 4"));
    }

    let mut frame = BytesMut::with_capacity(1 + len);
    frame.extend_from_slice(&header);
    frame.resize(1 + len, 0);
    io.read_exact(&mut frame[5..]).await?;

    Ok(Some(frame.freeze()))
}

/// Simple query frontend message.
pub fn query(sql: &str) -> Bytes {
    let mut buf = BytesMut::with_capacity(1 + 4 + sql.len() + 1);
    buf.put_u8(b'Q');
    buf.put_u32((4 + sql.len() + 1) as u32);
    buf.put(sql.as_bytes());
    buf.put_u8(b'\0');
    buf.freeze()
}

/// Terminate frontend message.
pub fn terminate() -> Bytes {
    Bytes::from_static(b"X\0\0\0\x04")
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn read_frames() {
        let mut input = [query("SELECT 1"), terminate()].concat();
        input.extend_from_slice(b"Z\0\0");
        let mut io = &input[..];

        let frame = read_frame(&mut io).await.unwrap().unwrap();
        assert_eq!(pgsrv::query_text(&frame).unwrap(), "SELECT 1\0");
        let frame = read_frame(&mut io).await.unwrap().unwrap();
        assert_eq!(&frame[..], b"X\0\0\0\x04");
        // truncated header
        assert!(read_frame(&mut io).await.unwrap().is_none());
    }
}
