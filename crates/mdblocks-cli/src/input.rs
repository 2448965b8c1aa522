use std::{
    io::{self, ErrorKind, Read},
    sync::mpsc::{Receiver, SyncSender, sync_channel},
    thread,
};

/// Chunks in flight between the reader thread and the UI loop.
const CHANNEL_DEPTH: usize = 8;

#[derive(Debug)]
pub enum Input {
    Chunk(Vec<u8>),
    Failed(io::Error),
    End,
}

/// Reads `source` on a background thread in chunks of at most `chunk_bytes`.
///
/// The thread stops at end of input, on the first read error, or once the
/// receiver is dropped.
pub fn spawn_reader<R>(source: R, chunk_bytes: usize) -> Receiver<Input>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = sync_channel(CHANNEL_DEPTH);
    thread::spawn(move || read_all(source, chunk_bytes.max(1), &tx));
    rx
}

fn read_all<R: Read>(mut source: R, chunk_bytes: usize, tx: &SyncSender<Input>) {
    let mut buf = vec![0; chunk_bytes];
    loop {
        let message = match source.read(&mut buf) {
            Ok(0) => {
                let _ = tx.send(Input::End);
                return;
            }
            Ok(n) => Input::Chunk(buf[..n].to_vec()),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                log::warn!("input read failed: {e}");
                let _ = tx.send(Input::Failed(e));
                return;
            }
        };
        if tx.send(message).is_err() {
            log::debug!("reader stopping, viewer has gone");
            return;
        }
    }
}
