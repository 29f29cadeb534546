use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::Frame;

pub(super) fn run(bins: usize, sender: watch::Sender<Frame>, stop_flag: Arc<AtomicBool>) {
    info!("Reading {}-byte frames from stdin", bins);
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    pump(&mut reader, bins, &sender, &stop_flag);
}

/// Forward complete frames from `reader` until EOF, an error or a stop request.
fn pump(reader: &mut impl Read, bins: usize, sender: &watch::Sender<Frame>, stop_flag: &AtomicBool) {
    let mut buffer = vec![0u8; bins];
    loop {
        if stop_flag.load(Ordering::Relaxed) {
            debug!("Stop flag set, ending stdin source");
            break;
        }
        match reader.read_exact(&mut buffer) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                info!("stdin closed, no more frames");
                break;
            }
            Err(e) => {
                warn!("stdin read failed: {}", e);
                break;
            }
        }
        if sender.send(Arc::new(buffer.clone())).is_err() {
            debug!("Frame receiver dropped, stopping stdin source");
            break;
        }
    }
}
