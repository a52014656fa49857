use std::collections::VecDeque;
use std::io::Read;
use crate::scope::event::Event;
use crate::scope::ScopeError;
/// Something that yields decoded events on demand.
///
/// `Ok(None)` means "temporarily exhausted": nothing decodable right now, but
/// more may arrive later (live pipes). Hard errors are reserved for I/O
/// failures and malformed frames.
pub trait EventSource: Send {
    fn next_event(&mut self) -> Result<Option<Event>, ScopeError>;
    /// Fraction of input consumed, in [0, 1]. Defined for finite file-backed
    /// sources only; streaming sources return `None`.
    fn progress(&self) -> Option<f64> {
        None
    }
}
/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<Event>,
    total: usize,
}
impl ManualSource {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        let queue: VecDeque<Event> = events.into_iter().collect();
        let total = queue.len();
        Self { queue, total }
    }
}
impl EventSource for ManualSource {
    fn next_event(&mut self) -> Result<Option<Event>, ScopeError> {
        Ok(self.queue.pop_front())
    }
    fn progress(&self) -> Option<f64> {
        if self.total == 0 {
            return Some(1.0);
        }
        Some((self.total - self.queue.len()) as f64 / self.total as f64)
    }
}
// Frame layout: u64 timestamp, u16 channel, u16 reserved, u32 sample count,
// then that many little-endian u16 samples. Stand-in for the digitizer's own
// format; anything else just needs its own EventSource impl.
const HEADER_LEN: usize = 16;
const MAX_SAMPLES_PER_FRAME: u32 = 1 << 20;
/// Decoder over any byte stream, file or pipe. Partial frames are buffered
/// until the rest arrives, so a slow live source is reported as temporarily
/// exhausted rather than as an error.
///
/// Reads are blocking: a pipe that stays open but goes silent parks
/// `next_event` inside `read` until more bytes or EOF arrive, and the ingest
/// worker only observes its abort flag between calls. Finite files and
/// closed pipes always return promptly.
pub struct FramedSource<R: Read> {
    reader: R,
    pending: Vec<u8>,
    consumed: u64,
    total_len: Option<u64>,
    eof: bool,
}
impl<R: Read + Send> FramedSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_total_len(reader, None)
    }
    pub fn with_total_len(reader: R, total_len: Option<u64>) -> Self {
        Self {
            reader,
            pending: Vec::new(),
            consumed: 0,
            total_len,
            eof: false,
        }
    }
    /// Grow the pending buffer until it holds `need` bytes. Returns false if
    /// the stream ran dry first (the bytes read so far stay buffered).
    fn fill(&mut self, need: usize) -> Result<bool, ScopeError> {
        let mut chunk = [0u8; 4096];
        while self.pending.len() < need {
            if self.eof {
                return Ok(false);
            }
            let wanted = (need - self.pending.len()).min(chunk.len());
            match self.reader.read(&mut chunk[..wanted]) {
                Ok(0) => {
                    // EOF now, but a growing file or pipe may deliver more on
                    // a later poll.
                    self.eof = true;
                    return Ok(false);
                }
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => return Ok(false),
                Err(err) => return Err(err.into()),
            }
        }
        Ok(true)
    }
}
impl<R: Read + Send> EventSource for FramedSource<R> {
    fn next_event(&mut self) -> Result<Option<Event>, ScopeError> {
        self.eof = false;
        if !self.fill(HEADER_LEN)? {
            return Ok(None);
        }
        let header = &self.pending[..HEADER_LEN];
        let timestamp = u64::from_le_bytes([
            header[0], header[1], header[2], header[3], header[4], header[5], header[6], header[7],
        ]);
        let channel = u16::from_le_bytes([header[8], header[9]]);
        let count = u32::from_le_bytes([header[12], header[13], header[14], header[15]]);
        if count > MAX_SAMPLES_PER_FRAME {
            // Drop the bad header so the next call can attempt a resync
            // instead of failing forever on the same bytes.
            self.pending.drain(..HEADER_LEN);
            self.consumed += HEADER_LEN as u64;
            return Err(ScopeError::OversizedFrame(count));
        }
        let frame_len = HEADER_LEN + count as usize * 2;
        if !self.fill(frame_len)? {
            return Ok(None);
        }
        let samples = self.pending[HEADER_LEN..frame_len]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        self.pending.drain(..frame_len);
        self.consumed += frame_len as u64;
        Ok(Some(Event {
            timestamp,
            channel,
            samples,
        }))
    }
    fn progress(&self) -> Option<f64> {
        let total = self.total_len?;
        if total == 0 {
            return Some(1.0);
        }
        Some((self.consumed as f64 / total as f64).min(1.0))
    }
}
