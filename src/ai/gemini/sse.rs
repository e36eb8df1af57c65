//! Incremental decoder for Server-Sent Events bodies.
//!
//! Gemini's `streamGenerateContent?alt=sse` endpoint frames each response
//! chunk as one SSE event whose `data:` field holds a JSON document. This
//! module turns a raw byte stream into a stream of those data payloads;
//! JSON parsing happens at the caller.

use crate::{Error, Result};
use futures::stream::BoxStream;
use futures::{stream, Stream, StreamExt};
use std::collections::VecDeque;

struct DecodeState<B, E> {
    input: BoxStream<'static, std::result::Result<B, E>>,
    buf: Vec<u8>,
    pending: VecDeque<String>,
    done: bool,
}

/// Decodes an SSE byte stream into the `data:` payload of each event.
///
/// Events are delimited by a blank line; multiple `data:` lines within one
/// event are joined with `\n` per the SSE spec. Comment and field lines other
/// than `data:` are dropped, as are `[DONE]` sentinels. A trailing event
/// without a final blank line is flushed when the input ends.
pub fn events<S, B, E>(input: S) -> impl Stream<Item = Result<String>> + Send
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<Error> + Send + 'static,
{
    let state = DecodeState {
        input: input.boxed(),
        buf: Vec::new(),
        pending: VecDeque::new(),
        done: false,
    };

    stream::unfold(state, |mut st| async move {
        loop {
            if let Some(data) = st.pending.pop_front() {
                return Some((Ok(data), st));
            }
            if st.done {
                return None;
            }
            match st.input.next().await {
                Some(Ok(bytes)) => {
                    st.buf.extend_from_slice(bytes.as_ref());
                    drain_events(&mut st.buf, &mut st.pending);
                }
                Some(Err(e)) => {
                    // Transport failure ends the stream after this item.
                    st.done = true;
                    return Some((Err(e.into()), st));
                }
                None => {
                    st.done = true;
                    flush_trailing(&mut st.buf, &mut st.pending);
                }
            }
        }
    })
}

/// Finds the next event boundary: a newline followed by a blank line,
/// tolerating `\r\n` line endings. Returns (event end, delimiter length).
fn find_event_boundary(buf: &[u8]) -> Option<(usize, usize)> {
    for i in 0..buf.len() {
        if buf[i] != b'\n' {
            continue;
        }
        if buf.get(i + 1) == Some(&b'\n') {
            return Some((i, 2));
        }
        if buf.get(i + 1) == Some(&b'\r') && buf.get(i + 2) == Some(&b'\n') {
            return Some((i, 3));
        }
    }
    None
}

fn drain_events(buf: &mut Vec<u8>, pending: &mut VecDeque<String>) {
    while let Some((end, delim)) = find_event_boundary(buf) {
        let raw: Vec<u8> = buf.drain(..end + delim).collect();
        if let Some(data) = event_data(&raw[..end]) {
            pending.push_back(data);
        }
    }
}

fn flush_trailing(buf: &mut Vec<u8>, pending: &mut VecDeque<String>) {
    if buf.is_empty() {
        return;
    }
    let raw = std::mem::take(buf);
    if let Some(data) = event_data(&raw) {
        pending.push_back(data);
    }
}

fn event_data(raw: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(raw);
    let mut data = String::new();
    for line in text.lines() {
        // `lines()` only strips `\r` from `\r\n` pairs; a line cut at an
        // event boundary can still end in a bare `\r`.
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(rest) = line.strip_prefix("data:") {
            if !data.is_empty() {
                data.push('\n');
            }
            data.push_str(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }
    if data.is_empty() || data == "[DONE]" {
        None
    } else {
        Some(data)
    }
}
