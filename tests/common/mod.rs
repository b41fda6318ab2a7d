#![allow(dead_code)]

use midibin::prelude::*;

/// A minimal Standard MIDI File assembled chunk by chunk
pub struct SmfBuilder {
    format: u16,
    division: [u8; 2],
    chunks: Vec<([u8; 4], Vec<u8>)>,
}

impl SmfBuilder {
    pub fn new(ticks_per_quarter_note: u16) -> Self {
        Self {
            format: 1,
            division: ticks_per_quarter_note.to_be_bytes(),
            chunks: Vec::new(),
        }
    }

    pub fn smpte(fps: SmpteFps, ticks_per_frame: u8) -> Self {
        Self {
            format: 1,
            division: [fps.as_header_byte() as u8, ticks_per_frame],
            chunks: Vec::new(),
        }
    }

    pub fn format(mut self, format: u16) -> Self {
        self.format = format;
        self
    }

    /// Append a track chunk holding `events` followed by an end of track
    pub fn track(mut self, events: &[u8]) -> Self {
        let mut payload = events.to_vec();
        payload.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);
        self.chunks.push((*b"MTrk", payload));
        self
    }

    /// Append a track chunk with exactly `payload`
    pub fn raw_track(mut self, payload: &[u8]) -> Self {
        self.chunks.push((*b"MTrk", payload.to_vec()));
        self
    }

    pub fn chunk(mut self, tag: &[u8; 4], payload: &[u8]) -> Self {
        self.chunks.push((*tag, payload.to_vec()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let tracks = self.chunks.iter().filter(|(tag, _)| tag == b"MTrk").count();
        let mut bytes = b"MThd".to_vec();
        bytes.extend_from_slice(&6_u32.to_be_bytes());
        bytes.extend_from_slice(&self.format.to_be_bytes());
        bytes.extend_from_slice(&(tracks as u16).to_be_bytes());
        bytes.extend_from_slice(&self.division);
        for (tag, payload) in &self.chunks {
            bytes.extend_from_slice(tag);
            bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
            bytes.extend_from_slice(payload);
        }
        bytes
    }
}

/// Encode `value` as a variable-length quantity
pub fn varlen(mut value: u32) -> Vec<u8> {
    let mut bytes = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        bytes.insert(0, (value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    bytes
}

/// `(micros, kind, channel, data)` for every record of a document
pub fn records(document: &BinaryDocument) -> Vec<(u64, EventKind, u8, [u8; 2])> {
    document
        .records()
        .map(|r| (r.micros().us(), r.kind(), r.channel(), r.data()))
        .collect()
}
