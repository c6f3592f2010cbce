//! Audit transcript of an interactive proof session.
//!
//! Records every round's `(commitment, challenge, response)` triple in order.
//! A transcript can be serialized for storage and replayed later against the
//! public parameters to confirm the recorded verdict.

use super::verifier::round_holds;
use super::{Challenge, Commitment, Parameters, Response};
use crate::{Error, Result};

/// Transcript encoding version for serialization compatibility.
const TRANSCRIPT_VERSION: u8 = 1;

/// Largest integer accepted when encoding or decoding (8192-bit moduli).
const MAX_INTEGER_SIZE: usize = 1024;

/// Largest number of rounds accepted when encoding or decoding.
const MAX_ROUNDS: usize = 4096;

/// One recorded round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptEntry {
    commitment: Commitment,
    challenge: Challenge,
    response: Response,
}

impl TranscriptEntry {
    /// Creates an entry from a round's three messages.
    pub fn new(commitment: Commitment, challenge: Challenge, response: Response) -> Self {
        Self {
            commitment,
            challenge,
            response,
        }
    }

    /// Returns the prover's commitment.
    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// Returns the verifier's challenge.
    pub fn challenge(&self) -> Challenge {
        self.challenge
    }

    /// Returns the prover's response.
    pub fn response(&self) -> &Response {
        &self.response
    }
}

/// Append-only record of a protocol run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProofTranscript {
    entries: Vec<TranscriptEntry>,
}

impl ProofTranscript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a round.
    pub fn append(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// Returns the recorded rounds in order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Returns the number of recorded rounds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no round has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-checks every recorded round against the parameters.
    ///
    /// Returns `true` only for a non-empty transcript whose rounds all hold.
    /// Replay confirms the transcript is consistent; it says nothing about
    /// whether the challenges were drawn honestly.
    pub fn replay(&self, params: &Parameters) -> Result<bool> {
        if self.entries.is_empty() {
            return Ok(false);
        }

        for entry in &self.entries {
            if !round_holds(params, &entry.commitment, entry.challenge, &entry.response)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Serializes the transcript to bytes.
    ///
    /// Format: `[version (1 byte)][rounds (4 bytes)]` followed, per round, by
    /// `[c_len (4 bytes)][c][challenge (1 byte)][s_len (4 bytes)][s]`.
    /// Lengths and integers are big-endian.
    ///
    /// Fails with [`Error::MalformedMessage`] for a transcript that
    /// [`from_bytes`](Self::from_bytes) would refuse: more than 4096 rounds or
    /// an integer longer than 1024 bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.entries.len() > MAX_ROUNDS {
            return Err(Error::MalformedMessage(format!(
                "Too many rounds to encode: {}",
                self.entries.len()
            )));
        }

        let mut result = Vec::new();
        result.push(TRANSCRIPT_VERSION);
        result.extend_from_slice(&encode_length(self.entries.len(), "round count")?);

        for entry in &self.entries {
            let c_bytes = entry.commitment.to_bytes_be();
            let s_bytes = entry.response.to_bytes_be();

            result.extend_from_slice(&encode_integer_length(&c_bytes, "commitment")?);
            result.extend_from_slice(&c_bytes);
            result.push(entry.challenge.bit());
            result.extend_from_slice(&encode_integer_length(&s_bytes, "response")?);
            result.extend_from_slice(&s_bytes);
        }

        Ok(result)
    }

    /// Deserializes a transcript from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader { bytes, pos: 0 };

        let version = reader.byte("version")?;
        if version != TRANSCRIPT_VERSION {
            return Err(Error::MalformedMessage(format!(
                "Unsupported transcript version: {version}"
            )));
        }

        let rounds = reader.length("round count")?;
        if rounds > MAX_ROUNDS {
            return Err(Error::MalformedMessage(format!(
                "Too many rounds: {rounds}"
            )));
        }

        let mut entries = Vec::with_capacity(rounds);
        for _ in 0..rounds {
            let commitment = Commitment::from_bytes_be(reader.integer("commitment")?)?;
            let challenge = Challenge::from_bit(reader.byte("challenge")?)?;
            let response = Response::from_bytes_be(reader.integer("response")?)?;
            entries.push(TranscriptEntry::new(commitment, challenge, response));
        }

        if reader.pos != bytes.len() {
            return Err(Error::MalformedMessage(format!(
                "Transcript has {} trailing bytes",
                bytes.len() - reader.pos
            )));
        }

        Ok(Self { entries })
    }
}

fn encode_length(len: usize, what: &str) -> Result<[u8; 4]> {
    u32::try_from(len)
        .map(u32::to_be_bytes)
        .map_err(|_| Error::MalformedMessage(format!("{what} does not fit in 4 bytes: {len}")))
}

fn encode_integer_length(bytes: &[u8], what: &str) -> Result<[u8; 4]> {
    if bytes.len() > MAX_INTEGER_SIZE {
        return Err(Error::MalformedMessage(format!(
            "Invalid {what} length: {}",
            bytes.len()
        )));
    }
    encode_length(bytes.len(), what)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| Error::MalformedMessage(format!("Truncated transcript: {what}")))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn byte(&mut self, what: &str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    fn length(&mut self, what: &str) -> Result<usize> {
        let raw = self.take(4, what)?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(raw);
        Ok(u32::from_be_bytes(buf) as usize)
    }

    fn integer(&mut self, what: &str) -> Result<&'a [u8]> {
        let len = self.length(what)?;
        if len == 0 || len > MAX_INTEGER_SIZE {
            return Err(Error::MalformedMessage(format!(
                "Invalid {what} length: {len}"
            )));
        }
        self.take(len, what)
    }
}
