//! Content-addressed request fingerprints.
//!
//! A fingerprint identifies a request by WHAT is being asked, never by which
//! provider would answer it: capability, canonicalized prompt, context,
//! candidate labels and history. Two providers asked the identical question
//! therefore converge onto the same cache entry.
//!
//! SHA-256 over length-delimited fields makes the key stable across
//! processes and collision-free for practical purposes, which keeps the door
//! open for an external backing store without a key redesign.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::types::{AskOptions, Capability, Sender};

/// A 256-bit content hash identifying one logical request.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Compute the fingerprint for a request.
    pub fn compute(capability: Capability, prompt: &str, options: &AskOptions) -> Self {
        let mut hasher = Sha256::new();
        feed(&mut hasher, capability.as_str().as_bytes());
        feed(&mut hasher, canonicalize(prompt).as_bytes());
        feed(
            &mut hasher,
            options
                .context
                .as_deref()
                .map(canonicalize)
                .unwrap_or_default()
                .as_bytes(),
        );
        for label in &options.labels {
            feed(&mut hasher, label.as_bytes());
        }
        for turn in &options.history {
            let tag: &[u8] = match turn.sender {
                Sender::User => b"u",
                Sender::Assistant => b"a",
            };
            feed(&mut hasher, tag);
            feed(&mut hasher, turn.message.as_bytes());
        }
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Length-prefix each field so adjacent fields can never alias
/// (e.g. labels ["ab", "c"] vs ["a", "bc"]).
fn feed(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// Trim and collapse whitespace runs. Case is preserved: lowercasing would
/// merge distinct translation and fill-mask inputs.
fn canonicalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint(")?;
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "…)")
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatTurn;

    #[test]
    fn deterministic() {
        let options = AskOptions::default();
        let a = Fingerprint::compute(Capability::Sentiment, "I love this app", &options);
        let b = Fingerprint::compute(Capability::Sentiment, "I love this app", &options);
        assert_eq!(a, b);
    }

    #[test]
    fn whitespace_is_canonicalized() {
        let options = AskOptions::default();
        let a = Fingerprint::compute(Capability::Summarize, "  hello   world ", &options);
        let b = Fingerprint::compute(Capability::Summarize, "hello world", &options);
        assert_eq!(a, b);
    }

    #[test]
    fn case_is_preserved() {
        let options = AskOptions::default();
        let a = Fingerprint::compute(Capability::Translate, "Hello", &options);
        let b = Fingerprint::compute(Capability::Translate, "hello", &options);
        assert_ne!(a, b);
    }

    #[test]
    fn capability_participates() {
        let options = AskOptions::default();
        let a = Fingerprint::compute(Capability::Summarize, "hello", &options);
        let b = Fingerprint::compute(Capability::Sentiment, "hello", &options);
        assert_ne!(a, b);
    }

    #[test]
    fn labels_cannot_alias_across_boundaries() {
        let a = AskOptions::default().labels(vec!["ab".into(), "c".into()]);
        let b = AskOptions::default().labels(vec!["a".into(), "bc".into()]);
        let fa = Fingerprint::compute(Capability::Classify, "x", &a);
        let fb = Fingerprint::compute(Capability::Classify, "x", &b);
        assert_ne!(fa, fb);
    }

    #[test]
    fn history_participates() {
        let with = AskOptions::default().history(vec![ChatTurn::user("earlier question")]);
        let without = AskOptions::default();
        let fa = Fingerprint::compute(Capability::Answer, "and now?", &with);
        let fb = Fingerprint::compute(Capability::Answer, "and now?", &without);
        assert_ne!(fa, fb);
    }

    #[test]
    fn context_participates() {
        let with = AskOptions::default().context("pantry inventory");
        let without = AskOptions::default();
        let fa = Fingerprint::compute(Capability::Answer, "where is it?", &with);
        let fb = Fingerprint::compute(Capability::Answer, "where is it?", &without);
        assert_ne!(fa, fb);
    }
}
