//! SHA-256 fingerprints of transform descriptors and isolated values.
//!
//! Every string component is terminated by a NUL, so `"ab" + "c"` and
//! `"a" + "bc"` hash differently.

use sha2::{Digest, Sha256};

use crate::core::attributes::AttributeSet;
use crate::core::normalization::{DirectorySensitivity, LineEndingSensitivity, NormalizationSpec};

/// Incremental fingerprint over the components identifying a transform.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    pub fn new() -> Self {
        Fingerprint::default()
    }

    pub fn update_str(&mut self, s: &str) -> &mut Self {
        self.hasher.update(s.as_bytes());
        self.hasher.update(b"\0");
        self
    }

    /// An absent component hashes differently from an empty one.
    pub fn update_opt(&mut self, opt: Option<&str>) -> &mut Self {
        match opt {
            Some(s) => {
                self.hasher.update(b"\x01");
                self.update_str(s)
            }
            None => {
                self.hasher.update(b"\x00");
                self
            }
        }
    }

    pub fn update_bool(&mut self, b: bool) -> &mut Self {
        self.hasher.update([b as u8]);
        self
    }

    /// Hash a JSON value in compact form. `serde_json` maps keep keys sorted.
    pub fn update_json(&mut self, value: &serde_json::Value) -> &mut Self {
        self.update_str(&value.to_string())
    }

    /// Hash attributes pairwise, in name order.
    pub fn update_attributes(&mut self, attributes: &AttributeSet) -> &mut Self {
        self.update_str(&attributes.len().to_string());
        for (name, value) in attributes.iter() {
            self.update_str(name).update_str(value);
        }
        self
    }

    pub fn update_normalization(&mut self, spec: &NormalizationSpec) -> &mut Self {
        self.update_str(spec.normalizer.as_str())
            .update_bool(spec.directory_sensitivity == DirectorySensitivity::IgnoreDirectories)
            .update_bool(spec.line_ending_sensitivity == LineEndingSensitivity::NormalizeLineEndings)
    }

    /// Lowercase hex digest.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}
