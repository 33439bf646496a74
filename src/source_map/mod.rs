//! Source Map V3 generation and consumption
//!
//! Implements the [Source Map V3 specification](https://sourcemaps.info/spec.html)
//! for mapping generated JavaScript positions back to the ESTree `loc` data of
//! the nodes they were rendered from.
//!
//! # Features
//!
//! - **VLQ encoding/decoding**: Base64 VLQ codec for the `mappings` field
//! - **SourceMapBuilder**: append-only recording of [`SourceMapping`]s in
//!   generated order, then encoding into a [`SourceMap`]
//! - **SourceMapConsumer**: decode a map and answer position lookups

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

const BASE64_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const VLQ_BASE_SHIFT: u32 = 5;
const VLQ_BASE: i64 = 1 << VLQ_BASE_SHIFT;
const VLQ_BASE_MASK: i64 = VLQ_BASE - 1;
const VLQ_CONTINUATION_BIT: i64 = VLQ_BASE;

fn base64_value(c: u8) -> Option<i64> {
    match c {
        b'A'..=b'Z' => Some((c - b'A') as i64),
        b'a'..=b'z' => Some((c - b'a' + 26) as i64),
        b'0'..=b'9' => Some((c - b'0' + 52) as i64),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

/// Append `value` to `out` as a Base64 VLQ.
///
/// The sign lives in bit 0; the magnitude follows in 5-bit groups, least
/// significant first, with bit 5 marking continuation.
pub fn vlq_encode_into(out: &mut String, value: i64) {
    let mut vlq = if value < 0 { ((-value) << 1) | 1 } else { value << 1 };
    loop {
        let mut digit = vlq & VLQ_BASE_MASK;
        vlq >>= VLQ_BASE_SHIFT;
        if vlq > 0 {
            digit |= VLQ_CONTINUATION_BIT;
        }
        out.push(BASE64_CHARS[digit as usize] as char);
        if vlq == 0 {
            break;
        }
    }
}

/// Encode a single value as a Base64 VLQ string.
pub fn vlq_encode(value: i64) -> String {
    let mut out = String::new();
    vlq_encode_into(&mut out, value);
    out
}

/// Decode a run of Base64 VLQ values.
pub fn vlq_decode(input: &str) -> Result<Vec<i64>> {
    let mut values = Vec::new();
    let mut value: i64 = 0;
    let mut shift: u32 = 0;
    let mut pending = false;

    for byte in input.bytes() {
        let digit = base64_value(byte)
            .ok_or_else(|| Error::SourceMapError(format!("invalid base64 character `{}`", byte as char)))?;
        if shift > 60 {
            return Err(Error::SourceMapError("VLQ value overflows 64 bits".to_string()));
        }
        value += (digit & VLQ_BASE_MASK) << shift;
        shift += VLQ_BASE_SHIFT;
        pending = true;

        if digit & VLQ_CONTINUATION_BIT == 0 {
            let magnitude = value >> 1;
            values.push(if value & 1 == 1 { -magnitude } else { magnitude });
            value = 0;
            shift = 0;
            pending = false;
        }
    }
    if pending {
        return Err(Error::SourceMapError("truncated VLQ sequence".to_string()));
    }
    Ok(values)
}

/// V3 source map representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    /// Source map version (always 3).
    pub version: u32,
    /// The generated file this source map is associated with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// An optional root for source URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    /// Original source file names.
    pub sources: Vec<String>,
    /// Optional original source contents, parallel to `sources`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    /// Symbol names referenced by mappings.
    pub names: Vec<String>,
    /// VLQ-encoded mappings string.
    pub mappings: String,
}

impl SourceMap {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::SourceMapError(format!("serialization failed: {}", e)))
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let map: SourceMap =
            serde_json::from_str(json).map_err(|e| Error::SourceMapError(format!("parsing failed: {}", e)))?;
        if map.version != 3 {
            return Err(Error::SourceMapError(format!(
                "unsupported source map version: {}",
                map.version
            )));
        }
        Ok(map)
    }
}

/// One generated↔original position pair.
///
/// Generated positions are 0-based lines and UTF-16 columns; original
/// positions are 0-based lines and columns (ESTree `loc` lines are 1-based
/// and are converted on the way in).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMapping {
    pub generated_line: u32,
    pub generated_column: u32,
    /// Source file the original position refers to
    pub source: String,
    pub original_line: u32,
    pub original_column: u32,
    /// Identifier name at this position
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
struct Segment {
    generated_line: u32,
    generated_column: u32,
    source: u32,
    original_line: u32,
    original_column: u32,
    name: Option<u32>,
}

/// Append-only accumulator of mappings for one generation run.
///
/// Mappings must arrive in non-decreasing generated order; the builder
/// records what it is given and never reorders.
#[derive(Debug, Default)]
pub struct SourceMapBuilder {
    file: Option<String>,
    source_root: Option<String>,
    sources: Vec<String>,
    sources_content: Vec<Option<String>>,
    names: Vec<String>,
    segments: Vec<Segment>,
}

impl SourceMapBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generated file name.
    pub fn set_file(&mut self, file: impl Into<String>) {
        self.file = Some(file.into());
    }

    /// Set the root prepended to every source URL.
    pub fn set_source_root(&mut self, root: impl Into<String>) {
        self.source_root = Some(root.into());
    }

    /// Add a source file and return its index.
    pub fn add_source(&mut self, source: &str) -> u32 {
        if let Some(idx) = self.sources.iter().position(|s| s == source) {
            return idx as u32;
        }
        self.sources.push(source.to_string());
        self.sources_content.push(None);
        (self.sources.len() - 1) as u32
    }

    /// Set the content for a source, adding the source if needed.
    pub fn set_source_content(&mut self, source: &str, content: &str) {
        let idx = self.add_source(source) as usize;
        self.sources_content[idx] = Some(content.to_string());
    }

    /// Add a symbol name and return its index.
    pub fn add_name(&mut self, name: &str) -> u32 {
        if let Some(idx) = self.names.iter().position(|n| n == name) {
            return idx as u32;
        }
        self.names.push(name.to_string());
        (self.names.len() - 1) as u32
    }

    /// Number of mappings recorded so far.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Record one mapping.
    ///
    /// Fails if the generated position is before the previously recorded one.
    pub fn record(&mut self, mapping: &SourceMapping) -> Result<()> {
        if let Some(last) = self.segments.last() {
            if (mapping.generated_line, mapping.generated_column) < (last.generated_line, last.generated_column) {
                return Err(Error::SourceMapError(format!(
                    "mapping at {}:{} recorded after {}:{}",
                    mapping.generated_line, mapping.generated_column, last.generated_line, last.generated_column
                )));
            }
        }
        let source = self.add_source(&mapping.source);
        let name = mapping.name.as_deref().map(|n| self.add_name(n));
        self.segments.push(Segment {
            generated_line: mapping.generated_line,
            generated_column: mapping.generated_column,
            source,
            original_line: mapping.original_line,
            original_column: mapping.original_column,
            name,
        });
        Ok(())
    }

    /// Consume the builder and produce a finished `SourceMap`.
    pub fn build(self) -> SourceMap {
        let mappings = self.encode_mappings();
        let sources_content = if self.sources_content.iter().any(Option::is_some) {
            Some(self.sources_content)
        } else {
            None
        };
        SourceMap {
            version: 3,
            file: self.file,
            source_root: self.source_root,
            sources: self.sources,
            sources_content,
            names: self.names,
            mappings,
        }
    }

    fn encode_mappings(&self) -> String {
        let mut out = String::new();
        let mut line = 0u32;
        let mut prev_gen_col = 0i64;
        let mut prev_source = 0i64;
        let mut prev_orig_line = 0i64;
        let mut prev_orig_col = 0i64;
        let mut prev_name = 0i64;
        let mut first_in_line = true;

        for seg in &self.segments {
            while line < seg.generated_line {
                out.push(';');
                line += 1;
                prev_gen_col = 0;
                first_in_line = true;
            }
            if !first_in_line {
                out.push(',');
            }
            first_in_line = false;

            vlq_encode_into(&mut out, seg.generated_column as i64 - prev_gen_col);
            prev_gen_col = seg.generated_column as i64;
            vlq_encode_into(&mut out, seg.source as i64 - prev_source);
            prev_source = seg.source as i64;
            vlq_encode_into(&mut out, seg.original_line as i64 - prev_orig_line);
            prev_orig_line = seg.original_line as i64;
            vlq_encode_into(&mut out, seg.original_column as i64 - prev_orig_col);
            prev_orig_col = seg.original_column as i64;
            if let Some(name) = seg.name {
                vlq_encode_into(&mut out, name as i64 - prev_name);
                prev_name = name as i64;
            }
        }
        out
    }
}

/// A decoded mapping with all fields resolved to indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMapping {
    pub generated_line: u32,
    pub generated_column: u32,
    pub source: Option<u32>,
    pub original_line: Option<u32>,
    pub original_column: Option<u32>,
    pub name: Option<u32>,
}

/// Result of looking up the original position for a generated location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalPosition {
    pub source: String,
    pub line: u32,
    pub column: u32,
    pub name: Option<String>,
}

/// Result of looking up the generated position for an original location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedPosition {
    pub line: u32,
    pub column: u32,
}

/// Consumer that parses and queries source maps.
pub struct SourceMapConsumer {
    source_map: SourceMap,
    decoded_mappings: Vec<DecodedMapping>,
}

impl SourceMapConsumer {
    /// Create a consumer from a parsed `SourceMap`, decoding all mappings.
    pub fn new(source_map: SourceMap) -> Result<Self> {
        let decoded_mappings = decode_mappings(&source_map.mappings)?;
        Ok(Self {
            source_map,
            decoded_mappings,
        })
    }

    /// Parse a JSON source map string and create a consumer.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(SourceMap::from_json(json)?)
    }

    /// Look up the original position for a generated location (0-based).
    ///
    /// Picks the closest mapping at or before `column` on the same line.
    pub fn original_position_for(&self, line: u32, column: u32) -> Option<OriginalPosition> {
        let end = self
            .decoded_mappings
            .partition_point(|m| (m.generated_line, m.generated_column) <= (line, column));
        let m = self.decoded_mappings[..end]
            .iter()
            .rev()
            .take_while(|m| m.generated_line == line)
            .find(|m| m.source.is_some())?;
        Some(OriginalPosition {
            source: self.source_map.sources.get(m.source? as usize)?.clone(),
            line: m.original_line?,
            column: m.original_column?,
            name: m.name.and_then(|n| self.source_map.names.get(n as usize).cloned()),
        })
    }

    /// Look up the first generated position for an original location (0-based).
    pub fn generated_position_for(&self, source: &str, line: u32, column: u32) -> Option<GeneratedPosition> {
        let source_idx = self.source_map.sources.iter().position(|s| s == source)? as u32;
        self.decoded_mappings
            .iter()
            .find(|m| m.source == Some(source_idx) && m.original_line == Some(line) && m.original_column == Some(column))
            .map(|m| GeneratedPosition {
                line: m.generated_line,
                column: m.generated_column,
            })
    }

    /// Return all decoded mappings in generated order.
    pub fn all_mappings(&self) -> &[DecodedMapping] {
        &self.decoded_mappings
    }

    /// The map being consumed.
    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }
}

fn decode_mappings(mappings: &str) -> Result<Vec<DecodedMapping>> {
    let mut result = Vec::new();
    let mut prev_source = 0i64;
    let mut prev_orig_line = 0i64;
    let mut prev_orig_col = 0i64;
    let mut prev_name = 0i64;

    for (gen_line, line_str) in mappings.split(';').enumerate() {
        let mut prev_gen_col = 0i64;
        for segment_str in line_str.split(',').filter(|s| !s.is_empty()) {
            let fields = vlq_decode(segment_str)?;
            prev_gen_col += fields[0];

            let mut decoded = DecodedMapping {
                generated_line: gen_line as u32,
                generated_column: prev_gen_col as u32,
                source: None,
                original_line: None,
                original_column: None,
                name: None,
            };
            match fields.len() {
                1 => {}
                4 | 5 => {
                    prev_source += fields[1];
                    prev_orig_line += fields[2];
                    prev_orig_col += fields[3];
                    decoded.source = Some(prev_source as u32);
                    decoded.original_line = Some(prev_orig_line as u32);
                    decoded.original_column = Some(prev_orig_col as u32);
                    if let Some(delta) = fields.get(4) {
                        prev_name += delta;
                        decoded.name = Some(prev_name as u32);
                    }
                }
                n => {
                    return Err(Error::SourceMapError(format!(
                        "segment `{}` has {} fields",
                        segment_str, n
                    )))
                }
            }
            result.push(decoded);
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(gen: (u32, u32), orig: (u32, u32), name: Option<&str>) -> SourceMapping {
        SourceMapping {
            generated_line: gen.0,
            generated_column: gen.1,
            source: "input.js".to_string(),
            original_line: orig.0,
            original_column: orig.1,
            name: name.map(str::to_string),
        }
    }

    // ── VLQ ────────────────────────────────────────────────────────────

    #[test]
    fn vlq_known_encodings() {
        assert_eq!(vlq_encode(0), "A");
        assert_eq!(vlq_encode(1), "C");
        assert_eq!(vlq_encode(-1), "D");
        assert_eq!(vlq_encode(16), "gB");
    }

    #[test]
    fn vlq_decodes_concatenated_values() {
        let values = vec![0, 5, 10, -3, 1000];
        let encoded: String = values.iter().map(|v| vlq_encode(*v)).collect();
        assert_eq!(vlq_decode(&encoded).unwrap(), values);
    }

    #[test]
    fn vlq_rejects_bad_input() {
        assert!(vlq_decode("A!").is_err());
        assert!(vlq_decode("g").is_err());
    }

    // ── Builder ────────────────────────────────────────────────────────

    #[test]
    fn builder_encodes_lines_and_names() {
        let mut builder = SourceMapBuilder::new();
        builder.set_file("out.js");
        builder.record(&mapping((0, 0), (0, 0), None)).unwrap();
        builder.record(&mapping((0, 4), (0, 4), Some("x"))).unwrap();
        builder.record(&mapping((2, 0), (1, 0), None)).unwrap();

        let map = builder.build();
        assert_eq!(map.version, 3);
        assert_eq!(map.file.as_deref(), Some("out.js"));
        assert_eq!(map.sources, vec!["input.js"]);
        assert_eq!(map.names, vec!["x"]);
        assert_eq!(map.mappings, "AAAA,IAAIA;;AACJ");
    }

    #[test]
    fn builder_rejects_regressing_positions() {
        let mut builder = SourceMapBuilder::new();
        builder.record(&mapping((1, 5), (0, 0), None)).unwrap();
        builder.record(&mapping((1, 5), (0, 1), None)).unwrap();
        assert!(builder.record(&mapping((1, 2), (0, 2), None)).is_err());
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn builder_deduplicates_sources_and_names() {
        let mut builder = SourceMapBuilder::new();
        assert_eq!(builder.add_source("a.js"), builder.add_source("a.js"));
        assert_eq!(builder.add_name("foo"), builder.add_name("foo"));
        builder.set_source_content("a.js", "foo();");
        let map = builder.build();
        assert_eq!(map.sources_content, Some(vec![Some("foo();".to_string())]));
    }

    // ── Consumer ───────────────────────────────────────────────────────

    #[test]
    fn consumer_looks_up_positions() {
        let mut builder = SourceMapBuilder::new();
        builder.record(&mapping((0, 0), (0, 0), None)).unwrap();
        builder.record(&mapping((0, 4), (2, 8), Some("myFunc"))).unwrap();
        let consumer = SourceMapConsumer::new(builder.build()).unwrap();

        let pos = consumer.original_position_for(0, 6).unwrap();
        assert_eq!(pos.source, "input.js");
        assert_eq!((pos.line, pos.column), (2, 8));
        assert_eq!(pos.name.as_deref(), Some("myFunc"));

        let gen = consumer.generated_position_for("input.js", 2, 8).unwrap();
        assert_eq!((gen.line, gen.column), (0, 4));

        assert!(consumer.original_position_for(3, 0).is_none());
        assert!(consumer.generated_position_for("other.js", 0, 0).is_none());
    }

    #[test]
    fn json_roundtrip() {
        let mut builder = SourceMapBuilder::new();
        builder.set_source_root("/src/");
        builder.record(&mapping((0, 0), (0, 0), Some("log"))).unwrap();
        let json = builder.build().to_json().unwrap();
        assert!(json.contains("\"sourceRoot\":\"/src/\""));

        let consumer = SourceMapConsumer::from_json(&json).unwrap();
        assert_eq!(consumer.all_mappings().len(), 1);
        assert_eq!(consumer.source_map().names, vec!["log"]);
    }

    #[test]
    fn from_json_rejects_wrong_version() {
        let json = r#"{"version":2,"sources":[],"names":[],"mappings":""}"#;
        assert!(SourceMap::from_json(json).is_err());
    }
}
